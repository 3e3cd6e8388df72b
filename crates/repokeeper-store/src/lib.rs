mod manager;
mod resolvable_state;
mod source_state;
mod source_store;

pub(crate) use resolvable_state::parse_resolvable_file;
pub(crate) use source_state::{
    parse_source_table_file, sort_repositories, state_file_version, validate_source_table,
    SourceTableFile,
};

pub use manager::StoreManager;
pub use source_store::SourceStore;
