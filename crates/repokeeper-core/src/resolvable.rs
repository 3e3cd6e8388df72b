use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvableKind {
    Product,
    Package,
    Pattern,
}

impl ResolvableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResolvableKind::Product => "product",
            ResolvableKind::Package => "package",
            ResolvableKind::Pattern => "pattern",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvableStatus {
    Available,
    Installed,
    Selected,
    Removed,
}

/// Who requested the current transaction state of a resolvable, lowest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactBy {
    Solver,
    Analyzer,
    User,
    ApplLow,
    ApplHigh,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolvable {
    pub name: String,
    pub kind: ResolvableKind,
    pub status: ResolvableStatus,
    #[serde(default = "transact_by_default")]
    pub transact_by: TransactBy,
    /// Alias of the repository providing this resolvable.
    pub repository: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvableQuery {
    pub kind: ResolvableKind,
    pub status: ResolvableStatus,
    pub transact_by: TransactBy,
}

impl ResolvableQuery {
    /// Products the application explicitly selected for installation.
    pub fn selected_products() -> Self {
        Self {
            kind: ResolvableKind::Product,
            status: ResolvableStatus::Selected,
            transact_by: TransactBy::ApplHigh,
        }
    }

    pub fn matches(&self, resolvable: &Resolvable) -> bool {
        resolvable.kind == self.kind
            && resolvable.status == self.status
            && resolvable.transact_by == self.transact_by
    }
}

fn transact_by_default() -> TransactBy {
    TransactBy::Solver
}
