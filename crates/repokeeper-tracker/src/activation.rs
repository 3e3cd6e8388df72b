use repokeeper_core::{PackageManager, RepoKey, Resolvable, ResolvableQuery, TrackerError};
use serde::Serialize;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RepoAction {
    Delete { key: RepoKey },
    Enable { key: RepoKey },
    Disable { key: RepoKey },
    SetUrl { key: RepoKey, url: String },
}

impl RepoAction {
    pub fn key(&self) -> &RepoKey {
        match self {
            RepoAction::Delete { key }
            | RepoAction::Enable { key }
            | RepoAction::Disable { key }
            | RepoAction::SetUrl { key, .. } => key,
        }
    }
}

/// Ordered side effects of one activation, before the source reload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivationPlan {
    pub repositories: Vec<RepoAction>,
    /// Aliases of the services to delete.
    pub services: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceReloadStep {
    SaveAll,
    FinishAll,
    Restore,
    Load,
}

/// Product resolution reads the rebuilt source table, so this order is fixed.
pub const SOURCE_RELOAD_SEQUENCE: [SourceReloadStep; 4] = [
    SourceReloadStep::SaveAll,
    SourceReloadStep::FinishAll,
    SourceReloadStep::Restore,
    SourceReloadStep::Load,
];

impl SourceReloadStep {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceReloadStep::SaveAll => "save_all_sources",
            SourceReloadStep::FinishAll => "finish_all_sources",
            SourceReloadStep::Restore => "restore_sources",
            SourceReloadStep::Load => "load_sources",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivationReport {
    pub deleted: usize,
    pub enabled: usize,
    pub disabled: usize,
    pub url_updates: usize,
    pub services_deleted: Vec<String>,
    pub products_reselected: Vec<String>,
    /// Products selected before the reload that could not be selected again.
    pub products_unresolved: Vec<String>,
}

/// Issues an [`ActivationPlan`] against the package manager, one call at a time. The first
/// failing call aborts the commit; calls already issued are not rolled back.
pub struct ActivationCommitter<'a, M: PackageManager + ?Sized> {
    manager: &'a mut M,
}

impl<'a, M: PackageManager + ?Sized> ActivationCommitter<'a, M> {
    pub fn new(manager: &'a mut M) -> Self {
        Self { manager }
    }

    pub fn commit(&mut self, plan: &ActivationPlan) -> Result<ActivationReport, TrackerError> {
        info!(
            repositories = plan.repositories.len(),
            services = plan.services.len(),
            "activating repository changes"
        );
        let mut report = ActivationReport::default();

        // The source reload drops the current selection, so read it before changing anything.
        let selected = self.selected_products()?;

        for action in &plan.repositories {
            self.apply_repo_action(action, &mut report)?;
        }

        for alias in &plan.services {
            debug!(service = %alias, "deleting service");
            self.manager
                .delete_service(alias)
                .map_err(|err| TrackerError::external(format!("delete_service({alias})"), err))?;
            report.services_deleted.push(alias.clone());
        }

        for step in SOURCE_RELOAD_SEQUENCE {
            self.reload_step(step)?;
        }

        self.reselect_products(selected, &mut report)?;
        info!(
            deleted = report.deleted,
            enabled = report.enabled,
            disabled = report.disabled,
            url_updates = report.url_updates,
            "repository changes activated"
        );
        Ok(report)
    }

    fn apply_repo_action(
        &mut self,
        action: &RepoAction,
        report: &mut ActivationReport,
    ) -> Result<(), TrackerError> {
        debug!(repository = %action.key(), ?action, "applying repository action");
        let (operation, result) = match action {
            RepoAction::Delete { key } => {
                report.deleted += 1;
                ("delete", self.manager.delete_repository(key))
            }
            RepoAction::Enable { key } => {
                report.enabled += 1;
                ("enable", self.manager.enable_repository(key))
            }
            RepoAction::Disable { key } => {
                report.disabled += 1;
                ("disable", self.manager.disable_repository(key))
            }
            RepoAction::SetUrl { key, url } => {
                report.url_updates += 1;
                ("set_url", self.manager.set_repository_url(key, url))
            }
        };

        result.map_err(|err| {
            TrackerError::external(format!("{operation}({})", action.key()), err)
        })
    }

    fn reload_step(&mut self, step: SourceReloadStep) -> Result<(), TrackerError> {
        debug!(step = step.as_str(), "reloading package sources");
        let result = match step {
            SourceReloadStep::SaveAll => self.manager.save_all_sources(),
            SourceReloadStep::FinishAll => self.manager.finish_all_sources(),
            SourceReloadStep::Restore => self.manager.restore_sources(),
            SourceReloadStep::Load => self.manager.load_sources(),
        };
        result.map_err(|err| TrackerError::external(step.as_str(), err))
    }

    fn selected_products(&self) -> Result<Vec<Resolvable>, TrackerError> {
        let query = ResolvableQuery::selected_products();
        let products = self
            .manager
            .find_resolvables(&query)
            .map_err(|err| TrackerError::external("find_resolvables", err))?;
        debug!(products = products.len(), "captured selected products");
        Ok(products)
    }

    fn reselect_products(
        &mut self,
        products: Vec<Resolvable>,
        report: &mut ActivationReport,
    ) -> Result<(), TrackerError> {
        for product in products {
            let installed = self
                .manager
                .install_resolvable(&product.name, product.kind)
                .map_err(|err| {
                    TrackerError::external(format!("install_resolvable({})", product.name), err)
                })?;
            if installed {
                debug!(product = %product.name, "product selected again");
                report.products_reselected.push(product.name);
            } else {
                warn!(product = %product.name, "cannot select product again");
                report.products_unresolved.push(product.name);
            }
        }

        Ok(())
    }
}
