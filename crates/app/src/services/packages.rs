//! Packages service.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use upline::{
    package::{PackageDraft, PackageError, Plan, PlanId},
    products::Product,
};

use crate::{
    gateway::{Gateway, GatewayError},
    session::Session,
};

#[derive(Debug, Error)]
pub enum PackagesServiceError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Package(#[from] PackageError),

    #[error("package {0} not found")]
    NotFound(PlanId),
}

/// Package listing and composition against the remote API.
#[derive(Clone)]
pub struct PackagesService {
    gateway: Arc<dyn Gateway>,
}

impl std::fmt::Debug for PackagesService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackagesService").finish_non_exhaustive()
    }
}

impl PackagesService {
    #[must_use]
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// Every package.
    ///
    /// # Errors
    ///
    /// Returns a gateway error if the listing fails.
    pub async fn list(&self, session: &mut Session) -> Result<Vec<Plan>, PackagesServiceError> {
        let result = self.gateway.plans(session).await;

        Ok(session.observe(result)?)
    }

    /// The product catalog packages are composed from.
    ///
    /// # Errors
    ///
    /// Returns a gateway error if the listing fails.
    pub async fn catalog(
        &self,
        session: &mut Session,
    ) -> Result<Vec<Product>, PackagesServiceError> {
        let result = self.gateway.products(session).await;

        Ok(session.observe(result)?)
    }

    /// Open an existing package for editing, priced from the current catalog.
    ///
    /// # Errors
    ///
    /// Returns [`PackagesServiceError::NotFound`] for an unknown id, or a
    /// package error if the plan names products missing from the catalog.
    pub async fn edit(
        &self,
        session: &mut Session,
        id: PlanId,
    ) -> Result<PackageDraft, PackagesServiceError> {
        let plans = self.list(session).await?;

        let plan = plans
            .iter()
            .find(|plan| plan.id == id)
            .ok_or(PackagesServiceError::NotFound(id))?;

        let catalog = self.catalog(session).await?;

        Ok(PackageDraft::from_plan(plan, &catalog)?)
    }

    /// Validate `draft` and submit it, creating a package or replacing the
    /// one named by `target`. Returns the API's message.
    ///
    /// # Errors
    ///
    /// Returns a package error without contacting the API when the draft is
    /// not submittable, or a gateway error if the API rejects it.
    pub async fn submit(
        &self,
        session: &mut Session,
        draft: &PackageDraft,
        target: Option<PlanId>,
    ) -> Result<String, PackagesServiceError> {
        let submission = draft.submission()?;

        let result = match target {
            Some(id) => self.gateway.update_plan(session, id, &submission).await,
            None => self.gateway.create_plan(session, &submission).await,
        };

        let message = session.observe(result)?;

        info!(name = %submission.name, updated = target.is_some(), "package submitted");

        Ok(message)
    }

    /// Delete a package. Returns the API's message.
    ///
    /// # Errors
    ///
    /// Returns a gateway error if the API rejects the deletion.
    pub async fn delete(
        &self,
        session: &mut Session,
        id: PlanId,
    ) -> Result<String, PackagesServiceError> {
        let result = self.gateway.delete_plan(session, id).await;

        Ok(session.observe(result)?)
    }
}
