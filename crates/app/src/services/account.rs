//! Account service: sign-in, sign-out and registration.

use std::sync::Arc;

use thiserror::Error;

use upline::wizard::{Password, RegistrationWizard, WizardError};

use crate::{
    gateway::{Gateway, GatewayError},
    session::{Session, SessionUser},
};

#[derive(Debug, Error)]
pub enum AccountServiceError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Wizard(#[from] WizardError),
}

#[derive(Clone)]
pub struct AccountService {
    gateway: Arc<dyn Gateway>,
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService").finish_non_exhaustive()
    }
}

impl AccountService {
    #[must_use]
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// Sign in and begin `session`. Any previous session is ended first.
    ///
    /// # Errors
    ///
    /// Returns a gateway error if the credentials are rejected.
    pub async fn login(
        &self,
        session: &mut Session,
        login: &str,
        password: &Password,
    ) -> Result<SessionUser, AccountServiceError> {
        session.end();

        let grant = self.gateway.login(login.trim(), password).await?;

        session.begin(grant.user.clone(), grant.token);

        Ok(grant.user)
    }

    /// End `session`.
    pub fn logout(&self, session: &mut Session) {
        session.end();
    }

    /// Submit a completed wizard. Returns the API's message.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::Incomplete`] without contacting the API when a
    /// step is still invalid, or a gateway error if the API rejects it.
    pub async fn register(
        &self,
        wizard: &RegistrationWizard,
    ) -> Result<String, AccountServiceError> {
        let request = wizard.submit()?;

        Ok(self.gateway.register(&request).await?)
    }
}
