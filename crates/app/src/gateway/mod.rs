//! Remote data gateway
//!
//! The HTTP/JSON API behind the dashboard: users, plans, products,
//! commissions, deposits, referrals, login and registration. Amounts cross
//! this boundary as decimal major units and leave it as minor units.

use async_trait::async_trait;
use mockall::automock;

use upline::{
    package::{PackageSubmission, Plan, PlanId},
    products::Product,
    wizard::{Password, RegistrationRequest},
};

use crate::session::Session;

mod errors;
mod http;
pub mod models;
mod wire;

pub use errors::GatewayError;
pub use http::{GatewayConfig, HttpGateway};
pub use models::{
    AdminUser, BottleCommission, Deposit, DepositPage, LoginGrant, Referral,
};
pub use wire::interpret;

#[automock]
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Exchange credentials for a user and bearer token.
    async fn login(&self, login: &str, password: &Password) -> Result<LoginGrant, GatewayError>;

    /// Submit a completed registration; returns the API's message.
    async fn register(&self, request: &RegistrationRequest) -> Result<String, GatewayError>;

    /// Latest referred members.
    async fn latest_referrals(&self, session: &Session) -> Result<Vec<Referral>, GatewayError>;

    /// Every plan (package).
    async fn plans(&self, session: &Session) -> Result<Vec<Plan>, GatewayError>;

    /// Create a plan; returns the API's message.
    async fn create_plan(
        &self,
        session: &Session,
        submission: &PackageSubmission,
    ) -> Result<String, GatewayError>;

    /// Replace an existing plan; returns the API's message.
    async fn update_plan(
        &self,
        session: &Session,
        id: PlanId,
        submission: &PackageSubmission,
    ) -> Result<String, GatewayError>;

    /// Delete a plan; returns the API's message.
    async fn delete_plan(&self, session: &Session, id: PlanId) -> Result<String, GatewayError>;

    /// The product catalog.
    async fn products(&self, session: &Session) -> Result<Vec<Product>, GatewayError>;

    /// Users in the admin listing, including administrators.
    async fn users(&self, session: &Session) -> Result<Vec<AdminUser>, GatewayError>;

    /// Bottle commissions.
    async fn bottle_commissions(
        &self,
        session: &Session,
    ) -> Result<Vec<BottleCommission>, GatewayError>;

    /// One page of a user's e-wallet deposits.
    async fn deposits(
        &self,
        session: &Session,
        user_id: u64,
        page: u32,
    ) -> Result<DepositPage, GatewayError>;
}
