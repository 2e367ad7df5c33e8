//! reqwest implementation of the gateway.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use rusty_money::iso::Currency;
use serde::de::DeserializeOwned;
use tracing::debug;

use upline::{
    package::{PackageSubmission, Plan, PlanId},
    products::Product,
    wizard::{Password, RegistrationRequest},
};

use crate::{
    gateway::{
        Gateway, GatewayError,
        models::{AdminUser, BottleCommission, DepositPage, LoginGrant, Referral},
        wire::{
            Data, Paginated, WireCommissions, WireDeposit, WireLogin, WireLoginGrant,
            WireMessage, WirePlan, WirePlanRequest, WireProduct, WireReferral, WireUser,
            interpret,
        },
    },
    session::{BearerToken, Session},
};

/// Where the API lives and which currency its amounts are in.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// API base URL, e.g. `"https://api.example.com"`.
    pub base_url: String,

    /// Currency of every amount the API sends and receives.
    pub currency: &'static Currency,
}

/// HTTP client for the remote API.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    config: GatewayConfig,
    http: Client,
}

impl HttpGateway {
    /// Create a new gateway from the given configuration.
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn request(&self, method: Method, path: &str, session: Option<&Session>) -> RequestBuilder {
        let url = format!(
            "{}/api/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );

        debug!(%method, %url, "api request");

        let request = self
            .http
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");

        match session.and_then(Session::token) {
            Some(token) => request.bearer_auth(token.expose()),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, GatewayError> {
        let response = request.send().await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        interpret(status, &body)
    }

    async fn message(&self, request: RequestBuilder) -> Result<String, GatewayError> {
        let wire: WireMessage = self.send(request).await?;

        Ok(wire.message.unwrap_or_default())
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn login(&self, login: &str, password: &Password) -> Result<LoginGrant, GatewayError> {
        let request = self.request(Method::POST, "login", None).json(&WireLogin {
            login,
            password: password.expose(),
        });

        let wire: WireLoginGrant = self.send(request).await?;

        Ok(LoginGrant {
            user: wire.user.into_session_user()?,
            token: BearerToken::new(wire.token),
        })
    }

    async fn register(&self, request: &RegistrationRequest) -> Result<String, GatewayError> {
        self.message(self.request(Method::POST, "register", None).json(request))
            .await
    }

    async fn latest_referrals(&self, session: &Session) -> Result<Vec<Referral>, GatewayError> {
        let request = self.request(Method::GET, "referrals/latest", Some(session));

        let wire: Data<Vec<WireReferral>> = self.send(request).await?;

        Ok(wire.data.into_iter().map(Referral::from).collect())
    }

    async fn plans(&self, session: &Session) -> Result<Vec<Plan>, GatewayError> {
        let request = self.request(Method::GET, "plans/all", Some(session));

        let wire: Data<Paginated<WirePlan>> = self.send(request).await?;

        wire.data
            .data
            .into_iter()
            .map(|plan| plan.into_plan(self.config.currency))
            .collect()
    }

    async fn create_plan(
        &self,
        session: &Session,
        submission: &PackageSubmission,
    ) -> Result<String, GatewayError> {
        let body = WirePlanRequest::new(submission, self.config.currency)?;

        self.message(self.request(Method::POST, "plans", Some(session)).json(&body))
            .await
    }

    async fn update_plan(
        &self,
        session: &Session,
        id: PlanId,
        submission: &PackageSubmission,
    ) -> Result<String, GatewayError> {
        let body = WirePlanRequest::new(submission, self.config.currency)?;

        self.message(
            self.request(Method::PUT, &format!("plans/{id}"), Some(session))
                .json(&body),
        )
        .await
    }

    async fn delete_plan(&self, session: &Session, id: PlanId) -> Result<String, GatewayError> {
        self.message(self.request(Method::DELETE, &format!("plans/{id}"), Some(session)))
            .await
    }

    async fn products(&self, session: &Session) -> Result<Vec<Product>, GatewayError> {
        let request = self.request(Method::GET, "allproducts", Some(session));

        let wire: Vec<WireProduct> = self.send(request).await?;

        wire.into_iter()
            .map(|product| product.into_product(self.config.currency))
            .collect()
    }

    async fn users(&self, session: &Session) -> Result<Vec<AdminUser>, GatewayError> {
        let request = self.request(Method::GET, "admin/users", Some(session));

        let wire: Data<Paginated<WireUser>> = self.send(request).await?;

        wire.data
            .data
            .into_iter()
            .map(WireUser::into_admin_user)
            .collect()
    }

    async fn bottle_commissions(
        &self,
        session: &Session,
    ) -> Result<Vec<BottleCommission>, GatewayError> {
        let request = self.request(Method::GET, "bottle_commission", Some(session));

        let wire: WireCommissions = self.send(request).await?;

        wire.commissions
            .data
            .into_iter()
            .map(|commission| commission.into_commission(self.config.currency))
            .collect()
    }

    async fn deposits(
        &self,
        session: &Session,
        user_id: u64,
        page: u32,
    ) -> Result<DepositPage, GatewayError> {
        let page = page.max(1);

        let request = self
            .request(
                Method::GET,
                &format!("users/{user_id}/fund-e-wallets"),
                Some(session),
            )
            .query(&[("page", page)]);

        let wire: Data<Paginated<WireDeposit>> = self.send(request).await?;

        wire.data.into_page(page, self.config.currency)
    }
}
