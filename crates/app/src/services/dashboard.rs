//! Dashboard service.

use std::sync::Arc;

use thiserror::Error;

use upline::cards::DashboardCard;

use crate::{
    gateway::{AdminUser, BottleCommission, DepositPage, Gateway, GatewayError, Referral},
    session::Session,
};

#[derive(Debug, Error)]
pub enum DashboardServiceError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("sign in to view this page")]
    SignedOut,
}

/// Read models for the member and admin dashboards.
#[derive(Clone)]
pub struct DashboardService {
    gateway: Arc<dyn Gateway>,
}

impl std::fmt::Debug for DashboardService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardService").finish_non_exhaustive()
    }
}

impl DashboardService {
    #[must_use]
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// Latest referred members.
    ///
    /// # Errors
    ///
    /// Returns a gateway error if the listing fails.
    pub async fn latest_referrals(
        &self,
        session: &mut Session,
    ) -> Result<Vec<Referral>, DashboardServiceError> {
        let result = self.gateway.latest_referrals(session).await;

        Ok(session.observe(result)?)
    }

    /// Users in the admin listing, administrators excluded.
    ///
    /// # Errors
    ///
    /// Returns a gateway error if the listing fails.
    pub async fn members(
        &self,
        session: &mut Session,
    ) -> Result<Vec<AdminUser>, DashboardServiceError> {
        let result = self.gateway.users(session).await;

        let mut users = session.observe(result)?;

        users.retain(|user| !user.is_admin());

        Ok(users)
    }

    /// Bottle commissions.
    ///
    /// # Errors
    ///
    /// Returns a gateway error if the listing fails.
    pub async fn bottle_commissions(
        &self,
        session: &mut Session,
    ) -> Result<Vec<BottleCommission>, DashboardServiceError> {
        let result = self.gateway.bottle_commissions(session).await;

        Ok(session.observe(result)?)
    }

    /// One page of the signed-in user's e-wallet deposits.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardServiceError::SignedOut`] without a signed-in user,
    /// or a gateway error if the listing fails.
    pub async fn deposits(
        &self,
        session: &mut Session,
        page: u32,
    ) -> Result<DepositPage, DashboardServiceError> {
        let user_id = session
            .user()
            .map(|user| user.id)
            .ok_or(DashboardServiceError::SignedOut)?;

        let result = self.gateway.deposits(session, user_id, page).await;

        Ok(session.observe(result)?)
    }

    /// Summary cards for the signed-in user: referral count and their bottle
    /// commission, when they have one.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardServiceError::SignedOut`] without a signed-in user,
    /// or a gateway error if a listing fails.
    pub async fn cards(
        &self,
        session: &mut Session,
    ) -> Result<Vec<DashboardCard>, DashboardServiceError> {
        let user_id = session
            .user()
            .map(|user| user.id)
            .ok_or(DashboardServiceError::SignedOut)?;

        let referrals = self.latest_referrals(session).await?;
        let commissions = self.bottle_commissions(session).await?;

        let mut cards = vec![DashboardCard::Referrals {
            count: u32::try_from(referrals.len()).unwrap_or(u32::MAX),
        }];

        if let Some(commission) = commissions
            .into_iter()
            .find(|commission| commission.user_id == user_id)
        {
            cards.push(DashboardCard::Commission {
                total_amount: commission.total_amount,
                transactions: commission.total_transactions,
            });
        }

        Ok(cards)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::{
        gateway::MockGateway,
        session::{BearerToken, SessionUser},
    };

    fn signed_in() -> Session {
        let mut session = Session::new();

        session.begin(
            SessionUser {
                id: 7,
                username: "ada".to_string(),
                email: None,
                role: None,
            },
            BearerToken::new("token"),
        );

        session
    }

    fn user(username: &str, role: &str) -> AdminUser {
        AdminUser {
            id: None,
            username: username.to_string(),
            fullname: None,
            email: None,
            role: Some(role.to_string()),
        }
    }

    #[tokio::test]
    async fn members_exclude_admins() -> TestResult {
        let mut gateway = MockGateway::new();

        gateway
            .expect_users()
            .once()
            .return_once(|_| Ok(vec![user("root", "admin"), user("ada", "user")]));

        let members = DashboardService::new(Arc::new(gateway))
            .members(&mut signed_in())
            .await?;

        assert_eq!(
            members.iter().map(|u| u.username.as_str()).collect::<Vec<_>>(),
            vec!["ada"]
        );

        Ok(())
    }

    #[tokio::test]
    async fn deposits_need_a_user() {
        let mut gateway = MockGateway::new();

        gateway.expect_deposits().never();

        let result = DashboardService::new(Arc::new(gateway))
            .deposits(&mut Session::new(), 1)
            .await;

        assert!(matches!(result, Err(DashboardServiceError::SignedOut)));
    }

    #[tokio::test]
    async fn rejected_token_ends_the_session() {
        let mut gateway = MockGateway::new();

        gateway
            .expect_deposits()
            .once()
            .withf(|_, user_id, page| *user_id == 7 && *page == 2)
            .return_once(|_, _, _| Err(GatewayError::Unauthenticated));

        let mut session = signed_in();

        let result = DashboardService::new(Arc::new(gateway))
            .deposits(&mut session, 2)
            .await;

        assert!(matches!(
            result,
            Err(DashboardServiceError::Gateway(GatewayError::Unauthenticated))
        ));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn cards_summarise_referrals_and_commission() -> TestResult {
        let mut gateway = MockGateway::new();

        gateway.expect_latest_referrals().once().return_once(|_| {
            Ok(vec![Referral {
                fullname: Some("Bola Ade".to_string()),
                username: "bola".to_string(),
                joined: None,
            }])
        });
        gateway.expect_bottle_commissions().once().return_once(|_| {
            Ok(vec![
                BottleCommission {
                    user_id: 3,
                    username: "chi".to_string(),
                    total_amount: 100,
                    total_transactions: 1,
                    history: vec![],
                },
                BottleCommission {
                    user_id: 7,
                    username: "ada".to_string(),
                    total_amount: 250_000,
                    total_transactions: 4,
                    history: vec![],
                },
            ])
        });

        let cards = DashboardService::new(Arc::new(gateway))
            .cards(&mut signed_in())
            .await?;

        assert_eq!(
            cards,
            vec![
                DashboardCard::Referrals { count: 1 },
                DashboardCard::Commission {
                    total_amount: 250_000,
                    transactions: 4,
                },
            ]
        );

        Ok(())
    }
}
