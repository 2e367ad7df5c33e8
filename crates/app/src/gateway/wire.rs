//! Wire shapes of the remote API and their conversion into domain types.

use std::str::FromStr;

use jiff::Timestamp;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Number, Value};

use upline::{
    money::{decimal_from_minor, parse_minor},
    package::{PackageSubmission, Plan, PlanId, PlanProduct},
    products::{Product, ProductId},
};

use crate::{
    gateway::{
        GatewayError,
        models::{AdminUser, BottleCommission, Deposit, DepositPage, Referral},
    },
    session::SessionUser,
};

/// Body message the API sends when a token is missing or revoked.
pub(crate) const UNAUTHENTICATED_MESSAGE: &str = "Unauthenticated.";

/// A number the API sends either as a JSON number or as a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum Lenient {
    Number(Number),
    Text(String),
}

impl Lenient {
    fn text(&self) -> String {
        match self {
            Self::Number(number) => number.to_string(),
            Self::Text(text) => text.trim().to_string(),
        }
    }

    /// Decimal major units converted to minor units of `currency`.
    pub(crate) fn minor(&self, currency: &Currency) -> Result<u64, GatewayError> {
        parse_minor(&self.text(), currency).map_err(GatewayError::decode)
    }

    /// A non-negative whole number.
    pub(crate) fn whole(&self) -> Result<u64, GatewayError> {
        let text = self.text();

        Decimal::from_str(&text)
            .ok()
            .filter(|decimal| decimal.fract().is_zero())
            .and_then(|decimal| decimal.to_u64())
            .ok_or_else(|| GatewayError::Decode(format!("`{text}` is not a whole number")))
    }

    pub(crate) fn count(&self) -> Result<u32, GatewayError> {
        u32::try_from(self.whole()?).map_err(GatewayError::decode)
    }
}

fn timestamp(value: Option<&str>) -> Option<Timestamp> {
    value.and_then(|value| value.parse().ok())
}

#[derive(Debug, Deserialize)]
pub(crate) struct Data<T> {
    pub(crate) data: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Paginated<T> {
    pub(crate) data: Vec<T>,

    #[serde(default)]
    pub(crate) total: Option<Lenient>,

    #[serde(default)]
    pub(crate) per_page: Option<Lenient>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireMessage {
    #[serde(default)]
    pub(crate) message: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct WireLogin<'a> {
    pub(crate) login: &'a str,
    pub(crate) password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireLoginGrant {
    pub(crate) token: String,
    pub(crate) user: WireUser,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireUser {
    #[serde(default)]
    id: Option<Lenient>,
    username: String,
    #[serde(default)]
    fullname: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

impl WireUser {
    pub(crate) fn into_session_user(self) -> Result<SessionUser, GatewayError> {
        let id = self
            .id
            .as_ref()
            .ok_or_else(|| GatewayError::Decode("user has no id".to_string()))?
            .whole()?;

        Ok(SessionUser {
            id,
            username: self.username,
            email: self.email,
            role: self.role,
        })
    }

    pub(crate) fn into_admin_user(self) -> Result<AdminUser, GatewayError> {
        Ok(AdminUser {
            id: self.id.as_ref().map(Lenient::whole).transpose()?,
            username: self.username,
            fullname: self.fullname,
            email: self.email,
            role: self.role,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireReferral {
    user: WireReferralUser,
}

#[derive(Debug, Deserialize)]
struct WireReferralUser {
    #[serde(default)]
    fullname: Option<String>,
    username: String,
    #[serde(default)]
    created_at: Option<String>,
}

impl From<WireReferral> for Referral {
    fn from(referral: WireReferral) -> Self {
        let user = referral.user;

        Self {
            joined: timestamp(user.created_at.as_deref()),
            fullname: user.fullname,
            username: user.username,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WirePlan {
    id: Lenient,
    name: String,
    price: Lenient,
    #[serde(default)]
    point_value: Option<Lenient>,
    #[serde(default)]
    products: Vec<WirePlanProduct>,
}

#[derive(Debug, Deserialize)]
struct WirePlanProduct {
    #[serde(alias = "product_name")]
    name: String,
    #[serde(default)]
    quantity: Option<Lenient>,
    #[serde(default)]
    pivot: Option<WirePivot>,
}

#[derive(Debug, Deserialize)]
struct WirePivot {
    quantity: Lenient,
}

impl WirePlan {
    pub(crate) fn into_plan(self, currency: &Currency) -> Result<Plan, GatewayError> {
        let products = self
            .products
            .into_iter()
            .map(|product| {
                let quantity = match product.quantity.or(product.pivot.map(|p| p.quantity)) {
                    Some(quantity) => quantity.count()?,
                    None => 1,
                };

                Ok(PlanProduct {
                    name: product.name,
                    quantity,
                })
            })
            .collect::<Result<Vec<_>, GatewayError>>()?;

        Ok(Plan {
            id: PlanId(self.id.whole()?),
            name: self.name,
            price: self.price.minor(currency)?,
            point_value: self.point_value.as_ref().map_or(Ok(0), Lenient::whole)?,
            products,
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct WirePlanRequest<'a> {
    name: &'a str,
    price: Number,
    point_value: u64,
    products: &'a [PlanProduct],
}

impl<'a> WirePlanRequest<'a> {
    pub(crate) fn new(
        submission: &'a PackageSubmission,
        currency: &Currency,
    ) -> Result<Self, GatewayError> {
        let price = decimal_from_minor(submission.price, currency).to_string();

        Ok(Self {
            name: &submission.name,
            price: Number::from_str(&price)
                .map_err(|error| GatewayError::Encode(format!("price `{price}`: {error}")))?,
            point_value: submission.point_value,
            products: &submission.products,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireProduct {
    id: Lenient,
    #[serde(alias = "name")]
    product_name: String,
    price: Lenient,
    #[serde(default)]
    image: Option<String>,
}

impl WireProduct {
    pub(crate) fn into_product(self, currency: &Currency) -> Result<Product, GatewayError> {
        Ok(Product {
            id: ProductId(self.id.whole()?),
            name: self.product_name,
            image: self.image,
            price: self.price.minor(currency)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireCommissions {
    pub(crate) commissions: Paginated<WireCommission>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireCommission {
    user_id: Lenient,
    user: WireCommissionUser,
    total_amount: Lenient,
    total_transactions: Lenient,
    #[serde(default)]
    bottle_commission: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct WireCommissionUser {
    username: String,
}

impl WireCommission {
    pub(crate) fn into_commission(
        self,
        currency: &Currency,
    ) -> Result<BottleCommission, GatewayError> {
        Ok(BottleCommission {
            user_id: self.user_id.whole()?,
            username: self.user.username,
            total_amount: self.total_amount.minor(currency)?,
            total_transactions: self.total_transactions.count()?,
            history: self.bottle_commission,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireDeposit {
    id: Lenient,
    amount: Lenient,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
}

impl WireDeposit {
    fn into_deposit(self, currency: &Currency) -> Result<Deposit, GatewayError> {
        Ok(Deposit {
            id: self.id.whole()?,
            amount: self.amount.minor(currency)?,
            status: self.status,
            created_at: timestamp(self.created_at.as_deref()),
        })
    }
}

impl Paginated<WireDeposit> {
    /// Convert one page of deposits. Without `per_page` the page size is taken
    /// to be the number of records returned.
    pub(crate) fn into_page(
        self,
        page: u32,
        currency: &Currency,
    ) -> Result<DepositPage, GatewayError> {
        let returned = u64::try_from(self.data.len()).unwrap_or(u64::MAX);

        let total = self.total.as_ref().map_or(Ok(returned), Lenient::whole)?;
        let per_page = self
            .per_page
            .as_ref()
            .map_or(Ok(returned), Lenient::whole)?;

        let seen = u64::from(page.saturating_sub(1))
            .saturating_mul(per_page)
            .saturating_add(returned);

        let deposits = self
            .data
            .into_iter()
            .map(|deposit| deposit.into_deposit(currency))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DepositPage {
            page,
            total,
            has_next: returned > 0 && seen < total,
            deposits,
        })
    }
}

/// Map a raw API response onto a typed body or a [`GatewayError`].
///
/// A 401 status or an `Unauthenticated.` message means the session is no
/// longer valid; any other non-2xx status is a rejection carrying the API's
/// message.
///
/// # Errors
///
/// Returns a [`GatewayError`] for rejected or undecodable responses.
pub fn interpret<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, GatewayError> {
    let message = serde_json::from_str::<WireMessage>(body)
        .ok()
        .and_then(|wire| wire.message);

    if status == 401 || message.as_deref() == Some(UNAUTHENTICATED_MESSAGE) {
        return Err(GatewayError::Unauthenticated);
    }

    if !(200..300).contains(&status) {
        return Err(GatewayError::Rejected {
            status,
            message: message.unwrap_or_else(|| format!("request failed with status {status}")),
        });
    }

    serde_json::from_str(body).map_err(GatewayError::decode)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn lenient_numbers_accept_strings_and_numbers() -> TestResult {
        let values: Vec<Lenient> = serde_json::from_str(r#"[14000, "14000.00", 12.5]"#)?;

        let minors = values
            .iter()
            .map(|value| value.minor(iso::NGN))
            .collect::<Result<Vec<_>, _>>()?;

        assert_eq!(minors, vec![1_400_000, 1_400_000, 1_250]);

        Ok(())
    }

    #[test]
    fn whole_rejects_fractions() -> TestResult {
        let value: Lenient = serde_json::from_str(r#""2.5""#)?;

        assert!(matches!(value.whole(), Err(GatewayError::Decode(_))));

        Ok(())
    }

    #[test]
    fn status_401_is_unauthenticated() {
        let result: Result<Value, _> = interpret(401, "");

        assert!(matches!(result, Err(GatewayError::Unauthenticated)));
    }

    #[test]
    fn unauthenticated_message_is_unauthenticated() {
        let result: Result<Value, _> = interpret(403, r#"{"message":"Unauthenticated."}"#);

        assert!(matches!(result, Err(GatewayError::Unauthenticated)));
    }

    #[test]
    fn rejection_carries_api_message() {
        let result: Result<Value, _> =
            interpret(422, r#"{"message":"The name has already been taken."}"#);

        assert!(matches!(
            result,
            Err(GatewayError::Rejected { status: 422, ref message })
                if message == "The name has already been taken."
        ));
    }

    #[test]
    fn plan_products_fall_back_to_pivot_quantity() -> TestResult {
        let plan: WirePlan = serde_json::from_str(
            r#"{
                "id": 3,
                "name": "Starter",
                "price": "14000.00",
                "point_value": "40",
                "products": [
                    {"product_name": "Aloe Gel", "pivot": {"quantity": 2}},
                    {"name": "Herbal Tea", "quantity": "3"},
                    {"name": "Vitamin C"}
                ]
            }"#,
        )?;

        let plan = plan.into_plan(iso::NGN)?;

        assert_eq!(plan.id, PlanId(3));
        assert_eq!(plan.price, 1_400_000);
        assert_eq!(plan.point_value, 40);
        assert_eq!(
            plan.products
                .iter()
                .map(|p| (p.name.as_str(), p.quantity))
                .collect::<Vec<_>>(),
            vec![("Aloe Gel", 2), ("Herbal Tea", 3), ("Vitamin C", 1)]
        );

        Ok(())
    }

    #[test]
    fn plan_request_sends_major_units() -> TestResult {
        let submission = PackageSubmission {
            name: "Starter".to_string(),
            price: 1_400_050,
            point_value: 40,
            products: vec![PlanProduct {
                name: "Aloe Gel".to_string(),
                quantity: 2,
            }],
        };

        let body = serde_json::to_value(WirePlanRequest::new(&submission, iso::NGN)?)?;

        assert_eq!(
            body,
            serde_json::json!({
                "name": "Starter",
                "price": 14000.5,
                "point_value": 40,
                "products": [{"name": "Aloe Gel", "quantity": 2}]
            })
        );

        Ok(())
    }

    #[test]
    fn deposit_pages_know_when_more_remain() -> TestResult {
        let wire: Paginated<WireDeposit> = serde_json::from_str(
            r#"{
                "data": [
                    {"id": 1, "amount": "5000", "status": "approved", "created_at": "2026-01-05T10:00:00.000000Z"},
                    {"id": 2, "amount": 2500}
                ],
                "per_page": 2,
                "total": 5
            }"#,
        )?;

        let page = wire.into_page(2, iso::NGN)?;

        assert!(page.has_next);
        assert_eq!(page.total, 5);
        assert_eq!(page.deposits.first().map(|d| d.amount), Some(500_000));
        assert!(page.deposits.first().and_then(|d| d.created_at).is_some());

        Ok(())
    }
}
