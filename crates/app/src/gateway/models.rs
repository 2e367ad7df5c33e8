//! Read models returned by the gateway.

use jiff::Timestamp;

use crate::session::{BearerToken, SessionUser};

/// A successful login.
#[derive(Debug, Clone)]
pub struct LoginGrant {
    /// The signed-in user
    pub user: SessionUser,

    /// Token for subsequent requests
    pub token: BearerToken,
}

/// A recently referred member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Referral {
    /// Full name, when the member gave one
    pub fullname: Option<String>,

    /// Username
    pub username: String,

    /// When the member joined, if the API's timestamp parsed
    pub joined: Option<Timestamp>,
}

/// A user in the admin listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUser {
    /// User id
    pub id: Option<u64>,

    /// Username
    pub username: String,

    /// Full name
    pub fullname: Option<String>,

    /// Email address
    pub email: Option<String>,

    /// Role
    pub role: Option<String>,
}

impl AdminUser {
    /// Whether the user is an administrator.
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }
}

/// Bottle commission earned by a user.
#[derive(Debug, Clone, PartialEq)]
pub struct BottleCommission {
    /// Earning user's id
    pub user_id: u64,

    /// Earning user's username
    pub username: String,

    /// Total earned, in minor units
    pub total_amount: u64,

    /// Number of commission transactions
    pub total_transactions: u32,

    /// Raw commission history records
    pub history: Vec<serde_json::Value>,
}

/// An e-wallet deposit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deposit {
    /// Deposit id
    pub id: u64,

    /// Amount, in minor units
    pub amount: u64,

    /// Status label, e.g. `approved`
    pub status: Option<String>,

    /// When the deposit was made, if the API's timestamp parsed
    pub created_at: Option<Timestamp>,
}

/// One page of deposits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositPage {
    /// One-based page number
    pub page: u32,

    /// Total deposits across all pages
    pub total: u64,

    /// Deposits on this page
    pub deposits: Vec<Deposit>,

    /// Whether a further page exists
    pub has_next: bool,
}
