//! Services over the remote gateway.
//!
//! Every call takes the caller's [`Session`](crate::session::Session) and
//! passes gateway results through it, so a rejected token signs the user out.

mod account;
mod dashboard;
mod packages;

pub use account::{AccountService, AccountServiceError};
pub use dashboard::{DashboardService, DashboardServiceError};
pub use packages::{PackagesService, PackagesServiceError};
