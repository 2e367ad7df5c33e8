//! Upline
//!
//! Upline is the client-side core of a multi-level-marketing storefront: a
//! registration wizard with cascading geography and phone validation, a
//! persistent cart, and the admin package composition editor.

pub mod cards;
pub mod cart;
pub mod geo;
pub mod money;
pub mod package;
pub mod phone;
pub mod products;
pub mod store;
pub mod wizard;
