//! Application layer: the remote gateway, geography lookups, the session
//! context and the services built on them.

pub mod context;
pub mod gateway;
pub mod geo;
pub mod services;
pub mod session;
