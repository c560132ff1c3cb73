//! Domain models shared by the store, the token manager and the API layer.

pub mod auth;
pub mod user;
