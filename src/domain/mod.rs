pub mod auth;
pub mod marketplace;
pub mod session;
