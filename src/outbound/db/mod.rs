mod accounts;
pub mod connection;
pub mod error;
mod marketplace;
pub mod models;
pub mod repository;
