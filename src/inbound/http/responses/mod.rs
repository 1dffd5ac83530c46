pub mod alert;
pub mod health;
pub mod marketplace;
pub mod shared;
