mod models;
mod password;
mod ports;
mod services;

pub use models::*;
pub use password::*;
pub use ports::*;
pub use services::*;
