mod account;
mod activities;
mod projects;
mod provider_eligibilities;
mod server;

pub use account::*;
pub use activities::*;
pub use projects::*;
pub use provider_eligibilities::*;
pub use server::*;
