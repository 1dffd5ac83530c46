mod current;
mod login;
mod logout;

pub use current::account_current;
pub use login::account_login;
pub use logout::account_logout;
