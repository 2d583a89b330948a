pub mod auth;
pub mod employees;
pub mod health;

pub use self::health::health;
