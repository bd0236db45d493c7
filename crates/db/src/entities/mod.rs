//! Database entities.

pub mod report;
pub mod strike;
pub mod user;

pub use report::Entity as Report;
pub use strike::Entity as Strike;
pub use user::Entity as User;
