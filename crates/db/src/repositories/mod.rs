//! Database repositories.

mod report;
mod strike;
mod user;

pub use report::ReportRepository;
pub use strike::StrikeRepository;
pub use user::UserRepository;
