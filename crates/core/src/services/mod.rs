//! Business logic services.

mod auth;
mod profile;
mod report;
mod stats;
mod strike;

pub use auth::{AuthService, LoginOutcome, RegisterInput};
pub use profile::ProfileService;
pub use report::{ReportService, SubmitReportInput};
pub use stats::{Stats, StatsService};
pub use strike::{IssueStrikeInput, StrikeService};
