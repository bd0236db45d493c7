//! Dashboard statistics.

use serde::Serialize;
use troophq_common::AppResult;
use troophq_db::repositories::{ReportRepository, StrikeRepository, UserRepository};

/// Aggregate counts shown on the supervisor dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub active_troopers: u64,
    pub pending_profiles: u64,
    pub pending_reports: u64,
    pub total_strikes: u64,
}

/// Statistics service.
#[derive(Clone)]
pub struct StatsService {
    user_repo: UserRepository,
    report_repo: ReportRepository,
    strike_repo: StrikeRepository,
}

impl StatsService {
    /// Create a new statistics service.
    #[must_use]
    pub const fn new(
        user_repo: UserRepository,
        report_repo: ReportRepository,
        strike_repo: StrikeRepository,
    ) -> Self {
        Self {
            user_repo,
            report_repo,
            strike_repo,
        }
    }

    /// Gather the dashboard counts.
    pub async fn overview(&self) -> AppResult<Stats> {
        let active_troopers = self.user_repo.count_approved_troopers().await?;
        let pending_profiles = self.user_repo.count_pending().await?;
        let pending_reports = self.report_repo.count_pending().await?;
        let total_strikes = self.strike_repo.count_all().await?;

        Ok(Stats {
            active_troopers,
            pending_profiles,
            pending_reports,
            total_strikes,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use maplit::btreemap;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::sync::Arc;

    fn count_row(n: i64) -> Vec<std::collections::BTreeMap<&'static str, Value>> {
        vec![btreemap! { "num_items" => Value::BigInt(Some(n)) }]
    }

    #[tokio::test]
    async fn test_overview_collects_counts() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([count_row(12), count_row(3), count_row(5), count_row(9)])
            .into_connection();

        let db = Arc::new(db);
        let service = StatsService::new(
            UserRepository::new(Arc::clone(&db)),
            ReportRepository::new(Arc::clone(&db)),
            StrikeRepository::new(db),
        );

        let stats = service.overview().await.unwrap();

        assert_eq!(stats.active_troopers, 12);
        assert_eq!(stats.pending_profiles, 3);
        assert_eq!(stats.pending_reports, 5);
        assert_eq!(stats.total_strikes, 9);
    }

    #[test]
    fn test_stats_serializes_camel_case() {
        let stats = Stats {
            active_troopers: 1,
            pending_profiles: 2,
            pending_reports: 3,
            total_strikes: 4,
        };

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["activeTroopers"], 1);
        assert_eq!(json["pendingProfiles"], 2);
        assert_eq!(json["pendingReports"], 3);
        assert_eq!(json["totalStrikes"], 4);
    }
}
