use serde::{Deserialize, Serialize};

use crate::algorithms::DailyCount;
use crate::models::{ActivityKind, UserPda};

// =========================================================
// Daily activity types
// =========================================================

/// Activity count of one UTC calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStat {
    /// `YYYY-MM-DD`
    pub day: String,
    pub count: u64,
}

impl From<DailyCount> for DailyStat {
    fn from(c: DailyCount) -> Self {
        Self {
            day: c.day.format("%Y-%m-%d").to_string(),
            count: c.count,
        }
    }
}

/// Daily activity of one user over the trailing window, newest day first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStatsData {
    pub user_pda: UserPda,
    pub kind: ActivityKind,
    pub days: Vec<DailyStat>,
}

impl DailyStatsData {
    pub fn total(&self) -> u64 {
        self.days.iter().map(|d| d.count).sum()
    }
}
