use serde::{Deserialize, Serialize};

pub const DEFAULT_YEARLY_GOAL: u64 = 20_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub date: String,
    pub count: u64,
}

impl Entry {
    pub fn new(date: impl Into<String>, count: u64) -> Self {
        Self {
            date: date.into(),
            count,
        }
    }
}

/// Everything that gets persisted. Field names stay camelCase so existing
/// blobs keep loading; reading goes through `storage::decode_snapshot`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub yearly_goal: u64,
    pub entries: Vec<Entry>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            yearly_goal: DEFAULT_YEARLY_GOAL,
            entries: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DeltaRequest {
    pub delta: i64,
}

#[derive(Debug, Deserialize)]
pub struct BacklogRequest {
    #[serde(default)]
    pub date: Option<String>,
    pub amount: i64,
}

#[derive(Debug, Deserialize)]
pub struct GoalRequest {
    pub yearly_goal: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DayCountResponse {
    pub date: String,
    pub count: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub date: String,
    pub removed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentEntry {
    pub date: String,
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Empty,
    Low,
    Medium,
    High,
    Max,
}

impl Bucket {
    pub fn for_count(count: u64) -> Self {
        match count {
            0 => Self::Empty,
            1..=24 => Self::Low,
            25..=49 => Self::Medium,
            50..=74 => Self::High,
            _ => Self::Max,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Max => "max",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub day: u32,
    pub date: String,
    pub count: u64,
    pub bucket: Bucket,
    pub is_today: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    pub label: String,
    /// `None` cells pad the first week up to the weekday of the 1st.
    pub days: Vec<Option<CalendarDay>>,
    pub monthly_total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub year: i32,
    pub today: String,
    pub today_count: u64,
    pub yearly_goal: u64,
    pub total_this_year: u64,
    pub progress_percent: f64,
    pub expected_by_now: u64,
    pub expected_percent: f64,
    pub on_track: bool,
    pub behind_by: u64,
    pub daily_average: u64,
    pub active_days: usize,
    pub streak: u32,
    pub day_of_year: u32,
    pub days_in_year: u32,
    pub days_remaining: u32,
    pub needed_per_day: i64,
}
