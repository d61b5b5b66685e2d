use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const TEAM_NAMES: [&str; 5] = [
    "홀리웨이브",
    "엑소더스",
    "프론티어",
    "디사이플",
    "여호수아",
];

pub const CELL_NAMES: [&str; 6] = ["1셀", "2셀", "3셀", "4셀", "5셀", "6셀"];

pub const LEGACY_DEFAULT_CELL: &str = "1셀";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn flipped(self) -> Self {
        match self {
            Self::Present => Self::Absent,
            Self::Absent => Self::Present,
        }
    }

    pub fn mark(self) -> &'static str {
        match self {
            Self::Present => "O",
            Self::Absent => "X",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell: Option<String>,
}

impl Member {
    pub fn team_cell_label(&self) -> String {
        match (self.team.as_deref(), self.cell.as_deref()) {
            (Some(team), Some(cell)) => format!("{team} {cell}"),
            (Some(one), None) | (None, Some(one)) => one.to_string(),
            (None, None) => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub member_id: String,
    pub week: u32,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekInfo {
    pub week: u32,
    pub date: NaiveDate,
    pub month: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberStats {
    pub present: usize,
    pub absent: usize,
    pub total: usize,
    pub rate: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekStats {
    pub present: usize,
    pub absent: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Absentee {
    pub member: Member,
    pub consecutive_absent: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub member_count: usize,
    pub total_present: usize,
    pub total_absent: usize,
    pub overall_rate: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthGroup {
    pub month: u32,
    pub label: String,
    pub weeks: Vec<WeekInfo>,
}

#[derive(Debug, Deserialize)]
pub struct MemberRequest {
    pub name: String,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub cell: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: AttendanceStatus,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub member_id: String,
    pub week: u32,
    pub status: AttendanceStatus,
}

#[derive(Debug, Default, Deserialize)]
pub struct WeeksQuery {
    pub month: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AbsenteeQuery {
    pub current_week: Option<u32>,
    pub threshold: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub member_count: usize,
    pub record_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub members: Vec<Member>,
    pub records: Vec<AttendanceRecord>,
}
