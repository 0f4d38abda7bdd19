use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Recurring generation settings. Carried with a template and handed to the
/// scheduler collaborator as-is; nothing in the pipeline acts on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportSchedule {
    pub frequency: ScheduleFrequency,
    /// Local time of day, `HH:MM`.
    pub time: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ScheduleFrequency {
    Daily,
    Weekly,
    Monthly,
}
