use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestSpeechEntry {
    pub name: String,
    pub last_speech: NaiveDateTime,
}

impl LatestSpeechEntry {
    pub fn last_speech_label(&self) -> String {
        format_speech_timestamp(self.last_speech)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestSpeechSummary {
    pub politicians: usize,
    pub speakers: usize,
    pub entries: Vec<LatestSpeechEntry>,
}

/// Renders a speech timestamp, dropping the time of day when it is midnight.
pub fn format_speech_timestamp(at: NaiveDateTime) -> String {
    if at.time() == NaiveTime::MIN {
        at.format("%Y-%m-%d").to_string()
    } else {
        at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
