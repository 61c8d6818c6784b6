mod latest;
pub mod views;

pub use latest::{LatestSpeechReporter, LatestSpeeches, ReportError};
pub use views::{format_speech_timestamp, LatestSpeechEntry, LatestSpeechSummary};
