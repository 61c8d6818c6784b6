pub mod config;
pub mod error;
pub mod records;
pub mod report;
pub mod roster;
pub mod sources;
pub mod telemetry;

pub use records::{Politician, Speech, SpeechDate};
pub use report::{LatestSpeechReporter, LatestSpeeches, ReportError};
