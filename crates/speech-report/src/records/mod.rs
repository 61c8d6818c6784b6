mod dates;
mod domain;
pub mod names;

pub use dates::{parse_speech_timestamp, DateIssue};
pub use domain::{ExtendedDate, Politician, Speech, SpeechDate};
