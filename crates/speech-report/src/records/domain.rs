use super::dates::{self, DateIssue};
use blake2::digest::consts::U8;
use blake2::{Blake2b, Digest};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

type Blake2b64 = Blake2b<U8>;

/// A politician document with its embedded speeches.
///
/// `name` is the grouping key for reports and is not guaranteed to be unique
/// across an export. Fields the reporter does not use are ignored when
/// deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Politician {
    pub name: String,
    #[serde(default)]
    pub speeches: Vec<Speech>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub political_group: Option<String>,
}

impl Politician {
    pub fn new(name: impl Into<String>, speeches: Vec<Speech>) -> Self {
        Self {
            name: name.into(),
            speeches,
            hash: None,
            political_group: None,
        }
    }

    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    pub fn ensure_speech_hashes(&mut self) {
        self.speeches.iter_mut().for_each(Speech::ensure_hash);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Speech {
    #[serde(default)]
    pub date: Option<SpeechDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
}

impl Speech {
    pub fn dated(date: impl Into<String>) -> Self {
        Self {
            date: Some(SpeechDate::Text(date.into())),
            hash: None,
            raw_text: None,
        }
    }

    pub fn undated() -> Self {
        Self {
            date: None,
            hash: None,
            raw_text: None,
        }
    }

    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    pub fn with_text(mut self, raw_text: impl Into<String>) -> Self {
        self.raw_text = Some(raw_text.into());
        self
    }

    /// Stable identifier derived from the speech text: an 8-byte BLAKE2b
    /// digest, hex encoded. `None` when the speech carries no text.
    pub fn generate_id(&self) -> Option<String> {
        self.raw_text
            .as_deref()
            .map(|text| hex::encode(Blake2b64::digest(text.as_bytes())))
    }

    /// Fills in `hash` from the text when the source did not provide one.
    pub fn ensure_hash(&mut self) {
        if self.hash.is_none() {
            self.hash = self.generate_id();
        }
    }

    /// Resolves the stored date into a comparable UTC timestamp.
    pub fn timestamp(&self) -> Result<NaiveDateTime, DateIssue> {
        self.date.as_ref().ok_or(DateIssue::Missing)?.resolve()
    }
}

/// Speech date exactly as it appeared in the source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpeechDate {
    Text(String),
    Extended {
        #[serde(rename = "$date")]
        date: ExtendedDate,
    },
    Other(serde_json::Value),
}

impl SpeechDate {
    pub fn resolve(&self) -> Result<NaiveDateTime, DateIssue> {
        match self {
            SpeechDate::Text(value) => dates::resolve_text(value),
            SpeechDate::Extended { date } => date.resolve(),
            SpeechDate::Other(value) => Err(DateIssue::Unparseable(value.to_string())),
        }
    }
}

/// Payload of a document-store `{"$date": ...}` value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtendedDate {
    Text(String),
    Millis(i64),
    NumberLong {
        #[serde(rename = "$numberLong")]
        millis: String,
    },
}

impl ExtendedDate {
    fn resolve(&self) -> Result<NaiveDateTime, DateIssue> {
        match self {
            ExtendedDate::Text(value) => dates::resolve_text(value),
            ExtendedDate::Millis(millis) => dates::resolve_millis(*millis),
            ExtendedDate::NumberLong { millis } => millis
                .trim()
                .parse::<i64>()
                .map_err(|_| DateIssue::Unparseable(millis.clone()))
                .and_then(dates::resolve_millis),
        }
    }
}
