use super::views::{LatestSpeechEntry, LatestSpeechSummary};
use crate::records::{DateIssue, Politician};
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    #[error("invalid record #{record} ({politician}), speech #{speech}: {reason}")]
    InvalidRecord {
        record: usize,
        politician: String,
        speech: usize,
        reason: DateIssue,
    },
}

/// Most recent speech timestamp per politician name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatestSpeeches {
    latest: BTreeMap<String, NaiveDateTime>,
}

impl LatestSpeeches {
    pub fn get(&self, name: &str) -> Option<NaiveDateTime> {
        self.latest.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.latest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }

    /// Iterates entries ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, NaiveDateTime)> + '_ {
        self.latest.iter().map(|(name, at)| (name.as_str(), *at))
    }

    pub fn into_map(self) -> BTreeMap<String, NaiveDateTime> {
        self.latest
    }

    pub fn entries(&self) -> Vec<LatestSpeechEntry> {
        self.iter()
            .map(|(name, last_speech)| LatestSpeechEntry {
                name: name.to_string(),
                last_speech,
            })
            .collect()
    }

    /// Entries ordered by date, newest first; equal dates fall back to name order.
    pub fn most_recent_first(&self) -> Vec<LatestSpeechEntry> {
        let mut entries = self.entries();
        entries.sort_by(|a, b| {
            b.last_speech
                .cmp(&a.last_speech)
                .then_with(|| a.name.cmp(&b.name))
        });
        entries
    }

    pub fn summary(&self, politicians: usize) -> LatestSpeechSummary {
        LatestSpeechSummary {
            politicians,
            speakers: self.len(),
            entries: self.entries(),
        }
    }

    fn record(&mut self, name: &str, at: NaiveDateTime) {
        match self.latest.get_mut(name) {
            Some(current) => {
                if at > *current {
                    *current = at;
                }
            }
            None => {
                self.latest.insert(name.to_string(), at);
            }
        }
    }
}

pub struct LatestSpeechReporter;

impl LatestSpeechReporter {
    /// Folds every speech into a per-name maximum.
    ///
    /// Records sharing a name are merged. Politicians without speeches do not
    /// appear in the result. The first speech whose date is missing or not
    /// comparable aborts the whole computation.
    pub fn compute_latest_speeches(
        politicians: &[Politician],
    ) -> Result<LatestSpeeches, ReportError> {
        let mut latest = LatestSpeeches::default();

        for (record, politician) in politicians.iter().enumerate() {
            for (speech, entry) in politician.speeches.iter().enumerate() {
                let at = entry
                    .timestamp()
                    .map_err(|reason| ReportError::InvalidRecord {
                        record,
                        politician: politician.name.clone(),
                        speech,
                        reason,
                    })?;
                latest.record(&politician.name, at);
            }
        }

        debug!(
            records = politicians.len(),
            speakers = latest.len(),
            "computed latest speech per politician"
        );

        Ok(latest)
    }
}
