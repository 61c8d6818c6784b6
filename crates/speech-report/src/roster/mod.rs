use crate::records::names::swap_name_with_surname;
use crate::records::{Politician, Speech};
use serde::Serialize;
use tracing::warn;

/// Lookup failures against a politician snapshot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("politician {0} not found")]
    NoPoliticianFound(String),
    #[error("there is no speech with hash {0}")]
    SpeechNotFound(String),
}

/// Flattened view of one speech and its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeechListing {
    pub speech_hash: Option<String>,
    pub name: String,
    pub speech: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct SpeechMatch<'a> {
    pub politician: &'a Politician,
    pub speech: &'a Speech,
}

/// Read-only lookups over a materialized set of politician records.
#[derive(Debug, Clone, Copy)]
pub struct Roster<'a> {
    politicians: &'a [Politician],
}

impl<'a> Roster<'a> {
    pub fn new(politicians: &'a [Politician]) -> Self {
        Self { politicians }
    }

    pub fn len(&self) -> usize {
        self.politicians.len()
    }

    pub fn is_empty(&self) -> bool {
        self.politicians.is_empty()
    }

    /// Returns the first politician with exactly `name`.
    ///
    /// When nothing matches and `try_swapped` is set, the lookup is retried
    /// once with surname and given names swapped.
    pub fn find_by_name(
        &self,
        name: &str,
        try_swapped: bool,
    ) -> Result<&'a Politician, RosterError> {
        let mut matches = self
            .politicians
            .iter()
            .filter(|politician| politician.name == name);

        match matches.next() {
            Some(first) => {
                let others = matches.count();
                if others > 0 {
                    warn!(
                        politician = name,
                        occurrences = others + 1,
                        "politician name appears more than once in the roster"
                    );
                }
                Ok(first)
            }
            None if try_swapped => self
                .find_by_name(&swap_name_with_surname(name), false)
                .map_err(|_| RosterError::NoPoliticianFound(name.to_string())),
            None => Err(RosterError::NoPoliticianFound(name.to_string())),
        }
    }

    pub fn speech_by_hash(&self, hash: &str) -> Result<SpeechMatch<'a>, RosterError> {
        self.politicians
            .iter()
            .flat_map(|politician| {
                politician
                    .speeches
                    .iter()
                    .map(move |speech| SpeechMatch { politician, speech })
            })
            .find(|found| found.speech.hash.as_deref() == Some(hash))
            .ok_or_else(|| RosterError::SpeechNotFound(hash.to_string()))
    }

    /// Lists every speech, optionally only those of politicians named `politician`.
    pub fn speeches(&self, politician: Option<&str>) -> Vec<SpeechListing> {
        self.politicians
            .iter()
            .filter(|record| politician.map_or(true, |name| record.name == name))
            .flat_map(|record| {
                record.speeches.iter().map(move |speech| SpeechListing {
                    speech_hash: speech.hash.clone(),
                    name: record.name.clone(),
                    speech: speech.raw_text.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster_fixture() -> Vec<Politician> {
        vec![
            Politician::new(
                "Tomasz Reczek",
                vec![
                    Speech::dated("2020-01-01")
                        .with_hash("a1")
                        .with_text("Panie Marszałku"),
                    Speech::dated("2021-06-15").with_hash("a2"),
                ],
            )
            .with_hash("p1"),
            Politician::new("Anna Nowak", vec![Speech::dated("2022-03-03").with_hash("b1")])
                .with_hash("p2"),
            Politician::new("Anna Nowak", Vec::new()).with_hash("p3"),
        ]
    }

    #[test]
    fn find_by_name_falls_back_to_swapped_order() {
        let politicians = roster_fixture();
        let roster = Roster::new(&politicians);

        let found = roster
            .find_by_name("Reczek Tomasz", true)
            .expect("swapped lookup succeeds");
        assert_eq!(found.hash.as_deref(), Some("p1"));

        assert_eq!(
            roster.find_by_name("Reczek Tomasz", false),
            Err(RosterError::NoPoliticianFound("Reczek Tomasz".to_string()))
        );
    }

    #[test]
    fn duplicated_names_return_first_record() {
        let politicians = roster_fixture();
        let roster = Roster::new(&politicians);
        let found = roster.find_by_name("Anna Nowak", true).expect("found");
        assert_eq!(found.hash.as_deref(), Some("p2"));
    }

    #[test]
    fn speech_by_hash_reports_owner() {
        let politicians = roster_fixture();
        let roster = Roster::new(&politicians);

        let found = roster.speech_by_hash("a2").expect("speech present");
        assert_eq!(found.politician.name, "Tomasz Reczek");
        assert_eq!(found.speech.hash.as_deref(), Some("a2"));

        assert_eq!(
            roster.speech_by_hash("zz").map(|found| found.speech.clone()),
            Err(RosterError::SpeechNotFound("zz".to_string()))
        );
    }

    #[test]
    fn speeches_flatten_and_filter_by_name() {
        let politicians = roster_fixture();
        let roster = Roster::new(&politicians);

        assert_eq!(roster.speeches(None).len(), 3);

        let listing = roster.speeches(Some("Tomasz Reczek"));
        assert_eq!(listing.len(), 2);
        assert_eq!(
            listing[0],
            SpeechListing {
                speech_hash: Some("a1".to_string()),
                name: "Tomasz Reczek".to_string(),
                speech: Some("Panie Marszałku".to_string()),
            }
        );
        assert!(roster.speeches(Some("Nobody")).is_empty());
    }
}
