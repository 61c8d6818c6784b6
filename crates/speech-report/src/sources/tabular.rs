use super::{PoliticianSource, SourceError};
use crate::records::names::normalize_name;
use crate::records::{Politician, Speech, SpeechDate};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;

/// Flat CSV export with one speech per row.
///
/// Expected headers are `name` and `date`, with optional `hash` and
/// `raw_text`. Rows are grouped into one politician per normalized name, in
/// the order names first appear.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Politician>, SourceError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut politicians: Vec<Politician> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for row in csv_reader.deserialize::<SpeechRow>() {
            let row = row?;
            let name = normalize_name(&row.name);
            let speech = row.into_speech();

            match positions.get(&name) {
                Some(&index) => politicians[index].speeches.push(speech),
                None => {
                    positions.insert(name.clone(), politicians.len());
                    politicians.push(Politician::new(name, vec![speech]));
                }
            }
        }

        Ok(politicians)
    }
}

impl PoliticianSource for CsvSource {
    fn load(&self) -> Result<Vec<Politician>, SourceError> {
        let file = std::fs::File::open(&self.path)?;
        let politicians = Self::from_reader(file)?;
        debug!(
            path = %self.path.display(),
            records = politicians.len(),
            "loaded politician speech rows"
        );
        Ok(politicians)
    }
}

#[derive(Debug, Deserialize)]
struct SpeechRow {
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    hash: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    raw_text: Option<String>,
}

impl SpeechRow {
    fn into_speech(self) -> Speech {
        let mut speech = Speech {
            date: self.date.map(SpeechDate::Text),
            hash: self.hash,
            raw_text: self.raw_text,
        };
        speech.ensure_hash();
        speech
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::DateIssue;

    #[test]
    fn groups_rows_by_normalized_name_in_first_seen_order() {
        let csv = "name,date,hash\n\
Anna  Nowak,2020-01-01,a1\n\
Tomasz Reczek,2021-06-15,t1\n\
\u{feff}Anna Nowak,2022-03-03,a2\n";

        let politicians = CsvSource::from_reader(csv.as_bytes()).expect("csv parses");
        let names = politicians
            .iter()
            .map(|politician| politician.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, ["Anna Nowak", "Tomasz Reczek"]);
        assert_eq!(politicians[0].speeches.len(), 2);
        assert_eq!(politicians[0].speeches[1].hash.as_deref(), Some("a2"));
    }

    #[test]
    fn optional_columns_may_be_absent() {
        let csv = "name,date\nAnna Nowak,2020-01-01\n";
        let politicians = CsvSource::from_reader(csv.as_bytes()).expect("csv parses");
        let speech = &politicians[0].speeches[0];
        assert!(speech.hash.is_none());
        assert!(speech.raw_text.is_none());
    }

    #[test]
    fn rows_with_text_but_no_hash_get_a_generated_one() {
        let csv = "name,date,raw_text\nAnna Nowak,2021-06-15,Wysoka Izbo\n";
        let politicians = CsvSource::from_reader(csv.as_bytes()).expect("csv parses");
        assert_eq!(
            politicians[0].speeches[0].hash.as_deref(),
            Some("6452018e99802959")
        );
    }

    #[test]
    fn blank_date_cells_become_missing_dates() {
        let csv = "name,date\nAnna Nowak,  \n";
        let politicians = CsvSource::from_reader(csv.as_bytes()).expect("csv parses");
        assert_eq!(politicians[0].speeches[0].timestamp(), Err(DateIssue::Missing));
    }

    #[test]
    fn rows_without_name_column_are_rejected() {
        let csv = "politician,date\nAnna Nowak,2020-01-01\n";
        match CsvSource::from_reader(csv.as_bytes()) {
            Err(SourceError::Csv(_)) => {}
            other => panic!("expected csv error, got {other:?}"),
        }
    }
}
