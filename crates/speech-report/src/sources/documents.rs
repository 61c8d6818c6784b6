use super::{PoliticianSource, SourceError};
use crate::records::Politician;
use std::io::{BufReader, Read};
use std::path::PathBuf;
use tracing::debug;

/// JSON array of politician documents, as produced by a collection export.
#[derive(Debug, Clone)]
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Politician>, SourceError> {
        let mut politicians: Vec<Politician> = serde_json::from_reader(BufReader::new(reader))?;
        politicians
            .iter_mut()
            .for_each(Politician::ensure_speech_hashes);
        Ok(politicians)
    }
}

impl PoliticianSource for JsonSource {
    fn load(&self) -> Result<Vec<Politician>, SourceError> {
        let file = std::fs::File::open(&self.path)?;
        let politicians = Self::from_reader(file)?;
        debug!(
            path = %self.path.display(),
            records = politicians.len(),
            "loaded politician documents"
        );
        Ok(politicians)
    }
}
