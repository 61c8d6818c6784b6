mod documents;
mod tabular;

use crate::records::Politician;
use std::path::{Path, PathBuf};

pub use documents::JsonSource;
pub use tabular::CsvSource;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read politician records: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid politician JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid speech CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("cannot infer record format from '{0}'; expected a .json or .csv file")]
    UnknownFormat(String),
}

/// Anything able to hand over a fully materialized set of politician records.
pub trait PoliticianSource: Send + Sync {
    fn load(&self) -> Result<Vec<Politician>, SourceError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Csv,
}

impl SourceFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::parse)
            .ok_or_else(|| SourceError::UnknownFormat(path.display().to_string()))
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// A politician export on disk in either supported format.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    format: SourceFormat,
}

impl FileSource {
    /// Uses `format` when given, otherwise infers it from the file extension.
    pub fn open<P: Into<PathBuf>>(
        path: P,
        format: Option<SourceFormat>,
    ) -> Result<Self, SourceError> {
        let path = path.into();
        let format = match format {
            Some(format) => format,
            None => SourceFormat::from_path(&path)?,
        };
        Ok(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }
}

impl PoliticianSource for FileSource {
    fn load(&self) -> Result<Vec<Politician>, SourceError> {
        match self.format {
            SourceFormat::Json => JsonSource::new(&self.path).load(),
            SourceFormat::Csv => CsvSource::new(&self.path).load(),
        }
    }
}

/// Records already held in memory, e.g. a request body or a test fixture.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    politicians: Vec<Politician>,
}

impl InMemorySource {
    pub fn new(politicians: Vec<Politician>) -> Self {
        Self { politicians }
    }
}

impl PoliticianSource for InMemorySource {
    fn load(&self) -> Result<Vec<Politician>, SourceError> {
        Ok(self.politicians.clone())
    }
}
