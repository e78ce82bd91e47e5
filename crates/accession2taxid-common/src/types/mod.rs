//! Record and format types shared by the reader, the sinks and the CLI

use crate::error::{Accession2TaxidError, Result};
use serde::{Deserialize, Serialize};

/// One parsed line of an accession2taxid file
///
/// `accession_version` and `gi` are only present in the extended format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessionRecord {
    pub accession: String,
    pub accession_version: Option<String>,
    pub taxid: String,
    pub gi: Option<String>,
}

impl AccessionRecord {
    /// Create a legacy record (accession and taxid only)
    pub fn new(accession: impl Into<String>, taxid: impl Into<String>) -> Self {
        Self {
            accession: accession.into(),
            accession_version: None,
            taxid: taxid.into(),
            gi: None,
        }
    }

    /// Create an extended record
    pub fn extended(
        accession: impl Into<String>,
        accession_version: impl Into<String>,
        taxid: impl Into<String>,
        gi: impl Into<String>,
    ) -> Self {
        Self {
            accession: accession.into(),
            accession_version: Some(accession_version.into()),
            taxid: taxid.into(),
            gi: Some(gi.into()),
        }
    }
}

/// Column layout of an accession2taxid file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordFormat {
    /// `accession<TAB>taxid`
    Legacy,
    /// `accession<TAB>accession.version<TAB>taxid<TAB>gi`
    Extended,
}

impl RecordFormat {
    /// Number of tab-separated fields per line
    pub fn arity(self) -> usize {
        match self {
            RecordFormat::Legacy => 2,
            RecordFormat::Extended => 4,
        }
    }

    /// Header line NCBI ships with files of this layout
    pub fn header(self) -> &'static str {
        match self {
            RecordFormat::Legacy => "accession\ttaxid",
            RecordFormat::Extended => "accession\taccession.version\ttaxid\tgi",
        }
    }

    /// Infer the layout from the number of columns in a header line
    pub fn from_header(header: &str) -> Result<Self> {
        match header.split('\t').count() {
            2 => Ok(RecordFormat::Legacy),
            4 => Ok(RecordFormat::Extended),
            n => Err(Accession2TaxidError::UnknownHeader(n)),
        }
    }

    /// Parse one stripped line into a record
    ///
    /// `line_number` is the 1-based physical line in the input and is only
    /// used for error reporting.
    pub fn parse_line(self, line: &str, line_number: u64) -> Result<AccessionRecord> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != self.arity() {
            return Err(Accession2TaxidError::format(
                line_number,
                self.arity(),
                fields.len(),
            ));
        }

        Ok(match self {
            RecordFormat::Legacy => AccessionRecord::new(fields[0], fields[1]),
            RecordFormat::Extended => {
                AccessionRecord::extended(fields[0], fields[1], fields[2], fields[3])
            },
        })
    }
}

impl std::str::FromStr for RecordFormat {
    type Err = Accession2TaxidError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" => Ok(RecordFormat::Legacy),
            "extended" => Ok(RecordFormat::Extended),
            _ => Err(Accession2TaxidError::config(format!(
                "Invalid record format: {}",
                s
            ))),
        }
    }
}

impl std::fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordFormat::Legacy => write!(f, "legacy"),
            RecordFormat::Extended => write!(f, "extended"),
        }
    }
}

/// How the active [`RecordFormat`] is chosen for an import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatSelection {
    /// Decide from the header's column count
    #[default]
    Auto,
    Legacy,
    Extended,
}

impl FormatSelection {
    /// Resolve against the header line of the input (`None` for an empty input)
    ///
    /// An empty input under `Auto` resolves to legacy; it has no data lines
    /// so the choice is unobservable.
    pub fn resolve(self, header: Option<&str>) -> Result<RecordFormat> {
        match self {
            FormatSelection::Legacy => Ok(RecordFormat::Legacy),
            FormatSelection::Extended => Ok(RecordFormat::Extended),
            FormatSelection::Auto => match header {
                Some(header) => RecordFormat::from_header(header),
                None => Ok(RecordFormat::Legacy),
            },
        }
    }
}

impl std::str::FromStr for FormatSelection {
    type Err = Accession2TaxidError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(FormatSelection::Auto),
            "legacy" => Ok(FormatSelection::Legacy),
            "extended" => Ok(FormatSelection::Extended),
            _ => Err(Accession2TaxidError::config(format!(
                "Invalid format selection: {} (expected auto, legacy or extended)",
                s
            ))),
        }
    }
}

impl std::fmt::Display for FormatSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatSelection::Auto => write!(f, "auto"),
            FormatSelection::Legacy => write!(f, "legacy"),
            FormatSelection::Extended => write!(f, "extended"),
        }
    }
}
