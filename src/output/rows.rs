use crate::types::RepositoryName;
use csv::StringRecord;
use std::io;
use thiserror::Error;

/// Discriminant of secret rows.
pub const SECRET_TAG: &str = "SECRET";

/// Discriminant of variable rows.
pub const VARIABLE_TAG: &str = "VARIABLE";

/// One line of the audit output.
///
/// The first column is the discriminant; secret rows have four columns and
/// variable rows five.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputRow {
    /// A secret configured on an environment.
    Secret {
        /// Repository full name.
        repository: RepositoryName,
        /// Environment name.
        environment: String,
        /// Secret name.
        name: String,
    },
    /// A variable configured on an environment.
    Variable {
        /// Repository full name.
        repository: RepositoryName,
        /// Environment name.
        environment: String,
        /// Variable name.
        name: String,
        /// Variable value.
        value: String,
    },
}

impl OutputRow {
    /// Creates a secret row.
    pub fn secret(
        repository: &RepositoryName,
        environment: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self::Secret {
            repository: repository.clone(),
            environment: environment.into(),
            name: name.into(),
        }
    }

    /// Creates a variable row.
    pub fn variable(
        repository: &RepositoryName,
        environment: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::Variable {
            repository: repository.clone(),
            environment: environment.into(),
            name: name.into(),
            value: value.into(),
        }
    }

    /// The discriminant written in the first column.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Secret { .. } => SECRET_TAG,
            Self::Variable { .. } => VARIABLE_TAG,
        }
    }

    /// Fields of this row in column order.
    pub fn fields(&self) -> Vec<&str> {
        match self {
            Self::Secret {
                repository,
                environment,
                name,
            } => vec![self.tag(), repository.as_str(), environment.as_str(), name.as_str()],
            Self::Variable {
                repository,
                environment,
                name,
                value,
            } => vec![
                self.tag(),
                repository.as_str(),
                environment.as_str(),
                name.as_str(),
                value.as_str(),
            ],
        }
    }

    /// Parses a record back into its tagged shape.
    pub fn from_record(record: &StringRecord) -> Result<Self, RowParseError> {
        let tag = record.get(0).ok_or(RowParseError::Empty)?;
        let expected = match tag {
            SECRET_TAG => 4,
            VARIABLE_TAG => 5,
            other => return Err(RowParseError::UnknownTag(other.to_string())),
        };
        if record.len() != expected {
            return Err(RowParseError::FieldCount {
                tag: tag.to_string(),
                expected,
                found: record.len(),
            });
        }

        let field = |i: usize| record.get(i).unwrap_or_default().to_string();
        let repository = RepositoryName::new(field(1));
        Ok(if expected == 4 {
            Self::Secret {
                repository,
                environment: field(2),
                name: field(3),
            }
        } else {
            Self::Variable {
                repository,
                environment: field(2),
                name: field(3),
                value: field(4),
            }
        })
    }
}

/// Failure to read a row back from audit output.
#[derive(Error, Debug)]
pub enum RowParseError {
    /// The record had no fields.
    #[error("empty record")]
    Empty,
    /// The first column is neither `SECRET` nor `VARIABLE`.
    #[error("unknown row tag {0:?}")]
    UnknownTag(String),
    /// The record has the wrong number of columns for its tag.
    #[error("{tag} row has {found} fields, expected {expected}")]
    FieldCount {
        /// Row tag.
        tag: String,
        /// Columns required by the tag.
        expected: usize,
        /// Columns present.
        found: usize,
    },
    /// The input is not valid CSV.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Reads every row of a headerless audit CSV.
pub fn read_rows<R: io::Read>(reader: R) -> Result<Vec<OutputRow>, RowParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    reader
        .records()
        .map(|record| OutputRow::from_record(&record?))
        .collect()
}
