/// The amount of tab-delimited fields a record line must have at least.
pub const FIELD_COUNT: usize = 11;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Record in line {line} has only {count} of 11 fields: {fields:?}")]
    TooFewFields {
        line: u64,
        count: usize,
        fields: Vec<String>,
    },
    #[error("Could not parse {kind} amount '{value}' of record in line {line}")]
    InvalidAmount {
        line: u64,
        kind: &'static str,
        value: String,
        source: rust_decimal::Error,
    },
    #[error("Computing the {kind} of record in line {line} overflowed")]
    Overflow { line: u64, kind: &'static str },
}

/// One credit account line of an export, with its derived values once they were computed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    /// The line in the input file this record was read from, 1-based.
    pub line: u64,
    pub sorg: String,
    pub cred_acct: String,
    pub name1: String,
    pub po_number: String,
    pub credit_value: String,
    pub open_del: String,
    pub receivables: String,
    pub special_liab: String,
    pub cred_limit: String,
    pub usage: String,
    pub next_date: String,
    /// Display values computed from the raw amounts, `None` until computed.
    pub derived: Option<Derived>,
}

/// Formatted values computed from the raw amounts of a [`Record`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Derived {
    pub open_del_scaled: String,
    pub saldo: String,
    pub cred_limit_scaled: String,
    pub available: String,
}

impl Record {
    /// Create a record from the already trimmed `fields` of the input line at `line`.
    /// Fields past the last known one are ignored.
    pub fn from_fields(line: u64, fields: &csv::StringRecord) -> Result<Self, Error> {
        if fields.len() < FIELD_COUNT {
            return Err(Error::TooFewFields {
                line,
                count: fields.len(),
                fields: fields.iter().map(ToOwned::to_owned).collect(),
            });
        }
        let field = |idx: usize| fields[idx].to_owned();
        Ok(Record {
            line,
            sorg: field(0),
            cred_acct: field(1),
            name1: field(2),
            po_number: field(3),
            credit_value: field(4),
            open_del: field(5),
            receivables: field(6),
            special_liab: field(7),
            cred_limit: field(8),
            usage: field(9),
            next_date: field(10),
            derived: None,
        })
    }
}
