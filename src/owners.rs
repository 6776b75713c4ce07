use std::collections::HashMap;
use std::path::Path;

/// The owner reported for accounts without an entry.
pub const UNKNOWN_OWNER: &str = "UNKNOWN";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Could not read account owners from '{}'", path.display())]
    Open {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Maps account numbers to the names of their owners.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OwnerDirectory {
    owners: HashMap<String, String>,
}

impl OwnerDirectory {
    /// Read a UTF-8 file with one tab-delimited account and owner per line.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|err| Error::Open {
            path: path.to_owned(),
            source: err,
        })?;
        Self::from_reader(file)
    }

    /// Read owners from `input`, skipping lines that lack the owner column.
    pub fn from_reader(input: impl std::io::Read) -> Result<Self, Error> {
        let mut csv = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(csv::Trim::All)
            .from_reader(input);

        let mut owners = HashMap::new();
        for record in csv.records() {
            let record = record?;
            match (record.get(0), record.get(1)) {
                (Some(account), Some(owner)) => {
                    owners.insert(account.to_owned(), owner.to_owned());
                }
                _ => tracing::warn!(
                    "Skipping account owner in line {} without owner column: {:?}",
                    record.position().map(|pos| pos.line()).unwrap_or_default(),
                    record.iter().collect::<Vec<_>>()
                ),
            }
        }
        Ok(OwnerDirectory { owners })
    }

    /// Return the owner of `account`, or [`UNKNOWN_OWNER`].
    pub fn owner(&self, account: &str) -> &str {
        self.owners
            .get(account)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_OWNER)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

impl FromIterator<(String, String)> for OwnerDirectory {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        OwnerDirectory {
            owners: iter.into_iter().collect(),
        }
    }
}
