use crate::Record;

/// The amount of lines at the start of each export that are a fixed header.
pub const HEADER_LINES: usize = 2;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// A run of records between two `*` delimiter lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Section {
    pub records: Vec<Record>,
}

/// All non-empty sections of one input file, in input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    pub sections: Vec<Section>,
}

impl Section {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Return true if `value` yields the same string for every record of this section.
    pub fn is_uniform<'a>(&'a self, value: impl Fn(&'a Record) -> &'a str) -> bool {
        let mut values = self.records.iter().map(value);
        match values.next() {
            Some(first) => values.all(|v| v == first),
            None => true,
        }
    }
}

impl Document {
    /// Add `section` unless it has no records.
    pub fn push_section(&mut self, section: Section) {
        if !section.is_empty() {
            self.sections.push(section);
        }
    }

    /// Drop sections that lost all of their records.
    pub fn retain_non_empty(&mut self) {
        self.sections.retain(|section| !section.is_empty());
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.sections.iter().flat_map(|section| section.records.iter())
    }
}

pub(crate) mod function {
    use super::{Document, Error, Section, HEADER_LINES};
    use crate::Record;

    /// Parse the decoded `text` of an export into its sections.
    ///
    /// Lines with too few fields are logged and skipped.
    pub fn parse(text: &str) -> Result<Document, Error> {
        let mut csv = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(csv::Trim::All)
            .from_reader(skip_lines(text, HEADER_LINES).as_bytes());

        let mut document = Document::default();
        let mut section = Section::default();
        let mut fields = csv::StringRecord::new();
        while csv.read_record(&mut fields)? {
            let line = fields
                .position()
                .map(|pos| pos.line())
                .unwrap_or_default()
                + HEADER_LINES as u64;
            let Some(first) = fields.iter().find(|field| !field.is_empty()) else {
                continue;
            };
            // Fields are trimmed, so the first non-blank one starts the trimmed line.
            if first.starts_with('*') {
                document.push_section(std::mem::take(&mut section));
                continue;
            }
            match Record::from_fields(line, &fields) {
                Ok(record) => section.records.push(record),
                Err(err) => tracing::warn!("Skipping record: {err}"),
            }
        }
        document.push_section(section);
        Ok(document)
    }

    /// Drop the first `count` lines of `text`, where `\r\n`, `\r` and `\n` each end a line.
    fn skip_lines(text: &str, count: usize) -> &str {
        let mut rest = text;
        for _ in 0..count {
            rest = match rest.find(['\r', '\n']) {
                Some(pos) => {
                    let end = &rest[pos..];
                    let terminator = if end.starts_with("\r\n") { 2 } else { 1 };
                    &end[terminator..]
                }
                None => "",
            };
        }
        rest
    }
}
