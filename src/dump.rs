//! A plain tab-delimited rendition of a computed document, for inspecting what was parsed.

/// The marker row written between sections, as in the input format.
pub const SECTION_DELIMITER: &str = "*";

/// Names of the written columns, in the order their values appear in each row.
pub const COLUMNS: [&str; 17] = [
    "line",
    "sorg",
    "cred_acct",
    "name1",
    "po_number",
    "credit_value",
    "open_del",
    "receivables",
    "special_liab",
    "cred_limit",
    "usage",
    "next_date",
    "open_del_scaled",
    "saldo",
    "cred_limit_scaled",
    "available",
    "owner",
];

#[derive(Debug, serde::Serialize)]
struct Row<'a> {
    line: u64,
    sorg: &'a str,
    cred_acct: &'a str,
    name1: &'a str,
    po_number: &'a str,
    credit_value: &'a str,
    open_del: &'a str,
    receivables: &'a str,
    special_liab: &'a str,
    cred_limit: &'a str,
    usage: &'a str,
    next_date: &'a str,
    open_del_scaled: &'a str,
    saldo: &'a str,
    cred_limit_scaled: &'a str,
    available: &'a str,
    owner: &'a str,
}

pub(crate) mod function {
    use super::{Row, COLUMNS, SECTION_DELIMITER};
    use crate::parse::Document;
    use crate::OwnerDirectory;

    /// Write every record of `document` along with its derived values and owner as one
    /// tab-delimited row to `out`, preceded by a row of [`COLUMNS`], which is written even
    /// if there are no records.
    ///
    /// Sections are separated by a row holding only [`SECTION_DELIMITER`].
    pub fn write_document(
        document: &Document,
        owners: &OwnerDirectory,
        out: impl std::io::Write,
    ) -> Result<(), csv::Error> {
        let mut csv = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(out);

        csv.write_record(COLUMNS)?;
        for (idx, section) in document.sections.iter().enumerate() {
            if idx > 0 {
                csv.write_record([SECTION_DELIMITER])?;
            }
            for record in &section.records {
                let derived = record.derived.as_ref();
                csv.serialize(Row {
                    line: record.line,
                    sorg: &record.sorg,
                    cred_acct: &record.cred_acct,
                    name1: &record.name1,
                    po_number: &record.po_number,
                    credit_value: &record.credit_value,
                    open_del: &record.open_del,
                    receivables: &record.receivables,
                    special_liab: &record.special_liab,
                    cred_limit: &record.cred_limit,
                    usage: &record.usage,
                    next_date: &record.next_date,
                    open_del_scaled: derived.map_or("", |d| d.open_del_scaled.as_str()),
                    saldo: derived.map_or("", |d| d.saldo.as_str()),
                    cred_limit_scaled: derived.map_or("", |d| d.cred_limit_scaled.as_str()),
                    available: derived.map_or("", |d| d.available.as_str()),
                    owner: owners.owner(&record.cred_acct),
                })?;
            }
        }
        csv.flush()?;
        Ok(())
    }
}
