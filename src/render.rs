use crate::Record;

/// The columns taken from each record, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    CredAcct,
    Name1,
    PoNumber,
    CreditValue,
    OpenDel,
    Saldo,
    CredLimit,
    Available,
    Use,
    NextDate,
}

impl Column {
    pub const ALL: [Column; 10] = [
        Column::CredAcct,
        Column::Name1,
        Column::PoNumber,
        Column::CreditValue,
        Column::OpenDel,
        Column::Saldo,
        Column::CredLimit,
        Column::Available,
        Column::Use,
        Column::NextDate,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Column::CredAcct => "Cred. acct",
            Column::Name1 => "Name 1",
            Column::PoNumber => "PO Number",
            Column::CreditValue => "Credit value",
            Column::OpenDel => "Open del",
            Column::Saldo => "Saldo",
            Column::CredLimit => "Cred.limit",
            Column::Available => "Available",
            Column::Use => "Use",
            Column::NextDate => "Next date",
        }
    }

    /// The displayed value of this column in `record`. Derived columns are empty if they
    /// weren't computed.
    pub fn value<'a>(&self, record: &'a Record) -> &'a str {
        let derived = record.derived.as_ref();
        match self {
            Column::CredAcct => &record.cred_acct,
            Column::Name1 => &record.name1,
            Column::PoNumber => &record.po_number,
            Column::CreditValue => &record.credit_value,
            Column::OpenDel => derived.map_or("", |d| d.open_del_scaled.as_str()),
            Column::Saldo => derived.map_or("", |d| d.saldo.as_str()),
            Column::CredLimit => derived.map_or("", |d| d.cred_limit_scaled.as_str()),
            Column::Available => derived.map_or("", |d| d.available.as_str()),
            Column::Use => &record.usage,
            Column::NextDate => &record.next_date,
        }
    }
}

/// Titles of the columns that follow the record columns: two left blank for manual entry,
/// and the account owner.
pub const TRAILING_TITLES: [&str; 3] = ["Status", "Approver", "Accnt owner"];

/// The total amount of columns in the table.
pub const COLUMN_COUNT: usize = Column::ALL.len() + TRAILING_TITLES.len();

/// Escape `value` for use as HTML text or attribute value.
pub fn escape(value: &str) -> std::borrow::Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"']) {
        return value.into();
    }
    let mut out = String::with_capacity(value.len() + 8);
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out.into()
}

pub(crate) mod function {
    use super::{escape, Column, COLUMN_COUNT, TRAILING_TITLES};
    use crate::parse::{Document, Section};
    use crate::OwnerDirectory;
    use std::io::Write;

    const ROW_INDENT: &str = "                    ";
    const CELL_INDENT: &str = "                        ";

    /// Write `document` as standalone HTML table to `out`.
    ///
    /// Within a section, a column whose value is the same in all records becomes one cell
    /// spanning all rows of the section.
    pub fn write_html(
        document: &Document,
        owners: &OwnerDirectory,
        mut out: impl Write,
    ) -> std::io::Result<()> {
        write_header(&mut out)?;
        for section in &document.sections {
            write_section(&mut out, section, owners)?;
            writeln!(
                out,
                r#"{ROW_INDENT}<tr class="space"><td colspan="{COLUMN_COUNT}"></td></tr>"#
            )?;
        }
        write_footer(&mut out)?;
        out.flush()
    }

    fn write_section(
        out: &mut impl Write,
        section: &Section,
        owners: &OwnerDirectory,
    ) -> std::io::Result<()> {
        let rowspan = section.records.len();
        let uniform = Column::ALL.map(|column| section.is_uniform(|r| column.value(r)));
        let uniform_account = uniform[0];

        for (idx, record) in section.records.iter().enumerate() {
            let first_row = idx == 0;
            writeln!(out, "{ROW_INDENT}<tr>")?;
            for (column, same) in Column::ALL.iter().zip(uniform) {
                write_cell(out, first_row, rowspan, same, column.value(record))?;
            }
            // status and approver
            write_cell(out, first_row, rowspan, true, "")?;
            write_cell(out, first_row, rowspan, true, "")?;
            write_cell(
                out,
                first_row,
                rowspan,
                uniform_account,
                owners.owner(&record.cred_acct),
            )?;
            writeln!(out, "{ROW_INDENT}</tr>")?;
        }
        Ok(())
    }

    fn write_cell(
        out: &mut impl Write,
        first_row: bool,
        rowspan: usize,
        same: bool,
        value: &str,
    ) -> std::io::Result<()> {
        let value = escape(value);
        if !same {
            writeln!(out, "{CELL_INDENT}<td>{value}</td>")
        } else if first_row {
            writeln!(out, r#"{CELL_INDENT}<td rowspan="{rowspan}">{value}</td>"#)
        } else {
            Ok(())
        }
    }

    fn write_header(out: &mut impl Write) -> std::io::Result<()> {
        let name = env!("CARGO_PKG_NAME");
        write!(
            out,
            r#"<!DOCTYPE html>
<html lang="en" dir="ltr">
    <head>
        <meta charset="UTF-8">
        <title>{name} report</title>

        <style>
            body {{ font-size: 8pt; font-family: sans-serif; }}
            table {{ border-collapse: collapse; text-align: center; }}
            thead {{ background-color: yellow; }}
            th, td {{ border: 1px solid black; padding: 0 0.5em 0 0.5em; }}
            td:hover {{ background-color: #C0C0FF; }}
            .space {{ height: 1em; }}
            footer {{ margin: 2em 0 1em 0; }}
        </style>
    </head>
    <body>
        <main>
            <table>
                <thead>
                    <tr>
"#
        )?;
        let titles = Column::ALL
            .iter()
            .map(Column::title)
            .chain(TRAILING_TITLES);
        for title in titles {
            writeln!(out, "{CELL_INDENT}<th>{title}</th>")?;
        }
        write!(
            out,
            r#"                    </tr>
                </thead>
                <tbody>
"#
        )
    }

    fn write_footer(out: &mut impl Write) -> std::io::Result<()> {
        write!(
            out,
            r#"                </tbody>
            </table>
        </main>
        <footer>
            The report was formatted using {} version {}.
        </footer>
    </body>
</html>
"#,
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        )
    }
}
