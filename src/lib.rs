#![deny(rust_2018_idioms)]

use rust_decimal::Decimal;

pub mod record;
pub use record::Record;

pub mod parse;
pub use parse::function::parse;

pub mod calculate;
pub use calculate::function::compute;

pub mod owners;
pub use owners::OwnerDirectory;

pub mod render;
pub use render::function::write_html;

pub mod dump;
pub use dump::function::write_document;

pub mod convert;
pub use convert::function::{convert, convert_directory, convert_file};

pub mod counter;

/// The separators used to read raw amounts and to display derived ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberFormat {
    pub thousands_separator: char,
    pub decimal_separator: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat {
            thousands_separator: ',',
            decimal_separator: '.',
        }
    }
}

impl NumberFormat {
    /// Turn `raw` into something `Decimal` can parse by dropping thousands separators and
    /// mapping the decimal separator to `.`.
    pub fn normalize(&self, raw: &str) -> String {
        raw.chars()
            .filter(|c| *c != self.thousands_separator)
            .map(|c| if c == self.decimal_separator { '.' } else { c })
            .collect()
    }
}

/// Format `value` for display, grouping the integer part in thousands and dropping trailing
/// fractional zeros along with a dangling decimal separator.
pub fn format_amount(value: Decimal, format: &NumberFormat) -> String {
    if value.is_zero() {
        return "0".into();
    }
    let digits = value.normalize().abs().to_string();
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, fraction.trim_end_matches('0')),
        None => (digits.as_str(), ""),
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value.is_sign_negative() {
        out.push('-');
    }
    for (idx, digit) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            out.push(format.thousands_separator);
        }
        out.push(digit);
    }
    if !fraction.is_empty() {
        out.push(format.decimal_separator);
        out.push_str(fraction);
    }
    out
}
