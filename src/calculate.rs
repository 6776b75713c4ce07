use crate::record::{Derived, Error};
use crate::{format_amount, NumberFormat, Record};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Open deliveries and the credit limit are exported in thousands.
pub const SCALE: Decimal = Decimal::ONE_THOUSAND;

/// The derived amounts of a record, before formatting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Amounts {
    pub open_del_scaled: Decimal,
    pub saldo: Decimal,
    pub cred_limit_scaled: Decimal,
    pub available: Decimal,
}

impl Amounts {
    /// Compute the derived amounts from the raw fields of `record`, which are read using `format`.
    ///
    /// `available` is the scaled credit limit minus both the saldo and the scaled open deliveries.
    pub fn from_record(record: &Record, format: &NumberFormat) -> Result<Self, Error> {
        let amount = |kind: &'static str, raw: &str| -> Result<Decimal, Error> {
            Decimal::from_str(&format.normalize(raw)).map_err(|err| Error::InvalidAmount {
                line: record.line,
                kind,
                value: raw.to_owned(),
                source: err,
            })
        };
        let overflow = |kind: &'static str| Error::Overflow {
            line: record.line,
            kind,
        };

        let open_del_scaled = amount("open deliveries", &record.open_del)?
            .checked_mul(SCALE)
            .ok_or_else(|| overflow("open deliveries"))?;
        let cred_limit_scaled = amount("credit limit", &record.cred_limit)?
            .checked_mul(SCALE)
            .ok_or_else(|| overflow("credit limit"))?;
        let saldo = amount("receivables", &record.receivables)?
            .checked_add(amount("special liabilities", &record.special_liab)?)
            .ok_or_else(|| overflow("saldo"))?;
        let available = saldo
            .checked_add(open_del_scaled)
            .and_then(|used| cred_limit_scaled.checked_sub(used))
            .ok_or_else(|| overflow("available credit"))?;

        Ok(Amounts {
            open_del_scaled,
            saldo,
            cred_limit_scaled,
            available,
        })
    }

    pub fn format(&self, format: &NumberFormat) -> Derived {
        Derived {
            open_del_scaled: format_amount(self.open_del_scaled, format),
            saldo: format_amount(self.saldo, format),
            cred_limit_scaled: format_amount(self.cred_limit_scaled, format),
            available: format_amount(self.available, format),
        }
    }
}

pub(crate) mod function {
    use super::Amounts;
    use crate::parse::Document;
    use crate::NumberFormat;

    /// Fill in the derived values of all records in `document`.
    ///
    /// Records whose amounts can't be computed are logged and removed, as are sections
    /// that end up empty because of that. Returns the amount of removed records.
    pub fn compute(document: &mut Document, format: &NumberFormat) -> usize {
        let mut skipped = 0;
        for section in &mut document.sections {
            section.records.retain_mut(|record| {
                match Amounts::from_record(record, format) {
                    Ok(amounts) => {
                        record.derived = Some(amounts.format(format));
                        true
                    }
                    Err(err) => {
                        tracing::warn!("Skipping record: {err}");
                        skipped += 1;
                        false
                    }
                }
            });
        }
        document.retain_non_empty();
        skipped
    }
}
