//! Expiry date and filler computation.

use chrono::{Datelike, Days, NaiveDate};

use super::config::Configuration;
use super::error::BarcodeError;

/// The `YYYYMMDD` expiry date embedded in a code.
///
/// Computed once per code from a single issue date, then shared by the
/// length budget and the code builder so both agree on the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpiryDate(NaiveDate);

impl ExpiryDate {
    /// `issued_on` plus `validity_days` days.
    pub fn from_issue_date(issued_on: NaiveDate, validity_days: u64) -> Result<Self, BarcodeError> {
        let date = issued_on
            .checked_add_days(Days::new(validity_days))
            .filter(|d| (1000..=9999).contains(&d.year()))
            .ok_or_else(|| {
                BarcodeError::Configuration(format!(
                    "validity_days: {validity_days} days after {issued_on} is not a four-digit-year date"
                ))
            })?;
        Ok(Self(date))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Eight-digit `YYYYMMDD` rendering.
    pub fn digits(&self) -> String {
        self.0.format("%Y%m%d").to_string()
    }
}

impl std::fmt::Display for ExpiryDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y%m%d"))
    }
}

impl serde::Serialize for ExpiryDate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.digits())
    }
}

/// Zero digits inserted between the expiry date and the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Filler {
    /// Whether any filler is inserted.
    pub needed: bool,
    /// Number of `'0'` digits.
    pub digits: usize,
}

impl Filler {
    pub fn render(&self) -> String {
        "0".repeat(self.digits)
    }
}

/// Digit accounting for everything that precedes the check digit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthBudget {
    prefix: usize,
    reference: usize,
    expiry: usize,
    amount: usize,
    available: usize,
}

impl LengthBudget {
    pub fn new(config: &Configuration, expiry: &ExpiryDate) -> Self {
        Self {
            prefix: config.prefix().len(),
            reference: config.reference_length,
            expiry: expiry.digits().len(),
            amount: config.amount_width(),
            available: config.length.saturating_sub(1),
        }
    }

    /// Digits claimed by the fixed-width fields. Saturates at `usize::MAX`.
    pub fn used(&self) -> usize {
        [self.reference, self.expiry, self.amount]
            .into_iter()
            .try_fold(self.prefix, usize::checked_add)
            .unwrap_or(usize::MAX)
    }

    /// Digits before the check digit, i.e. `length - 1`.
    pub fn available(&self) -> usize {
        self.available
    }

    /// Filler needed to bring the fields up to `length - 1` digits.
    pub fn filler(&self) -> Filler {
        let used = self.used();
        if used < self.available {
            Filler {
                needed: true,
                digits: self.available - used,
            }
        } else {
            Filler::default()
        }
    }

    /// Fail when the fixed-width fields cannot fit before the check digit.
    ///
    /// An exact fit (`used == length - 1`, no filler) is accepted. Earlier
    /// issuers refused that layout and only built codes with at least one
    /// filler digit.
    pub fn ensure_fits(&self) -> Result<(), BarcodeError> {
        let used = self.used();
        if used > self.available {
            return Err(BarcodeError::Length {
                required: used,
                available: self.available,
                detail: format!(
                    "prefix_identifier {} + reference_length {} + expiry date {} + amount_length/amount_decimal {}",
                    self.prefix, self.reference, self.expiry, self.amount
                ),
            });
        }
        Ok(())
    }
}

/// Filler for `config` given an already computed expiry date.
///
/// Returns `needed: false` with zero digits when the fields already fill
/// or exceed `length - 1`; use [`LengthBudget::ensure_fits`] to tell those
/// two cases apart.
pub fn compute_filler(config: &Configuration, expiry: &ExpiryDate) -> Filler {
    LengthBudget::new(config, expiry).filler()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn config() -> Configuration {
        Configuration {
            length: 20,
            amount_length: 2,
            amount_decimal: 2,
            reference_length: 5,
            prefix_identifier: 1,
            validity_days: 30,
            width: 200,
            height: 50,
        }
    }

    #[test]
    fn expiry_adds_days() {
        let e = ExpiryDate::from_issue_date(date(2024, 1, 15), 30).unwrap();
        assert_eq!(e.digits(), "20240214");
        assert_eq!(e.to_string(), "20240214");
        assert_eq!(e.date(), date(2024, 2, 14));
    }

    #[test]
    fn expiry_crosses_year_and_leap_day() {
        let e = ExpiryDate::from_issue_date(date(2023, 12, 31), 60).unwrap();
        assert_eq!(e.digits(), "20240229");
    }

    #[test]
    fn expiry_zero_days_is_issue_date() {
        let e = ExpiryDate::from_issue_date(date(2024, 6, 1), 0).unwrap();
        assert_eq!(e.digits(), "20240601");
    }

    #[test]
    fn expiry_beyond_year_9999_rejected() {
        assert!(ExpiryDate::from_issue_date(date(9999, 12, 1), 31).is_err());
        assert!(ExpiryDate::from_issue_date(date(2024, 1, 1), u64::MAX).is_err());
    }

    #[test]
    fn one_digit_filler() {
        let expiry = ExpiryDate::from_issue_date(date(2024, 1, 1), 30).unwrap();
        let budget = LengthBudget::new(&config(), &expiry);
        assert_eq!(budget.used(), 18);
        assert_eq!(budget.available(), 19);
        assert_eq!(
            compute_filler(&config(), &expiry),
            Filler {
                needed: true,
                digits: 1
            }
        );
        assert!(budget.ensure_fits().is_ok());
    }

    #[test]
    fn exact_fit_needs_no_filler() {
        let mut c = config();
        c.length = 19;
        let expiry = ExpiryDate::from_issue_date(date(2024, 1, 1), 30).unwrap();
        let budget = LengthBudget::new(&c, &expiry);
        assert_eq!(budget.filler(), Filler::default());
        assert!(budget.ensure_fits().is_ok());
    }

    #[test]
    fn overflow_reports_breakdown() {
        let mut c = config();
        c.length = 15;
        c.prefix_identifier = 123;
        let expiry = ExpiryDate::from_issue_date(date(2024, 1, 1), 30).unwrap();
        let budget = LengthBudget::new(&c, &expiry);
        assert!(!budget.filler().needed);
        match budget.ensure_fits() {
            Err(BarcodeError::Length {
                required,
                available,
                detail,
            }) => {
                assert_eq!(required, 20);
                assert_eq!(available, 14);
                assert!(detail.contains("prefix_identifier 3"));
                assert!(detail.contains("reference_length 5"));
            }
            other => panic!("expected length error, got {other:?}"),
        }
    }

    #[test]
    fn unvalidated_huge_widths_saturate() {
        let mut c = config();
        c.amount_length = usize::MAX;
        let expiry = ExpiryDate::from_issue_date(date(2024, 1, 1), 30).unwrap();
        let budget = LengthBudget::new(&c, &expiry);
        assert_eq!(budget.used(), usize::MAX);
        assert_eq!(budget.filler(), Filler::default());
        assert!(matches!(
            budget.ensure_fits(),
            Err(BarcodeError::Length {
                required: usize::MAX,
                available: 19,
                ..
            })
        ));
    }

    #[test]
    fn filler_render() {
        let f = Filler {
            needed: true,
            digits: 3,
        };
        assert_eq!(f.render(), "000");
        assert_eq!(Filler::default().render(), "");
    }
}
