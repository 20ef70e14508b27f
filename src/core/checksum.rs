//! Check digit algorithms.
//!
//! Both algorithms walk the digit string right to left and apply a
//! repeating weight pattern:
//!
//! | Algorithm | Weights | Check digit |
//! |-----------|---------|-------------|
//! | [`ChecksumAlgorithm::Mod10Weighted`] | 2, 1, 2, 1, ... | `10 - (sum mod 10)` |
//! | [`ChecksumAlgorithm::Cyclic137`] | 1, 3, 7, 1, 3, 7, ... | `(sum mod 9) + 1` |
//!
//! The mod-10 variant multiplies whole digits and never folds a doubled
//! value back into a single digit, so it is not classic Luhn.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::BarcodeError;

const MOD10_WEIGHTS: [u32; 2] = [2, 1];
const CYCLIC_WEIGHTS: [u32; 3] = [1, 3, 7];

/// Check digit algorithm, chosen by the caller per code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChecksumAlgorithm {
    /// Weights 2-1 from the right, `10 - (sum mod 10)`.
    #[default]
    #[serde(rename = "mod10")]
    Mod10Weighted,
    /// Weights 1-3-7 from the right, `(sum mod 9) + 1`.
    #[serde(rename = "137")]
    Cyclic137,
}

/// What to do when [`ChecksumAlgorithm::Mod10Weighted`] yields 10.
///
/// `10 - (sum mod 10)` is 10 whenever the weighted sum is a multiple of
/// ten, which is not a single digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckDigitBoundary {
    /// Use `0` as the check digit.
    #[default]
    Wrap,
    /// Fail with [`BarcodeError::ChecksumRange`].
    Reject,
}

impl ChecksumAlgorithm {
    /// Short name used in the CLI and in serialized output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Mod10Weighted => "mod10",
            Self::Cyclic137 => "137",
        }
    }

    /// Unreduced checksum value. May be 10 for `Mod10Weighted`.
    pub fn raw_value(&self, digits: &str) -> Result<u32, BarcodeError> {
        let values = parse_digits(digits)?;
        Ok(match self {
            Self::Mod10Weighted => 10 - weighted_sum(&values, &MOD10_WEIGHTS) % 10,
            Self::Cyclic137 => weighted_sum(&values, &CYCLIC_WEIGHTS) % 9 + 1,
        })
    }

    /// Single check digit for `digits`, resolving the mod-10 boundary.
    pub fn check_digit(
        &self,
        digits: &str,
        boundary: CheckDigitBoundary,
    ) -> Result<u8, BarcodeError> {
        let raw = self.raw_value(digits)?;
        if raw <= 9 {
            return Ok(raw as u8);
        }
        match boundary {
            CheckDigitBoundary::Wrap => {
                tracing::warn!(
                    algorithm = self.code(),
                    raw,
                    "checksum produced {raw}, using check digit 0"
                );
                Ok(0)
            }
            CheckDigitBoundary::Reject => Err(BarcodeError::ChecksumRange { value: raw }),
        }
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ChecksumAlgorithm {
    type Err = BarcodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mod10" | "base10" | "mod10-weighted" => Ok(Self::Mod10Weighted),
            "137" | "1-3-7" | "cyclic137" => Ok(Self::Cyclic137),
            other => Err(BarcodeError::Configuration(format!(
                "unknown checksum algorithm '{other}', expected 'mod10' or '137'"
            ))),
        }
    }
}

/// Check the trailing digit of a complete code.
///
/// Returns `false` for anything that is not at least two ASCII digits.
pub fn verify(code: &str, algorithm: ChecksumAlgorithm, boundary: CheckDigitBoundary) -> bool {
    if code.len() < 2 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let (body, check) = code.split_at(code.len() - 1);
    let expected = check.as_bytes()[0] - b'0';
    matches!(algorithm.check_digit(body, boundary), Ok(d) if d == expected)
}

fn parse_digits(digits: &str) -> Result<Vec<u32>, BarcodeError> {
    if digits.is_empty() {
        return Err(BarcodeError::InvalidDigits("empty digit string".into()));
    }
    digits
        .chars()
        .map(|c| {
            c.to_digit(10).ok_or_else(|| {
                BarcodeError::InvalidDigits(format!("'{c}' is not a decimal digit in '{digits}'"))
            })
        })
        .collect()
}

fn weighted_sum(values: &[u32], weights: &[u32]) -> u32 {
    values
        .iter()
        .rev()
        .zip(weights.iter().cycle())
        .map(|(digit, weight)| digit * weight)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mod10_known_values() {
        let a = ChecksumAlgorithm::Mod10Weighted;
        assert_eq!(a.check_digit("1", CheckDigitBoundary::Wrap).unwrap(), 8);
        assert_eq!(a.check_digit("55", CheckDigitBoundary::Wrap).unwrap(), 5);
        assert_eq!(a.check_digit("79927398713", CheckDigitBoundary::Wrap).unwrap(), 3);
        assert_eq!(a.check_digit("1234567890", CheckDigitBoundary::Wrap).unwrap(), 5);
    }

    #[test]
    fn mod10_is_not_luhn() {
        // Luhn folds 9*2=18 into 1+8; this variant keeps 18.
        // Reversed "9" weighted by 2 gives 18, 10 - 8 = 2.
        assert_eq!(
            ChecksumAlgorithm::Mod10Weighted.check_digit("9", CheckDigitBoundary::Wrap).unwrap(),
            2
        );
    }

    #[test]
    fn mod10_boundary_wraps_to_zero() {
        let a = ChecksumAlgorithm::Mod10Weighted;
        // 5*2 = 10, 10 mod 10 = 0, 10 - 0 = 10
        assert_eq!(a.raw_value("5").unwrap(), 10);
        assert_eq!(a.raw_value("123").unwrap(), 10);
        assert_eq!(a.check_digit("5", CheckDigitBoundary::Wrap).unwrap(), 0);
        assert_eq!(a.check_digit("0000", CheckDigitBoundary::Wrap).unwrap(), 0);
    }

    #[test]
    fn mod10_boundary_rejected() {
        let a = ChecksumAlgorithm::Mod10Weighted;
        assert!(matches!(
            a.check_digit("123", CheckDigitBoundary::Reject),
            Err(BarcodeError::ChecksumRange { value: 10 })
        ));
        assert_eq!(a.check_digit("55", CheckDigitBoundary::Reject).unwrap(), 5);
    }

    #[test]
    fn cyclic137_known_values() {
        let a = ChecksumAlgorithm::Cyclic137;
        assert_eq!(a.check_digit("1", CheckDigitBoundary::Reject).unwrap(), 2);
        assert_eq!(a.check_digit("123", CheckDigitBoundary::Reject).unwrap(), 8);
        assert_eq!(a.check_digit("55", CheckDigitBoundary::Reject).unwrap(), 3);
        assert_eq!(a.check_digit("79927398713", CheckDigitBoundary::Reject).unwrap(), 2);
    }

    #[test]
    fn cyclic137_all_zero_is_one() {
        assert_eq!(
            ChecksumAlgorithm::Cyclic137.check_digit("0000", CheckDigitBoundary::Reject).unwrap(),
            1
        );
    }

    #[test]
    fn rejects_non_digits() {
        for input in ["", "12a4", "１２", "1 2", "-1"] {
            assert!(
                matches!(
                    ChecksumAlgorithm::Cyclic137.raw_value(input),
                    Err(BarcodeError::InvalidDigits(_))
                ),
                "accepted {input:?}"
            );
        }
    }

    #[test]
    fn verify_complete_codes() {
        let m = ChecksumAlgorithm::Mod10Weighted;
        let c = ChecksumAlgorithm::Cyclic137;
        assert!(verify("799273987133", m, CheckDigitBoundary::Wrap));
        assert!(!verify("799273987134", m, CheckDigitBoundary::Wrap));
        assert!(verify("799273987132", c, CheckDigitBoundary::Wrap));
        assert!(verify("50", m, CheckDigitBoundary::Wrap));
        assert!(!verify("50", m, CheckDigitBoundary::Reject));
        assert!(!verify("5", m, CheckDigitBoundary::Wrap));
        assert!(!verify("5x0", m, CheckDigitBoundary::Wrap));
    }

    #[test]
    fn algorithm_names() {
        assert_eq!("mod10".parse::<ChecksumAlgorithm>().unwrap(), ChecksumAlgorithm::Mod10Weighted);
        assert_eq!("137".parse::<ChecksumAlgorithm>().unwrap(), ChecksumAlgorithm::Cyclic137);
        assert_eq!(" 1-3-7 ".parse::<ChecksumAlgorithm>().unwrap(), ChecksumAlgorithm::Cyclic137);
        assert!("luhn".parse::<ChecksumAlgorithm>().is_err());
        assert_eq!(ChecksumAlgorithm::Cyclic137.to_string(), "137");
        assert_eq!(ChecksumAlgorithm::default(), ChecksumAlgorithm::Mod10Weighted);
    }
}
