use std::fmt;

use crate::domain::error::DomainError;

/// Non-negative monetary amount in whole currency units.
///
/// Construction from untrusted input goes through [`Amount::new`], which
/// rejects negative values; arithmetic never produces a negative result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Validate an externally supplied value.
    pub fn new(raw: i64) -> Result<Amount, DomainError> {
        if raw < 0 {
            return Err(DomainError::negative_amount(raw));
        }
        Ok(Amount(raw as u64))
    }

    /// Trusted constructor for values known to be non-negative.
    pub const fn from_units(units: u64) -> Amount {
        Amount(units)
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    /// Credit: saturates at `u64::MAX` instead of wrapping.
    pub fn add(self, other: Amount) -> Amount {
        Amount(self.0.saturating_add(other.0))
    }

    /// Debit: `None` when `other` exceeds `self`.
    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
