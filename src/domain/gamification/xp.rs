//! XP amounts and balances.

use serde::Serialize;

use super::calculate_level;
use crate::domain::foundation::ValidationError;

/// A strictly positive XP amount.
///
/// Zero and negative awards are rejected at construction so no code path
/// can reach storage with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct XpAmount(i64);

impl XpAmount {
    pub fn try_new(amount: i64) -> Result<Self, ValidationError> {
        if amount <= 0 {
            return Err(ValidationError::out_of_range("amount", 1, i64::MAX, amount));
        }
        Ok(Self(amount))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// A user's cumulative XP with the level derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct XpBalance {
    pub xp: i64,
    pub level: u32,
}

impl XpBalance {
    /// Balance for a cumulative total; the level is always recomputed.
    pub fn from_xp(xp: i64) -> Self {
        let xp = xp.max(0);
        Self {
            xp,
            level: calculate_level(xp),
        }
    }

    /// Balance after crediting `amount`, saturating at `i64::MAX`.
    pub fn credited(&self, amount: XpAmount) -> Self {
        Self::from_xp(self.xp.saturating_add(amount.value()))
    }
}

impl Default for XpBalance {
    fn default() -> Self {
        Self::from_xp(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_and_negative_amounts_are_rejected() {
        assert!(XpAmount::try_new(0).is_err());
        assert!(XpAmount::try_new(-10).is_err());
        assert_eq!(XpAmount::try_new(1).unwrap().value(), 1);
    }

    #[test]
    fn default_balance_is_level_one() {
        assert_eq!(XpBalance::default(), XpBalance { xp: 0, level: 1 });
    }

    #[test]
    fn crediting_recomputes_level() {
        let balance = XpBalance::from_xp(50).credited(XpAmount::try_new(60).unwrap());
        assert_eq!(balance, XpBalance { xp: 110, level: 2 });
    }

    #[test]
    fn crediting_saturates() {
        let balance = XpBalance::from_xp(i64::MAX - 1).credited(XpAmount::try_new(10).unwrap());
        assert_eq!(balance.xp, i64::MAX);
    }

    proptest! {
        #[test]
        fn two_credits_equal_one_combined_credit(a in 1i64..1_000_000, b in 1i64..1_000_000) {
            let start = XpBalance::default();
            let split = start
                .credited(XpAmount::try_new(a).unwrap())
                .credited(XpAmount::try_new(b).unwrap());
            let combined = start.credited(XpAmount::try_new(a + b).unwrap());
            prop_assert_eq!(split, combined);
        }
    }
}
