use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fmt;

use crate::error::ConfigError;

/// Money is kept as an exact decimal, never a float.
pub type Amount = Decimal;

/// Highest accepted price for any unit. At this ceiling a charge for the
/// longest representable stay still fits in an `Amount`.
pub const MAX_RATE: Amount = dec!(1000000);

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum RateUnit {
    Hour,
    Day,
    Week,
}

impl RateUnit {
    pub const ALL: [RateUnit; 3] = [RateUnit::Hour, RateUnit::Day, RateUnit::Week];

    pub fn name(self) -> &'static str {
        match self {
            RateUnit::Hour => "hour",
            RateUnit::Day => "day",
            RateUnit::Week => "week",
        }
    }
}

impl fmt::Display for RateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Price per billing unit. Every unit is always present and priced above zero.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct RateTable {
    hour: Amount,
    day: Amount,
    week: Amount,
}

impl RateTable {
    pub fn new(hour: Amount, day: Amount, week: Amount) -> Result<Self, ConfigError> {
        for (unit, price) in [
            (RateUnit::Hour, hour),
            (RateUnit::Day, day),
            (RateUnit::Week, week),
        ] {
            if price <= Decimal::ZERO {
                return Err(ConfigError::NonPositiveRate(unit));
            }
            if price > MAX_RATE {
                return Err(ConfigError::RateTooHigh(unit));
            }
        }
        Ok(RateTable { hour, day, week })
    }

    pub fn get(&self, unit: RateUnit) -> Amount {
        match unit {
            RateUnit::Hour => self.hour,
            RateUnit::Day => self.day,
            RateUnit::Week => self.week,
        }
    }

    /// Units in display order: hour, day, week.
    pub fn iter(&self) -> impl Iterator<Item = (RateUnit, Amount)> + '_ {
        RateUnit::ALL.into_iter().map(|unit| (unit, self.get(unit)))
    }
}

impl Default for RateTable {
    fn default() -> Self {
        RateTable {
            hour: dec!(5.00),
            day: dec!(100.00),
            week: dec!(500.00),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rates() {
        let rates = RateTable::default();
        assert_eq!(rates.get(RateUnit::Hour), dec!(5));
        assert_eq!(rates.get(RateUnit::Day), dec!(100));
        assert_eq!(rates.get(RateUnit::Week), dec!(500));
    }

    #[test]
    fn test_iter_order() {
        let units: Vec<RateUnit> = RateTable::default().iter().map(|(u, _)| u).collect();
        assert_eq!(units, vec![RateUnit::Hour, RateUnit::Day, RateUnit::Week]);
    }

    #[test]
    fn test_rejects_non_positive_rates() {
        assert_eq!(
            RateTable::new(dec!(0), dec!(1), dec!(1)),
            Err(ConfigError::NonPositiveRate(RateUnit::Hour))
        );
        assert_eq!(
            RateTable::new(dec!(1), dec!(1), dec!(-3.5)),
            Err(ConfigError::NonPositiveRate(RateUnit::Week))
        );
    }

    #[test]
    fn test_rejects_rates_above_ceiling() {
        assert_eq!(
            RateTable::new(dec!(1), dec!(1), Decimal::MAX),
            Err(ConfigError::RateTooHigh(RateUnit::Week))
        );
        assert_eq!(
            RateTable::new(MAX_RATE + dec!(0.01), dec!(1), dec!(1)),
            Err(ConfigError::RateTooHigh(RateUnit::Hour))
        );
        assert!(RateTable::new(MAX_RATE, MAX_RATE, MAX_RATE).is_ok());
    }
}
