//! Period domain model - one (year, month) page of order history

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};

/// One month of order history, identified by calendar year and month.
///
/// The walk visits periods in strictly descending calendar order, so
/// the only movement is [`Period::prev`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
}

impl Period {
    /// Create a period, rejecting months outside 1-12.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::Validation(format!(
                "Month must be between 1 and 12, got {}",
                month
            )));
        }
        Ok(Self { year, month })
    }

    /// The previous calendar month, wrapping to December of the prior
    /// year after January.
    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Walk stopping policy. True when this period has fallen past the
    /// year floor, or when enough consecutive empty months have been
    /// seen. Pure; the walker evaluates it on the candidate next
    /// period before advancing.
    pub fn should_stop(self, empty_streak: u32, empty_threshold: u32, year_floor: i32) -> bool {
        self.year < year_floor || empty_streak >= empty_threshold
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = Error;

    /// Parse a period from `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::Validation(format!("Expected a period like 2025-03, got '{}'", s));
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.trim().parse().map_err(|_| invalid())?;
        let month: u32 = month.trim().parse().map_err(|_| invalid())?;
        Period::new(year, month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prev_decrements_within_year() {
        let p = Period::new(2025, 3).unwrap();
        assert_eq!(p.prev(), Period { year: 2025, month: 2 });
    }

    #[test]
    fn test_prev_wraps_year_at_january() {
        let p = Period::new(2025, 1).unwrap();
        assert_eq!(p.prev(), Period { year: 2024, month: 12 });
    }

    #[test]
    fn test_rejects_month_out_of_range() {
        assert!(Period::new(2025, 0).is_err());
        assert!(Period::new(2025, 13).is_err());
    }

    #[test]
    fn test_should_stop_at_empty_threshold_regardless_of_period() {
        let p = Period::new(2030, 6).unwrap();
        assert!(p.should_stop(12, 12, 2000));
        assert!(p.should_stop(13, 12, 2000));
        assert!(!p.should_stop(11, 12, 2000));
    }

    #[test]
    fn test_should_stop_below_year_floor_regardless_of_streak() {
        let p = Period::new(1999, 12).unwrap();
        assert!(p.should_stop(0, 12, 2000));
    }

    #[test]
    fn test_parse_and_display_round_trip() {
        let p: Period = "2025-03".parse().unwrap();
        assert_eq!(p, Period { year: 2025, month: 3 });
        assert_eq!(p.to_string(), "2025-03");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("march 2025".parse::<Period>().is_err());
        assert!("2025-00".parse::<Period>().is_err());
        assert!("2025".parse::<Period>().is_err());
    }
}
