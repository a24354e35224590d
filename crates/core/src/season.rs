//! Calendar season derivation.
//!
//! Seasons use fixed month/day boundaries, not astronomical ones:
//! Spring is Mar 20 - Jun 20, Summer is Jun 21 - Sep 20, Fall is
//! Sep 21 - Dec 20, and Winter is everything else. The same table labels
//! new submissions and names season archives, so it must stay exact.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One of the four fixed calendar seasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeasonName {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl SeasonName {
    pub fn as_str(self) -> &'static str {
        match self {
            SeasonName::Spring => "Spring",
            SeasonName::Summer => "Summer",
            SeasonName::Fall => "Fall",
            SeasonName::Winter => "Winter",
        }
    }
}

impl fmt::Display for SeasonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A season within a specific year, e.g. Fall 2026.
///
/// The winter spanning a year boundary takes the year of the date it was
/// derived from (Jan 2027 is Winter 2027, Dec 2026 is Winter 2026).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub name: SeasonName,
    pub year: i32,
}

impl Season {
    /// Archive label for this season, e.g. `2026-fall`.
    pub fn slug(&self) -> String {
        format!("{}-{}", self.year, self.name.as_str().to_lowercase())
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.year)
    }
}

/// Derive the season a calendar date falls in. Total over all dates.
pub fn season_for_date(date: NaiveDate) -> Season {
    let month = date.month();
    let day = date.day();

    let name = if (month == 3 && day >= 20) || (month > 3 && month < 6) || (month == 6 && day <= 20)
    {
        SeasonName::Spring
    } else if (month == 6 && day >= 21) || (month > 6 && month < 9) || (month == 9 && day <= 20) {
        SeasonName::Summer
    } else if (month == 9 && day >= 21) || (month > 9 && month < 12) || (month == 12 && day <= 20) {
        SeasonName::Fall
    } else {
        SeasonName::Winter
    };

    Season {
        name,
        year: date.year(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn season_of(year: i32, month: u32, day: u32) -> SeasonName {
        season_for_date(NaiveDate::from_ymd_opt(year, month, day).unwrap()).name
    }

    #[test]
    fn test_spring_boundaries() {
        assert_eq!(season_of(2024, 3, 19), SeasonName::Winter);
        assert_eq!(season_of(2024, 3, 20), SeasonName::Spring);
        assert_eq!(season_of(2024, 6, 20), SeasonName::Spring);
        assert_eq!(season_of(2024, 6, 21), SeasonName::Summer);
    }

    #[test]
    fn test_summer_boundaries() {
        assert_eq!(season_of(2024, 9, 20), SeasonName::Summer);
        assert_eq!(season_of(2024, 9, 21), SeasonName::Fall);
    }

    #[test]
    fn test_fall_boundaries() {
        assert_eq!(season_of(2024, 12, 20), SeasonName::Fall);
        assert_eq!(season_of(2024, 12, 21), SeasonName::Winter);
    }

    #[test]
    fn test_winter_wraps_year_boundary() {
        assert_eq!(season_of(2025, 1, 15), SeasonName::Winter);
        assert_eq!(season_of(2025, 2, 28), SeasonName::Winter);
        // Year follows the derivation date on both sides of the wrap.
        let dec = season_for_date(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap());
        assert_eq!(dec, Season { name: SeasonName::Winter, year: 2024 });
        let jan = season_for_date(NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
        assert_eq!(jan, Season { name: SeasonName::Winter, year: 2025 });
    }

    #[test]
    fn test_mid_season_dates() {
        assert_eq!(season_of(2024, 4, 15), SeasonName::Spring);
        assert_eq!(season_of(2024, 7, 4), SeasonName::Summer);
        assert_eq!(season_of(2024, 10, 31), SeasonName::Fall);
    }

    #[test]
    fn test_slug_format() {
        let season = Season { name: SeasonName::Fall, year: 2026 };
        assert_eq!(season.slug(), "2026-fall");
    }
}
