//! Dates and times within a non-leap 8760-hour year

use crate::display::error::{DisplayError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Days in each month of a non-leap year
pub const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Number of hours in the year
pub const HOURS_PER_YEAR: f64 = 8760.0;

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Day of year at which each month starts (0-based)
pub(crate) fn month_offset(month: u32) -> u32 {
    DAYS_IN_MONTH[..(month - 1) as usize].iter().sum()
}

/// A calendar day of the non-leap year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Date {
    pub month: u32,
    pub day: u32,
}

impl Date {
    pub fn new(month: u32, day: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(DisplayError::Translation(format!(
                "Invalid month {}: expected 1 to 12",
                month
            )));
        }
        let max_day = DAYS_IN_MONTH[(month - 1) as usize];
        if day < 1 || day > max_day {
            return Err(DisplayError::Translation(format!(
                "Invalid day {} for month {}: expected 1 to {}",
                day, month, max_day
            )));
        }
        Ok(Date { month, day })
    }

    /// Date from a day of the year (1 to 365)
    pub fn from_doy(doy: u32) -> Result<Self> {
        if !(1..=365).contains(&doy) {
            return Err(DisplayError::Translation(format!(
                "Invalid day of year {}: expected 1 to 365",
                doy
            )));
        }
        let mut remaining = doy;
        for (i, days) in DAYS_IN_MONTH.iter().enumerate() {
            if remaining <= *days {
                return Ok(Date {
                    month: i as u32 + 1,
                    day: remaining,
                });
            }
            remaining -= days;
        }
        Err(DisplayError::Translation(format!(
            "Invalid day of year {}",
            doy
        )))
    }

    pub fn doy(&self) -> u32 {
        month_offset(self.month) + self.day
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, MONTH_NAMES[(self.month - 1) as usize])
    }
}

/// A moment of the non-leap year with minute resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DateTime {
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl DateTime {
    pub fn new(month: u32, day: u32, hour: u32, minute: u32) -> Result<Self> {
        Date::new(month, day)?;
        if hour > 23 || minute > 59 {
            return Err(DisplayError::Translation(format!(
                "Invalid time {}:{:02}",
                hour, minute
            )));
        }
        Ok(DateTime {
            month,
            day,
            hour,
            minute,
        })
    }

    /// Date time from an hour of the year in [0, 8760)
    ///
    /// Fractional hours are rounded to the nearest minute.
    pub fn from_hoy(hoy: f64) -> Result<Self> {
        if !hoy.is_finite() || !(0.0..HOURS_PER_YEAR).contains(&hoy) {
            return Err(DisplayError::Translation(format!(
                "Invalid hour of year {}: expected 0 to 8760",
                hoy
            )));
        }
        let moy = ((hoy * 60.0).round() as u32).min(HOURS_PER_YEAR as u32 * 60 - 1);
        Self::from_moy(moy)
    }

    /// Date time from a minute of the year
    pub fn from_moy(moy: u32) -> Result<Self> {
        let date = Date::from_doy(moy / 1440 + 1)?;
        let minute_of_day = moy % 1440;
        Ok(DateTime {
            month: date.month,
            day: date.day,
            hour: minute_of_day / 60,
            minute: minute_of_day % 60,
        })
    }

    pub fn date(&self) -> Date {
        Date {
            month: self.month,
            day: self.day,
        }
    }

    pub fn doy(&self) -> u32 {
        self.date().doy()
    }

    /// Hour of the year
    pub fn hoy(&self) -> f64 {
        (self.doy() - 1) as f64 * 24.0 + self.hour as f64 + self.minute as f64 / 60.0
    }

    /// Minute of the year
    pub fn moy(&self) -> u32 {
        (self.doy() - 1) * 1440 + self.hour * 60 + self.minute
    }

    /// Hour of the day with minutes as a fraction
    pub fn float_hour(&self) -> f64 {
        self.hour as f64 + self.minute as f64 / 60.0
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:02}:{:02}", self.date(), self.hour, self.minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_from_doy() {
        assert_eq!(Date::from_doy(1).unwrap(), Date { month: 1, day: 1 });
        assert_eq!(Date::from_doy(32).unwrap(), Date { month: 2, day: 1 });
        assert_eq!(Date::from_doy(172).unwrap(), Date { month: 6, day: 21 });
        assert_eq!(Date::from_doy(365).unwrap(), Date { month: 12, day: 31 });
        assert!(Date::from_doy(0).is_err());
        assert!(Date::from_doy(366).is_err());
    }

    #[test]
    fn test_invalid_dates() {
        assert!(matches!(Date::new(2, 29), Err(DisplayError::Translation(_))));
        assert!(Date::new(13, 1).is_err());
        assert!(DateTime::new(1, 1, 24, 0).is_err());
        assert!(DateTime::from_hoy(8760.0).is_err());
        assert!(DateTime::from_hoy(-1.0).is_err());
    }

    #[test]
    fn test_hoy_round_trip() {
        let dt = DateTime::new(6, 21, 12, 30).unwrap();
        assert_eq!(dt.doy(), 172);
        assert_eq!(dt.hoy(), 171.0 * 24.0 + 12.5);
        assert_eq!(DateTime::from_hoy(dt.hoy()).unwrap(), dt);
        assert_eq!(DateTime::from_moy(dt.moy()).unwrap(), dt);
        assert_eq!(dt.to_string(), "21 Jun 12:30");
    }

    #[test]
    fn test_from_hoy_rounds_to_minutes() {
        let dt = DateTime::from_hoy(0.999_999).unwrap();
        assert_eq!((dt.hour, dt.minute), (1, 0));
        let last = DateTime::from_hoy(8759.5).unwrap();
        assert_eq!((last.month, last.day, last.hour, last.minute), (12, 31, 23, 30));
    }
}
