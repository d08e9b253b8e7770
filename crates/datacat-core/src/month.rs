//! Calendar months as stored in the annotation table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A calendar month.
///
/// Mirrors the `datacat_month` enum type in the backing store. The declaration
/// order here must match the store type's label order so that both sides agree
/// on calendar ordering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "datacat_month", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All twelve months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Convert a 1-based month number to a `Month`.
    ///
    /// Numbers outside 1-12 are a caller contract violation and fail with
    /// [`Error::InvalidMonth`]; they are never clamped.
    pub fn from_number(number: i32) -> Result<Self> {
        match number {
            1..=12 => Ok(Month::ALL[(number - 1) as usize]),
            other => Err(Error::InvalidMonth(other)),
        }
    }

    /// The 1-based month number.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    /// The month before, wrapping from January back to December.
    pub fn prev(self) -> Month {
        Month::ALL[(self as usize + 11) % 12]
    }

    /// The month after, wrapping from December around to January.
    pub fn next(self) -> Month {
        Month::ALL[(self as usize + 1) % 12]
    }

    /// Lowercase label, as declared in the store enum type.
    pub fn as_str(self) -> &'static str {
        match self {
            Month::January => "january",
            Month::February => "february",
            Month::March => "march",
            Month::April => "april",
            Month::May => "may",
            Month::June => "june",
            Month::July => "july",
            Month::August => "august",
            Month::September => "september",
            Month::October => "october",
            Month::November => "november",
            Month::December => "december",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
