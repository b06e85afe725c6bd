//! Strict multi-format date normalization.

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::patterns::{
    DATE_DD_MMMM_YYYY, DATE_DD_MM_YYYY, DATE_D_MMM_COMMA_YYYY, DATE_D_MMM_YYYY, DATE_YYYY_MM_DD,
    ORDINAL_SUFFIX,
};
use crate::error::DateParseError;

const MONTHS: [(&str, &str); 12] = [
    ("jan", "january"),
    ("feb", "february"),
    ("mar", "march"),
    ("apr", "april"),
    ("may", "may"),
    ("jun", "june"),
    ("jul", "july"),
    ("aug", "august"),
    ("sep", "september"),
    ("oct", "october"),
    ("nov", "november"),
    ("dec", "december"),
];

/// A date layout the normalizer can match. Serialized by its pattern string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateFormat {
    /// `22-09-2001`
    #[serde(rename = "DD-MM-YYYY")]
    DayMonthYearDashed,
    /// `17 Mar, 2004`
    #[serde(rename = "D MMM, YYYY")]
    DayShortMonthCommaYear,
    /// `14 SEPTEMBER 2002`
    #[serde(rename = "DD MMMM YYYY")]
    DayLongMonthYear,
    /// `1 Jan 2000`
    #[serde(rename = "D MMM YYYY")]
    DayShortMonthYear,
    /// `2001-09-22`
    #[serde(rename = "YYYY-MM-DD")]
    Iso,
}

impl DateFormat {
    /// Formats accepted on birth certificates, in priority order.
    pub const BIRTH_CERTIFICATE: [DateFormat; 5] = [
        DateFormat::DayMonthYearDashed,
        DateFormat::DayShortMonthCommaYear,
        DateFormat::DayLongMonthYear,
        DateFormat::DayShortMonthYear,
        DateFormat::Iso,
    ];

    pub fn pattern(&self) -> &'static str {
        match self {
            DateFormat::DayMonthYearDashed => "DD-MM-YYYY",
            DateFormat::DayShortMonthCommaYear => "D MMM, YYYY",
            DateFormat::DayLongMonthYear => "DD MMMM YYYY",
            DateFormat::DayShortMonthYear => "D MMM YYYY",
            DateFormat::Iso => "YYYY-MM-DD",
        }
    }

    /// Parse `text` only if it conforms to this format entirely.
    pub fn parse(&self, text: &str) -> Option<NaiveDate> {
        let (regex, order): (&Regex, Order) = match self {
            DateFormat::DayMonthYearDashed => (&*DATE_DD_MM_YYYY, Order::DayNumericMonthYear),
            DateFormat::DayShortMonthCommaYear => (&*DATE_D_MMM_COMMA_YYYY, Order::DayShortMonthYear),
            DateFormat::DayLongMonthYear => (&*DATE_DD_MMMM_YYYY, Order::DayLongMonthYear),
            DateFormat::DayShortMonthYear => (&*DATE_D_MMM_YYYY, Order::DayShortMonthYear),
            DateFormat::Iso => (&*DATE_YYYY_MM_DD, Order::YearMonthDay),
        };

        let caps = regex.captures(text)?;
        let (year, month, day) = match order {
            Order::DayNumericMonthYear => (&caps[3], caps[2].parse().ok()?, &caps[1]),
            Order::DayShortMonthYear => (&caps[3], short_month_number(&caps[2])?, &caps[1]),
            Order::DayLongMonthYear => (&caps[3], long_month_number(&caps[2])?, &caps[1]),
            Order::YearMonthDay => (&caps[1], caps[2].parse().ok()?, &caps[3]),
        };

        NaiveDate::from_ymd_opt(year.parse().ok()?, month, day.parse().ok()?)
    }
}

enum Order {
    DayNumericMonthYear,
    DayShortMonthYear,
    DayLongMonthYear,
    YearMonthDay,
}

fn short_month_number(name: &str) -> Option<u32> {
    MONTHS
        .iter()
        .position(|(short, _)| short.eq_ignore_ascii_case(name))
        .map(|i| i as u32 + 1)
}

fn long_month_number(name: &str) -> Option<u32> {
    MONTHS
        .iter()
        .position(|(_, long)| long.eq_ignore_ascii_case(name))
        .map(|i| i as u32 + 1)
}

/// Tries an ordered list of strict formats and returns the first match.
pub struct DateNormalizer;

impl DateNormalizer {
    pub fn try_parse(text: &str, formats: &[DateFormat]) -> Result<NaiveDate, DateParseError> {
        for format in formats {
            if let Some(date) = format.parse(text) {
                trace!("'{}' parsed with {}", text, format.pattern());
                return Ok(date);
            }
        }

        Err(DateParseError {
            input: text.to_string(),
        })
    }
}

/// `1st` -> `1`, `22ND` -> `22`; only whole tokens are touched.
pub fn strip_ordinal_suffixes(text: &str) -> String {
    ORDINAL_SUFFIX.replace_all(text, "${1}").into_owned()
}

/// Canonical `YYYY-MM-DD` rendering.
pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
