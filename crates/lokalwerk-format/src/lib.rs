//! Locale-aware formatting.
//!
//! Pure functions that format points in time, numbers, currency amounts,
//! and percentages according to a locale code's conventions. Every
//! function is deterministic for a given `(value, locale, options)` triple
//! and touches no global state; locale conventions come from static
//! per-locale descriptor tables, and unknown locale codes fall back to the
//! default locale's conventions.
//!
//! ```
//! use lokalwerk_format::{DateTimeOptions, NumberOptions, format_currency, format_date};
//!
//! let date = format_date("2024-01-15", "en", DateTimeOptions::default()).unwrap();
//! assert_eq!(date, "01/15/2024");
//!
//! let price = format_currency(1234.5, "USD", "en", NumberOptions::default());
//! assert_eq!(price, "$1,234.50");
//! ```

mod datetime;
mod descriptor;
mod number;

pub use datetime::{
	ClockStyle, DateInput, DateTimeOptions, DayStyle, MonthStyle, WeekdayStyle, YearStyle,
	format_date, format_date_long, format_date_short, format_datetime, format_time,
};
pub use number::{
	DEFAULT_CURRENCY, NumberOptions, format_currency, format_currency_default, format_number,
	format_number_compact, format_percentage,
};

/// Formatting errors.
///
/// Only date/time inputs can fail, and only while being interpreted as a
/// point in time; rendering itself is infallible.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
	#[error("Unrecognized date value: '{0}'")]
	InvalidDate(String),

	#[error("Timestamp out of range: {0}")]
	TimestampOutOfRange(i64),
}
