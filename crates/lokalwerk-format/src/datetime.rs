//! Locale-aware date and time formatting.
//!
//! Mirrors the field-granular option model of `Intl.DateTimeFormat`:
//! callers name the fields they want and a style per field, and the
//! defaults fill in the rest. Options merge field-wise, so a caller option
//! always wins over the default for that field while other fields keep
//! their defaults.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::FormatError;
use crate::descriptor::{DateOrder, FormatDescriptor, descriptor_for};

/// A point in time accepted by the formatting functions.
///
/// Conversions exist from chrono values, ISO-8601 strings, and epoch
/// milliseconds, matching the inputs the formatting layer receives from
/// storage, query parameters, and session data.
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
	DateTime(DateTime<Utc>),
	Naive(NaiveDateTime),
	Iso(String),
	EpochMillis(i64),
}

impl From<DateTime<Utc>> for DateInput {
	fn from(value: DateTime<Utc>) -> Self {
		Self::DateTime(value)
	}
}

impl From<NaiveDateTime> for DateInput {
	fn from(value: NaiveDateTime) -> Self {
		Self::Naive(value)
	}
}

impl From<NaiveDate> for DateInput {
	fn from(value: NaiveDate) -> Self {
		Self::Naive(value.and_time(chrono::NaiveTime::MIN))
	}
}

impl From<&str> for DateInput {
	fn from(value: &str) -> Self {
		Self::Iso(value.to_string())
	}
}

impl From<String> for DateInput {
	fn from(value: String) -> Self {
		Self::Iso(value)
	}
}

impl From<i64> for DateInput {
	fn from(value: i64) -> Self {
		Self::EpochMillis(value)
	}
}

impl DateInput {
	fn resolve(&self) -> Result<NaiveDateTime, FormatError> {
		match self {
			Self::DateTime(dt) => Ok(dt.naive_utc()),
			Self::Naive(dt) => Ok(*dt),
			Self::EpochMillis(millis) => DateTime::<Utc>::from_timestamp_millis(*millis)
				.map(|dt| dt.naive_utc())
				.ok_or(FormatError::TimestampOutOfRange(*millis)),
			Self::Iso(text) => parse_iso(text),
		}
	}
}

fn parse_iso(text: &str) -> Result<NaiveDateTime, FormatError> {
	if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
		return Ok(dt.naive_utc());
	}
	for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
		if let Ok(dt) = NaiveDateTime::parse_from_str(text, pattern) {
			return Ok(dt);
		}
	}
	if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
		return Ok(date.and_time(chrono::NaiveTime::MIN));
	}
	Err(FormatError::InvalidDate(text.to_string()))
}

/// Year rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YearStyle {
	/// Full year, `2024`.
	Numeric,
	/// Last two digits, `24`.
	TwoDigit,
}

/// Month rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonthStyle {
	Numeric,
	TwoDigit,
	/// Spelled out, `January`.
	Long,
	/// Abbreviated, `Jan`.
	Short,
}

/// Day-of-month rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayStyle {
	Numeric,
	TwoDigit,
}

/// Weekday rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeekdayStyle {
	Long,
	Short,
}

/// Hour/minute/second rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockStyle {
	Numeric,
	TwoDigit,
}

/// Field-granular date/time options.
///
/// `None` means the field is not rendered at all. The formatting functions
/// merge caller options over their own defaults with
/// [`DateTimeOptions::merged_over`]; a set field always wins.
///
/// # Examples
///
/// ```
/// use lokalwerk_format::{DateTimeOptions, MonthStyle, format_date};
///
/// let options = DateTimeOptions::default().with_month(MonthStyle::Long);
/// let text = format_date("2024-01-15", "en", options).unwrap();
/// assert_eq!(text, "January 15, 2024");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeOptions {
	pub year: Option<YearStyle>,
	pub month: Option<MonthStyle>,
	pub day: Option<DayStyle>,
	pub weekday: Option<WeekdayStyle>,
	pub hour: Option<ClockStyle>,
	pub minute: Option<ClockStyle>,
	pub second: Option<ClockStyle>,
}

impl DateTimeOptions {
	/// Defaults for [`format_date`]: 2-digit day and month, full year.
	pub fn date_defaults() -> Self {
		Self {
			year: Some(YearStyle::Numeric),
			month: Some(MonthStyle::TwoDigit),
			day: Some(DayStyle::TwoDigit),
			..Self::default()
		}
	}

	/// Defaults for [`format_time`]: 2-digit hour and minute.
	pub fn time_defaults() -> Self {
		Self {
			hour: Some(ClockStyle::TwoDigit),
			minute: Some(ClockStyle::TwoDigit),
			..Self::default()
		}
	}

	/// Defaults for [`format_datetime`]: union of date and time defaults.
	pub fn datetime_defaults() -> Self {
		Self {
			hour: Some(ClockStyle::TwoDigit),
			minute: Some(ClockStyle::TwoDigit),
			..Self::date_defaults()
		}
	}

	/// Field-wise merge: fields set on `self` win, unset fields come from
	/// `defaults`.
	pub fn merged_over(self, defaults: Self) -> Self {
		Self {
			year: self.year.or(defaults.year),
			month: self.month.or(defaults.month),
			day: self.day.or(defaults.day),
			weekday: self.weekday.or(defaults.weekday),
			hour: self.hour.or(defaults.hour),
			minute: self.minute.or(defaults.minute),
			second: self.second.or(defaults.second),
		}
	}

	pub fn with_year(mut self, style: YearStyle) -> Self {
		self.year = Some(style);
		self
	}

	pub fn with_month(mut self, style: MonthStyle) -> Self {
		self.month = Some(style);
		self
	}

	pub fn with_day(mut self, style: DayStyle) -> Self {
		self.day = Some(style);
		self
	}

	pub fn with_weekday(mut self, style: WeekdayStyle) -> Self {
		self.weekday = Some(style);
		self
	}

	pub fn with_hour(mut self, style: ClockStyle) -> Self {
		self.hour = Some(style);
		self
	}

	pub fn with_minute(mut self, style: ClockStyle) -> Self {
		self.minute = Some(style);
		self
	}

	pub fn with_second(mut self, style: ClockStyle) -> Self {
		self.second = Some(style);
		self
	}
}

/// Format the date portion of a point in time.
///
/// Defaults: 2-digit day and month, full year, in the locale's component
/// order (`01/15/2024` for `en`, `15.01.2024` for `de`).
///
/// # Errors
///
/// Returns [`FormatError`] when the input cannot be interpreted as a point
/// in time.
///
/// # Examples
///
/// ```
/// use lokalwerk_format::{DateTimeOptions, format_date};
///
/// let text = format_date("2024-01-15", "de", DateTimeOptions::default()).unwrap();
/// assert_eq!(text, "15.01.2024");
/// ```
pub fn format_date(
	input: impl Into<DateInput>,
	locale: &str,
	options: DateTimeOptions,
) -> Result<String, FormatError> {
	let dt = input.into().resolve()?;
	let merged = options.merged_over(DateTimeOptions::date_defaults());
	Ok(render(&dt, descriptor_for(locale), &merged))
}

/// Format the time portion of a point in time.
///
/// Defaults: 2-digit hour and minute, 12-hour clock with AM/PM for `en`,
/// 24-hour clock otherwise.
pub fn format_time(
	input: impl Into<DateInput>,
	locale: &str,
	options: DateTimeOptions,
) -> Result<String, FormatError> {
	let dt = input.into().resolve()?;
	let merged = options.merged_over(DateTimeOptions::time_defaults());
	Ok(render(&dt, descriptor_for(locale), &merged))
}

/// Format date and time together.
///
/// Defaults are the union of the date and time defaults.
pub fn format_datetime(
	input: impl Into<DateInput>,
	locale: &str,
	options: DateTimeOptions,
) -> Result<String, FormatError> {
	let dt = input.into().resolve()?;
	let merged = options.merged_over(DateTimeOptions::datetime_defaults());
	Ok(render(&dt, descriptor_for(locale), &merged))
}

/// All-2-digit date: `01/15/24` for `en`, `15.01.24` for `de`.
pub fn format_date_short(input: impl Into<DateInput>, locale: &str) -> Result<String, FormatError> {
	format_date(
		input,
		locale,
		DateTimeOptions::default()
			.with_year(YearStyle::TwoDigit)
			.with_month(MonthStyle::TwoDigit)
			.with_day(DayStyle::TwoDigit),
	)
}

/// Fully spelled out date: `Monday, January 15, 2024` for `en`.
pub fn format_date_long(input: impl Into<DateInput>, locale: &str) -> Result<String, FormatError> {
	format_date(
		input,
		locale,
		DateTimeOptions::default()
			.with_weekday(WeekdayStyle::Long)
			.with_year(YearStyle::Numeric)
			.with_month(MonthStyle::Long)
			.with_day(DayStyle::Numeric),
	)
}

fn render(dt: &NaiveDateTime, desc: &FormatDescriptor, opts: &DateTimeOptions) -> String {
	let date = render_date(dt, desc, opts);
	let time = render_time(dt, desc, opts);
	match (date, time) {
		(Some(date), Some(time)) => format!("{date}{}{time}", desc.datetime_separator),
		(Some(date), None) => date,
		(None, Some(time)) => time,
		(None, None) => String::new(),
	}
}

fn render_date(dt: &NaiveDateTime, desc: &FormatDescriptor, opts: &DateTimeOptions) -> Option<String> {
	let weekday = opts.weekday.map(|style| {
		let index = dt.weekday().num_days_from_monday() as usize;
		match style {
			WeekdayStyle::Long => desc.weekdays_long[index],
			WeekdayStyle::Short => desc.weekdays_short[index],
		}
	});

	let month_index = dt.month0() as usize;
	let core = match opts.month {
		Some(MonthStyle::Long) => Some(textual_date(dt, desc, desc.months_long[month_index], opts)),
		Some(MonthStyle::Short) => {
			Some(textual_date(dt, desc, desc.months_short[month_index], opts))
		}
		_ => numeric_date(dt, desc, opts),
	};

	match (weekday, core) {
		(Some(weekday), Some(core)) => {
			Some(format!("{weekday}{}{core}", desc.weekday_separator))
		}
		(Some(weekday), None) => Some(weekday.to_string()),
		(None, core) => core,
	}
}

fn textual_date(
	dt: &NaiveDateTime,
	desc: &FormatDescriptor,
	month_name: &str,
	opts: &DateTimeOptions,
) -> String {
	let day = opts.day.map(|style| render_day(dt.day(), style));
	let year = opts.year.map(|style| render_year(dt.year(), style));
	let mut text = String::new();
	if desc.textual_month_first {
		text.push_str(month_name);
		if let Some(day) = &day {
			text.push(' ');
			text.push_str(day);
		}
		if let Some(year) = &year {
			text.push_str(if day.is_some() { ", " } else { " " });
			text.push_str(year);
		}
	} else {
		if let Some(day) = &day {
			text.push_str(day);
			text.push_str(desc.textual_day_suffix);
			text.push(' ');
		}
		text.push_str(month_name);
		if let Some(year) = &year {
			text.push(' ');
			text.push_str(year);
		}
	}
	text
}

fn numeric_date(
	dt: &NaiveDateTime,
	desc: &FormatDescriptor,
	opts: &DateTimeOptions,
) -> Option<String> {
	let year = opts.year.map(|style| render_year(dt.year(), style));
	let month = match opts.month {
		Some(MonthStyle::Numeric) => Some(dt.month().to_string()),
		Some(MonthStyle::TwoDigit) => Some(format!("{:02}", dt.month())),
		_ => None,
	};
	let day = opts.day.map(|style| render_day(dt.day(), style));

	let ordered = match desc.date_order {
		DateOrder::MonthDayYear => [month, day, year],
		DateOrder::DayMonthYear => [day, month, year],
	};
	let fields: Vec<String> = ordered.into_iter().flatten().collect();
	if fields.is_empty() {
		return None;
	}
	Some(fields.join(&desc.date_separator.to_string()))
}

fn render_time(
	dt: &NaiveDateTime,
	desc: &FormatDescriptor,
	opts: &DateTimeOptions,
) -> Option<String> {
	if opts.hour.is_none() && opts.minute.is_none() && opts.second.is_none() {
		return None;
	}

	let hour24 = dt.hour();
	let (hour_value, period) = if desc.hour12 {
		let hour = hour24 % 12;
		let hour = if hour == 0 { 12 } else { hour };
		(hour, Some(if hour24 < 12 { "AM" } else { "PM" }))
	} else {
		(hour24, None)
	};

	let mut parts = Vec::new();
	if let Some(style) = opts.hour {
		parts.push(render_clock(hour_value, style));
	}
	if let Some(style) = opts.minute {
		parts.push(render_clock(dt.minute(), style));
	}
	if let Some(style) = opts.second {
		parts.push(render_clock(dt.second(), style));
	}
	let mut text = parts.join(":");
	if let Some(period) = period
		&& opts.hour.is_some()
	{
		text.push(' ');
		text.push_str(period);
	}
	Some(text)
}

fn render_year(year: i32, style: YearStyle) -> String {
	match style {
		YearStyle::Numeric => year.to_string(),
		YearStyle::TwoDigit => format!("{:02}", year.rem_euclid(100)),
	}
}

fn render_day(day: u32, style: DayStyle) -> String {
	match style {
		DayStyle::Numeric => day.to_string(),
		DayStyle::TwoDigit => format!("{day:02}"),
	}
}

fn render_clock(value: u32, style: ClockStyle) -> String {
	match style {
		ClockStyle::Numeric => value.to_string(),
		ClockStyle::TwoDigit => format!("{value:02}"),
	}
}
