//! Locale-aware number, currency, and percentage formatting.

use serde::{Deserialize, Serialize};

use crate::descriptor::{CurrencyPosition, FormatDescriptor, descriptor_for};
use lokalwerk_conf::Settings;

/// Currency used when a caller does not name one; deployments override it
/// through [`Settings::default_currency`].
pub const DEFAULT_CURRENCY: &str = "EUR";

const DEFAULT_MAX_FRACTION_DIGITS: u8 = 3;

/// Fraction-digit and grouping options.
///
/// Unset fields take the defaults of the function they are passed to:
/// plain numbers use 0–3 fraction digits, currency and percentage use
/// exactly 2, and grouping is on everywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberOptions {
	pub minimum_fraction_digits: Option<u8>,
	pub maximum_fraction_digits: Option<u8>,
	pub use_grouping: Option<bool>,
}

impl NumberOptions {
	pub fn with_minimum_fraction_digits(mut self, digits: u8) -> Self {
		self.minimum_fraction_digits = Some(digits);
		self
	}

	pub fn with_maximum_fraction_digits(mut self, digits: u8) -> Self {
		self.maximum_fraction_digits = Some(digits);
		self
	}

	/// Fix both fraction-digit bounds to the same value.
	pub fn with_fraction_digits(self, digits: u8) -> Self {
		self.with_minimum_fraction_digits(digits)
			.with_maximum_fraction_digits(digits)
	}

	pub fn with_grouping(mut self, grouping: bool) -> Self {
		self.use_grouping = Some(grouping);
		self
	}
}

/// Format a number with the locale's separators.
///
/// Defaults: no minimum fraction digits, at most three, grouping on.
///
/// # Examples
///
/// ```
/// use lokalwerk_format::{NumberOptions, format_number};
///
/// assert_eq!(format_number(1234567.891, "en", NumberOptions::default()), "1,234,567.891");
/// assert_eq!(format_number(1234567.891, "de", NumberOptions::default()), "1.234.567,891");
/// ```
pub fn format_number(value: f64, locale: &str, options: NumberOptions) -> String {
	render_number(value, descriptor_for(locale), options)
}

/// Format an amount of `currency` with the locale's conventions.
///
/// Exactly two fraction digits unless overridden; the symbol goes before
/// the amount for `en` and after it for `de`/`fr`. Unrecognized currency
/// codes render as the code itself.
///
/// # Examples
///
/// ```
/// use lokalwerk_format::{NumberOptions, format_currency};
///
/// assert_eq!(format_currency(1234.5, "USD", "en", NumberOptions::default()), "$1,234.50");
/// assert_eq!(format_currency(1234.5, "EUR", "de", NumberOptions::default()), "1.234,50\u{a0}€");
/// ```
pub fn format_currency(amount: f64, currency: &str, locale: &str, options: NumberOptions) -> String {
	let desc = descriptor_for(locale);
	let options = NumberOptions {
		minimum_fraction_digits: Some(options.minimum_fraction_digits.unwrap_or(2)),
		maximum_fraction_digits: Some(options.maximum_fraction_digits.unwrap_or(2)),
		use_grouping: options.use_grouping,
	};
	let sign = if amount.is_sign_negative() && amount != 0.0 {
		"-"
	} else {
		""
	};
	let number = render_number(amount.abs(), desc, options);
	let symbol = currency_symbol(currency);
	match desc.currency_position {
		CurrencyPosition::Before => {
			// Alphabetic codes get a separating space, `CHF 12.00` rather
			// than `CHF12.00`.
			if symbol.chars().all(|c| c.is_ascii_alphabetic()) {
				format!("{sign}{symbol}\u{a0}{number}")
			} else {
				format!("{sign}{symbol}{number}")
			}
		}
		CurrencyPosition::AfterWithSpace => format!("{sign}{number}\u{a0}{symbol}"),
	}
}

/// Format an amount of the configured default currency.
pub fn format_currency_default(
	amount: f64,
	settings: &Settings,
	locale: &str,
	options: NumberOptions,
) -> String {
	format_currency(amount, &settings.default_currency, locale, options)
}

/// Format a fraction as a percentage: `0.1534` becomes `15.34%`.
///
/// Two fraction digits unless overridden; `de`/`fr` put a no-break space
/// before the percent sign.
///
/// # Examples
///
/// ```
/// use lokalwerk_format::{NumberOptions, format_percentage};
///
/// assert_eq!(format_percentage(0.1534, "en", NumberOptions::default()), "15.34%");
/// assert_eq!(format_percentage(0.1534, "de", NumberOptions::default()), "15,34\u{a0}%");
/// ```
pub fn format_percentage(value: f64, locale: &str, options: NumberOptions) -> String {
	let desc = descriptor_for(locale);
	let options = NumberOptions {
		minimum_fraction_digits: Some(options.minimum_fraction_digits.unwrap_or(2)),
		maximum_fraction_digits: Some(options.maximum_fraction_digits.unwrap_or(2)),
		use_grouping: options.use_grouping,
	};
	let number = render_number(value * 100.0, desc, options);
	if desc.percent_space {
		format!("{number}\u{a0}%")
	} else {
		format!("{number}%")
	}
}

/// Compact notation: `1234` becomes `1.2K`, `2500000` becomes `2.5M`.
///
/// At most one fraction digit, using the locale's decimal separator and no
/// grouping. Values below one thousand format as plain numbers.
///
/// # Examples
///
/// ```
/// use lokalwerk_format::format_number_compact;
///
/// assert_eq!(format_number_compact(1234.0, "en"), "1.2K");
/// assert_eq!(format_number_compact(1234.0, "de"), "1,2K");
/// assert_eq!(format_number_compact(999.0, "en"), "999");
/// ```
pub fn format_number_compact(value: f64, locale: &str) -> String {
	const UNITS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];
	let options = NumberOptions::default()
		.with_maximum_fraction_digits(1)
		.with_grouping(false);
	if !value.is_finite() {
		return format_number(value, locale, options);
	}
	for (index, (unit, suffix)) in UNITS.iter().enumerate() {
		if value.abs() >= *unit {
			let mut scaled = value / unit;
			let mut suffix = *suffix;
			// Rounding may carry into the next unit: 999_950 is "1M",
			// not "1000K".
			if (scaled.abs() * 10.0).round() / 10.0 >= 1000.0 && index > 0 {
				let (unit, larger) = UNITS[index - 1];
				scaled = value / unit;
				suffix = larger;
			}
			return format!("{}{suffix}", format_number(scaled, locale, options));
		}
	}
	format_number(value, locale, options)
}

fn render_number(value: f64, desc: &FormatDescriptor, options: NumberOptions) -> String {
	if value.is_nan() {
		return "NaN".to_string();
	}
	if value.is_infinite() {
		return if value < 0.0 { "-∞" } else { "∞" }.to_string();
	}

	let minimum = options.minimum_fraction_digits.unwrap_or(0) as usize;
	let maximum = (options.maximum_fraction_digits.unwrap_or(DEFAULT_MAX_FRACTION_DIGITS) as usize)
		.max(minimum);
	let grouping = options.use_grouping.unwrap_or(true);

	let sign = if value < 0.0 { "-" } else { "" };
	let rendered = format!("{:.*}", maximum, value.abs());
	let (integer, fraction) = match rendered.split_once('.') {
		Some((integer, fraction)) => (integer, fraction),
		None => (rendered.as_str(), ""),
	};

	let fraction = trimmed_fraction(fraction, minimum);
	let integer = if grouping {
		grouped(integer, desc.group_separator)
	} else {
		integer.to_string()
	};

	if fraction.is_empty() {
		format!("{sign}{integer}")
	} else {
		format!("{sign}{integer}{}{fraction}", desc.decimal_separator)
	}
}

/// Drop trailing zeros, but never below `minimum` digits.
fn trimmed_fraction(fraction: &str, minimum: usize) -> String {
	let keep = fraction
		.trim_end_matches('0')
		.len()
		.max(minimum.min(fraction.len()));
	fraction[..keep].to_string()
}

fn grouped(integer: &str, separator: Option<char>) -> String {
	let Some(separator) = separator else {
		return integer.to_string();
	};
	let digits: Vec<char> = integer.chars().collect();
	let mut out = String::with_capacity(digits.len() + digits.len() / 3);
	for (index, digit) in digits.iter().enumerate() {
		if index > 0 && (digits.len() - index) % 3 == 0 {
			out.push(separator);
		}
		out.push(*digit);
	}
	out
}

fn currency_symbol(code: &str) -> &str {
	match code {
		"EUR" => "€",
		"USD" => "$",
		"GBP" => "£",
		"JPY" => "¥",
		_ => code,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(0.0, "0")]
	#[case(5.0, "5")]
	#[case(1234.0, "1,234")]
	#[case(1234567.0, "1,234,567")]
	#[case(-1234.5, "-1,234.5")]
	#[case(0.1239, "0.124")]
	fn plain_numbers_en(#[case] value: f64, #[case] expected: &str) {
		assert_eq!(format_number(value, "en", NumberOptions::default()), expected);
	}

	#[test]
	fn separators_follow_the_locale() {
		let options = NumberOptions::default();
		assert_eq!(format_number(1234567.891, "de", options), "1.234.567,891");
		assert_eq!(
			format_number(1234567.891, "fr", options),
			"1\u{202f}234\u{202f}567,891"
		);
	}

	#[test]
	fn fraction_digit_bounds_are_honored() {
		let options = NumberOptions::default().with_fraction_digits(2);
		assert_eq!(format_number(5.0, "en", options), "5.00");
		assert_eq!(format_number(5.129, "en", options), "5.13");

		let minimum_only = NumberOptions::default().with_minimum_fraction_digits(1);
		assert_eq!(format_number(5.0, "en", minimum_only), "5.0");
	}

	#[test]
	fn grouping_can_be_disabled() {
		let options = NumberOptions::default().with_grouping(false);
		assert_eq!(format_number(1234567.0, "en", options), "1234567");
	}

	#[test]
	fn non_finite_values_render_like_intl() {
		let options = NumberOptions::default();
		assert_eq!(format_number(f64::NAN, "en", options), "NaN");
		assert_eq!(format_number(f64::INFINITY, "en", options), "∞");
		assert_eq!(format_number(f64::NEG_INFINITY, "de", options), "-∞");
	}

	#[rstest]
	#[case("USD", "en", "$1,234.50")]
	#[case("EUR", "en", "€1,234.50")]
	#[case("EUR", "de", "1.234,50\u{a0}€")]
	#[case("USD", "de", "1.234,50\u{a0}$")]
	#[case("EUR", "fr", "1\u{202f}234,50\u{a0}€")]
	#[case("CHF", "en", "CHF\u{a0}1,234.50")]
	#[case("XXX", "de", "1.234,50\u{a0}XXX")]
	fn currency_placement(#[case] currency: &str, #[case] locale: &str, #[case] expected: &str) {
		let text = format_currency(1234.5, currency, locale, NumberOptions::default());
		assert_eq!(text, expected);
	}

	#[test]
	fn negative_currency_keeps_the_sign_outside() {
		assert_eq!(
			format_currency(-5.0, "USD", "en", NumberOptions::default()),
			"-$5.00"
		);
		assert_eq!(
			format_currency(-5.0, "EUR", "de", NumberOptions::default()),
			"-5,00\u{a0}€"
		);
	}

	#[test]
	fn default_currency_comes_from_settings() {
		let settings = Settings::default();
		assert_eq!(
			format_currency_default(10.0, &settings, "en", NumberOptions::default()),
			"€10.00"
		);
		let custom = Settings::default().with_default_currency("USD");
		assert_eq!(
			format_currency_default(10.0, &custom, "en", NumberOptions::default()),
			"$10.00"
		);
	}

	#[rstest]
	#[case(0.1534, "en", "15.34%")]
	#[case(0.15, "en", "15.00%")]
	#[case(1.0, "en", "100.00%")]
	#[case(0.1534, "de", "15,34\u{a0}%")]
	#[case(0.1534, "fr", "15,34\u{a0}%")]
	fn percentages_scale_fractions(#[case] value: f64, #[case] locale: &str, #[case] expected: &str) {
		assert_eq!(format_percentage(value, locale, NumberOptions::default()), expected);
	}

	#[rstest]
	#[case(999.0, "999")]
	#[case(1000.0, "1K")]
	#[case(1234.0, "1.2K")]
	#[case(1_234_567.0, "1.2M")]
	#[case(2_500_000_000.0, "2.5B")]
	#[case(7.2e12, "7.2T")]
	#[case(-1234.0, "-1.2K")]
	#[case(999_950.0, "1M")]
	fn compact_notation_en(#[case] value: f64, #[case] expected: &str) {
		assert_eq!(format_number_compact(value, "en"), expected);
	}

	#[test]
	fn compact_notation_uses_locale_decimal_separator() {
		assert_eq!(format_number_compact(1234.0, "de"), "1,2K");
	}
}
