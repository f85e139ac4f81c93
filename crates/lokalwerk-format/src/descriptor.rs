//! Per-locale formatting descriptors.
//!
//! Each supported locale carries a static descriptor: date component
//! order and separator, month/weekday names, clock convention, number
//! separators, and symbol placement. Unknown locale codes fall back to the
//! `de` descriptor, matching the application default locale.

/// Order of numeric date components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DateOrder {
	MonthDayYear,
	DayMonthYear,
}

/// Placement of a currency symbol relative to the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CurrencyPosition {
	/// Symbol directly before the amount (`$1,234.50`).
	Before,
	/// Amount, no-break space, then the symbol (`1.234,50 €`).
	AfterWithSpace,
}

pub(crate) struct FormatDescriptor {
	pub code: &'static str,
	pub date_order: DateOrder,
	pub date_separator: char,
	/// Joins the date and time halves of a combined rendering.
	pub datetime_separator: &'static str,
	pub hour12: bool,
	pub months_long: [&'static str; 12],
	pub months_short: [&'static str; 12],
	pub weekdays_long: [&'static str; 7],
	pub weekdays_short: [&'static str; 7],
	/// Suffix after the day number in textual dates (`15.` in German).
	pub textual_day_suffix: &'static str,
	/// `January 15, 2024` vs `15. Januar 2024`.
	pub textual_month_first: bool,
	/// Joins a weekday name to the rest of the date.
	pub weekday_separator: &'static str,
	pub decimal_separator: char,
	pub group_separator: Option<char>,
	pub currency_position: CurrencyPosition,
	/// `15.34%` vs `15,34 %`.
	pub percent_space: bool,
}

static EN: FormatDescriptor = FormatDescriptor {
	code: "en",
	date_order: DateOrder::MonthDayYear,
	date_separator: '/',
	datetime_separator: ", ",
	hour12: true,
	months_long: [
		"January",
		"February",
		"March",
		"April",
		"May",
		"June",
		"July",
		"August",
		"September",
		"October",
		"November",
		"December",
	],
	months_short: [
		"Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
	],
	weekdays_long: [
		"Monday",
		"Tuesday",
		"Wednesday",
		"Thursday",
		"Friday",
		"Saturday",
		"Sunday",
	],
	weekdays_short: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
	textual_day_suffix: "",
	textual_month_first: true,
	weekday_separator: ", ",
	decimal_separator: '.',
	group_separator: Some(','),
	currency_position: CurrencyPosition::Before,
	percent_space: false,
};

static DE: FormatDescriptor = FormatDescriptor {
	code: "de",
	date_order: DateOrder::DayMonthYear,
	date_separator: '.',
	datetime_separator: ", ",
	hour12: false,
	months_long: [
		"Januar",
		"Februar",
		"März",
		"April",
		"Mai",
		"Juni",
		"Juli",
		"August",
		"September",
		"Oktober",
		"November",
		"Dezember",
	],
	months_short: [
		"Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.", "Nov.",
		"Dez.",
	],
	weekdays_long: [
		"Montag",
		"Dienstag",
		"Mittwoch",
		"Donnerstag",
		"Freitag",
		"Samstag",
		"Sonntag",
	],
	weekdays_short: ["Mo.", "Di.", "Mi.", "Do.", "Fr.", "Sa.", "So."],
	textual_day_suffix: ".",
	textual_month_first: false,
	weekday_separator: ", ",
	decimal_separator: ',',
	group_separator: Some('.'),
	currency_position: CurrencyPosition::AfterWithSpace,
	percent_space: true,
};

static FR: FormatDescriptor = FormatDescriptor {
	code: "fr",
	date_order: DateOrder::DayMonthYear,
	date_separator: '/',
	datetime_separator: " ",
	hour12: false,
	months_long: [
		"janvier",
		"février",
		"mars",
		"avril",
		"mai",
		"juin",
		"juillet",
		"août",
		"septembre",
		"octobre",
		"novembre",
		"décembre",
	],
	months_short: [
		"janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
		"déc.",
	],
	weekdays_long: [
		"lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
	],
	weekdays_short: ["lun.", "mar.", "mer.", "jeu.", "ven.", "sam.", "dim."],
	textual_day_suffix: "",
	textual_month_first: false,
	weekday_separator: " ",
	decimal_separator: ',',
	// Narrow no-break space, as French digit grouping uses.
	group_separator: Some('\u{202f}'),
	currency_position: CurrencyPosition::AfterWithSpace,
	percent_space: true,
};

/// Descriptor for a locale code; unknown codes use the `de` conventions.
pub(crate) fn descriptor_for(locale: &str) -> &'static FormatDescriptor {
	match locale {
		"en" => &EN,
		"fr" => &FR,
		_ => &DE,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn known_locales_resolve_to_their_descriptor() {
		assert_eq!(descriptor_for("en").code, "en");
		assert_eq!(descriptor_for("de").code, "de");
		assert_eq!(descriptor_for("fr").code, "fr");
	}

	#[test]
	fn unknown_locale_falls_back_to_default_conventions() {
		assert_eq!(descriptor_for("xx").code, "de");
		assert_eq!(descriptor_for("").code, "de");
	}
}
