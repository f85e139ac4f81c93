//! `Accept-Language` negotiation against the registry.

use crate::{Locale, LocaleRegistry};

/// One parsed language range with its quality weight.
#[derive(Debug, Clone, PartialEq)]
struct LanguageRange {
	tag: String,
	quality: f32,
}

impl LocaleRegistry {
	/// Pick the best supported locale for an `Accept-Language` header.
	///
	/// Ranges are weighted by their `q` parameter (default `1.0`). A range
	/// matches a supported code either verbatim or through its primary
	/// subtag, so `en-US;q=0.8` can select `en`. The wildcard `*` matches
	/// the default locale. Malformed entries are skipped, never an error;
	/// `None` means nothing matched and the caller decides the fallback.
	///
	/// # Examples
	///
	/// ```
	/// use lokalwerk_locale::LocaleRegistry;
	///
	/// let registry = LocaleRegistry::builtin();
	/// let best = registry.negotiate("fr-CH;q=0.7, en;q=0.9").unwrap();
	/// assert_eq!(best.code(), "en");
	/// assert!(registry.negotiate("ja, ko;q=0.8").is_none());
	/// ```
	pub fn negotiate(&self, header: &str) -> Option<&Locale> {
		let mut best: Option<(&Locale, f32)> = None;
		for range in parse_ranges(header) {
			if range.quality <= 0.0 {
				continue;
			}
			let Some(locale) = self.match_range(&range.tag) else {
				continue;
			};
			let better = match best {
				Some((_, quality)) => range.quality > quality,
				None => true,
			};
			if better {
				best = Some((locale, range.quality));
			}
		}
		best.map(|(locale, _)| locale)
	}

	fn match_range(&self, tag: &str) -> Option<&Locale> {
		if tag == "*" {
			return Some(self.default_locale());
		}
		if let Some(locale) = self.get(tag) {
			return Some(locale);
		}
		// Primary-subtag fallback: inbound ranges are foreign data, so a
		// wider tag may still land on a supported code.
		let primary = tag.split('-').next()?;
		self.get(primary)
	}
}

fn parse_ranges(header: &str) -> Vec<LanguageRange> {
	header
		.split(',')
		.filter_map(|entry| {
			let mut parts = entry.split(';');
			let tag = parts.next()?.trim();
			if tag.is_empty() {
				return None;
			}
			let mut quality = 1.0_f32;
			for param in parts {
				let param = param.trim();
				if let Some(value) = param.strip_prefix("q=") {
					match value.trim().parse::<f32>() {
						Ok(q) if (0.0..=1.0).contains(&q) => quality = q,
						_ => {
							tracing::debug!(entry = %entry.trim(), "skipping malformed language range");
							return None;
						}
					}
				}
			}
			Some(LanguageRange {
				tag: tag.to_string(),
				quality,
			})
		})
		.collect()
}
