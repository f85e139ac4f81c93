//! Public-path allow list.

use lokalwerk_conf::Settings;

/// Paths reachable without a session.
///
/// Entries are matched against the locale-stripped request path. An entry
/// ending in `/*` matches the base segment and everything below it;
/// everything else is matched exactly.
///
/// # Examples
///
/// ```
/// use lokalwerk_middleware::PublicPaths;
///
/// let paths = PublicPaths::new(["/", "/auth/*"]);
/// assert!(paths.matches("/"));
/// assert!(paths.matches("/auth/login"));
/// assert!(!paths.matches("/dashboard"));
/// ```
#[derive(Debug, Clone)]
pub struct PublicPaths {
	entries: Vec<String>,
}

impl PublicPaths {
	pub fn new<I, S>(entries: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			entries: entries.into_iter().map(Into::into).collect(),
		}
	}

	pub fn from_settings(settings: &Settings) -> Self {
		Self::new(settings.public_paths.clone())
	}

	/// Whether `path` is publicly reachable.
	pub fn matches(&self, path: &str) -> bool {
		self.entries.iter().any(|entry| {
			if let Some(base) = entry.strip_suffix("/*") {
				path == base || path.starts_with(entry.trim_end_matches('*'))
			} else {
				path == entry
			}
		})
	}
}
