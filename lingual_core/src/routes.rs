use std::collections::HashMap;

/// Resolves an endpoint name (`<namespace>.<route>`) and a slug into an href.
///
/// This is the only coupling point between lesson markup and the host
/// application's URL scheme. Returning `None` means the endpoint is unknown;
/// the link rule then degrades to `href="#"`.
pub trait RouteResolver: Send + Sync {
	fn resolve(&self, endpoint: &str, slug: &str) -> Option<String>;
}

/// Placeholder replaced with the slug inside a route template.
pub const SLUG_PLACEHOLDER: &str = "{slug}";

/// A table of endpoint name to path template.
///
/// ```
/// use lingual_core::RouteResolver;
/// use lingual_core::RouteTable;
///
/// let routes = RouteTable::new()
/// 	.with_route("nihongo.grammar", "/nihongo/grammar/{slug}")
/// 	.with_route("nihongo.home", "/nihongo/");
///
/// assert_eq!(
/// 	routes.resolve("nihongo.grammar", "te-form").as_deref(),
/// 	Some("/nihongo/grammar/te-form")
/// );
/// assert_eq!(
/// 	routes.resolve("nihongo.home", "intro").as_deref(),
/// 	Some("/nihongo/?slug=intro")
/// );
/// assert_eq!(routes.resolve("nihongo.kanji", "intro"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
	routes: HashMap<String, String>,
}

impl RouteTable {
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with_route(mut self, endpoint: impl Into<String>, template: impl Into<String>) -> Self {
		self.insert(endpoint, template);
		self
	}

	pub fn insert(&mut self, endpoint: impl Into<String>, template: impl Into<String>) {
		self.routes.insert(endpoint.into(), template.into());
	}

	pub fn len(&self) -> usize {
		self.routes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}
}

impl FromIterator<(String, String)> for RouteTable {
	fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
		Self {
			routes: iter.into_iter().collect(),
		}
	}
}

impl RouteResolver for RouteTable {
	fn resolve(&self, endpoint: &str, slug: &str) -> Option<String> {
		let template = self.routes.get(endpoint)?;

		if template.contains(SLUG_PLACEHOLDER) {
			return Some(template.replace(SLUG_PLACEHOLDER, slug));
		}

		// Templates without a slug segment receive it as a query parameter.
		let separator = if template.contains('?') { '&' } else { '?' };
		Some(format!("{template}{separator}slug={slug}"))
	}
}
