use std::fmt;
use std::str::FromStr;

use derive_more::Deref;
use serde::Deserialize;
use serde::Serialize;

use crate::LingualError;
use crate::LingualResult;

/// A validated lesson or quiz bank identifier.
///
/// Slugs are restricted to ASCII letters, digits and hyphens. The check runs
/// before any path is built from the slug, so a `Slug` can be joined onto a
/// directory without risk of traversal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deref, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
	pub fn new(value: impl Into<String>) -> LingualResult<Self> {
		let value = value.into();
		if is_valid_slug(&value) {
			Ok(Self(value))
		} else {
			Err(LingualError::InvalidSlug(value))
		}
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

/// Check a candidate slug against `^[A-Za-z0-9-]+$`.
pub fn is_valid_slug(value: &str) -> bool {
	!value.is_empty() && value.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

impl fmt::Display for Slug {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl FromStr for Slug {
	type Err = LingualError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

impl TryFrom<String> for Slug {
	type Error = LingualError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}

impl From<Slug> for String {
	fn from(slug: Slug) -> Self {
		slug.0
	}
}

impl AsRef<str> for Slug {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
