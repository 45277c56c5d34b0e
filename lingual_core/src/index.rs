use std::sync::Arc;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::ContentSource;
use crate::DEFAULT_TITLE;
use crate::LingualError;
use crate::LingualResult;
use crate::Pipeline;
use crate::Slug;
use crate::SourceDocument;
use crate::split_front_matter;

/// Block callout types whose content is included in a lesson's digest.
pub const DIGEST_BLOCK_TYPES: [&str; 4] = ["blockquote", "warning", "note", "tip"];

static DIGEST_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
	let types = DIGEST_BLOCK_TYPES.join("|");
	Regex::new(&format!(r"(?s):::(?:{types})\s+(.*?):::")).expect("digest block pattern is valid")
});
static NOTE_MARKER_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"/[itwb]\s+").expect("note marker pattern is valid"));
static STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"::(?:[a-zA-Z]+|#[0-9a-fA-F]{3,6})\{([^}]*)\}").expect("style pattern is valid")
});
static LINK_TEXT_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]*\)").expect("link text pattern is valid"));
static BRACKET_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\[([^\]]+)\]").expect("bracket pattern is valid"));
static MARKDOWN_MARK_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"[*_`#\\]|\|\|").expect("markdown mark pattern is valid"));
static WHITESPACE_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Directory entry for one lesson: metadata plus a plain text digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonIndexEntry {
	pub slug: Slug,
	pub title: String,
	pub summary: String,
	/// Whitespace normalised plain text of the lesson's block callouts.
	pub digest: String,
}

/// A named group of lessons, in the order listed by the category map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonCategory {
	pub category: String,
	pub lessons: Vec<LessonIndexEntry>,
}

/// Builds the lesson directory from the category map without rendering any
/// lesson to HTML.
#[derive(Clone)]
pub struct LessonIndexBuilder {
	pipeline: Arc<Pipeline>,
	source: Arc<dyn ContentSource>,
}

impl LessonIndexBuilder {
	pub fn new(pipeline: Arc<Pipeline>, source: Arc<dyn ContentSource>) -> Self {
		Self { pipeline, source }
	}

	/// Index every lesson listed in the category map.
	///
	/// A lesson that is missing, has no metadata or fails to parse is logged
	/// and left out; it never fails the whole index. Only an unreadable or
	/// malformed category map is an error. A missing map yields an empty
	/// index.
	pub fn get_lessons(&self) -> LingualResult<Vec<LessonCategory>> {
		let Some(map) = self.source.read_category_map()? else {
			tracing::debug!("no category map, lesson index is empty");
			return Ok(Vec::new());
		};

		let categories = parse_category_map(&map)?;
		let mut index = Vec::with_capacity(categories.len());

		for (category, slugs) in categories {
			let mut lessons = Vec::with_capacity(slugs.len());
			for slug in &slugs {
				match self.index_entry(&category, slug) {
					Ok(Some(entry)) => lessons.push(entry),
					Ok(None) => {}
					Err(error) => {
						tracing::warn!(
							slug = %slug,
							category = %category,
							operation = "get_lessons",
							%error,
							"failed to index lesson"
						);
					}
				}
			}
			index.push(LessonCategory { category, lessons });
		}

		Ok(index)
	}

	fn index_entry(&self, category: &str, raw_slug: &str) -> LingualResult<Option<LessonIndexEntry>> {
		let slug = Slug::new(raw_slug)?;
		let Some(text) = self.source.read_lesson(&slug)? else {
			tracing::warn!(%slug, category, "lesson listed in category map was not found");
			return Ok(None);
		};

		if split_front_matter(&text).is_none() {
			tracing::warn!(%slug, category, "lesson is missing metadata");
			return Ok(None);
		}

		let document = SourceDocument::parse(slug, &text)?;
		if document.metadata.is_empty() {
			tracing::warn!(slug = %document.slug, category, "lesson is missing metadata");
			return Ok(None);
		}

		let title = document.field("title").unwrap_or_else(|| DEFAULT_TITLE.to_string());
		let summary = document.field("summary").unwrap_or_default();

		Ok(Some(LessonIndexEntry {
			title: self.pipeline.apply(&title),
			summary: self.pipeline.apply(&summary),
			digest: extract_digest(&document.body),
			slug: document.slug,
		}))
	}
}

/// Parse a `{ "category": ["slug", ...] }` document, keeping category order.
///
/// Categories whose value is not a list, and list entries that are not
/// strings, are skipped with a warning.
pub fn parse_category_map(text: &str) -> LingualResult<Vec<(String, Vec<String>)>> {
	let value: Value =
		serde_json::from_str(text).map_err(|e| LingualError::MalformedCategoryMap(e.to_string()))?;

	let Value::Object(map) = value else {
		return Err(LingualError::MalformedCategoryMap(
			"expected an object of category name to lesson slugs".to_string(),
		));
	};

	let mut categories = Vec::with_capacity(map.len());
	for (category, slugs) in map {
		let Value::Array(slugs) = slugs else {
			tracing::warn!(%category, "category map entry is not a list of slugs");
			continue;
		};

		let slugs = slugs
			.into_iter()
			.filter_map(|slug| {
				match slug {
					Value::String(slug) => Some(slug),
					other => {
						tracing::warn!(%category, entry = %other, "ignoring non-string slug");
						None
					}
				}
			})
			.collect();
		categories.push((category, slugs));
	}

	Ok(categories)
}

/// Plain text of every digest block callout in a raw lesson body.
///
/// Note markers, style wrappers, links and bracketed annotations are reduced
/// to their visible text and whitespace is collapsed.
pub fn extract_digest(body: &str) -> String {
	let mut digest = String::new();

	for caps in DIGEST_BLOCK_RE.captures_iter(body) {
		let cleaned = NOTE_MARKER_RE.replace_all(&caps[1], "");
		let cleaned = STYLE_RE.replace_all(&cleaned, "${1}");
		let cleaned = LINK_TEXT_RE.replace_all(&cleaned, "${1}");
		let cleaned = BRACKET_RE.replace_all(&cleaned, "${1}");
		let cleaned = MARKDOWN_MARK_RE.replace_all(&cleaned, "");

		digest.push(' ');
		digest.push_str(&cleaned);
	}

	WHITESPACE_RE.replace_all(&digest, " ").trim().to_string()
}
