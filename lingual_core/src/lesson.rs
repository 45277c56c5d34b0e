use std::io::ErrorKind;
use std::sync::Arc;

use serde::Serialize;

use crate::ContentSource;
use crate::LingualError;
use crate::LingualResult;
use crate::Metadata;
use crate::Pipeline;
use crate::Slug;
use crate::SourceDocument;
use crate::TocEntry;
use crate::render_markdown;

/// Title used when a lesson's metadata has no `title`.
pub const DEFAULT_TITLE: &str = "Untitled";

/// A fully rendered lesson.
///
/// Serialises as `{ slug, title, summary, content, meta, toc }` where
/// `content` is the rendered HTML body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lesson {
	pub slug: Slug,
	/// Title after the transform pipeline. Not markdown-rendered.
	pub title: String,
	/// Summary after the transform pipeline. Not markdown-rendered.
	pub summary: String,
	#[serde(rename = "content")]
	pub html_content: String,
	#[serde(rename = "meta")]
	pub metadata: Metadata,
	/// Headings of the rendered body in document order.
	pub toc: Vec<TocEntry>,
}

/// Resolves slugs to lesson documents and renders them.
#[derive(Clone)]
pub struct LessonLoader {
	pipeline: Arc<Pipeline>,
	source: Arc<dyn ContentSource>,
}

impl LessonLoader {
	pub fn new(pipeline: Arc<Pipeline>, source: Arc<dyn ContentSource>) -> Self {
		Self { pipeline, source }
	}

	/// Load, transform and render the lesson for `slug`.
	///
	/// Fails with [`LingualError::InvalidSlug`] before touching storage when
	/// the slug contains anything other than letters, digits and hyphens,
	/// with [`LingualError::LessonNotFound`] when no document exists and with
	/// [`LingualError::FrontMatter`] when its metadata block is absent or
	/// malformed.
	#[tracing::instrument(level = "debug", skip(self))]
	pub fn load(&self, slug: &str) -> LingualResult<Lesson> {
		let slug = Slug::new(slug)?;
		let document = self.read_document(&slug)?;

		let body = self.pipeline.apply(&document.body);
		let rendered = render_markdown(&body)?;
		let title = self.short_field(&document, "title", DEFAULT_TITLE);
		let summary = self.short_field(&document, "summary", "");

		Ok(Lesson {
			slug: document.slug,
			title,
			summary,
			html_content: rendered.html,
			metadata: document.metadata,
			toc: rendered.toc,
		})
	}

	/// Read and split the document for `slug` without rendering it.
	pub fn read_document(&self, slug: &Slug) -> LingualResult<SourceDocument> {
		let text = match self.source.read_lesson(slug) {
			Ok(Some(text)) => text,
			Ok(None) => return Err(LingualError::LessonNotFound(slug.to_string())),
			Err(LingualError::Io(e)) if e.kind() == ErrorKind::InvalidData => {
				return Err(LingualError::FrontMatter {
					slug: slug.to_string(),
					reason: e.to_string(),
				});
			}
			Err(e) => return Err(e),
		};

		SourceDocument::parse(slug.clone(), &text)
	}

	/// Run a short metadata field through the pipeline only, so inline
	/// formatting works without paragraph wrapping.
	fn short_field(&self, document: &SourceDocument, key: &str, default: &str) -> String {
		let raw = document.field(key).unwrap_or_else(|| default.to_string());
		self.pipeline.apply(&raw)
	}
}
