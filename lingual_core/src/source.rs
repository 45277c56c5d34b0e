use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use crate::LingualError;
use crate::LingualResult;
use crate::Slug;

/// Directory under the data root holding lesson documents.
pub const LESSONS_DIR: &str = "lessons";
/// Directory under the data root holding quiz bank documents.
pub const QUIZZES_DIR: &str = "quizzes";
/// File under the data root mapping categories to lesson slugs.
pub const CATEGORY_MAP_FILE: &str = "map.json";
/// Default file extension of lesson documents.
pub const DEFAULT_LESSON_EXTENSION: &str = "md";

/// Backing storage for lesson, quiz bank and category map documents.
///
/// Every method returns `Ok(None)` when the document does not exist. Callers
/// only ever pass validated slugs.
pub trait ContentSource: Send + Sync {
	fn read_lesson(&self, slug: &Slug) -> LingualResult<Option<String>>;
	fn read_quiz_bank(&self, slug: &Slug) -> LingualResult<Option<String>>;
	fn read_category_map(&self) -> LingualResult<Option<String>>;
}

/// Reads documents from a data root on disk:
///
/// ```text
/// <data_root>/map.json
/// <data_root>/lessons/<slug>.md
/// <data_root>/quizzes/<slug>.json
/// ```
#[derive(Debug, Clone)]
pub struct FsContentSource {
	data_root: PathBuf,
	lesson_extension: String,
}

impl FsContentSource {
	pub fn new(data_root: impl Into<PathBuf>) -> Self {
		Self {
			data_root: data_root.into(),
			lesson_extension: DEFAULT_LESSON_EXTENSION.to_string(),
		}
	}

	#[must_use]
	pub fn with_lesson_extension(mut self, extension: impl Into<String>) -> Self {
		let extension = extension.into();
		self.lesson_extension = extension.trim_start_matches('.').to_string();
		self
	}

	pub fn data_root(&self) -> &Path {
		&self.data_root
	}

	pub fn lesson_path(&self, slug: &Slug) -> PathBuf {
		self.data_root
			.join(LESSONS_DIR)
			.join(format!("{slug}.{}", self.lesson_extension))
	}

	pub fn quiz_bank_path(&self, slug: &Slug) -> PathBuf {
		self.data_root.join(QUIZZES_DIR).join(format!("{slug}.json"))
	}

	pub fn category_map_path(&self) -> PathBuf {
		self.data_root.join(CATEGORY_MAP_FILE)
	}
}

impl ContentSource for FsContentSource {
	fn read_lesson(&self, slug: &Slug) -> LingualResult<Option<String>> {
		read_contained(&self.data_root.join(LESSONS_DIR), &self.lesson_path(slug))
	}

	fn read_quiz_bank(&self, slug: &Slug) -> LingualResult<Option<String>> {
		read_contained(&self.data_root.join(QUIZZES_DIR), &self.quiz_bank_path(slug))
	}

	fn read_category_map(&self) -> LingualResult<Option<String>> {
		read_contained(&self.data_root, &self.category_map_path())
	}
}

/// Read `file` only if it resolves to a regular file inside `dir` once both
/// are canonicalised.
fn read_contained(dir: &Path, file: &Path) -> LingualResult<Option<String>> {
	let resolved = match file.canonicalize() {
		Ok(resolved) => resolved,
		Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
		Err(e) => return Err(e.into()),
	};
	let root = dir.canonicalize()?;

	if !resolved.starts_with(&root) {
		return Err(LingualError::PathOutsideRoot(file.display().to_string()));
	}

	if !resolved.is_file() {
		return Ok(None);
	}

	Ok(Some(std::fs::read_to_string(resolved)?))
}

/// Documents held in memory, keyed by slug.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentSource {
	lessons: HashMap<String, String>,
	quiz_banks: HashMap<String, String>,
	category_map: Option<String>,
}

impl MemoryContentSource {
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with_lesson(mut self, slug: impl Into<String>, text: impl Into<String>) -> Self {
		self.lessons.insert(slug.into(), text.into());
		self
	}

	#[must_use]
	pub fn with_quiz_bank(mut self, slug: impl Into<String>, json: impl Into<String>) -> Self {
		self.quiz_banks.insert(slug.into(), json.into());
		self
	}

	#[must_use]
	pub fn with_category_map(mut self, json: impl Into<String>) -> Self {
		self.category_map = Some(json.into());
		self
	}
}

impl ContentSource for MemoryContentSource {
	fn read_lesson(&self, slug: &Slug) -> LingualResult<Option<String>> {
		Ok(self.lessons.get(slug.as_str()).cloned())
	}

	fn read_quiz_bank(&self, slug: &Slug) -> LingualResult<Option<String>> {
		Ok(self.quiz_banks.get(slug.as_str()).cloned())
	}

	fn read_category_map(&self) -> LingualResult<Option<String>> {
		Ok(self.category_map.clone())
	}
}
