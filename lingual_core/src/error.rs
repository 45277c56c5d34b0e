use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum LingualError {
	#[error(transparent)]
	#[diagnostic(code(lingual::io_error))]
	Io(#[from] std::io::Error),

	#[error("invalid slug: `{0}`")]
	#[diagnostic(
		code(lingual::invalid_slug),
		help("slugs may only contain ASCII letters, digits and hyphens")
	)]
	InvalidSlug(String),

	#[error("lesson not found: `{0}`")]
	#[diagnostic(
		code(lingual::lesson_not_found),
		help("add `lessons/{0}.md` to the data root or fix the slug")
	)]
	LessonNotFound(String),

	#[error("quiz not found: `{0}`")]
	#[diagnostic(
		code(lingual::quiz_not_found),
		help("quiz ids are only valid for the lifetime of the process that issued them")
	)]
	QuizNotFound(String),

	#[error("invalid front matter in lesson `{slug}`: {reason}")]
	#[diagnostic(
		code(lingual::front_matter),
		help("start the lesson with a YAML block delimited by `---` lines")
	)]
	FrontMatter { slug: String, reason: String },

	#[error("malformed quiz bank `{slug}`: {reason}")]
	#[diagnostic(code(lingual::malformed_bank))]
	MalformedBank { slug: String, reason: String },

	#[error("malformed category map: {0}")]
	#[diagnostic(
		code(lingual::malformed_category_map),
		help("map.json must be an object of category name to a list of lesson slugs")
	)]
	MalformedCategoryMap(String),

	#[error("failure to render markdown: {0}")]
	#[diagnostic(code(lingual::markdown))]
	Markdown(String),

	#[error("invalid pattern for rule `{name}`: {reason}")]
	#[diagnostic(code(lingual::invalid_pattern))]
	InvalidPattern { name: String, reason: String },

	#[error("unknown extension: `{0}`")]
	#[diagnostic(
		code(lingual::unknown_extension),
		help("available extensions: furigana")
	)]
	UnknownExtension(String),

	#[error("path escapes the data root: `{0}`")]
	#[diagnostic(
		code(lingual::path_outside_root),
		help("remove the symlink or move the document inside the data root")
	)]
	PathOutsideRoot(String),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(lingual::config_parse),
		help("check that lingual.toml is valid TOML with an optional [routes] and [quiz] section")
	)]
	ConfigParse(String),
}

impl LingualError {
	/// Returns true when the error means the requested item does not exist.
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::LessonNotFound(_) | Self::QuizNotFound(_))
	}
}

pub type LingualResult<T> = Result<T, LingualError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
