use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::DEFAULT_LESSON_EXTENSION;
use crate::LingualError;
use crate::LingualResult;
use crate::Pipeline;
use crate::RouteTable;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["lingual.toml", ".lingual.toml", ".config/lingual.toml"];

/// Namespace used when the config does not name one.
pub const DEFAULT_NAMESPACE: &str = "tutorial";

/// Default cap on the number of questions in an assembled quiz.
pub const DEFAULT_MAX_QUESTIONS: usize = 20;

/// Configuration loaded from a `lingual.toml` file.
///
/// ```toml
/// namespace = "nihongo"
/// data_root = "data/grammar"
/// lesson_extension = "md"
/// extensions = ["furigana"]
///
/// [routes]
/// "nihongo.grammar" = "/nihongo/grammar/{slug}"
/// "nihongo.lessons" = "/nihongo/lessons/{slug}"
///
/// [quiz]
/// max_questions = 20
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct LingualConfig {
	/// Routing namespace prefixed to cross-reference route names.
	#[serde(default = "default_namespace")]
	pub namespace: String,
	/// Directory holding `lessons/`, `quizzes/` and `map.json`, relative to
	/// the config root.
	#[serde(default = "default_data_root")]
	pub data_root: PathBuf,
	/// File extension of lesson documents.
	#[serde(default = "default_lesson_extension")]
	pub lesson_extension: String,
	/// Extension rule sets appended after the base rules, by name.
	#[serde(default)]
	pub extensions: Vec<String>,
	/// Endpoint name to path template. `{slug}` is replaced by the slug;
	/// templates without it get `?slug=` appended.
	#[serde(default)]
	pub routes: HashMap<String, String>,
	#[serde(default)]
	pub quiz: QuizConfig,
}

/// Quiz assembly defaults.
///
/// ```toml
/// [quiz]
/// max_questions = 10
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct QuizConfig {
	/// Cap used when the caller does not request a size.
	#[serde(default = "default_max_questions")]
	pub max_questions: usize,
}

impl Default for QuizConfig {
	fn default() -> Self {
		Self {
			max_questions: DEFAULT_MAX_QUESTIONS,
		}
	}
}

impl Default for LingualConfig {
	fn default() -> Self {
		Self {
			namespace: default_namespace(),
			data_root: default_data_root(),
			lesson_extension: default_lesson_extension(),
			extensions: Vec::new(),
			routes: HashMap::new(),
			quiz: QuizConfig::default(),
		}
	}
}

fn default_namespace() -> String {
	DEFAULT_NAMESPACE.to_string()
}

fn default_data_root() -> PathBuf {
	PathBuf::from(".")
}

fn default_lesson_extension() -> String {
	DEFAULT_LESSON_EXTENSION.to_string()
}

fn default_max_questions() -> usize {
	DEFAULT_MAX_QUESTIONS
}

impl LingualConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if the file does not exist.
	pub fn load(root: &Path) -> LingualResult<Option<LingualConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: LingualConfig =
			toml::from_str(&content).map_err(|e| LingualError::ConfigParse(e.to_string()))?;

		tracing::debug!(path = %config_path.display(), namespace = %config.namespace, "loaded config");
		Ok(Some(config))
	}

	/// Like [`Self::load`], falling back to defaults when no file exists.
	pub fn load_or_default(root: &Path) -> LingualResult<LingualConfig> {
		Ok(Self::load(root)?.unwrap_or_default())
	}

	/// The data root resolved against the config root.
	pub fn data_root_in(&self, root: &Path) -> PathBuf {
		root.join(&self.data_root)
	}

	pub fn route_table(&self) -> RouteTable {
		self.routes
			.iter()
			.map(|(endpoint, template)| (endpoint.clone(), template.clone()))
			.collect()
	}

	/// Build the transform pipeline this config describes.
	pub fn pipeline(&self) -> LingualResult<Pipeline> {
		Ok(Pipeline::builder(self.namespace.clone())
			.routes(self.route_table())
			.with_extensions(&self.extensions)?
			.build())
	}
}
