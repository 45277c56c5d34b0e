use std::io::ErrorKind;
use std::sync::Arc;

use derive_more::Deref;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::ContentSource;
use crate::LingualError;
use crate::LingualResult;
use crate::Pipeline;
use crate::Slug;

/// Key under each quiz group that holds its question list.
pub const BANK_KEY: &str = "bank";

/// A lesson's quiz groups, keyed by group id:
///
/// ```json
/// { "particles": { "title": "Particles", "bank": [{ "question": "..." }] } }
/// ```
///
/// Question records are opaque; only their string leaves are transformed.
#[derive(Debug, Clone, PartialEq, Deref, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionBank(serde_json::Map<String, Value>);

impl QuestionBank {
	pub fn new(groups: serde_json::Map<String, Value>) -> Self {
		Self(groups)
	}

	/// Each group id with its question list. Groups without a `bank` list are
	/// skipped.
	pub fn groups(&self) -> impl Iterator<Item = (&str, &[Value])> {
		self.0.iter().filter_map(|(group, value)| {
			value
				.get(BANK_KEY)
				.and_then(Value::as_array)
				.map(|questions| (group.as_str(), questions.as_slice()))
		})
	}

	/// Total number of questions across all groups.
	pub fn question_count(&self) -> usize {
		self.groups().map(|(_, questions)| questions.len()).sum()
	}

	pub fn into_inner(self) -> serde_json::Map<String, Value> {
		self.0
	}
}

/// Loads question banks and runs the transform pipeline over their text.
#[derive(Clone)]
pub struct QuizBankLoader {
	pipeline: Arc<Pipeline>,
	source: Arc<dyn ContentSource>,
}

impl QuizBankLoader {
	pub fn new(pipeline: Arc<Pipeline>, source: Arc<dyn ContentSource>) -> Self {
		Self { pipeline, source }
	}

	/// Load the bank for `slug`. Returns `Ok(None)` when the lesson has no
	/// bank, [`LingualError::InvalidSlug`] for a bad slug and
	/// [`LingualError::MalformedBank`] when the document is not UTF-8 or not a
	/// JSON object.
	pub fn load_quiz_data(&self, slug: &str) -> LingualResult<Option<QuestionBank>> {
		let slug = Slug::new(slug)?;
		let malformed = |reason: String| {
			LingualError::MalformedBank {
				slug: slug.to_string(),
				reason,
			}
		};

		let text = match self.source.read_quiz_bank(&slug) {
			Ok(Some(text)) => text,
			Ok(None) => return Ok(None),
			Err(LingualError::Io(e)) if e.kind() == ErrorKind::InvalidData => {
				return Err(malformed(e.to_string()));
			}
			Err(e) => return Err(e),
		};

		let value: Value = serde_json::from_str(&text).map_err(|e| malformed(e.to_string()))?;
		let Value::Object(groups) = value else {
			return Err(malformed("expected an object of quiz groups".to_string()));
		};

		let groups = groups
			.into_iter()
			.map(|(group, item)| (group, transform_strings(item, &self.pipeline)))
			.collect();

		Ok(Some(QuestionBank(groups)))
	}
}

/// Apply `pipeline` to every string leaf of `value`, at any depth. Object
/// keys, numbers, booleans and nulls are left untouched.
pub fn transform_strings(value: Value, pipeline: &Pipeline) -> Value {
	match value {
		Value::String(text) => Value::String(pipeline.apply(&text)),
		Value::Array(items) => {
			Value::Array(
				items
					.into_iter()
					.map(|item| transform_strings(item, pipeline))
					.collect(),
			)
		}
		Value::Object(map) => {
			Value::Object(
				map.into_iter()
					.map(|(key, item)| (key, transform_strings(item, pipeline)))
					.collect(),
			)
		}
		scalar => scalar,
	}
}
