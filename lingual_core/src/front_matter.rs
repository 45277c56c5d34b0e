use serde::Serialize;
use serde_json::Value;

use crate::LingualError;
use crate::LingualResult;
use crate::Slug;

/// Metadata mapping parsed from a document's front matter. Key order follows
/// the source document.
pub type Metadata = serde_json::Map<String, Value>;

const DELIMITER: &str = "---";

/// A raw lesson document: front matter metadata plus the unrendered body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceDocument {
	pub slug: Slug,
	pub metadata: Metadata,
	pub body: String,
}

impl SourceDocument {
	/// Split `text` into metadata and body.
	///
	/// Fails when the document does not open with a `---` delimited block, when
	/// the block is never closed, or when it is not a YAML mapping. An empty
	/// block yields empty metadata.
	pub fn parse(slug: Slug, text: &str) -> LingualResult<Self> {
		let Some((header, body)) = split_front_matter(text) else {
			return Err(LingualError::FrontMatter {
				slug: slug.to_string(),
				reason: "missing front matter".to_string(),
			});
		};

		let metadata = parse_metadata(header).map_err(|reason| {
			LingualError::FrontMatter {
				slug: slug.to_string(),
				reason,
			}
		})?;

		Ok(Self {
			slug,
			metadata,
			body: body.to_string(),
		})
	}

	/// Text value of a metadata field. Numbers and booleans are stringified;
	/// nulls, lists and mappings are treated as absent.
	pub fn field(&self, key: &str) -> Option<String> {
		metadata_text(&self.metadata, key)
	}
}

/// Split a document into its front matter block and body. Returns `None` when
/// the document has no complete front matter block.
pub fn split_front_matter(text: &str) -> Option<(&str, &str)> {
	let text = text.strip_prefix('\u{feff}').unwrap_or(text);
	let (first, rest) = text.split_once('\n').unwrap_or((text, ""));
	if first.trim_end() != DELIMITER {
		return None;
	}

	let mut offset = 0;
	for line in rest.split_inclusive('\n') {
		if line.trim_end() == DELIMITER {
			let header = &rest[..offset];
			let body = &rest[offset + line.len()..];
			return Some((header, body));
		}
		offset += line.len();
	}

	None
}

fn parse_metadata(header: &str) -> Result<Metadata, String> {
	if header.trim().is_empty() {
		return Ok(Metadata::new());
	}

	let value: Value = serde_yaml_ng::from_str(header).map_err(|e| e.to_string())?;

	match value {
		Value::Object(map) => Ok(map),
		Value::Null => Ok(Metadata::new()),
		other => Err(format!("expected a mapping, found {}", kind_of(&other))),
	}
}

fn kind_of(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "a list",
		Value::Object(_) => "a mapping",
	}
}

pub(crate) fn metadata_text(metadata: &Metadata, key: &str) -> Option<String> {
	match metadata.get(key)? {
		Value::String(text) => Some(text.clone()),
		Value::Number(number) => Some(number.to_string()),
		Value::Bool(flag) => Some(flag.to_string()),
		_ => None,
	}
}
