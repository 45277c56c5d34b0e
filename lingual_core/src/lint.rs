use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static NOTE_START_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^/[iwt]\s+").expect("note start pattern is valid"));
static BLOCK_OPEN_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r":::(\w+)\s").expect("block open pattern is valid"));
const BLOCK_FENCE: &str = ":::";
const SPOILER_FENCE: &str = "||";

/// The kind of problem found in lesson markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum MarkupDiagnosticKind {
	/// A `/i`, `/w` or `/t` line that does not end with a backslash.
	UnterminatedNote,
	/// An odd number of `||` markers.
	UnbalancedSpoiler { markers: usize },
	/// A `:::type` block with no closing `:::`.
	UnclosedBlock { block: String },
	/// A `:::type` block whose closing fence opens another block, which then
	/// renders as literal text.
	NestedBlock { outer: String, inner: String },
}

/// A problem found in lesson markup. These never stop a lesson from
/// rendering; unmatched syntax is left as literal text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkupDiagnostic {
	#[serde(flatten)]
	pub kind: MarkupDiagnosticKind,
	/// 1-indexed line number.
	pub line: usize,
}

impl MarkupDiagnostic {
	/// Human-readable message for this diagnostic.
	pub fn message(&self) -> String {
		match &self.kind {
			MarkupDiagnosticKind::UnterminatedNote => {
				"note lines (`/i`, `/w`, `/t`) should end with a backslash (`\\`)".to_string()
			}
			MarkupDiagnosticKind::UnbalancedSpoiler { markers } => {
				format!("unbalanced spoiler markers (`||`): found {markers}, expected an even count")
			}
			MarkupDiagnosticKind::UnclosedBlock { block } => {
				format!("block `:::{block}` is missing a closing `:::`")
			}
			MarkupDiagnosticKind::NestedBlock { outer, inner } => {
				format!("block `:::{outer}` is closed by the opener of `:::{inner}`; close it with `:::` first")
			}
		}
	}
}

/// Check lesson markup for unterminated notes, unbalanced spoilers, unclosed
/// blocks and blocks nested inside one another. Diagnostics are ordered by
/// line.
pub fn lint(text: &str) -> Vec<MarkupDiagnostic> {
	let mut diagnostics = Vec::new();

	for (index, line) in text.lines().enumerate() {
		if NOTE_START_RE.is_match(line) && !line.trim_end().ends_with('\\') {
			diagnostics.push(MarkupDiagnostic {
				kind: MarkupDiagnosticKind::UnterminatedNote,
				line: index + 1,
			});
		}
	}

	let spoilers: Vec<usize> = text.match_indices(SPOILER_FENCE).map(|(i, _)| i).collect();
	if let Some(&last) = spoilers.last().filter(|_| spoilers.len() % 2 == 1) {
		diagnostics.push(MarkupDiagnostic {
			kind: MarkupDiagnosticKind::UnbalancedSpoiler {
				markers: spoilers.len(),
			},
			line: line_of(text, last),
		});
	}

	// Blocks close at the first `:::` after their opener, as in rendering.
	let mut offset = 0;
	while let Some(caps) = BLOCK_OPEN_RE.captures_at(text, offset) {
		let Some(opener) = caps.get(0) else {
			break;
		};
		match text[opener.end()..].find(BLOCK_FENCE) {
			Some(close) => {
				let fence = opener.end() + close;
				offset = fence + BLOCK_FENCE.len();

				let inner: String = text[offset..]
					.chars()
					.take_while(|c| c.is_alphanumeric() || *c == '_')
					.collect();
				if !inner.is_empty() {
					diagnostics.push(MarkupDiagnostic {
						kind: MarkupDiagnosticKind::NestedBlock {
							outer: caps[1].to_string(),
							inner,
						},
						line: line_of(text, fence),
					});
				}
			}
			None => {
				diagnostics.push(MarkupDiagnostic {
					kind: MarkupDiagnosticKind::UnclosedBlock {
						block: caps[1].to_string(),
					},
					line: line_of(text, opener.start()),
				});
				offset = opener.end();
			}
		}
	}

	diagnostics.sort_by_key(|diagnostic| diagnostic.line);
	diagnostics
}

fn line_of(text: &str, offset: usize) -> usize {
	text[..offset].matches('\n').count() + 1
}
