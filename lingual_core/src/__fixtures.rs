use std::cell::RefCell;
use std::path::Path;

use crate::Curriculum;
use crate::MemoryContentSource;
use crate::Pipeline;
use crate::ProgressRecorder;
use crate::QuizOutcome;
use crate::RouteTable;

pub const NAMESPACE: &str = "nihongo";

pub const TE_FORM_LESSON: &str = r#"---
title: "The ::bold{te} form"
summary: "Joining verbs with [て](grammar:te-form)"
level: 4
---
# Te form

Visit [Particles](grammar:particles#wa) before starting.

/i The te form joins clauses.\

:::note /t Remember the ::bold{ru} verbs.\ :::

| Verb | Te form |
| ---- | ------- |
| 食べる | 食べて |

~quizzes:te-form:drill?mode=timed~
"#;

pub const KEIGO_LESSON: &str = "---\nsummary: Polite speech\n---\n:::tip Use ||desu|| forms. :::\n";

pub const NO_META_LESSON: &str = "# No metadata here\n";

pub const EMPTY_META_LESSON: &str = "---\n---\nBody only\n";

pub const CATEGORY_MAP: &str = r#"{
	"Verbs": ["te-form", "missing", "no-meta", "empty-meta"],
	"Manners": ["keigo"],
	"Broken": ["../secret"]
}"#;

pub fn sample_routes() -> RouteTable {
	RouteTable::new()
		.with_route("nihongo.grammar", "/nihongo/grammar/{slug}")
		.with_route("nihongo.lessons", "/nihongo/lessons/{slug}")
		.with_route("nihongo.home", "/nihongo/")
}

pub fn sample_pipeline() -> Pipeline {
	Pipeline::builder(NAMESPACE).routes(sample_routes()).build()
}

/// A question bank whose question text is `<slug>-<group>-<n>` so tests can
/// check the source tags.
pub fn question_bank(slug: &str, groups: &[(&str, usize)]) -> String {
	let groups: serde_json::Map<String, serde_json::Value> = groups
		.iter()
		.map(|(group, count)| {
			let bank: Vec<serde_json::Value> = (1..=*count)
				.map(|n| {
					serde_json::json!({
						"question": format!("{slug}-{group}-{n}"),
						"options": ["a", "b", "c"],
						"answer": n % 3,
					})
				})
				.collect();
			(
				(*group).to_string(),
				serde_json::json!({ "title": "::bold{Drill}", "bank": bank }),
			)
		})
		.collect();

	serde_json::Value::Object(groups).to_string()
}

pub fn sample_source() -> MemoryContentSource {
	MemoryContentSource::new()
		.with_lesson("te-form", TE_FORM_LESSON)
		.with_lesson("keigo", KEIGO_LESSON)
		.with_lesson("no-meta", NO_META_LESSON)
		.with_lesson("empty-meta", EMPTY_META_LESSON)
		.with_quiz_bank("te-form", question_bank("te-form", &[("conjugation", 3)]))
		.with_quiz_bank(
			"keigo",
			question_bank("keigo", &[("honorific", 2), ("humble", 2)]),
		)
		.with_quiz_bank("broken", "[1, 2, 3]")
		.with_category_map(CATEGORY_MAP)
}

pub fn sample_curriculum() -> Curriculum {
	Curriculum::new(sample_pipeline(), sample_source())
}

/// Lay out a data root on disk with one lesson, one bank and a category map.
pub fn write_data_root(root: &Path) {
	let write = |relative: &str, content: &str| {
		let path = root.join(relative);
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent).unwrap_or_else(|e| panic!("mkdir: {e}"));
		}
		std::fs::write(&path, content).unwrap_or_else(|e| panic!("write: {e}"));
	};

	write("lessons/te-form.md", TE_FORM_LESSON);
	write("quizzes/te-form.json", &question_bank("te-form", &[("conjugation", 3)]));
	write("map.json", r#"{ "Verbs": ["te-form"] }"#);
}

/// Progress recorder that keeps every outcome it is given.
#[derive(Default)]
pub struct RecordingRecorder {
	pub outcomes: RefCell<Vec<QuizOutcome>>,
}

impl ProgressRecorder for RecordingRecorder {
	fn record(&self, outcome: &QuizOutcome) {
		self.outcomes.borrow_mut().push(outcome.clone());
	}
}
