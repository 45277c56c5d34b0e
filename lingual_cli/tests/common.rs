#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub const CONFIG: &str = r#"namespace = "nihongo"
data_root = "data"
extensions = ["furigana"]

[routes]
"nihongo.grammar" = "/nihongo/grammar/{slug}"

[quiz]
max_questions = 4
"#;

pub const TE_FORM_LESSON: &str = r#"---
title: "The ::bold{te} form"
summary: Joining verbs
level: 4
---
# Te form

Read [Particles](grammar:particles) first.

/i The te form joins clauses.\

:::note Remember the ||ru|| verbs. :::
"#;

pub const KEIGO_LESSON: &str = "---\ntitle: Keigo\n---\n# Keigo\n\n敬語[けいご] is polite speech.\n";

pub const CATEGORY_MAP: &str = r#"{ "Verbs": ["te-form", "missing"], "Manners": ["keigo"] }"#;

pub fn lingual_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("lingual"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("LINGUAL_LOG");
	cmd
}

/// A question bank with `count` questions in a single `drill` group.
pub fn question_bank(slug: &str, count: usize) -> String {
	let questions: Vec<String> = (1..=count)
		.map(|n| {
			format!(r#"{{ "question": "{slug} ::bold{{{n}}}", "options": ["a", "b"], "answer": 0 }}"#)
		})
		.collect();

	format!(
		r#"{{ "drill": {{ "title": "Drill", "bank": [{}] }} }}"#,
		questions.join(", ")
	)
}

/// Write a config plus a data root with two lessons and their banks.
pub fn write_project(root: &Path) -> std::io::Result<()> {
	let data = root.join("data");
	std::fs::create_dir_all(data.join("lessons"))?;
	std::fs::create_dir_all(data.join("quizzes"))?;

	std::fs::write(root.join("lingual.toml"), CONFIG)?;
	std::fs::write(data.join("map.json"), CATEGORY_MAP)?;
	std::fs::write(data.join("lessons/te-form.md"), TE_FORM_LESSON)?;
	std::fs::write(data.join("lessons/keigo.md"), KEIGO_LESSON)?;
	std::fs::write(data.join("quizzes/te-form.json"), question_bank("te-form", 3))?;
	std::fs::write(data.join("quizzes/keigo.json"), question_bank("keigo", 4))?;

	Ok(())
}
