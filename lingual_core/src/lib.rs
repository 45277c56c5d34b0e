//! `lingual_core` is the content engine behind lingual's language tutorials.
//! It turns lesson documents written in a small markup dialect into HTML,
//! indexes lessons by category, and assembles randomised quizzes from
//! per-lesson question banks.
//!
//! ## Processing Pipeline
//!
//! ```text
//! lessons/<slug>.md
//!   → Front matter split (YAML metadata + raw body)
//!   → Transform pipeline (links, quizzes, notes, formatting, blocks, spoilers, extensions)
//!   → Markdown renderer (GFM, raw HTML kept, heading ids added)
//!   → Lesson { slug, title, summary, content, meta, toc }
//! ```
//!
//! Question banks (`quizzes/<slug>.json`) pass through the same pipeline,
//! string leaf by string leaf, before being merged into an assembled quiz.
//!
//! ## Markup
//!
//! | Syntax                        | Output                                   |
//! | ----------------------------- | ---------------------------------------- |
//! | `[label](route:slug#anchor)`  | `<a href="...">label</a>`                |
//! | `~quizzes:lesson:quiz?k=v~`   | `<div class="quiz" data-...></div>`      |
//! | `/i text\`, `/w`, `/t`        | Info, warning and tip callout notes      |
//! | `::bold{t}`, `::red{t}`       | `<strong>`, `<em>` or a coloured `<span>`|
//! | `:::type content :::`         | `<div class="block type">`               |
//! | `\|\|hidden\|\|`              | `<span class="spoiler">`                 |
//!
//! ## Key Types
//!
//! - [`Pipeline`]: An ordered, immutable list of [`TransformRule`]s.
//! - [`Curriculum`]: One content domain: pipeline, storage and quiz cache.
//! - [`LessonLoader`]: Loads and renders a single [`Lesson`].
//! - [`LessonIndexBuilder`]: Builds the categorised lesson directory.
//! - [`QuizAssembler`]: Merges question banks into an [`AssembledQuiz`].
//! - [`QuizCache`]: Stores assembled quizzes behind opaque [`QuizId`]s.
//! - [`LingualConfig`]: Configuration loaded from `lingual.toml`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use lingual_core::Curriculum;
//! use lingual_core::QuizKind;
//!
//! let curriculum = Curriculum::from_config(Path::new(".")).unwrap();
//! let lesson = curriculum.load("te-form").unwrap();
//! println!("{}", lesson.html_content);
//!
//! let id = curriculum.start_quiz(QuizKind::Grammar, &["te-form"], None, None);
//! let quiz = curriculum.quizzes().fetch(&id.to_string()).unwrap();
//! println!("{} questions", quiz.len());
//! ```

pub use assemble::*;
pub use bank::*;
pub use cache::*;
pub use config::*;
pub use curriculum::*;
pub use error::*;
pub use front_matter::*;
pub use index::*;
pub use lesson::*;
pub use lint::*;
pub use pipeline::*;
pub use progress::*;
pub use render::*;
pub use routes::*;
pub use rules::*;
pub use slug::*;
pub use source::*;

mod assemble;
mod bank;
mod cache;
pub mod config;
mod curriculum;
#[allow(unused_assignments)]
mod error;
mod front_matter;
mod index;
mod lesson;
pub mod lint;
mod pipeline;
mod progress;
mod render;
mod routes;
pub mod rules;
mod slug;
pub mod source;

#[cfg(test)]
mod __fixtures;
