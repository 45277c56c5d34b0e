use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use lingual_core::QuizKind;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Author, inspect and assemble lingual lesson content.",
	long_about = "lingual renders tutorial lessons written in lingual's lesson markup, builds \
	              the categorised lesson index and assembles randomised quizzes from per-lesson \
	              question banks.\n\nThe project root may contain a `lingual.toml` naming the \
	              routing namespace, the data root and the route templates used for \
	              cross-reference links.\n\nQuick start:\n  lingual index            List every \
	              lesson by category\n  lingual lesson te-form   Render a lesson to HTML\n  \
	              lingual quiz te-form     Assemble a quiz from a lesson's bank\n  lingual lint \
	              lesson.md   Check markup for common mistakes"
)]
pub struct LingualCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Load a lesson and print it.
	///
	/// Splits the lesson's front matter, runs the body through the transform
	/// pipeline and renders it as markdown. Fails when the slug is invalid,
	/// the lesson does not exist or its front matter is missing.
	Lesson {
		/// Slug of the lesson, e.g. `te-form`.
		slug: String,

		/// Output format. Use `html` for the rendered body only or `json` for
		/// the full lesson including title, summary, metadata and outline.
		#[arg(long, value_enum, default_value_t = LessonFormat::Html)]
		format: LessonFormat,
	},
	/// Print the lesson directory grouped by category.
	///
	/// Reads `map.json` from the data root and indexes every listed lesson.
	/// Lessons that are missing or have no metadata are skipped with a
	/// warning rather than failing the whole index.
	Index {
		/// Output format for the index. Use `text` for human-readable output
		/// or `json` for programmatic consumption.
		#[arg(long, value_enum, default_value_t = IndexFormat::Text)]
		format: IndexFormat,
	},
	/// Print a lesson's transformed question bank as JSON.
	Bank {
		/// Slug of the lesson whose bank should be loaded.
		slug: String,
	},
	/// Assemble a quiz from one or more lessons' question banks.
	///
	/// Questions from every bank are pooled, shuffled and capped. The quiz is
	/// stored in the session cache and printed together with its id.
	Quiz {
		/// Slugs of the lessons to draw questions from.
		#[arg(required = true)]
		slugs: Vec<String>,

		/// Maximum number of questions. Defaults to `[quiz] max_questions` from
		/// the config.
		#[arg(long)]
		max: Option<usize>,

		/// Title of the assembled quiz.
		#[arg(long)]
		title: Option<String>,

		/// The kind of quiz session to store.
		#[arg(long, value_enum, default_value_t = QuizKindArg::Grammar)]
		kind: QuizKindArg,
	},
	/// Run the transform pipeline over a file, or stdin, and print the result.
	///
	/// The output is the intermediate markup before markdown rendering. Useful
	/// for checking how cross-references resolve against the configured
	/// routes.
	Transform {
		/// File to transform. Reads stdin when omitted.
		file: Option<PathBuf>,
	},
	/// Check lesson files for unterminated notes, unbalanced spoilers and
	/// unclosed blocks.
	///
	/// Exits with a non-zero status code when any diagnostics are found.
	Lint {
		/// Lesson files to check.
		#[arg(required = true)]
		files: Vec<PathBuf>,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LessonFormat {
	/// The rendered HTML body.
	Html,
	/// The full lesson as JSON.
	Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum IndexFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum QuizKindArg {
	/// Grammar point drills.
	Grammar,
	/// Kanji readings and meanings.
	Kanji,
}

impl From<QuizKindArg> for QuizKind {
	fn from(kind: QuizKindArg) -> Self {
		match kind {
			QuizKindArg::Grammar => QuizKind::Grammar,
			QuizKindArg::Kanji => QuizKind::Kanji,
		}
	}
}
