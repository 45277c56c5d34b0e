use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use lingual_cli::Commands;
use lingual_cli::IndexFormat;
use lingual_cli::LessonFormat;
use lingual_cli::LingualCli;
use lingual_cli::QuizKindArg;
use lingual_core::Curriculum;
use lingual_core::LingualConfig;
use lingual_core::QuizKind;
use lingual_core::QuizQuestion;
use lingual_core::lint;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "LINGUAL_LOG";

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = LingualCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Lesson { slug, format }) => run_lesson(&args, slug, *format),
		Some(Commands::Index { format }) => run_index(&args, *format),
		Some(Commands::Bank { slug }) => run_bank(&args, slug),
		Some(Commands::Quiz {
			slugs,
			max,
			title,
			kind,
		}) => run_quiz(&args, slugs, *max, title.as_deref(), *kind),
		Some(Commands::Transform { file }) => run_transform(&args, file.as_deref()),
		Some(Commands::Lint { files }) => run_lint(files),
		None => {
			eprintln!("No subcommand specified. Run `lingual --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<lingual_core::LingualError>() {
			Ok(lingual_err) => {
				let report: miette::Report = (*lingual_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr. `--verbose` shows debug events, otherwise `LINGUAL_LOG`
/// decides and warnings are shown by default.
fn init_tracing(verbose: bool, use_color: bool) {
	let filter = if verbose {
		EnvFilter::new("debug")
	} else {
		EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
	};

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.init();
}

fn resolve_root(args: &LingualCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn load_curriculum(args: &LingualCli) -> Result<Curriculum, Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let curriculum = Curriculum::from_config(&root)?;

	if args.verbose {
		eprintln!(
			"Loaded curriculum from {} ({} rule(s): {})",
			root.display(),
			curriculum.pipeline().rules().len(),
			curriculum.pipeline().rule_names().join(", ")
		);
	}

	Ok(curriculum)
}

fn run_lesson(
	args: &LingualCli,
	slug: &str,
	format: LessonFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let lesson = load_curriculum(args)?.load(slug)?;

	match format {
		LessonFormat::Html => println!("{}", lesson.html_content),
		LessonFormat::Json => println!("{}", serde_json::to_string_pretty(&lesson)?),
	}

	Ok(())
}

fn run_index(args: &LingualCli, format: IndexFormat) -> Result<(), Box<dyn std::error::Error>> {
	let index = load_curriculum(args)?.get_lessons()?;

	if let IndexFormat::Json = format {
		println!("{}", serde_json::to_string_pretty(&index)?);
		return Ok(());
	}

	if index.is_empty() {
		println!("No lessons found. Add a map.json to the data root to list lessons.");
		return Ok(());
	}

	for (position, category) in index.iter().enumerate() {
		if position > 0 {
			println!();
		}
		println!("{}", colored!(category.category, bold));

		if category.lessons.is_empty() {
			println!("  (no lessons)");
		}

		for lesson in &category.lessons {
			println!("  {:<24} {}", lesson.slug, lesson.title);
		}
	}

	Ok(())
}

fn run_bank(args: &LingualCli, slug: &str) -> Result<(), Box<dyn std::error::Error>> {
	let Some(bank) = load_curriculum(args)?.load_quiz_data(slug)? else {
		return Err(format!("lesson `{slug}` has no quiz bank").into());
	};

	println!("{}", serde_json::to_string_pretty(&bank)?);
	Ok(())
}

/// The quiz payload handed to clients.
#[derive(Serialize)]
struct QuizSession<'a> {
	id: String,
	#[serde(rename = "type")]
	kind: QuizKind,
	title: &'a str,
	bank: &'a [QuizQuestion],
}

fn run_quiz(
	args: &LingualCli,
	slugs: &[String],
	max: Option<usize>,
	title: Option<&str>,
	kind: QuizKindArg,
) -> Result<(), Box<dyn std::error::Error>> {
	let curriculum = load_curriculum(args)?;
	let id = curriculum.start_quiz(kind.into(), slugs, max, title);
	let entry = curriculum.quizzes().entry(&id.to_string())?;

	if entry.payload.is_empty() {
		eprintln!(
			"{} no questions found for {}",
			colored!("warning:", yellow),
			slugs.join(", ")
		);
	}

	let session = QuizSession {
		id: entry.id.to_string(),
		kind: entry.kind,
		title: &entry.title,
		bank: &entry.payload.bank,
	};
	println!("{}", serde_json::to_string_pretty(&session)?);

	Ok(())
}

fn run_transform(args: &LingualCli, file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
	let text = match file {
		Some(path) => std::fs::read_to_string(path)?,
		None => {
			let mut buffer = String::new();
			std::io::stdin().read_to_string(&mut buffer)?;
			buffer
		}
	};

	let config = LingualConfig::load_or_default(&resolve_root(args))?;
	let pipeline = config.pipeline()?;
	print!("{}", pipeline.apply(&text));

	Ok(())
}

fn run_lint(files: &[PathBuf]) -> Result<(), Box<dyn std::error::Error>> {
	let mut total = 0;

	for file in files {
		let text = std::fs::read_to_string(file)?;
		for diagnostic in lint(&text) {
			total += 1;
			println!(
				"{}:{}: {} {}",
				file.display(),
				diagnostic.line,
				colored!("warning:", yellow),
				diagnostic.message()
			);
		}
	}

	if total > 0 {
		println!();
		println!(
			"{}",
			colored!(format!("{total} markup problem(s) found."), red)
		);
		process::exit(1);
	}

	println!(
		"{}",
		colored!(
			format!("No markup problems found in {} file(s).", files.len()),
			green
		)
	);

	Ok(())
}
