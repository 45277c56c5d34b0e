use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::LazyLock;

use markdown::CompileOptions;
use markdown::Options;
use markdown::ParseOptions;
use regex::Captures;
use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

use crate::LingualError;
use crate::LingualResult;

static HEADING_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?s)<h([1-6])>(.*?)</h[1-6]>").expect("heading pattern is valid"));

static TAG_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"));

/// One heading in a rendered lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
	pub level: u8,
	pub id: String,
	pub text: String,
}

/// Rendered HTML together with its heading outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedHtml {
	pub html: String,
	pub toc: Vec<TocEntry>,
}

/// Markdown options used for lesson bodies: GitHub flavoured markdown
/// (tables, fenced code, strikethrough, autolinks) with raw HTML passed
/// through, since the transform pipeline emits HTML.
pub fn markdown_options() -> Options {
	Options {
		parse: ParseOptions::gfm(),
		compile: CompileOptions {
			allow_dangerous_html: true,
			..CompileOptions::gfm()
		},
	}
}

/// Render markdown to HTML and give every heading a unique anchor id.
pub fn render_markdown(text: &str) -> LingualResult<RenderedHtml> {
	let html = markdown::to_html_with_options(text, &markdown_options())
		.map_err(|message| LingualError::Markdown(message.to_string()))?;

	Ok(add_heading_ids(&html))
}

/// Add `id` attributes to bare `<hN>` tags and collect the outline.
pub fn add_heading_ids(html: &str) -> RenderedHtml {
	let mut toc = Vec::new();
	let mut counters: HashMap<String, usize> = HashMap::new();
	let mut emitted: HashSet<String> = HashSet::new();

	let html = HEADING_RE
		.replace_all(html, |caps: &Captures<'_>| {
			let level = &caps[1];
			let inner = &caps[2];
			let text = TAG_RE.replace_all(inner, "").trim().to_string();
			let id = unique_id(slugify(&text), &mut counters, &mut emitted);

			toc.push(TocEntry {
				level: level.parse().unwrap_or(1),
				id: id.clone(),
				text,
			});

			format!(r#"<h{level} id="{id}">{inner}</h{level}>"#)
		})
		.into_owned();

	RenderedHtml { html, toc }
}

/// Suffix `base` with `-N` until it differs from every id already emitted,
/// including ids that came from headings whose text ends in a number.
fn unique_id(
	base: String,
	counters: &mut HashMap<String, usize>,
	emitted: &mut HashSet<String>,
) -> String {
	let count = counters.entry(base.clone()).or_insert(0);
	let mut id = if *count == 0 {
		base.clone()
	} else {
		format!("{base}-{count}")
	};

	while emitted.contains(&id) {
		*count += 1;
		id = format!("{base}-{count}");
	}

	*count += 1;
	emitted.insert(id.clone());
	id
}

/// Lowercase `text` and join its alphanumeric runs with hyphens. Letters
/// outside ASCII are kept so that Japanese headings still get an anchor.
pub fn slugify(text: &str) -> String {
	let slug = text
		.chars()
		.map(|c| {
			if c.is_alphanumeric() {
				c.to_lowercase().next().unwrap_or(c)
			} else {
				'-'
			}
		})
		.collect::<String>()
		.split('-')
		.filter(|s| !s.is_empty())
		.collect::<Vec<_>>()
		.join("-");

	if slug.is_empty() {
		"section".to_string()
	} else {
		slug
	}
}
