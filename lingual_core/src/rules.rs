use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::LazyLock;

use regex::Captures;
use regex::Regex;

use crate::LingualError;
use crate::LingualResult;
use crate::RouteResolver;
use crate::RouteTable;

/// `[label](route:slug#anchor)`, anchor optional.
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\[([^\]]+)\]\((\w+):([\w\-]+)(?:#([\w\-]+))?\)").expect("link pattern is valid")
});

/// `~quizzes:lesson:quiz?key=value&flag~`, query optional.
static QUIZ_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"~quizzes:([\w\-]+):([\w\-]+)(?:\?([^~]+))?~").expect("quiz pattern is valid")
});

/// `/i text\`, `/w text\` or `/t text\`.
static NOTE_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?s)/([iwt])\s+(.*?)\\").expect("note pattern is valid"));

/// `::bold{text}`, `::italic{text}`, `::red{text}` or `::#f00{text}`.
static FORMAT_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"::([a-zA-Z]+|#[0-9a-fA-F]{3,6})\{([^}]+)\}").expect("format pattern is valid")
});

/// `:::type content :::`, may span lines.
static BLOCK_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?s):::(\w+)\s+(.*?):::").expect("block pattern is valid"));

/// `||hidden||`.
static SPOILER_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?s)\|\|(.*?)\|\|").expect("spoiler pattern is valid"));

/// `漢字[かんじ]`: a run of ideographs followed by its reading.
static FURIGANA_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"([\x{4E00}-\x{9FAF}々]+)\[([^\]]+)\]").expect("furigana pattern is valid")
});

/// State every rewriter may read. Rewriters never mutate it.
#[derive(Clone)]
pub struct RuleContext {
	/// Routing namespace prefixed to cross-reference route names.
	pub namespace: String,
	/// Resolver used to turn `<namespace>.<route>` plus a slug into an href.
	pub routes: Arc<dyn RouteResolver>,
}

impl RuleContext {
	pub fn new(namespace: impl Into<String>, routes: Arc<dyn RouteResolver>) -> Self {
		Self {
			namespace: namespace.into(),
			routes,
		}
	}

	/// The endpoint name for a route within this context's namespace.
	pub fn endpoint(&self, route: &str) -> String {
		format!("{}.{route}", self.namespace)
	}
}

impl fmt::Debug for RuleContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RuleContext")
			.field("namespace", &self.namespace)
			.finish_non_exhaustive()
	}
}

impl Default for RuleContext {
	fn default() -> Self {
		Self::new(String::new(), Arc::new(RouteTable::new()))
	}
}

/// Signature shared by every rule's rewriter.
pub type Rewrite = dyn Fn(&Captures<'_>, &RuleContext) -> String + Send + Sync;

/// One pattern-match and rewrite pass.
#[derive(Clone)]
pub struct TransformRule {
	name: Cow<'static, str>,
	pattern: Regex,
	rewrite: Arc<Rewrite>,
}

impl TransformRule {
	pub fn new<F>(name: impl Into<Cow<'static, str>>, pattern: Regex, rewrite: F) -> Self
	where
		F: Fn(&Captures<'_>, &RuleContext) -> String + Send + Sync + 'static,
	{
		Self {
			name: name.into(),
			pattern,
			rewrite: Arc::new(rewrite),
		}
	}

	/// Compile `pattern` and build a rule from it.
	pub fn from_pattern<F>(
		name: impl Into<Cow<'static, str>>,
		pattern: &str,
		rewrite: F,
	) -> LingualResult<Self>
	where
		F: Fn(&Captures<'_>, &RuleContext) -> String + Send + Sync + 'static,
	{
		let name = name.into();
		let pattern = Regex::new(pattern).map_err(|e| {
			LingualError::InvalidPattern {
				name: name.to_string(),
				reason: e.to_string(),
			}
		})?;

		Ok(Self::new(name, pattern, rewrite))
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn pattern(&self) -> &Regex {
		&self.pattern
	}

	/// Rewrite every non-overlapping match in `text`. Text without a match is
	/// returned borrowed.
	pub fn apply<'t>(&self, text: &'t str, ctx: &RuleContext) -> Cow<'t, str> {
		self.pattern
			.replace_all(text, |caps: &Captures<'_>| (self.rewrite)(caps, ctx))
	}
}

impl fmt::Debug for TransformRule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TransformRule")
			.field("name", &self.name)
			.field("pattern", &self.pattern.as_str())
			.finish()
	}
}

/// The base rules in the order they run.
pub fn base_rules() -> Vec<TransformRule> {
	vec![
		link_rule(),
		quiz_rule(),
		note_rule(),
		format_rule(),
		block_rule(),
		spoiler_rule(),
	]
}

pub fn link_rule() -> TransformRule {
	TransformRule::new("links", LINK_RE.clone(), rewrite_link)
}

pub fn quiz_rule() -> TransformRule {
	TransformRule::new("quizzes", QUIZ_RE.clone(), rewrite_quiz)
}

pub fn note_rule() -> TransformRule {
	TransformRule::new("notes", NOTE_RE.clone(), rewrite_note)
}

pub fn format_rule() -> TransformRule {
	TransformRule::new("formatting", FORMAT_RE.clone(), rewrite_format)
}

pub fn block_rule() -> TransformRule {
	TransformRule::new("blocks", BLOCK_RE.clone(), rewrite_block)
}

pub fn spoiler_rule() -> TransformRule {
	TransformRule::new("spoilers", SPOILER_RE.clone(), rewrite_spoiler)
}

/// Ruby annotation for Japanese lessons: `漢字[かんじ]` becomes
/// `<ruby>漢字<rt>かんじ</rt></ruby>`.
pub fn furigana_rule() -> TransformRule {
	TransformRule::new("furigana", FURIGANA_RE.clone(), rewrite_furigana)
}

fn rewrite_link(caps: &Captures<'_>, ctx: &RuleContext) -> String {
	let label = &caps[1];
	let route = &caps[2];
	let slug = &caps[3];
	let endpoint = ctx.endpoint(route);

	let href = match ctx.routes.resolve(&endpoint, slug) {
		Some(mut href) => {
			if let Some(anchor) = caps.get(4) {
				href.push('#');
				href.push_str(anchor.as_str());
			}
			href
		}
		None => {
			tracing::warn!(%endpoint, route, slug, "failed to build url for cross-reference");
			"#".to_string()
		}
	};

	format!(r#"<a href="{href}">{label}</a>"#)
}

fn rewrite_quiz(caps: &Captures<'_>, _ctx: &RuleContext) -> String {
	let lesson = &caps[1];
	let quiz = &caps[2];
	let mut attrs = String::new();

	if let Some(params) = caps.get(3) {
		for param in params.as_str().split('&').filter(|p| !p.is_empty()) {
			let (key, value) = param.split_once('=').unwrap_or((param, "true"));
			if !is_attribute_key(key) {
				tracing::debug!(lesson, quiz, key, "dropping inline quiz parameter");
				continue;
			}
			attrs.push_str(&format!(r#" data-{key}="{}""#, escape_html(value)));
		}
	}

	format!(r#"<div class="quiz" data-lesson="{lesson}" data-id="{quiz}"{attrs}></div>"#)
}

fn is_attribute_key(key: &str) -> bool {
	!key.is_empty()
		&& key
			.bytes()
			.all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// The kind of a `/x text\` callout note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
	Info,
	Warning,
	Tip,
	/// Any marker without a dedicated style.
	Other,
}

impl NoteKind {
	pub fn from_marker(marker: &str) -> Self {
		match marker {
			"i" => Self::Info,
			"w" => Self::Warning,
			"t" => Self::Tip,
			_ => Self::Other,
		}
	}

	pub fn css_class(self) -> &'static str {
		match self {
			Self::Info | Self::Other => "info",
			Self::Warning => "warning",
			Self::Tip => "tip",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Self::Info => "Info",
			Self::Warning => "Warning",
			Self::Tip => "Tip",
			Self::Other => "Note",
		}
	}
}

fn rewrite_note(caps: &Captures<'_>, _ctx: &RuleContext) -> String {
	let kind = NoteKind::from_marker(&caps[1]);
	let content = &caps[2];

	format!(
		"\n<div class=\"note {}\"><strong class=\"label\">{}:</strong><p>{content}</p></div>\n",
		kind.css_class(),
		kind.label()
	)
}

fn rewrite_format(caps: &Captures<'_>, _ctx: &RuleContext) -> String {
	let token = &caps[1];
	// The only rule that escapes: inline formatting may wrap arbitrary text.
	let content = escape_html(&caps[2]);

	if token.eq_ignore_ascii_case("bold") {
		format!("<strong>{content}</strong>")
	} else if token.eq_ignore_ascii_case("italic") {
		format!("<em>{content}</em>")
	} else {
		format!(r#"<span style="color:{token}">{content}</span>"#)
	}
}

fn rewrite_block(caps: &Captures<'_>, _ctx: &RuleContext) -> String {
	format!(r#"<div class="block {}">{}</div>"#, &caps[1], &caps[2])
}

fn rewrite_spoiler(caps: &Captures<'_>, _ctx: &RuleContext) -> String {
	format!(
		r#"<span class="spoiler" title="Click to reveal">{}</span>"#,
		&caps[1]
	)
}

fn rewrite_furigana(caps: &Captures<'_>, _ctx: &RuleContext) -> String {
	format!("<ruby>{}<rt>{}</rt></ruby>", &caps[1], &caps[2])
}

/// Escape text for embedding in HTML element content or a quoted attribute.
pub fn escape_html(text: &str) -> Cow<'_, str> {
	if !text.contains(['&', '<', '>', '"', '\'']) {
		return Cow::Borrowed(text);
	}

	let mut escaped = String::with_capacity(text.len() + 16);
	for ch in text.chars() {
		match ch {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&#34;"),
			'\'' => escaped.push_str("&#39;"),
			_ => escaped.push(ch),
		}
	}
	Cow::Owned(escaped)
}

/// Named rule sets a content domain can append after the base rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Extension {
	/// Ruby annotations for Japanese lessons.
	Furigana,
}

impl Extension {
	pub fn name(self) -> &'static str {
		match self {
			Self::Furigana => "furigana",
		}
	}

	pub fn rules(self) -> Vec<TransformRule> {
		match self {
			Self::Furigana => vec![furigana_rule()],
		}
	}
}

impl FromStr for Extension {
	type Err = LingualError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"furigana" => Ok(Self::Furigana),
			_ => Err(LingualError::UnknownExtension(s.to_string())),
		}
	}
}
