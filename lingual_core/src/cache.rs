use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::AssembledQuiz;
use crate::LingualError;
use crate::LingualResult;

/// Opaque identifier handed to clients in place of a quiz payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuizId(Uuid);

impl QuizId {
	/// Mint a fresh identifier from 128 random bits. No version or variant
	/// bits are reserved, so ids are not RFC 4122 version 4 uuids.
	pub fn random() -> Self {
		Self(Uuid::from_bytes(rand::random()))
	}

	/// Parse an identifier in either hyphenated or simple form.
	pub fn parse(value: &str) -> Option<Self> {
		Uuid::parse_str(value.trim()).ok().map(Self)
	}
}

impl fmt::Display for QuizId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&self.0, f)
	}
}

/// The kind of quiz a session was assembled for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum QuizKind {
	#[default]
	Grammar,
	Kanji,
}

impl QuizKind {
	pub fn label(self) -> &'static str {
		match self {
			Self::Grammar => "Grammar",
			Self::Kanji => "Kanji",
		}
	}

	pub fn description(self) -> &'static str {
		match self {
			Self::Grammar => "Collate quizzes on grammar points, customisable by your preference.",
			Self::Kanji => "Quizzes on kanji characters, including readings and meanings.",
		}
	}
}

impl fmt::Display for QuizKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// A stored quiz session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizCacheEntry {
	pub id: QuizId,
	#[serde(rename = "type")]
	pub kind: QuizKind,
	pub title: String,
	pub payload: AssembledQuiz,
}

/// Process-local store of assembled quizzes keyed by [`QuizId`].
///
/// Entries live until the process exits; nothing is evicted.
#[derive(Debug, Default)]
pub struct QuizCache {
	entries: Mutex<HashMap<QuizId, QuizCacheEntry>>,
}

impl QuizCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Store a grammar quiz and return its identifier.
	pub fn store(&self, quiz: AssembledQuiz) -> QuizId {
		self.store_as(QuizKind::default(), quiz)
	}

	/// Store `quiz` as a session of `kind` and return its identifier.
	pub fn store_as(&self, kind: QuizKind, quiz: AssembledQuiz) -> QuizId {
		let mut entries = self.lock();
		let id = loop {
			let id = QuizId::random();
			if !entries.contains_key(&id) {
				break id;
			}
		};

		tracing::debug!(%id, %kind, questions = quiz.len(), "stored quiz session");
		entries.insert(
			id,
			QuizCacheEntry {
				id,
				kind,
				title: quiz.title.clone(),
				payload: quiz,
			},
		);

		id
	}

	/// Look up the quiz stored under `id`.
	pub fn fetch(&self, id: &str) -> LingualResult<AssembledQuiz> {
		self.entry(id).map(|entry| entry.payload)
	}

	/// Look up the whole session entry stored under `id`.
	pub fn entry(&self, id: &str) -> LingualResult<QuizCacheEntry> {
		let not_found = || LingualError::QuizNotFound(id.to_string());
		let key = QuizId::parse(id).ok_or_else(not_found)?;

		self.lock().get(&key).cloned().ok_or_else(not_found)
	}

	pub fn len(&self) -> usize {
		self.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.lock().is_empty()
	}

	fn lock(&self) -> MutexGuard<'_, HashMap<QuizId, QuizCacheEntry>> {
		self.entries.lock().unwrap_or_else(PoisonError::into_inner)
	}
}
