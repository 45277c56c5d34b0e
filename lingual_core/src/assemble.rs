use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::QuestionBank;
use crate::QuizBankLoader;

/// Title given to an assembled quiz unless one is set.
pub const DEFAULT_QUIZ_TITLE: &str = "Quiz";

/// A question copied out of a lesson's bank, tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
	/// Slug of the lesson whose bank held the question.
	pub source_lesson: String,
	/// Group id within that bank.
	pub source_group: String,
	/// The question record as stored in the bank.
	#[serde(flatten)]
	pub record: serde_json::Map<String, Value>,
}

/// A randomised selection of questions drawn from one or more banks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssembledQuiz {
	pub title: String,
	pub bank: Vec<QuizQuestion>,
}

impl AssembledQuiz {
	pub fn new(bank: Vec<QuizQuestion>) -> Self {
		Self {
			title: DEFAULT_QUIZ_TITLE.to_string(),
			bank,
		}
	}

	#[must_use]
	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = title.into();
		self
	}

	pub fn len(&self) -> usize {
		self.bank.len()
	}

	pub fn is_empty(&self) -> bool {
		self.bank.is_empty()
	}
}

/// Merges the banks of several lessons into one quiz.
#[derive(Clone)]
pub struct QuizAssembler {
	banks: QuizBankLoader,
}

impl QuizAssembler {
	pub fn new(banks: QuizBankLoader) -> Self {
		Self { banks }
	}

	/// Build a quiz of at most `max_questions` questions drawn uniformly at
	/// random from the banks of `slugs`.
	///
	/// Lessons without a bank, or whose bank fails to load, are skipped. When
	/// fewer questions are available than requested, all of them are used.
	pub fn build_quiz<S: AsRef<str>>(&self, slugs: &[S], max_questions: usize) -> AssembledQuiz {
		self.build_quiz_with_rng(slugs, max_questions, &mut rand::thread_rng())
	}

	/// [`Self::build_quiz`] with a caller supplied random source.
	pub fn build_quiz_with_rng<S, R>(
		&self,
		slugs: &[S],
		max_questions: usize,
		rng: &mut R,
	) -> AssembledQuiz
	where
		S: AsRef<str>,
		R: Rng + ?Sized,
	{
		let mut pool = Vec::new();

		for slug in slugs {
			let slug = slug.as_ref();
			match self.banks.load_quiz_data(slug) {
				Ok(Some(bank)) => collect_questions(slug, &bank, &mut pool),
				Ok(None) => tracing::debug!(slug, "lesson has no quiz bank"),
				Err(error) => {
					tracing::warn!(slug, operation = "build_quiz", %error, "skipping quiz bank");
				}
			}
		}

		pool.shuffle(rng);
		pool.truncate(max_questions);
		tracing::debug!(
			lessons = slugs.len(),
			questions = pool.len(),
			max_questions,
			"assembled quiz"
		);

		AssembledQuiz::new(pool)
	}
}

/// Copy every question of `bank` into `pool`, tagging it with its source.
fn collect_questions(slug: &str, bank: &QuestionBank, pool: &mut Vec<QuizQuestion>) {
	for (group, questions) in bank.groups() {
		for question in questions {
			let Value::Object(record) = question else {
				tracing::debug!(slug, group, "skipping question that is not an object");
				continue;
			};

			pool.push(QuizQuestion {
				source_lesson: slug.to_string(),
				source_group: group.to_string(),
				record: record.clone(),
			});
		}
	}
}
