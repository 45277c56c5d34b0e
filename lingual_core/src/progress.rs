use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::AssembledQuiz;
use crate::LingualResult;
use crate::QuizCache;
use crate::QuizId;
use crate::QuizKind;

/// Field of a question record holding its correct answer.
pub const ANSWER_KEY: &str = "answer";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Score {
	pub correct: usize,
	pub total: usize,
}

impl Score {
	fn add(&mut self, correct: bool) {
		self.total += 1;
		if correct {
			self.correct += 1;
		}
	}
}

/// Result of grading one set of answers against an assembled quiz.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Grade {
	pub score: Score,
	/// Scores per source lesson slug.
	pub lessons: BTreeMap<String, Score>,
}

/// A graded quiz session, as handed to a [`ProgressRecorder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizOutcome {
	pub id: QuizId,
	#[serde(rename = "type")]
	pub kind: QuizKind,
	pub title: String,
	#[serde(flatten)]
	pub grade: Grade,
}

/// Records a user's progress once a quiz is completed. Implemented by the
/// host application's persistence layer.
pub trait ProgressRecorder {
	fn record(&self, outcome: &QuizOutcome);
}

/// Grade `answers` positionally against the questions of `quiz`. A question
/// counts as correct when its `answer` field equals the submitted answer;
/// missing answers are incorrect.
pub fn grade(quiz: &AssembledQuiz, answers: &[Value]) -> Grade {
	let mut grade = Grade::default();

	for (index, question) in quiz.bank.iter().enumerate() {
		let correct = match (question.record.get(ANSWER_KEY), answers.get(index)) {
			(Some(expected), Some(given)) => !given.is_null() && expected == given,
			_ => false,
		};

		grade.score.add(correct);
		grade
			.lessons
			.entry(question.source_lesson.clone())
			.or_default()
			.add(correct);
	}

	grade
}

impl QuizCache {
	/// Grade the session stored under `id` and report it to `recorder`.
	///
	/// Fails with [`crate::LingualError::QuizNotFound`] for an unknown id, in
	/// which case the recorder is not called.
	pub fn complete(
		&self,
		id: &str,
		answers: &[Value],
		recorder: &dyn ProgressRecorder,
	) -> LingualResult<QuizOutcome> {
		let entry = self.entry(id)?;
		let outcome = QuizOutcome {
			id: entry.id,
			kind: entry.kind,
			title: entry.title,
			grade: grade(&entry.payload, answers),
		};

		tracing::debug!(
			id = %outcome.id,
			correct = outcome.grade.score.correct,
			total = outcome.grade.score.total,
			"quiz completed"
		);
		recorder.record(&outcome);

		Ok(outcome)
	}
}
