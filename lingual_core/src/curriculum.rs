use std::path::Path;
use std::sync::Arc;

use crate::AssembledQuiz;
use crate::ContentSource;
use crate::DEFAULT_MAX_QUESTIONS;
use crate::FsContentSource;
use crate::Lesson;
use crate::LessonCategory;
use crate::LessonIndexBuilder;
use crate::LessonLoader;
use crate::LingualConfig;
use crate::LingualResult;
use crate::Pipeline;
use crate::QuestionBank;
use crate::QuizAssembler;
use crate::QuizBankLoader;
use crate::QuizCache;
use crate::QuizId;
use crate::QuizKind;

/// One content domain: a pipeline, a content source and the quiz cache that
/// serves it. Every component shares the same pipeline instance.
pub struct Curriculum {
	pipeline: Arc<Pipeline>,
	source: Arc<dyn ContentSource>,
	lessons: LessonLoader,
	index: LessonIndexBuilder,
	banks: QuizBankLoader,
	assembler: QuizAssembler,
	quizzes: QuizCache,
	max_questions: usize,
}

impl Curriculum {
	pub fn new(pipeline: Pipeline, source: impl ContentSource + 'static) -> Self {
		let pipeline = Arc::new(pipeline);
		let source: Arc<dyn ContentSource> = Arc::new(source);
		let banks = QuizBankLoader::new(Arc::clone(&pipeline), Arc::clone(&source));

		Self {
			lessons: LessonLoader::new(Arc::clone(&pipeline), Arc::clone(&source)),
			index: LessonIndexBuilder::new(Arc::clone(&pipeline), Arc::clone(&source)),
			assembler: QuizAssembler::new(banks.clone()),
			banks,
			quizzes: QuizCache::new(),
			max_questions: DEFAULT_MAX_QUESTIONS,
			pipeline,
			source,
		}
	}

	/// Build a curriculum from the config discovered at `root`, or from
	/// defaults when there is none.
	pub fn from_config(root: &Path) -> LingualResult<Self> {
		let config = LingualConfig::load_or_default(root)?;
		Self::with_config(root, &config)
	}

	/// Build a curriculum from an already loaded config.
	pub fn with_config(root: &Path, config: &LingualConfig) -> LingualResult<Self> {
		let source = FsContentSource::new(config.data_root_in(root))
			.with_lesson_extension(config.lesson_extension.clone());

		Ok(Self::new(config.pipeline()?, source).with_max_questions(config.quiz.max_questions))
	}

	#[must_use]
	pub fn with_max_questions(mut self, max_questions: usize) -> Self {
		self.max_questions = max_questions;
		self
	}

	pub fn load(&self, slug: &str) -> LingualResult<Lesson> {
		self.lessons.load(slug)
	}

	pub fn get_lessons(&self) -> LingualResult<Vec<LessonCategory>> {
		self.index.get_lessons()
	}

	pub fn load_quiz_data(&self, slug: &str) -> LingualResult<Option<QuestionBank>> {
		self.banks.load_quiz_data(slug)
	}

	pub fn build_quiz<S: AsRef<str>>(&self, slugs: &[S], max_questions: usize) -> AssembledQuiz {
		self.assembler.build_quiz(slugs, max_questions)
	}

	/// Assemble a quiz from `slugs`, store it and return its identifier.
	///
	/// Uses the configured question cap when `max_questions` is `None`.
	pub fn start_quiz<S: AsRef<str>>(
		&self,
		kind: QuizKind,
		slugs: &[S],
		max_questions: Option<usize>,
		title: Option<&str>,
	) -> QuizId {
		let mut quiz = self.build_quiz(slugs, max_questions.unwrap_or(self.max_questions));
		if let Some(title) = title {
			quiz = quiz.with_title(title);
		}

		self.quizzes.store_as(kind, quiz)
	}

	pub fn quizzes(&self) -> &QuizCache {
		&self.quizzes
	}

	pub fn pipeline(&self) -> &Pipeline {
		&self.pipeline
	}

	pub fn source(&self) -> &dyn ContentSource {
		&*self.source
	}

	pub fn max_questions(&self) -> usize {
		self.max_questions
	}
}
