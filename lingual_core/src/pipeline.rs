use std::borrow::Cow;
use std::sync::Arc;

use crate::Extension;
use crate::LingualResult;
use crate::RouteResolver;
use crate::RouteTable;
use crate::RuleContext;
use crate::TransformRule;
use crate::base_rules;

/// An ordered, immutable sequence of [`TransformRule`]s.
///
/// Rules run one after another over the whole text: the output of rule `n`
/// is the input of rule `n + 1`. Running the same input twice always yields
/// the same output.
#[derive(Debug, Clone)]
pub struct Pipeline {
	context: RuleContext,
	rules: Arc<[TransformRule]>,
}

impl Pipeline {
	/// Start building a pipeline for `namespace` with the base rules.
	pub fn builder(namespace: impl Into<String>) -> PipelineBuilder {
		PipelineBuilder::new(namespace)
	}

	/// Apply every rule in order.
	pub fn apply(&self, text: &str) -> String {
		let mut current = text.to_string();
		for rule in self.rules.iter() {
			let rewritten = match rule.apply(&current, &self.context) {
				Cow::Owned(rewritten) => Some(rewritten),
				Cow::Borrowed(_) => None,
			};
			if let Some(rewritten) = rewritten {
				current = rewritten;
			}
		}
		current
	}

	pub fn context(&self) -> &RuleContext {
		&self.context
	}

	pub fn namespace(&self) -> &str {
		&self.context.namespace
	}

	pub fn rules(&self) -> &[TransformRule] {
		&self.rules
	}

	/// Names of the rules in execution order.
	pub fn rule_names(&self) -> Vec<&str> {
		self.rules.iter().map(TransformRule::name).collect()
	}
}

/// Builder for [`Pipeline`]. Extra rules are always appended after the base
/// set, in the order they were added.
pub struct PipelineBuilder {
	namespace: String,
	routes: Arc<dyn RouteResolver>,
	base: Vec<TransformRule>,
	extra: Vec<TransformRule>,
}

impl PipelineBuilder {
	pub fn new(namespace: impl Into<String>) -> Self {
		Self {
			namespace: namespace.into(),
			routes: Arc::new(RouteTable::new()),
			base: base_rules(),
			extra: Vec::new(),
		}
	}

	/// Use `routes` to resolve cross-reference links.
	#[must_use]
	pub fn routes(mut self, routes: impl RouteResolver + 'static) -> Self {
		self.routes = Arc::new(routes);
		self
	}

	/// Use an already shared resolver.
	#[must_use]
	pub fn shared_routes(mut self, routes: Arc<dyn RouteResolver>) -> Self {
		self.routes = routes;
		self
	}

	/// Replace the base rule set. Mostly useful for testing single rules.
	#[must_use]
	pub fn base(mut self, rules: Vec<TransformRule>) -> Self {
		self.base = rules;
		self
	}

	/// Append a rule after the base set.
	#[must_use]
	pub fn rule(mut self, rule: TransformRule) -> Self {
		self.extra.push(rule);
		self
	}

	/// Append all rules of a named extension.
	#[must_use]
	pub fn extension(mut self, extension: Extension) -> Self {
		self.extra.extend(extension.rules());
		self
	}

	/// Append extensions by name, as listed in configuration.
	pub fn with_extensions<I, S>(mut self, names: I) -> LingualResult<Self>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		for name in names {
			let extension: Extension = name.as_ref().parse()?;
			self = self.extension(extension);
		}
		Ok(self)
	}

	pub fn build(self) -> Pipeline {
		let rules: Vec<TransformRule> = self.base.into_iter().chain(self.extra).collect();
		tracing::debug!(
			namespace = %self.namespace,
			rules = rules.len(),
			"built transform pipeline"
		);

		Pipeline {
			context: RuleContext::new(self.namespace, self.routes),
			rules: rules.into(),
		}
	}
}
