//! Named structural rules evaluated over a fact table.
//!
//! Rules accumulate diagnostics instead of stopping at the first
//! failure, so the learner sees every structural problem at once. A
//! rule chained to a predecessor is skipped (not passed, not failed)
//! whenever the predecessor did not pass; its message never fires on
//! state the learner has not earned yet.

use crate::analysis::FactTable;

/// Predicate over the fact table
type Predicate = Box<dyn Fn(&FactTable) -> bool>;

/// One named structural rule
pub struct Rule {
    /// Rule name, used as a chaining anchor
    pub name: String,
    /// Message emitted when the predicate fails
    pub message: String,
    /// Name of the rule this one is chained to, if any
    pub after: Option<String>,
    predicate: Predicate,
}

/// Outcome of one rule during evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleStatus {
    Passed,
    Failed,
    /// Not evaluated because the predecessor did not pass
    Skipped,
}

/// Ordered collection of rules
#[derive(Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an independent rule
    pub fn rule(
        mut self,
        name: impl Into<String>,
        message: impl Into<String>,
        predicate: impl Fn(&FactTable) -> bool + 'static,
    ) -> Self {
        self.rules.push(Rule {
            name: name.into(),
            message: message.into(),
            after: None,
            predicate: Box::new(predicate),
        });
        self
    }

    /// Add a rule evaluated only if `after` passed
    pub fn chained(
        mut self,
        name: impl Into<String>,
        after: impl Into<String>,
        message: impl Into<String>,
        predicate: impl Fn(&FactTable) -> bool + 'static,
    ) -> Self {
        self.rules.push(Rule {
            name: name.into(),
            message: message.into(),
            after: Some(after.into()),
            predicate: Box::new(predicate),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Evaluate every rule in declaration order
    pub fn evaluate(&self, facts: &FactTable) -> AnalysisResult {
        let mut statuses: Vec<(&str, RuleStatus)> = Vec::with_capacity(self.rules.len());
        let mut diagnostics = Vec::new();

        for rule in &self.rules {
            let predecessor_passed = match &rule.after {
                None => true,
                Some(after) => statuses
                    .iter()
                    .any(|(name, status)| *name == after.as_str() && *status == RuleStatus::Passed),
            };

            let status = if !predecessor_passed {
                RuleStatus::Skipped
            } else if (rule.predicate)(facts) {
                RuleStatus::Passed
            } else {
                diagnostics.push(rule.message.clone());
                RuleStatus::Failed
            };
            statuses.push((rule.name.as_str(), status));
        }

        AnalysisResult {
            statuses: statuses
                .into_iter()
                .map(|(name, status)| (name.to_string(), status))
                .collect(),
            diagnostics,
        }
    }
}

/// Result of evaluating a rule set
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Per-rule status in declaration order
    pub statuses: Vec<(String, RuleStatus)>,
    /// Failure messages in declaration order; empty means structural pass
    pub diagnostics: Vec<String>,
}

impl AnalysisResult {
    /// Structural pass: no rule failed. Skipped rules do not count as
    /// passed, but they also emit no diagnostic; a skipped rule's
    /// predecessor already did.
    pub fn passed(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn status_of(&self, name: &str) -> Option<RuleStatus> {
        self.statuses
            .iter()
            .find(|(rule_name, _)| rule_name == name)
            .map(|(_, status)| *status)
    }
}
