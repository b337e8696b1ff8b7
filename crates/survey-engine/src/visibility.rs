use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::condition::evaluate;
use crate::model::{BranchingRule, Page, Question};
use crate::responses::{ResponseMap, answer, is_answered};
use crate::rules::resolve_rules;

pub type VisibilityMap = BTreeMap<String, bool>;

/// How a question's visibility rules are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStrategy {
    /// One left fold over every rule; each rule joins the accumulator with the
    /// previous rule's `logical`.
    FlatSequential,
    /// Rules are partitioned by `groupIndex`, each group is folded like
    /// `FlatSequential`, and any true group makes the question visible.
    #[default]
    GroupedOr,
}

/// Decides whether `question` is visible given the current answers.
///
/// Questions without visibility rules are always visible. Questions with rules
/// stay hidden until at least one of the questions they depend on is answered.
pub fn is_visible(
    question: &Question,
    responses: &ResponseMap,
    strategy: EvaluationStrategy,
) -> bool {
    let resolved = resolve_rules(question);
    let rules = resolved.visibility();
    if rules.is_empty() {
        return true;
    }

    if !rules
        .iter()
        .any(|rule| is_answered(responses, &rule.question_id))
    {
        return false;
    }

    let visible = match strategy {
        EvaluationStrategy::FlatSequential => fold_rules(&rules, responses),
        EvaluationStrategy::GroupedOr => grouped_rules(&rules, responses),
    };
    tracing::trace!(question = %question.id, ?strategy, visible, "resolved visibility");
    visible
}

/// Visibility for every question on a page.
pub fn resolve_visibility(
    page: &Page,
    responses: &ResponseMap,
    strategy: EvaluationStrategy,
) -> VisibilityMap {
    page.questions
        .iter()
        .map(|question| {
            (
                question.id.clone(),
                is_visible(question, responses, strategy),
            )
        })
        .collect()
}

/// Evaluates one rule against the answer of the question it reads. Rules whose
/// dependency is unanswered evaluate to `false`.
pub fn rule_matches(rule: &BranchingRule, responses: &ResponseMap) -> bool {
    answer(responses, &rule.question_id)
        .is_some_and(|actual| evaluate(rule.condition.operator, &rule.condition.value, actual))
}

fn fold_rules(rules: &[&BranchingRule], responses: &ResponseMap) -> bool {
    let mut iter = rules.iter();
    let Some(first) = iter.next() else {
        return false;
    };
    let mut accumulator = rule_matches(first, responses);
    let mut joiner = first.logical;
    for rule in iter {
        let result = rule_matches(rule, responses);
        accumulator = joiner.combine(accumulator, result);
        joiner = rule.logical;
    }
    accumulator
}

fn grouped_rules(rules: &[&BranchingRule], responses: &ResponseMap) -> bool {
    let mut groups: BTreeMap<i64, Vec<&BranchingRule>> = BTreeMap::new();
    for &rule in rules {
        groups.entry(rule.group()).or_default().push(rule);
    }
    groups
        .values()
        .filter(|group| !group.is_empty())
        .any(|group| fold_rules(group, responses))
}
