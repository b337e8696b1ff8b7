//! Locating a question's rules among the places authors have historically stored them.

use serde::Serialize;
use serde_json::Value;

use crate::model::{BranchingRule, Page, Question};

/// One storage location for a question's rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSource {
    /// `question.visibilityRules`
    VisibilityRules,
    /// `question.visibleWhen`
    VisibleWhen,
    /// `question.settings.visibleWhen`
    SettingsVisibleWhen,
    /// `question.settings.visibility.rules`
    SettingsVisibilityRules,
}

impl RuleSource {
    /// Precedence order. The first source yielding at least one rule wins and
    /// sources are never merged.
    pub const ORDER: [RuleSource; 4] = [
        RuleSource::VisibilityRules,
        RuleSource::VisibleWhen,
        RuleSource::SettingsVisibleWhen,
        RuleSource::SettingsVisibilityRules,
    ];

    fn raw(self, question: &Question) -> Option<&Value> {
        match self {
            RuleSource::VisibilityRules => question.visibility_rules.as_ref(),
            RuleSource::VisibleWhen => question.visible_when.as_ref(),
            RuleSource::SettingsVisibleWhen => question.settings.get("visibleWhen"),
            RuleSource::SettingsVisibilityRules => question.settings.lookup("visibility.rules"),
        }
    }

    /// Rules stored at this location, parsed leniently.
    pub fn read(self, question: &Question) -> Vec<BranchingRule> {
        self.raw(question).map(parse_rules).unwrap_or_default()
    }
}

/// Rules for a question together with the location they came from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedRules {
    pub source: Option<RuleSource>,
    pub rules: Vec<BranchingRule>,
}

impl ResolvedRules {
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Pure visibility predicates (rules without an action).
    pub fn visibility(&self) -> Vec<&BranchingRule> {
        self.rules.iter().filter(|rule| !rule.is_branching()).collect()
    }

    /// Page-level branching triggers (rules with an action).
    pub fn branching(&self) -> impl Iterator<Item = &BranchingRule> {
        self.rules.iter().filter(|rule| rule.is_branching())
    }
}

pub fn resolve_rules(question: &Question) -> ResolvedRules {
    RuleSource::ORDER
        .iter()
        .find_map(|source| {
            let rules = source.read(question);
            (!rules.is_empty()).then_some(ResolvedRules {
                source: Some(*source),
                rules,
            })
        })
        .unwrap_or_default()
}

/// Legacy branching rules stored on the page itself.
pub fn page_rules(page: &Page) -> Vec<BranchingRule> {
    page.branching_rules
        .as_ref()
        .map(parse_rules)
        .unwrap_or_default()
}

/// Parses author-entered rule JSON. A lone object counts as a one-rule list and
/// malformed entries are dropped.
pub fn parse_rules(raw: &Value) -> Vec<BranchingRule> {
    match raw {
        Value::Array(items) => items.iter().filter_map(parse_rule).collect(),
        Value::Object(_) => parse_rule(raw).into_iter().collect(),
        _ => Vec::new(),
    }
}

fn parse_rule(raw: &Value) -> Option<BranchingRule> {
    match serde_json::from_value::<BranchingRule>(raw.clone()) {
        Ok(rule) => Some(rule),
        Err(err) => {
            tracing::debug!(error = %err, rule = %raw, "skipping malformed rule");
            None
        }
    }
}
