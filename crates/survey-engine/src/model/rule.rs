use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::condition::Operator;

/// How a rule combines with the rule that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum Logical {
    #[serde(rename = "AND", alias = "and", alias = "And")]
    And,
    #[default]
    #[serde(rename = "OR", alias = "or", alias = "Or")]
    Or,
}

impl Logical {
    pub fn combine(self, accumulator: bool, next: bool) -> bool {
        match self {
            Logical::And => accumulator && next,
            Logical::Or => accumulator || next,
        }
    }
}

/// Operator and expected value of a rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Condition {
    pub operator: Operator,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    SkipToPage,
    EndSurvey,
}

/// Navigation side of a branching rule as authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RuleAction {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_page_index: Option<i64>,
}

/// Author-defined condition over another question's answer.
///
/// Without an `action` the rule only decides visibility; with one it is a
/// page-level branching trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BranchingRule {
    pub question_id: String,
    pub condition: Condition,
    #[serde(default)]
    pub logical: Logical,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<RuleAction>,
}

impl BranchingRule {
    pub fn new(question_id: impl Into<String>, operator: Operator, value: Value) -> Self {
        Self {
            question_id: question_id.into(),
            condition: Condition { operator, value },
            logical: Logical::default(),
            group_index: None,
            action: None,
        }
    }

    pub fn with_logical(mut self, logical: Logical) -> Self {
        self.logical = logical;
        self
    }

    pub fn in_group(mut self, group_index: i64) -> Self {
        self.group_index = Some(group_index);
        self
    }

    pub fn skip_to_page(mut self, target_page_index: i64) -> Self {
        self.action = Some(RuleAction {
            kind: ActionKind::SkipToPage,
            target_page_index: Some(target_page_index),
        });
        self
    }

    pub fn end_survey(mut self) -> Self {
        self.action = Some(RuleAction {
            kind: ActionKind::EndSurvey,
            target_page_index: None,
        });
        self
    }

    pub fn is_branching(&self) -> bool {
        self.action.is_some()
    }

    /// Group used by grouped evaluation; rules without one belong to group 0.
    pub fn group(&self) -> i64 {
        self.group_index.unwrap_or(0)
    }
}
