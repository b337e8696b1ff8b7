//! Advisory authoring checks. Nothing here blocks evaluation.

use schemars::JsonSchema;
use serde::Serialize;

use crate::condition::Operator;
use crate::model::{ActionKind, BranchingRule, Survey};
use crate::rules::{RuleSource, page_rules, resolve_rules};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    UnknownQuestion,
    UnknownOperator,
    MissingTarget,
    TargetClamped,
    UnreachableBranch,
    ShadowedRuleSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RuleWarning {
    pub page_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,
    pub code: WarningCode,
    pub message: String,
}

pub fn lint(survey: &Survey) -> Vec<RuleWarning> {
    let mut warnings = Vec::new();
    let last_page = survey.last_page_index();

    for (page_index, page) in survey.pages.iter().enumerate() {
        for question in &page.questions {
            let resolved = resolve_rules(question);
            if let Some(active) = resolved.source {
                for shadowed in RuleSource::ORDER
                    .iter()
                    .skip_while(|source| **source != active)
                    .skip(1)
                    .filter(|source| !source.read(question).is_empty())
                {
                    warnings.push(RuleWarning {
                        page_index,
                        question_id: Some(question.id.clone()),
                        code: WarningCode::ShadowedRuleSource,
                        message: format!(
                            "rules in {shadowed:?} are ignored because {active:?} is set"
                        ),
                    });
                }
            }
            for rule in &resolved.rules {
                check_rule(survey, rule, page_index, Some(&question.id), last_page, &mut warnings);
            }
        }
        for rule in page_rules(page) {
            check_rule(survey, &rule, page_index, None, last_page, &mut warnings);
        }
    }

    warnings
}

fn check_rule(
    survey: &Survey,
    rule: &BranchingRule,
    page_index: usize,
    owner: Option<&str>,
    last_page: usize,
    warnings: &mut Vec<RuleWarning>,
) {
    let mut warn = |code, message: String| {
        warnings.push(RuleWarning {
            page_index,
            question_id: owner.map(str::to_string),
            code,
            message,
        })
    };

    if !survey.contains_question(&rule.question_id) {
        warn(
            WarningCode::UnknownQuestion,
            format!("rule reads unknown question '{}'", rule.question_id),
        );
    }
    if rule.condition.operator == Operator::Unknown {
        warn(
            WarningCode::UnknownOperator,
            "rule uses an unsupported operator and never matches".to_string(),
        );
    }

    let Some(action) = &rule.action else {
        return;
    };
    if let Some(owner) = owner
        && owner != rule.question_id
    {
        warn(
            WarningCode::UnreachableBranch,
            format!(
                "branching rule on '{owner}' reads '{}' and can never fire",
                rule.question_id
            ),
        );
    }
    if action.kind == ActionKind::SkipToPage {
        match action.target_page_index {
            None => warn(
                WarningCode::MissingTarget,
                "skip_to_page action has no targetPageIndex".to_string(),
            ),
            Some(target) if target < 0 || target as u64 > last_page as u64 => warn(
                WarningCode::TargetClamped,
                format!("target page {target} is outside 0..={last_page} and will be clamped"),
            ),
            Some(_) => {}
        }
    }
}
