use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::condition::evaluate;
use crate::model::{ActionKind, BranchingRule, Survey};
use crate::rules::{page_rules, resolve_rules};

/// Resolved navigation instruction handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavigationAction {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub target_page_index: usize,
}

/// Clamps a possibly out-of-range page index into `[0, last_page]`.
pub fn clamp_page(target: i64, last_page: usize) -> usize {
    if target <= 0 {
        0
    } else {
        usize::try_from(target).map_or(last_page, |target| target.min(last_page))
    }
}

/// Works out where navigation should go after `question_id` was answered with `new_value`.
///
/// The first rule that reads the answered question, carries an action, and
/// matches `new_value` decides. The owning page's legacy `branchingRules` are
/// consulted only when the question's own rules produce nothing.
pub fn resolve_action(
    survey: &Survey,
    question_id: &str,
    new_value: &Value,
) -> Option<NavigationAction> {
    let (page_index, question) = survey.find_question(question_id)?;
    let last_page = survey.last_page_index();

    let resolved = resolve_rules(question);
    if let Some(action) = first_action(resolved.branching(), question_id, new_value, last_page) {
        return Some(action);
    }

    let legacy = survey.page(page_index).map(page_rules).unwrap_or_default();
    first_action(
        legacy.iter().filter(|rule| rule.is_branching()),
        question_id,
        new_value,
        last_page,
    )
}

fn first_action<'a, I>(
    rules: I,
    question_id: &str,
    new_value: &Value,
    last_page: usize,
) -> Option<NavigationAction>
where
    I: IntoIterator<Item = &'a BranchingRule>,
{
    rules
        .into_iter()
        .filter(|rule| rule.question_id == question_id)
        .find_map(|rule| {
            let action = to_navigation(rule, last_page)?;
            if !evaluate(rule.condition.operator, &rule.condition.value, new_value) {
                return None;
            }
            tracing::debug!(
                question = question_id,
                kind = ?action.kind,
                target = action.target_page_index,
                "branching rule matched"
            );
            Some(action)
        })
}

fn to_navigation(rule: &BranchingRule, last_page: usize) -> Option<NavigationAction> {
    let action = rule.action.as_ref()?;
    let target_page_index = match action.kind {
        ActionKind::SkipToPage => clamp_page(action.target_page_index?, last_page),
        ActionKind::EndSurvey => last_page,
    };
    Some(NavigationAction {
        kind: action.kind,
        target_page_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_page_bounds() {
        assert_eq!(clamp_page(-5, 3), 0);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(999, 3), 3);
        assert_eq!(clamp_page(i64::MAX, 0), 0);
    }
}
