use serde::Serialize;
use serde_json::Value;

use crate::branching::{NavigationAction, resolve_action};
use crate::model::{Page, Survey};
use crate::navigation::NavigationState;
use crate::progress::ResponseMetadata;
use crate::responses::{ResponseMap, is_answered};
use crate::visibility::{EvaluationStrategy, VisibilityMap, is_visible, resolve_visibility};

/// Result of asking the session to move forward or back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum NavigationOutcome {
    Moved { page_index: usize },
    AtBoundary,
    /// Visible required questions on the current page are still unanswered.
    Blocked { missing: Vec<String> },
}

/// One respondent's live session over a survey.
///
/// Visibility and gating are recomputed from `responses` on every call; the
/// session never caches them.
#[derive(Debug, Clone)]
pub struct SurveySession<'a> {
    survey: &'a Survey,
    strategy: EvaluationStrategy,
    navigation: NavigationState,
    responses: ResponseMap,
}

impl<'a> SurveySession<'a> {
    pub fn new(survey: &'a Survey, strategy: EvaluationStrategy) -> Self {
        Self::starting_at(survey, strategy, 0)
    }

    pub fn starting_at(survey: &'a Survey, strategy: EvaluationStrategy, start: i64) -> Self {
        Self {
            survey,
            strategy,
            navigation: NavigationState::new(survey.page_count(), start),
            responses: ResponseMap::new(),
        }
    }

    pub fn survey(&self) -> &'a Survey {
        self.survey
    }

    pub fn strategy(&self) -> EvaluationStrategy {
        self.strategy
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    pub fn responses(&self) -> &ResponseMap {
        &self.responses
    }

    pub fn current_page_index(&self) -> usize {
        self.navigation.current_page_index()
    }

    pub fn visited_page_indices(&self) -> &[usize] {
        self.navigation.visited_page_indices()
    }

    pub fn current_page(&self) -> Option<&'a Page> {
        self.survey.page(self.current_page_index())
    }

    /// Records an answer and applies any branching action it triggers.
    ///
    /// A `null` value clears the answer instead.
    pub fn answer(&mut self, question_id: &str, value: Value) -> Option<NavigationAction> {
        if value.is_null() {
            self.clear_answer(question_id);
            return None;
        }
        let action = resolve_action(self.survey, question_id, &value);
        self.responses.insert(question_id.to_string(), value);
        if let Some(action) = action {
            self.navigation.apply(action);
        }
        action
    }

    pub fn clear_answer(&mut self, question_id: &str) {
        self.responses.remove(question_id);
    }

    /// Visibility of any question in the survey; unknown ids are not visible.
    pub fn is_visible(&self, question_id: &str) -> bool {
        self.survey
            .find_question(question_id)
            .is_some_and(|(_, question)| is_visible(question, &self.responses, self.strategy))
    }

    /// Visibility of every question on the current page.
    pub fn visibility(&self) -> VisibilityMap {
        self.current_page()
            .map(|page| resolve_visibility(page, &self.responses, self.strategy))
            .unwrap_or_default()
    }

    /// Required questions on the current page that are visible and unanswered.
    pub fn missing_required(&self) -> Vec<String> {
        let Some(page) = self.current_page() else {
            return Vec::new();
        };
        page.questions
            .iter()
            .filter(|question| question.required)
            .filter(|question| !is_answered(&self.responses, &question.id))
            .filter(|question| is_visible(question, &self.responses, self.strategy))
            .map(|question| question.id.clone())
            .collect()
    }

    pub fn can_advance(&self) -> bool {
        self.missing_required().is_empty()
    }

    pub fn is_last_page(&self) -> bool {
        self.navigation.is_last_page()
    }

    /// Whether the caller may switch from auto-save to final submission.
    pub fn can_submit(&self) -> bool {
        self.is_last_page() && self.can_advance()
    }

    pub fn go_next(&mut self) -> NavigationOutcome {
        let missing = self.missing_required();
        if !missing.is_empty() {
            tracing::debug!(page = self.current_page_index(), ?missing, "advance blocked");
            return NavigationOutcome::Blocked { missing };
        }
        if self.navigation.go_next() {
            NavigationOutcome::Moved {
                page_index: self.current_page_index(),
            }
        } else {
            NavigationOutcome::AtBoundary
        }
    }

    pub fn go_previous(&mut self) -> NavigationOutcome {
        if self.navigation.go_previous() {
            NavigationOutcome::Moved {
                page_index: self.current_page_index(),
            }
        } else {
            NavigationOutcome::AtBoundary
        }
    }

    pub fn jump_to(&mut self, target: i64) -> usize {
        self.navigation.jump_to(target)
    }

    pub fn end_survey(&mut self) -> usize {
        self.navigation.end_survey()
    }

    /// Restarts the session at `start` and forgets every answer.
    pub fn reset(&mut self, start: i64) {
        self.navigation.reset(start);
        self.responses.clear();
    }

    /// Snapshot persisted by auto-save.
    pub fn autosave_metadata(&self) -> ResponseMetadata {
        ResponseMetadata {
            last_page_index: Some(self.current_page_index() as i64),
            time_spent: 0,
            pages_visited: self.visited_page_indices().to_vec(),
        }
    }
}
