use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use survey_engine::{
    NavigationAction, NavigationOutcome, NavigationState, ResponseMap, SurveySession,
    VisibilityMap,
};

use crate::cmd::{StrategyArg, emit, load_json, load_survey, strategy};
use crate::config::EngineConfig;

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    #[arg(long, value_name = "survey.json")]
    pub survey: PathBuf,
    /// JSON array of session events
    #[arg(long, value_name = "events.json")]
    pub events: PathBuf,
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,
    /// Starting page index (clamped); defaults to the configured `start_page`
    #[arg(long, allow_negative_numbers = true)]
    pub start: Option<i64>,
}

/// One respondent interaction to replay.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Answer {
        #[serde(rename = "questionId")]
        question_id: String,
        value: Value,
    },
    ClearAnswer {
        #[serde(rename = "questionId")]
        question_id: String,
    },
    Next,
    Previous,
    JumpTo {
        target: i64,
    },
    EndSurvey,
    Reset {
        #[serde(default)]
        start: i64,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StepReport {
    step: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<NavigationAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<NavigationOutcome>,
    current_page_index: usize,
    can_advance: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulationReport<'a> {
    steps: Vec<StepReport>,
    navigation: &'a NavigationState,
    responses: &'a ResponseMap,
    visibility: VisibilityMap,
    can_submit: bool,
}

pub fn run(args: SimulateArgs, config: &EngineConfig) -> Result<()> {
    let survey = load_survey(&args.survey)?;
    let events: Vec<SessionEvent> = load_json(&args.events, "events")?;
    let start = args.start.unwrap_or(config.start_page);
    let mut session = SurveySession::starting_at(&survey, strategy(args.strategy, config), start);

    let steps: Vec<StepReport> = events
        .into_iter()
        .enumerate()
        .map(|(step, event)| {
            tracing::debug!(step, ?event, "replaying event");
            let (action, outcome) = apply(&mut session, event);
            StepReport {
                step,
                action,
                outcome,
                current_page_index: session.current_page_index(),
                can_advance: session.can_advance(),
            }
        })
        .collect();

    emit(&SimulationReport {
        steps,
        navigation: session.navigation(),
        responses: session.responses(),
        visibility: session.visibility(),
        can_submit: session.can_submit(),
    })
}

fn apply(
    session: &mut SurveySession<'_>,
    event: SessionEvent,
) -> (Option<NavigationAction>, Option<NavigationOutcome>) {
    match event {
        SessionEvent::Answer { question_id, value } => (session.answer(&question_id, value), None),
        SessionEvent::ClearAnswer { question_id } => {
            session.clear_answer(&question_id);
            (None, None)
        }
        SessionEvent::Next => (None, Some(session.go_next())),
        SessionEvent::Previous => (None, Some(session.go_previous())),
        SessionEvent::JumpTo { target } => {
            let page_index = session.jump_to(target);
            (None, Some(NavigationOutcome::Moved { page_index }))
        }
        SessionEvent::EndSurvey => {
            let page_index = session.end_survey();
            (None, Some(NavigationOutcome::Moved { page_index }))
        }
        SessionEvent::Reset { start } => {
            session.reset(start);
            (None, None)
        }
    }
}
