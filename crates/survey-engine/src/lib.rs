#![allow(missing_docs)]

pub mod branching;
pub mod condition;
pub mod error;
pub mod lint;
pub mod model;
pub mod navigation;
pub mod progress;
pub mod responses;
pub mod rules;
pub mod session;
pub mod submission;
pub mod visibility;

pub use branching::{NavigationAction, clamp_page, resolve_action};
pub use condition::{Operator, evaluate};
pub use error::{SubmissionAttempt, SubmissionError, SurveyError};
pub use lint::{RuleWarning, WarningCode, lint};
pub use model::{
    ActionKind, BranchingRule, Condition, Logical, Page, Question, QuestionOption,
    QuestionSettings, QuestionType, RuleAction, Survey, TypedSettings,
};
pub use navigation::NavigationState;
pub use progress::{
    ProgressRow, ProgressStatus, ResponseMetadata, ResponseRecord, ResponseStatus,
    build_dashboard, paginate, project,
};
pub use responses::ResponseMap;
pub use rules::{ResolvedRules, RuleSource, resolve_rules};
pub use session::{NavigationOutcome, SurveySession};
pub use submission::{check_autosave, check_submit};
pub use visibility::{EvaluationStrategy, VisibilityMap, is_visible, resolve_visibility};
