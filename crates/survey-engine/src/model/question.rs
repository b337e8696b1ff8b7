use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::null_as_default;
use crate::model::rule::BranchingRule;
use crate::model::settings::QuestionSettings;

/// Supported question kinds. Unrecognised tags load as [`QuestionType::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    SingleChoice,
    MultipleChoice,
    Dropdown,
    Slider,
    Rating,
    SmileyRating,
    Text,
    LongText,
    Date,
    File,
    Email,
    Number,
    Matrix,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuestionOption {
    pub id: String,
    #[serde(default)]
    pub text: String,
}

/// Definition of a single question on a page.
///
/// `visibility_rules` and `visible_when` are kept as raw JSON: rule data is
/// author-entered and is only interpreted, leniently, by [`crate::rules`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Vec<QuestionOption>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub settings: QuestionSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility_rules: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_when: Option<Value>,
}

impl Question {
    pub fn new(id: impl Into<String>, kind: QuestionType) -> Self {
        Self {
            id: id.into(),
            kind,
            title: String::new(),
            required: false,
            options: Vec::new(),
            settings: QuestionSettings::default(),
            visibility_rules: None,
            visible_when: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options
            .into_iter()
            .map(|text| {
                let text = text.into();
                QuestionOption {
                    id: text.to_lowercase(),
                    text,
                }
            })
            .collect();
        self
    }

    /// Stores rules in the primary `visibilityRules` location.
    pub fn with_rules(mut self, rules: Vec<BranchingRule>) -> Self {
        self.visibility_rules = Some(serde_json::to_value(rules).unwrap_or_default());
        self
    }
}
