use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SurveyError;
use crate::model::null_as_default;
use crate::model::question::Question;

/// Ordered group of questions shown together; the unit of navigation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default, deserialize_with = "null_as_default")]
    pub questions: Vec<Question>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Legacy page-scoped branching rules, raw as authored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branching_rules: Option<Value>,
}

impl Page {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            ..Self::default()
        }
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }
}

/// Top-level survey definition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pages: Vec<Page>,
    /// Presentation metadata; opaque to the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Value>,
}

impl Survey {
    pub fn new(id: impl Into<String>, pages: Vec<Page>) -> Self {
        Self {
            id: id.into(),
            pages,
            ..Self::default()
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, SurveyError> {
        serde_json::from_str(raw).map_err(SurveyError::Parse)
    }

    pub fn from_value(value: Value) -> Result<Self, SurveyError> {
        serde_json::from_value(value).map_err(SurveyError::Parse)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Index of the final page; 0 for a survey without pages.
    pub fn last_page_index(&self) -> usize {
        self.pages.len().saturating_sub(1)
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.pages.iter().flat_map(|page| page.questions.iter())
    }

    /// Finds a question and the index of the page that owns it.
    pub fn find_question(&self, id: &str) -> Option<(usize, &Question)> {
        self.pages
            .iter()
            .enumerate()
            .find_map(|(index, page)| page.question(id).map(|question| (index, question)))
    }

    pub fn contains_question(&self, id: &str) -> bool {
        self.find_question(id).is_some()
    }
}
