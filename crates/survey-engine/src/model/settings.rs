use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::question::QuestionType;

/// Free-form per-question configuration as authored.
///
/// The rule engine only ever reads rule sources out of it; typed access for
/// renderers goes through [`QuestionSettings::typed`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct QuestionSettings(pub Map<String, Value>);

impl QuestionSettings {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Follows a dotted path such as `visibility.rules`.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.').filter(|segment| !segment.is_empty());
        let first = segments.next()?;
        let mut current = self.0.get(first)?;
        for segment in segments {
            current = current.get(segment)?;
        }
        Some(current)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn typed(&self, kind: QuestionType) -> TypedSettings {
        match kind {
            QuestionType::Slider | QuestionType::Number => TypedSettings::Range {
                min: self.number("min"),
                max: self.number("max"),
                step: self.number("step"),
            },
            QuestionType::Rating | QuestionType::SmileyRating => TypedSettings::Rating {
                max: self.number("max").or_else(|| self.number("scale")),
            },
            QuestionType::SingleChoice | QuestionType::MultipleChoice | QuestionType::Dropdown => {
                TypedSettings::Choice {
                    allow_multiple: kind == QuestionType::MultipleChoice
                        || self.flag("allowMultiple"),
                    allow_other: self.flag("allowOther"),
                }
            }
            QuestionType::Text | QuestionType::LongText => TypedSettings::Text {
                placeholder: self.text("placeholder"),
                max_length: self.number("maxLength").map(|n| n.max(0.0) as usize),
            },
            QuestionType::Date => TypedSettings::Date {
                min: self.text("minDate"),
                max: self.text("maxDate"),
            },
            QuestionType::File => TypedSettings::File {
                max_size_mb: self.number("maxSizeMb"),
                accepted_types: self
                    .get("acceptedTypes")
                    .and_then(Value::as_array)
                    .map(|items| {
                        items
                            .iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            QuestionType::Email => TypedSettings::Email,
            QuestionType::Matrix | QuestionType::Other => TypedSettings::None,
        }
    }

    fn number(&self, key: &str) -> Option<f64> {
        crate::condition::coerce_number(self.get(key)?)
    }

    fn flag(&self, key: &str) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(Value::as_str).map(str::to_string)
    }
}

/// Settings projected onto the fields each question type actually uses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypedSettings {
    Range {
        min: Option<f64>,
        max: Option<f64>,
        step: Option<f64>,
    },
    Rating {
        max: Option<f64>,
    },
    Choice {
        allow_multiple: bool,
        allow_other: bool,
    },
    Text {
        placeholder: Option<String>,
        max_length: Option<usize>,
    },
    Date {
        min: Option<String>,
        max: Option<String>,
    },
    File {
        max_size_mb: Option<f64>,
        accepted_types: Vec<String>,
    },
    Email,
    None,
}
