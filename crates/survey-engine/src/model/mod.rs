pub mod question;
pub mod rule;
pub mod settings;
pub mod survey;

pub use question::{Question, QuestionOption, QuestionType};
pub use rule::{ActionKind, BranchingRule, Condition, Logical, RuleAction};
pub use settings::{QuestionSettings, TypedSettings};
pub use survey::{Page, Survey};

use serde::{Deserialize, Deserializer};

/// Treats an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
