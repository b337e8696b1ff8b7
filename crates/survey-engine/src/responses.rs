use serde_json::{Map, Value};

/// Answers collected so far, keyed by question id.
pub type ResponseMap = Map<String, Value>;

/// The recorded answer for a question. A stored `null` counts as unanswered.
pub fn answer<'a>(responses: &'a ResponseMap, question_id: &str) -> Option<&'a Value> {
    responses.get(question_id).filter(|value| !value.is_null())
}

pub fn is_answered(responses: &ResponseMap, question_id: &str) -> bool {
    answer(responses, question_id).is_some()
}
