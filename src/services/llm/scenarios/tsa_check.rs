//! TSA Item Check Scenario - carry-on / checked bag classification

use crate::models::ItemClassification;
use crate::services::llm::ChatMessage;

const PROMPT: &str = include_str!("tsa_check_prompt.md");

/// Instruction text, including the JSON shape and two worked examples
pub fn system_prompt() -> &'static str {
    PROMPT
}

/// System instruction followed by the raw item name
pub fn build_messages(item_name: &str) -> Vec<ChatMessage> {
    vec![ChatMessage::system(PROMPT), ChatMessage::user(item_name)]
}

/// Why a completion could not be turned into an [`ItemClassification`]
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Not JSON at all
    #[error("model output is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    /// JSON, but missing a field or carrying the wrong type
    #[error("model output has an unexpected shape: {0}")]
    Shape(#[source] serde_json::Error),
}

/// Decode the model's text strictly: no fence stripping, no repair
pub fn parse_classification(content: &str) -> Result<ItemClassification, DecodeError> {
    serde_json::from_str(content).map_err(|e| {
        if e.is_data() { DecodeError::Shape(e) } else { DecodeError::Malformed(e) }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_wrap_item_name_verbatim() {
        let messages = build_messages("  lighter fluid ");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1], ChatMessage::user("  lighter fluid "));
    }

    #[test]
    fn test_prompt_carries_shape_and_examples() {
        let prompt = system_prompt();
        assert!(prompt.contains("\"carry_on\": boolean"));
        assert!(prompt.contains("\"Laptop\""));
        assert!(prompt.contains("\"Dynamite\""));
    }

    #[test]
    fn test_parse_valid_classification() {
        let parsed =
            parse_classification(r#"{"carry_on": true, "checked_bag": true, "description": "x"}"#)
                .expect("valid JSON");
        assert_eq!(
            parsed,
            ItemClassification { carry_on: true, checked_bag: true, description: "x".to_string() }
        );
    }

    #[test]
    fn test_parse_prose_is_malformed() {
        let err = parse_classification("sure, here's your answer").unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));

        let err = parse_classification(r#"{"carry_on": true"#).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }

    #[test]
    fn test_parse_missing_field_is_shape_error() {
        let err = parse_classification(r#"{"carry_on": true, "checked_bag": false}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Shape(_)));

        let err = parse_classification(r#"{"carry_on": "yes", "checked_bag": false, "description": ""}"#)
            .unwrap_err();
        assert!(matches!(err, DecodeError::Shape(_)));
    }
}
