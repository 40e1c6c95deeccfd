//! Chat completions wire types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: [ChatMessage<'a>; 2],
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// `{"error": {"message": "...", "type": "..."}}`
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
}

impl ChatResponse {
    /// First choice's content, verbatim, or `None` when missing or blank.
    #[must_use]
    pub fn into_script(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|s| !s.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> ChatResponse {
        serde_json::from_str(json).expect("valid chat response")
    }

    #[test]
    fn into_script_keeps_first_choice_verbatim() {
        let r = response(
            r#"{"choices":[{"message":{"role":"assistant","content":"  HOST: Hi\n"}},
                           {"message":{"role":"assistant","content":"ignored"}}]}"#,
        );
        assert_eq!(r.into_script().as_deref(), Some("  HOST: Hi\n"));
    }

    #[test]
    fn into_script_none_for_blank_or_missing() {
        assert!(response(r#"{"choices":[]}"#).into_script().is_none());
        assert!(response(r"{}").into_script().is_none());
        assert!(response(r#"{"choices":[{"message":{"content":"   "}}]}"#)
            .into_script()
            .is_none());
        assert!(response(r#"{"choices":[{"message":{"content":null}}]}"#)
            .into_script()
            .is_none());
    }

    #[test]
    fn request_serializes_system_then_user() {
        let req = ChatRequest {
            model: "gpt-4",
            messages: [
                ChatMessage {
                    role: "system",
                    content: "sys",
                },
                ChatMessage {
                    role: "user",
                    content: "prompt",
                },
            ],
            max_tokens: 1500,
            temperature: 0.5,
        };
        let v = serde_json::to_value(&req).expect("serializes");
        assert_eq!(v["model"], "gpt-4");
        assert_eq!(v["messages"][0]["role"], "system");
        assert_eq!(v["messages"][1]["content"], "prompt");
        assert_eq!(v["max_tokens"], 1500);
        assert_eq!(v["temperature"], 0.5);
    }
}
