use serde::{Deserialize, Serialize};

use crate::domain::aggregates::ChatState;

/// Request body of the chat endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

/// Response body of the chat endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub question: String,
    pub route: Option<String>,
    pub answer: Option<String>,
}

impl From<&ChatState> for ChatResponse {
    fn from(state: &ChatState) -> Self {
        ChatResponse {
            question: state.question().as_str().to_string(),
            route: state.route().map(|r| r.as_str().to_string()),
            answer: state.answer().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Question, Route};

    #[test]
    fn test_from_finished_state() {
        let mut state = ChatState::new(Question::new("What is 2+2?").unwrap());
        state.set_route(Route::Simple);
        state.set_answer("4").unwrap();

        let response = ChatResponse::from(&state);
        assert_eq!(response.route.as_deref(), Some("simple"));
        assert_eq!(response.answer.as_deref(), Some("4"));
    }

    #[test]
    fn test_deserialize_request() {
        let request: ChatRequest = serde_json::from_str(r#"{"question": "What is 2+2?"}"#).unwrap();
        assert_eq!(request.question, "What is 2+2?");
    }
}
