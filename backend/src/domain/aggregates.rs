/// Domain aggregates
use super::base::{DomainError, DomainResult};
use super::entities::ChatMessage;
use super::value_objects::{Question, Route};

/// Merge an incoming batch of messages into the existing history
///
/// History is an append-only log: the result is `existing` followed by
/// `incoming`, both in their original order.
pub fn merge_messages(existing: Vec<ChatMessage>, incoming: Vec<ChatMessage>) -> Vec<ChatMessage> {
    let mut merged = existing;
    merged.extend(incoming);
    merged
}

/// State threaded through the chat graph for a single question
///
/// Created when a question arrives, passed from the classifier to the selected
/// route node, and dropped once the answer has been returned.
#[derive(Debug, Clone)]
pub struct ChatState {
    messages: Vec<ChatMessage>,
    question: Question,
    route: Option<Route>,
    answer: Option<String>,
}

impl ChatState {
    pub fn new(question: Question) -> Self {
        ChatState {
            messages: Vec::new(),
            question,
            route: None,
            answer: None,
        }
    }

    /// Start from an existing conversation history
    pub fn with_history(question: Question, history: Vec<ChatMessage>) -> Self {
        ChatState {
            messages: history,
            ..Self::new(question)
        }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    pub fn set_route(&mut self, route: Route) {
        self.route = Some(route);
    }

    /// Append messages through the history reducer
    pub fn add_messages(&mut self, incoming: Vec<ChatMessage>) {
        let existing = std::mem::take(&mut self.messages);
        self.messages = merge_messages(existing, incoming);
    }

    /// Record the final answer; only one answer may be produced per question
    pub fn set_answer(&mut self, answer: impl Into<String>) -> DomainResult<()> {
        if self.answer.is_some() {
            return Err(DomainError::InvalidOperation(format!(
                "Question '{}' already has an answer",
                self.question
            )));
        }
        self.answer = Some(answer.into());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        Question::new("What is 2+2?").unwrap()
    }

    #[test]
    fn test_merge_messages_concatenates_in_order() {
        let existing = vec![ChatMessage::user("a"), ChatMessage::assistant("b")];
        let incoming = vec![ChatMessage::user("c")];

        let merged = merge_messages(existing, incoming);

        let contents: Vec<&str> = merged.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_merge_messages_with_empty_sides() {
        assert!(merge_messages(vec![], vec![]).is_empty());

        let only_new = merge_messages(vec![], vec![ChatMessage::user("x")]);
        assert_eq!(only_new.len(), 1);

        let only_old = merge_messages(vec![ChatMessage::user("x")], vec![]);
        assert_eq!(only_old.len(), 1);
    }

    #[test]
    fn test_new_state_is_unrouted() {
        let state = ChatState::new(question());
        assert_eq!(state.question().as_str(), "What is 2+2?");
        assert!(state.route().is_none());
        assert!(state.answer().is_none());
        assert!(state.messages().is_empty());
    }

    #[test]
    fn test_add_messages_appends_to_history() {
        let mut state = ChatState::with_history(question(), vec![ChatMessage::user("earlier")]);
        state.add_messages(vec![ChatMessage::user("now"), ChatMessage::assistant("4")]);

        assert_eq!(state.messages().len(), 3);
        assert_eq!(state.messages()[0].content, "earlier");
        assert_eq!(state.messages()[2].content, "4");
    }

    #[test]
    fn test_answer_can_only_be_set_once() {
        let mut state = ChatState::new(question());
        state.set_answer("4").unwrap();
        assert_eq!(state.answer(), Some("4"));

        let second = state.set_answer("5");
        assert!(matches!(second, Err(DomainError::InvalidOperation(_))));
        assert_eq!(state.answer(), Some("4"));
    }

    #[test]
    fn test_route_can_be_overwritten() {
        let mut state = ChatState::new(question());
        state.set_route(Route::from_label("complex"));
        state.set_route(Route::from_label("simple"));
        assert_eq!(state.route(), Some(&Route::Simple));
    }
}
