use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::application::gateways::ChatModel;
use crate::application::graph::{ChatError, ChatResult, GraphNode};
use crate::domain::{aggregates::ChatState, entities::ChatMessage, value_objects::Route};

/// Instructions for step-by-step solving of everyday math problems
pub const SIMPLE_SOLVER_PROMPT: &str = r#"You are an expert in mathematical problem solving.
You handle questions related to:
- Basic calculations
- Symbolic reasoning
- Language-to-math translation
- Conceptual or formula-based problems
- Procedural or step-by-step reasoning

Examples include:
- Arithmetic problems
- Algebraic problems
- Word problems
- Geometry problems
- Probability and statistics
- Calculus (conceptual or procedural)
- Logical or puzzle-based problems
- Optimization and decision problems
- Step-by-step solution generation

Solve the question step by step.

Rules:
1. Answer the question briefly.
2. Show clear reasoning.
3. Always provide the final answer.
4. Use proper mathematical notation where applicable.
5. Do not reveal internal chain-of-thought.
6. Solve mathematical problems clearly and accurately.
"#;

/// Build the single message sent to the solver
pub fn simple_solver_prompt(question: &str) -> String {
    format!("{}\nUser question:\n{}\n", SIMPLE_SOLVER_PROMPT, question)
}

/// Use case for answering questions routed as simple
///
/// The question and the model's reply are appended to the conversation
/// history, and the reply becomes the state's answer.
pub struct SolveSimpleProblem {
    model: Arc<dyn ChatModel>,
}

impl SolveSimpleProblem {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    pub async fn execute(&self, mut state: ChatState) -> ChatResult<ChatState> {
        if state.route() != Some(&Route::Simple) {
            warn!(
                "Simple solver invoked with route {:?}",
                state.route().map(Route::as_str)
            );
        }

        let question = state.question().as_str().to_string();
        let prompt = simple_solver_prompt(&question);

        let reply = self
            .model
            .invoke(&[ChatMessage::user(prompt)])
            .await
            .map_err(ChatError::Model)?;

        info!("Simple solver produced {} characters", reply.content.len());

        state.set_answer(reply.content.clone())?;
        state.add_messages(vec![ChatMessage::user(question), reply]);
        Ok(state)
    }
}

#[async_trait]
impl GraphNode for SolveSimpleProblem {
    fn name(&self) -> &'static str {
        "simple"
    }

    async fn run(&self, state: ChatState) -> ChatResult<ChatState> {
        self.execute(state).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{MessageRole, Question};
    use anyhow::Result;
    use std::sync::Mutex;

    struct EchoModel {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChatModel for EchoModel {
        async fn invoke(&self, messages: &[ChatMessage]) -> Result<ChatMessage> {
            let prompt = messages
                .iter()
                .map(|m| m.content.clone())
                .collect::<Vec<_>>()
                .join("\n");
            self.seen.lock().unwrap().push(prompt);
            Ok(ChatMessage::assistant("2 + 2 = 4\n\nFinal answer: 4"))
        }

        fn model_name(&self) -> &str {
            "echo"
        }
    }

    fn routed_state() -> ChatState {
        let mut state = ChatState::new(Question::new("What is 2+2?").unwrap());
        state.set_route(Route::Simple);
        state
    }

    #[test]
    fn test_prompt_contains_rules_and_question() {
        let prompt = simple_solver_prompt("What is 2+2?");
        assert!(prompt.contains("Solve the question step by step."));
        assert!(prompt.contains("Always provide the final answer."));
        assert!(prompt.trim_end().ends_with("User question:\nWhat is 2+2?"));
    }

    #[tokio::test]
    async fn test_answer_is_attached_to_state() {
        let model = Arc::new(EchoModel {
            seen: Mutex::new(Vec::new()),
        });
        let solver = SolveSimpleProblem::new(model.clone());

        let state = solver.execute(routed_state()).await.unwrap();

        assert_eq!(state.answer(), Some("2 + 2 = 4\n\nFinal answer: 4"));
        assert_eq!(state.messages().len(), 2);
        assert_eq!(state.messages()[0].role, MessageRole::User);
        assert_eq!(state.messages()[0].content, "What is 2+2?");
        assert_eq!(state.messages()[1].role, MessageRole::Assistant);

        let seen = model.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].contains("expert in mathematical problem solving"));
    }

    #[tokio::test]
    async fn test_existing_history_is_kept() {
        let model = Arc::new(EchoModel {
            seen: Mutex::new(Vec::new()),
        });
        let solver = SolveSimpleProblem::new(model);

        let mut state = ChatState::with_history(
            Question::new("What is 2+2?").unwrap(),
            vec![ChatMessage::user("hi"), ChatMessage::assistant("hello")],
        );
        state.set_route(Route::Simple);

        let state = solver.execute(state).await.unwrap();
        assert_eq!(state.messages().len(), 4);
        assert_eq!(state.messages()[0].content, "hi");
    }
}
