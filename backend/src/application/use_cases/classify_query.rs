use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use crate::application::gateways::ChatModel;
use crate::application::graph::{ChatError, ChatResult, GraphNode};
use crate::domain::{aggregates::ChatState, entities::ChatMessage, value_objects::Route};

/// Build the classification prompt for a question
pub fn classification_prompt(question: &str) -> String {
    format!(
        r#"You are a classifier.

Analyze the user's query and classify whether it is:
- simple
- complex

Guidelines:

1. Output **simple** if the query involves:
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

2. Output **complex** if the query involves:
- Large or long numerical calculations
- Very complex integrals
- High-precision engineering or scientific math
- Problems requiring complex diagrams or exact computation

Rules:
- Respond with **only one of these two outputs**:
simple
complex
- Do NOT provide explanations.

User query:
{question}
"#
    )
}

/// Use case for classifying a question as simple or complex
///
/// Sends the classification prompt as a single user message and stores the
/// normalized reply as the route. The reply is not validated here: labels
/// other than `simple`/`complex` end up as `Route::Unrecognized`.
pub struct ClassifyQuery {
    model: Arc<dyn ChatModel>,
}

impl ClassifyQuery {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    pub async fn execute(&self, mut state: ChatState) -> ChatResult<ChatState> {
        let prompt = classification_prompt(state.question().as_str());

        let reply = self
            .model
            .invoke(&[ChatMessage::user(prompt)])
            .await
            .map_err(ChatError::Model)?;

        let route = Route::from_label(&reply.content);
        debug!("Raw classifier output: {:?}", reply.content);
        info!("Classified question as '{}'", route);

        state.set_route(route);
        Ok(state)
    }
}

#[async_trait]
impl GraphNode for ClassifyQuery {
    fn name(&self) -> &'static str {
        "query_classifier"
    }

    async fn run(&self, state: ChatState) -> ChatResult<ChatState> {
        self.execute(state).await
    }
}
