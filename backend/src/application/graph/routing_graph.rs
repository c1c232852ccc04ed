/// Classify-then-dispatch graph for chat questions
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use super::error::{ChatError, ChatResult};
use crate::application::gateways::ChatModel;
use crate::application::use_cases::{ClassifyQuery, SolveSimpleProblem};
use crate::domain::{aggregates::ChatState, value_objects::{Question, Route}};

/// A step of the chat graph that transforms the state
#[async_trait]
pub trait GraphNode: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self, state: ChatState) -> ChatResult<ChatState>;
}

/// Position of a question in the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphStep {
    Start,
    Classified,
    Simple,
    Complex,
    End,
}

impl fmt::Display for GraphStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GraphStep::Start => "start",
            GraphStep::Classified => "classified",
            GraphStep::Simple => "simple",
            GraphStep::Complex => "complex",
            GraphStep::End => "end",
        };
        write!(f, "{}", name)
    }
}

/// Conditional edge out of the classifier
pub fn select_branch(route: Option<&Route>) -> ChatResult<GraphStep> {
    match route {
        Some(Route::Simple) => Ok(GraphStep::Simple),
        Some(Route::Complex) => Ok(GraphStep::Complex),
        Some(Route::Unrecognized(label)) => Err(ChatError::UnrecognizedRoute(label.clone())),
        None => Err(ChatError::MissingRoute),
    }
}

/// Chat graph: classifier → route node → end
///
/// Every question passes through exactly one classifier call and at most one
/// route node. There are no cycles. The complex branch is optional; without
/// it, questions classified as complex fail with `RouteUnavailable`.
pub struct ChatGraph {
    classifier: Arc<dyn GraphNode>,
    simple: Arc<dyn GraphNode>,
    complex: Option<Arc<dyn GraphNode>>,
}

impl ChatGraph {
    pub fn new(classifier: Arc<dyn GraphNode>, simple: Arc<dyn GraphNode>) -> Self {
        ChatGraph {
            classifier,
            simple,
            complex: None,
        }
    }

    /// Build the default graph where classifier and solver share one model
    pub fn from_model(model: Arc<dyn ChatModel>) -> Self {
        Self::new(
            Arc::new(ClassifyQuery::new(model.clone())),
            Arc::new(SolveSimpleProblem::new(model)),
        )
    }

    pub fn with_complex_node(mut self, node: Arc<dyn GraphNode>) -> Self {
        self.complex = Some(node);
        self
    }

    pub fn has_complex_node(&self) -> bool {
        self.complex.is_some()
    }

    /// Answer a question from scratch
    pub async fn ask(&self, question: &str) -> ChatResult<ChatState> {
        let question = Question::new(question)?;
        self.invoke(ChatState::new(question)).await
    }

    /// Run a state through the graph until it reaches the end
    pub async fn invoke(&self, mut state: ChatState) -> ChatResult<ChatState> {
        let mut step = GraphStep::Start;

        loop {
            let next = match step {
                GraphStep::Start => {
                    state = self.run_node(self.classifier.as_ref(), state).await?;
                    GraphStep::Classified
                }
                GraphStep::Classified => select_branch(state.route())?,
                GraphStep::Simple => {
                    state = self.run_node(self.simple.as_ref(), state).await?;
                    GraphStep::End
                }
                GraphStep::Complex => {
                    let node = self
                        .complex
                        .as_ref()
                        .ok_or(ChatError::RouteUnavailable(Route::Complex))?;
                    state = self.run_node(node.as_ref(), state).await?;
                    GraphStep::End
                }
                GraphStep::End => {
                    info!(
                        "Finished question with route '{}'",
                        state.route().map(Route::as_str).unwrap_or("none")
                    );
                    return Ok(state);
                }
            };

            debug!("Graph transition {} -> {}", step, next);
            step = next;
        }
    }

    async fn run_node(&self, node: &dyn GraphNode, state: ChatState) -> ChatResult<ChatState> {
        debug!("Running node '{}'", node.name());
        node.run(state).await
    }
}
