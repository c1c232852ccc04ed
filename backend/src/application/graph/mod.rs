/// Routing graph for the chat flow
mod error;
mod routing_graph;

pub use error::{ChatError, ChatResult};
pub use routing_graph::{select_branch, ChatGraph, GraphNode, GraphStep};
