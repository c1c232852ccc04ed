use thiserror::Error;

use crate::domain::{base::DomainError, value_objects::Route};

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Invalid chat input: {0}")]
    Domain(#[from] DomainError),

    #[error("Language model call failed: {0:#}")]
    Model(#[source] anyhow::Error),

    #[error("Classifier did not produce a route")]
    MissingRoute,

    #[error("Classifier returned an unrecognized route: '{0}'")]
    UnrecognizedRoute(String),

    #[error("No node is configured for route '{0}'")]
    RouteUnavailable(Route),
}

pub type ChatResult<T> = Result<T, ChatError>;
