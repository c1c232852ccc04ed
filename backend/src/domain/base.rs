/// Building blocks shared by the domain types
use std::fmt::{self, Debug, Display};

/// Immutable value compared by content (questions, routes, vectors)
pub trait ValueObject: Clone + PartialEq + Debug {}

/// Object with a stable identity; two instances with the same id are the
/// same thing even if their content differs
pub trait Entity: Debug {
    type Id: ValueObject;

    fn id(&self) -> &Self::Id;
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Validation failures raised by domain constructors and state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation on construction
    InvalidValue(String),
    /// A state transition that is not allowed in the current state
    InvalidOperation(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::InvalidValue(msg) => write!(f, "Invalid value: {}", msg),
            DomainError::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
