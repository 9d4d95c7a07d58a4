use thiserror::Error;

/// The three user-visible error kinds. All are non-fatal: the engine resets
/// its expression buffers to empty and waits for new input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("division by zero")]
    DivideByZero,

    #[error("{0}")]
    MathDomainError(String),

    #[error("invalid expression")]
    InvalidExpression,
}
