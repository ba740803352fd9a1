use thiserror::Error;

/// Errors surfaced by the lookup side of the locator contract.
///
/// Invalid arguments are a programming-error class: they are reported
/// synchronously to the caller and never swallowed or retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocatorError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
