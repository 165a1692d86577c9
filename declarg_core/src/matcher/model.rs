use thiserror::Error;

/// A problem with the user's input, collected during parsing rather than raised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Violation {
    /// A required (`+`) named option was never observed.
    #[error("Parameter {0} is required")]
    Required(String),

    /// A value taking short option appeared before the end of an aggregate token.
    #[error("Parameter {name} takes a value and cannot be aggregated in '{token}'")]
    InvalidAggregate {
        /// The canonical name of the offending definition.
        name: String,
        /// The whole aggregate token, as given.
        token: String,
    },
}
