//! Error classes shared by the domain services.

/// Broad failure category, deciding how a caller should react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// No identity; redirect to sign-in, never retry.
    Authentication,

    /// Identity lacks the capability for the operation.
    Authorization,

    /// Caller-fixable input or state problem.
    Validation,

    /// The addressed record does not exist for this caller.
    NotFound,

    /// A product cannot be bought as requested; the cart is left untouched.
    Availability,

    /// Storage could not complete; state is unchanged.
    Persistence,
}

impl ErrorClass {
    /// Whether the failed operation may be retried automatically.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Persistence)
    }
}
