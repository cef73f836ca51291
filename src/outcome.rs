//! src/outcome.rs
//! Terminal state of a derivation that was allowed to run to completion or was cancelled.

/// Result of a cancellable derivation.
///
/// Failures travel in the surrounding `Result`; this type only separates
/// "finished" from "abandoned at a cancellation check point". A cancelled
/// derivation carries no data: partial key material is dropped (and zeroized)
/// before this value is produced.
#[must_use = "a derivation may have been cancelled"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The derivation ran to completion.
    Complete(T),
    /// Cancellation was observed before the derivation finished.
    Cancelled,
}

impl<T> Outcome<T> {
    /// `true` if the derivation was abandoned.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }

    /// `true` if the derivation finished.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Outcome::Complete(_))
    }

    /// Converts into an `Option`, discarding the cancellation marker.
    pub fn complete(self) -> Option<T> {
        match self {
            Outcome::Complete(value) => Some(value),
            Outcome::Cancelled => None,
        }
    }

    /// Maps the completed value, leaving `Cancelled` untouched.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Complete(value) => Outcome::Complete(f(value)),
            Outcome::Cancelled => Outcome::Cancelled,
        }
    }
}
