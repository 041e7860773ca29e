//! Session-level error model.
//!
//! Only the async lifecycle and catalog-delegation operations can fail.
//! Boolean authorization queries are total and never surface these.

use thiserror::Error;

use stagedesk_catalog::CatalogError;

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A catalog or grant fetch failed. The session has already fallen back
    /// to an empty grant set; this is surfaced for retry affordances.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// An operation that needs an authenticated user was called without one.
    #[error("no authenticated user")]
    NotAuthenticated,
}
