//! Error kinds surfaced by the porcelain layer
//!
//! Operations recover from nothing: locks are released on the unwinding path
//! and the error is propagated to the caller verbatim. The kinds below let
//! embedding callers match on the failure class (via `anyhow::Error::downcast_ref`)
//! without parsing messages.

use crate::artifacts::objects::object_id::ObjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    /// An argument was null/empty or points outside the repository.
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    /// No `.git` directory where one is required.
    #[error("no git repository found at {0}")]
    RepositoryMissing(String),

    /// A revspec did not resolve to an object.
    #[error("cannot resolve revision '{0}'")]
    RefNotResolvable(String),

    /// The index lock could not be acquired or committed. Callers may retry.
    #[error("index update failed: {0}")]
    IndexUpdateFailed(String),

    /// The HEAD ref update failed at commit time.
    #[error("commit {oid} failed: {reason}")]
    CommitFailed { oid: ObjectId, reason: String },

    /// The HEAD ref update failed at checkout time.
    #[error("checkout of {oid} failed: {reason}")]
    CheckoutFailed { oid: ObjectId, reason: String },

    /// An object referenced from the index or a tree cannot be read.
    #[error("corrupt object {0}")]
    CorruptObject(ObjectId),

    /// Network or protocol failure during fetch or push.
    #[error("transport failure: {0}")]
    TransportFailure(String),

    /// Status reconciliation fell through its classification table.
    #[error("unexpected status case for '{0}'")]
    UnexpectedStatusCase(String),
}
