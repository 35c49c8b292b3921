//! Core business logic - framework-agnostic editor models and report
//! aggregation.
//!
//! Each edit screen is a plain state struct driven by explicit operations
//! (load, field change, add/remove line, submit) that take the store
//! collaborator as a parameter, so the logic runs identically under the HTTP
//! client and the in-memory test fakes. All operations take `&mut self`,
//! which serializes them per screen instance: overlapping loads or
//! bill refetches cannot race by construction.

pub mod buyer;
pub mod invoice;
pub mod payment;
pub mod report;
pub mod validate;

/// What a line removal did, so the caller can surface the right feedback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Nothing happened: the collection must stay non-empty, or the index
    /// was out of range.
    Refused,
    /// The user declined the confirmation dialog.
    Cancelled,
    /// The line only existed in memory and was dropped without a network
    /// call.
    RemovedLocally,
    /// The line was deleted server-side and the editor resynchronized.
    Deleted,
}
