//! Error types for the discovery-and-anchoring engine
//!
//! Almost everything that can go wrong here is tolerated rather than
//! surfaced: a selector that matches nothing, a trigger that fails the tag
//! allow-list, a custom strategy that reports failure: each simply excludes
//! one candidate from the current tick's pair set. These types exist so the
//! call sites can name what they are swallowing (and log it), not so errors
//! can escape: nothing is ever allowed to propagate out of a polling tick or
//! a notification callback into the host page.
//!
//! All errors use the `thiserror` crate for minimal boilerplate and proper
//! error trait implementations.

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the engine
#[derive(Error, Debug)]
pub enum Error {
  /// A candidate failed discovery; dropped, never surfaced
  #[error("discovery: {0}")]
  Discovery(#[from] DiscoveryError),

  /// A named custom strategy reported failure; treated as not-found
  #[error("strategy '{name}' failed: {message}")]
  Strategy {
    /// The registry name the rule referenced
    name: String,
    /// The strategy's own description of what went wrong
    message: String,
  },
}

/// Reasons a discovery candidate is excluded from the pair set
#[derive(Error, Debug)]
pub enum DiscoveryError {
  /// A selector, attribute, or strategy yielded nothing
  #[error("no matching node")]
  NotFound,

  /// The resolved trigger's tag is not on the allow-list, even after the
  /// immediate-parent fallback
  #[error("trigger tag '{tag}' is not an acceptable trigger kind")]
  InvalidTarget {
    /// Canonical tag name of the rejected node
    tag: String,
  },
}
