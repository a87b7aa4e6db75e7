//! Bounded upward traversal over the host tree
//!
//! Both resolvers in this crate are heuristic ancestor climbs standing in
//! for structure the page never declares: the Wrapper Resolver hunts for a
//! panel's real floating container, the Scroll-Context Resolver for a
//! trigger's clipping ancestor. They share this one walker so the safety
//! rules live in a single place: the climb is depth-bounded (malformed or
//! cyclic parent chains must still terminate), it never visits the document
//! root, and a caller that matched nothing gets its fallback back rather
//! than an error.

use crate::host::{HostTree, NodeId};

/// What to do after visiting one ancestor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
  /// Keep climbing
  Continue,
  /// Remember this node as the best match so far, then keep climbing
  Mark,
  /// Stop and return this node immediately
  Return,
}

/// Climbs from `start` toward the root, visiting each node below the root
///
/// The visitor decides per node whether to continue, mark the node as the
/// current best match, or short-circuit. When the climb exhausts `limit`
/// steps or reaches the document root, the most recently marked node is
/// returned; `None` if nothing was ever marked.
///
/// `start` itself is visited first, so a caller that wants a parents-only
/// walk passes `host.parent(start)` as the start.
pub fn climb<F>(host: &dyn HostTree, start: NodeId, limit: u32, mut visit: F) -> Option<NodeId>
where
  F: FnMut(NodeId) -> Visit,
{
  let root = host.root();
  let mut current = start;
  let mut best: Option<NodeId> = None;

  for _ in 0..limit {
    if current == root {
      break;
    }
    match visit(current) {
      Visit::Continue => {}
      Visit::Mark => best = Some(current),
      Visit::Return => return Some(current),
    }
    match host.parent(current) {
      Some(parent) => current = parent,
      None => break,
    }
  }
  best
}
