//! Wrapper Resolver: finds a panel's true floating container
//!
//! Rule matching usually lands on a nested content node: the list inside a
//! menu, not the positioned box that floats the menu. The page never says
//! which ancestor is the real container, so this resolver climbs and guesses:
//! a node is interesting when it is *floating* (resolved position absolute or
//! fixed) or *layered* (resolved z-index a positive integer), and the most
//! recently seen interesting node wins.
//!
//! Two short-circuits end the climb early:
//! - an interesting node whose immediate parent is the document root is
//!   almost certainly the intended wrapper, and is returned on the spot;
//! - a node carrying a known framework-root marker attribute is returned
//!   regardless of its floating status.
//!
//! If the bounded climb finds nothing interesting, the originally matched
//! node is returned unchanged.

use crate::ancestry::{climb, Visit};
use crate::config::EngineConfig;
use crate::host::{HostTree, NodeId};

/// Resolves the floating container for a directly matched panel node
///
/// Never fails: the worst case is returning `panel` itself.
pub fn find_wrapper(host: &dyn HostTree, panel: NodeId, config: &EngineConfig) -> NodeId {
  let root = host.root();
  let wrapper = climb(host, panel, config.wrapper_climb_limit, |node| {
    if carries_root_marker(host, node, config) {
      return Visit::Return;
    }
    let style = host.resolved_style(node);
    let floating = style.position.is_floating();
    let layered = style.z_index.is_some_and(|z| z > 0);
    if floating || layered {
      if host.parent(node) == Some(root) {
        return Visit::Return;
      }
      return Visit::Mark;
    }
    Visit::Continue
  });
  wrapper.unwrap_or(panel)
}

fn carries_root_marker(host: &dyn HostTree, node: NodeId, config: &EngineConfig) -> bool {
  config
    .wrapper_root_markers
    .iter()
    .any(|marker| host.has_attribute(node, marker))
}
