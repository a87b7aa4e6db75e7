//! Scroll-Context Resolver: finds the frame that clips a trigger
//!
//! A panel should disappear when its trigger scrolls out of whatever
//! container actually scrolls it. This resolver walks up from the trigger's
//! parent looking for the nearest ancestor that is a real scroll container:
//! resolved overflow-y of `scroll` or `auto` *and* scrollable content taller
//! than its visible client height. Style alone is not enough; plenty of
//! containers declare `overflow: auto` and never overflow.
//!
//! When no such ancestor exists the context is the viewport, which performs
//! no clipping test at all.

use crate::ancestry::{climb, Visit};
use crate::geometry::Rect;
use crate::host::{HostTree, NodeId};

/// Upper bound on the context climb, so cyclic parent chains terminate.
const SCROLL_CLIMB_LIMIT: u32 = 256;

/// The visibility frame established for one pair
///
/// Resolved once per pair at wiring time, on the assumption that a trigger's
/// nearest scrollable ancestor does not change after initial discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollContext {
  /// No scrollable ancestor; everything is always fully visible
  Viewport,
  /// A specific scrollable ancestor establishing the visible frame
  Element(NodeId),
}

impl ScrollContext {
  /// The context's current visible frame, `None` for the viewport
  ///
  /// The frame is re-measured on every positioning pass: the context
  /// *element* is fixed for the pair's lifetime, but a window resize can
  /// still move its rectangle.
  pub fn frame(&self, host: &dyn HostTree) -> Option<Rect> {
    match self {
      Self::Viewport => None,
      Self::Element(node) => Some(host.bounding_rect(*node)),
    }
  }
}

/// Finds the nearest scrollable ancestor of `trigger`, else the viewport
pub fn resolve_scroll_context(host: &dyn HostTree, trigger: NodeId) -> ScrollContext {
  let Some(parent) = host.parent(trigger) else {
    return ScrollContext::Viewport;
  };
  let found = climb(host, parent, SCROLL_CLIMB_LIMIT, |node| {
    let style = host.resolved_style(node);
    let scrolls = style.overflow_y.is_scroll_container()
      && host.scroll_height(node) > host.client_height(node);
    if scrolls {
      Visit::Return
    } else {
      Visit::Continue
    }
  });
  match found {
    Some(node) => ScrollContext::Element(node),
    None => ScrollContext::Viewport,
  }
}
