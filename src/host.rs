//! The narrow interface to the host rendering environment
//!
//! Everything this engine knows about the visual tree (queries, attributes,
//! resolved styles, rectangles, timers, and change notifications) comes
//! through the two traits here. The engine never owns a node: [`NodeId`] is
//! an opaque handle the host can map back to whatever it renders, and a
//! handle for a node that has since been detached must stay safe to use
//! (queries return nothing, measurements return zero rectangles).
//!
//! All methods take `&self`. Hosts that mutate (style writes, timer tables)
//! are expected to use interior mutability, because the engine's callbacks
//! re-enter the host from inside host-driven notifications.

use std::time::Duration;

use crate::geometry::{EdgeOffsets, Rect, Size};
use crate::style::{Display, Overflow, Position, Visibility};

/// Opaque handle to a node in the host's visual tree
///
/// Carries no meaning of its own; only the host can interpret it. Handles
/// are never invalidated from the engine's point of view; a stale handle
/// simply measures as a zero rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// The subset of a node's resolved style this engine reads
///
/// Hosts fill in whichever fields they can resolve; the defaults (static,
/// visible overflow, block, visible) are the neutral values that make a node
/// uninteresting to every resolver.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResolvedStyle {
  /// Resolved `position`
  pub position: Position,
  /// Resolved `overflow-y`
  pub overflow_y: Overflow,
  /// Resolved `display`
  pub display: Display,
  /// Resolved `visibility`
  pub visibility: Visibility,
  /// Resolved z-index, `None` for `auto`
  pub z_index: Option<i32>,
}

/// A single typed style write
///
/// The engine writes styles one property at a time so hosts can map each
/// write onto whatever style mechanism they have without diffing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleWrite {
  /// Set `position`
  Position(Position),
  /// Set `z-index`
  ZIndex(i32),
  /// Set `display`
  Display(Display),
  /// Set `visibility`
  Visibility(Visibility),
  /// Set all margins to the given pixel value
  Margin(f32),
  /// Set `top`, in pixels
  Top(f32),
  /// Set `left`, in pixels
  Left(f32),
  /// Set opacity in [0, 1]
  Opacity(f32),
  /// Enable or disable pointer interaction
  PointerEvents(bool),
  /// Apply a rectangular clip inset, or clear clipping with `None`
  Clip(Option<EdgeOffsets>),
}

/// Read-only-plus-style-writes access to the host's visual tree
pub trait HostTree {
  /// Queries the tree with a host-interpreted selector, in document order
  ///
  /// The engine treats selectors as opaque strings; authoring them is the
  /// rule writer's business and matching them is the host's.
  fn query(&self, selector: &str) -> Vec<NodeId>;

  /// Identity lookup by the host's identity attribute
  fn element_by_id(&self, id: &str) -> Option<NodeId>;

  /// The node's parent, or `None` at (or detached from) the tree root
  fn parent(&self, node: NodeId) -> Option<NodeId>;

  /// The document root element
  fn root(&self) -> NodeId;

  /// Canonical upper-case tag name
  fn tag_name(&self, node: NodeId) -> String;

  /// Reads an attribute value, `None` when absent
  fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

  /// Whether the attribute is present at all
  fn has_attribute(&self, node: NodeId, name: &str) -> bool {
    self.attribute(node, name).is_some()
  }

  /// The node's resolved style
  fn resolved_style(&self, node: NodeId) -> ResolvedStyle;

  /// Writes one style property on the node
  fn write_style(&self, node: NodeId, write: StyleWrite);

  /// The node's bounding rectangle in viewport coordinates
  ///
  /// Must return [`Rect::ZERO`] for detached nodes rather than failing.
  fn bounding_rect(&self, node: NodeId) -> Rect;

  /// Total scrollable content height of the node
  fn scroll_height(&self, node: NodeId) -> f32;

  /// Visible client height of the node
  fn client_height(&self, node: NodeId) -> f32;

  /// Current viewport dimensions
  fn viewport(&self) -> Size;
}

/// Token identifying a scheduled timer, for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(pub u64);

/// Timers and change notifications provided by the host
///
/// The host clock is monotonic from the engine's point of view; callbacks
/// run single-threaded and never interleave. Scroll and resize subscriptions
/// have no unsubscribe: once wired, a pair is positioned for the remainder
/// of the page's lifetime.
pub trait HostEvents {
  /// Schedules `callback` to run every `period` until cancelled
  fn repeat(&self, period: Duration, callback: Box<dyn FnMut()>) -> TimerToken;

  /// Schedules `callback` to run once after `delay`
  ///
  /// A zero delay means "next available tick", not synchronously.
  fn once(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerToken;

  /// Cancels a scheduled timer; unknown or expired tokens are a no-op
  fn cancel(&self, token: TimerToken);

  /// Subscribes to scroll notifications scoped to one node
  fn on_scroll(&self, node: NodeId, callback: Box<dyn FnMut()>);

  /// Subscribes to global viewport resize notifications
  fn on_resize(&self, callback: Box<dyn FnMut()>);
}
