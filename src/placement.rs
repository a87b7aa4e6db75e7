//! Geometry Engine: computes and applies panel placement
//!
//! Split into a pure core and an I/O shell. [`compute_placement`] is a pure
//! function from measured rectangles to a [`PlacementResult`]; placement
//! side, viewport clamping, and the 90%-visibility gate all live there, so
//! they can be tested without a host. [`position_panel`] wraps it with the
//! host reads and writes of one full positioning pass.
//!
//! A pass is idempotent and safe to repeat on every scroll or resize tick:
//! it re-measures, recomputes, and rewrites the same styles. Nothing about
//! a previous pass is remembered.
//!
//! Degenerate geometry never errors. A detached trigger measures as a zero
//! rectangle, its visibility ratio is defined as 0, and the panel is simply
//! hidden until the tree recovers.

use crate::config::{EngineConfig, HorizontalAlign, PlacementConfig, VerticalSide};
use crate::discovery::Pair;
use crate::geometry::{visibility_ratio, EdgeOffsets, Rect, Size};
use crate::host::{HostTree, StyleWrite};
use crate::scroll::ScrollContext;
use crate::style::{Display, Position, Visibility};

/// The ephemeral output of one positioning pass
///
/// Never persisted; recomputed from fresh measurements on every pass. `top`
/// and `left` are absolute viewport coordinates before any parent-shift
/// compensation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementResult {
  /// Final top coordinate, viewport space
  pub top: f32,
  /// Final left coordinate, viewport space
  pub left: f32,
  /// Which side of the trigger the panel ended up on
  pub vertical: VerticalSide,
  /// 1.0 when shown, 0.0 when hidden by the visibility gate
  pub opacity: f32,
  /// Whether the panel accepts pointer interaction
  pub pointer_events: bool,
  /// Clip insets for a partially visible panel, `None` for no clipping
  pub clip: Option<EdgeOffsets>,
}

/// Computes placement for one panel from measured geometry
///
/// `frame` is the scroll context's visible rectangle, or `None` when the
/// context is the viewport (no clipping test at all). `config` is the pair's
/// placement override, absent for plain rule-discovered pairs.
pub fn compute_placement(
  trigger: Rect,
  panel: Size,
  viewport: Size,
  frame: Option<Rect>,
  config: Option<&PlacementConfig>,
  engine: &EngineConfig,
) -> PlacementResult {
  // Vertical side: an explicit placement wins outright; otherwise default
  // below, flipping above when the space under the trigger cannot fit the
  // panel.
  let vertical = match config.and_then(|c| c.placement.vertical) {
    Some(side) => side,
    None => {
      if viewport.height - trigger.max_y() < panel.height {
        VerticalSide::Top
      } else {
        VerticalSide::Bottom
      }
    }
  };

  let mut top = match vertical {
    VerticalSide::Bottom => trigger.max_y(),
    VerticalSide::Top => trigger.min_y() - panel.height,
  };

  let horizontal = config.map(|c| c.placement.horizontal).unwrap_or_default();
  let mut left = match horizontal {
    HorizontalAlign::Left => trigger.min_x(),
    HorizontalAlign::Right => trigger.max_x() - panel.width,
    HorizontalAlign::Center => trigger.min_x() + trigger.width() / 2.0 - panel.width / 2.0,
  };

  if let Some(config) = config {
    top += config.offset_y;
    left += config.offset_x;
  }

  // Horizontal clamp: never within edge_margin of either viewport edge.
  if left + panel.width > viewport.width - engine.edge_margin {
    left = viewport.width - panel.width - engine.edge_margin;
  }
  if left < engine.edge_margin {
    left = engine.edge_margin;
  }

  let (opacity, pointer_events, clip) = match frame {
    None => (1.0, true, None),
    Some(frame) => {
      let ratio = visibility_ratio(trigger, frame);
      if ratio < engine.visibility_threshold {
        // Under the threshold the panel is hidden outright, not clipped.
        (0.0, false, None)
      } else {
        (1.0, true, clip_insets(top, left, panel, frame))
      }
    }
  };

  PlacementResult {
    top,
    left,
    vertical,
    opacity,
    pointer_events,
    clip,
  }
}

/// Directional insets for the parts of the panel outside the frame
///
/// Negative protrusions clamp to zero. Returns `None` when the clip would
/// erase the panel entirely on either axis, which clears clipping instead.
fn clip_insets(top: f32, left: f32, panel: Size, frame: Rect) -> Option<EdgeOffsets> {
  let insets = EdgeOffsets::new(
    (frame.min_y() - top).max(0.0),
    (left + panel.width - frame.max_x()).max(0.0),
    (top + panel.height - frame.max_y()).max(0.0),
    (frame.min_x() - left).max(0.0),
  );
  let erased_vertically = insets.top + insets.bottom >= panel.height;
  let erased_horizontally = insets.left + insets.right >= panel.width;
  if erased_vertically || erased_horizontally {
    None
  } else {
    Some(insets)
  }
}

/// Runs one full positioning pass for a pair
///
/// Forces the panel into a floating, top-layered, block-visible, zero-margin
/// state; measures the residual offset its own positioning ancestor
/// introduces at coordinate origin ("parent shift"); measures trigger,
/// panel, and viewport; computes placement; writes the compensated
/// coordinates and visibility state; and makes the panel visible as the very
/// last write so a hidden flicker never reaches the screen.
pub fn position_panel(
  host: &dyn HostTree,
  pair: &Pair,
  context: &ScrollContext,
  engine: &EngineConfig,
) -> PlacementResult {
  let panel = pair.panel;

  // Reset into a measurable state.
  host.write_style(panel, StyleWrite::Position(Position::Fixed));
  host.write_style(panel, StyleWrite::ZIndex(engine.panel_layer));
  host.write_style(panel, StyleWrite::Display(Display::Block));
  host.write_style(panel, StyleWrite::Visibility(Visibility::Hidden));
  host.write_style(panel, StyleWrite::Margin(0.0));

  // Calibrate: at origin, any remaining offset is the shift introduced by
  // the panel's positioning ancestor, to be subtracted from the final
  // coordinates.
  host.write_style(panel, StyleWrite::Top(0.0));
  host.write_style(panel, StyleWrite::Left(0.0));
  let parent_shift = host.bounding_rect(panel).origin;

  let trigger_rect = host.bounding_rect(pair.trigger);
  let panel_size = host.bounding_rect(panel).size;
  let viewport = host.viewport();
  let frame = context.frame(host);

  let placed = compute_placement(
    trigger_rect,
    panel_size,
    viewport,
    frame,
    pair.config.as_ref(),
    engine,
  );

  host.write_style(panel, StyleWrite::Top(placed.top - parent_shift.y));
  host.write_style(panel, StyleWrite::Left(placed.left - parent_shift.x));
  host.write_style(panel, StyleWrite::Opacity(placed.opacity));
  host.write_style(panel, StyleWrite::PointerEvents(placed.pointer_events));
  host.write_style(panel, StyleWrite::Clip(placed.clip));
  host.write_style(panel, StyleWrite::Visibility(Visibility::Visible));

  placed
}
