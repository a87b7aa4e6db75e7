//! Core geometry types for anchoring and visibility math
//!
//! All units are host pixels as reported by the host's bounding-rectangle
//! measurements. The coordinate system has its origin at the top-left corner
//! of the viewport:
//! - Positive X extends to the right
//! - Positive Y extends downward
//!
//! Rectangles here are always measured, never laid out: the host owns layout,
//! and this crate only reasons about the rectangles it hands back. Detached
//! nodes measure as zero rectangles, so every operation in this module must
//! tolerate zero and negative extents without panicking.

use std::fmt;

/// A 2D point in host pixel space
///
/// # Examples
///
/// ```
/// use floatanchor::geometry::Point;
///
/// let p = Point::new(10.0, 20.0);
/// assert_eq!(p.x, 10.0);
/// assert_eq!(Point::ZERO, Point::new(0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
  /// X coordinate (increases to the right)
  pub x: f32,
  /// Y coordinate (increases downward)
  pub y: f32,
}

impl Point {
  /// The origin (0, 0)
  pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

  /// Creates a new point at the given coordinates
  pub const fn new(x: f32, y: f32) -> Self {
    Self { x, y }
  }
}

impl fmt::Display for Point {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({}, {})", self.x, self.y)
  }
}

/// A 2D size in host pixels
///
/// Widths and heights coming from host measurements are expected to be
/// non-negative, but nothing enforces that; `area` clamps so a degenerate
/// measurement never produces a negative area.
///
/// # Examples
///
/// ```
/// use floatanchor::geometry::Size;
///
/// let size = Size::new(100.0, 50.0);
/// assert_eq!(size.area(), 5000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
  /// Width (horizontal extent)
  pub width: f32,
  /// Height (vertical extent)
  pub height: f32,
}

impl Size {
  /// A size with zero width and height
  pub const ZERO: Self = Self {
    width: 0.0,
    height: 0.0,
  };

  /// Creates a new size with the given dimensions
  pub const fn new(width: f32, height: f32) -> Self {
    Self { width, height }
  }

  /// Computes the area (width × height), clamped to zero
  ///
  /// # Examples
  ///
  /// ```
  /// use floatanchor::geometry::Size;
  ///
  /// assert_eq!(Size::new(10.0, 20.0).area(), 200.0);
  /// assert_eq!(Size::new(-5.0, 20.0).area(), 0.0);
  /// ```
  pub fn area(self) -> f32 {
    (self.width * self.height).max(0.0)
  }

  /// Returns true if either extent is zero or negative
  pub fn is_empty(self) -> bool {
    self.width <= 0.0 || self.height <= 0.0
  }
}

impl fmt::Display for Size {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}×{}", self.width, self.height)
  }
}

/// An axis-aligned rectangle in host pixel space
///
/// Defined by an origin point (top-left corner) and a size, matching the
/// shape of a host bounding-rectangle measurement.
///
/// # Examples
///
/// ```
/// use floatanchor::geometry::Rect;
///
/// let rect = Rect::from_xywh(10.0, 20.0, 100.0, 50.0);
/// assert_eq!(rect.min_x(), 10.0);
/// assert_eq!(rect.max_x(), 110.0);
/// assert_eq!(rect.max_y(), 70.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
  /// The top-left corner
  pub origin: Point,
  /// The width and height
  pub size: Size,
}

impl Rect {
  /// A zero-sized rectangle at the origin
  ///
  /// This is what a detached node measures as.
  pub const ZERO: Self = Self {
    origin: Point::ZERO,
    size: Size::ZERO,
  };

  /// Creates a new rectangle from an origin point and size
  pub const fn new(origin: Point, size: Size) -> Self {
    Self { origin, size }
  }

  /// Creates a rectangle from x, y, width, height components
  pub const fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
    Self {
      origin: Point::new(x, y),
      size: Size::new(width, height),
    }
  }

  /// Returns the width
  pub fn width(self) -> f32 {
    self.size.width
  }

  /// Returns the height
  pub fn height(self) -> f32 {
    self.size.height
  }

  /// Returns the x coordinate of the left edge
  pub fn min_x(self) -> f32 {
    self.origin.x
  }

  /// Returns the x coordinate of the right edge
  pub fn max_x(self) -> f32 {
    self.origin.x + self.size.width
  }

  /// Returns the y coordinate of the top edge
  pub fn min_y(self) -> f32 {
    self.origin.y
  }

  /// Returns the y coordinate of the bottom edge
  pub fn max_y(self) -> f32 {
    self.origin.y + self.size.height
  }

  /// Computes the area, clamped to zero
  pub fn area(self) -> f32 {
    self.size.area()
  }

  /// Computes the intersection of two rectangles
  ///
  /// Returns `None` when the rectangles do not overlap. Edge-touching
  /// rectangles intersect with zero area.
  ///
  /// # Examples
  ///
  /// ```
  /// use floatanchor::geometry::Rect;
  ///
  /// let a = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
  /// let b = Rect::from_xywh(5.0, 5.0, 10.0, 10.0);
  /// assert_eq!(a.intersection(b), Some(Rect::from_xywh(5.0, 5.0, 5.0, 5.0)));
  ///
  /// let c = Rect::from_xywh(20.0, 20.0, 10.0, 10.0);
  /// assert_eq!(a.intersection(c), None);
  /// ```
  pub fn intersection(self, other: Rect) -> Option<Rect> {
    let min_x = self.min_x().max(other.min_x());
    let min_y = self.min_y().max(other.min_y());
    let max_x = self.max_x().min(other.max_x());
    let max_y = self.max_y().min(other.max_y());

    if min_x > max_x || min_y > max_y {
      return None;
    }
    Some(Rect::from_xywh(min_x, min_y, max_x - min_x, max_y - min_y))
  }
}

impl fmt::Display for Rect {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} @ {}", self.size, self.origin)
  }
}

/// How much of `target` is visible inside `frame`, as a ratio in [0, 1]
///
/// Defined as intersection area over the target's own area. A zero-area
/// target (typically a detached node) has ratio 0, which downstream logic
/// treats as not visible.
///
/// # Examples
///
/// ```
/// use floatanchor::geometry::{visibility_ratio, Rect};
///
/// let target = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
/// let frame = Rect::from_xywh(0.0, 0.0, 10.0, 5.0);
/// assert_eq!(visibility_ratio(target, frame), 0.5);
///
/// assert_eq!(visibility_ratio(Rect::ZERO, frame), 0.0);
/// ```
pub fn visibility_ratio(target: Rect, frame: Rect) -> f32 {
  let target_area = target.area();
  if target_area <= 0.0 {
    return 0.0;
  }
  let visible = target
    .intersection(frame)
    .map_or(0.0, |overlap| overlap.area());
  (visible / target_area).clamp(0.0, 1.0)
}

/// Per-side insets describing how far a panel protrudes past its frame
///
/// Follows the box-model side order: top, right, bottom, left. Used as the
/// clip region applied to a partially visible panel.
///
/// # Examples
///
/// ```
/// use floatanchor::geometry::EdgeOffsets;
///
/// let clip = EdgeOffsets::new(4.0, 0.0, 0.0, 12.0);
/// assert_eq!(clip.top, 4.0);
/// assert_eq!(clip.left, 12.0);
/// assert!(!clip.is_zero());
/// assert!(EdgeOffsets::ZERO.is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeOffsets {
  /// Top edge inset
  pub top: f32,
  /// Right edge inset
  pub right: f32,
  /// Bottom edge inset
  pub bottom: f32,
  /// Left edge inset
  pub left: f32,
}

impl EdgeOffsets {
  /// Zero insets on all sides
  pub const ZERO: Self = Self {
    top: 0.0,
    right: 0.0,
    bottom: 0.0,
    left: 0.0,
  };

  /// Creates insets with individual values for each side
  pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
    Self {
      top,
      right,
      bottom,
      left,
    }
  }

  /// Returns true if every side is zero
  pub fn is_zero(self) -> bool {
    self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0 && self.left == 0.0
  }
}

impl fmt::Display for EdgeOffsets {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "[t:{}, r:{}, b:{}, l:{}]",
      self.top, self.right, self.bottom, self.left
    )
  }
}
