//! Typed resolved-style values read from the host
//!
//! The host exposes resolved (computed) style as typed values rather than raw
//! keyword strings, and this module defines those types together with keyword
//! parsing for hosts that sit on top of a string-based style system.
//!
//! Only the properties this engine actually reasons about are modeled:
//! `position` and z-index (the Wrapper Resolver's floating/layered tests),
//! `overflow-y` (the Scroll-Context Resolver), and `display`/`visibility`
//! (manual-pair visibility gating and the show/hide dance of a positioning
//! pass).

use std::fmt;

/// Resolved `position` property value
///
/// # Examples
///
/// ```
/// use floatanchor::style::Position;
///
/// let pos = Position::parse("absolute").unwrap();
/// assert!(pos.is_floating());
/// assert!(!Position::Static.is_floating());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Position {
  /// Normal flow, no positioning offset (default)
  #[default]
  Static,
  /// Normal flow, offset relative to itself
  Relative,
  /// Out of flow, positioned against the containing block
  Absolute,
  /// Out of flow, positioned against the viewport
  Fixed,
  /// Hybrid between relative and fixed
  Sticky,
}

impl Position {
  /// Parses a position keyword, case-insensitively
  ///
  /// Returns `None` for unrecognized keywords.
  ///
  /// # Examples
  ///
  /// ```
  /// use floatanchor::style::Position;
  ///
  /// assert_eq!(Position::parse("fixed"), Some(Position::Fixed));
  /// assert_eq!(Position::parse("FIXED"), Some(Position::Fixed));
  /// assert_eq!(Position::parse("floating"), None);
  /// ```
  pub fn parse(value: &str) -> Option<Self> {
    match value.trim().to_ascii_lowercase().as_str() {
      "static" => Some(Self::Static),
      "relative" => Some(Self::Relative),
      "absolute" => Some(Self::Absolute),
      "fixed" => Some(Self::Fixed),
      "sticky" => Some(Self::Sticky),
      _ => None,
    }
  }

  /// True for values taken out of normal flow entirely
  ///
  /// These are the values that mark a node as a floating container in the
  /// Wrapper Resolver's climb.
  pub fn is_floating(self) -> bool {
    matches!(self, Self::Absolute | Self::Fixed)
  }
}

impl fmt::Display for Position {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let keyword = match self {
      Self::Static => "static",
      Self::Relative => "relative",
      Self::Absolute => "absolute",
      Self::Fixed => "fixed",
      Self::Sticky => "sticky",
    };
    f.write_str(keyword)
  }
}

/// Resolved `overflow-y` property value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Overflow {
  /// Content spills out of the box (default)
  #[default]
  Visible,
  /// Content is clipped, no scrolling
  Hidden,
  /// Always a scroll container
  Scroll,
  /// Scroll container when content overflows
  Auto,
  /// Clipped with no scrolling mechanism at all
  Clip,
}

impl Overflow {
  /// Parses an overflow keyword, case-insensitively
  pub fn parse(value: &str) -> Option<Self> {
    match value.trim().to_ascii_lowercase().as_str() {
      "visible" => Some(Self::Visible),
      "hidden" => Some(Self::Hidden),
      "scroll" => Some(Self::Scroll),
      "auto" => Some(Self::Auto),
      "clip" => Some(Self::Clip),
      _ => None,
    }
  }

  /// True for values that can establish a scroll context
  ///
  /// Style alone is not sufficient for the Scroll-Context Resolver: the node
  /// must also actually overflow (scroll height above client height).
  pub fn is_scroll_container(self) -> bool {
    matches!(self, Self::Scroll | Self::Auto)
  }
}

impl fmt::Display for Overflow {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let keyword = match self {
      Self::Visible => "visible",
      Self::Hidden => "hidden",
      Self::Scroll => "scroll",
      Self::Auto => "auto",
      Self::Clip => "clip",
    };
    f.write_str(keyword)
  }
}

/// Resolved `display` property value, collapsed to what the engine cares about
///
/// Anything that is not `none` behaves identically for pairing and placement
/// purposes, so the long tail of display types is folded into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Display {
  /// Not rendered at all
  None,
  /// Block-level box; what a positioning pass forces the panel to
  #[default]
  Block,
  /// Any other rendered display type
  Other,
}

impl Display {
  /// Parses a display keyword, case-insensitively
  ///
  /// Never fails: unknown keywords are rendered-something, i.e. `Other`.
  pub fn parse(value: &str) -> Self {
    match value.trim().to_ascii_lowercase().as_str() {
      "none" => Self::None,
      "block" => Self::Block,
      _ => Self::Other,
    }
  }
}

impl fmt::Display for Display {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let keyword = match self {
      Self::None => "none",
      Self::Block => "block",
      Self::Other => "other",
    };
    f.write_str(keyword)
  }
}

/// Resolved `visibility` property value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
  /// Painted normally (default)
  #[default]
  Visible,
  /// Occupies layout space but is not painted
  Hidden,
}

impl Visibility {
  /// Parses a visibility keyword, case-insensitively
  ///
  /// `collapse` paints like `hidden` for the purposes of this engine.
  pub fn parse(value: &str) -> Option<Self> {
    match value.trim().to_ascii_lowercase().as_str() {
      "visible" => Some(Self::Visible),
      "hidden" | "collapse" => Some(Self::Hidden),
      _ => None,
    }
  }
}

impl fmt::Display for Visibility {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let keyword = match self {
      Self::Visible => "visible",
      Self::Hidden => "hidden",
    };
    f.write_str(keyword)
  }
}

/// Parses a resolved z-index value into a layering number
///
/// `auto`, garbage, and empty strings all resolve to `None`. The Wrapper
/// Resolver treats a node as layered only when this parses to a positive
/// integer.
///
/// # Examples
///
/// ```
/// use floatanchor::style::parse_z_index;
///
/// assert_eq!(parse_z_index("3"), Some(3));
/// assert_eq!(parse_z_index("auto"), None);
/// assert_eq!(parse_z_index(""), None);
/// ```
pub fn parse_z_index(value: &str) -> Option<i32> {
  value.trim().parse().ok()
}
