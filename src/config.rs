//! The declarative configuration surface
//!
//! Everything here is pure data: ordered discovery rules, manual overrides,
//! placement keywords, and the engine's tuning knobs, all deserializable so
//! rule sets can be authored and shipped as config rather than code. The one
//! exception is [`StrategyRegistry`], the name-to-function table custom rules
//! resolve through; functions are code, so the registry lives beside the
//! config instead of inside it.
//!
//! Defaults mirror the knobs this engine has always shipped with: a 100 ms
//! poll, a 5 s acquisition deadline, a 30-step wrapper climb, a 10 px
//! viewport edge margin, and a 90% trigger-visibility threshold.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer};

use crate::error::Result;
use crate::host::{HostTree, NodeId};

/// How a rule resolves the panel paired with a matched trigger
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MatchMode {
  /// Read `source_attr` off the trigger, then find the node whose
  /// `target_attr` carries that value
  Attribute {
    /// Attribute read from the trigger
    source_attr: String,
    /// Attribute matched on panel candidates; `"id"` uses identity lookup
    target_attr: String,
  },
  /// Delegate to a named function in the [`StrategyRegistry`]
  Custom {
    /// Registry key of the strategy function
    strategy: String,
  },
}

/// One declarative trigger/panel pairing rule
///
/// Rules are immutable, author-provided, and evaluated in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Rule {
  /// Human-readable rule name, used only in logs
  pub name: String,
  /// Host-interpreted selector producing candidate trigger nodes
  pub selector: String,
  /// Ancestor steps applied to each candidate before validation
  ///
  /// Lets a rule select a deeply nested node (an icon inside a button) while
  /// tracking its wrapping ancestor as the trigger.
  #[serde(default)]
  pub climb_depth: u32,
  /// How the paired panel is resolved
  #[serde(flatten)]
  pub mode: MatchMode,
}

/// Vertical side a panel is placed on, relative to its trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalSide {
  /// Panel above the trigger
  Top,
  /// Panel below the trigger
  Bottom,
}

/// Horizontal alignment of a panel against its trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalAlign {
  /// Left edges aligned (default)
  #[default]
  Left,
  /// Right edges aligned
  Right,
  /// Panel centered over the trigger
  Center,
}

/// A parsed placement keyword
///
/// Authored as a single camel-case keyword like `"bottomCenter"` or
/// `"topRight"`. Parsing is by keyword containment and never fails: a
/// string naming no vertical side leaves the side unset (meaning "below,
/// with auto-flip"), and a string naming no horizontal alignment means
/// left-aligned.
///
/// # Examples
///
/// ```
/// use floatanchor::config::{HorizontalAlign, Placement, VerticalSide};
///
/// let p: Placement = "bottomCenter".parse().unwrap();
/// assert_eq!(p.vertical, Some(VerticalSide::Bottom));
/// assert_eq!(p.horizontal, HorizontalAlign::Center);
///
/// let q: Placement = "topRight".parse().unwrap();
/// assert_eq!(q.vertical, Some(VerticalSide::Top));
/// assert_eq!(q.horizontal, HorizontalAlign::Right);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placement {
  /// Explicit vertical side, or `None` for default-below with auto-flip
  pub vertical: Option<VerticalSide>,
  /// Horizontal alignment
  pub horizontal: HorizontalAlign,
}

impl FromStr for Placement {
  type Err = Infallible;

  fn from_str(keyword: &str) -> std::result::Result<Self, Self::Err> {
    let lower = keyword.to_ascii_lowercase();
    let vertical = if lower.contains("top") {
      Some(VerticalSide::Top)
    } else if lower.contains("bottom") {
      Some(VerticalSide::Bottom)
    } else {
      None
    };
    let horizontal = if lower.contains("right") {
      HorizontalAlign::Right
    } else if lower.contains("center") {
      HorizontalAlign::Center
    } else {
      HorizontalAlign::Left
    };
    Ok(Self {
      vertical,
      horizontal,
    })
  }
}

impl<'de> Deserialize<'de> for Placement {
  fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    let keyword = String::deserialize(deserializer)?;
    match keyword.parse() {
      Ok(placement) => Ok(placement),
      Err(never) => match never {},
    }
  }
}

impl fmt::Display for Placement {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let vertical = match self.vertical {
      Some(VerticalSide::Top) => "top",
      Some(VerticalSide::Bottom) => "bottom",
      None => "auto",
    };
    let horizontal = match self.horizontal {
      HorizontalAlign::Left => "left",
      HorizontalAlign::Right => "right",
      HorizontalAlign::Center => "center",
    };
    write!(f, "{vertical}/{horizontal}")
  }
}

/// Placement and pixel-offset overrides carried by a pair
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
  /// Placement keyword
  pub placement: Placement,
  /// Horizontal pixel offset applied after placement resolution
  pub offset_x: f32,
  /// Vertical pixel offset applied after placement resolution
  pub offset_y: f32,
}

/// An explicit trigger/panel pairing that bypasses rule matching
///
/// Used when the tree carries no structural signal at all. Both selectors
/// must resolve to exactly one node, and the panel must be currently visible,
/// for the pair to be produced on a given tick.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ManualPair {
  /// Selector that must match exactly the trigger node
  pub trigger_selector: String,
  /// Selector that must match exactly the panel node
  pub panel_selector: String,
  /// Placement and offsets for this pair
  #[serde(default)]
  pub placement: PlacementConfig,
}

fn default_poll_interval_ms() -> u64 {
  100
}

fn default_poll_timeout_ms() -> u64 {
  5000
}

fn default_trigger_tags() -> Vec<String> {
  ["BUTTON", "INPUT", "DIV", "A", "SPAN", "ICON", "SVG"]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

fn default_wrapper_climb_limit() -> u32 {
  30
}

fn default_wrapper_root_markers() -> Vec<String> {
  ["data-v-root", "data-reactroot"]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

fn default_edge_margin() -> f32 {
  10.0
}

fn default_visibility_threshold() -> f32 {
  0.9
}

fn default_panel_layer() -> i32 {
  999_999
}

/// Full engine configuration: tuning knobs, rules, and manual overrides
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
  /// Discovery poll period, milliseconds
  pub poll_interval_ms: u64,
  /// Acquisition deadline, milliseconds
  pub poll_timeout_ms: u64,
  /// Canonical tag names acceptable as triggers
  pub trigger_tags: Vec<String>,
  /// Maximum ancestor steps in the Wrapper Resolver's climb
  pub wrapper_climb_limit: u32,
  /// Attributes marking a framework root, ending the wrapper climb
  pub wrapper_root_markers: Vec<String>,
  /// Minimum gap kept between the panel and either viewport edge, pixels
  pub edge_margin: f32,
  /// Trigger visibility ratio below which the panel is hidden outright
  pub visibility_threshold: f32,
  /// z-index the panel is forced to while positioned
  pub panel_layer: i32,
  /// Ordered discovery rules
  pub rules: Vec<Rule>,
  /// Manual overrides, checked after every rule
  pub manual_pairs: Vec<ManualPair>,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      poll_interval_ms: default_poll_interval_ms(),
      poll_timeout_ms: default_poll_timeout_ms(),
      trigger_tags: default_trigger_tags(),
      wrapper_climb_limit: default_wrapper_climb_limit(),
      wrapper_root_markers: default_wrapper_root_markers(),
      edge_margin: default_edge_margin(),
      visibility_threshold: default_visibility_threshold(),
      panel_layer: default_panel_layer(),
      rules: Vec::new(),
      manual_pairs: Vec::new(),
    }
  }
}

impl EngineConfig {
  /// Whether a canonical tag name is an acceptable trigger kind
  pub fn is_trigger_tag(&self, tag: &str) -> bool {
    self.trigger_tags.iter().any(|t| t == tag)
  }
}

/// A custom panel-finding strategy
///
/// Receives the (already normalized) trigger and returns the panel handle it
/// found, `Ok(None)` when it found nothing, or `Err` to report failure,
/// which the discovery engine logs and treats exactly like finding nothing.
pub type StrategyFn = Box<dyn Fn(&dyn HostTree, NodeId) -> Result<Option<NodeId>>>;

/// The name-to-function table custom rules resolve through
///
/// Supplied by the embedding application alongside the config. A rule naming
/// a strategy that was never registered simply never produces pairs.
#[derive(Default)]
pub struct StrategyRegistry {
  strategies: FxHashMap<String, StrategyFn>,
}

impl StrategyRegistry {
  /// Creates an empty registry
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers a strategy under `name`, replacing any previous entry
  pub fn register(&mut self, name: impl Into<String>, strategy: StrategyFn) {
    self.strategies.insert(name.into(), strategy);
  }

  /// Looks up a strategy by name
  pub fn get(&self, name: &str) -> Option<&StrategyFn> {
    self.strategies.get(name)
  }
}

impl fmt::Debug for StrategyRegistry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut names: Vec<&str> = self.strategies.keys().map(String::as_str).collect();
    names.sort_unstable();
    f.debug_struct("StrategyRegistry")
      .field("strategies", &names)
      .finish()
  }
}
