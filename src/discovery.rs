//! Discovery Engine: turns rules and overrides into trigger/panel pairs
//!
//! Discovery is a pure function of the current tree: each invocation
//! re-evaluates every rule and every manual override from scratch and
//! returns a fresh pair set, leaving all scheduling state to the caller.
//! Output order is rule declaration order, with manual overrides appended
//! last.
//!
//! There is deliberately no deduplication: a node matched by two rules
//! yields two pairs. That is observed behavior pages have come to depend on,
//! so it is preserved rather than cleaned up.
//!
//! Every way a candidate can fail (selector matches nothing, attribute
//! missing, tag not on the allow-list, strategy errors out) drops that one
//! candidate with a debug log and nothing else. Discovery itself never
//! fails.

use crate::config::{EngineConfig, MatchMode, PlacementConfig, Rule, StrategyRegistry};
use crate::error::{DiscoveryError, Error};
use crate::host::{HostTree, NodeId, StyleWrite};
use crate::style::{Display, Visibility};
use crate::wrapper::find_wrapper;

/// The attribute that designates identity lookup in attribute-mode rules.
const IDENTITY_ATTRIBUTE: &str = "id";

/// The unit of work: one trigger anchored to one panel
///
/// Once created, the two element handles are fixed for the pair's lifetime.
/// A pair with no config uses default placement logic; pairs from manual
/// overrides carry their placement and offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
  /// The element whose interaction controls the panel
  pub trigger: NodeId,
  /// The floating element to keep positioned (already wrapper-resolved)
  pub panel: NodeId,
  /// Placement override, present for manual pairs
  pub config: Option<PlacementConfig>,
  /// Name of the rule that produced this pair, `None` for manual pairs
  pub rule: Option<String>,
}

/// Produces the set of pairs observable in the tree right now
pub fn discover(
  host: &dyn HostTree,
  config: &EngineConfig,
  strategies: &StrategyRegistry,
) -> Vec<Pair> {
  let mut pairs = Vec::new();

  for rule in &config.rules {
    for candidate in host.query(&rule.selector) {
      let trigger = match normalize_trigger(host, candidate, rule, config) {
        Ok(trigger) => trigger,
        Err(reason) => {
          log::debug!("rule '{}': candidate dropped: {reason}", rule.name);
          continue;
        }
      };
      let panel = match resolve_panel(host, trigger, rule, strategies) {
        Ok(panel) => panel,
        Err(reason) => {
          log::debug!("rule '{}': no panel: {reason}", rule.name);
          continue;
        }
      };
      let panel = find_wrapper(host, panel, config);
      prehide(host, panel);
      pairs.push(Pair {
        trigger,
        panel,
        config: None,
        rule: Some(rule.name.clone()),
      });
    }
  }

  pairs.extend(manual_pairs(host, config));
  pairs
}

/// Applies the rule's climb depth, then validates against the tag allow-list
///
/// A candidate that lands on an invalid tag gets one compatibility fallback:
/// if its immediate parent is on the allow-list, the parent is substituted.
/// Markup in the wild wraps buttons in unexpected things often enough that
/// this rescue pays for itself.
fn normalize_trigger(
  host: &dyn HostTree,
  candidate: NodeId,
  rule: &Rule,
  config: &EngineConfig,
) -> Result<NodeId, DiscoveryError> {
  let mut target = candidate;
  for _ in 0..rule.climb_depth {
    match host.parent(target) {
      Some(parent) => target = parent,
      None => break,
    }
  }

  let tag = host.tag_name(target);
  if config.is_trigger_tag(&tag) {
    return Ok(target);
  }
  if let Some(parent) = host.parent(target) {
    if config.is_trigger_tag(&host.tag_name(parent)) {
      return Ok(parent);
    }
  }
  Err(DiscoveryError::InvalidTarget { tag })
}

/// Resolves the panel paired with a normalized trigger, per the rule's mode
fn resolve_panel(
  host: &dyn HostTree,
  trigger: NodeId,
  rule: &Rule,
  strategies: &StrategyRegistry,
) -> Result<NodeId, Error> {
  match &rule.mode {
    MatchMode::Custom { strategy } => {
      let finder = strategies
        .get(strategy)
        .ok_or(DiscoveryError::NotFound)?;
      match finder(host, trigger) {
        Ok(Some(panel)) => Ok(panel),
        Ok(None) => Err(DiscoveryError::NotFound.into()),
        Err(failure) => Err(failure),
      }
    }
    MatchMode::Attribute {
      source_attr,
      target_attr,
    } => {
      let value = host
        .attribute(trigger, source_attr)
        .ok_or(DiscoveryError::NotFound)?;
      if target_attr == IDENTITY_ATTRIBUTE {
        return host
          .element_by_id(&value)
          .ok_or_else(|| DiscoveryError::NotFound.into());
      }
      // First candidate that is not the trigger itself, so a node
      // referencing its own attribute value never pairs with itself.
      let selector = format!("[{}=\"{}\"]", target_attr, value.replace('"', "\\\""));
      host
        .query(&selector)
        .into_iter()
        .find(|node| *node != trigger)
        .ok_or_else(|| DiscoveryError::NotFound.into())
    }
  }
}

/// Hides a freshly discovered panel so it never paints unpositioned
fn prehide(host: &dyn HostTree, panel: NodeId) {
  if host.resolved_style(panel).visibility != Visibility::Hidden {
    host.write_style(panel, StyleWrite::Visibility(Visibility::Hidden));
  }
}

/// Evaluates the manual overrides against the current tree
///
/// Each selector must resolve to exactly one node, and the panel must be
/// currently visible; an invisible panel is skipped this tick and simply
/// participates in the next poll.
fn manual_pairs(host: &dyn HostTree, config: &EngineConfig) -> Vec<Pair> {
  let mut pairs = Vec::new();
  for manual in &config.manual_pairs {
    let triggers = host.query(&manual.trigger_selector);
    let panels = host.query(&manual.panel_selector);
    let (&[trigger], &[panel]) = (triggers.as_slice(), panels.as_slice()) else {
      log::debug!(
        "manual pair '{}'/'{}' skipped: selectors matched {}/{} nodes",
        manual.trigger_selector,
        manual.panel_selector,
        triggers.len(),
        panels.len(),
      );
      continue;
    };
    let style = host.resolved_style(panel);
    if style.display == Display::None || style.visibility == Visibility::Hidden {
      log::debug!(
        "manual pair '{}' skipped: panel not currently visible",
        manual.panel_selector
      );
      continue;
    }
    pairs.push(Pair {
      trigger,
      panel: find_wrapper(host, panel, config),
      config: Some(manual.placement),
      rule: None,
    });
  }
  pairs
}
