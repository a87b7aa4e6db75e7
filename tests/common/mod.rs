//! Shared in-memory host fake for integration tests
//!
//! `FakeHost` is a little document: nodes with tags, attributes, resolved
//! styles, rectangles, and parents, plus a selector matcher covering the
//! subset of selector syntax the engine's rules and generated queries use
//! (`tag`, `.class`, `#id`, `[attr]`, `[attr="value"]`, compounds of those,
//! and comma-separated alternatives).
//!
//! `FakeEvents` is a manual clock: timers are queued, `advance` runs
//! everything due, and scroll/resize firing is explicit. Both are interior
//! mutable, matching the host traits' `&self` contract.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::time::Duration;

use floatanchor::geometry::{Point, Rect, Size};
use floatanchor::host::{
  HostEvents, HostTree, NodeId, ResolvedStyle, StyleWrite, TimerToken,
};

#[derive(Debug, Clone)]
struct FakeNode {
  tag: String,
  attrs: Vec<(String, String)>,
  style: ResolvedStyle,
  rect: Rect,
  scroll_height: f32,
  client_height: f32,
  parent: Option<NodeId>,
  written_top: Option<f32>,
  written_left: Option<f32>,
  parent_shift: Point,
  detached: bool,
}

pub struct FakeHost {
  nodes: RefCell<Vec<FakeNode>>,
  viewport: Cell<Size>,
  writes: RefCell<Vec<(NodeId, StyleWrite)>>,
}

impl FakeHost {
  /// Creates a host with an `HTML` root node as id 0
  pub fn new(viewport: Size) -> Self {
    let root = FakeNode {
      tag: "HTML".to_owned(),
      attrs: Vec::new(),
      style: ResolvedStyle::default(),
      rect: Rect::new(Point::ZERO, viewport),
      scroll_height: 0.0,
      client_height: 0.0,
      parent: None,
      written_top: None,
      written_left: None,
      parent_shift: Point::ZERO,
      detached: false,
    };
    Self {
      nodes: RefCell::new(vec![root]),
      viewport: Cell::new(viewport),
      writes: RefCell::new(Vec::new()),
    }
  }

  pub fn add_node(&self, tag: &str, parent: NodeId) -> NodeId {
    let mut nodes = self.nodes.borrow_mut();
    nodes.push(FakeNode {
      tag: tag.to_ascii_uppercase(),
      attrs: Vec::new(),
      style: ResolvedStyle::default(),
      rect: Rect::ZERO,
      scroll_height: 0.0,
      client_height: 0.0,
      parent: Some(parent),
      written_top: None,
      written_left: None,
      parent_shift: Point::ZERO,
      detached: false,
    });
    NodeId((nodes.len() - 1) as u64)
  }

  pub fn set_attr(&self, node: NodeId, name: &str, value: &str) {
    let mut nodes = self.nodes.borrow_mut();
    let attrs = &mut nodes[node.0 as usize].attrs;
    if let Some(entry) = attrs.iter_mut().find(|(n, _)| n == name) {
      entry.1 = value.to_owned();
    } else {
      attrs.push((name.to_owned(), value.to_owned()));
    }
  }

  pub fn set_rect(&self, node: NodeId, rect: Rect) {
    self.nodes.borrow_mut()[node.0 as usize].rect = rect;
  }

  pub fn set_style(&self, node: NodeId, update: impl FnOnce(&mut ResolvedStyle)) {
    update(&mut self.nodes.borrow_mut()[node.0 as usize].style);
  }

  pub fn set_scroll_metrics(&self, node: NodeId, scroll_height: f32, client_height: f32) {
    let mut nodes = self.nodes.borrow_mut();
    nodes[node.0 as usize].scroll_height = scroll_height;
    nodes[node.0 as usize].client_height = client_height;
  }

  /// Residual offset the node's positioning ancestor introduces at origin
  pub fn set_parent_shift(&self, node: NodeId, shift: Point) {
    self.nodes.borrow_mut()[node.0 as usize].parent_shift = shift;
  }

  pub fn detach(&self, node: NodeId) {
    self.nodes.borrow_mut()[node.0 as usize].detached = true;
  }

  pub fn set_viewport(&self, viewport: Size) {
    self.viewport.set(viewport);
  }

  /// Every style write so far, in order
  pub fn writes(&self) -> Vec<(NodeId, StyleWrite)> {
    self.writes.borrow().clone()
  }

  /// Style writes applied to one node, in order
  pub fn writes_for(&self, node: NodeId) -> Vec<StyleWrite> {
    self
      .writes
      .borrow()
      .iter()
      .filter(|(id, _)| *id == node)
      .map(|(_, write)| *write)
      .collect()
  }

  pub fn clear_writes(&self) {
    self.writes.borrow_mut().clear();
  }

  fn matches(&self, node: &FakeNode, selector: &str) -> bool {
    selector
      .split(',')
      .any(|alternative| Self::matches_compound(node, alternative.trim()))
  }

  fn matches_compound(node: &FakeNode, selector: &str) -> bool {
    if selector.is_empty() {
      return false;
    }
    let chars: Vec<char> = selector.chars().collect();
    let mut i = 0;

    // Optional leading tag name.
    let mut tag = String::new();
    while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '-') {
      tag.push(chars[i]);
      i += 1;
    }
    if !tag.is_empty() && !node.tag.eq_ignore_ascii_case(&tag) {
      return false;
    }

    while i < chars.len() {
      match chars[i] {
        '.' => {
          i += 1;
          let mut class = String::new();
          while i < chars.len() && (chars[i].is_ascii_alphanumeric() || matches!(chars[i], '-' | '_'))
          {
            class.push(chars[i]);
            i += 1;
          }
          let classes = attr_value(node, "class").unwrap_or_default();
          if !classes.split_whitespace().any(|c| c == class) {
            return false;
          }
        }
        '#' => {
          i += 1;
          let mut id = String::new();
          while i < chars.len() && (chars[i].is_ascii_alphanumeric() || matches!(chars[i], '-' | '_'))
          {
            id.push(chars[i]);
            i += 1;
          }
          if attr_value(node, "id").as_deref() != Some(id.as_str()) {
            return false;
          }
        }
        '[' => {
          i += 1;
          let mut body = String::new();
          while i < chars.len() && chars[i] != ']' {
            body.push(chars[i]);
            i += 1;
          }
          i += 1; // past ']'
          match body.split_once('=') {
            None => {
              if attr_value(node, body.trim()).is_none() {
                return false;
              }
            }
            Some((name, value)) => {
              let value = value.trim().trim_matches('"').replace("\\\"", "\"");
              if attr_value(node, name.trim()).as_deref() != Some(value.as_str()) {
                return false;
              }
            }
          }
        }
        _ => return false,
      }
    }
    true
  }
}

fn attr_value(node: &FakeNode, name: &str) -> Option<String> {
  node
    .attrs
    .iter()
    .find(|(n, _)| n == name)
    .map(|(_, v)| v.clone())
}

impl HostTree for FakeHost {
  fn query(&self, selector: &str) -> Vec<NodeId> {
    let nodes = self.nodes.borrow();
    nodes
      .iter()
      .enumerate()
      .filter(|(_, node)| !node.detached && self.matches(node, selector))
      .map(|(index, _)| NodeId(index as u64))
      .collect()
  }

  fn element_by_id(&self, id: &str) -> Option<NodeId> {
    let nodes = self.nodes.borrow();
    nodes
      .iter()
      .enumerate()
      .find(|(_, node)| !node.detached && attr_value(node, "id").as_deref() == Some(id))
      .map(|(index, _)| NodeId(index as u64))
  }

  fn parent(&self, node: NodeId) -> Option<NodeId> {
    self.nodes.borrow()[node.0 as usize].parent
  }

  fn root(&self) -> NodeId {
    NodeId(0)
  }

  fn tag_name(&self, node: NodeId) -> String {
    self.nodes.borrow()[node.0 as usize].tag.clone()
  }

  fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
    attr_value(&self.nodes.borrow()[node.0 as usize], name)
  }

  fn resolved_style(&self, node: NodeId) -> ResolvedStyle {
    self.nodes.borrow()[node.0 as usize].style
  }

  fn write_style(&self, node: NodeId, write: StyleWrite) {
    self.writes.borrow_mut().push((node, write));
    let mut nodes = self.nodes.borrow_mut();
    let entry = &mut nodes[node.0 as usize];
    match write {
      StyleWrite::Position(position) => entry.style.position = position,
      StyleWrite::ZIndex(z) => entry.style.z_index = Some(z),
      StyleWrite::Display(display) => entry.style.display = display,
      StyleWrite::Visibility(visibility) => entry.style.visibility = visibility,
      StyleWrite::Top(top) => entry.written_top = Some(top),
      StyleWrite::Left(left) => entry.written_left = Some(left),
      StyleWrite::Margin(_)
      | StyleWrite::Opacity(_)
      | StyleWrite::PointerEvents(_)
      | StyleWrite::Clip(_) => {}
    }
  }

  fn bounding_rect(&self, node: NodeId) -> Rect {
    let nodes = self.nodes.borrow();
    let entry = &nodes[node.0 as usize];
    if entry.detached {
      return Rect::ZERO;
    }
    match (entry.written_top, entry.written_left) {
      (Some(top), Some(left)) => Rect::new(
        Point::new(entry.parent_shift.x + left, entry.parent_shift.y + top),
        entry.rect.size,
      ),
      _ => entry.rect,
    }
  }

  fn scroll_height(&self, node: NodeId) -> f32 {
    self.nodes.borrow()[node.0 as usize].scroll_height
  }

  fn client_height(&self, node: NodeId) -> f32 {
    self.nodes.borrow()[node.0 as usize].client_height
  }

  fn viewport(&self) -> Size {
    self.viewport.get()
  }
}

enum TaskKind {
  Repeat {
    period: u64,
    callback: Box<dyn FnMut()>,
  },
  Once {
    callback: Box<dyn FnOnce()>,
  },
}

struct ScheduledTask {
  token: u64,
  due: u64,
  kind: TaskKind,
}

/// Manual clock implementing `HostEvents`
pub struct FakeEvents {
  now: Cell<u64>,
  next_token: Cell<u64>,
  tasks: RefCell<Vec<ScheduledTask>>,
  cancelled: RefCell<HashSet<u64>>,
  scroll_subs: RefCell<Vec<(NodeId, Box<dyn FnMut()>)>>,
  resize_subs: RefCell<Vec<Box<dyn FnMut()>>>,
}

impl FakeEvents {
  pub fn new() -> Self {
    Self {
      now: Cell::new(0),
      next_token: Cell::new(1),
      tasks: RefCell::new(Vec::new()),
      cancelled: RefCell::new(HashSet::new()),
      scroll_subs: RefCell::new(Vec::new()),
      resize_subs: RefCell::new(Vec::new()),
    }
  }

  pub fn now_ms(&self) -> u64 {
    self.now.get()
  }

  /// Advances the clock, running every task that comes due, in due order
  ///
  /// Tasks scheduled by running callbacks (including zero-delay ones) run
  /// within the same advance if they come due before the target time.
  pub fn advance(&self, ms: u64) {
    let target = self.now.get() + ms;
    loop {
      let next = {
        let tasks = self.tasks.borrow();
        let cancelled = self.cancelled.borrow();
        let mut chosen: Option<(usize, u64)> = None;
        for (index, task) in tasks.iter().enumerate() {
          if cancelled.contains(&task.token) || task.due > target {
            continue;
          }
          if chosen.is_none_or(|(_, due)| task.due < due) {
            chosen = Some((index, task.due));
          }
        }
        chosen
      };
      let Some((index, due)) = next else { break };
      let task = self.tasks.borrow_mut().remove(index);
      self.now.set(due.max(self.now.get()));
      match task.kind {
        TaskKind::Once { callback } => callback(),
        TaskKind::Repeat {
          period,
          mut callback,
        } => {
          callback();
          if !self.cancelled.borrow().contains(&task.token) {
            self.tasks.borrow_mut().push(ScheduledTask {
              token: task.token,
              due: due + period.max(1),
              kind: TaskKind::Repeat { period, callback },
            });
          }
        }
      }
    }
    self.now.set(target);
  }

  /// Number of live (not cancelled) scheduled tasks
  pub fn live_tasks(&self) -> usize {
    let cancelled = self.cancelled.borrow();
    self
      .tasks
      .borrow()
      .iter()
      .filter(|task| !cancelled.contains(&task.token))
      .count()
  }

  pub fn scroll_subscription_count(&self, node: NodeId) -> usize {
    self
      .scroll_subs
      .borrow()
      .iter()
      .filter(|(id, _)| *id == node)
      .count()
  }

  pub fn resize_subscription_count(&self) -> usize {
    self.resize_subs.borrow().len()
  }

  /// Fires every scroll subscription scoped to `node`
  pub fn fire_scroll(&self, node: NodeId) {
    let mut taken = std::mem::take(&mut *self.scroll_subs.borrow_mut());
    for (id, callback) in &mut taken {
      if *id == node {
        callback();
      }
    }
    let mut subs = self.scroll_subs.borrow_mut();
    let added = std::mem::take(&mut *subs);
    taken.extend(added);
    *subs = taken;
  }

  /// Fires every resize subscription
  pub fn fire_resize(&self) {
    let mut taken = std::mem::take(&mut *self.resize_subs.borrow_mut());
    for callback in &mut taken {
      callback();
    }
    let mut subs = self.resize_subs.borrow_mut();
    let added = std::mem::take(&mut *subs);
    taken.extend(added);
    *subs = taken;
  }

  fn schedule(&self, due: u64, kind: TaskKind) -> TimerToken {
    let token = self.next_token.get();
    self.next_token.set(token + 1);
    self.tasks.borrow_mut().push(ScheduledTask { token, due, kind });
    TimerToken(token)
  }
}

impl Default for FakeEvents {
  fn default() -> Self {
    Self::new()
  }
}

impl HostEvents for FakeEvents {
  fn repeat(&self, period: Duration, callback: Box<dyn FnMut()>) -> TimerToken {
    let period = period.as_millis() as u64;
    self.schedule(
      self.now.get() + period,
      TaskKind::Repeat { period, callback },
    )
  }

  fn once(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerToken {
    self.schedule(
      self.now.get() + delay.as_millis() as u64,
      TaskKind::Once { callback },
    )
  }

  fn cancel(&self, token: TimerToken) {
    self.cancelled.borrow_mut().insert(token.0);
  }

  fn on_scroll(&self, node: NodeId, callback: Box<dyn FnMut()>) {
    self.scroll_subs.borrow_mut().push((node, callback));
  }

  fn on_resize(&self, callback: Box<dyn FnMut()>) {
    self.resize_subs.borrow_mut().push(callback);
  }
}
