//! Acquisition Scheduler: drives discovery to completion once per page
//!
//! The host offers no "ready" signal, so acquisition polls: every interval
//! tick re-runs discovery against whatever the page has rendered by then.
//! The first non-empty result stops polling permanently and wires each pair
//! up: scroll context resolution, one initial positioning pass per pair
//! (all passes before any subscription, so first paint is deterministic),
//! then scroll and resize subscriptions that reposition that pair only, and
//! one deferred re-validation pass (the "latch") because the very first
//! measurement can land before layout has settled.
//!
//! If the deadline elapses with nothing ever found, polling stops and the
//! engine abandons silently, with an advisory warning in the log, never a
//! failure the host page can observe. Once active, pairs are never
//! re-discovered, re-validated, or torn down.
//!
//! Everything is single-threaded and callback-driven; the only mutable
//! state is in this module, behind one `RefCell` that is never held across
//! a host callback.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::config::{EngineConfig, StrategyRegistry};
use crate::discovery::{discover, Pair};
use crate::host::{HostEvents, HostTree, TimerToken};
use crate::placement::position_panel;
use crate::scroll::{resolve_scroll_context, ScrollContext};

/// Lifecycle phase of an acquisition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
  /// Still polling for the first non-empty discovery result
  Polling,
  /// Pairs found and wired; polling has stopped for good
  Active,
  /// Deadline elapsed with zero pairs ever found
  Abandoned,
}

struct State {
  phase: Phase,
  poll: Option<TimerToken>,
  deadline: Option<TimerToken>,
  pairs: Vec<Pair>,
}

struct Shared {
  host: Rc<dyn HostTree>,
  events: Rc<dyn HostEvents>,
  config: Rc<EngineConfig>,
  strategies: Rc<StrategyRegistry>,
  state: RefCell<State>,
}

/// A running (or finished) acquisition
///
/// Created by [`Acquisition::start`]; holding it is optional, since the wiring
/// lives in the host's timer and subscription callbacks, not in this handle.
/// It exists for observability: the current [`Phase`] and the wired pairs.
pub struct Acquisition {
  shared: Rc<Shared>,
}

impl Acquisition {
  /// Starts polling for pairs under the configured interval and deadline
  pub fn start(
    host: Rc<dyn HostTree>,
    events: Rc<dyn HostEvents>,
    config: Rc<EngineConfig>,
    strategies: Rc<StrategyRegistry>,
  ) -> Self {
    let shared = Rc::new(Shared {
      host,
      events,
      config,
      strategies,
      state: RefCell::new(State {
        phase: Phase::Polling,
        poll: None,
        deadline: None,
        pairs: Vec::new(),
      }),
    });

    let poll = {
      let shared = Rc::clone(&shared);
      let period = Duration::from_millis(shared.config.poll_interval_ms);
      let tick_shared = Rc::clone(&shared);
      shared
        .events
        .repeat(period, Box::new(move || tick(&tick_shared)))
    };
    let deadline = {
      let delay = Duration::from_millis(shared.config.poll_timeout_ms);
      let deadline_shared = Rc::clone(&shared);
      shared
        .events
        .once(delay, Box::new(move || abandon(&deadline_shared)))
    };
    {
      let mut state = shared.state.borrow_mut();
      state.poll = Some(poll);
      state.deadline = Some(deadline);
    }

    Self { shared }
  }

  /// Current lifecycle phase
  pub fn phase(&self) -> Phase {
    self.shared.state.borrow().phase
  }

  /// The pairs wired on the successful tick; empty before that
  pub fn pairs(&self) -> Vec<Pair> {
    self.shared.state.borrow().pairs.clone()
  }
}

/// One polling tick: discover, and wire on the first non-empty result
fn tick(shared: &Rc<Shared>) {
  if shared.state.borrow().phase != Phase::Polling {
    return;
  }

  let pairs = discover(
    shared.host.as_ref(),
    &shared.config,
    &shared.strategies,
  );
  if pairs.is_empty() {
    log::debug!("discovery tick: no pairs yet");
    return;
  }
  log::debug!("discovery tick: {} pair(s) found, wiring", pairs.len());

  {
    let mut state = shared.state.borrow_mut();
    if let Some(token) = state.poll.take() {
      shared.events.cancel(token);
    }
    if let Some(token) = state.deadline.take() {
      shared.events.cancel(token);
    }
    state.phase = Phase::Active;
  }
  wire(shared, pairs);
}

/// Wires every discovered pair: contexts, initial passes, subscriptions,
/// and exactly one latch pass each
fn wire(shared: &Rc<Shared>, pairs: Vec<Pair>) {
  let contexts: Vec<ScrollContext> = pairs
    .iter()
    .map(|pair| resolve_scroll_context(shared.host.as_ref(), pair.trigger))
    .collect();

  // Every pair gets its first positioning pass before any subscription is
  // registered, so no notification can observe a half-wired set.
  for (pair, context) in pairs.iter().zip(&contexts) {
    position_panel(shared.host.as_ref(), pair, context, &shared.config);
  }

  for (pair, context) in pairs.iter().zip(&contexts) {
    if let ScrollContext::Element(node) = context {
      let reposition = repositioner(shared, pair.clone(), *context);
      shared.events.on_scroll(*node, reposition);
    }
    shared
      .events
      .on_resize(repositioner(shared, pair.clone(), *context));

    // The latch: one deferred re-validation on the next available tick,
    // because the first measurement can precede layout settling.
    let latch_shared = Rc::clone(shared);
    let latch_pair = pair.clone();
    let latch_context = *context;
    shared.events.once(
      Duration::ZERO,
      Box::new(move || {
        position_panel(
          latch_shared.host.as_ref(),
          &latch_pair,
          &latch_context,
          &latch_shared.config,
        );
      }),
    );
  }

  shared.state.borrow_mut().pairs = pairs;
}

/// A callback repositioning exactly one pair, for scroll/resize wiring
fn repositioner(shared: &Rc<Shared>, pair: Pair, context: ScrollContext) -> Box<dyn FnMut()> {
  let shared = Rc::clone(shared);
  Box::new(move || {
    position_panel(shared.host.as_ref(), &pair, &context, &shared.config);
  })
}

/// Deadline fired: stop polling and abandon if nothing was ever found
fn abandon(shared: &Rc<Shared>) {
  let mut state = shared.state.borrow_mut();
  if state.phase != Phase::Polling {
    return;
  }
  if let Some(token) = state.poll.take() {
    shared.events.cancel(token);
  }
  state.deadline = None;
  state.phase = Phase::Abandoned;
  log::warn!(
    "acquisition abandoned: no trigger/panel pairs within {} ms",
    shared.config.poll_timeout_ms
  );
}
