//! floatanchor: discovery and anchoring for uncooperative floating panels
//!
//! Locates trigger/panel element pairs inside a rendered visual tree (a
//! menu button and its dropdown, say) without any cooperation from the code
//! that created them, and keeps each panel correctly positioned, clamped to
//! the viewport, and clipped or hidden against its scroll container as the
//! page scrolls, resizes, and re-renders.
//!
//! The host rendering environment is abstracted behind the narrow traits in
//! [`host`]: the engine consumes tree queries, attribute and resolved-style
//! reads, rectangle measurements, style writes, timers, and scroll/resize
//! notifications, and owns nothing else. Pairing is driven by declarative
//! [`config::Rule`]s evaluated in order, plus explicit
//! [`config::ManualPair`] overrides for trees with no structural signal.
//!
//! Typical embedding:
//!
//! ```no_run
//! use std::rc::Rc;
//!
//! use floatanchor::{Acquisition, EngineConfig, StrategyRegistry};
//! # fn hookup(host: Rc<dyn floatanchor::host::HostTree>,
//! #           events: Rc<dyn floatanchor::host::HostEvents>) {
//! let config: EngineConfig = serde_json::from_str(
//!   r#"{ "rules": [{
//!     "name": "Standard ARIA Owns",
//!     "selector": "[aria-expanded=\"true\"][aria-owns]",
//!     "mode": "attribute",
//!     "source_attr": "aria-owns",
//!     "target_attr": "id"
//!   }] }"#,
//! ).unwrap();
//! let acquisition = Acquisition::start(
//!   host,
//!   events,
//!   Rc::new(config),
//!   Rc::new(StrategyRegistry::new()),
//! );
//! # let _ = acquisition;
//! # }
//! ```
//!
//! Acquisition polls discovery until the first non-empty result (or a
//! deadline), wires every pair exactly once, and repositions each pair for
//! the remainder of the page's lifetime. Engine failures never propagate
//! into the host page: failed candidates are dropped, a missed deadline is
//! an advisory log signal, and degenerate geometry degrades to hiding the
//! panel.

pub mod ancestry;
pub mod config;
pub mod discovery;
pub mod error;
pub mod geometry;
pub mod host;
pub mod placement;
pub mod scheduler;
pub mod scroll;
pub mod style;
pub mod wrapper;

pub use config::{EngineConfig, ManualPair, MatchMode, Placement, PlacementConfig, Rule,
  StrategyRegistry};
pub use discovery::{discover, Pair};
pub use error::{Error, Result};
pub use geometry::{EdgeOffsets, Point, Rect, Size};
pub use placement::{compute_placement, position_panel, PlacementResult};
pub use scheduler::{Acquisition, Phase};
pub use scroll::{resolve_scroll_context, ScrollContext};
pub use wrapper::find_wrapper;
