//! Framework modular para crear aplicaciones con FerrousEngine.
//!
//! An application implements [`FerrousApp`] and is driven by [`App::run`]
//! over a sequence of [`AppEvent`]s.  Events are handled strictly one at a
//! time; `poll` runs before each of them so that background work (asset
//! loads, ...) is folded in as discrete steps.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ferrous_app::{App, AppContext, AppEvent, FerrousApp};
//!
//! struct Counter(u32);
//!
//! impl FerrousApp for Counter {
//!     type Message = u32;
//!
//!     fn on_message(&mut self, n: u32, _ctx: &mut AppContext) {
//!         self.0 += n;
//!     }
//! }
//!
//! let outcome = App::new(Counter(0))
//!     .with_title("Counter")
//!     .run([AppEvent::Message(2), AppEvent::Message(3)]);
//! assert_eq!(outcome.app.0, 5);
//! ```

pub mod builder;
pub mod config;
pub mod context;
pub mod event;
pub mod logging;
mod runner;
pub mod traits;

pub use builder::{App, RunOutcome};
pub use config::{load_toml, parse_toml, AppConfig, LogConfig};
pub use context::AppContext;
pub use event::AppEvent;
pub use traits::FerrousApp;

// ── Re-export the most-used ferrous_core primitives ────────────────────────
pub use ferrous_core::{Camera, Handle, MouseButton, PointerEvent, Viewport, World};

// glam math types, re-exported for convenience
pub use ferrous_core::glam::{Vec2, Vec3};
