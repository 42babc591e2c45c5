//! perch: editing-surface controller for a cartridge game-scripting
//! environment.
//!
//! One editable document per cartridge tab, with undo history and view
//! position durable across tab switches, plus three live-inspection layers
//! over plain text editing: scrub editing of numeric literals, hover
//! inspection of the call expression under the mouse, and deferred
//! highlighting of source lines for tutorials and runtime errors.
//!
//! The crate is widget-agnostic: the concrete text editor sits behind the
//! [`surface::Surface`] trait and the application behind [`editor::Host`].

pub mod config;
pub mod editor;
pub mod input;
pub mod surface;
pub mod syntax;

pub use config::Settings;
pub use editor::{Host, HostState, Session, Tab, run};
pub use surface::{MemorySurface, Surface};
