// Tab Session Library Entry Point
// This file exposes all modules so they can be imported by main.rs
// and tested independently.

// Crate-wide plumbing
pub mod error;
pub mod logging;
pub mod settings;

// Shared state
pub mod state;

// Pure logic modules (no I/O)
pub mod modules;

// Event-driven façade and scripted replay
pub mod scenario;
pub mod session;

pub use modules::gestures::{GestureController, GestureEvent};
pub use modules::navigation::{MemoryNavigator, Navigator, RouteSynchronizer};
pub use modules::tabs::TabRegistry;
pub use session::TabSession;
pub use settings::{ReelectionPolicy, Settings};
pub use state::{Intent, NewTab, Tab, TabId, TabSnapshot};
