//! The table orchestrator.

mod config;
mod patch;
mod state;
mod view;

pub use config::*;
pub use patch::PatchState;
pub use state::*;
pub use view::*;
