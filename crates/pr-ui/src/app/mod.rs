//! Application: state, key handling and terminal front-end

mod render;
mod state;
mod terminal;

pub use state::{AppMode, AppState, ExportTarget, Reviewer};
pub use terminal::App;
