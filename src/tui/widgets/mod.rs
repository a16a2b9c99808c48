//! TUI Widgets

pub mod details;
pub mod input;
pub mod progress;
pub mod results;
pub mod status;

pub use input::{InputDialog, InputState};
pub use progress::ProgressWidget;
pub use status::{HeaderBar, StatusBar, StatusMode};
