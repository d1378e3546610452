//! Interactive terminal surface.

pub mod app;
pub mod form;
pub mod surface;
pub mod view;

pub use app::{run, UiState};
pub use surface::TerminalSurface;
