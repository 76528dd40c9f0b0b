//! Terminal front end: argument parsing, the terminal surface and the
//! command runner.
mod app;
mod args;
mod surface;

pub use app::*;
pub use args::*;
pub use surface::*;
