//! Terminal presentation layer.
//!
//! Deliberately thin: it reads session state through the public observers,
//! translates keys into discrete actions, and renders. No game rules live
//! here.

mod app;
mod ui;

pub use app::App;
pub use ui::draw;
