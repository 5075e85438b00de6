//! Activity modules for the TUI, one per tab.

pub mod about;
pub mod main;
pub mod options;

pub use about::AboutActivity;
pub use main::MainActivity;
pub use options::OptionsActivity;
