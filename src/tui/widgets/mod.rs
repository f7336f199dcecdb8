pub mod header;
pub mod journal;
pub mod performance;
pub mod plans;
pub mod statusbar;
