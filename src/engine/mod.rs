//! Audio engine: endpoint selection, sample rendering, and the run loop

pub mod device;
pub mod keeper;
pub mod render;

pub use keeper::KeepAliveEngine;
