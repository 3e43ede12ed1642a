//! API request handlers.

mod chart;
mod health;
mod upload;

pub use chart::*;
pub use health::*;
pub use upload::*;
