mod analyze;
mod common;

pub use analyze::*;
pub use common::*;
