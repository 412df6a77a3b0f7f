pub mod engine;
pub mod equity;
pub mod format;

pub use engine::*;
pub use equity::*;
