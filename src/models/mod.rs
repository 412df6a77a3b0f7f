pub mod account;
pub mod checklist;
pub mod entry;
pub mod market;

pub use account::*;
pub use checklist::*;
pub use entry::*;
pub use market::*;
