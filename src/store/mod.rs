pub mod accounts;
pub mod checklists;
pub mod entries;
pub mod markets;

pub use accounts::*;
pub use checklists::*;
pub use entries::*;
pub use markets::*;
