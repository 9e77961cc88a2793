pub mod maker_counter;
pub mod offer;

pub use maker_counter::*;
pub use offer::*;
