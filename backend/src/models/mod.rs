pub mod forum;
pub mod macros;
pub mod time;

pub use forum::*;
pub use time::*;
