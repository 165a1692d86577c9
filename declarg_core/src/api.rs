mod core;
mod result;

pub use self::core::*;
pub use self::result::*;
