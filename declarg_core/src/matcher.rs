mod core;
mod model;
mod positional;

pub(crate) use self::core::*;
pub use self::model::*;
