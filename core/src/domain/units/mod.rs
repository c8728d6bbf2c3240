pub mod conversions;
pub mod value_objects;

pub use conversions::*;
pub use value_objects::*;
