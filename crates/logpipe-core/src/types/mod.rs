//! Value types carried by plugin attributes

pub mod value;

pub use value::Value;
