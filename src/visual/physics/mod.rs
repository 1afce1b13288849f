pub mod fields;

pub use fields::{VortexField, field_acceleration};
