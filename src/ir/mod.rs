//! The intermediate representation (IR): immutable graph entities built once
//! per conversion and read by every later stage.

mod builder;
mod model;

pub use builder::build_intermediate_representation;
pub use model::*;
