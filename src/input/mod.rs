//! Input handling module
//!
//! Maps raw window events to application actions.

mod input_mapper;

pub use input_mapper::{InputMapper, InputAction};
