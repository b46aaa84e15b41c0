//! Text building for generated Python.

mod code_builder;

pub use code_builder::CodeBuilder;
