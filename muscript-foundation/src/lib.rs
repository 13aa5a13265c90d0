//! Foundational types for the MuScript compiler.

pub mod errors;
pub mod ident;
pub mod source;
pub mod source_arena;
pub mod span;
