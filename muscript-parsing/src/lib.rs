extern crate self as muscript_parsing;

#[macro_use]
pub mod lexis;

#[macro_use]
mod parsing;

pub mod cst;
pub mod diagnostics;
pub mod list;

pub use parsing::*;

pub use muscript_parsing_derive::*;
