#[macro_use]
mod keyword;

mod base;
pub mod diagnostics;
pub mod list;

pub use base::*;
pub use keyword::*;

/// The UnrealScript abstract syntax tree (or AST.)
pub mod ast {
    mod class;
    mod file;
    mod item;
    mod types;

    pub use class::*;
    pub use file::*;
    pub use item::*;
    pub use types::*;
}
