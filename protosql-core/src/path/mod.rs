//! JSONPath-like path syntax for addressing values inside a message.
//!
//! A path is `$` (the root message) followed by `.field` and `[index]`
//! steps. Parsing is pure and needs no schema; whether a step fits the
//! message structure is decided by the extractor.
//!
//! # Example
//!
//! ```rust
//! use protosql_core::path::{Path, Step};
//!
//! let path: Path = "$.phones[-1].type.name".parse().unwrap();
//! assert_eq!(path.steps()[1], Step::Index(-1));
//! assert!("#".parse::<Path>().is_err());
//! ```

mod ast;
mod error;
mod parser;

pub use ast::{EnumAccessor, Path, Step};
pub use error::PathError;
pub use parser::parse_path;

impl std::str::FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_path(s)
    }
}
