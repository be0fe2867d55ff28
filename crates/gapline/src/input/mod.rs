//! Input parsing and data source handling.

mod parser;
mod source;

pub(crate) use parser::read_file;
pub use parser::{Parser, ParserConfig, content_hash};
pub use source::{RawCell, RawRow, RawWideTable, SourceMetadata};
