//! Style sheets: lexer, parser, style blocks, cascade resolution.

pub mod error;
pub mod lexer;
pub mod loader;
pub mod model;
pub mod parser;
pub mod schema;
pub mod stylesheet;

pub use error::StyleSheetError;
pub use loader::{FsResolver, ResourceResolver, StyleSheetLoader};
pub use model::{BlockId, Selector, StyleBlock, StyleValue};
pub use parser::parse_sheet;
pub use schema::{ComponentType, TypeSchema};
pub use stylesheet::{ResolvedStyle, StyleSheet};
