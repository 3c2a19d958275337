//! Indexing pipeline
//!
//! Corpus scanning, front matter parsing, and body normalization.

mod normalize;
mod parser;
mod scanner;

pub use normalize::*;
pub use parser::*;
pub use scanner::*;
