mod headings;
mod labels;

pub use headings::{Heading, HeadingDecoder};
pub use labels::LabelDecoder;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Failed to compile record pattern: {0}")]
    InitError(String),
}
