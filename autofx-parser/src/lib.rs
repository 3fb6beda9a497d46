// autofx Parser Library
// Pest-based declaration front-end for Go packages

pub mod decl;
pub mod error;
pub mod parser;

pub use decl::*;
pub use error::*;
pub use parser::{GoParser, Rule};

/// Parse one Go source file into its declaration records
pub fn parse_source(input: &str) -> Result<SourceFile, ParseError> {
    parser::GoParser::parse_source(input)
}

/// Parse one Go source file, tagging the result with its file name
pub fn parse_source_with_name(
    input: &str,
    source_file: Option<String>,
) -> Result<SourceFile, ParseError> {
    parser::GoParser::parse_source_with_name(input, source_file)
}

#[cfg(test)]
mod tests {
    mod test_parameter_grouping;
    mod test_receivers;
}

// Version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
