// Go declaration parser
// Pest-based front-end turning Go source text into declaration records

use crate::decl::*;
use crate::error::*;
use pest::Parser;
use pest_derive::Parser;

mod functions;
mod types;

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct GoParser;

pub(crate) type Pair<'i> = pest::iterators::Pair<'i, Rule>;

impl GoParser {
    /// Parse a complete Go source file
    pub fn parse_source(input: &str) -> ParseResult<SourceFile> {
        Self::parse_source_with_name(input, None)
    }

    /// Parse a complete Go source file, remembering where it came from
    pub fn parse_source_with_name(
        input: &str,
        source_file: Option<String>,
    ) -> ParseResult<SourceFile> {
        let mut pairs = <Self as Parser<Rule>>::parse(Rule::file, input)
            .map_err(|e| ParseError::from_pest_error(e, input.to_string()))?;

        let file_pair = pairs
            .next()
            .ok_or_else(|| ParseError::unexpected_rule("file", Rule::EOI, Span::new(0, 0)))?;

        let mut file = SourceFile {
            source_file,
            ..SourceFile::default()
        };

        for pair in file_pair.into_inner() {
            match pair.as_rule() {
                Rule::package_clause => {
                    let name_pair = Self::expect_inner(pair, Rule::identifier)?;
                    file.package_name = name_pair.as_str().to_string();
                }
                Rule::import_decl => {
                    file.imports.extend(Self::parse_import_decl(pair)?);
                }
                Rule::type_decl => {
                    file.types.extend(Self::parse_type_decl(pair)?);
                }
                Rule::func_decl => {
                    file.callables.push(Self::parse_func_decl(pair)?);
                }
                // Values carry nothing the analyzer needs
                Rule::value_decl | Rule::EOI => {}
                other => {
                    return Err(ParseError::unexpected_rule(
                        "top-level declaration",
                        other,
                        Self::span_from_pair(&pair),
                    ));
                }
            }
        }

        Ok(file)
    }

    /// Parse an import declaration (single or grouped)
    fn parse_import_decl(pair: Pair<'_>) -> ParseResult<Vec<ImportDecl>> {
        let mut imports = Vec::new();

        for spec in pair.into_inner() {
            if spec.as_rule() != Rule::import_spec {
                continue;
            }

            let mut alias = None;
            let mut path = String::new();
            for part in spec.into_inner() {
                match part.as_rule() {
                    Rule::import_alias => alias = Some(part.as_str().to_string()),
                    Rule::string_lit => path = Self::unquote(part.as_str()),
                    _ => {}
                }
            }
            imports.push(ImportDecl { alias, path });
        }

        Ok(imports)
    }

    pub(crate) fn span_from_pair(pair: &Pair<'_>) -> Span {
        let span = pair.as_span();
        Span::new(span.start(), span.end())
    }

    /// Take the first inner pair, requiring it to be `expected`
    pub(crate) fn expect_inner(pair: Pair<'_>, expected: Rule) -> ParseResult<Pair<'_>> {
        let span = Self::span_from_pair(&pair);
        match pair.into_inner().next() {
            Some(inner) if inner.as_rule() == expected => Ok(inner),
            Some(inner) => Err(ParseError::unexpected_rule(
                format!("{expected:?}"),
                inner.as_rule(),
                Self::span_from_pair(&inner),
            )),
            None => Err(ParseError::unexpected_rule(
                format!("{expected:?}"),
                Rule::EOI,
                span,
            )),
        }
    }

    /// Take the first inner pair, whatever its rule
    pub(crate) fn first_inner(pair: Pair<'_>) -> ParseResult<Pair<'_>> {
        let span = Self::span_from_pair(&pair);
        let rule = pair.as_rule();
        pair.into_inner()
            .next()
            .ok_or_else(|| ParseError::unexpected_rule(format!("contents of {rule:?}"), rule, span))
    }

    fn unquote(literal: &str) -> String {
        literal
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(literal)
            .to_string()
    }
}

/// Collapse every whitespace run to a single space
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
