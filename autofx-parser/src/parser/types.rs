// Type declaration parsing module
// Handles type specs, shape classification and canonical type rendering

use super::{collapse_whitespace, GoParser, Pair, Rule};
use crate::decl::*;
use crate::error::*;

impl GoParser {
    /// Parse a type declaration (single or grouped)
    pub(crate) fn parse_type_decl(pair: Pair<'_>) -> ParseResult<Vec<TypeDecl>> {
        pair.into_inner()
            .filter(|p| p.as_rule() == Rule::type_spec)
            .map(Self::parse_type_spec)
            .collect()
    }

    /// Parse one `Name [params] [=] Type` spec
    fn parse_type_spec(pair: Pair<'_>) -> ParseResult<TypeDecl> {
        let span = Self::span_from_pair(&pair);

        let mut name = None;
        let mut is_generic = false;
        let mut is_alias = false;
        let mut shape = None;

        for part in pair.into_inner() {
            match part.as_rule() {
                Rule::identifier => name = Some(part.as_str().to_string()),
                Rule::type_params => is_generic = true,
                Rule::alias_marker => is_alias = true,
                Rule::type_expr => shape = Some(Self::classify_type(part)?),
                other => {
                    return Err(ParseError::unexpected_rule(
                        "type spec component",
                        other,
                        Self::span_from_pair(&part),
                    ));
                }
            }
        }

        match (name, shape) {
            (Some(name), Some(shape)) => Ok(TypeDecl {
                name,
                shape,
                is_alias,
                is_generic,
                span,
            }),
            _ => Err(ParseError::unexpected_rule("type name and type", Rule::type_spec, span)),
        }
    }

    /// Decide whether a declared type is struct-shaped, interface-shaped or neither
    fn classify_type(pair: Pair<'_>) -> ParseResult<TypeShape> {
        let type_pair = pair.clone();
        let inner = Self::first_inner(pair)?;

        match inner.as_rule() {
            Rule::struct_type => Ok(TypeShape::Struct),
            Rule::interface_type => Self::parse_interface_type(inner),
            Rule::paren_type => {
                let nested = Self::expect_inner(inner, Rule::type_expr)?;
                Self::classify_type(nested)
            }
            _ => Ok(TypeShape::Other {
                underlying: Self::render_type(type_pair)?,
            }),
        }
    }

    /// Collect method specs and embedded elements of an interface body
    fn parse_interface_type(pair: Pair<'_>) -> ParseResult<TypeShape> {
        let mut methods = Vec::new();
        let mut embedded = Vec::new();

        for elem in pair.into_inner() {
            match elem.as_rule() {
                Rule::method_spec => methods.push(Self::parse_method_spec(elem)?),
                Rule::embedded_elem => {
                    let constraint = Self::expect_inner(elem, Rule::constraint_expr)?;
                    embedded.push(Self::render_constraint(constraint)?);
                }
                _ => {}
            }
        }

        Ok(TypeShape::Interface { methods, embedded })
    }

    /// Render a `type_expr` pair to its canonical text form
    pub(crate) fn render_type(pair: Pair<'_>) -> ParseResult<String> {
        let inner = Self::first_inner(pair)?;

        let rendered = match inner.as_rule() {
            Rule::pointer_type => {
                let elem = Self::expect_inner(inner, Rule::type_expr)?;
                format!("*{}", Self::render_type(elem)?)
            }
            Rule::slice_type => {
                let elem = Self::expect_inner(inner, Rule::type_expr)?;
                format!("[]{}", Self::render_type(elem)?)
            }
            Rule::array_type => {
                let mut len = String::new();
                let mut elem = String::new();
                for part in inner.into_inner() {
                    match part.as_rule() {
                        Rule::array_len => len = part.as_str().split_whitespace().collect(),
                        Rule::type_expr => elem = Self::render_type(part)?,
                        _ => {}
                    }
                }
                format!("[{len}]{elem}")
            }
            Rule::map_type => {
                let mut parts = Vec::with_capacity(2);
                for part in inner.into_inner() {
                    parts.push(Self::render_type(part)?);
                }
                match parts.as_slice() {
                    [key, value] => format!("map[{key}]{value}"),
                    _ => {
                        return Err(ParseError::unexpected_rule(
                            "map key and value types",
                            Rule::map_type,
                            Span::default(),
                        ))
                    }
                }
            }
            Rule::chan_type => {
                let mut direction = "chan";
                let mut elem = String::new();
                for part in inner.into_inner() {
                    match part.as_rule() {
                        Rule::chan_dir => direction = Self::chan_direction(part.as_str()),
                        Rule::type_expr => elem = Self::render_type(part)?,
                        _ => {}
                    }
                }
                format!("{direction} {elem}")
            }
            Rule::func_type => {
                let signature = Self::expect_inner(inner, Rule::signature)?;
                let signature = Self::parse_signature(signature)?;
                format!("func{}", Self::render_signature(&signature))
            }
            Rule::struct_type => {
                let body = Self::expect_inner(inner, Rule::brace_group)?;
                let text = body.as_str();
                let fields = collapse_whitespace(&text[1..text.len() - 1]);
                if fields.is_empty() {
                    "struct{}".to_string()
                } else {
                    format!("struct{{ {fields} }}")
                }
            }
            Rule::interface_type => {
                let mut elems = Vec::new();
                for elem in inner.into_inner() {
                    match elem.as_rule() {
                        Rule::method_spec => {
                            let method = Self::parse_method_spec(elem)?;
                            elems.push(format!(
                                "{}{}",
                                method.name,
                                Self::render_signature(&method.signature)
                            ));
                        }
                        Rule::embedded_elem => {
                            let constraint = Self::expect_inner(elem, Rule::constraint_expr)?;
                            elems.push(Self::render_constraint(constraint)?);
                        }
                        _ => {}
                    }
                }
                if elems.is_empty() {
                    "interface{}".to_string()
                } else {
                    format!("interface{{ {} }}", elems.join("; "))
                }
            }
            Rule::paren_type => {
                let nested = Self::expect_inner(inner, Rule::type_expr)?;
                format!("({})", Self::render_type(nested)?)
            }
            Rule::type_name => Self::render_type_name(inner)?,
            other => {
                return Err(ParseError::unexpected_rule(
                    "type",
                    other,
                    Self::span_from_pair(&inner),
                ))
            }
        };

        Ok(rendered)
    }

    fn render_type_name(pair: Pair<'_>) -> ParseResult<String> {
        let mut name = String::new();
        let mut args = Vec::new();

        for part in pair.into_inner() {
            match part.as_rule() {
                Rule::identifier | Rule::qualified_ident => name = part.as_str().to_string(),
                Rule::type_args => {
                    for arg in part.into_inner() {
                        args.push(Self::render_type(arg)?);
                    }
                }
                _ => {}
            }
        }

        if args.is_empty() {
            Ok(name)
        } else {
            Ok(format!("{name}[{}]", args.join(", ")))
        }
    }

    /// Render `~int | ~string` style constraint unions and embedded interfaces
    fn render_constraint(pair: Pair<'_>) -> ParseResult<String> {
        let mut terms = Vec::new();

        for term in pair.into_inner() {
            let mut tilde = false;
            let mut rendered = String::new();
            for part in term.into_inner() {
                match part.as_rule() {
                    Rule::tilde => tilde = true,
                    Rule::type_expr => rendered = Self::render_type(part)?,
                    _ => {}
                }
            }
            terms.push(if tilde { format!("~{rendered}") } else { rendered });
        }

        Ok(terms.join(" | "))
    }

    fn chan_direction(text: &str) -> &'static str {
        let compact: String = text.split_whitespace().collect();
        if compact.starts_with("<-") {
            "<-chan"
        } else if compact.ends_with("<-") {
            "chan<-"
        } else {
            "chan"
        }
    }
}
