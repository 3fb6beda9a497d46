// Function parsing module
// Handles func declarations, receivers, interface method specs and parameter lists

use super::{GoParser, Pair, Rule};
use crate::decl::*;
use crate::error::*;

/// A parameter list entry before Go's name grouping is applied
struct ParamItem {
    name: Option<String>,
    type_text: String,
    bare_identifier: bool,
    span: Span,
}

impl GoParser {
    /// Parse a function or method declaration
    pub(crate) fn parse_func_decl(pair: Pair<'_>) -> ParseResult<CallableDecl> {
        let span = Self::span_from_pair(&pair);

        let mut receiver = None;
        let mut name = None;
        let mut signature = None;
        let mut has_body = false;

        for part in pair.into_inner() {
            match part.as_rule() {
                Rule::receiver => receiver = Some(Self::parse_receiver(part)?),
                Rule::identifier => name = Some(part.as_str().to_string()),
                Rule::type_params => {}
                Rule::signature => signature = Some(Self::parse_signature(part)?),
                Rule::func_body => has_body = true,
                other => {
                    return Err(ParseError::unexpected_rule(
                        "function declaration component",
                        other,
                        Self::span_from_pair(&part),
                    ));
                }
            }
        }

        let (Some(name), Some(signature)) = (name, signature) else {
            return Err(ParseError::unexpected_rule(
                "function name and signature",
                Rule::func_decl,
                span,
            ));
        };

        Ok(CallableDecl {
            name,
            receiver,
            signature,
            has_body,
            span,
        })
    }

    /// Parse `(s *Store)` into a receiver expression
    fn parse_receiver(pair: Pair<'_>) -> ParseResult<ReceiverExpr> {
        let span = Self::span_from_pair(&pair);
        let params = Self::parse_parameter_items(pair)?;

        match params.as_slice() {
            [param] => Ok(ReceiverExpr::from_type_text(&param.type_text)),
            _ => Err(ParseError::unexpected_rule(
                "exactly one receiver",
                Rule::receiver,
                span,
            )),
        }
    }

    /// Parse an interface method spec: `Get(id string) (string, error)`
    pub(crate) fn parse_method_spec(pair: Pair<'_>) -> ParseResult<MethodSpecDecl> {
        let span = Self::span_from_pair(&pair);

        let mut name = String::new();
        let mut signature = SignatureDecl::default();

        for part in pair.into_inner() {
            match part.as_rule() {
                Rule::identifier => name = part.as_str().to_string(),
                Rule::parameters => signature.params = Self::parse_parameter_items(part)?,
                Rule::result => signature.results = Self::parse_result(part)?,
                _ => {}
            }
        }

        Ok(MethodSpecDecl {
            name,
            signature,
            span,
        })
    }

    /// Parse a `signature` pair: parameters followed by an optional result
    pub(crate) fn parse_signature(pair: Pair<'_>) -> ParseResult<SignatureDecl> {
        let mut signature = SignatureDecl::default();

        for part in pair.into_inner() {
            match part.as_rule() {
                Rule::parameters => signature.params = Self::parse_parameter_items(part)?,
                Rule::result => signature.results = Self::parse_result(part)?,
                _ => {}
            }
        }

        Ok(signature)
    }

    /// A result is either a parenthesised list or a single unnamed type
    fn parse_result(pair: Pair<'_>) -> ParseResult<Vec<ParamDecl>> {
        let inner = Self::first_inner(pair)?;
        match inner.as_rule() {
            Rule::parameters => Self::parse_parameter_items(inner),
            Rule::type_expr => {
                let span = Self::span_from_pair(&inner);
                Ok(vec![ParamDecl {
                    name: None,
                    type_text: Self::render_type(inner)?,
                    span,
                }])
            }
            other => Err(ParseError::unexpected_rule(
                "result type",
                other,
                Self::span_from_pair(&inner),
            )),
        }
    }

    /// Parse every `parameter_decl` under `pair` and apply Go's grouping rule:
    /// when any entry is named, bare identifiers before it are names sharing
    /// its type (`a, b int`).
    fn parse_parameter_items(pair: Pair<'_>) -> ParseResult<Vec<ParamDecl>> {
        let list_span = Self::span_from_pair(&pair);
        let src = pair.get_input();

        let mut items = Vec::new();
        for decl in pair.into_inner() {
            if decl.as_rule() == Rule::parameter_decl {
                items.push(Self::parse_parameter_item(decl)?);
            }
        }

        if items.iter().all(|item| item.name.is_none()) {
            return Ok(items
                .into_iter()
                .map(|item| ParamDecl {
                    name: None,
                    type_text: item.type_text,
                    span: item.span,
                })
                .collect());
        }

        let mut params = Vec::with_capacity(items.len());
        let mut pending: Vec<(String, Span)> = Vec::new();

        for item in items {
            match item.name {
                None if item.bare_identifier => pending.push((item.type_text, item.span)),
                None => return Err(ParseError::mixed_parameters(src.to_string(), list_span)),
                Some(name) => {
                    for (grouped, span) in pending.drain(..) {
                        params.push(ParamDecl {
                            name: Some(grouped),
                            type_text: item.type_text.clone(),
                            span,
                        });
                    }
                    params.push(ParamDecl {
                        name: Some(name),
                        type_text: item.type_text,
                        span: item.span,
                    });
                }
            }
        }

        if !pending.is_empty() {
            return Err(ParseError::mixed_parameters(src.to_string(), list_span));
        }

        Ok(params)
    }

    fn parse_parameter_item(pair: Pair<'_>) -> ParseResult<ParamItem> {
        let span = Self::span_from_pair(&pair);
        let inner = Self::first_inner(pair)?;
        let is_named = inner.as_rule() == Rule::named_parameter;

        let mut name = None;
        let mut variadic = false;
        let mut type_text = String::new();
        let mut bare_identifier = false;

        for part in inner.into_inner() {
            match part.as_rule() {
                Rule::identifier => name = Some(part.as_str().to_string()),
                Rule::variadic => variadic = true,
                Rule::type_expr => {
                    bare_identifier = !is_named && Self::is_bare_identifier(&part);
                    type_text = Self::render_type(part)?;
                }
                _ => {}
            }
        }

        if variadic {
            type_text = format!("...{type_text}");
            bare_identifier = false;
        }

        Ok(ParamItem {
            name,
            type_text,
            bare_identifier,
            span,
        })
    }

    /// True when a type expression is a lone identifier that could be a name
    fn is_bare_identifier(pair: &Pair<'_>) -> bool {
        let Some(inner) = pair.clone().into_inner().next() else {
            return false;
        };
        if inner.as_rule() != Rule::type_name {
            return false;
        }
        let mut parts = inner.into_inner();
        matches!(
            (parts.next().map(|p| p.as_rule()), parts.next()),
            (Some(Rule::identifier), None)
        )
    }

    /// Render a signature as `(a int, b string) (string, error)`
    pub(crate) fn render_signature(signature: &SignatureDecl) -> String {
        let params = signature
            .params
            .iter()
            .map(Self::render_param)
            .collect::<Vec<_>>()
            .join(", ");

        let results = match signature.results.as_slice() {
            [] => String::new(),
            [single] if single.name.is_none() => format!(" {}", single.type_text),
            many => format!(
                " ({})",
                many.iter()
                    .map(Self::render_param)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        };

        format!("({params}){results}")
    }

    fn render_param(param: &ParamDecl) -> String {
        match &param.name {
            Some(name) => format!("{name} {}", param.type_text),
            None => param.type_text.clone(),
        }
    }
}
