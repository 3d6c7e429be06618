//! Argument template tokenizer.
//!
//! Every template becomes one `CommandBoundary` followed by its content tokens.
//! Literal text is borrowed from the caller's template strings, so a token
//! stream lives exactly as long as the templates it was built from.
use thiserror::Error;

/// Directive that escapes a literal `:`.
const ESCAPED_COLON: &str = "::";

/// Directive replaced by the current entry name.
const NAME_REF: &str = ":name";

/// One lexical unit of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Text copied verbatim into the generated argument.
    Literal(&'a str),
    /// `:name`
    NameRef,
    /// `::`
    EscapedColon,
    /// Start of the next generated argument.
    CommandBoundary,
}

/// Template rejections. Any of these aborts the run before an entry is visited.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("cannot use argument {template:?} (arguments containing '\"' are not supported)")]
    UnsupportedQuoting { template: String },
    #[error("unexpected directive :{directive} in {template:?}")]
    UnknownDirective { directive: String, template: String },
    #[error("dangling ':' at the end of {template:?} (use :: for a literal colon)")]
    TrailingColon { template: String },
}

/// Tokens for all templates, in template order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream<'a> {
    tokens: Vec<Token<'a>>,
}

impl<'a> TokenStream<'a> {
    pub fn tokens(&self) -> &[Token<'a>] {
        &self.tokens
    }

    /// Number of arguments each expansion produces.
    pub fn boundary_count(&self) -> usize {
        self.tokens
            .iter()
            .filter(|token| matches!(token, Token::CommandBoundary))
            .count()
    }
}

/// Tokenize every template, failing on the first rejected one.
pub fn tokenize<'a, S>(templates: &'a [S]) -> Result<TokenStream<'a>, TemplateError>
where
    S: AsRef<str>,
{
    let mut tokens = Vec::with_capacity(templates.len() * 2);
    for template in templates {
        tokenize_template(template.as_ref(), &mut tokens)?;
    }
    Ok(TokenStream { tokens })
}

fn tokenize_template<'a>(
    template: &'a str,
    tokens: &mut Vec<Token<'a>>,
) -> Result<(), TemplateError> {
    if template.contains('"') {
        return Err(TemplateError::UnsupportedQuoting {
            template: template.to_string(),
        });
    }

    tokens.push(Token::CommandBoundary);

    let mut rest = template;
    while !rest.is_empty() {
        let literal_len = rest.find(':').unwrap_or(rest.len());
        if literal_len > 0 {
            tokens.push(Token::Literal(&rest[..literal_len]));
            rest = &rest[literal_len..];
            continue;
        }

        if rest.starts_with(ESCAPED_COLON) {
            tokens.push(Token::EscapedColon);
            rest = &rest[ESCAPED_COLON.len()..];
        } else if rest.starts_with(NAME_REF) {
            tokens.push(Token::NameRef);
            rest = &rest[NAME_REF.len()..];
        } else if rest.len() == 1 {
            return Err(TemplateError::TrailingColon {
                template: template.to_string(),
            });
        } else {
            let tail = &rest[1..];
            let directive = &tail[..tail.find(':').unwrap_or(tail.len())];
            return Err(TemplateError::UnknownDirective {
                directive: directive.to_string(),
                template: template.to_string(),
            });
        }
    }

    Ok(())
}
