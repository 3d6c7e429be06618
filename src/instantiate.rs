//! Per-entry expansion of a token stream into concrete arguments.
use crate::template::{Token, TokenStream};

/// Expand `tokens` against one entry name, one string per command boundary.
pub fn instantiate(tokens: &TokenStream<'_>, entry_name: &str) -> Vec<String> {
    let mut out = Vec::with_capacity(tokens.boundary_count());
    expand_into(tokens, entry_name, &mut out);
    out
}

/// Append the expansion of `tokens` to `out`.
///
/// The argument being built is committed when the next boundary opens or the
/// stream ends, so `out` grows by exactly `tokens.boundary_count()`.
pub fn expand_into(tokens: &TokenStream<'_>, entry_name: &str, out: &mut Vec<String>) {
    let mut current: Option<String> = None;
    for token in tokens.tokens() {
        match token {
            Token::CommandBoundary => {
                if let Some(done) = current.replace(String::new()) {
                    out.push(done);
                }
            }
            Token::Literal(text) => current.get_or_insert_with(String::new).push_str(text),
            Token::NameRef => current
                .get_or_insert_with(String::new)
                .push_str(entry_name),
            Token::EscapedColon => current.get_or_insert_with(String::new).push(':'),
        }
    }
    out.extend(current);
}

/// Program path followed by the arguments generated for the current entry.
///
/// The buffer is kept across entries; `reset` drops back to the program path
/// without giving up capacity.
#[derive(Debug, Clone)]
pub struct ArgumentList {
    argv: Vec<String>,
}

impl ArgumentList {
    pub fn new(program: impl Into<String>, tokens: &TokenStream<'_>) -> Self {
        let mut argv = Vec::with_capacity(tokens.boundary_count() + 1);
        argv.push(program.into());
        Self { argv }
    }

    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    /// Arguments after the program path.
    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    pub fn as_slice(&self) -> &[String] {
        &self.argv
    }

    pub fn reset(&mut self) {
        self.argv.truncate(1);
    }

    pub fn rebuild(&mut self, tokens: &TokenStream<'_>, entry_name: &str) {
        self.reset();
        expand_into(tokens, entry_name, &mut self.argv);
    }

    /// Single-line rendering used for the echo and for diagnostics.
    pub fn command_line(&self) -> String {
        format_command_line(&self.argv)
    }
}

/// Join with single spaces, wrapping any element that contains a space in
/// double quotes. Nothing else is escaped.
pub fn format_command_line(argv: &[String]) -> String {
    let mut line = String::new();
    for (idx, arg) in argv.iter().enumerate() {
        if idx > 0 {
            line.push(' ');
        }
        if arg.contains(' ') {
            line.push('"');
            line.push_str(arg);
            line.push('"');
        } else {
            line.push_str(arg);
        }
    }
    line
}
