//! Recursive descent style-sheet parser.
//!
//! Parses style-sheet text into a [`ParsedSheet`]:
//!
//! ```text
//! sheet       := rule*
//! rule        := selector [ "extends" selector ( "," selector )* ] "{" declaration* "}"
//! selector    := Ident [ "." Ident ]          (no whitespace around the dot)
//! declaration := Ident ":" value [ ";" ]
//! ```
//!
//! A value runs to the next `;` or `}` outside parentheses and quotes, and
//! is kept as the raw (trimmed) source text for the value peers to decode.
//! Block comments are blanked out before lexing; newlines inside them are
//! kept so that reported line numbers match the input.

use logos::Logos;

use crate::sheet::error::StyleSheetError;
use crate::sheet::lexer::Token;
use crate::sheet::model::{Declaration, ExtendsRef, ParsedSheet, Rule, Selector};

/// A token with its byte span in the comment-free source.
#[derive(Debug, Clone, Copy)]
struct PToken {
    /// `None` for characters the lexer does not recognise.
    token: Option<Token>,
    start: usize,
    end: usize,
    /// 1-based line of `start`.
    line: usize,
}

/// Blank out `/* ... */` comments, keeping newlines and byte offsets.
///
/// Text inside single quotes is copied unchanged. A quoted literal ends at
/// its closing quote or at the end of the line.
fn strip_comments(input: &str) -> Result<String, StyleSheetError> {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.char_indices().peekable();
    let mut line = 1;
    let mut quoted = false;

    while let Some((_, c)) = chars.next() {
        if !quoted && c == '/' && chars.peek().is_some_and(|&(_, next)| next == '*') {
            let start_line = line;
            chars.next();
            result.push_str("  ");

            let mut closed = false;
            while let Some((_, c)) = chars.next() {
                if c == '*' && chars.peek().is_some_and(|&(_, next)| next == '/') {
                    chars.next();
                    result.push_str("  ");
                    closed = true;
                    break;
                }
                if c == '\n' {
                    line += 1;
                    result.push('\n');
                } else {
                    // One space per byte keeps later offsets aligned.
                    result.extend(std::iter::repeat_n(' ', c.len_utf8()));
                }
            }

            if !closed {
                return Err(StyleSheetError::Syntax {
                    line: start_line,
                    selector: None,
                    message: "unterminated comment".into(),
                });
            }
        } else {
            match c {
                '\'' => quoted = !quoted,
                '\n' => {
                    line += 1;
                    quoted = false;
                }
                _ => {}
            }
            result.push(c);
        }
    }

    Ok(result)
}

/// Lex `source` keeping spans, line numbers and unrecognised characters.
fn tokenize_with_spans(source: &str) -> Vec<PToken> {
    let line_starts: Vec<usize> = std::iter::once(0)
        .chain(source.match_indices('\n').map(|(i, _)| i + 1))
        .collect();
    let line_of = |offset: usize| line_starts.partition_point(|&start| start <= offset);

    Token::lexer(source)
        .spanned()
        .map(|(result, span)| PToken {
            token: result.ok(),
            start: span.start,
            end: span.end,
            line: line_of(span.start),
        })
        .collect()
}

/// Parse style-sheet text into a [`ParsedSheet`].
pub fn parse_sheet(input: &str) -> Result<ParsedSheet, StyleSheetError> {
    let source = strip_comments(input)?;
    let tokens = tokenize_with_spans(&source);

    let mut parser = Parser {
        source: &source,
        tokens,
        cursor: 0,
        context: None,
    };

    let mut rules = Vec::new();
    while !parser.is_eof() {
        rules.push(parser.parse_rule()?);
    }

    Ok(ParsedSheet { rules })
}

/// Recursive descent parser state.
struct Parser<'a> {
    source: &'a str,
    tokens: Vec<PToken>,
    cursor: usize,
    /// Selector of the rule being parsed, for error messages.
    context: Option<String>,
}

impl<'a> Parser<'a> {
    fn is_eof(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    fn peek(&self) -> Option<PToken> {
        self.tokens.get(self.cursor).copied()
    }

    fn peek_is(&self, expected: Token) -> bool {
        self.peek().is_some_and(|t| t.token == Some(expected))
    }

    fn advance(&mut self) -> Option<PToken> {
        let tok = self.peek()?;
        self.cursor += 1;
        Some(tok)
    }

    fn text(&self, tok: PToken) -> &'a str {
        &self.source[tok.start..tok.end]
    }

    /// Line of the current token, or of the last token at end of input.
    fn current_line(&self) -> usize {
        self.peek()
            .or_else(|| self.tokens.last().copied())
            .map_or(1, |t| t.line)
    }

    fn error(&self, line: usize, message: impl Into<String>) -> StyleSheetError {
        StyleSheetError::Syntax {
            line,
            selector: self.context.clone(),
            message: message.into(),
        }
    }

    fn describe(&self, tok: PToken) -> String {
        match tok.token {
            Some(token) => format!("{:?} '{}'", token, self.text(tok)),
            None => format!("unexpected character '{}'", self.text(tok)),
        }
    }

    fn expect(&mut self, expected: Token, what: &str) -> Result<PToken, StyleSheetError> {
        match self.advance() {
            Some(tok) if tok.token == Some(expected) => Ok(tok),
            Some(tok) => Err(self.error(
                tok.line,
                format!("expected {what}, got {}", self.describe(tok)),
            )),
            None => Err(self.error(
                self.current_line(),
                format!("expected {what}, got end of input"),
            )),
        }
    }

    /// Returns `true` if the current token directly follows the previous one.
    fn is_adjacent(&self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = self.tokens[self.cursor - 1];
        self.peek().is_some_and(|curr| curr.start == prev.end)
    }

    /// Parse `selector [extends a, b] { declarations }`.
    fn parse_rule(&mut self) -> Result<Rule, StyleSheetError> {
        self.context = None;
        let line = self.current_line();
        let selector = self.parse_selector()?;
        self.context = Some(selector.to_string());

        let mut extends = Vec::new();
        if self.peek_is(Token::Extends) {
            self.advance();
            loop {
                let line = self.current_line();
                extends.push(ExtendsRef {
                    selector: self.parse_selector()?,
                    line,
                });
                if !self.peek_is(Token::Comma) {
                    break;
                }
                self.advance();
            }
        }

        self.expect(Token::BraceOpen, "'{'")?;
        let declarations = self.parse_declarations()?;
        self.expect(Token::BraceClose, "'}'")?;

        Ok(Rule {
            selector,
            extends,
            declarations,
            line,
        })
    }

    /// Parse `Type` or `Type.name`.
    fn parse_selector(&mut self) -> Result<Selector, StyleSheetError> {
        let type_tok = self.expect(Token::Ident, "selector type")?;
        let type_name = self.text(type_tok).to_string();

        if !(self.peek_is(Token::Dot) && self.is_adjacent()) {
            return Ok(Selector::of_type(type_name));
        }
        self.advance();

        if !self.is_adjacent() {
            return Err(self.error(
                self.current_line(),
                format!("expected style name directly after '{type_name}.'"),
            ));
        }
        let name_tok = self.expect(Token::Ident, "style name")?;
        Ok(Selector::named(type_name, self.text(name_tok)))
    }

    /// Parse declarations up to (not including) the closing `}`.
    fn parse_declarations(&mut self) -> Result<Vec<Declaration>, StyleSheetError> {
        let mut declarations = Vec::new();

        while self.peek().is_some_and(|t| t.token != Some(Token::BraceClose)) {
            declarations.push(self.parse_declaration()?);
        }

        Ok(declarations)
    }

    /// Parse `property: value [;]`.
    fn parse_declaration(&mut self) -> Result<Declaration, StyleSheetError> {
        let prop_tok = self.expect(Token::Ident, "property name")?;
        let property = self.text(prop_tok).to_string();
        self.expect(Token::Colon, "':'")?;

        let mut depth = 0usize;
        let mut span: Option<(usize, usize)> = None;

        loop {
            let Some(tok) = self.peek() else {
                return Err(self.error(
                    prop_tok.line,
                    format!("unexpected end of input in value of '{property}'"),
                ));
            };

            match tok.token {
                Some(Token::Semicolon | Token::BraceClose) if depth == 0 => break,
                Some(Token::ParenOpen) => depth += 1,
                Some(Token::ParenClose) => {
                    depth = depth.checked_sub(1).ok_or_else(|| {
                        self.error(tok.line, format!("unbalanced ')' in value of '{property}'"))
                    })?;
                }
                _ => {}
            }

            span = Some(span.map_or((tok.start, tok.end), |(start, _)| (start, tok.end)));
            self.advance();
        }

        let Some((start, end)) = span else {
            return Err(self.error(prop_tok.line, format!("missing value for '{property}'")));
        };

        if self.peek_is(Token::Semicolon) {
            self.advance();
        }

        Ok(Declaration {
            property,
            value: self.source[start..end].trim().to_string(),
            line: prop_tok.line,
        })
    }
}
