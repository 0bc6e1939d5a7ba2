//! logos-based style-sheet lexer.
//!
//! The lexer only needs to be precise about structure: selectors, the
//! `extends` keyword, braces, colons and semicolons. Property values are
//! recovered as raw source slices, so inside a value the lexer only has to
//! keep quoted strings whole (a `;` inside quotes must not end the value)
//! and track parentheses.
//!
//! Token priority follows logos rules: longest match wins, and for equal
//! lengths a `#[token]` beats a `#[regex]`, so `extends` is a keyword but
//! `extended` is an identifier.

use logos::Logos;

/// Style-sheet token.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// `extends` keyword.
    #[token("extends")]
    Extends,

    /// Single-quoted string literal, on one line.
    #[regex(r"'[^'\n]*'")]
    StringLiteral,

    /// Hex color: `#fff`, `#FF0000`.
    #[regex(r"#[0-9a-fA-F]+")]
    HexColor,

    /// Number, possibly with a unit suffix: `8`, `-3px`, `50%`, `1.5`.
    #[regex(r"-?[0-9]+(\.[0-9]+)?([a-zA-Z]+|%)?")]
    Number,

    /// Identifier: type names, style names, property names, symbols.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    /// `{`
    #[token("{")]
    BraceOpen,

    /// `}`
    #[token("}")]
    BraceClose,

    /// `(`
    #[token("(")]
    ParenOpen,

    /// `)`
    #[token(")")]
    ParenClose,

    /// `:`
    #[token(":")]
    Colon,

    /// `;`
    #[token(";")]
    Semicolon,

    /// `,`
    #[token(",")]
    Comma,

    /// `.`
    #[token(".")]
    Dot,

    /// `|`
    #[token("|")]
    Pipe,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<(Token, String)> {
        Token::lexer(input)
            .spanned()
            .filter_map(|(result, span)| result.ok().map(|token| (token, input[span].to_string())))
            .collect()
    }

    fn tokens(input: &str) -> Vec<Token> {
        tokenize(input).into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            tokens("{ } ( ) : ; , . |"),
            vec![
                Token::BraceOpen,
                Token::BraceClose,
                Token::ParenOpen,
                Token::ParenClose,
                Token::Colon,
                Token::Semicolon,
                Token::Comma,
                Token::Dot,
                Token::Pipe,
            ]
        );
    }

    #[test]
    fn test_extends_is_a_keyword_only_as_a_whole_word() {
        assert_eq!(tokens("extends"), vec![Token::Extends]);
        assert_eq!(tokens("extended"), vec![Token::Ident]);
        assert_eq!(tokens("extends_base"), vec![Token::Ident]);
    }

    #[test]
    fn test_selector_with_style_name() {
        let result = tokenize("Button.primary extends Label.base");
        assert_eq!(result[0], (Token::Ident, "Button".into()));
        assert_eq!(result[1], (Token::Dot, ".".into()));
        assert_eq!(result[2], (Token::Ident, "primary".into()));
        assert_eq!(result[3], (Token::Extends, "extends".into()));
        assert_eq!(result[4], (Token::Ident, "Label".into()));
        assert_eq!(result[5], (Token::Dot, ".".into()));
        assert_eq!(result[6], (Token::Ident, "base".into()));
    }

    #[test]
    fn test_numbers_with_units() {
        let result = tokenize("8pt -3px 50% 12 1.5");
        assert!(result.iter().all(|(t, _)| *t == Token::Number));
        assert_eq!(result[1].1, "-3px");
        assert_eq!(result[2].1, "50%");
    }

    #[test]
    fn test_functor_value() {
        assert_eq!(
            tokens("border(8pt,#FF0000,STYLE_INSET)"),
            vec![
                Token::Ident,
                Token::ParenOpen,
                Token::Number,
                Token::Comma,
                Token::HexColor,
                Token::Comma,
                Token::Ident,
                Token::ParenClose,
            ]
        );
    }

    #[test]
    fn test_quoted_semicolon_stays_in_string() {
        let result = tokenize("text: 'a;b';");
        assert_eq!(result[2], (Token::StringLiteral, "'a;b'".into()));
        assert_eq!(result[3].0, Token::Semicolon);
    }

    #[test]
    fn test_string_literals_are_single_quoted_on_one_line() {
        assert_eq!(tokens("'a\nb'"), vec![Token::Ident, Token::Ident]);
        assert_eq!(tokens("\"a;b\""), vec![Token::Ident, Token::Semicolon, Token::Ident]);
    }

    #[test]
    fn test_unknown_characters_are_dropped() {
        assert_eq!(tokens("a @ b"), vec![Token::Ident, Token::Ident]);
    }

    #[test]
    fn test_whitespace_only() {
        assert!(tokens("  \n\t ").is_empty());
    }
}
