//! Functor-expression tokenizer.
//!
//! Splits one expression of the form `name(arg0,arg1,...)` into its functor
//! name followed by the raw text of each top-level argument. Arguments are
//! not parsed further: a nested `image('a.png',8pt,12px)` stays a single
//! argument so the value peer for that position can tokenize it in turn.
//!
//! Scanning tracks parenthesis depth and single-quote state together:
//!
//! - `(` and `)` inside a quoted literal do not change depth
//! - `,` only splits at depth 1 (directly inside the outer parentheses) and
//!   outside quotes
//!
//! Anything that does not form a single balanced `ident(...)` group spanning
//! the whole input yields an empty vector. Callers treat length 0 as
//! "not a functor expression" rather than as an error.

/// Tokenize a functor expression into `[name, arg0, arg1, ...]`.
///
/// Surrounding whitespace of the whole expression, of the functor name and
/// of each top-level argument is trimmed. Text inside an argument (nested
/// parentheses, quotes, inner whitespace) is kept verbatim.
///
/// An explicitly empty argument list (`f()`) yields just the name, while
/// `f(,)` yields the name plus two empty arguments.
pub fn tokenize(source: &str) -> Vec<String> {
    let source = source.trim();

    let Some(open) = source.find('(') else {
        return Vec::new();
    };
    let name = source[..open].trim();
    if !is_identifier(name) {
        return Vec::new();
    }

    let Some(close) = matching_paren(source, open) else {
        return Vec::new();
    };
    // Trailing text after the outer group makes the expression unparsable.
    if close + 1 != source.len() {
        return Vec::new();
    }

    let content = &source[open + 1..close];
    let mut tokens = vec![name.to_string()];
    if content.trim().is_empty() {
        return tokens;
    }

    tokens.extend(
        split_top_level(content)
            .into_iter()
            .map(|field| field.trim().to_string()),
    );
    tokens
}

/// Build a functor expression from a name and already-encoded arguments.
///
/// This is the inverse of [`tokenize`]: `tokenize(&compose(n, a))` yields
/// `n` followed by `a` for any arguments that are themselves balanced.
pub fn compose<S: AsRef<str>>(name: &str, args: &[S]) -> String {
    let mut out = String::with_capacity(name.len() + 2 + args.len() * 8);
    out.push_str(name);
    out.push('(');
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(arg.as_ref());
    }
    out.push(')');
    out
}

/// Returns `true` for a functor name: a letter or `_`, followed by letters,
/// digits, `_` or `.`.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Find the byte index of the `)` that closes the `(` at `open`.
fn matching_paren(source: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut quoted = false;

    for (i, c) in source[open..].char_indices() {
        match c {
            '\'' => quoted = !quoted,
            '(' if !quoted => depth += 1,
            ')' if !quoted => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }

    None
}

/// Split the content between the outer parentheses on top-level commas.
fn split_top_level(content: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut depth = 0usize;
    let mut quoted = false;
    let mut start = 0;

    for (i, c) in content.char_indices() {
        match c {
            '\'' => quoted = !quoted,
            '(' if !quoted => depth += 1,
            ')' if !quoted => depth = depth.saturating_sub(1),
            ',' if !quoted && depth == 0 => {
                fields.push(&content[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    fields.push(&content[start..]);

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // ── Argument counting ────────────────────────────────────────────

    #[test]
    fn test_empty_argument_list_yields_name_only() {
        assert_eq!(tokenize("o()"), strings(&["o"]));
    }

    #[test]
    fn test_simple_arguments() {
        assert_eq!(tokenize("color(1,2,3)"), strings(&["color", "1", "2", "3"]));
    }

    #[test]
    fn test_empty_fields_are_kept() {
        let tokens = tokenize("obj(,,,)");
        assert_eq!(tokens.len(), 5);
        assert!(tokens[1..].iter().all(String::is_empty));
    }

    #[test]
    fn test_trailing_value_after_empty_fields() {
        let tokens = tokenize("obj(,,,1)");
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[4], "1");
    }

    #[test]
    fn test_single_empty_argument_differs_from_no_arguments() {
        assert_eq!(tokenize("f(,)"), strings(&["f", "", ""]));
        assert_eq!(tokenize("f()").len(), 1);
    }

    // ── Nesting and quoting ──────────────────────────────────────────

    #[test]
    fn test_nested_functor_stays_one_argument() {
        let tokens = tokenize("fillimage(image('123',12,innInObj('fred',z),x),1,2,3)");
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[0], "fillimage");
        assert_eq!(tokens[1], "image('123',12,innInObj('fred',z),x)");
        assert_eq!(tokens[2], "1");
        assert_eq!(tokens[3], "2");
        assert_eq!(tokens[4], "3");
    }

    #[test]
    fn test_quoted_parens_and_commas_do_not_split() {
        let tokens = tokenize("typeface('Times, (New) Roman','Arial')");
        assert_eq!(tokens, strings(&["typeface", "'Times, (New) Roman'", "'Arial'"]));
    }

    #[test]
    fn test_whitespace_is_trimmed_at_top_level_only() {
        let tokens = tokenize("  border( 8pt , color( 1, 2, 3 ) ,STYLE_INSET )  ");
        assert_eq!(
            tokens,
            strings(&["border", "8pt", "color( 1, 2, 3 )", "STYLE_INSET"])
        );
    }

    // ── Unparsable input ─────────────────────────────────────────────

    #[test]
    fn test_unbalanced_parens_yield_empty() {
        let tokens = tokenize("fillimage(image('123',12,innInObj('fred',z,x),1,2,3)");
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_extra_closing_paren_yields_empty() {
        assert!(tokenize("f(a))").is_empty());
    }

    #[test]
    fn test_trailing_garbage_yields_empty() {
        assert!(tokenize("f(a) b").is_empty());
        assert!(tokenize("f(a)(b)").is_empty());
    }

    #[test]
    fn test_missing_parens_or_name_yields_empty() {
        assert!(tokenize("plain").is_empty());
        assert!(tokenize("(1,2)").is_empty());
        assert!(tokenize("'q'(1)").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_unterminated_quote_yields_empty() {
        assert!(tokenize("f('abc)").is_empty());
    }

    // ── compose ──────────────────────────────────────────────────────

    #[test]
    fn test_compose_inverts_tokenize() {
        let args = ["image('a.png',8pt,12px)", "8pt", "", "REPEAT"];
        let text = compose("fillimage", &args);
        assert_eq!(text, "fillimage(image('a.png',8pt,12px),8pt,,REPEAT)");

        let tokens = tokenize(&text);
        assert_eq!(tokens[0], "fillimage");
        assert_eq!(&tokens[1..], &args);
    }

    #[test]
    fn test_compose_without_arguments() {
        let empty: [&str; 0] = [];
        assert_eq!(compose("o", &empty), "o()");
    }

    #[test]
    fn test_tokenize_is_deterministic() {
        let source = "font(typeface('Verdana'),BOLD|ITALIC,10pt)";
        assert_eq!(tokenize(source), tokenize(source));
    }
}
