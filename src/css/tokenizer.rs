//! logos-based tokenizer for CSS length lists.
//!
//! Covers the small slice of CSS the site needs: whitespace- or
//! comma-separated lengths such as `0px 0px -50px 0px` or `10% 0`.
//! `50px` lexes as a single [`Token::Dimension`] because the longest match
//! wins over [`Token::Number`] followed by [`Token::Ident`].

use logos::Logos;

/// CSS token produced by the lexer.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// Number with a unit suffix: `-50px`, `12.5%`.
    #[regex(r"-?[0-9]+(\.[0-9]+)?(px|%)")]
    Dimension,

    /// Bare number: `0`, `-3.5`.
    #[regex(r"-?[0-9]+(\.[0-9]+)?")]
    Number,

    /// Identifier (unknown units, keywords).
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    /// `,`
    #[token(",")]
    Comma,
}

/// A lexed token with its source text and byte offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub token: Option<Token>,
    pub text: String,
    pub offset: usize,
}

/// Tokenize a CSS string into lexemes.
///
/// Unlike a lossy tokenizer, characters logos cannot lex are kept as
/// lexemes with `token: None` so callers can report them.
pub fn tokenize(input: &str) -> Vec<Lexeme> {
    Token::lexer(input)
        .spanned()
        .map(|(result, span)| Lexeme {
            token: result.ok(),
            text: input[span.clone()].to_string(),
            offset: span.start,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Option<Token>> {
        tokenize(input).into_iter().map(|l| l.token).collect()
    }

    #[test]
    fn dimensions_and_numbers() {
        assert_eq!(
            tokens("0px -50px 0 12.5%"),
            vec![
                Some(Token::Dimension),
                Some(Token::Dimension),
                Some(Token::Number),
                Some(Token::Dimension),
            ]
        );
    }

    #[test]
    fn unknown_unit_lexes_as_number_then_ident() {
        assert_eq!(tokens("10em"), vec![Some(Token::Number), Some(Token::Ident)]);
    }

    #[test]
    fn commas_are_tokens() {
        assert_eq!(
            tokens("1px,2px"),
            vec![Some(Token::Dimension), Some(Token::Comma), Some(Token::Dimension)]
        );
    }

    #[test]
    fn garbage_is_kept_with_offset() {
        let lexemes = tokenize("0px @");
        assert_eq!(lexemes.len(), 2);
        assert_eq!(lexemes[1].token, None);
        assert_eq!(lexemes[1].text, "@");
        assert_eq!(lexemes[1].offset, 4);
    }

    #[test]
    fn empty_input() {
        assert!(tokenize("   ").is_empty());
    }
}
