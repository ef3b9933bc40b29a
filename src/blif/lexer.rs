//! Lexer (tokenizer) for logical BLIF lines.
//!
//! Tokens are maximal runs of non-whitespace. BLIF has no quoting, so a token
//! never contains whitespace.

/// A token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's text, borrowed from the logical line
    pub text: &'a str,
    /// Column number (1-indexed, in characters)
    pub column: usize,
}

/// Token types in BLIF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A word starting with '.'
    Directive,
    /// Any other word (net names, model names, cover symbols, ...)
    Word,
}

/// Lexer over a single logical line.
pub struct Lexer<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given line.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            column: 1,
        }
    }

    /// Get the next token, or `None` at end of line.
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        self.skip_whitespace();

        let (start, ch) = self.chars.peek().copied()?;
        let column = self.column;

        let mut end = self.input.len();
        while let Some(&(pos, c)) = self.chars.peek() {
            if c.is_whitespace() {
                end = pos;
                break;
            }
            self.advance();
        }

        let kind = if ch == '.' {
            TokenKind::Directive
        } else {
            TokenKind::Word
        };

        Some(Token {
            kind,
            text: &self.input[start..end],
            column,
        })
    }

    fn advance(&mut self) -> Option<char> {
        let (_, ch) = self.chars.next()?;
        self.column += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(&(_, ch)) = self.chars.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.advance();
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Split a logical line into tokens.
pub fn tokenize(line: &str) -> Vec<Token<'_>> {
    Lexer::new(line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexer_basic() {
        let tokens = tokenize("a  b\tc");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert_eq!(tokens[1].column, 4);
        assert_eq!(tokens[2].column, 6);
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Word));
    }

    #[test]
    fn test_lexer_directive() {
        let mut lexer = Lexer::new(".subckt adder a=x b=y");

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Directive);
        assert_eq!(tok.text, ".subckt");
        assert_eq!(tok.column, 1);

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Word);
        assert_eq!(tok.text, "adder");

        assert_eq!(lexer.next_token().unwrap().text, "a=x");
        assert_eq!(lexer.next_token().unwrap().text, "b=y");
        assert!(lexer.next_token().is_none());
    }

    #[test]
    fn test_lexer_empty_line() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t ").is_empty());
    }

    #[test]
    fn test_lexer_keeps_punctuation_in_words() {
        let tokens = tokenize("n[3] top.u1/q");
        assert_eq!(tokens[0].text, "n[3]");
        assert_eq!(tokens[1].text, "top.u1/q");
    }
}
