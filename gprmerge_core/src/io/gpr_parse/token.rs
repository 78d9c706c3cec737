//! Tokens of a GPR rule string

/// Represents Tokens in GPR
#[derive(Debug, PartialEq, Clone, Eq, Hash)]
pub enum Token {
    /// A feature id, e.g. `kb|g.587.peg.1234`
    Identifier(String),
    And,
    Or,
    /// Lexed so that negation can be reported, it never appears in a valid rule
    Not,
    LeftParen,
    RightParen,
    Eof,
}

impl Token {
    /// Operator keyword for `word`, keywords are accepted in lower, title or upper case
    pub fn keyword(word: &str) -> Option<Token> {
        match word {
            "and" | "And" | "AND" => Some(Token::And),
            "or" | "Or" | "OR" => Some(Token::Or),
            "not" | "Not" | "NOT" => Some(Token::Not),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords() {
        assert_eq!(Token::keyword("AND"), Some(Token::And));
        assert_eq!(Token::keyword("Or"), Some(Token::Or));
        assert_eq!(Token::keyword("not"), Some(Token::Not));
        // Mixed case words are feature ids
        assert_eq!(Token::keyword("aNd"), None);
        assert_eq!(Token::keyword("b0001"), None);
    }
}
