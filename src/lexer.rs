use crate::builtins::Function;
use crate::error::{ScriptError, Span};
use crate::normalize::{logical_lines, Line};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    // Single-character tokens
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Minus,
    Plus,
    Slash,
    Star,
    Caret,
    Less,
    Greater,
    Equal,

    // Two character tokens
    EqualEqual,
    BangEqual,
    AndAnd,
    OrOr,

    // Literals
    Identifier,
    Number,

    // Keywords
    If,
    Elif,
    Else,
    While,

    // Functions
    Sin,
    Asin,
    Sign,
    Sqrt,
    Log,

    // Special
    Newline,
    Eof,
}

impl TokenType {
    pub fn function(self) -> Option<Function> {
        match self {
            TokenType::Sin => Some(Function::Sin),
            TokenType::Asin => Some(Function::Asin),
            TokenType::Sign => Some(Function::Sign),
            TokenType::Sqrt => Some(Function::Sqrt),
            TokenType::Log => Some(Function::Log),
            _ => None,
        }
    }

    fn from_function(function: Function) -> Self {
        match function {
            Function::Sin => TokenType::Sin,
            Function::Asin => TokenType::Asin,
            Function::Sign => TokenType::Sign,
            Function::Sqrt => TokenType::Sqrt,
            Function::Log => TokenType::Log,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub token_type: TokenType,
    pub lexeme: String,
    pub span: Span,
    /// Index of the logical line the token came from.
    pub line: usize,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: String, span: Span, line: usize) -> Self {
        Self {
            token_type,
            lexeme,
            span,
            line,
        }
    }
}

/// Turns normalized logical lines into a flat token stream. Each line is
/// terminated by a `Newline` token and the stream by `Eof`.
pub struct Lexer {
    lines: Vec<Line>,
    tokens: Vec<Token>,
    chars: Vec<char>,
    line: usize,
    start: usize,
    current: usize,
    keywords: HashMap<&'static str, TokenType>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self::from_lines(logical_lines(source))
    }

    pub fn from_lines(lines: Vec<Line>) -> Self {
        let mut keywords = HashMap::new();
        keywords.insert("if", TokenType::If);
        keywords.insert("elif", TokenType::Elif);
        keywords.insert("else", TokenType::Else);
        keywords.insert("while", TokenType::While);

        Self {
            lines,
            tokens: Vec::new(),
            chars: Vec::new(),
            line: 0,
            start: 0,
            current: 0,
            keywords,
        }
    }

    pub fn scan_tokens(&mut self) -> Result<Vec<Token>, ScriptError> {
        for index in 0..self.lines.len() {
            self.line = index;
            self.chars = self.lines[index].text.chars().collect();
            self.start = 0;
            self.current = 0;

            while !self.is_at_end() {
                self.start = self.current;
                self.scan_token()?;
            }

            let end = self.lines[index].end();
            self.tokens.push(Token::new(
                TokenType::Newline,
                String::new(),
                Span::at(end, index),
                index,
            ));
        }

        let end = self.lines.last().map_or(0, Line::end);
        self.tokens.push(Token::new(
            TokenType::Eof,
            String::new(),
            Span::at(end, self.lines.len().saturating_sub(1)),
            self.lines.len().saturating_sub(1),
        ));

        Ok(std::mem::take(&mut self.tokens))
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }

    fn scan_token(&mut self) -> Result<(), ScriptError> {
        let c = self.advance();

        match c {
            '(' => self.add_token(TokenType::LeftParen),
            ')' => self.add_token(TokenType::RightParen),
            '{' => self.add_token(TokenType::LeftBrace),
            '}' => self.add_token(TokenType::RightBrace),
            '[' => self.add_token(TokenType::LeftBracket),
            ']' => self.add_token(TokenType::RightBracket),
            '-' => self.add_token(TokenType::Minus),
            '+' => self.add_token(TokenType::Plus),
            '*' => self.add_token(TokenType::Star),
            '/' => self.add_token(TokenType::Slash),
            '^' => self.add_token(TokenType::Caret),
            '<' => self.add_token(TokenType::Less),
            '>' => self.add_token(TokenType::Greater),
            '=' => {
                let token_type = if self.match_char('=') {
                    TokenType::EqualEqual
                } else {
                    TokenType::Equal
                };
                self.add_token(token_type);
            }
            '!' => {
                if !self.match_char('=') {
                    return Err(self.unexpected(c, "Use '!=' to test for inequality."));
                }
                self.add_token(TokenType::BangEqual);
            }
            '&' => {
                if !self.match_char('&') {
                    return Err(self.unexpected(c, "Use '&&' to join two comparisons."));
                }
                self.add_token(TokenType::AndAnd);
            }
            '|' => {
                if !self.match_char('|') {
                    return Err(self.unexpected(c, "Use '||' to join two comparisons."));
                }
                self.add_token(TokenType::OrOr);
            }
            '.' => {
                if !self.peek().is_ascii_digit() {
                    return Err(self.unexpected(c, "Numbers need digits after the '.', e.g. 0.5 or .5"));
                }
                self.fraction();
                self.add_token(TokenType::Number);
            }
            c if c.is_ascii_alphanumeric() || c == '_' => self.word(),
            _ => {
                return Err(self.unexpected(
                    c,
                    "Scripts may only use letters, digits, '_', arithmetic and comparison operators, brackets and braces.",
                ));
            }
        }

        Ok(())
    }

    fn advance(&mut self) -> char {
        let c = self.chars.get(self.current).copied().unwrap_or('\0');
        self.current += 1;
        c
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.peek() != expected {
            false
        } else {
            self.current += 1;
            true
        }
    }

    fn peek(&self) -> char {
        self.chars.get(self.current).copied().unwrap_or('\0')
    }

    fn peek_next(&self) -> char {
        self.chars.get(self.current + 1).copied().unwrap_or('\0')
    }

    /// A run of letters, digits and underscores. Runs of digits alone are
    /// numerals; anything else is a name, even one the environment will
    /// later refuse (`_1`), so that the refusal is a diagnostic rather than
    /// a lex failure.
    fn word(&mut self) {
        while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let text: String = self.chars[self.start..self.current].iter().collect();
        if text.chars().any(|c| c.is_ascii_alphabetic()) {
            self.identifier(&text);
            return;
        }
        if text.contains('_') {
            self.add_token(TokenType::Identifier);
            return;
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance();
            self.fraction();
        }
        self.add_token(TokenType::Number);
    }

    fn fraction(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }
    }

    fn identifier(&mut self, text: &str) {
        if let Some(&token_type) = self.keywords.get(text) {
            self.add_token(token_type);
            return;
        }

        // Function names bind to whatever follows them: `Sqrt9`, `Sinx`.
        if let Some(function) = Function::from_prefix(text) {
            self.current = self.start + function.name().len();
            self.add_token(TokenType::from_function(function));
            return;
        }

        self.add_token(TokenType::Identifier);
    }

    fn span(&self) -> Span {
        let line = &self.lines[self.line];
        let start = line.offset(self.start);
        let end = line.offset(self.current - 1) + 1;
        Span::new(start, end, self.line)
    }

    fn unexpected(&self, c: char, help: &str) -> ScriptError {
        ScriptError::lex_error_with_help(
            self.span(),
            format!("Unexpected character: '{}'", c),
            help.to_string(),
        )
    }

    fn add_token(&mut self, token_type: TokenType) {
        let lexeme: String = self.chars[self.start..self.current].iter().collect();
        let span = self.span();
        self.tokens
            .push(Token::new(token_type, lexeme, span, self.line));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(source: &str) -> Vec<TokenType> {
        Lexer::new(source)
            .scan_tokens()
            .unwrap()
            .into_iter()
            .map(|token| token.token_type)
            .collect()
    }

    fn lexemes(source: &str) -> Vec<String> {
        Lexer::new(source)
            .scan_tokens()
            .unwrap()
            .into_iter()
            .filter(|token| !matches!(token.token_type, TokenType::Newline | TokenType::Eof))
            .map(|token| token.lexeme)
            .collect()
    }

    #[test]
    fn assignment_line() {
        use TokenType::*;
        assert_eq!(
            types("x = 1.5 * y"),
            vec![Identifier, Equal, Number, Star, Identifier, Newline, Eof]
        );
    }

    #[test]
    fn comparison_operators() {
        assert_eq!(lexemes("a==b!=c<d>e&&f||g"), vec![
            "a", "==", "b", "!=", "c", "<", "d", ">", "e", "&&", "f", "||", "g"
        ]);
    }

    #[test]
    fn whitespace_inside_names_is_ignored() {
        assert_eq!(lexemes("my var = 1 0"), vec!["myvar", "=", "10"]);
    }

    #[test]
    fn keywords_only_match_whole_words() {
        use TokenType::*;
        assert_eq!(types("while(x<1)")[0], While);
        assert_eq!(types("elif(x<1)")[0], Elif);
        assert_eq!(types("else")[0], Else);
        assert_eq!(types("ifx=1")[0], Identifier);
    }

    #[test]
    fn functions_split_from_their_operand() {
        assert_eq!(lexemes("Sqrt9+Sinx"), vec!["Sqrt", "9", "+", "Sin", "x"]);
        assert_eq!(types("Sign(x)")[0], TokenType::Sign);
    }

    #[test]
    fn names_may_start_with_digits() {
        assert_eq!(lexemes("2x=3"), vec!["2x", "=", "3"]);
    }

    #[test]
    fn letterless_underscore_runs_are_names() {
        use TokenType::*;
        assert_eq!(types("_1=5"), vec![Identifier, Equal, Number, Newline, Eof]);
        assert_eq!(lexemes("x=1_0"), vec!["x", "=", "1_0"]);
    }

    #[test]
    fn leading_dot_numbers() {
        assert_eq!(lexemes(".5+1.25"), vec![".5", "+", "1.25"]);
    }

    #[test]
    fn array_access() {
        use TokenType::*;
        assert_eq!(
            types("A[i+1]"),
            vec![Identifier, LeftBracket, Identifier, Plus, Number, RightBracket, Newline, Eof]
        );
    }

    #[test]
    fn braces_get_their_own_lines() {
        use TokenType::*;
        assert_eq!(
            types("{x=1}"),
            vec![
                Newline, LeftBrace, Newline, Identifier, Equal, Number, Newline, RightBrace,
                Newline, Newline, Eof
            ]
        );
    }

    #[test]
    fn spans_refer_to_original_source() {
        let tokens = Lexer::new("  total = 10").scan_tokens().unwrap();
        assert_eq!(tokens[0].span, Span::new(2, 7, 0));
        assert_eq!(tokens[2].span, Span::new(10, 12, 0));

        let tokens = Lexer::new("a = 1; b = 2").scan_tokens().unwrap();
        assert_eq!(tokens[4].lexeme, "b");
        assert_eq!(tokens[4].span, Span::new(7, 8, 1));
    }

    #[test]
    fn rejects_stray_characters() {
        for source in ["x = 1 $ 2", "x = a & b", "x = !y", "x = 1.", "x = #"] {
            let error = Lexer::new(source).scan_tokens().unwrap_err();
            assert_eq!(error.kind, crate::error::ErrorKind::LexError, "{}", source);
        }
    }
}
