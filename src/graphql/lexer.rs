//! GraphQL lexer
//!
//! Converts source text into a flat token stream. Whitespace, commas,
//! comments and the byte order mark are ignored tokens and never reach
//! the parser.

use std::fmt;

use super::errors::{GraphqlError, GraphqlResult};

/// 1-based source position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Token kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Bang,
    Dollar,
    Amp,
    ParenL,
    ParenR,
    Spread,
    Colon,
    Equals,
    At,
    BracketL,
    BracketR,
    BraceL,
    Pipe,
    BraceR,
    Name(String),
    Int(String),
    Float(String),
    /// Decoded string value
    String(String),
    /// Decoded block string value (common indentation removed)
    BlockString(String),
    Eof,
}

impl TokenKind {
    /// Human-readable description for error messages
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Bang => "\"!\"".to_string(),
            TokenKind::Dollar => "\"$\"".to_string(),
            TokenKind::Amp => "\"&\"".to_string(),
            TokenKind::ParenL => "\"(\"".to_string(),
            TokenKind::ParenR => "\")\"".to_string(),
            TokenKind::Spread => "\"...\"".to_string(),
            TokenKind::Colon => "\":\"".to_string(),
            TokenKind::Equals => "\"=\"".to_string(),
            TokenKind::At => "\"@\"".to_string(),
            TokenKind::BracketL => "\"[\"".to_string(),
            TokenKind::BracketR => "\"]\"".to_string(),
            TokenKind::BraceL => "\"{\"".to_string(),
            TokenKind::Pipe => "\"|\"".to_string(),
            TokenKind::BraceR => "\"}\"".to_string(),
            TokenKind::Name(name) => format!("Name \"{}\"", name),
            TokenKind::Int(value) => format!("Int \"{}\"", value),
            TokenKind::Float(value) => format!("Float \"{}\"", value),
            TokenKind::String(_) => "String".to_string(),
            TokenKind::BlockString(_) => "BlockString".to_string(),
            TokenKind::Eof => "<EOF>".to_string(),
        }
    }
}

/// A token with its starting position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}

/// Character-level GraphQL lexer
pub struct Lexer {
    chars: Vec<char>,
    offset: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a lexer over the given source
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire source. The final token is always `Eof`.
    pub fn tokenize(mut self) -> GraphqlResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.offset).copied()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.chars.get(self.offset + n).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += 1;
        match c {
            '\n' => {
                self.line += 1;
                self.column = 1;
            }
            // \r\n counts as a single line terminator
            '\r' if self.peek() != Some('\n') => {
                self.line += 1;
                self.column = 1;
            }
            '\r' => {}
            _ => self.column += 1,
        }
        Some(c)
    }

    fn skip_ignored(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | ',' | '\n' | '\r' | '\u{feff}' => {
                    self.bump();
                }
                '#' => {
                    while let Some(c) = self.peek() {
                        if c == '\n' || c == '\r' {
                            break;
                        }
                        self.bump();
                    }
                }
                _ => break,
            }
        }
    }

    fn next_token(&mut self) -> GraphqlResult<Token> {
        self.skip_ignored();
        let position = self.position();

        let Some(c) = self.peek() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                position,
            });
        };

        let punctuator = match c {
            '!' => Some(TokenKind::Bang),
            '$' => Some(TokenKind::Dollar),
            '&' => Some(TokenKind::Amp),
            '(' => Some(TokenKind::ParenL),
            ')' => Some(TokenKind::ParenR),
            ':' => Some(TokenKind::Colon),
            '=' => Some(TokenKind::Equals),
            '@' => Some(TokenKind::At),
            '[' => Some(TokenKind::BracketL),
            ']' => Some(TokenKind::BracketR),
            '{' => Some(TokenKind::BraceL),
            '|' => Some(TokenKind::Pipe),
            '}' => Some(TokenKind::BraceR),
            _ => None,
        };

        let kind = if let Some(kind) = punctuator {
            self.bump();
            kind
        } else {
            match c {
                '.' => {
                    if self.peek_at(1) == Some('.') && self.peek_at(2) == Some('.') {
                        self.bump();
                        self.bump();
                        self.bump();
                        TokenKind::Spread
                    } else {
                        return Err(GraphqlError::syntax(
                            position,
                            "Unexpected \".\", did you mean \"...\"?",
                        ));
                    }
                }
                '_' | 'a'..='z' | 'A'..='Z' => TokenKind::Name(self.read_name()),
                '-' | '0'..='9' => self.read_number(position)?,
                '"' => {
                    if self.peek_at(1) == Some('"') && self.peek_at(2) == Some('"') {
                        self.read_block_string(position)?
                    } else {
                        self.read_string(position)?
                    }
                }
                other => {
                    return Err(GraphqlError::syntax(
                        position,
                        format!("Unexpected character {:?}", other),
                    ))
                }
            }
        };

        Ok(Token { kind, position })
    }

    fn read_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c == '_' || c.is_ascii_alphanumeric() {
                name.push(c);
                self.bump();
            } else {
                break;
            }
        }
        name
    }

    fn read_digits(&mut self, text: &mut String, position: Position) -> GraphqlResult<()> {
        match self.peek() {
            Some(c) if c.is_ascii_digit() => {}
            other => {
                return Err(GraphqlError::syntax(
                    position,
                    format!("Invalid number, expected digit but got {:?}", other),
                ))
            }
        }
        while let Some(c) = self.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            text.push(c);
            self.bump();
        }
        Ok(())
    }

    fn read_number(&mut self, position: Position) -> GraphqlResult<TokenKind> {
        let mut text = String::new();
        let mut is_float = false;

        if self.peek() == Some('-') {
            text.push('-');
            self.bump();
        }

        if self.peek() == Some('0') {
            text.push('0');
            self.bump();
            if matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                return Err(GraphqlError::syntax(
                    position,
                    "Invalid number, unexpected digit after 0",
                ));
            }
        } else {
            self.read_digits(&mut text, position)?;
        }

        if self.peek() == Some('.') {
            is_float = true;
            text.push('.');
            self.bump();
            self.read_digits(&mut text, position)?;
        }

        if let Some(e @ ('e' | 'E')) = self.peek() {
            is_float = true;
            text.push(e);
            self.bump();
            if let Some(sign @ ('+' | '-')) = self.peek() {
                text.push(sign);
                self.bump();
            }
            self.read_digits(&mut text, position)?;
        }

        if let Some(c) = self.peek() {
            if c == '.' || c == '_' || c.is_ascii_alphabetic() {
                return Err(GraphqlError::syntax(
                    position,
                    format!("Invalid number, expected digit but got {:?}", c),
                ));
            }
        }

        Ok(if is_float {
            TokenKind::Float(text)
        } else {
            TokenKind::Int(text)
        })
    }

    fn read_hex4(&mut self, position: Position) -> GraphqlResult<u32> {
        let mut code = 0u32;
        for _ in 0..4 {
            let digit = self
                .peek()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| GraphqlError::syntax(position, "Invalid Unicode escape sequence"))?;
            code = code * 16 + digit;
            self.bump();
        }
        Ok(code)
    }

    fn read_unicode_escape(&mut self, position: Position) -> GraphqlResult<char> {
        let code = self.read_hex4(position)?;

        // High surrogate must be followed by an escaped low surrogate
        if (0xD800..0xDC00).contains(&code) {
            if self.peek() == Some('\\') && self.peek_at(1) == Some('u') {
                self.bump();
                self.bump();
                let low = self.read_hex4(position)?;
                if (0xDC00..0xE000).contains(&low) {
                    let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                    return char::from_u32(combined).ok_or_else(|| {
                        GraphqlError::syntax(position, "Invalid Unicode escape sequence")
                    });
                }
            }
            return Err(GraphqlError::syntax(
                position,
                "Invalid Unicode escape sequence: unpaired surrogate",
            ));
        }

        char::from_u32(code)
            .ok_or_else(|| GraphqlError::syntax(position, "Invalid Unicode escape sequence"))
    }

    fn read_string(&mut self, position: Position) -> GraphqlResult<TokenKind> {
        self.bump();
        let mut value = String::new();

        loop {
            match self.peek() {
                None | Some('\n') | Some('\r') => {
                    return Err(GraphqlError::syntax(position, "Unterminated string"));
                }
                Some('"') => {
                    self.bump();
                    return Ok(TokenKind::String(value));
                }
                Some('\\') => {
                    self.bump();
                    let escaped = match self.bump() {
                        Some('"') => '"',
                        Some('\\') => '\\',
                        Some('/') => '/',
                        Some('b') => '\u{8}',
                        Some('f') => '\u{c}',
                        Some('n') => '\n',
                        Some('r') => '\r',
                        Some('t') => '\t',
                        Some('u') => self.read_unicode_escape(position)?,
                        other => {
                            return Err(GraphqlError::syntax(
                                position,
                                format!("Invalid character escape sequence: {:?}", other),
                            ))
                        }
                    };
                    value.push(escaped);
                }
                Some(c) => {
                    value.push(c);
                    self.bump();
                }
            }
        }
    }

    fn read_block_string(&mut self, position: Position) -> GraphqlResult<TokenKind> {
        self.bump();
        self.bump();
        self.bump();
        let mut raw = String::new();

        loop {
            match self.peek() {
                None => return Err(GraphqlError::syntax(position, "Unterminated string")),
                Some('"') if self.peek_at(1) == Some('"') && self.peek_at(2) == Some('"') => {
                    self.bump();
                    self.bump();
                    self.bump();
                    return Ok(TokenKind::BlockString(block_string_value(&raw)));
                }
                Some('\\')
                    if self.peek_at(1) == Some('"')
                        && self.peek_at(2) == Some('"')
                        && self.peek_at(3) == Some('"') =>
                {
                    raw.push_str("\"\"\"");
                    for _ in 0..4 {
                        self.bump();
                    }
                }
                Some(c) => {
                    raw.push(c);
                    self.bump();
                }
            }
        }
    }
}

/// Apply the block string indentation rules to raw block string contents.
///
/// The common indentation of every line after the first is removed, then
/// leading and trailing blank lines are dropped.
pub fn block_string_value(raw: &str) -> String {
    let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();

    let common_indent = lines
        .iter()
        .skip(1)
        .filter_map(|line| {
            let indent = line.len() - line.trim_start_matches([' ', '\t']).len();
            (indent < line.len()).then_some(indent)
        })
        .min();

    let mut dedented: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| match common_indent {
            Some(indent) if i > 0 => line.get(indent..).unwrap_or(""),
            _ => line,
        })
        .collect();

    let is_blank = |line: &&str| line.trim_matches([' ', '\t']).is_empty();
    while dedented.first().map_or(false, is_blank) {
        dedented.remove(0);
    }
    while dedented.last().map_or(false, is_blank) {
        dedented.pop();
    }

    dedented.join("\n")
}

/// Tokenize source text
pub fn tokenize(source: &str) -> GraphqlResult<Vec<Token>> {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_punctuators_and_names() {
        assert_eq!(
            kinds("query Q($id: ID!) { ...F }"),
            vec![
                TokenKind::Name("query".into()),
                TokenKind::Name("Q".into()),
                TokenKind::ParenL,
                TokenKind::Dollar,
                TokenKind::Name("id".into()),
                TokenKind::Colon,
                TokenKind::Name("ID".into()),
                TokenKind::Bang,
                TokenKind::ParenR,
                TokenKind::BraceL,
                TokenKind::Spread,
                TokenKind::Name("F".into()),
                TokenKind::BraceR,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_commas_and_comments_are_ignored() {
        assert_eq!(
            kinds("a, b # trailing comment\n,c"),
            vec![
                TokenKind::Name("a".into()),
                TokenKind::Name("b".into()),
                TokenKind::Name("c".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("0 -12 1.5 2e10 -3.25E-2"),
            vec![
                TokenKind::Int("0".into()),
                TokenKind::Int("-12".into()),
                TokenKind::Float("1.5".into()),
                TokenKind::Float("2e10".into()),
                TokenKind::Float("-3.25E-2".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(tokenize("01").is_err());
        assert!(tokenize("1.").is_err());
        assert!(tokenize("1abc").is_err());
        assert!(tokenize("-").is_err());
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            kinds(r#""a\"b\\c\nd\u0041""#),
            vec![TokenKind::String("a\"b\\c\nd\u{41}".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_surrogate_pair_escape() {
        assert_eq!(
            kinds(r#""\uD83D\uDE00""#),
            vec![TokenKind::String("\u{1F600}".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("\"abc\ndef\"").unwrap_err();
        assert!(err.to_string().contains("Unterminated string"));
    }

    #[test]
    fn test_block_string_dedent() {
        let source = "\"\"\"\n    Hello,\n      World!\n\n    Yours\n  \"\"\"";
        assert_eq!(
            kinds(source),
            vec![
                TokenKind::BlockString("Hello,\n  World!\n\nYours".into()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_block_string_escaped_quotes() {
        assert_eq!(
            kinds(r#""""a \""" b""""#),
            vec![TokenKind::BlockString("a \"\"\" b".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_positions_track_lines() {
        let tokens = tokenize("{\n  id\r\n  name\n}").unwrap();
        assert_eq!(tokens[1].position, Position { line: 2, column: 3 });
        assert_eq!(tokens[2].position, Position { line: 3, column: 3 });
        assert_eq!(tokens[3].position, Position { line: 4, column: 1 });
    }

    #[test]
    fn test_single_dot_is_error() {
        let err = tokenize("{ . }").unwrap_err();
        assert_eq!(err.position(), Some(Position { line: 1, column: 3 }));
    }
}
