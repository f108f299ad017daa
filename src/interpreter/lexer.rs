use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::Chars;
use lazy_static::lazy_static;
use thiserror::Error;
use crate::util;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenPos {
    pub line: i32,
    pub column: i32,
}

impl TokenPos {
    pub fn new(line: i32, column: i32) -> TokenPos {
        TokenPos { line, column }
    }

    pub fn begin() -> TokenPos {
        TokenPos::new(1, 1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenType {
    None,

    ParenthesisLeft, ParenthesisRight,
    BracketLeft, BracketRight,
    Semicolon,

    Assign, Equal,
    Greater, GreaterEqual,
    Less, LessEqual,

    Plus, Minus,
    Multiply, Divide, Modulo,

    // `and`/`&&`, `or`/`||`, `not`/`!`
    And, Or, Not,

    Identifier,
    Int,

    // Keywords
    When, Else,
    Loop,
    Out,

    // EOF
    Eof,
}

lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, TokenType> = HashMap::from([
        ("when", TokenType::When),
        ("else", TokenType::Else),
        ("loop", TokenType::Loop),
        ("out", TokenType::Out),
        ("and", TokenType::And),
        ("or", TokenType::Or),
        ("not", TokenType::Not),
    ]);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    token_type: TokenType,
    source: String,
    start: TokenPos, end: TokenPos,
}

impl Token {
    pub fn new(token_type: TokenType, source: String, start: TokenPos, end: TokenPos) -> Token {
        Token {
            token_type, source,
            start, end
        }
    }

    pub fn empty() -> Token {
        Token {
            token_type: TokenType::None,
            source: String::from(""),
            start: TokenPos::begin(), end: TokenPos::begin(),
        }
    }

    pub fn token_type(&self) -> TokenType { self.token_type }
    pub fn source(&self) -> &str { &self.source }
    pub fn start(&self) -> &TokenPos { &self.start }
    pub fn end(&self) -> &TokenPos { &self.end }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.token_type {
            TokenType::None => f.write_str("None"),
            TokenType::Eof => f.write_str("Eof"),
            _ => write!(f, "'{}'", self.source),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexerError {
    #[error("Unexpected EOF")]
    UnexpectedEof,

    #[error("Unexpected character '{1}'")]
    UnexpectedCharacter(TokenPos, char),
    #[error("Unexpected character; expected '{expected}', got '{got}'")]
    ExpectedCharacter {
        pos: TokenPos,
        expected: char,
        got: char,
    },
    #[error("Unterminated block comment")]
    UnterminatedComment {
        pos: TokenPos,
    },
}

impl LexerError {
    pub fn get_pos(&self) -> Option<TokenPos> {
        match self {
            LexerError::UnexpectedCharacter(pos, _) => Some(*pos),
            LexerError::ExpectedCharacter { pos, .. } => Some(*pos),
            LexerError::UnterminatedComment { pos } => Some(*pos),
            LexerError::UnexpectedEof => None,
        }
    }
}

type LexerResult<T> = Result<T, LexerError>;

pub struct Lexer<'source> {
    input: &'source str,

    chars: Chars<'source>,
    peek_1: Option<char>,

    start_index: usize,
    current_index: usize,

    start_pos: TokenPos,
    current_pos: TokenPos,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Lexer<'source> {
        Lexer {
            input: source,

            chars: source.chars(),
            peek_1: None,

            start_index: 0,
            current_index: 0,

            start_pos: TokenPos::begin(),
            current_pos: TokenPos::begin(),
        }
    }

    pub fn scan_token(&mut self) -> LexerResult<Token> {
        loop {
            self.skip_whitespace();
            self.start_index = self.current_index;
            self.start_pos = self.current_pos;

            if self.is_eof() {
                return Ok(self.make_token(TokenType::Eof));
            }

            let c = self.consume()?;

            return match c {
                '(' => Ok(self.make_token(TokenType::ParenthesisLeft)),
                ')' => Ok(self.make_token(TokenType::ParenthesisRight)),
                '{' => Ok(self.make_token(TokenType::BracketLeft)),
                '}' => Ok(self.make_token(TokenType::BracketRight)),
                ';' => Ok(self.make_token(TokenType::Semicolon)),

                // Inside a condition, a single `=` also compares
                '=' => Ok(if self.expect('=') { self.make_token(TokenType::Equal) } else {
                    self.make_token(TokenType::Assign)
                }),
                '!' => Ok(self.make_token(TokenType::Not)),
                '>' => Ok(if self.expect('=') { self.make_token(TokenType::GreaterEqual) } else {
                    self.make_token(TokenType::Greater)
                }),
                '<' => Ok(if self.expect('=') { self.make_token(TokenType::LessEqual) } else {
                    self.make_token(TokenType::Less)
                }),
                '&' => self.expect_second('&', TokenType::And),
                '|' => self.expect_second('|', TokenType::Or),

                '+' => Ok(self.make_token(TokenType::Plus)),
                '-' => Ok(self.make_token(TokenType::Minus)),
                '*' => Ok(self.make_token(TokenType::Multiply)),
                '%' => Ok(self.make_token(TokenType::Modulo)),
                '/' => if self.expect('/') {
                    self.skip_line();
                    continue;
                } else if self.expect('*') {
                    self.skip_block_comment()?;
                    continue;
                } else {
                    Ok(self.make_token(TokenType::Divide))
                },

                c if util::is_numeric(c) => Ok(self.scan_number()),
                c if util::is_alphabetic(c) => Ok(self.scan_identifier()),

                _ => Err(LexerError::UnexpectedCharacter(self.start_pos, c)),
            };
        }
    }

    fn scan_number(&mut self) -> Token {
        while let Ok(c) = self.peek() {
            if !util::is_numeric(c) {
                break;
            }

            let _ = self.consume();
        }

        self.make_token(TokenType::Int)
    }

    fn scan_identifier(&mut self) -> Token {
        while let Ok(c) = self.peek() {
            if !util::is_alphanumeric(c) {
                break;
            }

            let _ = self.consume();
        }

        let name = &self.input[self.start_index..self.current_index];
        let token_type = KEYWORDS.get(name).copied().unwrap_or(TokenType::Identifier);

        Token { source: name.to_owned(), token_type, start: self.start_pos, end: self.current_pos }
    }

    fn expect_second(&mut self, expected: char, token_type: TokenType) -> LexerResult<Token> {
        let pos = self.current_pos;

        match self.peek() {
            Ok(c) if c == expected => {
                let _ = self.consume();
                Ok(self.make_token(token_type))
            },
            Ok(got) => Err(LexerError::ExpectedCharacter { pos, expected, got }),
            Err(_) => Err(LexerError::UnexpectedCharacter(self.start_pos, expected)),
        }
    }

    fn make_token(&self, token_type: TokenType) -> Token {
        Token {
            token_type,
            source: self.input[self.start_index..self.current_index].to_owned(),

            start: self.start_pos, end: self.current_pos,
        }
    }

    fn consume(&mut self) -> LexerResult<char> {
        (if let Some(c) = self.peek_1.take() {
            Ok(c)
        } else {
            self.chars.next().ok_or(LexerError::UnexpectedEof)
        }).map(|c| {
            self.current_index += c.len_utf8();

            if c == '\n' {
                self.current_pos.line += 1;
                self.current_pos.column = 1;
            } else {
                self.current_pos.column += 1;
            }

            c
        })
    }

    fn peek(&mut self) -> LexerResult<char> {
        if let Some(c) = self.peek_1 {
            Ok(c)
        } else if let Some(c) = self.chars.next() {
            self.peek_1 = Some(c);
            Ok(c)
        } else {
            Err(LexerError::UnexpectedEof)
        }
    }

    fn expect(&mut self, expected: char) -> bool {
        match self.peek() {
            Ok(actual) if actual == expected => self.consume().is_ok(),
            _ => false,
        }
    }

    fn skip_whitespace(&mut self) {
        while let Ok(c) = self.peek() {
            if !c.is_whitespace() {
                return;
            }

            let _ = self.consume();
        }
    }

    fn skip_line(&mut self) {
        while let Ok(c) = self.peek() {
            let _ = self.consume();

            if c == '\n' {
                return;
            }
        }
    }

    // Block comments nest
    fn skip_block_comment(&mut self) -> LexerResult<()> {
        let mut comment_count = 1;

        while comment_count > 0 {
            let c = self.consume().map_err(|_| LexerError::UnterminatedComment { pos: self.start_pos })?;

            if c == '/' && self.expect('*') {
                comment_count += 1;
            } else if c == '*' && self.expect('/') {
                comment_count -= 1;
            }
        }

        Ok(())
    }

    fn is_eof(&self) -> bool {
        self.current_index >= self.input.len()
    }
}
