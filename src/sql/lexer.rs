//! SQL lexer for tokenizing a single DDL statement.
//!
//! Tokens keep their byte span so the parser can slice literals such as
//! `DECIMAL(10, 2)` straight out of the source.

use std::iter::Peekable;
use std::str::CharIndices;

/// SQL token types.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Keywords
    Create,
    Alter,
    Add,
    Table,
    Column,
    Only,
    Primary,
    Key,
    Foreign,
    References,
    Not,
    Null,
    Unique,
    Constraint,
    Index,
    If,
    Exists,
    Check,
    On,
    Using,

    // Identifiers and literals
    Ident(String),
    Str(String),
    Num(String),

    // Symbols
    LParen,
    RParen,
    Comma,
    Dot,
}

impl Token {
    /// Identifiers, plus keywords that also show up as plain column names.
    pub fn is_column_name(&self) -> bool {
        matches!(
            self,
            Token::Ident(_)
                | Token::Key
                | Token::Index
                | Token::Column
                | Token::Table
                | Token::Only
                | Token::Add
                | Token::On
                | Token::Using
                | Token::If
                | Token::Exists
        )
    }
}

/// A token and its byte range in the statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub start: usize,
    pub end: usize,
}

/// SQL lexer.
pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Byte offset of the next unread character.
    fn offset(&mut self) -> usize {
        self.chars.peek().map_or(self.input.len(), |&(i, _)| i)
    }

    fn read_identifier(&mut self) -> String {
        let mut ident = String::new();
        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || c == '_' || c == '$' {
                ident.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        ident
    }

    /// Read up to the closing delimiter; a doubled delimiter is an escape.
    fn read_quoted(&mut self, close: char) -> String {
        self.chars.next(); // skip opening quote
        let mut s = String::new();
        while let Some((_, c)) = self.chars.next() {
            if c == close {
                if close != ']' && self.peek_char() == Some(close) {
                    s.push(c);
                    self.chars.next();
                } else {
                    break;
                }
            } else {
                s.push(c);
            }
        }
        s
    }

    fn read_number(&mut self) -> String {
        let mut num = String::new();
        let mut has_dot = false;

        if self.peek_char() == Some('-') {
            num.push('-');
            self.chars.next();
        }

        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                num.push(c);
                self.chars.next();
            } else if c == '.' && !has_dot {
                has_dot = true;
                num.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        num
    }

    fn keyword_or_ident(s: String) -> Token {
        match s.to_uppercase().as_str() {
            "CREATE" => Token::Create,
            "ALTER" => Token::Alter,
            "ADD" => Token::Add,
            "TABLE" => Token::Table,
            "COLUMN" => Token::Column,
            "ONLY" => Token::Only,
            "PRIMARY" => Token::Primary,
            "KEY" => Token::Key,
            "FOREIGN" => Token::Foreign,
            "REFERENCES" => Token::References,
            "NOT" => Token::Not,
            "NULL" => Token::Null,
            "UNIQUE" => Token::Unique,
            "CONSTRAINT" => Token::Constraint,
            "INDEX" => Token::Index,
            "IF" => Token::If,
            "EXISTS" => Token::Exists,
            "CHECK" => Token::Check,
            "ON" => Token::On,
            "USING" => Token::Using,
            _ => Token::Ident(s),
        }
    }

    fn next_token(&mut self) -> Option<Spanned> {
        loop {
            let (start, c) = *self.chars.peek()?;

            let token = match c {
                c if c.is_whitespace() => {
                    self.chars.next();
                    continue;
                }
                '(' => {
                    self.chars.next();
                    Token::LParen
                }
                ')' => {
                    self.chars.next();
                    Token::RParen
                }
                ',' => {
                    self.chars.next();
                    Token::Comma
                }
                '.' => {
                    self.chars.next();
                    Token::Dot
                }
                '"' => Token::Ident(self.read_quoted('"')),
                '`' => Token::Ident(self.read_quoted('`')),
                '[' => Token::Ident(self.read_quoted(']')),
                '\'' => Token::Str(self.read_quoted('\'')),
                '-' => {
                    let mut ahead = self.chars.clone();
                    ahead.next();
                    if ahead.peek().is_some_and(|&(_, d)| d.is_ascii_digit()) {
                        Token::Num(self.read_number())
                    } else {
                        // Skip standalone dash
                        self.chars.next();
                        continue;
                    }
                }
                c if c.is_ascii_digit() => Token::Num(self.read_number()),
                c if c.is_alphabetic() || c == '_' => {
                    Self::keyword_or_ident(self.read_identifier())
                }
                _ => {
                    // Operators and other punctuation carry no DDL structure
                    self.chars.next();
                    continue;
                }
            };

            let end = self.offset();
            return Some(Spanned { token, start, end });
        }
    }

    /// Collect all tokens.
    pub fn tokenize(&mut self) -> Vec<Spanned> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }
}
