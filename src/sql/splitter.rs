//! Split a SQL script into statements.
//!
//! Comments are dropped and `;` terminates a statement unless it sits inside a
//! quoted string or identifier. Parentheses are not tracked here.

use std::iter::Peekable;
use std::str::Chars;

/// One statement of the input script.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// Position among the script's statements, from 0.
    pub index: usize,
    /// 1-based line on which the statement starts.
    pub line: usize,
    pub text: String,
}

/// Split `input` into trimmed, non-empty statements in source order.
pub fn split_statements(input: &str) -> Vec<Statement> {
    Splitter::new(input).run()
}

struct Splitter<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    quote: Option<char>,
    current: String,
    start_line: Option<usize>,
    statements: Vec<Statement>,
}

impl<'a> Splitter<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            quote: None,
            current: String::new(),
            start_line: None,
            statements: Vec::new(),
        }
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn push(&mut self, c: char) {
        if self.start_line.is_none() && !c.is_whitespace() {
            self.start_line = Some(self.line);
        }
        self.current.push(c);
    }

    fn run(mut self) -> Vec<Statement> {
        while let Some(c) = self.next_char() {
            if let Some(quote) = self.quote {
                self.push(c);
                if c == quote {
                    // Doubled quote is an escaped quote
                    if self.chars.peek() == Some(&quote) {
                        if let Some(escaped) = self.next_char() {
                            self.push(escaped);
                        }
                    } else {
                        self.quote = None;
                    }
                }
                continue;
            }

            match c {
                '\'' | '"' | '`' => {
                    self.quote = Some(c);
                    self.push(c);
                }
                '-' if self.chars.peek() == Some(&'-') => {
                    self.skip_line_comment();
                    self.current.push('\n');
                }
                '/' if self.chars.peek() == Some(&'*') => {
                    self.next_char();
                    self.skip_block_comment();
                    self.current.push(' ');
                }
                ';' => self.flush(),
                _ => self.push(c),
            }
        }
        // Unterminated quote or missing final semicolon
        self.flush();
        self.statements
    }

    fn skip_line_comment(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c == '\n' {
                break;
            }
            self.next_char();
        }
    }

    fn skip_block_comment(&mut self) {
        while let Some(c) = self.next_char() {
            if c == '*' && self.chars.peek() == Some(&'/') {
                self.next_char();
                break;
            }
        }
    }

    fn flush(&mut self) {
        let text = self.current.trim();
        if !text.is_empty() {
            self.statements.push(Statement {
                index: self.statements.len(),
                line: self.start_line.unwrap_or(self.line),
                text: text.to_string(),
            });
        }
        self.current.clear();
        self.start_line = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<String> {
        split_statements(input).into_iter().map(|s| s.text).collect()
    }

    #[test]
    fn test_split_simple() {
        let sql = "CREATE TABLE a (id INT); CREATE TABLE b (id INT);";
        assert_eq!(
            texts(sql),
            vec!["CREATE TABLE a (id INT)", "CREATE TABLE b (id INT)"]
        );
    }

    #[test]
    fn test_semicolon_in_string() {
        let sql = "INSERT INTO t VALUES ('a;b'); SELECT 1";
        assert_eq!(texts(sql), vec!["INSERT INTO t VALUES ('a;b')", "SELECT 1"]);
    }

    #[test]
    fn test_semicolon_in_quoted_identifiers() {
        let sql = r#"CREATE TABLE "a;b" (`c;d` INT);"#;
        assert_eq!(texts(sql), vec![r#"CREATE TABLE "a;b" (`c;d` INT)"#]);
    }

    #[test]
    fn test_doubled_quote_escape() {
        let sql = "SELECT 'it''s; fine'; SELECT 2;";
        assert_eq!(texts(sql), vec!["SELECT 'it''s; fine'", "SELECT 2"]);
    }

    #[test]
    fn test_comments_removed() {
        let sql = "-- header; still comment\nCREATE /* x; y */ TABLE t (id INT); -- tail";
        assert_eq!(texts(sql), vec!["CREATE   TABLE t (id INT)"]);
    }

    #[test]
    fn test_comment_markers_inside_string_kept() {
        let sql = "CREATE TABLE t (note TEXT DEFAULT '-- not a comment');";
        assert_eq!(
            texts(sql),
            vec!["CREATE TABLE t (note TEXT DEFAULT '-- not a comment')"]
        );
    }

    #[test]
    fn test_parens_do_not_affect_split() {
        let sql = "CREATE TABLE t (id INT; CREATE TABLE u (id INT);";
        assert_eq!(
            texts(sql),
            vec!["CREATE TABLE t (id INT", "CREATE TABLE u (id INT)"]
        );
    }

    #[test]
    fn test_backslash_is_not_an_escape() {
        let sql = r"CREATE TABLE a (path TEXT DEFAULT 'C:\'); CREATE TABLE b (id INT);";
        assert_eq!(
            texts(sql),
            vec![
                r"CREATE TABLE a (path TEXT DEFAULT 'C:\')",
                "CREATE TABLE b (id INT)"
            ]
        );
    }

    #[test]
    fn test_unterminated_quote_swallows_rest() {
        let sql = "SELECT 'oops; CREATE TABLE t (id INT);";
        let stmts = texts(sql);
        assert_eq!(stmts.len(), 1);
        assert!(stmts[0].ends_with("(id INT);"));
    }

    #[test]
    fn test_empty_statements_dropped() {
        assert!(texts(" ;; \n ; -- nothing\n").is_empty());
    }

    #[test]
    fn test_statement_lines() {
        let sql = "-- intro\n\nCREATE TABLE a (id INT);\n/* multi\nline */\nCREATE TABLE b (\n id INT\n);";
        let stmts = split_statements(sql);
        assert_eq!(stmts.len(), 2);
        assert_eq!(stmts[0].line, 3);
        assert_eq!(stmts[1].line, 6);
        assert_eq!(stmts[1].index, 1);
    }
}
