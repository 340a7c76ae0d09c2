//! Parser for the query subset the generator emits and suppression files
//! use: unions of absolute paths, child and descendant steps, and
//! predicates over positions, `@text`, and relative-path existence.

use crate::XpathError;

/// A parsed query: one or more location paths joined by `|`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XpathQuery {
    pub paths: Vec<LocationPath>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationPath {
    pub absolute: bool,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub axis: Axis,
    pub test: NodeTest,
    pub predicates: Vec<Predicate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Child,
    Descendant,
    SelfNode,
    Parent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeTest {
    Name(String),
    Wildcard,
    /// Matches any node; used by the `.` and `..` steps.
    Node,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `[N]`, 1-based among the nodes the step selected per context node.
    Position(usize),
    /// `[@text='...']`, literal already undoubled.
    TextEquals(String),
    /// `[./a/b]` or `[../a]`: the relative path selects something.
    Path(LocationPath),
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
}

/// Parse a query string. Whitespace, including the newlines the suppression
/// delimiter inserts, separates tokens freely.
pub fn parse_query(input: &str) -> Result<XpathQuery, XpathError> {
    let tokens = lex(input)?;
    let mut parser = Parser {
        input,
        tokens,
        pos: 0,
    };
    let query = parser.parse_query()?;
    if parser.pos < parser.tokens.len() {
        return Err(parser.error("unexpected trailing tokens"));
    }
    Ok(query)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Slash,
    DoubleSlash,
    Pipe,
    LBracket,
    RBracket,
    At,
    Eq,
    Dot,
    DotDot,
    Star,
    Name(String),
    Integer(usize),
    Literal(String),
}

fn lex(input: &str) -> Result<Vec<(Token, usize)>, XpathError> {
    let mut tokens = Vec::new();
    let bytes = input.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        let start = i;
        match bytes[i] {
            b' ' | b'\t' | b'\n' | b'\r' => {
                i += 1;
            }
            b'/' => {
                if bytes.get(i + 1) == Some(&b'/') {
                    tokens.push((Token::DoubleSlash, start));
                    i += 2;
                } else {
                    tokens.push((Token::Slash, start));
                    i += 1;
                }
            }
            b'|' => {
                tokens.push((Token::Pipe, start));
                i += 1;
            }
            b'[' => {
                tokens.push((Token::LBracket, start));
                i += 1;
            }
            b']' => {
                tokens.push((Token::RBracket, start));
                i += 1;
            }
            b'@' => {
                tokens.push((Token::At, start));
                i += 1;
            }
            b'=' => {
                tokens.push((Token::Eq, start));
                i += 1;
            }
            b'*' => {
                tokens.push((Token::Star, start));
                i += 1;
            }
            b'.' => {
                if bytes.get(i + 1) == Some(&b'.') {
                    tokens.push((Token::DotDot, start));
                    i += 2;
                } else {
                    tokens.push((Token::Dot, start));
                    i += 1;
                }
            }
            b'\'' => {
                let (literal, next) = lex_literal(input, i)?;
                tokens.push((Token::Literal(literal), start));
                i = next;
            }
            b'0'..=b'9' => {
                let mut end = i;
                while end < bytes.len() && bytes[end].is_ascii_digit() {
                    end += 1;
                }
                let value: usize = input[i..end].parse().map_err(|_| XpathError::Query {
                    query: input.to_string(),
                    message: "integer out of range".to_string(),
                    offset: start,
                })?;
                tokens.push((Token::Integer(value), start));
                i = end;
            }
            b'A'..=b'Z' | b'a'..=b'z' | b'_' => {
                let mut end = i;
                while end < bytes.len()
                    && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_')
                {
                    end += 1;
                }
                tokens.push((Token::Name(input[i..end].to_string()), start));
                i = end;
            }
            other => {
                return Err(XpathError::Query {
                    query: input.to_string(),
                    message: format!("unexpected character {:?}", other as char),
                    offset: start,
                });
            }
        }
    }

    Ok(tokens)
}

/// Scan a single-quoted literal starting at `start`. A doubled quote inside
/// stands for one quote.
fn lex_literal(input: &str, start: usize) -> Result<(String, usize), XpathError> {
    let bytes = input.as_bytes();
    let mut value = String::new();
    let mut i = start + 1;

    while i < bytes.len() {
        if bytes[i] == b'\'' {
            if bytes.get(i + 1) == Some(&b'\'') {
                value.push('\'');
                i += 2;
            } else {
                return Ok((value, i + 1));
            }
        } else {
            // keep multi-byte characters intact
            let ch_len = match bytes[i] {
                b if b < 0x80 => 1,
                b if b >= 0xF0 => 4,
                b if b >= 0xE0 => 3,
                _ => 2,
            };
            value.push_str(&input[i..i + ch_len]);
            i += ch_len;
        }
    }

    Err(XpathError::Query {
        query: input.to_string(),
        message: "unterminated string literal".to_string(),
        offset: start,
    })
}

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<(Token, usize)>,
    pos: usize,
}

impl Parser<'_> {
    fn parse_query(&mut self) -> Result<XpathQuery, XpathError> {
        let mut paths = vec![self.parse_path()?];
        while self.eat(&Token::Pipe) {
            paths.push(self.parse_path()?);
        }
        Ok(XpathQuery { paths })
    }

    fn parse_path(&mut self) -> Result<LocationPath, XpathError> {
        let (absolute, first_axis) = if self.eat(&Token::DoubleSlash) {
            (true, Axis::Descendant)
        } else if self.eat(&Token::Slash) {
            (true, Axis::Child)
        } else {
            (false, Axis::Child)
        };

        let steps = self.parse_steps(first_axis)?;
        Ok(LocationPath { absolute, steps })
    }

    fn parse_steps(&mut self, first_axis: Axis) -> Result<Vec<Step>, XpathError> {
        let mut steps = vec![self.parse_step(first_axis)?];
        loop {
            if self.eat(&Token::DoubleSlash) {
                steps.push(self.parse_step(Axis::Descendant)?);
            } else if self.eat(&Token::Slash) {
                steps.push(self.parse_step(Axis::Child)?);
            } else {
                break;
            }
        }
        Ok(steps)
    }

    fn parse_step(&mut self, axis: Axis) -> Result<Step, XpathError> {
        match self.next() {
            Some(Token::Dot) => Ok(Step {
                axis: Axis::SelfNode,
                test: NodeTest::Node,
                predicates: Vec::new(),
            }),
            Some(Token::DotDot) => Ok(Step {
                axis: Axis::Parent,
                test: NodeTest::Node,
                predicates: Vec::new(),
            }),
            Some(Token::Star) => {
                let predicates = self.parse_predicates()?;
                Ok(Step {
                    axis,
                    test: NodeTest::Wildcard,
                    predicates,
                })
            }
            Some(Token::Name(name)) => {
                let predicates = self.parse_predicates()?;
                Ok(Step {
                    axis,
                    test: NodeTest::Name(name),
                    predicates,
                })
            }
            _ => Err(self.error_at_prev("expected a step")),
        }
    }

    fn parse_predicates(&mut self) -> Result<Vec<Predicate>, XpathError> {
        let mut predicates = Vec::new();
        while self.eat(&Token::LBracket) {
            let predicate = self.parse_or()?;
            if !self.eat(&Token::RBracket) {
                return Err(self.error("expected ']'"));
            }
            predicates.push(predicate);
        }
        Ok(predicates)
    }

    fn parse_or(&mut self) -> Result<Predicate, XpathError> {
        let mut left = self.parse_and()?;
        while self.eat_keyword("or") {
            let right = self.parse_and()?;
            left = Predicate::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Predicate, XpathError> {
        let mut left = self.parse_term()?;
        while self.eat_keyword("and") {
            let right = self.parse_term()?;
            left = Predicate::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Predicate, XpathError> {
        match self.peek() {
            Some(Token::Integer(value)) => {
                let value = *value;
                self.pos += 1;
                Ok(Predicate::Position(value))
            }
            Some(Token::At) => {
                self.pos += 1;
                let Some(Token::Name(attribute)) = self.next() else {
                    return Err(self.error_at_prev("expected an attribute name after '@'"));
                };
                if attribute != "text" {
                    return Err(self.error_at_prev("only the @text attribute is supported"));
                }
                if !self.eat(&Token::Eq) {
                    return Err(self.error("expected '=' after @text"));
                }
                let Some(Token::Literal(value)) = self.next() else {
                    return Err(self.error_at_prev("expected a quoted literal"));
                };
                Ok(Predicate::TextEquals(value))
            }
            Some(Token::Dot | Token::DotDot | Token::Name(_) | Token::Star) => {
                let steps = self.parse_steps(Axis::Child)?;
                Ok(Predicate::Path(LocationPath {
                    absolute: false,
                    steps,
                }))
            }
            _ => Err(self.error("expected a predicate")),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(token, _)| token.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if let Some(Token::Name(name)) = self.peek()
            && name == keyword
        {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map_or(self.input.len(), |(_, offset)| *offset)
    }

    fn error(&self, message: &str) -> XpathError {
        XpathError::Query {
            query: self.input.to_string(),
            message: message.to_string(),
            offset: self.offset(),
        }
    }

    fn error_at_prev(&self, message: &str) -> XpathError {
        let offset = self
            .tokens
            .get(self.pos.saturating_sub(1))
            .map_or(self.input.len(), |(_, offset)| *offset);
        XpathError::Query {
            query: self.input.to_string(),
            message: message.to_string(),
            offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_absolute_path() {
        let query = parse_query("/program/class_declaration/class_body").unwrap();
        assert_eq!(query.paths.len(), 1);
        let path = &query.paths[0];
        assert!(path.absolute);
        assert_eq!(path.steps.len(), 3);
        assert_eq!(path.steps[0].test, NodeTest::Name("program".to_string()));
        assert_eq!(path.steps[0].axis, Axis::Child);
    }

    #[test]
    fn parses_union_with_suppression_delimiter() {
        let query = parse_query("/program/a | \n/program/b").unwrap();
        assert_eq!(query.paths.len(), 2);
    }

    #[test]
    fn parses_descendant_axis() {
        let query = parse_query("//identifier").unwrap();
        assert_eq!(query.paths[0].steps[0].axis, Axis::Descendant);

        let query = parse_query("/program//RCURLY").unwrap();
        assert_eq!(query.paths[0].steps[1].axis, Axis::Descendant);
    }

    #[test]
    fn parses_text_predicate_and_undoubles_quotes() {
        let query = parse_query("//character_literal[@text='''&''']").unwrap();
        let step = &query.paths[0].steps[0];
        assert_eq!(step.predicates, vec![Predicate::TextEquals("'&'".to_string())]);
    }

    #[test]
    fn parses_positional_predicate() {
        let query = parse_query("/program/a/block[2]").unwrap();
        assert_eq!(
            query.paths[0].steps[2].predicates,
            vec![Predicate::Position(2)]
        );
    }

    #[test]
    fn parses_relative_path_predicate() {
        let query = parse_query("/program/class_declaration[./identifier[@text='Simple']]")
            .unwrap();
        let Predicate::Path(path) = &query.paths[0].steps[1].predicates[0] else {
            panic!("expected a path predicate");
        };
        assert!(!path.absolute);
        assert_eq!(path.steps[0].axis, Axis::SelfNode);
        assert_eq!(path.steps[1].test, NodeTest::Name("identifier".to_string()));
    }

    #[test]
    fn parses_and_of_parent_paths() {
        let query = parse_query(
            "//variable_declarator[./identifier[@text='pi'] and \
             ../../identifier[@text='countTokens']]",
        )
        .unwrap();
        let Predicate::And(left, right) = &query.paths[0].steps[0].predicates[0] else {
            panic!("expected an and predicate");
        };
        assert!(matches!(**left, Predicate::Path(_)));
        let Predicate::Path(path) = &**right else {
            panic!("expected a path predicate");
        };
        assert_eq!(path.steps[0].axis, Axis::Parent);
        assert_eq!(path.steps[1].axis, Axis::Parent);
    }

    #[test]
    fn rejects_unterminated_literal() {
        let err = parse_query("//a[@text='oops]").unwrap_err();
        assert!(err.to_string().contains("unterminated"));
    }

    #[test]
    fn rejects_unknown_attribute() {
        let err = parse_query("//a[@line='3']").unwrap_err();
        assert!(err.to_string().contains("@text"));
    }

    #[test]
    fn rejects_trailing_tokens() {
        assert!(parse_query("/program/a]").is_err());
    }

    #[test]
    fn rejects_empty_query() {
        assert!(parse_query("").is_err());
        assert!(parse_query("   ").is_err());
    }
}
