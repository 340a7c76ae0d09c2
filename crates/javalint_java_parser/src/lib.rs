//! Java parser for javalint, built on tree-sitter-java.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::OnceLock;

use thiserror::Error;

/// Result of parsing a Java source file.
pub struct ParseResult {
    pub tree: tree_sitter::Tree,
    pub source: Arc<str>,
}

/// Error returned when tree-sitter produces no tree.
#[derive(Debug, Error)]
#[error("tree-sitter produced no tree for {0} bytes of Java source")]
pub struct ParseError(pub usize);

/// Java parser wrapping tree-sitter.
pub struct JavaParser {
    parser: tree_sitter::Parser,
}

/// Return the tree-sitter Java language.
pub fn java_language() -> tree_sitter::Language {
    tree_sitter_java::LANGUAGE.into()
}

/// Return a map from node kind string to one or more kind IDs.
pub fn java_kind_id_map() -> &'static HashMap<&'static str, Vec<u16>> {
    static KIND_ID_MAP: OnceLock<HashMap<&'static str, Vec<u16>>> = OnceLock::new();

    KIND_ID_MAP.get_or_init(|| {
        let language = java_language();
        let mut map: HashMap<&'static str, Vec<u16>> = HashMap::new();
        let kind_count = language.node_kind_count();

        for id in 0..kind_count {
            let id = id as u16;
            if let Some(kind) = language.node_kind_for_id(id) {
                map.entry(kind).or_default().push(id);
            }
        }

        map
    })
}

impl JavaParser {
    /// Create a new Java parser.
    pub fn new() -> Self {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&java_language())
            .expect("Failed to load Java grammar");
        Self { parser }
    }

    /// Parse Java source code into a syntax tree.
    pub fn parse(&mut self, source: &str) -> Result<ParseResult, ParseError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or(ParseError(source.len()))?;
        Ok(ParseResult {
            tree,
            source: source.into(),
        })
    }
}

impl Default for JavaParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_class() {
        let mut parser = JavaParser::new();
        let source = r#"
public class Hello {
    public static void main(String[] args) {
        System.out.println("Hello, World!");
    }
}
"#;
        let result = parser.parse(source).expect("Failed to parse");
        assert_eq!(result.tree.root_node().kind(), "program");
    }

    #[test]
    fn test_parse_record() {
        let mut parser = JavaParser::new();
        let source = "public record Point(int x, int y) {}";
        let result = parser.parse(source).expect("Failed to parse");
        assert_eq!(result.tree.root_node().kind(), "program");
    }

    #[test]
    fn test_kind_id_map_has_common_kinds() {
        let map = java_kind_id_map();
        assert!(map.contains_key("class_declaration"));
        assert!(map.contains_key("identifier"));
        assert!(map.contains_key("{"));
    }
}
