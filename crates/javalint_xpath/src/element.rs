//! The element projection of the Java CST that queries address.
//!
//! Named tree-sitter nodes become elements named by their kind. Anonymous
//! tokens become elements with Checkstyle-flavored names. Comments are not
//! elements. Nodes that carry a `@text` attribute are leaves: their internal
//! structure (string quotes, fragments, escapes) is not addressable.

use std::borrow::Cow;

use javalint_java_cst::CstNode;

/// Kinds whose element carries the `@text` attribute. These are leaves of
/// the element tree.
const TEXT_ATTRIBUTE_KINDS: &[&str] = &[
    "identifier",
    "type_identifier",
    "string_literal",
    "character_literal",
    "decimal_integer_literal",
    "hex_integer_literal",
    "octal_integer_literal",
    "binary_integer_literal",
    "decimal_floating_point_literal",
    "hex_floating_point_literal",
];

/// Whether elements of this kind expose `@text`.
pub fn supports_text_attribute(kind: &str) -> bool {
    TEXT_ATTRIBUTE_KINDS.contains(&kind)
}

/// The raw `@text` value of a node, or `None` if its kind has no text
/// attribute. String literals lose their surrounding quotes; character
/// literals keep theirs; escape sequences stay as written in the source.
pub fn text_attribute_value(node: &CstNode) -> Option<String> {
    let kind = node.kind();
    if !supports_text_attribute(kind) {
        return None;
    }
    let text = node.text();
    if kind == "string_literal" {
        let stripped = text
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .unwrap_or(text);
        Some(stripped.to_string())
    } else {
        Some(text.to_string())
    }
}

/// Encode a `@text` value for embedding in a generated query. Apostrophes
/// double so the value survives a single-quoted XPath string literal once
/// the XML layer has unescaped the entities.
pub fn encode_text(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => encoded.push_str("&amp;"),
            '<' => encoded.push_str("&lt;"),
            '>' => encoded.push_str("&gt;"),
            '"' => encoded.push_str("&quot;"),
            '\'' => encoded.push_str("&apos;&apos;"),
            _ => encoded.push(ch),
        }
    }
    encoded
}

/// The element name of a node, or `None` if the node is not part of the
/// element tree (comments).
pub fn element_name(node: &CstNode) -> Option<Cow<'static, str>> {
    let kind = node.kind();
    if node.is_named() {
        match kind {
            "line_comment" | "block_comment" => None,
            _ => Some(Cow::Borrowed(kind)),
        }
    } else {
        token_element_name(kind)
    }
}

/// Children of a node that are themselves elements. Text-attribute kinds
/// are atomic and have none.
pub fn element_children<'a>(node: &CstNode<'a>) -> Vec<CstNode<'a>> {
    if supports_text_attribute(node.kind()) {
        return Vec::new();
    }
    node.children()
        .filter(|child| element_name(child).is_some())
        .collect()
}

/// Names for anonymous tokens. Keywords uppercase; punctuation and
/// operators follow Checkstyle's token vocabulary.
fn token_element_name(kind: &str) -> Option<Cow<'static, str>> {
    let name = match kind {
        "(" => "LPAREN",
        ")" => "RPAREN",
        "{" => "LCURLY",
        "}" => "RCURLY",
        "[" => "LBRACK",
        "]" => "RBRACK",
        ";" => "SEMI",
        "," => "COMMA",
        "." => "DOT",
        "@" => "AT",
        "?" => "QUESTION",
        ":" => "COLON",
        "::" => "METHOD_REF",
        "..." => "ELLIPSIS",
        "->" => "LAMBDA_ARROW",
        "=" => "ASSIGN",
        "==" => "EQUAL",
        "!=" => "NOT_EQUAL",
        "<" => "LT",
        ">" => "GT",
        "<=" => "LE",
        ">=" => "GE",
        "!" => "LNOT",
        "~" => "BNOT",
        "+" => "PLUS",
        "-" => "MINUS",
        "*" => "STAR",
        "/" => "DIV",
        "%" => "MOD",
        "++" => "INC",
        "--" => "DEC",
        "&&" => "LAND",
        "||" => "LOR",
        "&" => "BAND",
        "|" => "BOR",
        "^" => "BXOR",
        "<<" => "SL",
        ">>" => "SR",
        ">>>" => "BSR",
        "+=" => "PLUS_ASSIGN",
        "-=" => "MINUS_ASSIGN",
        "*=" => "STAR_ASSIGN",
        "/=" => "DIV_ASSIGN",
        "%=" => "MOD_ASSIGN",
        "&=" => "BAND_ASSIGN",
        "|=" => "BOR_ASSIGN",
        "^=" => "BXOR_ASSIGN",
        "<<=" => "SL_ASSIGN",
        ">>=" => "SR_ASSIGN",
        ">>>=" => "BSR_ASSIGN",
        "@interface" => "AT_INTERFACE",
        _ => {
            if kind.chars().all(|c| c.is_ascii_alphabetic() || c == '_') {
                return Some(Cow::Owned(kind.to_ascii_uppercase()));
            }
            return None;
        }
    };
    Some(Cow::Borrowed(name))
}
