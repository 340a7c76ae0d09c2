//! Reader and writer for xpath suppression files.
//!
//! ```xml
//! <?xml version="1.0"?>
//! <!DOCTYPE suppressions PUBLIC
//!     "-//Checkstyle//DTD SuppressionXpathFilter Experimental Configuration 1.2//EN"
//!     "https://checkstyle.org/dtds/suppressions_1_2_xpath_experimental.dtd">
//! <suppressions>
//!    <suppress-xpath
//!        checks="MethodParamPad"
//!        query="/program/class_declaration/..."/>
//! </suppressions>
//! ```

use quick_xml::de::from_str;
use serde::Deserialize;
use std::path::Path;

use crate::CheckstyleError;

/// Joins the queries of one suppression entry.
pub const XPATH_QUERY_DELIMITER: &str = " | \n";

/// One `suppress-xpath` element, attributes XML-decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct SuppressXpath {
    #[serde(default, rename = "@files")]
    pub files: Option<String>,
    #[serde(default, rename = "@checks")]
    pub checks: Option<String>,
    #[serde(default, rename = "@message")]
    pub message: Option<String>,
    #[serde(default, rename = "@id")]
    pub id: Option<String>,
    #[serde(default, rename = "@query")]
    pub query: Option<String>,
}

/// Parsed suppressions file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename = "suppressions")]
pub struct Suppressions {
    #[serde(default, rename = "suppress-xpath")]
    pub elements: Vec<SuppressXpath>,
}

impl Suppressions {
    /// Parse a suppressions file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CheckstyleError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse suppressions XML content. Every element must carry at least one
    /// of the checks, id, or message attributes.
    pub fn parse(content: &str) -> Result<Self, CheckstyleError> {
        let suppressions: Suppressions = from_str(content)?;
        for element in &suppressions.elements {
            if element.checks.is_none() && element.id.is_none() && element.message.is_none() {
                return Err(CheckstyleError::InvalidSuppression);
            }
        }
        Ok(suppressions)
    }
}

/// A suppression to be written as one `suppress-xpath` element.
#[derive(Debug, Clone)]
pub struct SuppressionEntry {
    pub files: Option<String>,
    pub checks: String,
    pub queries: Vec<String>,
}

/// Render a suppressions file. Queries must already carry the generator's
/// entity encoding; attribute values are written as-is.
pub fn render_xpath_suppressions(entries: &[SuppressionEntry]) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\"?>\n");
    out.push_str("<!DOCTYPE suppressions PUBLIC\n");
    out.push_str("    \"-//Checkstyle//DTD SuppressionXpathFilter ");
    out.push_str("Experimental Configuration 1.2//EN\"\n");
    out.push_str("    \"https://checkstyle.org/dtds/");
    out.push_str("suppressions_1_2_xpath_experimental.dtd\">\n");
    out.push_str("<suppressions>\n");
    for entry in entries {
        out.push_str("   <suppress-xpath\n");
        if let Some(files) = &entry.files {
            out.push_str("       files=\"");
            out.push_str(files);
            out.push_str("\"\n");
        }
        out.push_str("       checks=\"");
        out.push_str(&entry.checks);
        out.push_str("\"\n");
        out.push_str("       query=\"");
        out.push_str(&entry.queries.join(XPATH_QUERY_DELIMITER));
        out.push_str("\"/>\n");
    }
    out.push_str("</suppressions>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_suppressions() {
        let xml = r#"<?xml version="1.0"?>
<!DOCTYPE suppressions PUBLIC
    "-//Checkstyle//DTD SuppressionXpathFilter Experimental Configuration 1.2//EN"
    "https://checkstyle.org/dtds/suppressions_1_2_xpath_experimental.dtd">
<suppressions>
   <suppress-xpath
       checks="UpperEll"
       query="//decimal_integer_literal[@text='508l']"/>
</suppressions>"#;

        let suppressions = Suppressions::parse(xml).unwrap();
        assert_eq!(suppressions.elements.len(), 1);
        let element = &suppressions.elements[0];
        assert_eq!(element.checks.as_deref(), Some("UpperEll"));
        assert_eq!(
            element.query.as_deref(),
            Some("//decimal_integer_literal[@text='508l']")
        );
        assert!(element.files.is_none());
        assert!(element.id.is_none());
    }

    #[test]
    fn test_parse_decodes_entities() {
        let xml = r#"<?xml version="1.0"?>
<suppressions>
   <suppress-xpath
       checks="ArrayTypeStyle"
       query="//character_literal[@text='&apos;&apos;&amp;&apos;&apos;']"/>
</suppressions>"#;

        let suppressions = Suppressions::parse(xml).unwrap();
        assert_eq!(
            suppressions.elements[0].query.as_deref(),
            Some("//character_literal[@text='''&''']")
        );
    }

    #[test]
    fn test_element_without_selectors_is_rejected() {
        let xml = r#"<suppressions>
   <suppress-xpath query="//identifier"/>
</suppressions>"#;

        assert!(matches!(
            Suppressions::parse(xml),
            Err(CheckstyleError::InvalidSuppression)
        ));
    }

    #[test]
    fn test_render_matches_expected_layout() {
        let entries = [SuppressionEntry {
            files: None,
            checks: "MethodParamPad".to_string(),
            queries: vec![
                "/program/a".to_string(),
                "/program/b".to_string(),
            ],
        }];

        let expected = "<?xml version=\"1.0\"?>\n\
            <!DOCTYPE suppressions PUBLIC\n\
            \x20   \"-//Checkstyle//DTD SuppressionXpathFilter \
            Experimental Configuration 1.2//EN\"\n\
            \x20   \"https://checkstyle.org/dtds/suppressions_1_2_xpath_experimental.dtd\">\n\
            <suppressions>\n\
            \x20  <suppress-xpath\n\
            \x20      checks=\"MethodParamPad\"\n\
            \x20      query=\"/program/a | \n/program/b\"/>\n\
            </suppressions>";

        assert_eq!(render_xpath_suppressions(&entries), expected);
    }

    #[test]
    fn test_render_and_parse_roundtrip() {
        let entries = [SuppressionEntry {
            files: Some("InputSimple\\.java".to_string()),
            checks: "LeftCurly".to_string(),
            queries: vec![
                "/program/class_declaration/class_body/LCURLY".to_string(),
                "//identifier[@text='x']".to_string(),
            ],
        }];

        let rendered = render_xpath_suppressions(&entries);
        let parsed = Suppressions::parse(&rendered).unwrap();
        assert_eq!(parsed.elements.len(), 1);
        let element = &parsed.elements[0];
        assert_eq!(element.files.as_deref(), Some("InputSimple\\.java"));
        assert_eq!(element.checks.as_deref(), Some("LeftCurly"));
        let query = element.query.as_deref().unwrap();
        assert!(query.contains("/program/class_declaration/class_body/LCURLY"));
        assert!(query.contains("//identifier[@text='x']"));
        assert!(query.contains(" | "));
    }
}
