//! DTD generation
//!
//! The grammar of a document type is rendered from its [`SchemaRegistry`]
//! alone. Re-run [`generate`] whenever the schema changes and publish the
//! result, or use [`check`] to verify that a published DTD is still current.
//!
//! For every element, in registry order, the output holds an `ELEMENT`
//! declaration, an `ATTLIST` declaration and a blank line:
//!
//! ```text
//! <!ELEMENT Lights (DirectionalLight|PointLight|SpotLight)+>
//! <!ATTLIST Lights>
//!
//! <!ELEMENT PointLight EMPTY>
//! <!ATTLIST PointLight
//!     position                    CDATA           #REQUIRED
//!     intensity                   CDATA           "1"
//!     ...
//! >
//! ```

use std::fmt;

use quick_xml::escape::escape;

use crate::error::GrammarError;
use crate::schema::{AttributeSpec, AttributeUse, ContainmentRule, ElementSchema, SchemaRegistry};

/// Width of a tab stop assumed when aligning attribute columns
const TAB_WIDTH: usize = 4;

/// Tab stops reserved for the attribute name column
const NAME_COLUMN: usize = 7;

/// Tab stops reserved for the attribute type column
const TYPE_COLUMN: usize = 4;

/// A rendered grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarDocument {
    text: String,
}

impl GrammarDocument {
    /// Get the grammar text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consume the document, returning its text
    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for GrammarDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Render the grammar of a registry
pub fn generate(registry: &SchemaRegistry) -> GrammarDocument {
    let mut text = String::new();

    for element in registry.elements() {
        element_declaration(&mut text, element);
        attribute_list(&mut text, element);
        text.push('\n');
    }

    GrammarDocument { text }
}

/// Compare a published grammar with the grammar of a registry
///
/// Line endings are normalized; any other difference is reported at the
/// first line where the two disagree.
pub fn check(registry: &SchemaRegistry, published: &str) -> Result<(), GrammarError> {
    let generated = generate(registry);
    let mut expected = generated.as_str().lines();
    let mut found = published.lines();
    let mut line = 0;

    loop {
        line += 1;
        match (expected.next(), found.next()) {
            (None, None) => return Ok(()),
            (Some(e), Some(f)) if e == f => continue,
            (e, f) => {
                tracing::debug!(line, "published grammar is out of date");
                return Err(GrammarError::Drift {
                    line,
                    expected: e.unwrap_or("<end of grammar>").to_string(),
                    found: f.unwrap_or("<end of grammar>").to_string(),
                });
            }
        }
    }
}

/// Content model of an element: `EMPTY`, `(A,B?)`, `(A|B)*` or `(A|B)+`
pub fn content_model(rule: Option<&ContainmentRule>) -> String {
    match rule {
        None => "EMPTY".to_string(),
        Some(rule) => {
            let cardinality = rule.cardinality();
            let children: Vec<String> = rule.children().iter().map(|c| c.to_string()).collect();
            format!(
                "({}){}",
                children.join(cardinality.separator()),
                cardinality.indicator()
            )
        }
    }
}

/// Attribute type: `ID` for the identity attribute, `IDREF` for references,
/// `CDATA` otherwise
pub fn attribute_type(spec: &AttributeSpec) -> &'static str {
    if spec.is_identity() {
        "ID"
    } else if spec.is_reference() {
        "IDREF"
    } else {
        "CDATA"
    }
}

/// Default declaration: `#REQUIRED`, a quoted default, or `#IMPLIED`
pub fn value_spec(spec: &AttributeSpec) -> String {
    match spec.usage() {
        AttributeUse::Required => "#REQUIRED".to_string(),
        AttributeUse::Default(text) => format!("\"{}\"", escape(text.as_str())),
        AttributeUse::Nullable => "#IMPLIED".to_string(),
    }
}

fn element_declaration(out: &mut String, element: &ElementSchema) {
    out.push_str(&format!(
        "<!ELEMENT {} {}>\n",
        element.name(),
        content_model(element.containment())
    ));
}

fn attribute_list(out: &mut String, element: &ElementSchema) {
    if element.attributes().is_empty() {
        out.push_str(&format!("<!ATTLIST {}>\n", element.name()));
        return;
    }

    out.push_str(&format!("<!ATTLIST {}\n", element.name()));
    for spec in element.attributes() {
        let kind = attribute_type(spec);
        out.push('\t');
        out.push_str(spec.name());
        out.push_str(&padding(spec.name(), NAME_COLUMN));
        out.push_str(kind);
        out.push_str(&padding(kind, TYPE_COLUMN));
        out.push_str(&value_spec(spec));
        out.push('\n');
    }
    out.push_str(">\n");
}

/// Tabs that move past `word` to the next column; always at least one
fn padding(word: &str, column: usize) -> String {
    let tabs = column.saturating_sub(word.len() / TAB_WIDTH).max(1);
    "\t".repeat(tabs)
}
