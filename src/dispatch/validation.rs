//! Content-model validation
//!
//! A [`ContentTracker`] follows the children of one open element against the
//! element's containment rule, the same rule the grammar generator renders.

use crate::schema::{Cardinality, ContainmentRule};

/// Occurrence counts of the children of one open element
#[derive(Debug, Clone)]
pub struct ContentTracker<'r> {
    rule: Option<&'r ContainmentRule>,
    counts: Vec<usize>,
}

impl<'r> ContentTracker<'r> {
    /// Start tracking the content of an element
    pub fn new(rule: Option<&'r ContainmentRule>) -> Self {
        let counts = vec![0; rule.map_or(0, |r| r.children().len())];
        Self { rule, counts }
    }

    /// Record a child; `false` if the rule does not allow it here
    pub fn accept(&mut self, child: &str) -> bool {
        let Some(rule) = self.rule else {
            return false;
        };
        let Some(index) = rule.position(child) else {
            return false;
        };
        if rule.cardinality() == Cardinality::Single && self.counts[index] > 0 {
            return false;
        }
        self.counts[index] += 1;
        true
    }

    /// Description of the content still required, `None` when complete
    pub fn missing(&self) -> Option<String> {
        let rule = self.rule?;

        match rule.cardinality() {
            Cardinality::Single => {
                let missing: Vec<&str> = rule
                    .children()
                    .iter()
                    .zip(&self.counts)
                    .filter(|(child, count)| !child.optional && **count == 0)
                    .map(|(child, _)| child.name.as_str())
                    .collect();
                if missing.is_empty() {
                    None
                } else {
                    Some(missing.join(", "))
                }
            }
            Cardinality::OneOrMore if self.counts.iter().all(|c| *c == 0) => {
                let names: Vec<&str> = rule.children().iter().map(|c| c.name.as_str()).collect();
                Some(format!("one of {}", names.join(", ")))
            }
            Cardinality::OneOrMore | Cardinality::ZeroOrMore => None,
        }
    }
}
