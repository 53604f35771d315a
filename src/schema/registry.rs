//! Schema registry
//!
//! The registry is the validated, immutable form of a [`SchemaDef`]. It is
//! built once and then shared by every parse and by the grammar generator.

use std::collections::HashSet;
use std::path::Path;

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use super::attributes::{AttributeSpec, AttributeUse};
use super::containment::{ChildRef, ContainmentRule};
use super::definitions::{ElementDef, SchemaDef, TypeDef};
use super::elements::ElementSchema;
use crate::error::{Result, SchemaError};
use crate::names::validate_name;
use crate::values::coerce;

/// Declarative source of the SDL scene schema
pub const SDL_SCHEMA: &str = include_str!("../../schemas/sdl.json");

static SDL: Lazy<SchemaRegistry> =
    Lazy::new(|| SchemaRegistry::from_json(SDL_SCHEMA).expect("built-in SDL schema is valid"));

/// Immutable table of element declarations, in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaRegistry {
    elements: IndexMap<String, ElementSchema>,
}

impl SchemaRegistry {
    /// Build a registry from element definitions
    ///
    /// Every definition is checked before the registry exists: names must be
    /// valid and unique, attribute-name and type lists must have the same
    /// length, tuple arities must be positive, defaults must coerce, and
    /// containment rules must be non-empty and name declared elements only.
    pub fn build<I>(definitions: I) -> std::result::Result<Self, SchemaError>
    where
        I: IntoIterator<Item = ElementDef>,
    {
        let mut elements = IndexMap::new();

        for def in definitions {
            let element = build_element(def)?;
            if elements.contains_key(element.name()) {
                return Err(SchemaError::DuplicateElement {
                    element: element.name().to_string(),
                });
            }
            elements.insert(element.name().to_string(), element);
        }

        for element in elements.values() {
            if let Some(rule) = element.containment() {
                if rule.children().is_empty() {
                    return Err(SchemaError::EmptyContainment {
                        element: element.name().to_string(),
                    });
                }
                if let Some(child) = rule.children().iter().find(|c| !elements.contains_key(&c.name)) {
                    return Err(SchemaError::UndeclaredChild {
                        element: element.name().to_string(),
                        child: child.name.clone(),
                    });
                }
            }
        }

        tracing::debug!(elements = elements.len(), "schema registry built");
        Ok(Self { elements })
    }

    /// Build a registry from a JSON [`SchemaDef`]
    pub fn from_json(json: &str) -> Result<Self> {
        let def: SchemaDef = serde_json::from_str(json)?;
        Ok(Self::build(def.elements)?)
    }

    /// Build a registry from a JSON schema file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading schema");
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The built-in SDL scene schema
    pub fn sdl() -> &'static SchemaRegistry {
        &SDL
    }

    /// Look up an element by name
    pub fn lookup(&self, name: &str) -> Option<&ElementSchema> {
        self.elements.get(name)
    }

    /// Look up an element by name, failing if it is not declared
    pub fn get(&self, name: &str) -> std::result::Result<&ElementSchema, SchemaError> {
        self.lookup(name).ok_or_else(|| SchemaError::NotFound {
            element: name.to_string(),
        })
    }

    /// Check if an element is declared
    pub fn contains(&self, name: &str) -> bool {
        self.elements.contains_key(name)
    }

    /// Iterate over the elements in declaration order
    pub fn elements(&self) -> impl Iterator<Item = &ElementSchema> {
        self.elements.values()
    }

    /// Number of declared elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the registry declares no element
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Convert back to the declarative form
    pub fn to_definition(&self) -> SchemaDef {
        SchemaDef {
            elements: self.elements().map(element_def).collect(),
        }
    }

    /// Render the declarative form as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_definition())?)
    }
}

fn build_element(def: ElementDef) -> std::result::Result<ElementSchema, SchemaError> {
    validate_name(&def.name)?;

    if def.attributes.len() != def.types.len() {
        return Err(SchemaError::ArityMismatch {
            element: def.name,
            names: def.attributes.len(),
            types: def.types.len(),
        });
    }

    let mut seen = HashSet::new();
    let mut attributes = Vec::with_capacity(def.attributes.len());

    for (name, type_def) in def.attributes.into_iter().zip(def.types) {
        validate_name(&name)?;
        if !seen.insert(name.clone()) {
            return Err(SchemaError::DuplicateAttribute {
                element: def.name,
                attribute: name,
            });
        }
        attributes.push(build_attribute(&def.name, name, type_def)?);
    }

    let containment = match def.contains {
        Some(contains) => {
            let children: Vec<ChildRef> = contains.children.iter().map(|c| ChildRef::parse(c)).collect();
            for child in &children {
                validate_name(&child.name)?;
            }
            Some(ContainmentRule::new(children, contains.many))
        }
        None => None,
    };

    Ok(ElementSchema::new(def.name, attributes, containment))
}

fn build_attribute(
    element: &str,
    name: String,
    type_def: TypeDef,
) -> std::result::Result<AttributeSpec, SchemaError> {
    if type_def.kind.tuple_arity() == Some(0) {
        return Err(SchemaError::InvalidKind {
            element: element.to_string(),
            attribute: name,
            reason: "tuples need at least one component".to_string(),
        });
    }

    let usage = match type_def.default {
        Some(text) => {
            if let Err(source) = coerce(&text, type_def.kind) {
                return Err(SchemaError::InvalidDefault {
                    element: element.to_string(),
                    attribute: name,
                    source,
                });
            }
            AttributeUse::Default(text)
        }
        None if type_def.optional => AttributeUse::Nullable,
        None => AttributeUse::Required,
    };

    Ok(AttributeSpec::new(name, type_def.kind, usage))
}

fn element_def(element: &ElementSchema) -> ElementDef {
    let mut def = ElementDef::new(element.name());

    for spec in element.attributes() {
        let type_def = match spec.usage() {
            AttributeUse::Required => TypeDef::required(spec.kind()),
            AttributeUse::Default(text) => TypeDef::with_default(spec.kind(), text.clone()),
            AttributeUse::Nullable => TypeDef::optional(spec.kind()),
        };
        def = def.attribute(spec.name(), type_def);
    }

    if let Some(rule) = element.containment() {
        def = def.contains(rule.children().iter().map(|c| c.to_string()), rule.cardinality());
    }

    def
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Cardinality;
    use crate::values::{ItemKind, ValueKind};

    fn root_and_child() -> Vec<ElementDef> {
        vec![
            ElementDef::new("Root")
                .attribute("a", TypeDef::required(ValueKind::Boolean))
                .contains(["Child"], Cardinality::Single),
            ElementDef::new("Child").attribute("x", TypeDef::required(ValueKind::Tuple(3))),
        ]
    }

    #[test]
    fn test_build_and_lookup() {
        let registry = SchemaRegistry::build(root_and_child()).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("Root"));
        assert_eq!(registry.lookup("Child").unwrap().attributes().len(), 1);
        assert!(registry.lookup("Missing").is_none());
        assert_eq!(
            registry.get("Missing"),
            Err(SchemaError::NotFound {
                element: "Missing".to_string()
            })
        );
    }

    #[test]
    fn test_registry_order_is_declaration_order() {
        let registry = SchemaRegistry::build(root_and_child()).unwrap();
        let names: Vec<&str> = registry.elements().map(|e| e.name()).collect();
        assert_eq!(names, vec!["Root", "Child"]);
    }

    #[test]
    fn test_rejects_arity_mismatch() {
        let mut def = ElementDef::new("Camera").attribute("fovy", TypeDef::required(ValueKind::Number));
        def.attributes.push("name".to_string());

        assert_eq!(
            SchemaRegistry::build([def]),
            Err(SchemaError::ArityMismatch {
                element: "Camera".to_string(),
                names: 2,
                types: 1
            })
        );
    }

    #[test]
    fn test_rejects_undeclared_child() {
        let defs = vec![ElementDef::new("Lights").contains(["PointLight"], Cardinality::OneOrMore)];
        assert_eq!(
            SchemaRegistry::build(defs),
            Err(SchemaError::UndeclaredChild {
                element: "Lights".to_string(),
                child: "PointLight".to_string()
            })
        );
    }

    #[test]
    fn test_optional_marker_is_not_part_of_the_name() {
        let defs = vec![
            ElementDef::new("Sdl").contains(["Textures?"], Cardinality::Single),
            ElementDef::new("Textures"),
        ];
        let registry = SchemaRegistry::build(defs).unwrap();
        let rule = registry.lookup("Sdl").unwrap().containment().unwrap();
        assert_eq!(rule.children()[0].name, "Textures");
        assert!(rule.children()[0].optional);
    }

    #[test]
    fn test_rejects_duplicates() {
        let defs = vec![ElementDef::new("Sphere"), ElementDef::new("Sphere")];
        assert!(matches!(
            SchemaRegistry::build(defs),
            Err(SchemaError::DuplicateElement { .. })
        ));

        let def = ElementDef::new("Sphere")
            .attribute("radius", TypeDef::required(ValueKind::Number))
            .attribute("radius", TypeDef::required(ValueKind::Number));
        assert!(matches!(
            SchemaRegistry::build([def]),
            Err(SchemaError::DuplicateAttribute { .. })
        ));
    }

    #[test]
    fn test_rejects_invalid_default() {
        let def = ElementDef::new("PointLight")
            .attribute("color", TypeDef::with_default(ValueKind::Tuple(3), "1 1"));
        let err = SchemaRegistry::build([def]).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidDefault { ref attribute, .. } if attribute == "color"));
    }

    #[test]
    fn test_rejects_empty_containment_and_zero_tuples() {
        let defs = vec![ElementDef::new("Geometry").contains(Vec::<String>::new(), Cardinality::OneOrMore)];
        assert!(matches!(
            SchemaRegistry::build(defs),
            Err(SchemaError::EmptyContainment { .. })
        ));

        let def = ElementDef::new("Point").attribute("at", TypeDef::required(ValueKind::Array(ItemKind::Tuple(0))));
        assert!(matches!(
            SchemaRegistry::build([def]),
            Err(SchemaError::InvalidKind { .. })
        ));
    }

    #[test]
    fn test_rejects_invalid_names() {
        let def = ElementDef::new("Point Light");
        assert!(matches!(
            SchemaRegistry::build([def]),
            Err(SchemaError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_usage_from_type_def() {
        let def = ElementDef::new("Shape")
            .attribute("geometry", TypeDef::required(ValueKind::Reference))
            .attribute("weight", TypeDef::with_default(ValueKind::Number, "0.5"))
            .attribute("material", TypeDef::optional(ValueKind::Reference));
        let registry = SchemaRegistry::build([def]).unwrap();
        let shape = registry.lookup("Shape").unwrap();

        assert_eq!(*shape.attributes()[0].usage(), AttributeUse::Required);
        assert_eq!(*shape.attributes()[1].usage(), AttributeUse::Default("0.5".to_string()));
        assert_eq!(*shape.attributes()[2].usage(), AttributeUse::Nullable);
    }

    #[test]
    fn test_json_round_trip() {
        let registry = SchemaRegistry::build(root_and_child()).unwrap();
        let json = registry.to_json().unwrap();
        assert_eq!(SchemaRegistry::from_json(&json).unwrap(), registry);
    }

    #[test]
    fn test_sdl_schema() {
        let sdl = SchemaRegistry::sdl();
        assert_eq!(sdl.elements().next().unwrap().name(), "Sdl");

        let camera = sdl.lookup("Camera").unwrap();
        let names: Vec<&str> = camera.attributes().iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["position", "direction", "up", "fovy", "name"]);
        assert_eq!(camera.attributes()[0].kind(), ValueKind::Tuple(3));

        let shape = sdl.lookup("Shape").unwrap();
        assert!(shape.attributes().iter().all(|a| a.is_reference()));
    }
}
