//! Read-only type model the example generator walks.
//!
//! Object, enum and simple types are referenced by qualified name and looked
//! up in a `TypeModel`, so cyclic type graphs are plain data. Everything here
//! is built once (usually by `model_file`) and never mutated by synthesis.
use indexmap::IndexMap;
use serde::Deserialize;

// ------------------------------ Value types ------------------------------ //

/// Logical type of a field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Object(String),            // qualified name of an `ObjectTypeDef`
    Enum(String),              // qualified name of an `EnumTypeDef`
    Simple(String),            // qualified name of a `SimpleTypeDef`
    Map(Box<ValueType>),       // value type; keys are always placeholders
    Array(Box<ValueType>),     // component type
    Primitive(PrimitiveKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    WholeNumber,
    RealNumber,
    Boolean,
    String,
    Opaque,
}

impl ValueType {
    pub fn object(name: impl Into<String>) -> Self {
        Self::Object(name.into())
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::Enum(name.into())
    }

    pub fn simple(name: impl Into<String>) -> Self {
        Self::Simple(name.into())
    }

    pub fn map_of(value: ValueType) -> Self {
        Self::Map(Box::new(value))
    }

    pub fn array_of(component: ValueType) -> Self {
        Self::Array(Box::new(component))
    }

    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::Primitive(kind)
    }

    /// Name of the definition this type points at, for named types only.
    pub fn definition_name(&self) -> Option<&str> {
        match self {
            Self::Object(name) | Self::Enum(name) | Self::Simple(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

// ------------------------ Documentation metadata ------------------------- //

/// Raw documentation tags attached to a member or a type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExampleDocs {
    /// `documentationExample` tags, in declaration order.
    pub examples: Vec<String>,
    /// `documentationType` tags, in declaration order.
    pub types: Vec<String>,
}

/// Value of an annotation slot that means "not set".
pub const ANNOTATION_DEFAULT: &str = "##default";

/// Declarative example annotation. Wins over documentation tags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExampleAnnotation {
    pub value: String,
    pub value2: String,
    pub type_hint: Option<String>,
    pub exclude: bool,
}

impl Default for ExampleAnnotation {
    fn default() -> Self {
        Self {
            value: ANNOTATION_DEFAULT.to_string(),
            value2: ANNOTATION_DEFAULT.to_string(),
            type_hint: None,
            exclude: false,
        }
    }
}

// ------------------------------ Subtype ids ------------------------------ //

/// How the concrete subtype identifier travels with an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdInclusion {
    Property,
    ExistingProperty,
    ExternalProperty,
    WrapperArray,
    WrapperObject,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubtypeId {
    pub inclusion: IdInclusion,
    #[serde(default)]
    pub property: Option<String>,
}

impl SubtypeId {
    /// Property name for in-band (`property`) identifiers, if any.
    pub fn in_band_property(&self) -> Option<&str> {
        match self.inclusion {
            IdInclusion::Property => self.property.as_deref(),
            _ => None,
        }
    }
}

// -------------------------------- Members -------------------------------- //

/// One concrete candidate type of a polymorphic member.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Member {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(default)]
    pub collection: bool,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub subtype_id: Option<SubtypeId>,
    #[serde(default)]
    pub deprecated: Option<String>, // deprecation message
    #[serde(default)]
    pub facets: Vec<String>,
    #[serde(default)]
    pub docs: ExampleDocs,
    #[serde(default)]
    pub annotation: Option<ExampleAnnotation>,
}

impl Member {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            collection: false,
            choices: Vec::new(),
            subtype_id: None,
            deprecated: None,
            facets: Vec::new(),
            docs: ExampleDocs::default(),
            annotation: None,
        }
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated.is_some()
    }

    pub fn with_examples<I, S>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.docs.examples = examples.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_choice(mut self, name: impl Into<String>, value_type: ValueType) -> Self {
        self.choices.push(Choice { name: name.into(), value_type });
        self
    }

    pub fn with_subtype_id(mut self, inclusion: IdInclusion, property: Option<&str>) -> Self {
        self.subtype_id = Some(SubtypeId {
            inclusion,
            property: property.map(str::to_string),
        });
        self
    }

    pub fn collection(mut self) -> Self {
        self.collection = true;
        self
    }
}

/// "Any other property" slot of an object type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Wildcard {
    #[serde(default)]
    pub deprecated: Option<String>,
}

// ------------------------------ Definitions ------------------------------ //

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObjectTypeDef {
    pub name: String,
    #[serde(default)]
    pub root_name: Option<String>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub supertype: Option<ValueType>,
    #[serde(default)]
    pub wildcard: Option<Wildcard>,
    #[serde(default)]
    pub type_id: Option<SubtypeId>,
    #[serde(default)]
    pub docs: ExampleDocs,
    #[serde(default)]
    pub annotation: Option<ExampleAnnotation>,
}

impl ObjectTypeDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root_name: None,
            members: Vec::new(),
            supertype: None,
            wildcard: None,
            type_id: None,
            docs: ExampleDocs::default(),
            annotation: None,
        }
    }

    pub fn member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    pub fn extends(mut self, supertype: ValueType) -> Self {
        self.supertype = Some(supertype);
        self
    }

    /// Property name used when the instance is wrapped under a root element.
    pub fn json_root_name(&self) -> &str {
        match &self.root_name {
            Some(name) => name.as_str(),
            None => self.name.rsplit('.').next().unwrap_or(&self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnumTypeDef {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub docs: ExampleDocs,
    #[serde(default)]
    pub annotation: Option<ExampleAnnotation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimpleTypeDef {
    pub name: String,
    pub base: ValueType,
    #[serde(default)]
    pub docs: ExampleDocs,
    #[serde(default)]
    pub annotation: Option<ExampleAnnotation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDef {
    Object(ObjectTypeDef),
    Enum(EnumTypeDef),
    Simple(SimpleTypeDef),
}

impl TypeDef {
    pub fn name(&self) -> &str {
        match self {
            Self::Object(def) => &def.name,
            Self::Enum(def) => &def.name,
            Self::Simple(def) => &def.name,
        }
    }

    pub fn docs(&self) -> &ExampleDocs {
        match self {
            Self::Object(def) => &def.docs,
            Self::Enum(def) => &def.docs,
            Self::Simple(def) => &def.docs,
        }
    }

    pub fn annotation(&self) -> Option<&ExampleAnnotation> {
        match self {
            Self::Object(def) => def.annotation.as_ref(),
            Self::Enum(def) => def.annotation.as_ref(),
            Self::Simple(def) => def.annotation.as_ref(),
        }
    }

    /// Value type that refers back to this definition.
    pub fn as_value_type(&self) -> ValueType {
        match self {
            Self::Object(def) => ValueType::Object(def.name.clone()),
            Self::Enum(def) => ValueType::Enum(def.name.clone()),
            Self::Simple(def) => ValueType::Simple(def.name.clone()),
        }
    }
}

// -------------------------------- Registry ------------------------------- //

/// All known type definitions, keyed by qualified name in insertion order.
#[derive(Debug, Clone, Default)]
pub struct TypeModel {
    types: IndexMap<String, TypeDef>,
    /// Wrap root instances under their JSON root name.
    pub wrap_root_value: bool,
}

impl TypeModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition, replacing any previous one with the same name.
    pub fn insert(&mut self, def: TypeDef) -> Option<TypeDef> {
        self.types.insert(def.name().to_string(), def)
    }

    pub fn with(mut self, def: TypeDef) -> Self {
        self.insert(def);
        self
    }

    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    pub fn object(&self, name: &str) -> Option<&ObjectTypeDef> {
        match self.types.get(name) {
            Some(TypeDef::Object(def)) => Some(def),
            _ => None,
        }
    }

    /// Definition behind a named value type (object, enum or simple).
    pub fn definition_of(&self, value_type: &ValueType) -> Option<&TypeDef> {
        value_type.definition_name().and_then(|name| self.get(name))
    }

    pub fn objects(&self) -> impl Iterator<Item = &ObjectTypeDef> {
        self.types.values().filter_map(|def| match def {
            TypeDef::Object(def) => Some(def),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Follow a simple type's base through further simple types. `None` when
    /// the chain comes back to a type already on it.
    pub fn simple_base<'a>(&'a self, def: &'a SimpleTypeDef) -> Option<&'a ValueType> {
        let mut seen = vec![def.name.as_str()];
        let mut base = &def.base;
        while let Some(TypeDef::Simple(next)) = self.definition_of(base) {
            if seen.contains(&next.name.as_str()) {
                return None;
            }
            seen.push(next.name.as_str());
            base = &next.base;
        }
        Some(base)
    }

    /// Object types `def` extends, nearest first. Supertypes missing from the
    /// model end the chain. `None` when the chain loops.
    pub fn supertypes<'a>(&'a self, def: &'a ObjectTypeDef) -> Option<Vec<&'a ObjectTypeDef>> {
        let mut chain: Vec<&ObjectTypeDef> = Vec::new();
        let mut current = def;
        while let Some(ValueType::Object(name)) = &current.supertype {
            let Some(next) = self.object(name) else {
                break;
            };
            if next.name == def.name || chain.iter().any(|seen| seen.name == next.name) {
                return None;
            }
            chain.push(next);
            current = next;
        }
        Some(chain)
    }

    /// First type whose simple-base or supertype chain loops.
    pub fn find_cycle(&self) -> Option<&str> {
        self.types
            .values()
            .find(|def| match def {
                TypeDef::Simple(def) => self.simple_base(def).is_none(),
                TypeDef::Object(def) => self.supertypes(def).is_none(),
                TypeDef::Enum(_) => false,
            })
            .map(TypeDef::name)
    }

    /// Resolve a type reference written in documentation (a model type name
    /// or a primitive alias).
    pub fn lookup_type_name(&self, name: &str) -> Option<ValueType> {
        if let Some(def) = self.get(name) {
            return Some(def.as_value_type());
        }
        let kind = match name {
            "string" | "String" | "java.lang.String" => PrimitiveKind::String,
            "int" | "integer" | "long" | "short" | "byte" => PrimitiveKind::WholeNumber,
            "float" | "double" | "number" | "decimal" => PrimitiveKind::RealNumber,
            "boolean" | "bool" => PrimitiveKind::Boolean,
            "object" => PrimitiveKind::Opaque,
            _ => return None,
        };
        Some(ValueType::Primitive(kind))
    }
}
