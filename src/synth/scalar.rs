//! Example value for a single value type.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Value};

use super::context::Context;
use super::{PLACEHOLDER, Synthesizer};
use crate::model::{ObjectTypeDef, PrimitiveKind, TypeDef, ValueType};
use crate::resolve::Candidates;

const DEFAULT_WHOLE_NUMBER: i64 = 12345;
const DEFAULT_REAL_NUMBER: f64 = 12345.0;
const UNKNOWN_ENUM_VALUE: &str = "???";

pub const MAP_KEYS: [&str; 2] = ["property1", "property2"];

/// How an enum value is picked when no example was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumSelection {
    /// Always the first declared value.
    #[default]
    First,
    /// Reproducible pick from a seeded generator.
    Seeded(u64),
    /// Fresh entropy on every generation call.
    Random,
}

pub(crate) enum EnumPicker {
    First,
    Rng(StdRng),
}

impl EnumPicker {
    pub(crate) fn new(selection: EnumSelection) -> Self {
        match selection {
            EnumSelection::First => Self::First,
            EnumSelection::Seeded(seed) => Self::Rng(StdRng::seed_from_u64(seed)),
            EnumSelection::Random => Self::Rng(StdRng::from_entropy()),
        }
    }

    fn pick<'v>(&mut self, values: &'v [String]) -> Option<&'v str> {
        if values.is_empty() {
            return None;
        }
        let index = match self {
            Self::First => 0,
            Self::Rng(rng) => rng.gen_range(0..values.len()),
        };
        values.get(index).map(String::as_str)
    }
}

impl Synthesizer<'_> {
    pub(super) fn example_node(
        &mut self,
        value_type: &ValueType,
        examples: &Candidates,
        ctx: &mut Context<'_>,
    ) -> Value {
        match value_type {
            ValueType::Object(name) | ValueType::Enum(name) | ValueType::Simple(name) => {
                let model = self.model;
                match model.get(name) {
                    Some(TypeDef::Object(def)) => self.object_node(def, ctx),
                    Some(TypeDef::Enum(def)) => {
                        let value = match examples.primary() {
                            Some(example) => example,
                            None => self.enums.pick(&def.values).unwrap_or(UNKNOWN_ENUM_VALUE),
                        };
                        Value::from(value)
                    }
                    Some(TypeDef::Simple(def)) => match model.simple_base(def) {
                        Some(base) => self.example_node(base, examples, ctx),
                        None => {
                            self.log.warn(&format!(
                                "Base types of {name} form a cycle, its example will be empty."
                            ));
                            Value::Object(Map::new())
                        }
                    },
                    None => {
                        self.log.warn(&format!("Unknown type {name}, its example will be empty."));
                        Value::Object(Map::new())
                    }
                }
            }
            ValueType::Map(value) => {
                let mut map = Map::new();
                let first = self.example_node(value, examples, ctx);
                map.insert(MAP_KEYS[0].to_string(), first);
                let second = self.example_node(value, examples, &mut ctx.with_index(1));
                map.insert(MAP_KEYS[1].to_string(), second);
                Value::Object(map)
            }
            ValueType::Array(component) => {
                let first = self.example_node(component, examples, ctx);
                let swapped = examples.swapped();
                let second = self.example_node(component, &swapped, &mut ctx.with_index(1));
                Value::Array(vec![first, second])
            }
            ValueType::Primitive(kind) => self.primitive_node(*kind, examples),
        }
    }

    fn object_node(&mut self, def: &ObjectTypeDef, ctx: &mut Context<'_>) -> Value {
        let mut node = Map::new();
        match ctx.enter(&def.name) {
            Some(mut expansion) => self.build(&mut node, def, &mut *expansion),
            None => {
                tracing::debug!(type_name = %def.name, "type already on the visited path");
            }
        }
        Value::Object(node)
    }

    fn primitive_node(&self, kind: PrimitiveKind, examples: &Candidates) -> Value {
        match kind {
            PrimitiveKind::WholeNumber => {
                let example = examples.primary().and_then(|s| match s.parse::<i64>() {
                    Ok(n) => Some(n),
                    Err(_) => {
                        self.log.warn(&format!(
                            "\"{s}\" was provided as a documentation example, \
                             but it is not a valid JSON whole number, so it will be ignored."
                        ));
                        None
                    }
                });
                Value::from(example.unwrap_or(DEFAULT_WHOLE_NUMBER))
            }
            PrimitiveKind::RealNumber => {
                let example = examples.primary().and_then(|s| match s.trim().parse::<f64>() {
                    Ok(n) if n.is_finite() => Some(n),
                    _ => {
                        self.log.warn(&format!(
                            "\"{s}\" was provided as a documentation example, \
                             but it is not a valid JSON number, so it will be ignored."
                        ));
                        None
                    }
                });
                Value::from(example.unwrap_or(DEFAULT_REAL_NUMBER))
            }
            PrimitiveKind::Boolean => Value::Bool(examples.primary() != Some("false")),
            PrimitiveKind::String => Value::from(examples.primary().unwrap_or(PLACEHOLDER)),
            PrimitiveKind::Opaque => Value::Object(Map::new()),
        }
    }
}
