//! Root-name wrapping and container shapes around a built example.
use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::UnknownContainerShape;
use crate::synth::PLACEHOLDER;

/// Container the example instance is declared inside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerShape {
    Array,
    Collection,
    List,
    Map,
}

impl ContainerShape {
    pub fn is_array_like(self) -> bool {
        !matches!(self, Self::Map)
    }

    fn wrap(self, inner: Value) -> Value {
        if self.is_array_like() {
            Value::Array(vec![inner])
        } else {
            let mut map = Map::new();
            map.insert(PLACEHOLDER.to_string(), inner);
            Value::Object(map)
        }
    }
}

impl FromStr for ContainerShape {
    type Err = UnknownContainerShape;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "array" => Ok(Self::Array),
            "collection" => Ok(Self::Collection),
            "list" => Ok(Self::List),
            "map" => Ok(Self::Map),
            _ => Err(UnknownContainerShape(s.to_string())),
        }
    }
}

impl fmt::Display for ContainerShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Array => "array",
            Self::Collection => "collection",
            Self::List => "list",
            Self::Map => "map",
        })
    }
}

/// Put `node` under `root_name` (when given), then inside each container,
/// first container innermost.
pub fn wrap(node: Value, root_name: Option<&str>, containers: &[ContainerShape]) -> Value {
    let node = match root_name {
        Some(name) => {
            let mut wrapped = Map::new();
            wrapped.insert(name.to_string(), node);
            Value::Object(wrapped)
        }
        None => node,
    };
    containers.iter().fold(node, |outer, shape| shape.wrap(outer))
}
