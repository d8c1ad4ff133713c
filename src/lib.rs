//! Sample JSON bodies for documented object types.
//!
//! Given a `TypeModel` (object, enum and simple types with their members and
//! documentation metadata), `ExampleGenerator` produces one illustrative
//! instance of an object type as a `serde_json::Value`, optionally wrapped in
//! a root element and container shapes.
pub mod cli;
pub mod envelope;
pub mod error;
pub mod facet;
pub mod log;
pub mod model;
pub mod model_file;
pub mod resolve;
pub mod synth;

pub use envelope::ContainerShape;
pub use error::{GenerateError, ModelError};
pub use facet::{AcceptAll, FacetFilter, FacetSet};
pub use log::{Logger, RecordingLogger, TracingLogger};
pub use model::{PrimitiveKind, TypeDef, TypeModel, ValueType};
pub use resolve::{Candidates, DocumentedExamples, ExampleResolver};
pub use synth::{EnumSelection, ExampleGenerator};
