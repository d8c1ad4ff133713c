//! Example document synthesis.
//!
//! Walks an object type recursively and fills a `serde_json` object with one
//! illustrative instance of it:
//! - members are filtered by facet, deprecation and resolver exclusion;
//! - each member's example comes from the resolver, with primary/secondary
//!   candidates swapped when the branch is on an odd alternation index;
//! - polymorphic members get one example per choice (see `choice`);
//! - recursion stops at `MAX_DEPTH` nested object types and at cycles, both
//!   of which come out as empty objects.
pub mod choice;
pub mod context;
pub mod scalar;

use serde_json::{Map, Value};

use crate::envelope::{self, ContainerShape};
use crate::error::GenerateError;
use crate::facet::{AcceptAll, FacetFilter};
use crate::log::{Logger, TracingLogger};
use crate::model::{ObjectTypeDef, SubtypeId, TypeDef, TypeModel};
use crate::resolve::{DocumentedExamples, ExampleResolver};

pub use context::{Context, MAX_DEPTH, VisitedPath};
pub use scalar::EnumSelection;

use scalar::EnumPicker;

/// Stand-in for any value the generator has nothing better for.
pub const PLACEHOLDER: &str = "...";

const EXTENSION_KEYS: [&str; 2] = ["extension1", "extension2"];

// ------------------------------ Builder ---------------------------------- //

/// Per-call synthesis state. Only the enum picker changes during a walk.
pub(crate) struct Synthesizer<'a> {
    model: &'a TypeModel,
    resolver: &'a dyn ExampleResolver,
    filter: &'a dyn FacetFilter,
    log: &'a dyn Logger,
    enums: EnumPicker,
}

impl Synthesizer<'_> {
    /// Append the example fields of `ty` (and its supertypes) to `node`.
    pub(crate) fn build(
        &mut self,
        node: &mut Map<String, Value>,
        ty: &ObjectTypeDef,
        ctx: &mut Context<'_>,
    ) {
        if ctx.is_too_deep() {
            tracing::debug!(type_name = %ty.name, depth = ctx.depth(), "depth limit reached");
            return;
        }

        let model = self.model;
        let mut lineage = vec![ty];
        match model.supertypes(ty) {
            Some(supertypes) => lineage.extend(supertypes),
            None => self.log.warn(&format!(
                "Supertypes of {} form a cycle, their members will be left out.",
                ty.name
            )),
        }
        self.build_lineage(node, &lineage, ctx);
    }

    /// `lineage[0]` first, then its supertypes in turn. Wildcards are added
    /// on the way back out.
    fn build_lineage(
        &mut self,
        node: &mut Map<String, Value>,
        lineage: &[&ObjectTypeDef],
        ctx: &mut Context<'_>,
    ) {
        let Some((ty, supertypes)) = lineage.split_first() else {
            return;
        };

        if let Some(property) = ty.type_id.as_ref().and_then(SubtypeId::in_band_property) {
            node.insert(property.to_string(), Value::from(PLACEHOLDER));
        }

        for member in &ty.members {
            if !self.filter.accept(member) || member.is_deprecated() {
                continue;
            }

            let mut examples = self.resolver.candidates(member);
            let example_type = self.resolver.type_override(member);
            if self.resolver.is_excluded(member) {
                continue;
            }

            if ctx.is_alternate() {
                examples = examples.swapped();
            }

            if member.choices.len() > 1 {
                self.build_choices(node, member, example_type.as_ref(), &examples, ctx);
            } else {
                let value_type = example_type.as_ref().unwrap_or(&member.value_type);
                let value = self.example_node(value_type, &examples, ctx);
                node.insert(member.name.clone(), value);
            }
        }

        self.build_lineage(node, supertypes, ctx);

        if ty.wildcard.as_ref().is_some_and(|w| w.deprecated.is_none()) {
            for key in EXTENSION_KEYS {
                node.insert(key.to_string(), Value::from(PLACEHOLDER));
            }
        }
    }
}

// ------------------------------- Front API -------------------------------- //

/// Entry point: holds the model and the collaborators used on every call.
pub struct ExampleGenerator<'g> {
    model: &'g TypeModel,
    filter: &'g dyn FacetFilter,
    resolver: Option<&'g dyn ExampleResolver>,
    log: &'g dyn Logger,
    enum_selection: EnumSelection,
}

impl<'g> ExampleGenerator<'g> {
    pub fn new(model: &'g TypeModel) -> Self {
        Self {
            model,
            filter: &AcceptAll,
            resolver: None,
            log: &TracingLogger,
            enum_selection: EnumSelection::default(),
        }
    }

    pub fn with_filter(mut self, filter: &'g dyn FacetFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Replace the documentation-backed resolver.
    pub fn with_resolver(mut self, resolver: &'g dyn ExampleResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn with_logger(mut self, log: &'g dyn Logger) -> Self {
        self.log = log;
        self
    }

    pub fn with_enum_selection(mut self, selection: EnumSelection) -> Self {
        self.enum_selection = selection;
        self
    }

    /// Example for the object type named `root`, wrapped in `containers`.
    pub fn generate(
        &self,
        root: &str,
        containers: &[ContainerShape],
    ) -> Result<Value, GenerateError> {
        match self.model.get(root) {
            Some(TypeDef::Object(def)) => Ok(self.generate_for(def, containers)),
            Some(_) => Err(GenerateError::NotAnObjectType(root.to_string())),
            None => Err(GenerateError::UnknownType(root.to_string())),
        }
    }

    pub fn generate_for(&self, root: &ObjectTypeDef, containers: &[ContainerShape]) -> Value {
        let documented = DocumentedExamples::new(self.model, self.log);
        let resolver: &dyn ExampleResolver = match self.resolver {
            Some(resolver) => resolver,
            None => &documented,
        };
        let mut synth = Synthesizer {
            model: self.model,
            resolver,
            filter: self.filter,
            log: self.log,
            enums: EnumPicker::new(self.enum_selection),
        };

        let mut stack = VisitedPath::new();
        let mut node = Map::new();
        synth.build(&mut node, root, &mut Context::new(&mut stack));

        let wrap_root = self.model.wrap_root_value.then(|| root.json_root_name());
        envelope::wrap(Value::Object(node), wrap_root, containers)
    }

    /// Indented JSON text of `generate`.
    pub fn render(
        &self,
        root: &str,
        containers: &[ContainerShape],
    ) -> Result<String, GenerateError> {
        let value = self.generate(root, containers)?;
        Ok(serde_json::to_string_pretty(&value)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::facet::FacetSet;
    use crate::log::RecordingLogger;
    use crate::model::{
        ExampleAnnotation, IdInclusion, Member, PrimitiveKind, ValueType, Wildcard,
    };
    use crate::resolve::Candidates;

    fn string() -> ValueType {
        ValueType::primitive(PrimitiveKind::String)
    }

    fn object(def: ObjectTypeDef) -> TypeDef {
        TypeDef::Object(def)
    }

    #[test]
    fn empty_type_yields_empty_object() {
        let model = TypeModel::new().with(object(ObjectTypeDef::new("Empty")));
        let out = ExampleGenerator::new(&model).generate("Empty", &[]).unwrap();
        assert_eq!(out, json!({}));
    }

    #[test]
    fn members_keep_declaration_order() {
        let model = TypeModel::new().with(object(
            ObjectTypeDef::new("T")
                .member(Member::new("z", string()))
                .member(Member::new("a", string()))
                .member(Member::new("m", string())),
        ));
        let text = ExampleGenerator::new(&model).render("T", &[]).unwrap();
        let out = serde_json::from_str::<Value>(&text).unwrap();
        let keys: Vec<_> = out.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn nesting_beyond_depth_limit_is_empty() {
        let link = |name: &str, field: &str, target: &str| {
            object(ObjectTypeDef::new(name).member(Member::new(field, ValueType::object(target))))
        };
        let model = TypeModel::new()
            .with(link("A", "b", "B"))
            .with(link("B", "c", "C"))
            .with(link("C", "d", "D"))
            .with(object(ObjectTypeDef::new("D").member(Member::new("e", string()))));
        let out = ExampleGenerator::new(&model).generate("A", &[]).unwrap();
        assert_eq!(out, json!({"b": {"c": {"d": {}}}}));
    }

    #[test]
    fn self_reference_closes_with_empty_object() {
        let model = TypeModel::new().with(object(
            ObjectTypeDef::new("Node")
                .member(Member::new("label", string()))
                .member(Member::new("next", ValueType::object("Node"))),
        ));
        let out = ExampleGenerator::new(&model).generate("Node", &[]).unwrap();
        assert_eq!(out, json!({"label": "...", "next": {"label": "...", "next": {}}}));
    }

    #[test]
    fn mutual_cycle_terminates() {
        let a = || ValueType::object("A");
        let bs = ValueType::array_of(ValueType::object("B"));
        let model = TypeModel::new()
            .with(object(ObjectTypeDef::new("Root").member(Member::new("a", a()))))
            .with(object(ObjectTypeDef::new("A").member(Member::new("b", bs))))
            .with(object(ObjectTypeDef::new("B").member(Member::new("a", a()))));
        let out = ExampleGenerator::new(&model).generate("Root", &[]).unwrap();
        assert_eq!(out, json!({"a": {"b": [{"a": {}}, {"a": {}}]}}));
    }

    #[test]
    fn excluded_members_never_appear() {
        let mut hidden = Member::new("hidden", string());
        hidden.facets = vec!["internal".into()];
        let mut old = Member::new("old", string());
        old.deprecated = Some("use `new`".into());
        let mut skipped = Member::new("skipped", string());
        skipped.annotation = Some(ExampleAnnotation {
            exclude: true,
            ..ExampleAnnotation::default()
        });

        let model = TypeModel::new().with(object(
            ObjectTypeDef::new("T")
                .member(hidden)
                .member(old)
                .member(skipped)
                .member(Member::new("kept", string())),
        ));
        let facets = FacetSet::new(Vec::new(), ["internal".to_string()]);
        let out = ExampleGenerator::new(&model)
            .with_filter(&facets)
            .generate("T", &[])
            .unwrap();
        assert_eq!(out, json!({"kept": "..."}));
    }

    #[test]
    fn supertype_members_follow_declared_ones() {
        let base =
            ObjectTypeDef::new("Base").member(Member::new("id", string()).with_examples(["b-1"]));
        let derived = ObjectTypeDef::new("Derived")
            .member(Member::new("extra", string()))
            .extends(ValueType::object("Base"));
        let model = TypeModel::new().with(object(base)).with(object(derived));
        let text = ExampleGenerator::new(&model).render("Derived", &[]).unwrap();
        let out: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(out, json!({"extra": "...", "id": "b-1"}));
        let keys: Vec<_> = out.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["extra", "id"]);
    }

    #[test]
    fn in_band_type_id_and_wildcard() {
        let mut def = ObjectTypeDef::new("Shape").member(Member::new("name", string()));
        def.type_id = Some(SubtypeId {
            inclusion: IdInclusion::Property,
            property: Some("kind".into()),
        });
        def.wildcard = Some(Wildcard::default());
        let model = TypeModel::new().with(object(def));
        let out = ExampleGenerator::new(&model).generate("Shape", &[]).unwrap();
        assert_eq!(
            out,
            json!({"kind": "...", "name": "...", "extension1": "...", "extension2": "..."})
        );
    }

    #[test]
    fn deprecated_wildcard_adds_nothing() {
        let mut def = ObjectTypeDef::new("Shape");
        def.wildcard = Some(Wildcard {
            deprecated: Some("gone".into()),
        });
        let mut wrapper_id = ObjectTypeDef::new("Tagged");
        wrapper_id.type_id = Some(SubtypeId {
            inclusion: IdInclusion::WrapperObject,
            property: Some("kind".into()),
        });
        let model = TypeModel::new().with(object(def)).with(object(wrapper_id));
        let generator = ExampleGenerator::new(&model);
        assert_eq!(generator.generate("Shape", &[]).unwrap(), json!({}));
        assert_eq!(generator.generate("Tagged", &[]).unwrap(), json!({}));
    }

    #[test]
    fn documented_type_overrides_declared_type() {
        let mut member = Member::new("count", string()).with_examples(["7"]);
        member.docs.types = vec!["long".into()];
        let model = TypeModel::new().with(object(ObjectTypeDef::new("T").member(member)));
        let out = ExampleGenerator::new(&model).generate("T", &[]).unwrap();
        assert_eq!(out, json!({"count": 7}));
    }

    struct Fixed;

    impl ExampleResolver for Fixed {
        fn is_excluded(&self, member: &Member) -> bool {
            member.name == "secret"
        }

        fn primary_example(&self, _member: &Member) -> Option<String> {
            Some("A".into())
        }

        fn secondary_example(&self, _member: &Member) -> Option<String> {
            Some("B".into())
        }

        fn type_override(&self, _member: &Member) -> Option<ValueType> {
            None
        }
    }

    #[test]
    fn custom_resolver_drives_alternation() {
        let leaves = ValueType::array_of(ValueType::object("Leaf"));
        let model = TypeModel::new()
            .with(object(
                ObjectTypeDef::new("T")
                    .member(Member::new("secret", string()))
                    .member(Member::new("pair", leaves)),
            ))
            .with(object(ObjectTypeDef::new("Leaf").member(Member::new("v", string()))));
        let out = ExampleGenerator::new(&model)
            .with_resolver(&Fixed)
            .generate("T", &[])
            .unwrap();
        assert_eq!(out, json!({"pair": [{"v": "A"}, {"v": "B"}]}));
        assert_eq!(
            Fixed.candidates(&Member::new("x", string())),
            Candidates::new(Some("A".into()), Some("B".into()))
        );
    }

    #[test]
    fn unknown_or_non_object_root_is_an_error() {
        let model = TypeModel::new().with(TypeDef::Enum(crate::model::EnumTypeDef {
            name: "Color".into(),
            values: Vec::new(),
            docs: Default::default(),
            annotation: None,
        }));
        let generator = ExampleGenerator::new(&model);
        assert!(matches!(generator.generate("Nope", &[]), Err(GenerateError::UnknownType(_))));
        assert!(matches!(generator.render("Color", &[]), Err(GenerateError::NotAnObjectType(_))));
    }

    #[test]
    fn invalid_documentation_type_warns_and_keeps_declared_type() {
        let mut member = Member::new("n", string());
        member.docs.types = vec!["com.acme.Unknown".into()];
        let model = TypeModel::new().with(object(ObjectTypeDef::new("T").member(member)));
        let log = RecordingLogger::new();
        let out = ExampleGenerator::new(&model)
            .with_logger(&log)
            .generate("T", &[])
            .unwrap();
        assert_eq!(out, json!({"n": "..."}));
        assert_eq!(log.count(), 1);
    }

    #[test]
    fn looping_supertypes_still_produce_own_members() {
        let model = TypeModel::new()
            .with(object(
                ObjectTypeDef::new("A")
                    .member(Member::new("a", string()))
                    .extends(ValueType::object("B")),
            ))
            .with(object(
                ObjectTypeDef::new("B")
                    .member(Member::new("b", string()))
                    .extends(ValueType::object("A")),
            ));
        let log = RecordingLogger::new();
        let out = ExampleGenerator::new(&model)
            .with_logger(&log)
            .generate("A", &[])
            .unwrap();
        assert_eq!(out, json!({"a": "..."}));
        assert_eq!(log.count(), 1);
        assert!(log.warnings()[0].contains("form a cycle"));
    }
}
