//! Example strings and example-type overrides for members.
//!
//! Sources, lowest to highest precedence:
//! - `documentation_example` / `documentation_type` tags on the member,
//!   falling back to the member's type definition;
//! - an `ExampleAnnotation` on the member, falling back to its type definition.
//!   Each of its two value slots overrides the matching tag only when set.
use crate::log::Logger;
use crate::model::{ANNOTATION_DEFAULT, ExampleAnnotation, Member, TypeDef, TypeModel, ValueType};

/// Candidate example strings for one synthesis call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates {
    pub primary: Option<String>,
    pub secondary: Option<String>,
}

impl Candidates {
    pub fn new(primary: Option<String>, secondary: Option<String>) -> Self {
        Self { primary, secondary }
    }

    pub fn none() -> Self {
        Self::default()
    }

    /// Same strings, primary and secondary exchanged.
    pub fn swapped(&self) -> Self {
        Self {
            primary: self.secondary.clone(),
            secondary: self.primary.clone(),
        }
    }

    pub fn primary(&self) -> Option<&str> {
        self.primary.as_deref()
    }
}

pub trait ExampleResolver {
    /// Member must not appear in the example at all.
    fn is_excluded(&self, member: &Member) -> bool;
    fn primary_example(&self, member: &Member) -> Option<String>;
    fn secondary_example(&self, member: &Member) -> Option<String>;
    /// Type to synthesize instead of the member's declared type.
    fn type_override(&self, member: &Member) -> Option<ValueType>;

    fn candidates(&self, member: &Member) -> Candidates {
        Candidates::new(self.primary_example(member), self.secondary_example(member))
    }
}

/// Resolver backed by the documentation metadata stored in the model.
pub struct DocumentedExamples<'m> {
    model: &'m TypeModel,
    log: &'m dyn Logger,
}

impl<'m> DocumentedExamples<'m> {
    pub fn new(model: &'m TypeModel, log: &'m dyn Logger) -> Self {
        Self { model, log }
    }

    fn type_def(&self, member: &Member) -> Option<&'m TypeDef> {
        self.model.definition_of(&member.value_type)
    }

    fn annotation<'a>(&self, member: &'a Member) -> Option<&'a ExampleAnnotation>
    where
        'm: 'a,
    {
        member
            .annotation
            .as_ref()
            .or_else(|| self.type_def(member).and_then(TypeDef::annotation))
    }

    fn tag_candidates(&self, member: &Member) -> Candidates {
        let tags = if !member.docs.examples.is_empty() {
            &member.docs.examples
        } else {
            match self.type_def(member) {
                Some(def) => &def.docs().examples,
                None => return Candidates::none(),
            }
        };
        let Some(first) = tags.first() else {
            return Candidates::none();
        };
        let primary = non_empty(first);
        let secondary = match tags.get(1) {
            Some(second) => non_empty(second),
            None => primary.clone(),
        };
        Candidates::new(primary, secondary)
    }

    /// Annotation slots win over tags one by one; an unset slot keeps the tag.
    fn resolved(&self, member: &Member) -> Candidates {
        let tags = self.tag_candidates(member);
        match self.annotation(member) {
            Some(ann) => Candidates::new(
                annotation_slot(&ann.value).or(tags.primary),
                annotation_slot(&ann.value2).or(tags.secondary),
            ),
            None => tags,
        }
    }

    fn documented_type(&self, member: &Member) -> Option<ValueType> {
        let tags = if !member.docs.types.is_empty() {
            &member.docs.types
        } else {
            &self.type_def(member)?.docs().types
        };
        let tag = tags.first()?.trim();
        if tag.is_empty() {
            return None;
        }
        let resolved = self.model.lookup_type_name(tag);
        if resolved.is_none() {
            self.log.warn(&format!("Invalid documentation type {tag}."));
        }
        resolved
    }
}

impl ExampleResolver for DocumentedExamples<'_> {
    fn is_excluded(&self, member: &Member) -> bool {
        self.annotation(member).is_some_and(|ann| ann.exclude)
    }

    fn primary_example(&self, member: &Member) -> Option<String> {
        self.resolved(member).primary
    }

    fn secondary_example(&self, member: &Member) -> Option<String> {
        self.resolved(member).secondary
    }

    fn candidates(&self, member: &Member) -> Candidates {
        self.resolved(member)
    }

    fn type_override(&self, member: &Member) -> Option<ValueType> {
        let documented = self.documented_type(member);
        let hinted = self
            .annotation(member)
            .and_then(|ann| ann.type_hint.as_deref())
            .and_then(|hint| {
                let resolved = self.model.lookup_type_name(hint);
                if resolved.is_none() {
                    tracing::debug!(hint, member = %member.name, "ignoring unresolvable type hint");
                }
                resolved
            });
        hinted.or(documented)
    }
}

fn non_empty(tag: &str) -> Option<String> {
    let tag = tag.trim();
    if tag.is_empty() {
        None
    } else {
        Some(tag.to_string())
    }
}

fn annotation_slot(value: &str) -> Option<String> {
    if value == ANNOTATION_DEFAULT {
        None
    } else {
        Some(value.to_string())
    }
}
