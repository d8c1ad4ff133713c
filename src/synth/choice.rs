//! Members with more than one concrete subtype.
//!
//! Every choice gets its own example, tagged with its subtype identifier in
//! the member's declared style.
use serde_json::{Map, Value};

use super::context::Context;
use super::{PLACEHOLDER, Synthesizer};
use crate::model::{Choice, IdInclusion, Member, ValueType};
use crate::resolve::Candidates;

impl Synthesizer<'_> {
    pub(super) fn build_choices(
        &mut self,
        node: &mut Map<String, Value>,
        member: &Member,
        example_type: Option<&ValueType>,
        examples: &Candidates,
        ctx: &mut Context<'_>,
    ) {
        if member.collection {
            let mut items = Vec::with_capacity(member.choices.len());
            for choice in &member.choices {
                items.push(self.choice_node(node, member, choice, example_type, examples, ctx));
            }
            node.insert(member.name.clone(), Value::Array(items));
        } else {
            // One property per choice under the same name: the last one wins.
            for choice in &member.choices {
                let value = self.choice_node(node, member, choice, example_type, examples, ctx);
                node.insert(member.name.clone(), value);
            }
        }
    }

    fn choice_node(
        &mut self,
        parent: &mut Map<String, Value>,
        member: &Member,
        choice: &Choice,
        example_type: Option<&ValueType>,
        examples: &Candidates,
        ctx: &mut Context<'_>,
    ) -> Value {
        let value_type = example_type.unwrap_or(&choice.value_type);
        let choice_name = if choice.name.is_empty() {
            PLACEHOLDER
        } else {
            choice.name.as_str()
        };
        let mut example = self.example_node(value_type, examples, ctx);

        let Some(id) = &member.subtype_id else {
            return example;
        };
        match id.inclusion {
            IdInclusion::WrapperArray => Value::Array(vec![Value::from(choice_name), example]),
            IdInclusion::WrapperObject => {
                let mut wrapper = Map::new();
                wrapper.insert(choice_name.to_string(), example);
                Value::Object(wrapper)
            }
            IdInclusion::Property => {
                if let (Some(property), Value::Object(fields)) = (&id.property, &mut example) {
                    fields.insert(property.clone(), Value::from(PLACEHOLDER));
                }
                example
            }
            IdInclusion::ExternalProperty => {
                if let Some(property) = &id.property {
                    parent.insert(property.clone(), Value::from(PLACEHOLDER));
                }
                example
            }
            IdInclusion::ExistingProperty => example,
        }
    }
}
