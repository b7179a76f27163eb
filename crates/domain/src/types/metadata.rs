//! Citation and custom metadata fields
//!
//! On the wire every field carries `typeName`, `typeClass` (`primitive`,
//! `controlledVocabulary` or `compound`) and `multiple`; the shape of `value`
//! depends on the last two. [`MetadataField`] resolves that into one variant
//! per combination.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const TYPE_CLASS_PRIMITIVE: &str = "primitive";
pub const TYPE_CLASS_CONTROLLED_VOCABULARY: &str = "controlledVocabulary";
pub const TYPE_CLASS_COMPOUND: &str = "compound";

/// Sub-fields of one compound value, keyed by their type name.
pub type CompoundValue = BTreeMap<String, MetadataField>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawField", into = "RawField")]
pub enum MetadataField {
    Primitive { type_name: String, value: String },
    PrimitiveMulti { type_name: String, value: Vec<String> },
    ControlledVocabulary { type_name: String, value: String },
    ControlledVocabularyMulti { type_name: String, value: Vec<String> },
    Compound { type_name: String, value: CompoundValue },
    CompoundMulti { type_name: String, value: Vec<CompoundValue> },
}

impl MetadataField {
    pub fn primitive(type_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Primitive { type_name: type_name.into(), value: value.into() }
    }

    pub fn controlled(type_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::ControlledVocabulary { type_name: type_name.into(), value: value.into() }
    }

    pub fn type_name(&self) -> &str {
        match self {
            Self::Primitive { type_name, .. }
            | Self::PrimitiveMulti { type_name, .. }
            | Self::ControlledVocabulary { type_name, .. }
            | Self::ControlledVocabularyMulti { type_name, .. }
            | Self::Compound { type_name, .. }
            | Self::CompoundMulti { type_name, .. } => type_name,
        }
    }

    pub fn type_class(&self) -> &'static str {
        match self {
            Self::Primitive { .. } | Self::PrimitiveMulti { .. } => TYPE_CLASS_PRIMITIVE,
            Self::ControlledVocabulary { .. } | Self::ControlledVocabularyMulti { .. } => {
                TYPE_CLASS_CONTROLLED_VOCABULARY
            }
            Self::Compound { .. } | Self::CompoundMulti { .. } => TYPE_CLASS_COMPOUND,
        }
    }

    pub fn is_multiple(&self) -> bool {
        matches!(
            self,
            Self::PrimitiveMulti { .. }
                | Self::ControlledVocabularyMulti { .. }
                | Self::CompoundMulti { .. }
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    type_name: String,
    type_class: String,
    multiple: bool,
    value: Value,
}

impl TryFrom<RawField> for MetadataField {
    type Error = String;

    fn try_from(raw: RawField) -> Result<Self, Self::Error> {
        let RawField { type_name, type_class, multiple, value } = raw;
        let invalid = |err: serde_json::Error| format!("invalid value for field '{type_name}': {err}");

        let field = match (type_class.as_str(), multiple) {
            (TYPE_CLASS_PRIMITIVE, false) => {
                let value = serde_json::from_value(value).map_err(invalid)?;
                Self::Primitive { type_name, value }
            }
            (TYPE_CLASS_PRIMITIVE, true) => {
                let value = serde_json::from_value(value).map_err(invalid)?;
                Self::PrimitiveMulti { type_name, value }
            }
            (TYPE_CLASS_CONTROLLED_VOCABULARY, false) => {
                let value = serde_json::from_value(value).map_err(invalid)?;
                Self::ControlledVocabulary { type_name, value }
            }
            (TYPE_CLASS_CONTROLLED_VOCABULARY, true) => {
                let value = serde_json::from_value(value).map_err(invalid)?;
                Self::ControlledVocabularyMulti { type_name, value }
            }
            (TYPE_CLASS_COMPOUND, false) => {
                let value = serde_json::from_value(value).map_err(invalid)?;
                Self::Compound { type_name, value }
            }
            (TYPE_CLASS_COMPOUND, true) => {
                let value = serde_json::from_value(value).map_err(invalid)?;
                Self::CompoundMulti { type_name, value }
            }
            (other, _) => return Err(format!("unknown typeClass '{other}' for field '{type_name}'")),
        };
        Ok(field)
    }
}

impl From<MetadataField> for RawField {
    fn from(field: MetadataField) -> Self {
        let type_class = field.type_class().to_string();
        let multiple = field.is_multiple();
        let (type_name, value) = match field {
            MetadataField::Primitive { type_name, value }
            | MetadataField::ControlledVocabulary { type_name, value } => {
                (type_name, Value::String(value))
            }
            MetadataField::PrimitiveMulti { type_name, value }
            | MetadataField::ControlledVocabularyMulti { type_name, value } => {
                (type_name, Value::Array(value.into_iter().map(Value::String).collect()))
            }
            MetadataField::Compound { type_name, value } => (type_name, compound_to_value(value)),
            MetadataField::CompoundMulti { type_name, value } => {
                (type_name, Value::Array(value.into_iter().map(compound_to_value).collect()))
            }
        };
        Self { type_name, type_class, multiple, value }
    }
}

fn compound_to_value(value: CompoundValue) -> Value {
    let map = value
        .into_iter()
        .map(|(name, field)| {
            let raw = RawField::from(field);
            let json = serde_json::json!({
                "typeName": raw.type_name,
                "typeClass": raw.type_class,
                "multiple": raw.multiple,
                "value": raw.value,
            });
            (name, json)
        })
        .collect();
    Value::Object(map)
}

/// A metadata block inside a dataset version, e.g. `citation`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub fields: Vec<MetadataField>,
}

/// Body of edit-metadata calls: `{"fields": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldList {
    pub fields: Vec<MetadataField>,
}

impl FieldList {
    pub fn new(fields: Vec<MetadataField>) -> Self {
        Self { fields }
    }

    pub fn add(&mut self, field: MetadataField) {
        self.fields.push(field);
    }
}

/// Incrementally assembles a compound field.
///
/// Sub-fields are added to the current value; [`CompoundFieldBuilder::next_value`]
/// closes it and starts another one (only meaningful for multi-valued fields).
#[derive(Debug, Clone)]
pub struct CompoundFieldBuilder {
    type_name: String,
    multiple: bool,
    values: Vec<CompoundValue>,
    current: CompoundValue,
}

impl CompoundFieldBuilder {
    pub fn new(type_name: impl Into<String>, multiple: bool) -> Self {
        Self { type_name: type_name.into(), multiple, values: Vec::new(), current: CompoundValue::new() }
    }

    pub fn add_sub_field(self, type_name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add(MetadataField::primitive(type_name, value))
    }

    pub fn add_controlled_sub_field(
        self,
        type_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.add(MetadataField::controlled(type_name, value))
    }

    pub fn add(mut self, field: MetadataField) -> Self {
        self.current.insert(field.type_name().to_string(), field);
        self
    }

    pub fn next_value(mut self) -> Self {
        if !self.current.is_empty() {
            self.values.push(std::mem::take(&mut self.current));
        }
        self
    }

    /// Finish the field. A single-valued builder keeps only the last value.
    pub fn build(self) -> MetadataField {
        let CompoundFieldBuilder { type_name, multiple, mut values, current } = self;
        if !current.is_empty() {
            values.push(current);
        }
        if multiple {
            MetadataField::CompoundMulti { type_name, value: values }
        } else {
            MetadataField::Compound { type_name, value: values.pop().unwrap_or_default() }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUTHOR_JSON: &str = r#"{
        "typeName": "author",
        "typeClass": "compound",
        "multiple": true,
        "value": [
            {
                "authorName": {"typeName": "authorName", "typeClass": "primitive", "multiple": false, "value": "Doe, J."},
                "authorIdentifierScheme": {"typeName": "authorIdentifierScheme", "typeClass": "controlledVocabulary", "multiple": false, "value": "ORCID"}
            }
        ]
    }"#;

    #[test]
    fn compound_multi_field_resolves_sub_fields() {
        let field: MetadataField = serde_json::from_str(AUTHOR_JSON).expect("field");
        let MetadataField::CompoundMulti { type_name, value } = &field else {
            panic!("expected compound multi, got {field:?}");
        };
        assert_eq!(type_name, "author");
        assert_eq!(
            value[0]["authorIdentifierScheme"],
            MetadataField::controlled("authorIdentifierScheme", "ORCID")
        );
    }

    #[test]
    fn builder_output_matches_server_json() {
        let built = CompoundFieldBuilder::new("author", true)
            .add_sub_field("authorName", "Doe, J.")
            .add_controlled_sub_field("authorIdentifierScheme", "ORCID")
            .build();
        let parsed: MetadataField = serde_json::from_str(AUTHOR_JSON).expect("field");
        assert_eq!(built, parsed);

        let json = serde_json::to_value(&built).expect("serialize");
        assert_eq!(json["typeClass"], "compound");
        assert_eq!(json["value"][0]["authorName"]["value"], "Doe, J.");
    }

    #[test]
    fn primitive_multi_field() {
        let field: MetadataField = serde_json::from_str(
            r#"{"typeName":"alternativeTitle","typeClass":"primitive","multiple":true,"value":["a","b"]}"#,
        )
        .expect("field");
        assert!(field.is_multiple());
        assert_eq!(field.type_class(), TYPE_CLASS_PRIMITIVE);
    }

    #[test]
    fn value_shape_must_match_multiple_flag() {
        let result: Result<MetadataField, _> = serde_json::from_str(
            r#"{"typeName":"title","typeClass":"primitive","multiple":false,"value":["a"]}"#,
        );
        let err = result.expect_err("array for single-valued field");
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn unknown_type_class_is_rejected() {
        let result: Result<MetadataField, _> = serde_json::from_str(
            r#"{"typeName":"x","typeClass":"exotic","multiple":false,"value":"a"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn next_value_separates_compound_values() {
        let field = CompoundFieldBuilder::new("keyword", true)
            .add_sub_field("keywordValue", "archaeology")
            .next_value()
            .add_sub_field("keywordValue", "pottery")
            .build();
        let MetadataField::CompoundMulti { value, .. } = field else {
            panic!("expected compound multi");
        };
        assert_eq!(value.len(), 2);
    }
}
