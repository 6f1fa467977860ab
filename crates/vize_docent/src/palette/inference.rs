//! Prop kind inference from declarations.
//!
//! Precedence:
//! 1. a label type is used as-is
//! 2. the `File` designator
//! 3. invocable types are called and classified by what they produce
//! 4. the kind of the literal default, or text when there is none

use super::PropKind;
use crate::component::{PropDeclaration, RuntimeKind, TypeMarker};

/// Infer the kind of a declared prop.
pub fn infer_prop_kind(prop: &PropDeclaration) -> PropKind {
    let inferred = match &prop.type_marker {
        Some(TypeMarker::Label(label)) => Some(PropKind::from_label(label)),
        Some(TypeMarker::File) => Some(PropKind::File),
        Some(marker) => match marker.invoke() {
            Some(Ok(kind)) => Some(runtime_prop_kind(kind)),
            Some(Err(err)) => {
                tracing::trace!("type probe failed: {}", err);
                None
            }
            None => None,
        },
        None => None,
    };

    inferred.unwrap_or_else(|| match &prop.default {
        Some(default) => runtime_prop_kind(default.runtime_kind()),
        None => PropKind::Text,
    })
}

/// Map a runtime kind to a prop kind.
#[inline]
pub fn runtime_prop_kind(kind: RuntimeKind) -> PropKind {
    match kind {
        RuntimeKind::String => PropKind::Text,
        RuntimeKind::Number => PropKind::Number,
        RuntimeKind::Boolean => PropKind::Boolean,
        RuntimeKind::Object => PropKind::Object,
        RuntimeKind::Array => PropKind::Array,
        RuntimeKind::Function => PropKind::Function,
        RuntimeKind::Undefined | RuntimeKind::Symbol | RuntimeKind::BigInt => {
            PropKind::Other(kind.as_str().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{ConstructError, TypeConstructor};
    use serde_json::json;

    fn prop(value: serde_json::Value) -> PropDeclaration {
        PropDeclaration::from_json(value)
    }

    #[test]
    fn test_no_type_no_default_is_text() {
        assert_eq!(infer_prop_kind(&PropDeclaration::default()), PropKind::Text);
        assert_eq!(infer_prop_kind(&prop(json!({}))), PropKind::Text);
    }

    #[test]
    fn test_constructor_types() {
        assert_eq!(infer_prop_kind(&prop(json!("String"))), PropKind::Text);
        assert_eq!(infer_prop_kind(&prop(json!("Number"))), PropKind::Number);
        assert_eq!(infer_prop_kind(&prop(json!("Boolean"))), PropKind::Boolean);
        assert_eq!(infer_prop_kind(&prop(json!("Object"))), PropKind::Object);
        assert_eq!(infer_prop_kind(&prop(json!("Array"))), PropKind::Array);
        assert_eq!(infer_prop_kind(&prop(json!("Function"))), PropKind::Function);
        assert_eq!(infer_prop_kind(&prop(json!("Date"))), PropKind::Text);
        assert_eq!(
            infer_prop_kind(&prop(json!("Symbol"))),
            PropKind::Other("symbol".to_string())
        );
    }

    #[test]
    fn test_label_and_file() {
        assert_eq!(infer_prop_kind(&prop(json!({ "type": "color" }))), PropKind::Color);
        assert_eq!(infer_prop_kind(&prop(json!({ "type": "string" }))), PropKind::Text);
        assert_eq!(infer_prop_kind(&prop(json!({ "type": "File" }))), PropKind::File);
        assert_eq!(infer_prop_kind(&prop(json!({ "type": "radios" }))), PropKind::Radios);
        assert_eq!(infer_prop_kind(&prop(json!({ "type": "files" }))), PropKind::Files);
    }

    #[test]
    fn test_type_wins_over_default() {
        let p = prop(json!({ "type": "Number", "default": "12" }));
        assert_eq!(infer_prop_kind(&p), PropKind::Number);
    }

    #[test]
    fn test_failed_probe_falls_back_to_default() {
        let p = prop(json!({ "type": "Point", "default": { "x": 0 } }));
        assert_eq!(infer_prop_kind(&p), PropKind::Other("Point".to_string()));

        let p = PropDeclaration::typed(TypeMarker::Constructor(TypeConstructor::Class(
            "Point".to_string(),
        )))
        .with_default(json!({ "x": 0 }));
        assert_eq!(infer_prop_kind(&p), PropKind::Object);

        let p = PropDeclaration::typed(TypeMarker::Constructor(TypeConstructor::custom(
            "Broken",
            || {
                Err(ConstructError::Failed {
                    name: "Broken".to_string(),
                    message: "boom".to_string(),
                })
            },
        )));
        assert_eq!(infer_prop_kind(&p), PropKind::Text);
    }

    #[test]
    fn test_validators_use_default_kind() {
        let p = PropDeclaration::typed(TypeMarker::Validator("bool".to_string()))
            .with_default(json!(true));
        assert_eq!(infer_prop_kind(&p), PropKind::Boolean);

        let p = PropDeclaration::typed(TypeMarker::Validator("string".to_string()));
        assert_eq!(infer_prop_kind(&p), PropKind::Text);
    }

    #[test]
    fn test_union_is_not_invoked() {
        let p = prop(json!({ "type": ["String", "Number"], "default": 4 }));
        assert_eq!(infer_prop_kind(&p), PropKind::Number);
    }

    #[test]
    fn test_default_kinds() {
        assert_eq!(infer_prop_kind(&prop(json!({ "default": null }))), PropKind::Object);
        assert_eq!(infer_prop_kind(&prop(json!({ "default": [1] }))), PropKind::Array);
        assert_eq!(infer_prop_kind(&prop(json!({ "default": 1.5 }))), PropKind::Number);

        let producer = PropDeclaration::default().with_producer(|| json!([]));
        assert_eq!(infer_prop_kind(&producer), PropKind::Function);
    }

    #[test]
    fn test_custom_constructor() {
        let p = PropDeclaration::typed(TypeMarker::Constructor(TypeConstructor::custom(
            "Nothing",
            || Ok(RuntimeKind::Undefined),
        )));
        assert_eq!(infer_prop_kind(&p), PropKind::Other("undefined".to_string()));
    }
}
