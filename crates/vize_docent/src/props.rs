//! Prop declaration collection.
//!
//! Props come from three layers, each overriding the previous one on name
//! collision: mixin props, the component's own props, and the typed-props
//! pair. Key order follows first insertion.

use crate::component::{
    ComponentDefinition, ComponentOptions, DeclaredDefault, PropDeclaration, PropMap, TypeConstructor,
    TypeMarker,
};
use crate::types::ComponentRecord;

/// Name of the pass-through slot prop added to template-style stories.
pub const SLOT_PROP: &str = "SLOT";

/// Option scopes of a component definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionScope {
    /// `component.options`
    Options,
    /// `component.$options`
    InstanceOptions,
    /// Fields of the definition itself.
    Own,
}

/// Scopes in lookup order.
pub const LOOKUP_ORDER: [OptionScope; 3] = [
    OptionScope::Options,
    OptionScope::InstanceOptions,
    OptionScope::Own,
];

impl OptionScope {
    /// The options held by `component` in this scope.
    pub fn options(self, component: &ComponentDefinition) -> Option<&ComponentOptions> {
        match self {
            Self::Options => component.options.as_ref(),
            Self::InstanceOptions => component.instance_options.as_ref(),
            Self::Own => Some(&component.own),
        }
    }
}

/// Find an option on a component, scanning scopes in [`LOOKUP_ORDER`].
///
/// The first scope where `pick` yields a value wins.
pub fn find_option<'c, T: ?Sized>(
    component: &'c ComponentDefinition,
    pick: impl Fn(&'c ComponentOptions) -> Option<&'c T>,
) -> Option<&'c T> {
    LOOKUP_ORDER
        .iter()
        .filter_map(|scope| scope.options(component))
        .find_map(pick)
}

/// Props contributed by mixins, merged in mixin order.
pub fn mixin_props(component: &ComponentDefinition) -> PropMap {
    let mut props = PropMap::default();
    let Some(mixins) = find_option(component, |o| o.mixins.as_ref()) else {
        return props;
    };

    for mixin in mixins {
        if let Some(mixin_props) = &mixin.props {
            for (name, prop) in mixin_props {
                props.insert(name.clone(), prop.clone());
            }
        }
    }
    props
}

/// Declarations synthesized from `propTypes` and `defaultProps`.
pub fn typed_props(component: &ComponentDefinition) -> PropMap {
    let Some(prop_types) = &component.prop_types else {
        return PropMap::default();
    };

    prop_types
        .iter()
        .map(|(name, validator)| {
            let prop = PropDeclaration {
                type_marker: Some(validator.clone()),
                default: component
                    .default_props
                    .get(name)
                    .cloned()
                    .map(DeclaredDefault::Literal),
            };
            (name.clone(), prop)
        })
        .collect()
}

/// All props declared by a component.
pub fn collect_props(component: &ComponentDefinition) -> PropMap {
    let mut props = mixin_props(component);

    if let Some(direct) = find_option(component, |o| o.props.as_ref()) {
        for (name, prop) in direct {
            props.insert(name.clone(), prop.clone());
        }
    }
    props.extend(typed_props(component));

    props
}

/// Props a story resolves controls for.
///
/// Template-style components also get the [`SLOT_PROP`] text prop.
pub fn story_props(record: &ComponentRecord) -> PropMap {
    let mut props = collect_props(&record.component);
    if record.style.has_slot_prop() {
        props.insert(
            SLOT_PROP.to_string(),
            PropDeclaration::typed(TypeMarker::Constructor(TypeConstructor::String)),
        );
    }
    props
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn component(value: serde_json::Value) -> ComponentDefinition {
        serde_json::from_value(value).unwrap()
    }

    fn names(props: &PropMap) -> Vec<&str> {
        props.keys().map(String::as_str).collect()
    }

    fn literal(prop: &PropDeclaration) -> serde_json::Value {
        prop.default.as_ref().unwrap().materialize()
    }

    #[test]
    fn test_lookup_order() {
        let c = component(json!({
            "options": { "props": { "fromOptions": "String" } },
            "$options": { "props": { "fromInstance": "String" } },
            "props": { "own": "String" }
        }));
        assert_eq!(names(&collect_props(&c)), vec!["fromOptions"]);

        let c = component(json!({
            "options": {},
            "$options": { "props": { "fromInstance": "String" } },
            "props": { "own": "String" }
        }));
        assert_eq!(names(&collect_props(&c)), vec!["fromInstance"]);

        let c = component(json!({ "props": { "own": "String" } }));
        assert_eq!(names(&collect_props(&c)), vec!["own"]);

        assert!(collect_props(&ComponentDefinition::default()).is_empty());
    }

    #[test]
    fn test_direct_props_unchanged_without_mixins() {
        let c = component(json!({
            "props": {
                "label": { "type": "String", "default": "hi" },
                "count": { "type": "Number", "default": 2 },
                "open": "Boolean"
            }
        }));
        let props = collect_props(&c);

        assert_eq!(names(&props), vec!["label", "count", "open"]);
        assert_eq!(literal(&props["label"]), json!("hi"));
        assert_eq!(literal(&props["count"]), json!(2));
    }

    #[test]
    fn test_own_props_win_over_mixins() {
        let c = component(json!({
            "mixins": [
                { "props": { "x": { "default": "first" }, "y": { "default": 1 } } },
                { "props": { "x": { "default": "second" } } }
            ],
            "props": { "x": { "default": "own" }, "z": {} }
        }));
        let props = collect_props(&c);

        assert_eq!(names(&props), vec!["x", "y", "z"]);
        assert_eq!(literal(&props["x"]), json!("own"));
        assert_eq!(literal(&props["y"]), json!(1));
    }

    #[test]
    fn test_later_mixin_wins() {
        let c = component(json!({
            "mixins": [
                { "props": { "x": { "default": "first" } } },
                {},
                { "props": { "x": { "default": "second" } } }
            ]
        }));
        assert_eq!(literal(&collect_props(&c)["x"]), json!("second"));
    }

    #[test]
    fn test_mixins_found_through_options() {
        let c = component(json!({
            "options": { "mixins": [{ "props": { "fromMixin": "String" } }] },
            "mixins": [{ "props": { "ignored": "String" } }]
        }));
        assert_eq!(names(&collect_props(&c)), vec!["fromMixin"]);
    }

    #[test]
    fn test_typed_props_layered_on_top() {
        let c = component(json!({
            "props": { "label": { "default": "direct" } },
            "propTypes": { "label": "string", "size": "number" },
            "defaultProps": { "label": "typed" }
        }));
        let props = collect_props(&c);

        assert_eq!(names(&props), vec!["label", "size"]);
        assert_eq!(literal(&props["label"]), json!("typed"));
        assert!(matches!(
            props["label"].type_marker,
            Some(TypeMarker::Validator(ref v)) if v == "string"
        ));
        assert!(props["size"].default.is_none());
    }

    #[test]
    fn test_find_option_returns_first_scope() {
        let c = component(json!({
            "$options": { "mixins": [] },
            "mixins": [{ "props": { "a": "String" } }]
        }));
        let mixins = find_option(&c, |o| o.mixins.as_ref()).unwrap();
        assert!(mixins.is_empty());
    }

    #[test]
    fn test_empty_props_scope_wins() {
        let c = component(json!({
            "options": { "props": {} },
            "props": { "own": "String" }
        }));
        assert!(collect_props(&c).is_empty());
    }
}
