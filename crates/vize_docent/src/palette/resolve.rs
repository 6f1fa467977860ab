//! Default value and control argument resolution.

use super::controls::{Acknowledge, Controls};
use super::inference::infer_prop_kind;
use super::placeholder::Placeholder;
use super::types::{
    ArgValue, ControlBinding, EmptyFile, Enumeration, InputValue, PropKind, StandInCallback,
};
use crate::component::PropDeclaration;
use serde_json::Value;
use std::rc::Rc;

/// One prop resolved for a single render.
#[derive(Debug, Clone)]
pub struct ResolvedInput {
    /// Prop name.
    pub name: String,
    /// Inferred classification.
    pub kind: PropKind,
    /// Control binding. File and function props have none.
    pub binding: Option<ControlBinding>,
    /// Value handed to the component.
    pub value: InputValue,
}

/// Caller-side overrides for one prop.
#[derive(Debug, Clone, Default)]
pub struct PropOverrides {
    /// Default computed by the caller's default hook.
    pub default: Option<Value>,
    /// Choices computed by the caller's enumeration hook.
    pub enumeration: Option<Enumeration>,
}

/// Resolve the default value of a prop.
///
/// The caller's default wins, then the declared default (producers are
/// called), then the fallback for `kind`. Empty objects and arrays are
/// wrapped in a [`Placeholder`].
pub fn resolve_default(
    prop_name: &str,
    prop: &PropDeclaration,
    kind: &PropKind,
    caller_default: Option<Value>,
) -> ArgValue {
    let declared = caller_default.or_else(|| prop.default.as_ref().map(|d| d.materialize()));

    match declared {
        Some(value) if Placeholder::wraps(&value) => {
            ArgValue::Placeholder(Placeholder::for_prop(prop_name, value))
        }
        Some(value) => ArgValue::Json(value),
        None => match kind.fallback_default(prop_name) {
            ArgValue::Json(value) if Placeholder::wraps(&value) => {
                ArgValue::Placeholder(Placeholder::for_prop(prop_name, value))
            }
            fallback => fallback,
        },
    }
}

/// Make sure the default is one of the choices.
///
/// A default missing from the enumeration is added under its own key.
pub fn insert_default_choice(enumeration: &mut Enumeration, default: &ArgValue) {
    let key = default.choice_key();
    if !enumeration.contains_key(&key) {
        let value = default.as_json().cloned().unwrap_or(Value::Null);
        enumeration.insert(key, value);
    }
}

/// Build the control binding of a prop.
///
/// Select bindings carry the enumeration; all others only name and default.
pub fn control_binding(
    prop_name: &str,
    prop: &PropDeclaration,
    kind: &PropKind,
    overrides: PropOverrides,
) -> ControlBinding {
    let default = resolve_default(prop_name, prop, kind, overrides.default);

    match overrides.enumeration {
        Some(mut enumeration) => {
            insert_default_choice(&mut enumeration, &default);
            ControlBinding::select(prop_name, enumeration, default)
        }
        None => ControlBinding::new(prop_name, kind.control_kind(), default),
    }
}

/// Resolve a prop into the value a rendered component receives.
///
/// An enumeration from the caller makes the prop a select, regardless of
/// its declared type.
pub fn resolve_input(
    prop_name: &str,
    prop: &PropDeclaration,
    overrides: PropOverrides,
    controls: &dyn Controls,
    acknowledge: &Rc<dyn Acknowledge>,
) -> ResolvedInput {
    let kind = if overrides.enumeration.is_some() {
        PropKind::Select
    } else {
        infer_prop_kind(prop)
    };

    let (binding, value) = match kind {
        PropKind::File => (None, InputValue::File(EmptyFile)),
        PropKind::Function => (
            None,
            InputValue::Callback(StandInCallback::new(prop_name, Rc::clone(acknowledge))),
        ),
        _ => {
            let binding = control_binding(prop_name, prop, &kind, overrides);
            let value = controls.value(&binding);
            (Some(binding), InputValue::Control(value))
        }
    };

    ResolvedInput {
        name: prop_name.to_string(),
        kind,
        binding,
        value,
    }
}
