//! Palette type definitions.

use super::controls::Acknowledge;
use super::placeholder::Placeholder;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

/// Choices of a select control, label to value.
pub type Enumeration = IndexMap<String, Value>;

/// Classification of a prop.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropKind {
    Boolean,
    Number,
    Text,
    /// A fixed set of choices, assigned by the caller's enumeration hook.
    Select,
    File,
    Function,
    Object,
    Array,
    Color,
    Date,
    /// Single choice rendered as radio buttons.
    Radios,
    /// Choices rendered as checkboxes or a multi-select.
    Options,
    /// File picker returning data URLs, unlike [`PropKind::File`].
    Files,
    Button,
    /// Any classification without a dedicated control.
    Other(String),
}

impl PropKind {
    /// Parse a classification label. `string` and `text` both mean text.
    pub fn from_label(label: &str) -> Self {
        match label {
            "string" | "text" => Self::Text,
            "boolean" => Self::Boolean,
            "number" => Self::Number,
            "select" => Self::Select,
            "file" => Self::File,
            "function" => Self::Function,
            "object" => Self::Object,
            "array" => Self::Array,
            "color" => Self::Color,
            "date" => Self::Date,
            "radios" => Self::Radios,
            "options" => Self::Options,
            "files" => Self::Files,
            "button" => Self::Button,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Text => "text",
            Self::Select => "select",
            Self::File => "file",
            Self::Function => "function",
            Self::Object => "object",
            Self::Array => "array",
            Self::Color => "color",
            Self::Date => "date",
            Self::Radios => "radios",
            Self::Options => "options",
            Self::Files => "files",
            Self::Button => "button",
            Self::Other(label) => label,
        }
    }

    /// Control used for this kind. Kinds without a control of their own use text.
    pub fn control_kind(&self) -> ControlKind {
        match self {
            Self::Boolean => ControlKind::Boolean,
            Self::Number => ControlKind::Number,
            Self::Select => ControlKind::Select,
            Self::Object => ControlKind::Object,
            Self::Array => ControlKind::Array,
            Self::Color => ControlKind::Color,
            Self::Date => ControlKind::Date,
            Self::Radios => ControlKind::Radios,
            Self::Options => ControlKind::Options,
            Self::Files => ControlKind::Files,
            Self::Button => ControlKind::Button,
            Self::Text | Self::File | Self::Function | Self::Other(_) => ControlKind::Text,
        }
    }

    /// Default used when neither the caller nor the declaration provides one.
    pub fn fallback_default(&self, prop_name: &str) -> ArgValue {
        match self {
            Self::Boolean => ArgValue::Json(Value::Bool(false)),
            Self::Number => ArgValue::Json(Value::from(0)),
            Self::Object => ArgValue::Json(Value::Object(Default::default())),
            Self::Array => ArgValue::Json(Value::Array(Vec::new())),
            Self::Text | Self::Select => ArgValue::Json(Value::String(prop_name.to_string())),
            _ => ArgValue::Undefined,
        }
    }
}

impl fmt::Display for PropKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PropKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Interactive control widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ControlKind {
    /// Text input control.
    Text,
    /// Number input control.
    Number,
    /// Boolean toggle/checkbox.
    Boolean,
    /// Select dropdown.
    Select,
    /// Color picker.
    Color,
    /// Date picker.
    Date,
    /// Object/JSON editor.
    Object,
    /// Array editor.
    Array,
    /// Radio button group.
    Radios,
    /// Checkbox group or multi-select.
    Options,
    /// File picker.
    Files,
    /// Clickable button.
    Button,
}

impl Default for ControlKind {
    #[inline]
    fn default() -> Self {
        Self::Text
    }
}

/// A resolved default or control value.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum ArgValue {
    /// No value at all.
    #[default]
    Undefined,
    Json(Value),
    Placeholder(Placeholder),
}

impl ArgValue {
    #[inline]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// The JSON value, or `None` when undefined.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Undefined => None,
            Self::Json(value) => Some(value),
            Self::Placeholder(placeholder) => Some(placeholder.value()),
        }
    }

    /// Key under which the value is listed in an enumeration.
    pub fn choice_key(&self) -> String {
        match self.as_json() {
            None => "undefined".to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// Arguments for one control widget.
///
/// Select controls carry their choices; every other control carries only
/// the name and default.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlBinding {
    /// Prop name.
    pub name: String,
    /// Control type.
    pub control: ControlKind,
    /// Choices for select controls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Enumeration>,
    /// Default value.
    pub default_value: ArgValue,
}

impl ControlBinding {
    /// Create a binding for a non-select control.
    #[inline]
    pub fn new(name: impl Into<String>, control: ControlKind, default_value: ArgValue) -> Self {
        Self {
            name: name.into(),
            control,
            options: None,
            default_value,
        }
    }

    /// Create a select binding.
    #[inline]
    pub fn select(name: impl Into<String>, options: Enumeration, default_value: ArgValue) -> Self {
        Self {
            name: name.into(),
            control: ControlKind::Select,
            options: Some(options),
            default_value,
        }
    }
}

/// The value handed to a rendered component for one prop.
#[derive(Debug, Clone)]
pub enum InputValue {
    /// Live value read from a control.
    Control(ArgValue),
    /// An empty file handle.
    File(EmptyFile),
    /// A stand-in for a callback prop.
    Callback(StandInCallback),
}

impl InputValue {
    /// The control value, if this input is bound to a control.
    #[inline]
    pub fn as_control(&self) -> Option<&ArgValue> {
        match self {
            Self::Control(value) => Some(value),
            _ => None,
        }
    }
}

/// An empty, unnamed file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyFile;

impl EmptyFile {
    #[inline]
    pub fn name(&self) -> &str {
        ""
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &[]
    }
}

/// Callback passed for function-typed props.
///
/// Calling it acknowledges the prop name through the configured sink.
/// Failures of the sink are swallowed.
#[derive(Clone)]
pub struct StandInCallback {
    prop_name: String,
    acknowledge: Rc<dyn Acknowledge>,
}

impl StandInCallback {
    pub fn new(prop_name: impl Into<String>, acknowledge: Rc<dyn Acknowledge>) -> Self {
        Self {
            prop_name: prop_name.into(),
            acknowledge,
        }
    }

    #[inline]
    pub fn prop_name(&self) -> &str {
        &self.prop_name
    }

    pub fn call(&self) {
        if let Err(err) = self.acknowledge.acknowledge(&self.prop_name) {
            tracing::debug!("ignored acknowledgment failure for {}: {}", self.prop_name, err);
        }
    }
}

impl fmt::Debug for StandInCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandInCallback")
            .field("prop_name", &self.prop_name)
            .finish_non_exhaustive()
    }
}
