//! Component definitions as handed over by the module loader.
//!
//! A loaded module is an ordered list of exports. Each export is either a
//! component definition or an empty (falsy) value. Definitions carry their
//! props in up to three option scopes (`options`, `$options` and the
//! definition itself), optional mixins, and the typed-props pair
//! (`propTypes` / `defaultProps`) used by function-style components.
//!
//! Every type here deserializes from a JSON manifest so that a bundler-side
//! extractor can describe modules without running them:
//!
//! ```
//! use vize_docent::component::Module;
//!
//! let module: Module = serde_json::from_str(r#"{
//!   "default": { "props": { "label": { "type": "String", "default": "hi" } } }
//! }"#).unwrap();
//! assert!(module.get("default").is_some());
//! ```

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

/// Ordered prop declarations keyed by prop name.
pub type PropMap = IndexMap<String, PropDeclaration>;

/// A loaded module: exports in the order the module lists them.
#[derive(Debug, Clone, Default)]
pub struct Module {
    exports: Vec<(String, Export)>,
}

impl Module {
    /// Create a module with no exports.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an export. A name that is already exported is replaced in place.
    pub fn with_export(mut self, name: impl Into<String>, export: Export) -> Self {
        let name = name.into();
        match self.exports.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = export,
            None => self.exports.push((name, export)),
        }
        self
    }

    /// Shorthand for exporting a component definition.
    #[inline]
    pub fn with_component(self, name: impl Into<String>, component: ComponentDefinition) -> Self {
        self.with_export(name, Export::Component(Rc::new(component)))
    }

    /// Look up an export by name.
    pub fn get(&self, name: &str) -> Option<&Export> {
        self.exports
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, export)| export)
    }

    /// First export in module order.
    #[inline]
    pub fn first(&self) -> Option<&(String, Export)> {
        self.exports.first()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.exports.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.exports.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Export)> {
        self.exports.iter().map(|(name, export)| (name.as_str(), export))
    }
}

impl<'de> Deserialize<'de> for Module {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let exports = IndexMap::<String, Export>::deserialize(deserializer)?;
        Ok(Self {
            exports: exports.into_iter().collect(),
        })
    }
}

/// A single module export.
#[derive(Debug, Clone)]
pub enum Export {
    /// A component definition.
    Component(Rc<ComponentDefinition>),
    /// A truthy value that is not a component definition.
    Value(Value),
    /// A falsy value.
    Empty,
}

impl Export {
    /// Whether the export counts as present when probing named slots.
    #[inline]
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Empty)
    }

    #[inline]
    pub fn as_component(&self) -> Option<&Rc<ComponentDefinition>> {
        match self {
            Self::Component(component) => Some(component),
            Self::Value(_) | Self::Empty => None,
        }
    }
}

impl<'de> Deserialize<'de> for Export {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            value @ Value::Object(_) => ComponentDefinition::deserialize(value)
                .map(|component| Self::Component(Rc::new(component)))
                .map_err(D::Error::custom),
            value if is_truthy(&value) => Ok(Self::Value(value)),
            _ => Ok(Self::Empty),
        }
    }
}

/// Truthiness of a JSON value: `false`, `null`, `0` and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// A component definition in either supported style.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDefinition {
    /// Options attached to a constructor produced by `Vue.extend`.
    #[serde(default)]
    pub options: Option<ComponentOptions>,

    /// Options attached to a component instance.
    #[serde(default, rename = "$options")]
    pub instance_options: Option<ComponentOptions>,

    /// Options declared directly on the definition.
    #[serde(flatten)]
    pub own: ComponentOptions,

    /// Typed-props validators, keyed by prop name.
    #[serde(default, deserialize_with = "deserialize_prop_types")]
    pub prop_types: Option<IndexMap<String, TypeMarker>>,

    /// Literal defaults paired with `prop_types`.
    #[serde(default)]
    pub default_props: IndexMap<String, Value>,

    /// Prototype markers of class components.
    #[serde(default)]
    pub prototype: Option<Prototype>,
}

impl ComponentDefinition {
    /// A plain options component declaring `props` directly.
    pub fn with_props(props: PropMap) -> Self {
        Self {
            own: ComponentOptions {
                props: Some(props),
                mixins: None,
            },
            ..Self::default()
        }
    }

    /// Whether the definition carries the class-component render marker.
    #[inline]
    pub fn is_react_component(&self) -> bool {
        self.prototype
            .as_ref()
            .is_some_and(|prototype| prototype.is_react_component)
    }
}

/// Options that may appear in any option scope (and on mixins).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComponentOptions {
    /// Declared props.
    #[serde(default, deserialize_with = "deserialize_props")]
    pub props: Option<PropMap>,

    /// Mixins composed into the component, in declaration order.
    #[serde(default)]
    pub mixins: Option<Vec<ComponentOptions>>,
}

/// Prototype markers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prototype {
    /// React sets this to `{}`; any truthy marker counts.
    #[serde(default, deserialize_with = "deserialize_marker")]
    pub is_react_component: bool,
}

/// One declared prop.
#[derive(Debug, Clone, Default)]
pub struct PropDeclaration {
    /// The `type` entry, if any.
    pub type_marker: Option<TypeMarker>,
    /// The `default` entry, if any.
    pub default: Option<DeclaredDefault>,
}

impl PropDeclaration {
    /// A declaration with only a type marker.
    #[inline]
    pub fn typed(marker: TypeMarker) -> Self {
        Self {
            type_marker: Some(marker),
            default: None,
        }
    }

    /// Set a literal default.
    #[inline]
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(DeclaredDefault::Literal(value));
        self
    }

    /// Set a default producer.
    #[inline]
    pub fn with_producer(mut self, producer: impl Fn() -> Value + 'static) -> Self {
        self.default = Some(DeclaredDefault::producer(producer));
        self
    }

    /// Build a declaration from its JSON form.
    ///
    /// Objects read their `type` and `default` entries; any other non-null
    /// value is the `label: String` shorthand and is taken as the type.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(mut entries) => Self {
                type_marker: entries.remove("type").and_then(TypeMarker::from_json),
                default: entries.remove("default").map(DeclaredDefault::Literal),
            },
            Value::Null => Self::default(),
            shorthand => Self {
                type_marker: TypeMarker::from_json(shorthand),
                default: None,
            },
        }
    }
}

impl<'de> Deserialize<'de> for PropDeclaration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_json)
    }
}

/// The `type` entry of a prop declaration.
#[derive(Clone)]
pub enum TypeMarker {
    /// A plain label such as `"color"`, used as the classification as-is.
    Label(String),
    /// The `File` designator.
    File,
    /// A constructor that can be called without arguments.
    Constructor(TypeConstructor),
    /// A typed-props validator. Calling one without props always fails.
    Validator(String),
    /// A list of accepted types. Not invocable.
    Union(Vec<TypeMarker>),
}

impl TypeMarker {
    /// Resolve a global name the way it reads in component source.
    pub fn from_name(name: &str) -> Self {
        if name == "File" {
            return Self::File;
        }
        match TypeConstructor::from_global(name) {
            Some(constructor) => Self::Constructor(constructor),
            None => Self::Label(name.to_string()),
        }
    }

    /// Build a marker from its JSON form. `null` and non-string scalars carry no type.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::String(name) => Some(Self::from_name(&name)),
            Value::Array(items) => Some(Self::Union(
                items.into_iter().filter_map(Self::from_json).collect(),
            )),
            _ => None,
        }
    }

    /// Call the marker with no arguments.
    ///
    /// Returns `None` when the marker is not invocable.
    pub fn invoke(&self) -> Option<Result<RuntimeKind, ConstructError>> {
        match self {
            Self::Constructor(constructor) => Some(constructor.call()),
            Self::Validator(name) => Some(Err(ConstructError::Validator { name: name.clone() })),
            Self::Label(_) | Self::File | Self::Union(_) => None,
        }
    }
}

impl fmt::Debug for TypeMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label(label) => f.debug_tuple("Label").field(label).finish(),
            Self::File => f.write_str("File"),
            Self::Constructor(constructor) => {
                f.debug_tuple("Constructor").field(constructor).finish()
            }
            Self::Validator(name) => f.debug_tuple("Validator").field(name).finish(),
            Self::Union(markers) => f.debug_tuple("Union").field(markers).finish(),
        }
    }
}

/// Callable type constructors.
#[derive(Clone)]
pub enum TypeConstructor {
    String,
    Number,
    Boolean,
    Object,
    Array,
    Function,
    Date,
    Symbol,
    /// A class; calling it without `new` fails.
    Class(String),
    /// A caller-provided constructor.
    Custom {
        name: String,
        call: Rc<dyn Fn() -> Result<RuntimeKind, ConstructError>>,
    },
}

impl TypeConstructor {
    /// Map a global constructor name to its constructor.
    pub fn from_global(name: &str) -> Option<Self> {
        let constructor = match name {
            "String" => Self::String,
            "Number" => Self::Number,
            "Boolean" => Self::Boolean,
            "Object" => Self::Object,
            "Array" => Self::Array,
            "Function" => Self::Function,
            "Date" => Self::Date,
            "Symbol" => Self::Symbol,
            _ => return None,
        };
        Some(constructor)
    }

    /// Wrap a caller-provided constructor.
    pub fn custom(
        name: impl Into<String>,
        call: impl Fn() -> Result<RuntimeKind, ConstructError> + 'static,
    ) -> Self {
        Self::Custom {
            name: name.into(),
            call: Rc::new(call),
        }
    }

    /// Call the constructor with no arguments and report the kind of the result.
    pub fn call(&self) -> Result<RuntimeKind, ConstructError> {
        match self {
            Self::String => Ok(RuntimeKind::String),
            Self::Number => Ok(RuntimeKind::Number),
            Self::Boolean => Ok(RuntimeKind::Boolean),
            Self::Object => Ok(RuntimeKind::Object),
            Self::Array => Ok(RuntimeKind::Array),
            Self::Function => Ok(RuntimeKind::Function),
            // `Date()` without `new` returns the current time as a string.
            Self::Date => Ok(RuntimeKind::String),
            Self::Symbol => Ok(RuntimeKind::Symbol),
            Self::Class(name) => Err(ConstructError::Class { name: name.clone() }),
            Self::Custom { call, .. } => call(),
        }
    }
}

impl fmt::Debug for TypeConstructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("String"),
            Self::Number => f.write_str("Number"),
            Self::Boolean => f.write_str("Boolean"),
            Self::Object => f.write_str("Object"),
            Self::Array => f.write_str("Array"),
            Self::Function => f.write_str("Function"),
            Self::Date => f.write_str("Date"),
            Self::Symbol => f.write_str("Symbol"),
            Self::Class(name) => f.debug_tuple("Class").field(name).finish(),
            Self::Custom { name, .. } => f.debug_struct("Custom").field("name", name).finish(),
        }
    }
}

/// Error raised when a type marker cannot be called bare.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstructError {
    #[error("Validator '{name}' cannot be called without props")]
    Validator { name: String },

    #[error("Class constructor '{name}' cannot be invoked without 'new'")]
    Class { name: String },

    #[error("Constructor '{name}' failed: {message}")]
    Failed { name: String, message: String },
}

/// Runtime kind of a value, as reported by `typeof`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeKind {
    Undefined,
    Boolean,
    Number,
    String,
    Object,
    Array,
    Function,
    Symbol,
    BigInt,
}

impl RuntimeKind {
    /// Kind of a JSON literal. `null` is an object.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) | Value::Null => Self::Object,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Object => "object",
            Self::Array => "array",
            Self::Function => "function",
            Self::Symbol => "symbol",
            Self::BigInt => "bigint",
        }
    }
}

/// The `default` entry of a prop declaration.
#[derive(Clone)]
pub enum DeclaredDefault {
    /// A literal value.
    Literal(Value),
    /// A zero-argument producer, called for every render.
    Producer(Rc<dyn Fn() -> Value>),
}

impl DeclaredDefault {
    #[inline]
    pub fn producer(producer: impl Fn() -> Value + 'static) -> Self {
        Self::Producer(Rc::new(producer))
    }

    /// The default value: producers are called, literals cloned.
    pub fn materialize(&self) -> Value {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Producer(producer) => producer(),
        }
    }

    /// Runtime kind of the default entry itself. Producers are functions.
    pub fn runtime_kind(&self) -> RuntimeKind {
        match self {
            Self::Literal(value) => RuntimeKind::of(value),
            Self::Producer(_) => RuntimeKind::Function,
        }
    }
}

impl fmt::Debug for DeclaredDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

/// `props` accepts both the object form and the array-of-names form.
fn deserialize_props<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<PropMap>, D::Error> {
    let props = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(None),
        Value::Object(entries) => entries
            .into_iter()
            .map(|(name, value)| (name, PropDeclaration::from_json(value)))
            .collect(),
        Value::Array(names) => names
            .into_iter()
            .filter_map(|name| match name {
                Value::String(name) => Some((name, PropDeclaration::default())),
                _ => None,
            })
            .collect(),
        other => {
            return Err(D::Error::custom(format!(
                "expected props object or list, found {other}"
            )))
        }
    };
    Ok(Some(props))
}

fn deserialize_marker<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Value::deserialize(deserializer).map(|marker| is_truthy(&marker))
}

/// `propTypes` entries are validator names, e.g. `"string"` or `"bool"`.
fn deserialize_prop_types<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<IndexMap<String, TypeMarker>>, D::Error> {
    let entries = Option::<IndexMap<String, String>>::deserialize(deserializer)?;
    Ok(entries.map(|entries| {
        entries
            .into_iter()
            .map(|(name, validator)| (name, TypeMarker::Validator(validator)))
            .collect()
    }))
}
