//! Placeholder values that never fail on missing members.
//!
//! Empty object and array defaults, as well as the story store, are wrapped
//! in a [`Placeholder`]. Reading a member that is not there yields a
//! [`StubFn`] instead of an error, so a consuming UI can render something
//! harmless when it reaches for nested fields.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// What a placeholder stands in for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderOwner {
    /// The default value of a prop.
    Prop(String),
    /// The story data store.
    Store,
}

/// A structured value whose missing members resolve to stubs.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    value: Value,
    owner: PlaceholderOwner,
}

impl Placeholder {
    /// Wrap the default value of a prop.
    #[inline]
    pub fn for_prop(prop_name: impl Into<String>, value: Value) -> Self {
        Self {
            value,
            owner: PlaceholderOwner::Prop(prop_name.into()),
        }
    }

    /// An empty store.
    #[inline]
    pub fn store() -> Self {
        Self {
            value: Value::Object(Map::new()),
            owner: PlaceholderOwner::Store,
        }
    }

    /// Whether a value should be wrapped: it serializes to `{}` or `[]`.
    #[inline]
    pub fn wraps(value: &Value) -> bool {
        match value {
            Value::Object(entries) => entries.is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => false,
        }
    }

    /// The wrapped value.
    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[inline]
    pub fn owner(&self) -> &PlaceholderOwner {
        &self.owner
    }

    /// Read a member. Members that are not present resolve to a stub.
    pub fn get(&self, key: &str) -> Member<'_> {
        let present = match &self.value {
            Value::Object(entries) => entries.get(key),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };

        match present {
            Some(value) => Member::Value(value),
            None => Member::Stub(StubFn {
                key: key.to_string(),
                owner: self.owner.clone(),
            }),
        }
    }
}

impl Serialize for Placeholder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

/// Result of reading a placeholder member.
#[derive(Debug, Clone, PartialEq)]
pub enum Member<'p> {
    Value(&'p Value),
    Stub(StubFn),
}

impl Member<'_> {
    #[inline]
    pub fn is_stub(&self) -> bool {
        matches!(self, Self::Stub(_))
    }
}

/// A no-op callable describing where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubFn {
    key: String,
    owner: PlaceholderOwner,
}

impl StubFn {
    /// Calling a stub does nothing.
    #[inline]
    pub fn call(&self) {}

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for StubFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.owner {
            PlaceholderOwner::Prop(prop) => write!(
                f,
                "Proxy property \"{}\" of prop \"{}\" by storybook automation",
                self.key, prop
            ),
            PlaceholderOwner::Store => write!(
                f,
                "Proxy property \"{}\" from store by storybook automation",
                self.key
            ),
        }
    }
}
