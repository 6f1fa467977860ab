//! Core records shared across the pipeline.

use crate::component::{ComponentDefinition, Module, PropDeclaration};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Names derived from a discovered file path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// File name up to its first `.`.
    pub name: String,
    /// Containing directory name with leading dots stripped.
    pub parent: String,
    /// The original path.
    pub file: String,
}

/// The two recognized component styles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStyle {
    /// Options components rendered through a markup template.
    #[default]
    Template,
    /// Class or function components instantiated directly.
    Function,
}

impl ComponentStyle {
    /// Template-style stories expose a pass-through `SLOT` prop.
    #[inline]
    pub const fn has_slot_prop(self) -> bool {
        matches!(self, Self::Template)
    }
}

/// A located component, ready for inference and emission.
#[derive(Debug, Clone)]
pub struct ComponentRecord {
    pub style: ComponentStyle,
    /// Story group: the parent directory, or the component name when that is empty.
    pub group: String,
    /// Story name: the file's logical name.
    pub name: String,
    pub component: Rc<ComponentDefinition>,
    pub module: Rc<Module>,
}

/// Context handed to caller-supplied default and enumeration hooks.
#[derive(Debug, Clone, Copy)]
pub struct PropContext<'a> {
    pub component: &'a ComponentRecord,
    pub prop_name: &'a str,
    pub prop: &'a PropDeclaration,
}

/// Identifies a registered story.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoryId {
    pub group: String,
    pub name: String,
}

/// Non-fatal errors raised while locating a component.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocateError {
    #[error("No module found in {file}")]
    MissingModule { file: String },

    #[error("Cannot properly detect component in {file}")]
    UndetectableComponent { file: String },
}

impl LocateError {
    /// The file the error refers to.
    pub fn file(&self) -> &str {
        match self {
            Self::MissingModule { file } | Self::UndetectableComponent { file } => file,
        }
    }
}
