//! Story generation entry point.

use crate::component::Module;
use crate::locate::{locate, resolve_file_info};
use crate::palette::{Acknowledge, Controls, EchoControls, Enumeration, LogAcknowledge};
use crate::story::{emit_story, StoryEnv, StoryRegistry};
use crate::types::{LocateError, PropContext, StoryId};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::rc::Rc;

/// Caller hook computing the default of a prop.
pub type DefineDefault = Box<dyn Fn(&PropContext<'_>) -> Option<Value>>;

/// Caller hook computing the choices of a prop, turning it into a select.
pub type DefineEnum = Box<dyn Fn(&PropContext<'_>) -> Option<Enumeration>>;

/// File discovery and module loading.
pub trait FilesContext {
    /// Every discoverable file path, in discovery order.
    fn keys(&self) -> Vec<String>;

    /// Load the module of a file. `None` when it cannot be loaded.
    fn load(&self, key: &str) -> Option<Module>;
}

/// Files and modules held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryFiles {
    files: IndexMap<String, Option<Module>>,
}

impl MemoryFiles {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with its module.
    pub fn with_module(mut self, path: impl Into<String>, module: Module) -> Self {
        self.files.insert(path.into(), Some(module));
        self
    }

    /// Add a file whose module cannot be loaded.
    pub fn with_missing(mut self, path: impl Into<String>) -> Self {
        self.files.insert(path.into(), None);
        self
    }
}

impl FilesContext for MemoryFiles {
    fn keys(&self) -> Vec<String> {
        self.files.keys().cloned().collect()
    }

    fn load(&self, key: &str) -> Option<Module> {
        self.files.get(key).cloned().flatten()
    }
}

/// Options for [`generate_stories`].
pub struct GenerateOptions<'r> {
    /// Extra bindings merged into every template-style story.
    pub plugins: Map<String, Value>,
    pub define_default: DefineDefault,
    pub define_enum: DefineEnum,
    /// Without a files context nothing is generated.
    pub files_context: Option<Box<dyn FilesContext>>,
    pub stories_of: &'r mut dyn StoryRegistry,
    pub controls: Rc<dyn Controls>,
    pub acknowledge: Rc<dyn Acknowledge>,
}

impl<'r> GenerateOptions<'r> {
    /// Options registering into `registry`, with no-op hooks, the headless
    /// control library and the logging acknowledgment sink.
    pub fn new(registry: &'r mut dyn StoryRegistry) -> Self {
        Self {
            plugins: Map::new(),
            define_default: Box::new(|_| None),
            define_enum: Box::new(|_| None),
            files_context: None,
            stories_of: registry,
            controls: Rc::new(EchoControls),
            acknowledge: Rc::new(LogAcknowledge),
        }
    }

    pub fn with_plugins(mut self, plugins: Map<String, Value>) -> Self {
        self.plugins = plugins;
        self
    }

    pub fn with_define_default(
        mut self,
        define_default: impl Fn(&PropContext<'_>) -> Option<Value> + 'static,
    ) -> Self {
        self.define_default = Box::new(define_default);
        self
    }

    pub fn with_define_enum(
        mut self,
        define_enum: impl Fn(&PropContext<'_>) -> Option<Enumeration> + 'static,
    ) -> Self {
        self.define_enum = Box::new(define_enum);
        self
    }

    pub fn with_files_context(mut self, files: impl FilesContext + 'static) -> Self {
        self.files_context = Some(Box::new(files));
        self
    }

    pub fn with_controls(mut self, controls: impl Controls + 'static) -> Self {
        self.controls = Rc::new(controls);
        self
    }

    pub fn with_acknowledge(mut self, acknowledge: Rc<dyn Acknowledge>) -> Self {
        self.acknowledge = acknowledge;
        self
    }
}

/// Outcome of a generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    /// Registered stories, in registration order.
    pub registered: Vec<StoryId>,
    /// Files that were skipped, with the reason.
    pub diagnostics: Vec<LocateError>,
}

impl GenerateReport {
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Generate and register a story for every discovered component.
///
/// Files whose module is missing or has no detectable component are logged
/// and skipped; the run itself never fails.
pub fn generate_stories(options: GenerateOptions<'_>) -> GenerateReport {
    let mut report = GenerateReport::default();
    let GenerateOptions {
        plugins,
        define_default,
        define_enum,
        files_context,
        stories_of,
        controls,
        acknowledge,
    } = options;

    let Some(files) = files_context else {
        return report;
    };

    let env = Rc::new(StoryEnv {
        plugins,
        define_default,
        define_enum,
        controls,
        acknowledge,
    });

    for file in files.keys() {
        let info = resolve_file_info(&file);
        let module = files.load(&file).map(Rc::new);

        match locate(module, &info) {
            Ok(Some(record)) => {
                let id = emit_story(record, &env, stories_of);
                tracing::debug!("registered story {}/{}", id.group, id.name);
                report.registered.push(id);
            }
            Ok(None) => {}
            Err(err) => {
                tracing::error!("{}", err);
                report.diagnostics.push(err);
            }
        }
    }

    report
}
