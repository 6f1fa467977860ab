//! # vize_docent
//!
//! Docent - Automatic stories with interactive controls for Vue and React components.
//!
//! ## Name Origin
//!
//! A **docent** guides visitors through a museum, presenting each piece
//! without being asked. `vize_docent` walks a set of component modules,
//! works out what each component accepts, and presents every one of them as
//! a story with live controls - no hand-written story files needed.
//!
//! ## Pipeline
//!
//! 1. **Resolve** a discovered file path into a logical name and group
//!    ([`locate::resolve_file_info`]).
//! 2. **Locate** the component in the loaded module ([`locate::locate`]).
//! 3. **Infer** its props: mixins, own props and typed props are merged
//!    ([`props::collect_props`]) and each prop is classified
//!    ([`palette::infer_prop_kind`]).
//! 4. **Emit** one story per component, with a control bound to every prop
//!    ([`generate_stories`]).
//!
//! Template-style (Vue options) components render through a markup
//! template; function-style (React class) components are instantiated with
//! plain values.
//!
//! ## Usage
//!
//! ```rust
//! use vize_docent::component::Module;
//! use vize_docent::story::RecordingRegistry;
//! use vize_docent::{generate_stories, GenerateOptions, MemoryFiles};
//!
//! let module: Module = serde_json::from_str(r#"{
//!   "default": { "props": { "label": { "type": "String", "default": "hi" } } }
//! }"#).unwrap();
//! let files = MemoryFiles::new().with_module("./atoms/Button.vue", module);
//!
//! let mut registry = RecordingRegistry::new();
//! let report = generate_stories(GenerateOptions::new(&mut registry).with_files_context(files));
//!
//! assert_eq!(report.registered.len(), 1);
//! let story = registry.story("atoms", "Button").unwrap().render();
//! assert!(story.as_template().unwrap().template.contains(":label=\"label\""));
//! ```

pub mod component;
pub mod config;
pub mod generate;
pub mod locate;
pub mod palette;
pub mod props;
pub mod story;
pub mod types;

// Re-exports for convenience
pub use config::{load_config, ConfigError, DocentConfig};
pub use generate::{
    generate_stories, DefineDefault, DefineEnum, FilesContext, GenerateOptions, GenerateReport,
    MemoryFiles,
};
pub use types::{ComponentRecord, ComponentStyle, FileInfo, LocateError, PropContext, StoryId};
