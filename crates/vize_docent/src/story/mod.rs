//! Story emission.
//!
//! Every located component is registered as one story under its group. The
//! registered render function resolves props and reads controls again on
//! each call, so stories always reflect the current control state.

mod registry;

pub use registry::{RecordedGroup, RecordedStory, RecordingRegistry};

use crate::component::{ComponentDefinition, PropMap};
use crate::generate::{DefineDefault, DefineEnum};
use crate::palette::{
    resolve_input, Acknowledge, Controls, InputValue, Placeholder, PropOverrides, ResolvedInput,
};
use crate::props::{collect_props, story_props};
use crate::types::{ComponentRecord, ComponentStyle, PropContext, StoryId};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fmt;
use std::rc::Rc;

/// Keys of a template story that plugins cannot override.
pub const RESERVED_TEMPLATE_KEYS: [&str; 4] = ["components", "template", "props", "store"];

/// Story decorators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decorator {
    /// Renders interactive controls for the story's bindings.
    WithKnobs,
}

/// Render function of a registered story.
pub type StoryFn = Box<dyn Fn() -> StoryRender>;

/// Story registration API of the host.
pub trait StoryRegistry {
    /// Open the story group named `kind`.
    fn stories_of(&mut self, kind: &str) -> Box<dyn StoryGroup + '_>;
}

/// A group of stories opened through [`StoryRegistry::stories_of`].
pub trait StoryGroup {
    fn add_decorator(&mut self, decorator: Decorator);
    fn add(&mut self, name: &str, render: StoryFn);
}

/// Output of a story render.
#[derive(Debug)]
pub enum StoryRender {
    Template(TemplateStory),
    Element(ElementStory),
}

impl StoryRender {
    #[inline]
    pub fn as_template(&self) -> Option<&TemplateStory> {
        match self {
            Self::Template(story) => Some(story),
            Self::Element(_) => None,
        }
    }

    #[inline]
    pub fn as_element(&self) -> Option<&ElementStory> {
        match self {
            Self::Element(story) => Some(story),
            Self::Template(_) => None,
        }
    }
}

/// Render context of a template-style story.
#[derive(Debug)]
pub struct TemplateStory {
    /// Extra bindings from the caller, minus [`RESERVED_TEMPLATE_KEYS`].
    pub plugins: Map<String, Value>,
    /// Component name to definition.
    pub components: IndexMap<String, Rc<ComponentDefinition>>,
    /// Markup rendering the component with every prop bound.
    pub template: String,
    /// Resolved props; each is exposed to the template as `{ default: value }`.
    pub props: IndexMap<String, ResolvedInput>,
    /// Data store whose missing members resolve to stubs.
    pub store: Placeholder,
}

impl TemplateStory {
    /// The `default` entry of a prop.
    pub fn prop_default(&self, name: &str) -> Option<&InputValue> {
        self.props.get(name).map(|input| &input.value)
    }
}

/// A function-style story: the component instantiated with plain values.
pub struct ElementStory {
    pub component: Rc<ComponentDefinition>,
    pub props: IndexMap<String, InputValue>,
}

impl fmt::Debug for ElementStory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementStory")
            .field("props", &self.props)
            .finish_non_exhaustive()
    }
}

/// Render the markup template of a template-style story.
///
/// Every declared prop is bound by name; content goes through `SLOT`.
pub fn render_template(component_name: &str, props: &PropMap) -> String {
    let mut template = String::with_capacity(64 + props.len() * 24);

    template.push('<');
    template.push_str(component_name);
    template.push('\n');

    let attrs: Vec<String> = props
        .keys()
        .map(|name| format!("  :{name}=\"{name}\""))
        .collect();
    template.push_str(&attrs.join("\n"));

    template.push_str("\n>{{ SLOT }}</");
    template.push_str(component_name);
    template.push('>');

    template
}

/// Shared state captured by every render function.
pub(crate) struct StoryEnv {
    pub plugins: Map<String, Value>,
    pub define_default: DefineDefault,
    pub define_enum: DefineEnum,
    pub controls: Rc<dyn Controls>,
    pub acknowledge: Rc<dyn Acknowledge>,
}

impl StoryEnv {
    /// Resolve every story prop of a component.
    pub fn resolve_props(&self, record: &ComponentRecord) -> IndexMap<String, ResolvedInput> {
        story_props(record)
            .into_iter()
            .map(|(name, prop)| {
                let context = PropContext {
                    component: record,
                    prop_name: &name,
                    prop: &prop,
                };
                let overrides = PropOverrides {
                    default: (self.define_default)(&context),
                    enumeration: (self.define_enum)(&context),
                };
                let input = resolve_input(
                    &name,
                    &prop,
                    overrides,
                    self.controls.as_ref(),
                    &self.acknowledge,
                );
                (name, input)
            })
            .collect()
    }

    fn template_story(&self, record: &ComponentRecord) -> TemplateStory {
        let mut plugins = self.plugins.clone();
        for key in RESERVED_TEMPLATE_KEYS {
            plugins.remove(key);
        }

        let mut components = IndexMap::new();
        components.insert(record.name.clone(), Rc::clone(&record.component));

        TemplateStory {
            plugins,
            components,
            template: render_template(&record.name, &collect_props(&record.component)),
            props: self.resolve_props(record),
            store: Placeholder::store(),
        }
    }

    fn element_story(&self, record: &ComponentRecord) -> ElementStory {
        ElementStory {
            component: Rc::clone(&record.component),
            props: self
                .resolve_props(record)
                .into_iter()
                .map(|(name, input)| (name, input.value))
                .collect(),
        }
    }
}

/// Register the story of a located component.
pub(crate) fn emit_story(
    record: ComponentRecord,
    env: &Rc<StoryEnv>,
    registry: &mut dyn StoryRegistry,
) -> StoryId {
    let id = StoryId {
        group: record.group.clone(),
        name: record.name.clone(),
    };

    let env = Rc::clone(env);
    let render: StoryFn = match record.style {
        ComponentStyle::Template => {
            Box::new(move || StoryRender::Template(env.template_story(&record)))
        }
        ComponentStyle::Function => {
            Box::new(move || StoryRender::Element(env.element_story(&record)))
        }
    };

    let mut group = registry.stories_of(&id.group);
    group.add_decorator(Decorator::WithKnobs);
    group.add(&id.name, render);

    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_template() {
        let component: ComponentDefinition = serde_json::from_value(json!({
            "props": { "label": "String", "disabled": "Boolean" }
        }))
        .unwrap();
        let template = render_template("Button", &collect_props(&component));

        insta::assert_snapshot!(template, @r#"
        <Button
          :label="label"
          :disabled="disabled"
        >{{ SLOT }}</Button>
        "#);
    }

    #[test]
    fn test_render_template_without_props() {
        let template = render_template("Divider", &PropMap::default());
        assert_eq!(template, "<Divider\n\n>{{ SLOT }}</Divider>");
    }

    #[test]
    fn test_render_accessors() {
        let story = StoryRender::Element(ElementStory {
            component: Rc::new(ComponentDefinition::default()),
            props: IndexMap::new(),
        });
        assert!(story.as_element().is_some());
        assert!(story.as_template().is_none());
    }
}
