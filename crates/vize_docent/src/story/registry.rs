//! In-memory story registry.

use super::{Decorator, StoryFn, StoryGroup, StoryRegistry, StoryRender};
use std::fmt;

/// Collects registered stories in registration order.
///
/// Opening a group that already exists appends to it.
#[derive(Debug, Default)]
pub struct RecordingRegistry {
    groups: Vec<RecordedGroup>,
}

impl RecordingRegistry {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn groups(&self) -> &[RecordedGroup] {
        &self.groups
    }

    pub fn group(&self, kind: &str) -> Option<&RecordedGroup> {
        self.groups.iter().find(|g| g.kind == kind)
    }

    /// Find a story by group and name.
    pub fn story(&self, kind: &str, name: &str) -> Option<&RecordedStory> {
        self.group(kind)?.stories.iter().find(|s| s.name == name)
    }

    /// Total number of stories.
    pub fn story_count(&self) -> usize {
        self.groups.iter().map(|g| g.stories.len()).sum()
    }
}

impl StoryRegistry for RecordingRegistry {
    fn stories_of(&mut self, kind: &str) -> Box<dyn StoryGroup + '_> {
        let index = match self.groups.iter().position(|g| g.kind == kind) {
            Some(index) => index,
            None => {
                self.groups.push(RecordedGroup {
                    kind: kind.to_string(),
                    decorators: Vec::new(),
                    stories: Vec::new(),
                });
                self.groups.len() - 1
            }
        };
        Box::new(GroupHandle {
            group: &mut self.groups[index],
        })
    }
}

/// A recorded story group.
#[derive(Debug)]
pub struct RecordedGroup {
    pub kind: String,
    pub decorators: Vec<Decorator>,
    pub stories: Vec<RecordedStory>,
}

/// A recorded story.
pub struct RecordedStory {
    pub name: String,
    render: StoryFn,
}

impl RecordedStory {
    /// Run the story's render function.
    #[inline]
    pub fn render(&self) -> StoryRender {
        (self.render)()
    }
}

impl fmt::Debug for RecordedStory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordedStory")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

struct GroupHandle<'r> {
    group: &'r mut RecordedGroup,
}

impl StoryGroup for GroupHandle<'_> {
    fn add_decorator(&mut self, decorator: Decorator) {
        if !self.group.decorators.contains(&decorator) {
            self.group.decorators.push(decorator);
        }
    }

    fn add(&mut self, name: &str, render: StoryFn) {
        self.group.stories.push(RecordedStory {
            name: name.to_string(),
            render,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentDefinition;
    use crate::story::ElementStory;
    use indexmap::IndexMap;
    use std::rc::Rc;

    fn element() -> StoryFn {
        Box::new(|| {
            StoryRender::Element(ElementStory {
                component: Rc::new(ComponentDefinition::default()),
                props: IndexMap::new(),
            })
        })
    }

    #[test]
    fn test_groups_are_reused() {
        let mut registry = RecordingRegistry::new();
        {
            let mut group = registry.stories_of("atoms");
            group.add_decorator(Decorator::WithKnobs);
            group.add("Button", element());
        }
        {
            let mut group = registry.stories_of("atoms");
            group.add_decorator(Decorator::WithKnobs);
            group.add("Badge", element());
        }
        registry.stories_of("forms").add("Input", element());

        assert_eq!(registry.groups().len(), 2);
        assert_eq!(registry.story_count(), 3);
        let atoms = registry.group("atoms").unwrap();
        assert_eq!(atoms.decorators, vec![Decorator::WithKnobs]);
        assert_eq!(atoms.stories[1].name, "Badge");
        assert!(registry.story("forms", "Input").unwrap().render().as_element().is_some());
        assert!(registry.story("forms", "Button").is_none());
    }
}
