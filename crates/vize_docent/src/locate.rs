//! File resolution and component location.

use crate::component::{ComponentDefinition, Export, Module};
use crate::types::{ComponentRecord, ComponentStyle, FileInfo, LocateError};
use std::rc::Rc;

/// Derive the logical name and group of a discovered file.
///
/// e.g., "./atoms/Button.vue" -> name "Button", parent "atoms"
pub fn resolve_file_info(file: &str) -> FileInfo {
    let (dir, base) = match file.rfind('/') {
        Some(pos) => (&file[..pos], &file[pos + 1..]),
        None => (".", file),
    };
    let name = base.split('.').next().unwrap_or_default();
    let parent = dir.rsplit('/').next().unwrap_or_default();

    FileInfo {
        name: name.to_string(),
        parent: parent.trim_start_matches('.').to_string(),
        file: file.to_string(),
    }
}

/// Find the export holding the component of a module.
///
/// The default export wins, then an export named after the file, then the
/// first export in module order.
pub fn find_component<'m>(
    module: Option<&'m Module>,
    info: &FileInfo,
) -> Result<&'m Export, LocateError> {
    let Some(module) = module else {
        return Err(LocateError::MissingModule {
            file: info.file.clone(),
        });
    };

    if let Some(export) = module.get("default").filter(|e| e.is_present()) {
        return Ok(export);
    }
    if let Some(export) = module.get(&info.name).filter(|e| e.is_present()) {
        return Ok(export);
    }
    match module.first() {
        Some((_, export)) => Ok(export),
        None => Err(LocateError::UndetectableComponent {
            file: info.file.clone(),
        }),
    }
}

/// Classify a component by its runtime shape.
#[inline]
pub fn classify_style(component: &ComponentDefinition) -> ComponentStyle {
    if component.is_react_component() {
        ComponentStyle::Function
    } else {
        ComponentStyle::Template
    }
}

/// Locate the component of a loaded module and build its record.
///
/// `Ok(None)` means the selected export is not a component definition and
/// nothing is registered.
pub fn locate(
    module: Option<Rc<Module>>,
    info: &FileInfo,
) -> Result<Option<ComponentRecord>, LocateError> {
    let Some(module) = module else {
        return Err(LocateError::MissingModule {
            file: info.file.clone(),
        });
    };
    let component = match find_component(Some(&*module), info)? {
        Export::Component(component) => Rc::clone(component),
        Export::Value(value) => {
            tracing::debug!("selected export in {} is not a component: {}", info.file, value);
            return Ok(None);
        }
        Export::Empty => {
            tracing::debug!("skipping empty export in {}", info.file);
            return Ok(None);
        }
    };

    let group = if info.parent.is_empty() {
        info.name.clone()
    } else {
        info.parent.clone()
    };

    Ok(Some(ComponentRecord {
        style: classify_style(&component),
        group,
        name: info.name.clone(),
        component,
        module,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn info(file: &str) -> FileInfo {
        resolve_file_info(file)
    }

    #[test]
    fn test_resolve_file_info() {
        let file = resolve_file_info("./atoms/Button.vue");
        assert_eq!(file.name, "Button");
        assert_eq!(file.parent, "atoms");
        assert_eq!(file.file, "./atoms/Button.vue");

        let nested = resolve_file_info("./components/forms/Input.stories.jsx");
        assert_eq!(nested.name, "Input");
        assert_eq!(nested.parent, "forms");
    }

    #[test]
    fn test_resolve_file_info_strips_dots() {
        assert_eq!(resolve_file_info("./Button.vue").parent, "");
        assert_eq!(resolve_file_info("../Button.vue").parent, "");
        assert_eq!(resolve_file_info("Button.vue").parent, "");
        assert_eq!(resolve_file_info("./..hidden/Tag.vue").parent, "hidden");
    }

    #[test]
    fn test_name_has_no_extension() {
        for path in ["a/b/Card.vue", "Card.spec.ts", "./x/Card", "./x/.Card.vue"] {
            let file = resolve_file_info(path);
            assert!(!file.name.contains('.'), "{path}");
            assert!(!file.parent.starts_with('.'), "{path}");
        }
    }

    #[test]
    fn test_missing_module() {
        let err = find_component(None, &info("./Button.vue")).unwrap_err();
        assert_eq!(
            err,
            LocateError::MissingModule {
                file: "./Button.vue".to_string()
            }
        );
    }

    #[test]
    fn test_empty_module_is_undetectable() {
        let module = Module::new();
        let err = find_component(Some(&module), &info("./Button.vue")).unwrap_err();
        assert!(matches!(err, LocateError::UndetectableComponent { .. }));
    }

    #[test]
    fn test_lookup_priority() {
        let module: Module = serde_json::from_value(json!({
            "helper": { "props": { "h": "String" } },
            "Button": { "props": { "b": "String" } },
            "default": { "props": { "d": "String" } }
        }))
        .unwrap();
        let found = find_component(Some(&module), &info("./Button.vue")).unwrap();
        let props = found.as_component().unwrap().own.props.as_ref().unwrap();
        assert!(props.contains_key("d"));

        let module: Module = serde_json::from_value(json!({
            "helper": { "props": { "h": "String" } },
            "Button": { "props": { "b": "String" } },
            "default": null
        }))
        .unwrap();
        let found = find_component(Some(&module), &info("./Button.vue")).unwrap();
        let props = found.as_component().unwrap().own.props.as_ref().unwrap();
        assert!(props.contains_key("b"));

        let found = find_component(Some(&module), &info("./Other.vue")).unwrap();
        let props = found.as_component().unwrap().own.props.as_ref().unwrap();
        assert!(props.contains_key("h"));
    }

    #[test]
    fn test_locate_record() {
        let module: Module =
            serde_json::from_value(json!({ "default": { "prototype": { "isReactComponent": true } } }))
                .unwrap();
        let record = locate(Some(Rc::new(module)), &info("./Card.jsx"))
            .unwrap()
            .unwrap();

        assert_eq!(record.style, ComponentStyle::Function);
        assert_eq!(record.name, "Card");
        assert_eq!(record.group, "Card");
    }

    #[test]
    fn test_locate_empty_first_export() {
        let module: Module = serde_json::from_value(json!({ "VERSION": 0 })).unwrap();
        let located = locate(Some(Rc::new(module)), &info("./ui/Tag.js")).unwrap();
        assert!(located.is_none());
    }

    #[test]
    fn test_react_marker_object_is_function_style() {
        let module: Module = serde_json::from_value(json!({
            "default": {
                "propTypes": { "title": "string" },
                "prototype": { "isReactComponent": {} }
            }
        }))
        .unwrap();
        let record = locate(Some(Rc::new(module)), &info("./cards/Card.jsx"))
            .unwrap()
            .unwrap();

        assert_eq!(record.style, ComponentStyle::Function);
        assert_eq!(record.group, "cards");
    }

    #[test]
    fn test_truthy_scalar_default_wins() {
        let module: Module = serde_json::from_value(json!({
            "default": "x",
            "Card": { "props": { "title": "String" } }
        }))
        .unwrap();

        let found = find_component(Some(&module), &info("./Card.vue")).unwrap();
        assert!(matches!(found, Export::Value(v) if v == "x"));

        let located = locate(Some(Rc::new(module)), &info("./Card.vue")).unwrap();
        assert!(located.is_none());
    }

    #[test]
    fn test_falsy_default_is_skipped() {
        let module: Module = serde_json::from_value(json!({
            "default": 0,
            "Card": { "props": { "title": "String" } }
        }))
        .unwrap();

        let record = locate(Some(Rc::new(module)), &info("./Card.vue"))
            .unwrap()
            .unwrap();
        assert_eq!(record.name, "Card");
    }

    #[test]
    fn test_unclassified_defaults_to_template() {
        assert_eq!(
            classify_style(&ComponentDefinition::default()),
            ComponentStyle::Template
        );
    }
}
