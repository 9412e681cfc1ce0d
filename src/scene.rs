//! Scene descriptions: objects with property tables and shared class
//! templates.
//!
//! ```json
//! {
//!   "templates": {
//!     "Node":  [["Visibility", "bool", "", "", 1]],
//!     "Model": {"base": "Node", "properties": [["Show", "bool", "", "", 1]]}
//!   },
//!   "objects": [
//!     {"name": "Cube", "class": "Model",
//!      "properties": [["Lcl Translation", "Lcl Translation", "", "A", 1, 2, 3]]}
//!   ]
//! }
//! ```
//!
//! Each template is built once and shared by every object of its class.

use crate::dom::json::{properties_from_json, LineCounter};
use crate::dom::Element;
use crate::props::PropertyTable;
use crate::util::{Error, Result};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// One object of a scene.
#[derive(Debug)]
pub struct SceneObject {
    name: String,
    class: Option<String>,
    properties: PropertyTable,
}

impl SceneObject {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class name, selecting the template.
    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn properties(&self) -> &PropertyTable {
        &self.properties
    }
}

/// Objects and their class templates.
#[derive(Debug, Default)]
pub struct Scene {
    templates: BTreeMap<String, Arc<PropertyTable>>,
    objects: Vec<SceneObject>,
}

/// Template before its table is built.
struct PendingTemplate {
    base: Option<String>,
    element: Arc<Element>,
}

impl Scene {
    /// Load a scene description from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading scene");
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse a scene description from JSON text.
    pub fn parse(text: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(text)?;
        let root = root
            .as_object()
            .ok_or_else(|| Error::invalid_scene("scene must be a JSON object"))?;

        let mut lines = LineCounter::new();
        let pending = read_templates(root.get("templates"), &mut lines)?;

        let mut templates = BTreeMap::new();
        for name in pending.keys() {
            build_template(name, &pending, &mut templates, &mut Vec::new())?;
        }

        let mut objects = Vec::new();
        if let Some(list) = root.get("objects") {
            let list = list
                .as_array()
                .ok_or_else(|| Error::invalid_scene("objects must be an array"))?;
            for obj in list {
                objects.push(read_object(obj, &templates, &mut lines)?);
            }
        }

        tracing::debug!(
            templates = templates.len(),
            objects = objects.len(),
            "scene loaded"
        );
        Ok(Self { templates, objects })
    }

    /// Template table of a class.
    pub fn template(&self, class: &str) -> Option<&Arc<PropertyTable>> {
        self.templates.get(class)
    }

    /// Templates by class name.
    pub fn templates(&self) -> impl Iterator<Item = (&str, &Arc<PropertyTable>)> {
        self.templates.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Objects in document order.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Find an object by name.
    pub fn object(&self, name: &str) -> Result<&SceneObject> {
        self.objects
            .iter()
            .find(|o| o.name == name)
            .ok_or_else(|| Error::ObjectNotFound(name.to_string()))
    }
}

fn read_templates(
    value: Option<&Value>,
    lines: &mut LineCounter,
) -> Result<BTreeMap<String, PendingTemplate>> {
    let mut pending = BTreeMap::new();
    let Some(value) = value else {
        return Ok(pending);
    };
    let map = value
        .as_object()
        .ok_or_else(|| Error::invalid_scene("templates must be an object"))?;

    for (class, def) in map {
        let (base, records) = match def {
            Value::Object(obj) => (
                obj.get("base").and_then(Value::as_str).map(str::to_string),
                obj.get("properties").cloned().unwrap_or(Value::Array(Vec::new())),
            ),
            other => (None, other.clone()),
        };
        let element = Arc::new(properties_from_json(&records, lines)?);
        pending.insert(class.clone(), PendingTemplate { base, element });
    }
    Ok(pending)
}

/// Build `name` after its base, rejecting cyclic `base` references.
fn build_template(
    name: &str,
    pending: &BTreeMap<String, PendingTemplate>,
    built: &mut BTreeMap<String, Arc<PropertyTable>>,
    stack: &mut Vec<String>,
) -> Result<Arc<PropertyTable>> {
    if let Some(table) = built.get(name) {
        return Ok(Arc::clone(table));
    }
    if stack.iter().any(|s| s == name) {
        stack.push(name.to_string());
        return Err(Error::invalid_scene(format!(
            "template cycle: {}",
            stack.join(" -> ")
        )));
    }

    let def = pending
        .get(name)
        .ok_or_else(|| Error::invalid_scene(format!("unknown base template {}", name)))?;

    stack.push(name.to_string());
    let base = match &def.base {
        Some(base) => Some(build_template(base, pending, built, stack)?),
        None => None,
    };
    stack.pop();

    let table = Arc::new(PropertyTable::new(&def.element, base));
    built.insert(name.to_string(), Arc::clone(&table));
    Ok(table)
}

fn read_object(
    value: &Value,
    templates: &BTreeMap<String, Arc<PropertyTable>>,
    lines: &mut LineCounter,
) -> Result<SceneObject> {
    let obj: &Map<String, Value> = value
        .as_object()
        .ok_or_else(|| Error::invalid_scene("object entries must be JSON objects"))?;
    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::invalid_scene("object without name"))?
        .to_string();
    let class = obj.get("class").and_then(Value::as_str).map(str::to_string);

    let template = match &class {
        Some(class) => {
            let template = templates.get(class).cloned();
            if template.is_none() {
                tracing::warn!(object = %name, class = %class, "no property template for class");
            }
            template
        }
        None => None,
    };

    let properties = match obj.get("properties") {
        Some(records) => {
            let element = Arc::new(properties_from_json(records, lines)?);
            PropertyTable::new(&element, template)
        }
        None => PropertyTable::empty(template),
    };

    Ok(SceneObject {
        name,
        class,
        properties,
    })
}
