//! Locates a schema by a dotted property path, keeping a handle on its
//! structural parent so the located node can be swapped in place.

use crate::error::ResolveError;
use crate::parse::schema::Schema;

/// Split a dotted property path. The empty path addresses the root.
pub fn split_steps(prop: &str) -> Vec<&str> {
    if prop.is_empty() {
        Vec::new()
    } else {
        prop.split('.').collect()
    }
}

/// A located schema, addressed through the slot that owns it.
#[derive(Debug)]
pub enum Target<'a> {
    /// The root schema itself (the response schema).
    Root(&'a mut Schema),
    /// The `items` of an array parent; `name` is the last consumed step.
    Items { parent: &'a mut Schema, name: String },
    /// A property of an object parent.
    Property { parent: &'a mut Schema, name: String },
}

impl<'a> Target<'a> {
    /// The last consumed step; empty when no step was consumed.
    pub fn name(&self) -> &str {
        match self {
            Target::Root(_) => "",
            Target::Items { name, .. } | Target::Property { name, .. } => name,
        }
    }

    pub fn schema(&self) -> &Schema {
        match self {
            Target::Root(s) => s,
            Target::Items { parent, .. } => match parent.single_items() {
                Some(s) => s,
                None => unreachable!("array target without single items"),
            },
            Target::Property { parent, name } => match parent.properties.get(name) {
                Some(s) => s,
                None => unreachable!("property target {name:?} vanished"),
            },
        }
    }

    fn into_schema(self) -> &'a mut Schema {
        match self {
            Target::Root(s) => s,
            Target::Items { parent, .. } => match parent.single_items_mut() {
                Some(s) => s,
                None => unreachable!("array target without single items"),
            },
            Target::Property { parent, name } => match parent.properties.get_mut(&name) {
                Some(s) => s,
                None => unreachable!("property target {name:?} vanished"),
            },
        }
    }

    /// Put `replacement` where the target was and return the old subtree.
    ///
    /// Replacing the root keeps its description and nullability on the
    /// replacement.
    pub fn replace(self, mut replacement: Schema) -> Schema {
        if let Target::Root(slot) = &self {
            replacement.description = slot.description.clone();
            replacement.nullable = slot.nullable;
        }
        std::mem::replace(self.into_schema(), replacement)
    }
}

/// Walk `steps` from `root`. Arrays are stepped through transparently: the
/// array becomes the parent of whatever is found in its `items`.
pub fn resolve<'a>(root: &'a mut Schema, steps: &[&str]) -> Result<Target<'a>, ResolveError> {
    let mut target = Target::Root(root);
    let mut steps = steps.iter();

    loop {
        while target.schema().is_array() {
            let name = target.name().to_string();
            let parent = target.into_schema();
            if parent.single_items().is_none() {
                return Err(ResolveError::MalformedArray(name));
            }
            target = Target::Items { parent, name };
        }

        let Some(step) = steps.next() else {
            return Ok(target);
        };

        let node = target.into_schema();
        if !node.properties.contains_key(*step) {
            return Err(ResolveError::NoSuchProperty(step.to_string()));
        }
        target = Target::Property {
            parent: node,
            name: step.to_string(),
        };
    }
}
