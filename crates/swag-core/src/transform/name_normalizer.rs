use heck::{ToLowerCamelCase, ToPascalCase};

/// `foo_bar_baz` → `FooBarBaz`.
///
/// Only the first character of each segment is upper-cased; the rest is kept
/// as written, so acronyms survive (`repo_URL` → `RepoURL`). Any character that
/// cannot appear in an identifier separates segments.
pub fn snake_to_camel(name: &str) -> String {
    name.split(|c: char| c == '_' || !c.is_alphanumeric())
        .map(title_first)
        .collect()
}

fn title_first(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `foo-bar-baz` → `FooBarBaz`.
pub fn kebab_to_camel(name: &str) -> String {
    name.to_pascal_case()
}

/// `foo_bar_baz` → `fooBarBaz`.
pub fn lower_snake_to_camel(name: &str) -> String {
    name.to_lower_camel_case()
}

/// Drop the `-an-` and `-a-` fragments from a kebab-case name.
pub fn remove_filler_words(name: &str) -> String {
    name.replace("-an-", "-").replace("-a-", "-")
}

/// Name of the synthetic type for object property `property` of `parent`.
pub fn nested_type_name(parent: &str, property: &str) -> String {
    format!("{parent}_{}", snake_to_camel(property))
}

/// Name of the synthetic element type for array property `property` of `parent`.
pub fn array_item_type_name(parent: &str, property: &str) -> String {
    format!("{}Item", nested_type_name(parent, property))
}

/// PascalCase operation name: from the `operationId` when there is one,
/// otherwise derived from the method and path.
pub fn operation_name(operation_id: Option<&str>, method: &str, path: &str) -> String {
    match operation_id.filter(|id| !id.is_empty()) {
        Some(id) => kebab_to_camel(&remove_filler_words(id)),
        None => route_name(method, path),
    }
}

/// Method name for an operation that has no `operationId`.
///
/// The verb picks the prefix (`GET` on a collection lists it, on a single
/// item gets it) and every literal segment follows; a trailing `{param}`
/// singularises the last one: `GET /orgs/{org}/members` → `ListOrgsMembers`,
/// `DELETE /orgs/{org}` → `DeleteOrg`.
pub fn route_name(method: &str, path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let single = segments
        .last()
        .is_some_and(|s| s.starts_with('{') && s.ends_with('}'));
    let literals: Vec<&str> = segments
        .iter()
        .copied()
        .filter(|s| !s.starts_with('{'))
        .collect();

    let verb = match (method.to_ascii_uppercase().as_str(), single) {
        ("GET", true) => "Get".to_string(),
        ("GET", false) => "List".to_string(),
        ("POST", _) => "Create".to_string(),
        ("PUT", _) => "Update".to_string(),
        (other, _) => other.to_pascal_case(),
    };

    let last = literals.len().saturating_sub(1);
    literals
        .iter()
        .enumerate()
        .fold(verb, |mut name, (i, segment)| {
            if single && i == last {
                name.push_str(&singular(segment).to_pascal_case());
            } else {
                name.push_str(&segment.to_pascal_case());
            }
            name
        })
}

/// Strip one English plural suffix.
fn singular(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies").filter(|s| !s.is_empty()) {
        return format!("{stem}y");
    }
    for suffix in ["sses", "xes", "zes", "ches", "shes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    match word.strip_suffix('s') {
        Some(stem) if !stem.is_empty() && !stem.ends_with('s') => stem.to_string(),
        _ => word.to_string(),
    }
}
