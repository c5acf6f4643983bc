//! The output file, assembled one named declaration at a time.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use minijinja::{Environment, context};

use crate::error::GenerateError;

/// Named top-level declarations in emission order, plus the imports they need.
#[derive(Debug, Default)]
pub struct GoFile {
    package: String,
    imports: BTreeSet<&'static str>,
    decls: IndexMap<String, String>,
}

impl GoFile {
    pub fn new(package: &str) -> Self {
        Self {
            package: package.to_string(),
            ..Self::default()
        }
    }

    pub fn import(&mut self, path: &'static str) {
        self.imports.insert(path);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.decls.contains_key(name)
    }

    /// Add a declaration. Go allows one declaration per name in a package.
    pub fn push(&mut self, name: &str, code: String) -> Result<(), GenerateError> {
        if self.decls.contains_key(name) {
            return Err(GenerateError::DuplicateDeclaration(name.to_string()));
        }
        log::debug!("declared {name}");
        self.decls.insert(name.to_string(), code);
        Ok(())
    }

    /// Declaration names in emission order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.decls.keys().map(String::as_str)
    }

    pub fn render(&self, env: &Environment<'_>) -> Result<String, minijinja::Error> {
        let decls: Vec<&str> = self.decls.values().map(String::as_str).collect();
        env.get_template("file.go.j2")?.render(context! {
            package => &self.package,
            imports => self.imports.iter().collect::<Vec<_>>(),
            decls => decls,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redeclaration_is_rejected() {
        let mut file = GoFile::new("client");
        file.push("A", "type A struct{}".to_string()).unwrap();
        file.push("B", "type B struct{}".to_string()).unwrap();
        let err = file.push("A", "type A int64".to_string()).unwrap_err();
        assert!(matches!(err, GenerateError::DuplicateDeclaration(ref name) if name == "A"));
        assert_eq!(err.to_string(), "A is declared twice");
        assert_eq!(file.names().collect::<Vec<_>>(), vec!["A", "B"]);
        assert!(file.contains("B"));
        assert!(!file.contains("C"));
    }

    #[test]
    fn test_render_sorts_imports() {
        let env = crate::emitters::environment().unwrap();
        let mut file = GoFile::new("api");
        file.import("strings");
        file.import("fmt");
        file.import("fmt");
        file.push("A", "type A struct {\n}".to_string()).unwrap();
        let out = file.render(&env).unwrap();
        assert!(out.starts_with("// Code generated by swag. DO NOT EDIT.\n\npackage api\n"));
        assert!(out.contains("import (\n\t\"fmt\"\n\t\"strings\"\n)"));
        assert!(out.ends_with("type A struct {\n}\n"));
    }
}
