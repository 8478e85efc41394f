//! Data model for a parsed class reference document — format-agnostic.

use std::collections::HashSet;

/// Names of every class that has its own generated page.
pub type KnownClasses = HashSet<String>;

/// Everything read from one `<class>` XML file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClassDoc {
    /// `<class name="...">`
    pub name: String,
    /// `<class inherits="...">`, empty when the class has no parent
    pub inherits: String,
    /// `<class is_experimental="true">`
    pub is_experimental: bool,
    /// `<brief_description>` raw BBCode text
    pub brief_description: String,
    /// `<description>` raw BBCode text
    pub description: String,
    pub tutorials: Vec<Tutorial>,
    /// `<members>/<member>`
    pub properties: Vec<Property>,
    pub methods: Vec<Method>,
    pub signals: Vec<Signal>,
    /// `<constants>/<constant>`, enum items included
    pub constants: Vec<Constant>,
}

/// `<tutorials>/<link title="...">url</link>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tutorial {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub type_name: String,
    pub name: String,
    pub default: Option<String>,
    pub description: Option<String>,
}

/// A `<param>` of a method or signal, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub type_name: String,
    pub name: String,
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// `<return type="...">`, `void` when absent
    pub return_type: String,
    pub name: String,
    pub params: Vec<Param>,
    /// e.g. `const`, `virtual`, `vararg`
    pub qualifiers: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
    pub name: String,
    pub params: Vec<Param>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant {
    pub name: String,
    pub value: String,
    /// `enum="..."` group, `None` for free constants
    pub enum_name: Option<String>,
    pub description: String,
}

impl ClassDoc {
    /// Split constants into enum groups (first-occurrence order) and free constants.
    pub fn grouped_constants(&self) -> (Vec<(&str, Vec<&Constant>)>, Vec<&Constant>) {
        let mut enums: Vec<(&str, Vec<&Constant>)> = Vec::new();
        let mut free = Vec::new();

        for constant in &self.constants {
            match constant.enum_name.as_deref() {
                Some(group) => match enums.iter_mut().find(|(name, _)| *name == group) {
                    Some((_, items)) => items.push(constant),
                    None => enums.push((group, vec![constant])),
                },
                None => free.push(constant),
            }
        }

        (enums, free)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(name: &str, enum_name: Option<&str>) -> Constant {
        Constant {
            name: name.to_string(),
            value: "0".to_string(),
            enum_name: enum_name.map(str::to_string),
            description: String::new(),
        }
    }

    #[test]
    fn constants_grouped_by_first_occurrence() {
        let doc = ClassDoc {
            constants: vec![
                constant("MODE_A", Some("Mode")),
                constant("MAX", None),
                constant("FLAG_X", Some("Flags")),
                constant("MODE_B", Some("Mode")),
            ],
            ..Default::default()
        };

        let (enums, free) = doc.grouped_constants();
        let names: Vec<_> = enums.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, ["Mode", "Flags"]);
        let mode: Vec<_> = enums[0].1.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(mode, ["MODE_A", "MODE_B"]);
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].name, "MAX");
    }
}
