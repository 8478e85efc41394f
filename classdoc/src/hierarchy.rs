//! Class hierarchy assembly.
//!
//! Links every parsed class to its parent by name, fills in well-known engine
//! ancestors that have no XML file of their own, and sorts children.

use crate::model::{ClassDoc, KnownClasses};
use anyhow::{bail, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::warn;

/// Ancestor classes added to the tree when no input file defines them.
///
/// Each entry is `(class, parent)`; an empty parent makes a root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ancestors {
    entries: Vec<(String, String)>,
}

impl Ancestors {
    /// The engine base classes commonly inherited by module classes.
    pub fn engine_defaults() -> Self {
        let mut ancestors = Self::default();
        for (class, parent) in [
            ("Object", ""),
            ("Node", "Object"),
            ("RefCounted", "Object"),
            ("Resource", "RefCounted"),
            ("Node3D", "Node"),
            ("RigidBody3D", "Node3D"),
        ] {
            ancestors.push(class, parent);
        }
        ancestors
    }

    pub fn push(&mut self, class: impl Into<String>, parent: impl Into<String>) {
        self.entries.push((class.into(), parent.into()));
    }

    /// Parse a `CHILD=PARENT` command-line entry. `CHILD=` declares a root.
    pub fn push_entry(&mut self, entry: &str) -> Result<()> {
        let Some((class, parent)) = entry.split_once('=') else {
            bail!("invalid ancestor entry `{}`: expected CHILD=PARENT", entry);
        };
        let (class, parent) = (class.trim(), parent.trim());
        if class.is_empty() {
            bail!("invalid ancestor entry `{}`: class name is empty", entry);
        }
        self.push(class, parent);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(c, p)| (c.as_str(), p.as_str()))
    }
}

/// Where an input class was read from.
#[derive(Debug)]
pub struct Source {
    pub path: PathBuf,
    pub doc: ClassDoc,
}

/// One node of the hierarchy.
#[derive(Debug)]
pub struct ClassRecord {
    pub name: String,
    /// Empty for roots.
    pub parent_name: String,
    /// Present only for classes that came from an input file.
    pub source: Option<Source>,
    children: Vec<usize>,
}

impl ClassRecord {
    pub fn is_known_in_set(&self) -> bool {
        self.source.is_some()
    }
}

/// All classes of a run, with parent links resolved.
#[derive(Debug)]
pub struct Hierarchy {
    records: Vec<ClassRecord>,
    roots: Vec<usize>,
    orphans: Vec<usize>,
}

impl Hierarchy {
    /// Build the tree from parsed input classes plus `ancestors`.
    ///
    /// Ancestors never replace an input class of the same name. A class whose
    /// parent resolves to nothing is left out of the tree entirely; it keeps
    /// its record (and thus its page) but is nobody's child and not a root.
    pub fn assemble(inputs: Vec<Source>, ancestors: &Ancestors) -> Self {
        let mut records: Vec<ClassRecord> = Vec::new();
        let mut by_name: HashMap<String, usize> = HashMap::new();

        for source in inputs {
            let name = source.doc.name.clone();
            if by_name.contains_key(&name) {
                warn!(
                    "duplicate class {} in {}, keeping the first definition",
                    name,
                    source.path.display()
                );
                continue;
            }
            by_name.insert(name.clone(), records.len());
            records.push(ClassRecord {
                name,
                parent_name: source.doc.inherits.clone(),
                source: Some(source),
                children: Vec::new(),
            });
        }

        for (class, parent) in ancestors.iter() {
            if by_name.contains_key(class) {
                continue;
            }
            by_name.insert(class.to_string(), records.len());
            records.push(ClassRecord {
                name: class.to_string(),
                parent_name: parent.to_string(),
                source: None,
                children: Vec::new(),
            });
        }

        let mut roots = Vec::new();
        let mut orphans = Vec::new();
        for id in 0..records.len() {
            if records[id].parent_name.is_empty() {
                roots.push(id);
                continue;
            }
            match by_name.get(&records[id].parent_name) {
                Some(&parent) => records[parent].children.push(id),
                None => orphans.push(id),
            }
        }

        let names: Vec<String> = records.iter().map(|r| r.name.clone()).collect();
        for record in &mut records {
            record.children.sort_by(|&a, &b| names[a].cmp(&names[b]));
        }
        roots.sort_by(|&a, &b| names[a].cmp(&names[b]));

        Self {
            records,
            roots,
            orphans,
        }
    }

    /// Parentless classes, alphabetically.
    pub fn roots(&self) -> impl Iterator<Item = &ClassRecord> {
        self.roots.iter().map(|&id| &self.records[id])
    }

    /// Direct children of `record`, alphabetically.
    pub fn children<'a>(&'a self, record: &'a ClassRecord) -> impl Iterator<Item = &'a ClassRecord> {
        record.children.iter().map(|&id| &self.records[id])
    }

    /// Classes whose parent could not be resolved.
    pub fn orphans(&self) -> impl Iterator<Item = &ClassRecord> {
        self.orphans.iter().map(|&id| &self.records[id])
    }

    /// Classes read from input files, in input order.
    pub fn known_in_set(&self) -> impl Iterator<Item = &ClassRecord> {
        self.records.iter().filter(|r| r.is_known_in_set())
    }

    /// Names that get their own page and can therefore be linked to.
    pub fn known_names(&self) -> KnownClasses {
        self.known_in_set().map(|r| r.name.clone()).collect()
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&ClassRecord> {
        self.records.iter().find(|r| r.name == name)
    }
}
