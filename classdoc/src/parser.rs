//! Class reference XML parser.
//!
//! Reads the `<class>` document layout used by the engine's doc tooling:
//!
//! ```xml
//! <class name="Foo" inherits="Node3D" is_experimental="true">
//!     <brief_description>...</brief_description>
//!     <description>...</description>
//!     <tutorials><link title="...">url</link></tutorials>
//!     <methods><method name="..." qualifiers="const">
//!         <return type="int" /><param index="0" name="a" type="int" default="1" />
//!         <description>...</description>
//!     </method></methods>
//!     <members><member name="..." type="..." default="...">...</member></members>
//!     <signals><signal name="..."><param .../><description>...</description></signal></signals>
//!     <constants><constant name="..." value="..." enum="...">...</constant></constants>
//! </class>
//! ```

use crate::error::DocError;
use crate::model::*;
use std::path::Path;
use sxd_document::dom::{ChildOfElement, ChildOfRoot, Element};

/// Parse the content of a class XML file. `path` is only used for error messages.
pub fn parse(path: &Path, content: &str) -> Result<ClassDoc, DocError> {
    let package = sxd_document::parser::parse(content).map_err(|e| DocError::InvalidXml {
        path: path.to_path_buf(),
        message: format!("{:?}", e),
    })?;
    let document = package.as_document();

    let root = document
        .root()
        .children()
        .into_iter()
        .find_map(|child| match child {
            ChildOfRoot::Element(el) => Some(el),
            _ => None,
        })
        .ok_or_else(|| DocError::InvalidXml {
            path: path.to_path_buf(),
            message: "document has no root element".to_string(),
        })?;

    let tag = root.name().local_part();
    if tag != "class" {
        return Err(DocError::MalformedDocument {
            path: path.to_path_buf(),
            found: tag.to_string(),
        });
    }

    let name = root
        .attribute_value("name")
        .ok_or_else(|| DocError::MissingAttribute {
            path: path.to_path_buf(),
            element: "class",
            attribute: "name",
        })?
        .to_string();

    Ok(ClassDoc {
        name,
        inherits: attr(root, "inherits").unwrap_or_default(),
        is_experimental: root.attribute_value("is_experimental") == Some("true"),
        brief_description: child(root, "brief_description")
            .map(text_of)
            .unwrap_or_default(),
        description: child(root, "description").map(text_of).unwrap_or_default(),
        tutorials: container(root, "tutorials", "link")
            .into_iter()
            .map(|link| Tutorial {
                title: attr(link, "title").unwrap_or_default(),
                url: text_of(link).trim().to_string(),
            })
            .collect(),
        properties: container(root, "members", "member")
            .into_iter()
            .map(parse_property)
            .collect(),
        methods: container(root, "methods", "method")
            .into_iter()
            .map(parse_method)
            .collect(),
        signals: container(root, "signals", "signal")
            .into_iter()
            .map(|signal| Signal {
                name: attr(signal, "name").unwrap_or_default(),
                params: parse_params(signal),
                description: child(signal, "description").map(text_of),
            })
            .collect(),
        constants: container(root, "constants", "constant")
            .into_iter()
            .map(|constant| Constant {
                name: attr(constant, "name").unwrap_or_default(),
                value: attr(constant, "value").unwrap_or_default(),
                enum_name: attr(constant, "enum"),
                description: text_of(constant),
            })
            .collect(),
    })
}

fn parse_property(member: Element<'_>) -> Property {
    let text = text_of(member);
    Property {
        type_name: attr(member, "type").unwrap_or_default(),
        name: attr(member, "name").unwrap_or_default(),
        default: attr(member, "default"),
        description: if text.is_empty() { None } else { Some(text) },
    }
}

fn parse_method(method: Element<'_>) -> Method {
    Method {
        return_type: child(method, "return")
            .and_then(|ret| attr(ret, "type"))
            .unwrap_or_else(|| "void".to_string()),
        name: attr(method, "name").unwrap_or_default(),
        params: parse_params(method),
        qualifiers: attr(method, "qualifiers").filter(|q| !q.is_empty()),
        description: child(method, "description").map(text_of),
    }
}

/// `<param>` children in document order.
///
/// Parameters carry an `index` attribute, but the engine always writes them
/// in index order, so document order is kept as-is.
fn parse_params(parent: Element<'_>) -> Vec<Param> {
    children(parent, "param")
        .into_iter()
        .map(|param| Param {
            type_name: attr(param, "type").unwrap_or_default(),
            name: attr(param, "name").unwrap_or_default(),
            default: attr(param, "default"),
        })
        .collect()
}

// -- DOM helpers --------------------------------------------------------------

fn attr(el: Element<'_>, name: &str) -> Option<String> {
    el.attribute_value(name).map(str::to_string)
}

fn children<'d>(el: Element<'d>, name: &str) -> Vec<Element<'d>> {
    el.children()
        .into_iter()
        .filter_map(|c| match c {
            ChildOfElement::Element(e) if e.name().local_part() == name => Some(e),
            _ => None,
        })
        .collect()
}

fn child<'d>(el: Element<'d>, name: &str) -> Option<Element<'d>> {
    children(el, name).into_iter().next()
}

/// Items of a wrapper element such as `<members>/<member>`; empty when the wrapper is absent.
fn container<'d>(el: Element<'d>, wrapper: &str, item: &str) -> Vec<Element<'d>> {
    child(el, wrapper)
        .map(|w| children(w, item))
        .unwrap_or_default()
}

/// Concatenated direct text content of an element.
fn text_of(el: Element<'_>) -> String {
    let mut out = String::new();
    for c in el.children() {
        if let ChildOfElement::Text(t) = c {
            out.push_str(t.text());
        }
    }
    out
}
