//! Class reference page renderer.
//!
//! Sections appear in a fixed order and are left out when empty:
//! header, inheritance, experimental warning, brief and full description,
//! tutorials, property/method summary tables, signals, enumerations,
//! constants, property and method details, footer.

use crate::model::*;
use crate::render::bbcode::format_text;
use crate::render::markup::*;
use chrono::NaiveDate;

const EXPERIMENTAL_WARNING: &str = "!!! warning\n    This class is marked as experimental. \
It is subject to likely change or possible removal in future versions. Use at your own discretion.";

/// Inputs shared by every page of a run.
pub struct PageContext<'a> {
    /// Classes with their own page; only these become links.
    pub known: &'a KnownClasses,
    /// Footer date.
    pub today: NaiveDate,
}

/// Render the markdown page of one class. `children` are the names of the
/// classes inheriting from it, already sorted.
pub fn render_page(doc: &ClassDoc, children: &[&str], ctx: &PageContext) -> String {
    let known = ctx.known;
    let text = |raw: &str| format_text(raw, known, &doc.name);
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("# {}\n", doc.name));

    if !doc.inherits.is_empty() {
        lines.push(format!("Inherits: {}\n", make_type(&doc.inherits, known)));
    }

    if !children.is_empty() {
        let links: Vec<String> = children.iter().map(|c| make_type(c, known)).collect();
        lines.push(format!("Inherited by: {}\n", links.join(", ")));
    }

    if doc.is_experimental {
        lines.push(format!("{}\n", EXPERIMENTAL_WARNING));
    }

    let brief = text(&doc.brief_description);
    if !brief.is_empty() {
        lines.push(format!("{}\n", brief));
    }

    let description = text(&doc.description);
    if !description.is_empty() {
        lines.push("## Description\n".to_string());
        lines.push(format!("{}\n", description));
    }

    if !doc.tutorials.is_empty() {
        lines.push("## Tutorials\n".to_string());
        for tutorial in &doc.tutorials {
            lines.push(format!("- {}", make_link(&tutorial.title, &tutorial.url)));
        }
        lines.push(String::new());
    }

    if !doc.properties.is_empty() {
        lines.push("## Properties\n".to_string());
        let mut table = vec![vec![
            "Type".to_string(),
            "Name".to_string(),
            "Default".to_string(),
        ]];
        for prop in &doc.properties {
            table.push(vec![
                make_type(&prop.type_name, known),
                member_link(&prop.name),
                prop.default.clone().unwrap_or_default(),
            ]);
        }
        lines.push(format!("{}\n", make_table(&table)));
    }

    // Accessor methods of properties are listed too; they are not filtered out.
    if !doc.methods.is_empty() {
        lines.push("## Methods\n".to_string());
        let mut table = vec![vec!["Return".to_string(), "Signature".to_string()]];
        for method in &doc.methods {
            table.push(vec![
                make_type(&method.return_type, known),
                method_signature(&member_link(&method.name), method, known),
            ]);
        }
        lines.push(format!("{}\n", make_table(&table)));
    }

    if !doc.signals.is_empty() {
        lines.push("## Signals\n".to_string());
        for signal in &doc.signals {
            lines.push(format!(
                "- {}**{}** {}\n",
                member_anchor(&signal.name),
                signal.name,
                make_arglist(&signal.params, known)
            ));
            push_description(&mut lines, signal.description.as_deref().map(&text));
        }
    }

    let (enums, constants) = doc.grouped_constants();

    if !enums.is_empty() {
        lines.push("## Enumerations\n".to_string());
        for (name, items) in &enums {
            lines.push(format!("enum **{}**:\n", name));
            for item in items {
                lines.push(render_constant(item, &text));
            }
            lines.push(String::new());
        }
    }

    if !constants.is_empty() {
        lines.push("## Constants\n".to_string());
        for item in &constants {
            lines.push(render_constant(item, &text));
        }
        lines.push(String::new());
    }

    if !doc.properties.is_empty() {
        lines.push("## Property Descriptions\n".to_string());
        for prop in &doc.properties {
            let mut head = format!(
                "- {}{} **{}**",
                make_type(&prop.type_name, known),
                member_anchor(&prop.name),
                prop.name
            );
            if let Some(ref default) = prop.default {
                head.push_str(" = ");
                head.push_str(default);
            }
            lines.push(format!("{}\n", head));
            push_description(&mut lines, prop.description.as_deref().map(&text));
        }
    }

    if !doc.methods.is_empty() {
        lines.push("## Method Descriptions\n".to_string());
        for method in &doc.methods {
            let name = format!("{} **{}**", member_anchor(&method.name), method.name);
            lines.push(format!(
                "- {}{}\n",
                make_type(&method.return_type, known),
                method_signature(&name, method, known)
            ));
            push_description(&mut lines, method.description.as_deref().map(&text));
        }
    }

    lines.push(format!("_Generated on {}_", ctx.today.format("%b %d, %Y")));
    lines.push(String::new());

    lines.join("\n")
}

/// `name ( args ) qualifiers`, used by the methods table and the method details.
fn method_signature(name: &str, method: &Method, known: &KnownClasses) -> String {
    let mut signature = format!("{} {}", name, make_arglist(&method.params, known));
    if let Some(ref qualifiers) = method.qualifiers {
        signature.push(' ');
        signature.push_str(qualifiers);
    }
    signature
}

/// `- **NAME** = **value** --- description`, with the anchor for `[constant NAME]`.
fn render_constant(item: &Constant, text: &impl Fn(&str) -> String) -> String {
    let mut line = format!(
        "- {}**{}** = **{}**",
        member_anchor(&item.name),
        item.name,
        item.value
    );
    let description = text(&item.description);
    if !description.is_empty() {
        line.push_str(" --- ");
        line.push_str(&description);
    }
    line
}

fn push_description(lines: &mut Vec<String>, description: Option<String>) {
    if let Some(description) = description.filter(|d| !d.trim().is_empty()) {
        lines.push(format!("{}\n", description));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(known: &KnownClasses) -> PageContext<'_> {
        PageContext {
            known,
            today: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        }
    }

    fn known(names: &[&str]) -> KnownClasses {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn foo() -> ClassDoc {
        ClassDoc {
            name: "Foo".to_string(),
            inherits: "Node3D".to_string(),
            brief_description: "\n\t\tA test class.\n\t".to_string(),
            properties: vec![Property {
                type_name: "int".to_string(),
                name: "value".to_string(),
                default: Some("0".to_string()),
                description: Some("\n\t\tThe [b]value[/b].\n\t".to_string()),
            }],
            ..Default::default()
        }
    }

    fn method(name: &str, qualifiers: Option<&str>) -> Method {
        Method {
            return_type: "float".to_string(),
            name: name.to_string(),
            params: vec![Param {
                type_name: "Foo".to_string(),
                name: "other".to_string(),
                default: None,
            }],
            qualifiers: qualifiers.map(str::to_string),
            description: Some("Does math.".to_string()),
        }
    }

    #[test]
    fn single_property_page() {
        let k = known(&["Foo"]);
        let page = render_page(&foo(), &[], &ctx(&k));
        assert!(page.starts_with("# Foo\n\nInherits: `Node3D`\n\nA test class.\n\n"));
        assert!(page.contains(
            "## Properties\n\n| Type | Name | Default |\n| --- | --- | --- |\n| `int` | [value](#i_value) | 0 |\n"
        ));
        assert!(page.contains(
            "## Property Descriptions\n\n- `int`<span id=\"i_value\"></span> **value** = 0\n\nThe **value**.\n"
        ));
        assert!(!page.contains("## Methods"));
        assert!(!page.contains("## Description"));
        assert!(page.ends_with("_Generated on Mar 05, 2024_\n"));
    }

    #[test]
    fn properties_keep_declaration_order() {
        let mut doc = foo();
        doc.properties = ["zeta", "alpha"]
            .into_iter()
            .map(|name| Property {
                type_name: "float".to_string(),
                name: name.to_string(),
                default: Some("1.0".to_string()),
                description: Some(format!("About {}.", name)),
            })
            .collect();
        let page = render_page(&doc, &[], &ctx(&known(&["Foo"])));

        let rows = [
            "| `float` | [zeta](#i_zeta) | 1.0 |\n",
            "| `float` | [alpha](#i_alpha) | 1.0 |\n",
        ];
        let details = [
            "- `float`<span id=\"i_zeta\"></span> **zeta** = 1.0\n\nAbout zeta.\n",
            "- `float`<span id=\"i_alpha\"></span> **alpha** = 1.0\n\nAbout alpha.\n",
        ];
        for needle in rows.iter().chain(&details) {
            assert_eq!(page.matches(needle).count(), 1, "{}", needle);
        }
        assert_eq!(page.matches("<span id=\"i_zeta\">").count(), 1);
        assert_eq!(page.matches("<span id=\"i_alpha\">").count(), 1);

        let pos = |needle: &str| page.find(needle).unwrap();
        assert!(pos(rows[0]) < pos(rows[1]));
        assert!(pos(rows[1]) < pos("## Property Descriptions"));
        assert!(pos("## Property Descriptions") < pos(details[0]));
        assert!(pos(details[0]) < pos(details[1]));
    }

    #[test]
    fn inherits_links_known_parent() {
        let k = known(&["Foo", "Node3D"]);
        let page = render_page(&foo(), &[], &ctx(&k));
        assert!(page.contains("Inherits: [Node3D](Node3D.md)\n"));
    }

    #[test]
    fn root_class_has_no_inherits_line() {
        let doc = ClassDoc {
            name: "Base".to_string(),
            ..Default::default()
        };
        let page = render_page(&doc, &["Derived"], &ctx(&known(&["Base", "Derived"])));
        assert!(!page.contains("Inherits:"));
        assert!(page.contains("Inherited by: [Derived](Derived.md)\n"));
    }

    #[test]
    fn experimental_warning_precedes_brief() {
        let mut doc = foo();
        doc.is_experimental = true;
        let k = known(&["Foo", "Bar"]);
        let page = render_page(&doc, &["Bar"], &ctx(&k));
        let inherited = page.find("Inherited by: [Bar](Bar.md)").unwrap();
        let warning = page.find("!!! warning").unwrap();
        let brief = page.find("A test class.").unwrap();
        assert!(inherited < warning && warning < brief);
    }

    #[test]
    fn methods_table_and_details_carry_qualifiers() {
        let mut doc = foo();
        doc.methods = vec![method("distance", Some("const")), method("reset", None)];
        let k = known(&["Foo"]);
        let page = render_page(&doc, &[], &ctx(&k));
        assert!(page.contains(
            "| `float` | [distance](#i_distance) ( [Foo](Foo.md) other ) const |"
        ));
        assert!(page.contains("| `float` | [reset](#i_reset) ( [Foo](Foo.md) other ) |"));
        assert!(page.contains(
            "- `float`<span id=\"i_distance\"></span> **distance** ( [Foo](Foo.md) other ) const\n\nDoes math.\n"
        ));
    }

    #[test]
    fn enums_and_constants() {
        let mut doc = foo();
        let constant = |name: &str, value: &str, group: Option<&str>, desc: &str| Constant {
            name: name.to_string(),
            value: value.to_string(),
            enum_name: group.map(str::to_string),
            description: desc.to_string(),
        };
        doc.constants = vec![
            constant("MODE_A", "0", Some("Mode"), "First."),
            constant("LIMIT", "16", None, "  "),
            constant("MODE_B", "1", Some("Mode"), ""),
        ];
        let page = render_page(&doc, &[], &ctx(&known(&["Foo"])));
        assert!(page.contains(
            "## Enumerations\n\nenum **Mode**:\n\n- <span id=\"i_MODE_A\"></span>**MODE_A** = **0** --- First.\n- <span id=\"i_MODE_B\"></span>**MODE_B** = **1**\n"
        ));
        assert!(page.contains("## Constants\n\n- <span id=\"i_LIMIT\"></span>**LIMIT** = **16**\n"));
        assert!(page.find("## Enumerations").unwrap() < page.find("## Constants").unwrap());
    }

    #[test]
    fn tutorials_and_signals() {
        let mut doc = foo();
        doc.tutorials = vec![Tutorial {
            title: "Intro".to_string(),
            url: "https://example.com/intro".to_string(),
        }];
        doc.signals = vec![Signal {
            name: "changed".to_string(),
            params: vec![],
            description: Some("Emitted on change.".to_string()),
        }];
        let page = render_page(&doc, &[], &ctx(&known(&["Foo"])));
        assert!(page.contains("## Tutorials\n\n- [Intro](https://example.com/intro)\n"));
        assert!(page.contains(
            "## Signals\n\n- <span id=\"i_changed\"></span>**changed** ( )\n\nEmitted on change.\n"
        ));
    }

    #[test]
    fn rendering_is_deterministic() {
        let k = known(&["Foo"]);
        assert_eq!(
            render_page(&foo(), &[], &ctx(&k)),
            render_page(&foo(), &[], &ctx(&k))
        );
    }
}
