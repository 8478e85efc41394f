//! Markdown building blocks shared by the page and index renderers.

use crate::model::{KnownClasses, Param};

/// File name of the generated page for `class`.
pub fn page_file(class: &str) -> String {
    format!("{}.md", class)
}

pub fn make_link(text: &str, target: &str) -> String {
    format!("[{}]({})", text, target)
}

/// Class name behind a type expression: `Array[Foo]` → `Foo`, `Foo[]` → `Foo`.
///
/// For two-argument generics such as `Dictionary[String, Foo]` the last
/// argument is used.
pub fn base_type(type_name: &str) -> &str {
    let mut t = type_name.trim();
    while let Some(stripped) = t.strip_suffix("[]") {
        t = stripped.trim_end();
    }
    if let (Some(open), true) = (t.find('['), t.ends_with(']')) {
        let inner = &t[open + 1..t.len() - 1];
        let last = inner.rsplit(',').next().unwrap_or(inner);
        return base_type(last);
    }
    t
}

/// Link to the class page when `type_name` is a known class, else a code span.
pub fn make_type(type_name: &str, known: &KnownClasses) -> String {
    let base = base_type(type_name);
    if known.contains(base) {
        make_link(type_name, &page_file(base))
    } else {
        format!("`{}`", type_name)
    }
}

/// In-page link to the detail block of a member.
pub fn member_link(name: &str) -> String {
    make_link(name, &format!("#i_{}", name))
}

/// Cross-page link to a member of another class.
pub fn foreign_member_link(class: &str, name: &str) -> String {
    make_link(
        &format!("{}.{}", class, name),
        &format!("{}#i_{}", page_file(class), name),
    )
}

/// HTML anchor targeted by [`member_link`]; plain markdown has no anchor syntax.
pub fn member_anchor(name: &str) -> String {
    format!("<span id=\"i_{}\"></span>", name)
}

/// `( int a, float b=1.0 )`, `( )` when empty.
pub fn make_arglist(params: &[Param], known: &KnownClasses) -> String {
    let mut s = String::from("(");
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            s.push(',');
        }
        s.push(' ');
        s.push_str(&make_type(&param.type_name, known));
        s.push(' ');
        s.push_str(&param.name);
        if let Some(ref default) = param.default {
            s.push('=');
            s.push_str(default);
        }
    }
    s.push_str(" )");
    s
}

/// GitHub-flavored table; the first row is the header.
///
/// Short rows are padded with empty cells and `|` inside cells is escaped.
pub fn make_table(rows: &[Vec<String>]) -> String {
    let Some(header) = rows.first() else {
        return String::new();
    };
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);

    let render_row = |row: &[String]| {
        let mut line = String::from("|");
        for col in 0..width {
            let cell = row.get(col).map(String::as_str).unwrap_or("");
            line.push(' ');
            line.push_str(&cell.replace('|', "\\|"));
            line.push_str(" |");
        }
        line
    };

    let mut lines = vec![render_row(header.as_slice())];
    lines.push(format!("|{}", " --- |".repeat(width)));
    for row in &rows[1..] {
        lines.push(render_row(row.as_slice()));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(names: &[&str]) -> KnownClasses {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn param(type_name: &str, name: &str, default: Option<&str>) -> Param {
        Param {
            type_name: type_name.to_string(),
            name: name.to_string(),
            default: default.map(str::to_string),
        }
    }

    #[test]
    fn base_type_strips_decoration() {
        assert_eq!(base_type("Foo"), "Foo");
        assert_eq!(base_type("Foo[]"), "Foo");
        assert_eq!(base_type("Array[Foo]"), "Foo");
        assert_eq!(base_type("Dictionary[String, Foo]"), "Foo");
    }

    #[test]
    fn known_type_links_to_page() {
        let k = known(&["Foo"]);
        assert_eq!(make_type("Foo", &k), "[Foo](Foo.md)");
        assert_eq!(make_type("Array[Foo]", &k), "[Array[Foo]](Foo.md)");
    }

    #[test]
    fn unknown_type_is_code() {
        assert_eq!(make_type("int", &known(&[])), "`int`");
    }

    #[test]
    fn arglist_formatting() {
        let k = known(&[]);
        assert_eq!(make_arglist(&[], &k), "( )");
        assert_eq!(
            make_arglist(
                &[param("int", "a", None), param("float", "b", Some("1.0"))],
                &k
            ),
            "( `int` a, `float` b=1.0 )"
        );
    }

    #[test]
    fn table_with_header() {
        let rows = vec![
            vec!["Type".to_string(), "Name".to_string()],
            vec!["`int`".to_string(), "a|b".to_string()],
            vec!["`bool`".to_string()],
        ];
        assert_eq!(
            make_table(&rows),
            "| Type | Name |\n| --- | --- |\n| `int` | a\\|b |\n| `bool` |  |"
        );
    }

    #[test]
    fn anchors_and_links() {
        assert_eq!(member_link("value"), "[value](#i_value)");
        assert_eq!(member_anchor("value"), "<span id=\"i_value\"></span>");
        assert_eq!(foreign_member_link("Foo", "run"), "[Foo.run](Foo.md#i_run)");
    }
}
