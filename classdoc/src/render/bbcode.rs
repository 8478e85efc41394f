//! BBCode → markdown rewriting for description text.
//!
//! Class XML descriptions use the engine's BBCode dialect: `[b]`, `[code]`,
//! `[codeblock]`, `[url=...]`, bare `[ClassName]` references and
//! `[method name]`-style member references. Text between `[code]` or
//! code block tags is copied untouched.

use crate::model::KnownClasses;
use crate::render::markup::{foreign_member_link, make_type, member_link};
use regex::Regex;
use std::sync::LazyLock;

static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\[\]\n]+)\]").unwrap());

static RE_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@?[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Convert a raw description into markdown.
///
/// `current_class` decides whether a member reference stays on the page
/// (`[method foo]`, `[method Current.foo]`) or links to another page.
pub fn format_text(text: &str, known: &KnownClasses, current_class: &str) -> String {
    let source = dedent(text);
    let mut f = Formatter {
        known,
        current_class,
        out: String::with_capacity(source.len()),
        mode: Mode::Text,
        urls: Vec::new(),
        fence_start: false,
    };

    let mut last = 0;
    for caps in RE_TAG.captures_iter(&source) {
        let whole = caps.get(0).map_or(0..0, |m| m.range());
        f.literal(&source[last..whole.start]);
        f.tag(&caps[1], &source[whole.clone()]);
        last = whole.end;
    }
    f.literal(&source[last..]);
    f.close_urls();

    f.out.trim().to_string()
}

enum Mode {
    Text,
    /// Inside `[code]`.
    Code,
    /// Inside a fenced block; holds the closing tag.
    CodeBlock(&'static str),
}

struct Formatter<'a> {
    known: &'a KnownClasses,
    current_class: &'a str,
    out: String,
    mode: Mode,
    /// Open `[url]` tags: `Some(target)` for `[url=target]`, `None` for bare `[url]`.
    urls: Vec<Option<String>>,
    /// Set right after a fence line is written.
    fence_start: bool,
}

impl Formatter<'_> {
    fn literal(&mut self, text: &str) {
        if !matches!(self.mode, Mode::Text) {
            let text = if std::mem::take(&mut self.fence_start) {
                text.strip_prefix('\n').unwrap_or(text)
            } else {
                text
            };
            self.out.push_str(text);
            return;
        }
        // Every source line is its own paragraph.
        let mut lines = text.split('\n');
        if let Some(first) = lines.next() {
            self.out.push_str(first);
        }
        for line in lines {
            self.paragraph_break();
            self.out.push_str(line);
        }
    }

    fn paragraph_break(&mut self) {
        if self.out.is_empty() || self.out.ends_with("\n\n") {
            return;
        }
        if self.out.ends_with('\n') {
            self.out.push('\n');
        } else {
            self.out.push_str("\n\n");
        }
    }

    fn tag(&mut self, inner: &str, raw: &str) {
        match self.mode {
            Mode::Code => {
                if inner == "/code" {
                    self.out.push('`');
                    self.mode = Mode::Text;
                } else {
                    self.out.push_str(raw);
                }
                return;
            }
            Mode::CodeBlock(close) => {
                self.fence_start = false;
                if inner == close {
                    if !self.out.ends_with('\n') {
                        self.out.push('\n');
                    }
                    self.out.push_str("```");
                    self.mode = Mode::Text;
                } else {
                    self.out.push_str(raw);
                }
                return;
            }
            Mode::Text => {}
        }

        match inner {
            "b" | "/b" => self.out.push_str("**"),
            "i" | "/i" => self.out.push_str("*"),
            "s" | "/s" => self.out.push_str("~~"),
            "u" => self.out.push_str("<u>"),
            "/u" => self.out.push_str("</u>"),
            "kbd" => self.out.push_str("<kbd>"),
            "/kbd" => self.out.push_str("</kbd>"),
            "br" => self.out.push_str("<br>"),
            "code" => {
                self.out.push('`');
                self.mode = Mode::Code;
            }
            "codeblock" => self.open_block("gdscript", "/codeblock"),
            "gdscript" => self.open_block("gdscript", "/gdscript"),
            "csharp" => self.open_block("csharp", "/csharp"),
            "center" | "/center" | "codeblocks" | "/codeblocks" | "/color" | "/font" => {}
            "url" => {
                self.out.push('<');
                self.urls.push(None);
            }
            "/url" => match self.urls.pop() {
                Some(Some(target)) => {
                    self.out.push_str("](");
                    self.out.push_str(&target);
                    self.out.push(')');
                }
                Some(None) => self.out.push('>'),
                None => self.out.push_str(raw),
            },
            _ => self.parametric(inner, raw),
        }
    }

    /// Tags carrying an argument (`[url=x]`, `[method x]`) and class references.
    fn parametric(&mut self, inner: &str, raw: &str) {
        if let Some(target) = inner.strip_prefix("url=") {
            self.out.push('[');
            self.urls.push(Some(target.to_string()));
            return;
        }
        if inner.starts_with("color=") || inner.starts_with("font=") {
            return;
        }
        if let Some(lang) = inner.strip_prefix("codeblock lang=") {
            let lang = if lang == "gdscript" || lang == "csharp" { lang } else { "text" };
            self.open_block(lang, "/codeblock");
            return;
        }

        if let Some((kind, arg)) = inner.split_once(' ') {
            match kind {
                "method" | "member" | "signal" | "constant" | "theme_item"
                | "annotation" => {
                    let link = self.member_ref(arg);
                    self.out.push_str(&link);
                }
                "enum" | "param" => {
                    self.out.push('`');
                    self.out.push_str(arg);
                    self.out.push('`');
                }
                _ => self.out.push_str(raw),
            }
            return;
        }

        if RE_IDENT.is_match(inner) {
            let link = make_type(inner, self.known);
            self.out.push_str(&link);
        } else {
            self.out.push_str(raw);
        }
    }

    fn member_ref(&self, target: &str) -> String {
        match target.rsplit_once('.') {
            None => member_link(target),
            Some((class, member)) if class == self.current_class => member_link(member),
            Some((class, member)) if self.known.contains(class) => {
                foreign_member_link(class, member)
            }
            Some(_) => format!("`{}`", target),
        }
    }

    fn open_block(&mut self, lang: &str, close: &'static str) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
        self.out.push_str("```");
        self.out.push_str(lang);
        self.out.push('\n');
        self.fence_start = true;
        self.mode = Mode::CodeBlock(close);
    }

    /// An unclosed `[url]` runs to the end of the text.
    fn close_urls(&mut self) {
        while let Some(url) = self.urls.pop() {
            match url {
                Some(target) => {
                    self.out.push_str("](");
                    self.out.push_str(&target);
                    self.out.push(')');
                }
                None => self.out.push('>'),
            }
        }
    }
}

/// Strip the indentation shared by all non-blank lines, plus leading and
/// trailing blank lines.
fn dedent(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let is_blank = |l: &&str| l.trim().is_empty();

    let Some(start) = lines.iter().position(|l| !is_blank(l)) else {
        return String::new();
    };
    let end = lines.iter().rposition(|l| !is_blank(l)).unwrap_or(start);

    let indent = lines[start..=end]
        .iter()
        .filter(|l| !is_blank(l))
        .map(|l| l.len() - l.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    lines[start..=end]
        .iter()
        .map(|l| if is_blank(l) { "" } else { &l[indent..] })
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}
