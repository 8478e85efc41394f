//! classdoc — convert engine class reference XML files into markdown.
//!
//! Two modes:
//!
//! - **single file**: `classdoc Foo.xml [Foo.md]` (stdout when no output is given)
//! - **batch**: `classdoc --src-dir doc/classes --dst-dir docs/api` writes one
//!   page per class plus `all_classes.md`, the inheritance tree.

mod batch;
mod clock;
mod error;
mod hierarchy;
mod logger;
mod model;
mod parser;
mod render;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clock::{Clock, SystemClock};
use hierarchy::Ancestors;
use render::page::{render_page, PageContext};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "classdoc",
    about = "Convert class reference XML files into markdown pages"
)]
struct Cli {
    /// Class XML file to convert
    #[arg(conflicts_with = "src_dir")]
    input: Option<PathBuf>,

    /// Output markdown file. Prints to stdout if omitted.
    output: Option<PathBuf>,

    /// Convert every *.xml in this directory (batch mode)
    #[arg(long, requires = "dst_dir")]
    src_dir: Option<PathBuf>,

    /// Output directory for batch mode; stale *.md files in it are removed
    #[arg(long, requires = "src_dir")]
    dst_dir: Option<PathBuf>,

    /// Extra ancestor class for the index, as CHILD=PARENT (repeatable)
    #[arg(long = "ancestor", value_name = "CHILD=PARENT")]
    ancestors: Vec<String>,

    /// Do not add the built-in engine base classes to the hierarchy
    #[arg(long)]
    no_default_ancestors: bool,

    /// Log every file operation
    #[arg(short, long)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_logger(cli.verbose, cli.quiet);

    if let (Some(src), Some(dst)) = (&cli.src_dir, &cli.dst_dir) {
        let ancestors = build_ancestors(&cli)?;
        let count = batch::run_batch(src, dst, &ancestors, &SystemClock)?;
        println!("Generated {} files in {}.", count, dst.display());
        return Ok(());
    }

    match cli.input {
        Some(ref input) => single_file(input, cli.output.as_deref(), &SystemClock),
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}

fn build_ancestors(cli: &Cli) -> Result<Ancestors> {
    let mut ancestors = if cli.no_default_ancestors {
        Ancestors::default()
    } else {
        Ancestors::engine_defaults()
    };
    for entry in &cli.ancestors {
        ancestors.push_entry(entry)?;
    }
    Ok(ancestors)
}

/// Render one file on its own: no other classes are known, so nothing links.
fn single_file(input: &Path, output: Option<&Path>, clock: &dyn Clock) -> Result<()> {
    let content = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let doc = parser::parse(input, &content)?;

    let known = model::KnownClasses::new();
    let ctx = PageContext {
        known: &known,
        today: clock.today(),
    };
    let page = render_page(&doc, &[], &ctx);

    match output {
        Some(path) => fs::write(path, page)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{}", page),
    }
    Ok(())
}
