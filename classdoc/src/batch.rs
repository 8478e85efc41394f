//! Directory mode: convert every class XML in a folder and write the index.

use crate::clock::Clock;
use crate::hierarchy::{Ancestors, Hierarchy, Source};
use crate::parser;
use crate::render::index::{render_index, INDEX_FILE};
use crate::render::markup::page_file;
use crate::render::page::{render_page, PageContext};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// Run one batch conversion and return the number of class pages written.
///
/// Stale `*.md` files in `dst_dir` are removed first. Files that are not
/// valid class documents are reported and skipped; I/O errors abort.
pub fn run_batch(
    src_dir: &Path,
    dst_dir: &Path,
    ancestors: &Ancestors,
    clock: &dyn Clock,
) -> Result<usize> {
    prepare_output_dir(dst_dir)?;

    let mut sources = Vec::new();
    for path in list_files(src_dir, "xml")? {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        match parser::parse(&path, &content) {
            Ok(doc) => sources.push(Source { path, doc }),
            Err(e) => error!("skipping {}", e),
        }
    }

    let hierarchy = Hierarchy::assemble(sources, ancestors);
    for orphan in hierarchy.orphans() {
        warn!(
            "class {} inherits unknown class {}, leaving it out of the index",
            orphan.name, orphan.parent_name
        );
    }
    let known = hierarchy.known_names();
    let ctx = PageContext {
        known: &known,
        today: clock.today(),
    };

    let mut count = 0;
    for record in hierarchy.known_in_set() {
        let Some(ref source) = record.source else {
            continue;
        };
        // Named after the class, not the file, so `[Name](Name.md)` links resolve.
        let dest = dst_dir.join(page_file(&record.name));
        debug!("converting {} -> {}", source.path.display(), dest.display());

        let children: Vec<&str> = hierarchy.children(record).map(|c| c.name.as_str()).collect();
        let page = render_page(&source.doc, &children, &ctx);
        fs::write(&dest, page).with_context(|| format!("failed to write {}", dest.display()))?;
        count += 1;
    }

    let index_path = dst_dir.join(INDEX_FILE);
    debug!("writing {}", index_path.display());
    fs::write(&index_path, render_index(&hierarchy, &known))
        .with_context(|| format!("failed to write {}", index_path.display()))?;

    Ok(count)
}

/// Create `dst_dir` if needed and delete pages left over from earlier runs.
fn prepare_output_dir(dst_dir: &Path) -> Result<()> {
    if !dst_dir.is_dir() {
        debug!("making output directory {}", dst_dir.display());
        fs::create_dir_all(dst_dir).with_context(|| {
            format!("failed to create output directory: {}", dst_dir.display())
        })?;
    }

    for stale in list_files(dst_dir, "md")? {
        debug!("removing old {}", stale.display());
        fs::remove_file(&stale)
            .with_context(|| format!("failed to remove {}", stale.display()))?;
    }
    Ok(())
}

/// Files `dir/*.{ext}`, sorted for deterministic output.
fn list_files(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }
    let pattern = format!(
        "{}/*.{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        ext
    );
    let mut files: Vec<PathBuf> = glob::glob(&pattern)
        .with_context(|| format!("invalid glob pattern: {}", pattern))?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    Ok(files)
}
