//! Source resolution: pick the most recent file matching each configured pattern
//!
//! "Most recent" means lexicographically last path, so date-stamped file names
//! (`scores_2021-06-01.csv`) select the newest snapshot.

use crate::domain::{fallback_caption, Config, SourceEntry};
use crate::error::{MergeError, MergeResult};
use crate::utils::normalize_path;
use globset::GlobBuilder;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const GLOB_META: [char; 4] = ['*', '?', '[', '{'];

/// Resolve every configured source, in declaration order.
///
/// Only resolved sources receive an ordinal; a pattern without matches keeps
/// its place in the list but contributes no column.
pub fn resolve_sources(config: &Config) -> MergeResult<Vec<SourceEntry>> {
    let base_dir = config.defaults.base_dir();
    let mut ordinal = 0usize;
    let mut entries = Vec::with_capacity(config.sources.len());

    for spec in &config.sources {
        let path = resolve_latest(base_dir, &spec.pattern)?;
        let (entry_ordinal, caption) = match &path {
            Some(found) => {
                ordinal += 1;
                let caption = spec.caption.clone().unwrap_or_else(|| fallback_caption(ordinal));
                tracing::debug!(
                    "Source #{} '{}' -> {} (caption '{}')",
                    ordinal,
                    spec.pattern,
                    found.display(),
                    caption
                );
                (Some(ordinal), Some(caption))
            }
            None => {
                tracing::info!("Source '{}' matched no files; skipping", spec.pattern);
                (None, spec.caption.clone())
            }
        };

        entries.push(SourceEntry {
            pattern: spec.pattern.clone(),
            path,
            ordinal: entry_ordinal,
            username_column: spec
                .username
                .clone()
                .unwrap_or_else(|| config.defaults.username().to_string()),
            value_column: spec.value.clone().unwrap_or_else(|| config.defaults.value().to_string()),
            caption,
        });
    }

    Ok(entries)
}

/// Resolve the patch pattern, if one is configured.
pub fn resolve_patch(config: &Config) -> MergeResult<Option<PathBuf>> {
    let Some(pattern) = config.patch.as_deref() else {
        return Ok(None);
    };
    let found = resolve_latest(config.defaults.base_dir(), pattern)?;
    match &found {
        Some(path) => tracing::debug!("Patch '{}' -> {}", pattern, path.display()),
        None => tracing::info!("Patch '{}' matched no files; skipping", pattern),
    }
    Ok(found)
}

/// Lexicographically last file matching `pattern` under `base_dir`.
pub fn resolve_latest(base_dir: &Path, pattern: &str) -> MergeResult<Option<PathBuf>> {
    Ok(glob_files(base_dir, pattern)?.pop())
}

/// All regular files matching `base_dir/pattern`, sorted by path string.
///
/// `*` and `?` do not cross directory separators; `**` does. Names starting
/// with `.` only match a pattern component that starts with `.` too. An empty
/// `base_dir` leaves the pattern relative to the working directory.
pub fn glob_files(base_dir: &Path, pattern: &str) -> MergeResult<Vec<PathBuf>> {
    let full = base_dir.join(pattern);
    let (prefix, rest) = split_literal_prefix(&full);

    if rest.is_empty() {
        return Ok(if prefix.is_file() { vec![prefix] } else { Vec::new() });
    }

    let walk_root = if prefix.as_os_str().is_empty() { PathBuf::from(".") } else { prefix.clone() };
    if !walk_root.is_dir() {
        return Ok(Vec::new());
    }

    let rest_pattern = rest.join("/");
    let matcher = GlobBuilder::new(&rest_pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| MergeError::Glob { pattern: pattern.to_string(), source })?
        .compile_matcher();

    let mut walker = WalkDir::new(&walk_root).min_depth(1).follow_links(true);
    if !rest.iter().any(|part| part.contains("**")) {
        walker = walker.max_depth(rest.len());
    }

    let mut matches: Vec<(String, PathBuf)> = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::debug!("Skipping unreadable entry while matching '{}': {}", pattern, err);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(&walk_root) else {
            continue;
        };
        let relative = normalize_path(&relative.to_string_lossy());
        if matcher.is_match(&relative) && !has_unrequested_hidden(&relative, &rest) {
            let path = prefix.join(&relative);
            matches.push((normalize_path(&path.to_string_lossy()), path));
        }
    }

    matches.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(matches.into_iter().map(|(_, path)| path).collect())
}

/// Whether a hidden component of `relative` lines up with a pattern component
/// that does not itself start with `.`.
///
/// The file name is checked against the last pattern component; directories
/// against the component at the same depth, which after a `**` never asks for
/// a hidden name.
fn has_unrequested_hidden(relative: &str, rest: &[String]) -> bool {
    let parts: Vec<&str> = relative.split('/').collect();
    let recursive = rest.iter().any(|part| part.contains("**"));
    parts.iter().enumerate().any(|(i, part)| {
        if !part.starts_with('.') {
            return false;
        }
        let requested = if i + 1 == parts.len() {
            rest.last()
        } else if recursive {
            None
        } else {
            rest.get(i)
        };
        !requested.is_some_and(|p| p.starts_with('.'))
    })
}

/// Split a path into its leading glob-free directories and the remaining components.
fn split_literal_prefix(path: &Path) -> (PathBuf, Vec<String>) {
    let mut prefix = PathBuf::new();
    let mut rest = Vec::new();
    for component in path.components() {
        let part = component.as_os_str().to_string_lossy();
        if rest.is_empty() && !part.contains(GLOB_META) {
            prefix.push(component);
        } else if !matches!(component, Component::RootDir | Component::Prefix(_)) {
            rest.push(part.into_owned());
        }
    }
    (prefix, rest)
}
