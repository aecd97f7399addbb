//! Resource discovery.
//!
//! Walks the project tree and produces a [`ResourceSet`] — the ordered,
//! structured inventory the generators consume. This module owns every
//! filesystem read on the input side; the generation core never touches
//! disk.
//!
//! ## What is discovered
//!
//! ```text
//! project/
//! ├── Base.lproj/Localizable.strings    # table "Localizable", locale "Base"
//! ├── en.lproj/Localizable.strings      # table "Localizable", locale "en"
//! ├── Other.strings                     # not in an .lproj → locale "Undefined"
//! ├── Assets.xcassets/
//! │   └── testImage.imageset/           # image "testImage"
//! ├── icon@2x.png                       # loose image "icon" (scale suffix stripped)
//! └── Main.storyboard                   # scenes + segues
//! ```
//!
//! ## Ordering
//!
//! Everything lands in sorted containers, so the generators see a
//! deterministic sequence regardless of directory iteration order and
//! generated output is byte-identical across runs on unchanged input.
//!
//! ## Failure policy
//!
//! A file that cannot be read or a line that cannot be parsed becomes a
//! [`ScanIssue`] and is skipped; discovery continues. Only an unusable base
//! directory fails the scan itself.

use crate::apple::{storyboard, strings_file};
use crate::config::GeneratorConfig;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("base path {0} is not a directory")]
    BadBasePath(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Locale → pattern text for one key.
pub type LocalizedValues = BTreeMap<String, String>;

/// One `.strings` table, merged across locales.
#[derive(Debug, Clone, Serialize)]
pub struct StringsTable {
    /// Table name (`Localizable` for `Localizable.strings`).
    pub name: String,
    /// Raw key → per-locale values, both in sorted order.
    pub keys: BTreeMap<String, LocalizedValues>,
}

/// One image asset, named but never decoded.
#[derive(Debug, Clone, Serialize)]
pub struct ImageAsset {
    pub name: String,
    /// Where the asset was found, for display only.
    pub source: String,
}

/// One storyboard with its extracted scene graph.
#[derive(Debug, Clone, Serialize)]
pub struct StoryboardResource {
    pub name: String,
    pub has_initial_scene: bool,
    pub scene_identifiers: Vec<String>,
    pub segue_identifiers: Vec<String>,
}

/// A skipped file or entry, with the reason.
#[derive(Debug, Clone, Serialize)]
pub struct ScanIssue {
    pub path: String,
    pub detail: String,
}

/// Inventory produced by [`scan`].
#[derive(Debug, Default, Serialize)]
pub struct ResourceSet {
    pub tables: Vec<StringsTable>,
    pub images: Vec<ImageAsset>,
    pub storyboards: Vec<StoryboardResource>,
    pub issues: Vec<ScanIssue>,
}

impl ResourceSet {
    /// True when no kind discovered any resource at all.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.images.is_empty() && self.storyboards.is_empty()
    }
}

/// Designated base locale for `.strings` tables.
pub const BASE_LOCALE: &str = "Base";

/// Locale reported for `.strings` files outside any `.lproj` directory.
pub const UNDEFINED_LOCALE: &str = "Undefined";

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "pdf"];

/// Walk the configured base path and collect all enabled resource kinds.
pub fn scan(config: &GeneratorConfig) -> Result<ResourceSet, ScanError> {
    let base = Path::new(&config.base_path);
    if !base.is_dir() {
        return Err(ScanError::BadBasePath(config.base_path.clone()));
    }

    let mut tables: BTreeMap<String, BTreeMap<String, LocalizedValues>> = BTreeMap::new();
    let mut images: BTreeMap<String, String> = BTreeMap::new();
    let mut storyboards: BTreeMap<String, StoryboardResource> = BTreeMap::new();
    let mut issues = Vec::new();

    let walker = WalkDir::new(base)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            if name.starts_with('.') && entry.path() != base {
                return false;
            }
            let rel = entry.path().strip_prefix(base).unwrap_or(entry.path());
            !is_excluded(rel, &config.excluded)
        });

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                issues.push(ScanIssue {
                    path: err
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default(),
                    detail: err.to_string(),
                });
                continue;
            }
        };
        let path = entry.path();
        let rel = path.strip_prefix(base).unwrap_or(path);
        let name = entry.file_name().to_string_lossy().to_string();

        if entry.file_type().is_dir() {
            if config.resources.images
                && let Some(stem) = name.strip_suffix(".imageset")
                && !stem.is_empty()
            {
                images
                    .entry(stem.to_string())
                    .or_insert_with(|| rel.display().to_string());
            }
            continue;
        }

        if config.resources.strings && name.ends_with(".strings") {
            collect_strings_table(path, rel, &mut tables, &mut issues);
        } else if config.resources.storyboards && name.ends_with(".storyboard") {
            collect_storyboard(path, rel, &mut storyboards, &mut issues);
        } else if config.resources.images
            && is_loose_image(rel)
            && let Some(asset) = asset_name(&name)
        {
            images
                .entry(asset)
                .or_insert_with(|| rel.display().to_string());
        }
    }

    Ok(ResourceSet {
        tables: tables
            .into_iter()
            .map(|(name, keys)| StringsTable { name, keys })
            .collect(),
        images: images
            .into_iter()
            .map(|(name, source)| ImageAsset { name, source })
            .collect(),
        storyboards: storyboards.into_values().collect(),
        issues,
    })
}

fn collect_strings_table(
    path: &Path,
    rel: &Path,
    tables: &mut BTreeMap<String, BTreeMap<String, LocalizedValues>>,
    issues: &mut Vec<ScanIssue>,
) {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(err) => {
            issues.push(ScanIssue {
                path: rel.display().to_string(),
                detail: format!("unreadable: {err}"),
            });
            return;
        }
    };

    let table_name = file_stem(rel);
    let locale = locale_of(rel);
    let parsed = strings_file::parse(&content);

    for malformed in &parsed.malformed {
        issues.push(ScanIssue {
            path: rel.display().to_string(),
            detail: format!("line {}: {}", malformed.line, malformed.reason),
        });
    }

    let table = tables.entry(table_name).or_default();
    for (key, value) in parsed.entries {
        table.entry(key).or_default().insert(locale.clone(), value);
    }
}

fn collect_storyboard(
    path: &Path,
    rel: &Path,
    storyboards: &mut BTreeMap<String, StoryboardResource>,
    issues: &mut Vec<ScanIssue>,
) {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(err) => {
            issues.push(ScanIssue {
                path: rel.display().to_string(),
                detail: format!("unreadable: {err}"),
            });
            return;
        }
    };

    let graph = storyboard::parse(&content);
    let scenes: BTreeSet<String> = graph.scene_identifiers.into_iter().collect();
    let segues: BTreeSet<String> = graph.segue_identifiers.into_iter().collect();

    storyboards.insert(
        file_stem(rel),
        StoryboardResource {
            name: file_stem(rel),
            has_initial_scene: graph.has_initial_scene,
            scene_identifiers: scenes.into_iter().collect(),
            segue_identifiers: segues.into_iter().collect(),
        },
    );
}

/// Whether a relative path is covered by the exclusion list.
///
/// An entry excludes a subtree when the path starts with it, or any single
/// path component equals it (`"Pods"` excludes every Pods directory at any
/// depth).
fn is_excluded(rel: &Path, excluded: &[String]) -> bool {
    excluded.iter().any(|e| {
        rel.starts_with(e)
            || rel
                .components()
                .any(|c| c.as_os_str().to_string_lossy() == *e)
    })
}

/// Locale from the enclosing `.lproj` directory, `Undefined` otherwise.
fn locale_of(rel: &Path) -> String {
    rel.parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .and_then(|n| n.strip_suffix(".lproj"))
        .map(|l| l.to_string())
        .unwrap_or_else(|| UNDEFINED_LOCALE.to_string())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Loose images inside asset catalogs belong to their imageset, not to the
/// loose-file inventory.
fn is_loose_image(rel: &Path) -> bool {
    let in_catalog = rel.components().any(|c| {
        let name = c.as_os_str().to_string_lossy();
        name.ends_with(".xcassets") || name.ends_with(".imageset")
    });
    if in_catalog {
        return false;
    }
    rel.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Asset name from an image filename: strip the extension and any
/// `@2x`/`@3x` scale suffix, so `icon@2x.png` and `icon@3x.png` collapse
/// into one asset `icon`.
fn asset_name(filename: &str) -> Option<String> {
    let stem = Path::new(filename).file_stem()?.to_string_lossy();
    let name = match stem.rfind('@') {
        Some(pos) if stem[pos..].ends_with('x') && stem[pos + 1..stem.len() - 1].chars().all(|c| c.is_ascii_digit()) => {
            &stem[..pos]
        }
        _ => &stem[..],
    };
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
