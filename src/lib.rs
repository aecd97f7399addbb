//! # resgen
//!
//! A typed resource accessor generator for Objective-C projects. Your
//! resource files are the data source: `.strings` tables, asset catalogs,
//! and storyboards become one strongly-typed accessor class each, so client
//! code never references a resource by raw string literal.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      project/  →  ResourceSet        (filesystem → structured data)
//! 2. Generate  ResourceSet  →  R.h / R.m       (model → render → merge → write)
//! ```
//!
//! The split keeps every interesting computation pure: the scan stage owns
//! all input I/O, and inside the generate stage only the final write
//! touches disk. Everything between — identifier sanitization, format
//! analysis, the class model, template merging — is a function from values
//! to values, unit-testable without a filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — walks the project, parses resource files, produces the ordered [`scan::ResourceSet`] |
//! | [`generate`] | Stage 2 — per-kind class builders, template merging, write-if-changed output |
//! | [`model`] | Value objects for generated classes; each renders its own text |
//! | [`template`] | Placeholder tokens and the single-pass merge engine |
//! | [`format`] | Format-string analysis: localization patterns → ordered typed slots |
//! | [`ident`] | Raw keys → valid identifiers, with hash-suffix collision handling |
//! | [`apple`] | Hand-rolled readers for `.strings` and `.storyboard` files |
//! | [`config`] | `resgen.toml` loading, validation, stock config |
//! | [`output`] | CLI display — pure `format_*` functions with `print_*` wrappers |
//!
//! # Design Decisions
//!
//! ## Templates Over Whole-File Emission
//!
//! Generated text is injected into template files through opaque placeholder
//! tokens (`<#INTERFACE_BODY>`, …) rather than emitting whole files. Teams
//! keep hand-written prologues, pragma marks, and lint pragmas around the
//! managed sections; regeneration replaces only what it owns. Substitution
//! is a single pass and never re-scans substituted values, so a resource
//! value that happens to contain a token spelling cannot trigger runaway
//! expansion.
//!
//! ## Skip, Report, Continue
//!
//! A resource that cannot be generated — an unsupported format specifier,
//! an identifier collision the hash suffix cannot resolve, a malformed
//! `.strings` line — is skipped with a diagnostic, never aborting sibling
//! entries or other resource kinds. A run only fails outright when every
//! enabled kind comes up empty. The alternative (fail fast) turns one
//! exotic translation into a broken build for the whole team.
//!
//! ## Deterministic Output
//!
//! The scan stage sorts everything into `BTreeMap`s, builders consume those
//! sorted sequences, and rendering order is fixed by the model. Running
//! twice on unchanged input produces byte-identical files — and the writer
//! skips the write when content is unchanged, so file watchers and build
//! systems stay quiet.
//!
//! ## Identifiers Are Content-Addressed On Collision
//!
//! Distinct keys can sanitize to the same identifier. The first keeps the
//! plain spelling; later colliders get a suffix from the SHA-256 of their
//! raw key. A positional suffix (`_2`, `_3`) would renumber surviving
//! accessors whenever an unrelated key was added or removed; the content
//! hash keeps every generated name stable across runs.

pub mod apple;
pub mod config;
pub mod format;
pub mod generate;
pub mod ident;
pub mod model;
pub mod output;
pub mod scan;
pub mod template;
