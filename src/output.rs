//! CLI output formatting for both pipeline stages.
//!
//! Output is **information-centric, not file-centric**: every entity leads
//! with its semantic identity — resource kind, name, counts — with
//! filesystem paths shown as indented `Source:` context lines. Skipped
//! entries always appear with their reason, so a run that quietly dropped a
//! resource is visible at a glance.
//!
//! ```text
//! Strings
//!     001 Localizable (5 keys)
//!         Locales: Base, en
//! Images
//!     001 testImage
//!         Source: Assets.xcassets/testImage.imageset
//! Storyboards
//!     001 Main (2 scenes, 1 segue)
//!
//! Skipped
//!     unsupported-format-specifier Localizable/hex
//!         unsupported format specifier %x
//! ```
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::generate::{Diagnostic, DiagnosticKind, GenerationOutput};
use crate::scan::ResourceSet;
use std::collections::BTreeSet;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn count_noun(count: usize, singular: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {singular}s")
    }
}

fn kind_label(kind: DiagnosticKind) -> &'static str {
    match kind {
        DiagnosticKind::UnsupportedFormatSpecifier => "unsupported-format-specifier",
        DiagnosticKind::IdentifierCollisionUnresolved => "identifier-collision",
        DiagnosticKind::MalformedResourceEntry => "malformed-entry",
        DiagnosticKind::TemplateTokenMissing => "template-token-missing",
        DiagnosticKind::EmptyResourceSet => "empty-resource-set",
    }
}

// ============================================================================
// Scan output
// ============================================================================

/// Format the discovered resource inventory.
///
/// With `verbose`, every string key and scene identifier is listed; the
/// terse form shows per-resource counts only.
pub fn format_scan_output(set: &ResourceSet, verbose: bool) -> Vec<String> {
    let mut lines = Vec::new();

    if !set.tables.is_empty() {
        lines.push("Strings".to_string());
        for (i, table) in set.tables.iter().enumerate() {
            lines.push(format!(
                "    {} {} ({})",
                format_index(i + 1),
                table.name,
                count_noun(table.keys.len(), "key"),
            ));
            let locales: BTreeSet<&str> = table
                .keys
                .values()
                .flat_map(|values| values.keys().map(String::as_str))
                .collect();
            lines.push(format!(
                "        Locales: {}",
                locales.into_iter().collect::<Vec<_>>().join(", ")
            ));
            if verbose {
                for key in table.keys.keys() {
                    lines.push(format!("        {key}"));
                }
            }
        }
    }

    if !set.images.is_empty() {
        lines.push("Images".to_string());
        for (i, image) in set.images.iter().enumerate() {
            lines.push(format!("    {} {}", format_index(i + 1), image.name));
            lines.push(format!("        Source: {}", image.source));
        }
    }

    if !set.storyboards.is_empty() {
        lines.push("Storyboards".to_string());
        for (i, storyboard) in set.storyboards.iter().enumerate() {
            lines.push(format!(
                "    {} {} ({}, {})",
                format_index(i + 1),
                storyboard.name,
                count_noun(storyboard.scene_identifiers.len(), "scene"),
                count_noun(storyboard.segue_identifiers.len(), "segue"),
            ));
            if verbose {
                for scene in &storyboard.scene_identifiers {
                    lines.push(format!("        Scene: {scene}"));
                }
                for segue in &storyboard.segue_identifiers {
                    lines.push(format!("        Segue: {segue}"));
                }
            }
        }
    }

    if set.is_empty() {
        lines.push("No resources found".to_string());
    }

    if !set.issues.is_empty() {
        lines.push(String::new());
        lines.push("Issues".to_string());
        for issue in &set.issues {
            lines.push(format!("    {}: {}", issue.path, issue.detail));
        }
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(set: &ResourceSet, verbose: bool) {
    for line in format_scan_output(set, verbose) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate output
// ============================================================================

fn file_status(written: bool) -> &'static str {
    if written { "written" } else { "unchanged" }
}

/// Format the generation report: classes, output files, skipped entries.
pub fn format_generate_output(output: &GenerationOutput) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Classes".to_string());
    for (i, name) in output.classes.iter().enumerate() {
        lines.push(format!("    {} {}", format_index(i + 1), name));
    }

    lines.push(format!(
        "{} \u{2192} {}",
        output
            .header_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        file_status(output.header_written),
    ));
    lines.push(format!(
        "{} \u{2192} {}",
        output
            .implementation_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        file_status(output.implementation_written),
    ));

    lines.extend(format_diagnostics(&output.diagnostics));

    lines.push(format!(
        "Generated {}, {} skipped",
        count_noun(output.classes.len(), "class"),
        count_noun(output.diagnostics.len(), "entry"),
    ));

    lines
}

/// Format the skipped-entry list, empty when there is nothing to report.
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> Vec<String> {
    if diagnostics.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![String::new(), "Skipped".to_string()];
    for diagnostic in diagnostics {
        lines.push(format!(
            "    {} {}",
            kind_label(diagnostic.kind),
            diagnostic.subject
        ));
        lines.push(format!("        {}", diagnostic.detail));
    }
    lines
}

/// Print the generation report to stdout.
pub fn print_generate_output(output: &GenerationOutput) {
    for line in format_generate_output(output) {
        println!("{}", line);
    }
}
