//! Accessor class generation.
//!
//! The final stage of the pipeline. Takes the [`ResourceSet`] discovered by
//! [`scan`](crate::scan) and produces the generated header and
//! implementation files:
//!
//! 1. One builder per resource kind turns entries into [`GeneratedClass`]
//!    values — strings tables, images, storyboards — plus the aggregate
//!    class exposing one singleton accessor per kind.
//! 2. The rendered interface/extension/implementation texts are merged into
//!    the declaration and definition templates.
//! 3. The merged files are written, skipping the write when the content is
//!    unchanged so build systems watching the output stay quiet.
//!
//! Builders are independent — they share no state — so they run across
//! rayon workers; results are collected in fixed kind order before
//! rendering, keeping output deterministic.
//!
//! ## Failure policy
//!
//! Everything entry-level is recoverable: an unsupported format specifier,
//! an identifier collision the hash suffix cannot resolve, a malformed
//! entry — each becomes a [`Diagnostic`], the entry is skipped, and
//! generation continues. A kind with nothing left is omitted. Only a run
//! where every enabled kind came up empty fails with
//! [`GenerateError::NoUsableResources`].

use crate::config::GeneratorConfig;
use crate::format;
use crate::ident::{self, IdentPool};
use crate::model::{
    Comment, GeneratedClass, LazyGetter, MethodArgument, MethodImplementation, MethodSignature,
    Property,
};
use crate::scan::{BASE_LOCALE, ImageAsset, ResourceSet, StoryboardResource, StringsTable};
use crate::template::{self, Placeholder};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no usable resources found for any enabled resource kind")]
    NoUsableResources,
}

/// Why an entry (or section) was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    UnsupportedFormatSpecifier,
    IdentifierCollisionUnresolved,
    MalformedResourceEntry,
    TemplateTokenMissing,
    EmptyResourceSet,
}

/// One skipped entry with its reason; collected, never thrown.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// What was skipped (`Localizable/Key format`, `Main.storyboard`, …).
    pub subject: String,
    pub detail: String,
}

/// Result of a full generation run.
#[derive(Debug)]
pub struct GenerationOutput {
    pub header_path: PathBuf,
    pub implementation_path: PathBuf,
    pub header_text: String,
    pub implementation_text: String,
    /// Whether each file was actually (re)written.
    pub header_written: bool,
    pub implementation_written: bool,
    /// Generated class names, declaration order.
    pub classes: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Reserved type names every builder's pool is seeded with, so a resource
/// that sanitizes to a container name gets the hash suffix instead.
const CONTAINER_STRINGS: &str = "Strings";
const CONTAINER_IMAGES: &str = "Images";
const CONTAINER_STORYBOARDS: &str = "Storyboards";

/// Run the generation stage: build, render, merge, write.
pub fn generate(
    config: &GeneratorConfig,
    resources: &ResourceSet,
) -> Result<GenerationOutput, GenerateError> {
    let (classes, mut diagnostics) = build_classes(config, resources)?;

    let (interface_body, private_body, implementation_body) = render_texts(&classes);

    let declaration_template = load_template(
        config,
        config.templates.declaration.as_deref(),
        template::DECLARATION_TEMPLATE,
    )?;
    let definition_template = load_template(
        config,
        config.templates.definition.as_deref(),
        template::DEFINITION_TEMPLATE,
    )?;

    report_missing_tokens(
        &declaration_template,
        &[Placeholder::InterfaceHeader, Placeholder::InterfaceBody],
        "declaration template",
        &mut diagnostics,
    );
    report_missing_tokens(
        &definition_template,
        &[
            Placeholder::ImplementationHeader,
            Placeholder::PrivateInterfaceBody,
            Placeholder::ImplementationBody,
        ],
        "definition template",
        &mut diagnostics,
    );

    let header_values = BTreeMap::from([
        (
            Placeholder::InterfaceHeader,
            file_banner(&format!("{}.h", config.class_name), "#import <UIKit/UIKit.h>"),
        ),
        (Placeholder::InterfaceBody, interface_body),
        (Placeholder::PrivateInterfaceBody, private_body.clone()),
    ]);
    let implementation_values = BTreeMap::from([
        (
            Placeholder::ImplementationHeader,
            file_banner(
                &format!("{}.m", config.class_name),
                &format!("#import \"{}.h\"", config.class_name),
            ),
        ),
        (Placeholder::PrivateInterfaceBody, private_body),
        (Placeholder::ImplementationBody, implementation_body),
    ]);

    let header_text = template::merge(&declaration_template, &header_values);
    let implementation_text = template::merge(&definition_template, &implementation_values);

    let output_dir = Path::new(&config.output_dir);
    fs::create_dir_all(output_dir)?;
    let header_path = output_dir.join(format!("{}.h", config.class_name));
    let implementation_path = output_dir.join(format!("{}.m", config.class_name));

    let header_written = write_if_changed(&header_path, &header_text)?;
    let implementation_written = write_if_changed(&implementation_path, &implementation_text)?;

    Ok(GenerationOutput {
        header_path,
        implementation_path,
        header_text,
        implementation_text,
        header_written,
        implementation_written,
        classes: classes.iter().map(|c| c.name.clone()).collect(),
        diagnostics,
    })
}

/// Build every generated class from the resource set, pure of I/O.
///
/// Classes come back in fixed order — strings tables, strings container,
/// images, storyboard classes, storyboards container, aggregate — so a
/// class is always declared before the container that references it.
pub fn build_classes(
    config: &GeneratorConfig,
    resources: &ResourceSet,
) -> Result<(Vec<GeneratedClass>, Vec<Diagnostic>), GenerateError> {
    let mut diagnostics: Vec<Diagnostic> = resources
        .issues
        .iter()
        .map(|issue| Diagnostic {
            kind: DiagnosticKind::MalformedResourceEntry,
            subject: issue.path.clone(),
            detail: issue.detail.clone(),
        })
        .collect();

    // Independent builders, fanned out across workers.
    let (strings_out, (images_out, storyboards_out)) = rayon::join(
        || build_strings(config, &resources.tables),
        || {
            rayon::join(
                || build_images(config, &resources.images),
                || build_storyboards(config, &resources.storyboards),
            )
        },
    );

    let mut classes = Vec::new();
    let mut containers = Vec::new();

    let kind_outputs = [
        ("strings", config.resources.strings, strings_out),
        ("images", config.resources.images, images_out),
        ("storyboards", config.resources.storyboards, storyboards_out),
    ];
    for (kind, enabled, output) in kind_outputs {
        diagnostics.extend(output.diagnostics);
        if !enabled {
            continue;
        }
        if output.classes.is_empty() {
            diagnostics.push(Diagnostic {
                kind: DiagnosticKind::EmptyResourceSet,
                subject: kind.to_string(),
                detail: "no valid entries; generated class omitted".to_string(),
            });
            continue;
        }
        classes.extend(output.classes);
        if let Some(container) = output.container {
            containers.push(container);
        }
    }

    if classes.is_empty() {
        return Err(GenerateError::NoUsableResources);
    }

    classes.push(build_aggregate(&config.class_name, &containers));

    Ok((classes, diagnostics))
}

/// Concatenate the rendered surfaces of all classes, two blank-line
/// separated, as `(interface, private extension, implementation)` bodies.
pub fn render_texts(classes: &[GeneratedClass]) -> (String, String, String) {
    let mut interfaces = Vec::new();
    let mut extensions = Vec::new();
    let mut implementations = Vec::new();

    for class in classes {
        let (public, private) = class.render_interface();
        interfaces.push(public);
        if !private.is_empty() {
            extensions.push(private);
        }
        implementations.push(class.render_implementation());
    }

    (
        interfaces.join("\n\n"),
        extensions.join("\n\n"),
        implementations.join("\n\n"),
    )
}

// ============================================================================
// Per-kind builders
// ============================================================================

struct KindOutput {
    classes: Vec<GeneratedClass>,
    diagnostics: Vec<Diagnostic>,
    /// `(class name, aggregate accessor name)` when the kind produced a
    /// container class.
    container: Option<(String, String)>,
}

impl KindOutput {
    fn empty() -> Self {
        Self {
            classes: Vec::new(),
            diagnostics: Vec::new(),
            container: None,
        }
    }
}

/// Seed a type pool with the container names (and the aggregate class name)
/// that entries of this kind must not shadow.
fn type_pool_for(own_container: &str, config: &GeneratorConfig) -> IdentPool {
    let mut pool = IdentPool::new();
    for reserved in [
        own_container,
        CONTAINER_STRINGS,
        CONTAINER_IMAGES,
        CONTAINER_STORYBOARDS,
        config.class_name.as_str(),
    ] {
        // Seeding: first claim wins, duplicates are irrelevant.
        let _ = pool.claim(reserved.to_string(), reserved);
    }
    pool
}

fn build_strings(config: &GeneratorConfig, tables: &[StringsTable]) -> KindOutput {
    if !config.resources.strings {
        return KindOutput::empty();
    }

    let mut out = KindOutput::empty();
    let mut type_pool = type_pool_for(CONTAINER_STRINGS, config);
    let mut container = GeneratedClass::new(CONTAINER_STRINGS);
    let mut accessor_pool = IdentPool::new();

    for table in tables {
        let class_base = ident::type_ident(&table.name);
        if class_base.is_empty() {
            out.diagnostics.push(Diagnostic {
                kind: DiagnosticKind::MalformedResourceEntry,
                subject: table.name.clone(),
                detail: "table name sanitizes to nothing".to_string(),
            });
            continue;
        }
        let class_name = match type_pool.claim(class_base, &table.name) {
            Ok(name) => name,
            Err(err) => {
                out.diagnostics.push(Diagnostic {
                    kind: DiagnosticKind::IdentifierCollisionUnresolved,
                    subject: table.name.clone(),
                    detail: err.to_string(),
                });
                continue;
            }
        };

        let (class, mut diags) = build_strings_table(&class_name, table);
        out.diagnostics.append(&mut diags);
        if class.interface.methods.is_empty() {
            continue;
        }

        wire_child_accessor(&mut container, &mut accessor_pool, &class_name, &table.name);
        out.classes.push(class);
    }

    if !out.classes.is_empty() {
        out.container = Some((container.name.clone(), "string".to_string()));
        out.classes.push(container);
    }
    out
}

fn build_strings_table(class_name: &str, table: &StringsTable) -> (GeneratedClass, Vec<Diagnostic>) {
    let mut class = GeneratedClass::new(class_name);
    let mut diagnostics = Vec::new();
    let mut members = IdentPool::new();

    for (raw_key, locales) in &table.keys {
        let subject = format!("{}/{}", table.name, raw_key);

        // The pattern the formatted accessor is typed against: the base
        // locale when present, otherwise the first locale in sorted order.
        let pattern = locales
            .get(BASE_LOCALE)
            .or_else(|| locales.values().next())
            .cloned()
            .unwrap_or_default();

        let slots = match format::analyze(&pattern) {
            Ok(slots) => slots,
            Err(err) => {
                diagnostics.push(Diagnostic {
                    kind: DiagnosticKind::UnsupportedFormatSpecifier,
                    subject,
                    detail: err.to_string(),
                });
                continue;
            }
        };

        let base = ident::member_ident(raw_key);
        let base = if base.is_empty() {
            "key".to_string()
        } else {
            base
        };
        let name = match members.claim(base, raw_key) {
            Ok(name) => name,
            Err(err) => {
                diagnostics.push(Diagnostic {
                    kind: DiagnosticKind::IdentifierCollisionUnresolved,
                    subject,
                    detail: err.to_string(),
                });
                continue;
            }
        };

        let mut plain = MethodSignature::instance("NSString*", &name);
        plain.comment = Some(locale_comment(raw_key, locales));
        class.interface.methods.push(plain.clone());

        plain.comment = None;
        class.implementation.methods.push(MethodImplementation::new(
            plain,
            &format!(
                "return NSLocalizedStringFromTable(@\"{}\", @\"{}\", nil);",
                escape_objc(raw_key),
                escape_objc(&table.name)
            ),
        ));

        if slots.is_empty() {
            continue;
        }

        // Formatted companion: `keyFormat:(double)value1 value2:(NSString*)value2`.
        let selector = std::iter::once(name.as_str())
            .chain(slots.iter().skip(1).map(|slot| slot.name.as_str()))
            .fold(String::new(), |acc, segment| acc + segment + ":");
        let mut formatted = MethodSignature::instance("NSString*", &selector);
        formatted.arguments = slots
            .iter()
            .map(|slot| MethodArgument {
                type_name: slot.param_type.objc_type().to_string(),
                name: slot.name.clone(),
            })
            .collect();
        class.interface.methods.push(formatted.clone());

        let argument_list = slots
            .iter()
            .map(|slot| slot.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        class.implementation.methods.push(MethodImplementation::new(
            formatted,
            &format!(
                "return [NSString stringWithFormat:[self {}], {}];",
                name, argument_list
            ),
        ));
    }

    (class, diagnostics)
}

fn build_images(config: &GeneratorConfig, images: &[ImageAsset]) -> KindOutput {
    if !config.resources.images || images.is_empty() {
        return KindOutput::empty();
    }

    let mut out = KindOutput::empty();
    let mut class = GeneratedClass::new(CONTAINER_IMAGES);
    let mut members = IdentPool::new();
    members
        .claim("cachedImages".to_string(), "cachedImages")
        .expect("fresh pool");

    // Per-instance memoization: loaded images are cached in a lazily
    // created dictionary owned by this Images instance.
    class.extension.properties.push(Property {
        type_name: "NSMutableDictionary*".to_string(),
        name: "cachedImages".to_string(),
    });
    class.implementation.lazy_getters.push(LazyGetter {
        return_type: "NSMutableDictionary*".to_string(),
        name: "cachedImages".to_string(),
    });

    for asset in images {
        let base = ident::member_ident(&asset.name);
        let base = if base.is_empty() {
            "image".to_string()
        } else {
            base
        };
        let name = match members.claim(base, &asset.name) {
            Ok(name) => name,
            Err(err) => {
                out.diagnostics.push(Diagnostic {
                    kind: DiagnosticKind::IdentifierCollisionUnresolved,
                    subject: asset.name.clone(),
                    detail: err.to_string(),
                });
                continue;
            }
        };

        let signature = MethodSignature::instance("UIImage*", &name);
        class.interface.methods.push(signature.clone());

        let key = escape_objc(&asset.name);
        class.implementation.methods.push(MethodImplementation::new(
            signature,
            &format!(
                "UIImage* image = self.cachedImages[@\"{key}\"];\n\
                 if (!image)\n\
                 {{\n\
                 {i}image = [UIImage imageNamed:@\"{key}\"];\n\
                 {i}if (image)\n\
                 {i}{{\n\
                 {i}{i}self.cachedImages[@\"{key}\"] = image;\n\
                 {i}}}\n\
                 }}\n\
                 return image;",
                i = crate::model::INDENT,
            ),
        ));
    }

    if !class.interface.methods.is_empty() {
        out.container = Some((class.name.clone(), "image".to_string()));
        out.classes.push(class);
    }
    out
}

fn build_storyboards(config: &GeneratorConfig, storyboards: &[StoryboardResource]) -> KindOutput {
    if !config.resources.storyboards {
        return KindOutput::empty();
    }

    let mut out = KindOutput::empty();
    let mut type_pool = type_pool_for(CONTAINER_STORYBOARDS, config);
    let mut container = GeneratedClass::new(CONTAINER_STORYBOARDS);
    let mut accessor_pool = IdentPool::new();

    for storyboard in storyboards {
        let class_base = ident::type_ident(&storyboard.name);
        if class_base.is_empty() {
            out.diagnostics.push(Diagnostic {
                kind: DiagnosticKind::MalformedResourceEntry,
                subject: storyboard.name.clone(),
                detail: "storyboard name sanitizes to nothing".to_string(),
            });
            continue;
        }
        let class_name = match type_pool.claim(class_base, &storyboard.name) {
            Ok(name) => name,
            Err(err) => {
                out.diagnostics.push(Diagnostic {
                    kind: DiagnosticKind::IdentifierCollisionUnresolved,
                    subject: storyboard.name.clone(),
                    detail: err.to_string(),
                });
                continue;
            }
        };

        let (class, mut diags) =
            build_storyboard_class(&class_name, storyboard, config.resources.segues);
        out.diagnostics.append(&mut diags);
        if class.interface.methods.is_empty() {
            continue;
        }

        wire_child_accessor(
            &mut container,
            &mut accessor_pool,
            &class_name,
            &storyboard.name,
        );
        out.classes.push(class);
    }

    if !out.classes.is_empty() {
        out.container = Some((container.name.clone(), "storyboard".to_string()));
        out.classes.push(container);
    }
    out
}

fn build_storyboard_class(
    class_name: &str,
    storyboard: &StoryboardResource,
    segues_enabled: bool,
) -> (GeneratedClass, Vec<Diagnostic>) {
    let mut class = GeneratedClass::new(class_name);
    let mut diagnostics = Vec::new();
    let mut members = IdentPool::new();
    let storyboard_literal = escape_objc(&storyboard.name);

    if storyboard.has_initial_scene {
        let name = members
            .claim(
                "instantiateInitialViewController".to_string(),
                &storyboard.name,
            )
            .expect("fresh pool");
        let signature = MethodSignature::instance("id", &name);
        class.interface.methods.push(signature.clone());
        class.implementation.methods.push(MethodImplementation::new(
            signature,
            &format!(
                "return [[UIStoryboard storyboardWithName:@\"{storyboard_literal}\" bundle:nil] instantiateInitialViewController];"
            ),
        ));
    }

    for scene in &storyboard.scene_identifiers {
        let base = ident::member_ident(scene);
        let base = if base.is_empty() {
            "scene".to_string()
        } else {
            base
        };
        let name = match members.claim(base, scene) {
            Ok(name) => name,
            Err(err) => {
                diagnostics.push(Diagnostic {
                    kind: DiagnosticKind::IdentifierCollisionUnresolved,
                    subject: format!("{}/{}", storyboard.name, scene),
                    detail: err.to_string(),
                });
                continue;
            }
        };

        let signature = MethodSignature::instance("id", &name);
        class.interface.methods.push(signature.clone());
        class.implementation.methods.push(MethodImplementation::new(
            signature,
            &format!(
                "return [[UIStoryboard storyboardWithName:@\"{storyboard_literal}\" bundle:nil] instantiateViewControllerWithIdentifier:@\"{}\"];",
                escape_objc(scene)
            ),
        ));
    }

    if segues_enabled {
        for segue in &storyboard.segue_identifiers {
            let base = ident::member_ident(segue);
            let base = if base.is_empty() {
                "segue".to_string()
            } else {
                base
            };
            let name = match members.claim(base, segue) {
                Ok(name) => name,
                Err(err) => {
                    diagnostics.push(Diagnostic {
                        kind: DiagnosticKind::IdentifierCollisionUnresolved,
                        subject: format!("{}/{}", storyboard.name, segue),
                        detail: err.to_string(),
                    });
                    continue;
                }
            };

            let signature = MethodSignature::instance("NSString*", &name);
            class.interface.methods.push(signature.clone());
            class.implementation.methods.push(MethodImplementation::new(
                signature,
                &format!("return @\"{}\";", escape_objc(segue)),
            ));
        }
    }

    (class, diagnostics)
}

/// Aggregate class: one `dispatch_once` singleton accessor per kind.
fn build_aggregate(class_name: &str, containers: &[(String, String)]) -> GeneratedClass {
    let mut class = GeneratedClass::new(class_name);

    for (container_class, accessor) in containers {
        let return_type = format!("{container_class}*");
        let signature = MethodSignature::class_level(&return_type, accessor);
        class.interface.methods.push(signature.clone());
        class.implementation.methods.push(MethodImplementation::new(
            signature,
            &format!(
                "static {container_class}* instance = nil;\n\
                 static dispatch_once_t onceToken;\n\
                 dispatch_once(&onceToken, ^{{\n\
                 {i}instance = [{container_class} new];\n\
                 }});\n\
                 return instance;",
                i = crate::model::INDENT,
            ),
        ));
    }

    class
}

/// Expose a child class on its container through the lazy-getter pattern:
/// extension property, memoized accessor, public signature.
fn wire_child_accessor(
    container: &mut GeneratedClass,
    accessor_pool: &mut IdentPool,
    child_class: &str,
    raw_name: &str,
) {
    let base = ident::member_ident(raw_name);
    let base = if base.is_empty() {
        "child".to_string()
    } else {
        base
    };
    // The child class already claimed a unique type name, so its accessor
    // can always be disambiguated from it.
    let accessor = accessor_pool
        .claim(base, raw_name)
        .unwrap_or_else(|_| format!("child_{}", ident::hash_suffix(raw_name)));
    let return_type = format!("{child_class}*");

    container
        .interface
        .methods
        .push(MethodSignature::instance(&return_type, &accessor));
    container.extension.properties.push(Property {
        type_name: return_type.clone(),
        name: accessor.clone(),
    });
    container.implementation.lazy_getters.push(LazyGetter {
        return_type,
        name: accessor,
    });
}

// ============================================================================
// Text assembly helpers
// ============================================================================

/// Escape a raw value for use inside an Objective-C string literal.
fn escape_objc(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

/// Doc comment carrying the raw key and per-locale values, base locale
/// first, remaining locales in sorted order.
fn locale_comment(raw_key: &str, locales: &BTreeMap<String, String>) -> Comment {
    let mut lines = vec![format!("key: \"{}\"", escape_objc(raw_key))];
    let ordered = std::iter::once(BASE_LOCALE)
        .filter(|base| locales.contains_key(*base))
        .chain(
            locales
                .keys()
                .map(String::as_str)
                .filter(|locale| *locale != BASE_LOCALE),
        );
    for locale in ordered {
        lines.push(String::new());
        lines.push(format!("{}: \"{}\"", locale, escape_objc(&locales[locale])));
    }
    Comment { lines }
}

fn file_banner(filename: &str, import_line: &str) -> String {
    format!(
        "// {filename}\n\
         // Generated by resgen - do not edit.\n\
         // Regenerating overwrites every managed section of this file.\n\
         \n\
         {import_line}"
    )
}

fn report_missing_tokens(
    template_text: &str,
    required: &[Placeholder],
    subject: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for missing in template::missing_tokens(template_text, required) {
        diagnostics.push(Diagnostic {
            kind: DiagnosticKind::TemplateTokenMissing,
            subject: subject.to_string(),
            detail: format!("placeholder {} not found; section left out", missing.token()),
        });
    }
}

fn load_template(
    config: &GeneratorConfig,
    override_path: Option<&str>,
    embedded: &str,
) -> Result<String, GenerateError> {
    match override_path {
        Some(path) => Ok(fs::read_to_string(Path::new(&config.base_path).join(path))?),
        None => Ok(embedded.to_string()),
    }
}

/// Write `content` to `path` unless the file already holds exactly that
/// content. Returns whether a write happened.
fn write_if_changed(path: &Path, content: &str) -> std::io::Result<bool> {
    if let Ok(existing) = fs::read_to_string(path)
        && existing == content
    {
        return Ok(false);
    }
    fs::write(path, content)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::LocalizedValues;
    use tempfile::TempDir;

    fn table(name: &str, entries: &[(&str, &[(&str, &str)])]) -> StringsTable {
        StringsTable {
            name: name.to_string(),
            keys: entries
                .iter()
                .map(|(key, locales)| {
                    let values: LocalizedValues = locales
                        .iter()
                        .map(|(l, v)| (l.to_string(), v.to_string()))
                        .collect();
                    (key.to_string(), values)
                })
                .collect(),
        }
    }

    fn strings_config() -> GeneratorConfig {
        GeneratorConfig::default()
    }

    fn localizable() -> StringsTable {
        table(
            "Localizable",
            &[
                ("key A", &[("Base", "Key A"), ("en", "Key A")]),
                ("Key format", &[("Base", "Prova %.2f %@"), ("en", "Try %.2f %@")]),
            ],
        )
    }

    // =========================================================================
    // Strings builder
    // =========================================================================

    #[test]
    fn plain_key_gets_zero_argument_accessor() {
        let (class, diags) = build_strings_table("Localizable", &localizable());
        assert!(diags.is_empty());

        let rendered = class.render_interface().0;
        assert!(rendered.contains("- (NSString*)keyA;"));
        assert!(!rendered.contains("keyA:"));
    }

    #[test]
    fn format_key_gets_both_accessors() {
        let (class, _) = build_strings_table("Localizable", &localizable());
        let rendered = class.render_interface().0;

        assert!(rendered.contains("- (NSString*)keyFormat;"));
        assert!(rendered.contains(
            "- (NSString*)keyFormat:(double)value1 value2:(NSString*)value2;"
        ));
    }

    #[test]
    fn accessors_are_documented_with_key_and_locales() {
        let (class, _) = build_strings_table("Localizable", &localizable());
        let rendered = class.render_interface().0;

        assert!(rendered.contains("key: \"Key format\""));
        assert!(rendered.contains("Base: \"Prova %.2f %@\""));
        assert!(rendered.contains("en: \"Try %.2f %@\""));
    }

    #[test]
    fn implementation_formats_with_slot_order() {
        let (class, _) = build_strings_table("Localizable", &localizable());
        let rendered = class.render_implementation();

        assert!(rendered.contains(
            "return [NSString stringWithFormat:[self keyFormat], value1, value2];"
        ));
        assert!(rendered.contains(
            "return NSLocalizedStringFromTable(@\"key A\", @\"Localizable\", nil);"
        ));
    }

    #[test]
    fn unsupported_specifier_skips_only_that_entry() {
        let bad = table(
            "Localizable",
            &[
                ("good", &[("Base", "fine")]),
                ("hex", &[("Base", "broken %x")]),
            ],
        );
        let (class, diags) = build_strings_table("Localizable", &bad);

        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::UnsupportedFormatSpecifier);
        assert_eq!(diags[0].subject, "Localizable/hex");

        let rendered = class.render_interface().0;
        assert!(rendered.contains("- (NSString*)good;"));
        assert!(!rendered.contains("hex"));
    }

    #[test]
    fn digit_leading_key_is_escaped() {
        let t = table(
            "Localizable",
            &[("34563456-.,.,-.,-.,-.,-,-., @@@@@key B", &[("Base", "key B")])],
        );
        let (class, _) = build_strings_table("Localizable", &t);
        assert!(
            class
                .render_interface()
                .0
                .contains("- (NSString*)_34563456KeyB;")
        );
    }

    #[test]
    fn colliding_keys_are_disambiguated() {
        let t = table(
            "Localizable",
            &[("key a", &[("Base", "1")]), ("key-a", &[("Base", "2")])],
        );
        let (class, diags) = build_strings_table("Localizable", &t);

        assert!(diags.is_empty());
        assert_eq!(class.interface.methods.len(), 2);
        let names: Vec<&str> = class
            .interface
            .methods
            .iter()
            .map(|m| m.selector.as_str())
            .collect();
        assert_eq!(names[0], "keyA");
        assert!(names[1].starts_with("keyA_"));
        assert_ne!(names[0], names[1]);
    }

    #[test]
    fn strings_container_wires_tables_lazily() {
        let config = strings_config();
        let out = build_strings(&config, &[localizable()]);

        assert_eq!(out.classes.len(), 2);
        let container = &out.classes[1];
        assert_eq!(container.name, "Strings");

        let (public, private) = container.render_interface();
        assert!(public.contains("- (Localizable*)localizable;"));
        assert!(private.contains("@property (nonatomic, strong) Localizable* localizable;"));
        assert!(
            container
                .render_implementation()
                .contains("_localizable = [Localizable new];")
        );
        assert_eq!(
            out.container,
            Some(("Strings".to_string(), "string".to_string()))
        );
    }

    #[test]
    fn table_shadowing_container_name_is_suffixed() {
        let config = strings_config();
        let out = build_strings(&config, &[table("Strings", &[("k", &[("Base", "v")])])]);

        assert!(out.classes[0].name.starts_with("Strings_"));
    }

    // =========================================================================
    // Images builder
    // =========================================================================

    fn image(name: &str) -> ImageAsset {
        ImageAsset {
            name: name.to_string(),
            source: format!("{name}.png"),
        }
    }

    #[test]
    fn images_load_through_instance_cache() {
        let config = strings_config();
        let out = build_images(&config, &[image("testImage")]);

        let class = &out.classes[0];
        let (public, private) = class.render_interface();
        assert!(public.contains("- (UIImage*)testImage;"));
        assert!(private.contains("NSMutableDictionary* cachedImages;"));

        let implementation = class.render_implementation();
        assert!(implementation.contains("_cachedImages = [NSMutableDictionary new];"));
        assert!(implementation.contains("image = [UIImage imageNamed:@\"testImage\"];"));
        assert!(implementation.contains("self.cachedImages[@\"testImage\"] = image;"));
    }

    #[test]
    fn no_images_no_class() {
        let out = build_images(&strings_config(), &[]);
        assert!(out.classes.is_empty());
        assert!(out.container.is_none());
    }

    // =========================================================================
    // Storyboards builder
    // =========================================================================

    fn main_storyboard() -> StoryboardResource {
        StoryboardResource {
            name: "Main".to_string(),
            has_initial_scene: true,
            scene_identifiers: vec!["nextViewController".to_string()],
            segue_identifiers: vec!["showDetail".to_string()],
        }
    }

    #[test]
    fn storyboard_class_exposes_scenes_and_segues() {
        let (class, diags) = build_storyboard_class("Main", &main_storyboard(), true);
        assert!(diags.is_empty());

        let public = class.render_interface().0;
        assert!(public.contains("- (id)instantiateInitialViewController;"));
        assert!(public.contains("- (id)nextViewController;"));
        assert!(public.contains("- (NSString*)showDetail;"));

        let implementation = class.render_implementation();
        assert!(implementation.contains(
            "[[UIStoryboard storyboardWithName:@\"Main\" bundle:nil] instantiateInitialViewController]"
        ));
        assert!(implementation
            .contains("instantiateViewControllerWithIdentifier:@\"nextViewController\"]"));
        assert!(implementation.contains("return @\"showDetail\";"));
    }

    #[test]
    fn segues_can_be_disabled() {
        let (class, _) = build_storyboard_class("Main", &main_storyboard(), false);
        let public = class.render_interface().0;
        assert!(!public.contains("showDetail"));
        assert!(public.contains("nextViewController"));
    }

    #[test]
    fn storyboards_container_holds_one_class_per_storyboard() {
        let config = strings_config();
        let out = build_storyboards(&config, &[main_storyboard()]);

        assert_eq!(out.classes.len(), 2);
        assert_eq!(out.classes[1].name, "Storyboards");
        assert!(
            out.classes[1]
                .render_interface()
                .0
                .contains("- (Main*)main;")
        );
    }

    // =========================================================================
    // Aggregate and orchestration
    // =========================================================================

    #[test]
    fn aggregate_exposes_singletons_per_kind() {
        let class = build_aggregate(
            "R",
            &[
                ("Strings".to_string(), "string".to_string()),
                ("Images".to_string(), "image".to_string()),
            ],
        );

        let public = class.render_interface().0;
        assert!(public.contains("+ (Strings*)string;"));
        assert!(public.contains("+ (Images*)image;"));

        let implementation = class.render_implementation();
        assert!(implementation.contains("static Strings* instance = nil;"));
        assert!(implementation.contains("dispatch_once(&onceToken, ^{"));
        assert!(implementation.contains("instance = [Strings new];"));
    }

    #[test]
    fn build_classes_orders_children_before_containers() {
        let config = strings_config();
        let resources = ResourceSet {
            tables: vec![localizable()],
            images: vec![image("testImage")],
            storyboards: vec![main_storyboard()],
            issues: Vec::new(),
        };

        let (classes, diags) = build_classes(&config, &resources).unwrap();
        let names: Vec<&str> = classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Localizable",
                "Strings",
                "Images",
                "Main",
                "Storyboards",
                "R"
            ]
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn empty_kind_is_reported_and_omitted() {
        let config = strings_config();
        let resources = ResourceSet {
            tables: vec![localizable()],
            ..ResourceSet::default()
        };

        let (classes, diags) = build_classes(&config, &resources).unwrap();
        assert!(classes.iter().all(|c| c.name != "Images"));
        assert!(
            diags
                .iter()
                .any(|d| d.kind == DiagnosticKind::EmptyResourceSet && d.subject == "images")
        );
    }

    #[test]
    fn no_resources_at_all_fails_the_run() {
        let config = strings_config();
        let resources = ResourceSet::default();
        assert!(matches!(
            build_classes(&config, &resources),
            Err(GenerateError::NoUsableResources)
        ));
    }

    #[test]
    fn scan_issues_become_malformed_diagnostics() {
        let config = strings_config();
        let resources = ResourceSet {
            tables: vec![localizable()],
            issues: vec![crate::scan::ScanIssue {
                path: "Base.lproj/Localizable.strings".to_string(),
                detail: "line 3: expected ';'".to_string(),
            }],
            ..ResourceSet::default()
        };

        let (_, diags) = build_classes(&config, &resources).unwrap();
        assert!(
            diags
                .iter()
                .any(|d| d.kind == DiagnosticKind::MalformedResourceEntry)
        );
    }

    // =========================================================================
    // Full generation with templates and writer
    // =========================================================================

    fn generation_fixture() -> (TempDir, GeneratorConfig, ResourceSet) {
        let tmp = TempDir::new().unwrap();
        let config = GeneratorConfig {
            base_path: tmp.path().display().to_string(),
            output_dir: tmp.path().join("generated").display().to_string(),
            ..GeneratorConfig::default()
        };
        let resources = ResourceSet {
            tables: vec![localizable()],
            images: vec![image("testImage")],
            storyboards: vec![main_storyboard()],
            issues: Vec::new(),
        };
        (tmp, config, resources)
    }

    #[test]
    fn generate_writes_header_and_implementation() {
        let (_tmp, config, resources) = generation_fixture();
        let output = generate(&config, &resources).unwrap();

        assert!(output.header_written);
        assert!(output.implementation_written);
        assert!(output.header_text.contains("#import <UIKit/UIKit.h>"));
        assert!(output.header_text.contains("@interface R: NSObject"));
        assert!(output.implementation_text.contains("#import \"R.h\""));
        assert!(output.implementation_text.contains("@implementation R"));
        assert!(
            output
                .implementation_text
                .contains("@interface Strings ()")
        );

        let on_disk = fs::read_to_string(&output.header_path).unwrap();
        assert_eq!(on_disk, output.header_text);
    }

    #[test]
    fn second_run_is_byte_identical_and_skips_writes() {
        let (_tmp, config, resources) = generation_fixture();
        let first = generate(&config, &resources).unwrap();
        let second = generate(&config, &resources).unwrap();

        assert_eq!(first.header_text, second.header_text);
        assert_eq!(first.implementation_text, second.implementation_text);
        assert!(!second.header_written);
        assert!(!second.implementation_written);
    }

    #[test]
    fn custom_template_preserves_surrounding_text() {
        let (tmp, mut config, resources) = generation_fixture();
        fs::write(
            tmp.path().join("custom.h.template"),
            "// hand-written prologue\n<#INTERFACE_HEADER>\n<#INTERFACE_BODY>\n// epilogue\n",
        )
        .unwrap();
        config.templates.declaration = Some("custom.h.template".to_string());

        let output = generate(&config, &resources).unwrap();
        assert!(output.header_text.starts_with("// hand-written prologue\n"));
        assert!(output.header_text.ends_with("// epilogue\n"));
    }

    #[test]
    fn template_without_required_token_is_reported() {
        let (tmp, mut config, resources) = generation_fixture();
        fs::write(tmp.path().join("bare.h.template"), "// nothing here\n").unwrap();
        config.templates.declaration = Some("bare.h.template".to_string());

        let output = generate(&config, &resources).unwrap();
        assert!(
            output
                .diagnostics
                .iter()
                .any(|d| d.kind == DiagnosticKind::TemplateTokenMissing)
        );
        // Merge proceeded; the template text is untouched.
        assert_eq!(output.header_text, "// nothing here\n");
    }
}
