//! Structural model of generated Objective-C classes.
//!
//! Builders assemble these value objects from discovered resources; each
//! object renders its own text through [`Render`]. A [`GeneratedClass`] is
//! the aggregate: a public `@interface`, a private class extension, and an
//! `@implementation`, all sharing one name.
//!
//! Rendering is deterministic by construction — every sequence is a `Vec`
//! populated in declaration order, and output depends only on field values.
//! Nothing here touches the filesystem or holds shared state; a class is
//! built, rendered into the template placeholders, and discarded.
//!
//! The original deep `signature → implementation → class-method` hierarchy
//! collapses to composition: [`MethodImplementation`] wraps a
//! [`MethodSignature`], and [`MethodScope`] tags instance (`-`) versus
//! class (`+`) methods.

/// Indentation unit used in generated source.
pub const INDENT: &str = "    ";

/// Anything that can render itself into generated source text.
pub trait Render {
    fn render(&self) -> String;
}

/// A single `@property` declaration.
///
/// `type_name` carries its own pointer spelling (`Localizable*`) so the
/// renderer stays a dumb join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub type_name: String,
    pub name: String,
}

impl Render for Property {
    fn render(&self) -> String {
        format!(
            "@property (nonatomic, strong) {} {};",
            self.type_name, self.name
        )
    }
}

/// One parameter of a generated method, in slot order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodArgument {
    pub type_name: String,
    pub name: String,
}

/// Documentation block attached to a method signature.
///
/// Carries the raw resource key and per-locale values into the generated
/// header so the accessor is self-describing at the call site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment {
    pub lines: Vec<String>,
}

impl Render for Comment {
    fn render(&self) -> String {
        let mut out = String::from("/**\n");
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("*/");
        out
    }
}

/// Instance (`-`) or class (`+`) method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodScope {
    Instance,
    Class,
}

impl MethodScope {
    fn sigil(self) -> char {
        match self {
            MethodScope::Instance => '-',
            MethodScope::Class => '+',
        }
    }
}

/// A method declaration.
///
/// `selector` is the canonical Objective-C spelling (`keyFormat:value2:`);
/// its colon segments must line up with `arguments` in count and order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub return_type: String,
    pub selector: String,
    pub comment: Option<Comment>,
    pub arguments: Vec<MethodArgument>,
    pub scope: MethodScope,
}

impl MethodSignature {
    pub fn instance(return_type: &str, selector: &str) -> Self {
        Self {
            return_type: return_type.to_string(),
            selector: selector.to_string(),
            comment: None,
            arguments: Vec::new(),
            scope: MethodScope::Instance,
        }
    }

    pub fn class_level(return_type: &str, selector: &str) -> Self {
        Self {
            scope: MethodScope::Class,
            ..Self::instance(return_type, selector)
        }
    }

    /// The declaration line without a trailing `;`, shared between the
    /// header rendering and the implementation rendering.
    fn declaration_line(&self) -> String {
        let mut out = format!("{} ({})", self.scope.sigil(), self.return_type);
        if self.arguments.is_empty() {
            out.push_str(&self.selector);
            return out;
        }
        let segments: Vec<&str> = self
            .selector
            .split(':')
            .filter(|s| !s.is_empty())
            .collect();
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let segment = segments.get(i).copied().unwrap_or("");
            out.push_str(&format!("{}:({}){}", segment, arg.type_name, arg.name));
        }
        out
    }
}

impl Render for MethodSignature {
    fn render(&self) -> String {
        let decl = format!("{};", self.declaration_line());
        match &self.comment {
            Some(comment) => format!("{}\n{}", comment.render(), decl),
            None => decl,
        }
    }
}

/// A method with its generated body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodImplementation {
    pub signature: MethodSignature,
    pub body: String,
    /// When set, every body line is emitted one indentation level deep;
    /// otherwise body lines are emitted verbatim.
    pub indent_body: bool,
}

impl MethodImplementation {
    pub fn new(signature: MethodSignature, body: &str) -> Self {
        Self {
            signature,
            body: body.to_string(),
            indent_body: true,
        }
    }
}

impl Render for MethodImplementation {
    fn render(&self) -> String {
        let mut out = self.signature.declaration_line();
        out.push_str("\n{\n");
        for line in self.body.lines() {
            if self.indent_body && !line.is_empty() {
                out.push_str(INDENT);
            }
            out.push_str(line);
            out.push('\n');
        }
        out.push('}');
        out
    }
}

/// A property realized through lazy, memoized initialization.
///
/// Distinct from [`Property`]: the declaration lives in the class extension,
/// while this renders the accessor that checks the backing ivar and fills it
/// once with `[Type new]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LazyGetter {
    pub return_type: String,
    pub name: String,
}

impl Render for LazyGetter {
    fn render(&self) -> String {
        let class_name = self.return_type.trim_end_matches('*').trim_end();
        format!(
            "- ({rt}){name}\n{{\n{i}if (!_{name})\n{i}{{\n{i}{i}_{name} = [{class} new];\n{i}}}\n{i}return _{name};\n}}",
            rt = self.return_type,
            name = self.name,
            class = class_name,
            i = INDENT,
        )
    }
}

/// Public (`@interface Name: NSObject`) or private (`@interface Name ()`)
/// declaration surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceVisibility {
    Public,
    Private,
}

/// The declaration surface of a generated class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInterface {
    pub name: String,
    pub visibility: InterfaceVisibility,
    pub properties: Vec<Property>,
    pub methods: Vec<MethodSignature>,
}

impl ClassInterface {
    fn new(name: &str, visibility: InterfaceVisibility) -> Self {
        Self {
            name: name.to_string(),
            visibility,
            properties: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.methods.is_empty()
    }
}

impl Render for ClassInterface {
    fn render(&self) -> String {
        let header = match self.visibility {
            InterfaceVisibility::Public => format!("@interface {}: NSObject", self.name),
            InterfaceVisibility::Private => format!("@interface {} ()", self.name),
        };
        let mut out = header;
        out.push('\n');
        for property in &self.properties {
            out.push_str(&property.render());
            out.push('\n');
        }
        for method in &self.methods {
            out.push_str(&method.render());
            out.push('\n');
        }
        out.push_str("@end");
        out
    }
}

/// The definition surface of a generated class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassImplementation {
    pub name: String,
    pub lazy_getters: Vec<LazyGetter>,
    pub methods: Vec<MethodImplementation>,
}

impl Render for ClassImplementation {
    fn render(&self) -> String {
        let mut out = format!("@implementation {}", self.name);
        out.push('\n');
        for getter in &self.lazy_getters {
            out.push_str(&getter.render());
            out.push('\n');
        }
        for method in &self.methods {
            out.push_str(&method.render());
            out.push('\n');
        }
        out.push_str("@end");
        out
    }
}

/// Aggregate root: one generated class with its three surfaces.
///
/// The constructor is the only way to make one, so the three parts always
/// carry the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedClass {
    pub name: String,
    pub interface: ClassInterface,
    pub extension: ClassInterface,
    pub implementation: ClassImplementation,
}

impl GeneratedClass {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            interface: ClassInterface::new(name, InterfaceVisibility::Public),
            extension: ClassInterface::new(name, InterfaceVisibility::Private),
            implementation: ClassImplementation {
                name: name.to_string(),
                lazy_getters: Vec::new(),
                methods: Vec::new(),
            },
        }
    }

    /// Render the public interface and the private extension as two distinct
    /// strings — they land in different template placeholders. The private
    /// text is empty when the extension declares nothing.
    pub fn render_interface(&self) -> (String, String) {
        let private = if self.extension.is_empty() {
            String::new()
        } else {
            self.extension.render()
        };
        (self.interface.render(), private)
    }

    pub fn render_implementation(&self) -> String {
        self.implementation.render()
    }
}
