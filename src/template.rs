//! Placeholder-driven template merging.
//!
//! Generated text is injected into template files through named placeholder
//! tokens, so hand-written boilerplate around the tokens survives every
//! regeneration. The token spellings are the external contract with the
//! template assets:
//!
//! ```text
//! <#INTERFACE_HEADER>         file banner + imports for the header
//! <#INTERFACE_BODY>           public @interface blocks
//! <#IMPLEMENTATION_HEADER>    file banner + imports for the implementation
//! <#PRIVATE_INTERFACE_BODY>   class extensions
//! <#IMPLEMENTATION_BODY>      @implementation blocks
//! ```
//!
//! [`merge`] is a single textual pass: substituted values are never
//! re-scanned, so a resource value that happens to contain a token spelling
//! comes through literally and expansion can never loop. Tokens without a
//! mapped value are left in place, which supports templates that carry
//! tokens for a later pass. Values without a matching token are no-ops.
//!
//! Default templates ship embedded in the binary; config may point at
//! project-specific template files instead.

use std::collections::BTreeMap;

/// Stock declaration (header) template.
pub const DECLARATION_TEMPLATE: &str = include_str!("../templates/declaration.h.template");

/// Stock definition (implementation) template.
pub const DEFINITION_TEMPLATE: &str = include_str!("../templates/definition.m.template");

/// The closed set of placeholder tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Placeholder {
    InterfaceHeader,
    InterfaceBody,
    ImplementationHeader,
    PrivateInterfaceBody,
    ImplementationBody,
}

impl Placeholder {
    pub const ALL: [Placeholder; 5] = [
        Placeholder::InterfaceHeader,
        Placeholder::InterfaceBody,
        Placeholder::ImplementationHeader,
        Placeholder::PrivateInterfaceBody,
        Placeholder::ImplementationBody,
    ];

    /// Token spelling as it appears in template text.
    pub fn token(self) -> &'static str {
        match self {
            Placeholder::InterfaceHeader => "<#INTERFACE_HEADER>",
            Placeholder::InterfaceBody => "<#INTERFACE_BODY>",
            Placeholder::ImplementationHeader => "<#IMPLEMENTATION_HEADER>",
            Placeholder::PrivateInterfaceBody => "<#PRIVATE_INTERFACE_BODY>",
            Placeholder::ImplementationBody => "<#IMPLEMENTATION_BODY>",
        }
    }
}

/// Substitute placeholder tokens in `template` with mapped values.
///
/// Left-to-right single pass over the template text. The input string is
/// untouched; the merged text is returned as a new string. Stateless and
/// reentrant.
pub fn merge(template: &str, values: &BTreeMap<Placeholder, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while !rest.is_empty() {
        let next = Placeholder::ALL
            .iter()
            .filter_map(|ph| rest.find(ph.token()).map(|pos| (pos, *ph)))
            .min_by_key(|(pos, _)| *pos);

        match next {
            Some((pos, ph)) => {
                out.push_str(&rest[..pos]);
                match values.get(&ph) {
                    Some(value) => out.push_str(value),
                    None => out.push_str(ph.token()),
                }
                rest = &rest[pos + ph.token().len()..];
            }
            None => {
                out.push_str(rest);
                break;
            }
        }
    }

    out
}

/// Placeholders from `required` that do not occur in `template`.
///
/// A missing token is non-fatal — the merge simply has nowhere to put that
/// section — but the run reports it so a mangled template is noticed.
pub fn missing_tokens(template: &str, required: &[Placeholder]) -> Vec<Placeholder> {
    required
        .iter()
        .copied()
        .filter(|ph| !template.contains(ph.token()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(Placeholder, &str)]) -> BTreeMap<Placeholder, String> {
        pairs
            .iter()
            .map(|(ph, text)| (*ph, text.to_string()))
            .collect()
    }

    #[test]
    fn substitutes_mapped_tokens() {
        let merged = merge(
            "head\n<#INTERFACE_BODY>\ntail",
            &values(&[(Placeholder::InterfaceBody, "@interface R: NSObject\n@end")]),
        );
        assert_eq!(merged, "head\n@interface R: NSObject\n@end\ntail");
    }

    #[test]
    fn unmapped_token_is_left_in_place() {
        let template = "a <#INTERFACE_BODY> b <#IMPLEMENTATION_BODY> c";
        let merged = merge(template, &values(&[(Placeholder::InterfaceBody, "X")]));
        assert_eq!(merged, "a X b <#IMPLEMENTATION_BODY> c");
    }

    #[test]
    fn value_without_token_is_a_no_op() {
        let merged = merge(
            "no tokens here",
            &values(&[(Placeholder::InterfaceBody, "X")]),
        );
        assert_eq!(merged, "no tokens here");
    }

    #[test]
    fn values_are_not_rescanned() {
        // A substituted value containing a token spelling must come through
        // literally — no recursive expansion.
        let merged = merge(
            "<#INTERFACE_BODY>",
            &values(&[(Placeholder::InterfaceBody, "payload <#INTERFACE_BODY> end")]),
        );
        assert_eq!(merged, "payload <#INTERFACE_BODY> end");
    }

    #[test]
    fn template_argument_is_not_mutated() {
        let template = String::from("x <#INTERFACE_BODY> y");
        let _ = merge(&template, &values(&[(Placeholder::InterfaceBody, "Z")]));
        assert_eq!(template, "x <#INTERFACE_BODY> y");
    }

    #[test]
    fn repeated_token_is_substituted_each_time() {
        let merged = merge(
            "<#INTERFACE_BODY>-<#INTERFACE_BODY>",
            &values(&[(Placeholder::InterfaceBody, "X")]),
        );
        assert_eq!(merged, "X-X");
    }

    #[test]
    fn empty_template_stays_empty() {
        assert_eq!(merge("", &BTreeMap::new()), "");
    }

    #[test]
    fn stock_templates_carry_their_tokens() {
        assert!(
            missing_tokens(
                DECLARATION_TEMPLATE,
                &[Placeholder::InterfaceHeader, Placeholder::InterfaceBody],
            )
            .is_empty()
        );
        assert!(
            missing_tokens(
                DEFINITION_TEMPLATE,
                &[
                    Placeholder::ImplementationHeader,
                    Placeholder::PrivateInterfaceBody,
                    Placeholder::ImplementationBody,
                ],
            )
            .is_empty()
        );
    }

    #[test]
    fn missing_tokens_reports_absent_required() {
        let missing = missing_tokens(
            "<#INTERFACE_HEADER>",
            &[Placeholder::InterfaceHeader, Placeholder::InterfaceBody],
        );
        assert_eq!(missing, vec![Placeholder::InterfaceBody]);
    }
}
