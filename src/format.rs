//! Format-string analysis for localized patterns.
//!
//! A `.strings` value like `"Prova %.2f %@"` carries typed argument slots.
//! [`analyze`] walks the pattern once and returns the slots in the order
//! they appear, so the generated method
//!
//! ```text
//! - (NSString*)keyFormat:(double)value1 value2:(NSString*)value2;
//! ```
//!
//! takes its parameters in exactly the order the pattern consumes them.
//!
//! Only conversions resgen can give a safe Objective-C type are accepted.
//! Anything else (`%x`, `%s`, positional `%1$@`, a dangling `%`) fails with
//! [`FormatError::UnsupportedSpecifier`]; the caller records the entry as
//! skipped and moves on — one exotic pattern never aborts a table.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormatError {
    #[error("unsupported format specifier %{specifier}")]
    UnsupportedSpecifier { specifier: String },
}

/// Objective-C parameter type for one format slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Double,
    Object,
    Int,
    Uint,
}

impl ParamType {
    /// Spelling used in generated signatures.
    pub fn objc_type(self) -> &'static str {
        match self {
            ParamType::Double => "double",
            ParamType::Object => "NSString*",
            ParamType::Int => "NSInteger",
            ParamType::Uint => "NSUInteger",
        }
    }
}

/// One typed parameter slot extracted from a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub param_type: ParamType,
    /// `value1`, `value2`, … — 1-based slot position.
    pub name: String,
}

/// Extract the ordered typed slots from a localization pattern.
///
/// Pure function: the same pattern always yields the same slots. `%%` is a
/// literal percent and produces no slot.
pub fn analyze(pattern: &str) -> Result<Vec<Slot>, FormatError> {
    let mut slots = Vec::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            continue;
        }
        if chars.peek() == Some(&'%') {
            chars.next();
            continue;
        }

        let mut spec = String::new();

        // Flags
        while matches!(chars.peek(), Some('-' | '+' | ' ' | '#' | '0' | '\'')) {
            spec.push(chars.next().unwrap());
        }
        // Width (or a positional index — disambiguated by the `$` that follows)
        while chars.peek().is_some_and(|d| d.is_ascii_digit()) {
            spec.push(chars.next().unwrap());
        }
        if chars.peek() == Some(&'$') {
            spec.push(chars.next().unwrap());
            return Err(FormatError::UnsupportedSpecifier { specifier: spec });
        }
        // Precision
        if chars.peek() == Some(&'.') {
            spec.push(chars.next().unwrap());
            while chars.peek().is_some_and(|d| d.is_ascii_digit()) {
                spec.push(chars.next().unwrap());
            }
        }
        // Length modifiers
        while matches!(chars.peek(), Some('h' | 'l' | 'q' | 'z' | 't' | 'j' | 'L')) {
            spec.push(chars.next().unwrap());
        }

        let param_type = match chars.next() {
            Some('f' | 'F' | 'e' | 'E' | 'g' | 'G' | 'a' | 'A') => ParamType::Double,
            Some('@') => ParamType::Object,
            Some('d' | 'i') => ParamType::Int,
            Some('u') => ParamType::Uint,
            Some(other) => {
                spec.push(other);
                return Err(FormatError::UnsupportedSpecifier { specifier: spec });
            }
            None => return Err(FormatError::UnsupportedSpecifier { specifier: spec }),
        };

        slots.push(Slot {
            param_type,
            name: format!("value{}", slots.len() + 1),
        });
    }

    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_has_no_slots() {
        assert_eq!(analyze("Key A").unwrap(), vec![]);
    }

    #[test]
    fn float_then_object_in_order() {
        let slots = analyze("Value %.2f and %@").unwrap();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].param_type, ParamType::Double);
        assert_eq!(slots[0].name, "value1");
        assert_eq!(slots[1].param_type, ParamType::Object);
        assert_eq!(slots[1].name, "value2");
    }

    #[test]
    fn integer_conversions() {
        let slots = analyze("%d of %u").unwrap();
        assert_eq!(slots[0].param_type, ParamType::Int);
        assert_eq!(slots[1].param_type, ParamType::Uint);
    }

    #[test]
    fn length_modifiers_are_absorbed() {
        let slots = analyze("%ld items, %llu bytes").unwrap();
        assert_eq!(slots[0].param_type, ParamType::Int);
        assert_eq!(slots[1].param_type, ParamType::Uint);
    }

    #[test]
    fn escaped_percent_is_not_a_slot() {
        assert_eq!(analyze("100%% done").unwrap(), vec![]);
    }

    #[test]
    fn flags_and_width_are_absorbed() {
        let slots = analyze("%-08.3f").unwrap();
        assert_eq!(slots[0].param_type, ParamType::Double);
    }

    #[test]
    fn hex_is_unsupported() {
        assert_eq!(
            analyze("id %x"),
            Err(FormatError::UnsupportedSpecifier {
                specifier: "x".to_string()
            })
        );
    }

    #[test]
    fn c_string_is_unsupported() {
        assert!(analyze("%s").is_err());
    }

    #[test]
    fn positional_is_unsupported() {
        assert_eq!(
            analyze("%1$@"),
            Err(FormatError::UnsupportedSpecifier {
                specifier: "1$".to_string()
            })
        );
    }

    #[test]
    fn dangling_percent_is_unsupported() {
        assert!(analyze("trailing %").is_err());
    }

    #[test]
    fn analysis_is_idempotent() {
        let first = analyze("Prova %.2f %@").unwrap();
        let second = analyze("Prova %.2f %@").unwrap();
        assert_eq!(first, second);
    }
}
