//! Raw resource keys to valid Objective-C identifiers.
//!
//! Resource keys are free text: `"Key format"`, `"34563456 key B"`, even
//! strings that are pure punctuation. Generated accessors need identifiers,
//! so every key goes through the same sanitization:
//!
//! - Split on anything that is not ASCII alphanumeric
//! - Camel-case the segments (`member_ident` lowers the first letter,
//!   `type_ident` raises it)
//! - Escape a leading digit with `_`
//!
//! ```text
//! "Key format"                  → keyFormat
//! "34563456-.,., key B"         → _34563456KeyB
//! "LaunchScreen"                → launchScreen (member) / LaunchScreen (type)
//! ```
//!
//! ## Collision handling
//!
//! Distinct keys can sanitize to the same identifier (`"key a"` and
//! `"key-a"`). [`IdentPool`] tracks the identifiers already claimed within
//! one generated class: the first key wins the plain spelling, later
//! colliders get a suffix derived from the SHA-256 of their raw key. The
//! suffix is content-addressed rather than positional so an identifier never
//! changes because an unrelated key was added or removed.

use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentError {
    #[error("identifier {ident:?} for key {raw_key:?} collides even after hash suffixing")]
    Collision { ident: String, raw_key: String },
}

/// Sanitize a raw key into a lower-camel-case member identifier.
///
/// Returns an empty string when the key contains no alphanumeric characters;
/// callers substitute a kind-specific stem before claiming the identifier.
pub fn member_ident(raw: &str) -> String {
    camel_case(raw, false)
}

/// Sanitize a raw key into an upper-camel-case type identifier.
pub fn type_ident(raw: &str) -> String {
    camel_case(raw, true)
}

fn camel_case(raw: &str, capitalize_first: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut first_segment = true;
    for segment in raw.split(|c: char| !c.is_ascii_alphanumeric()) {
        if segment.is_empty() {
            continue;
        }
        let mut chars = segment.chars();
        let head = chars.next().unwrap();
        if first_segment && !capitalize_first {
            out.push(head.to_ascii_lowercase());
        } else {
            out.push(head.to_ascii_uppercase());
        }
        out.extend(chars);
        first_segment = false;
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// First six hex digits of the SHA-256 of a raw key.
pub fn hash_suffix(raw: &str) -> String {
    let digest = Sha256::digest(raw.as_bytes());
    let mut out = String::with_capacity(6);
    for byte in &digest[..3] {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

/// Identifiers claimed within one generated class.
///
/// Maps each claimed identifier back to the raw key that owns it, so
/// collision diagnostics can name both parties.
#[derive(Debug, Default)]
pub struct IdentPool {
    taken: BTreeMap<String, String>,
}

impl IdentPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `ident` for `raw_key`, disambiguating with a hash suffix when
    /// the plain spelling is already taken.
    ///
    /// Returns the identifier actually claimed. Fails only when the suffixed
    /// spelling is also taken, which the caller reports and skips.
    pub fn claim(&mut self, ident: String, raw_key: &str) -> Result<String, IdentError> {
        if !self.taken.contains_key(&ident) {
            self.taken.insert(ident.clone(), raw_key.to_string());
            return Ok(ident);
        }
        let suffixed = format!("{}_{}", ident, hash_suffix(raw_key));
        if !self.taken.contains_key(&suffixed) {
            self.taken.insert(suffixed.clone(), raw_key.to_string());
            return Ok(suffixed);
        }
        Err(IdentError::Collision {
            ident,
            raw_key: raw_key.to_string(),
        })
    }
}
