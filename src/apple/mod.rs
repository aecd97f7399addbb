//! Readers for Apple resource file formats.
//!
//! Both readers are deliberately small, zero-dependency text scanners: they
//! extract exactly the fields the generators consume and recover per entry
//! instead of failing a whole file.
//!
//! - [`strings_file`] — `.strings` localization tables
//! - [`storyboard`] — scene and segue identifiers from `.storyboard` XML

pub mod storyboard;
pub mod strings_file;
