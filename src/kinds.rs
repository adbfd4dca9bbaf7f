//! File-extension mnemonics for `--type`
//!
//! `kMDItemKind` strings ("MP3 audio", "PDF document") are hard to remember,
//! so `--type mp3` looks the extension up here and searches for the mapped
//! substring instead. The built-in table can be extended or overridden from
//! the `[kinds]` section of the config file.

use std::collections::{BTreeMap, HashMap};

const BUILTIN_KINDS: &[(&str, &str)] = &[
    // Audio
    ("aac", "AAC"),
    ("aiff", "AIFF"),
    ("flac", "FLAC"),
    ("m4a", "MPEG-4 audio"),
    ("mp3", "MP3"),
    ("wav", "Waveform audio"),
    // Video
    ("avi", "AVI"),
    ("mkv", "Matroska"),
    ("mov", "QuickTime movie"),
    ("mp4", "MPEG-4 movie"),
    // Images
    ("gif", "GIF image"),
    ("jpeg", "JPEG image"),
    ("jpg", "JPEG image"),
    ("png", "PNG image"),
    ("psd", "Photoshop"),
    ("svg", "SVG"),
    ("tiff", "TIFF image"),
    // Documents
    ("doc", "Microsoft Word"),
    ("docx", "Microsoft Word"),
    ("html", "HTML"),
    ("key", "Keynote"),
    ("md", "Markdown"),
    ("numbers", "Numbers"),
    ("pages", "Pages"),
    ("pdf", "PDF"),
    ("ppt", "Microsoft PowerPoint"),
    ("pptx", "Microsoft PowerPoint"),
    ("rtf", "Rich Text"),
    ("txt", "Plain Text"),
    ("xls", "Microsoft Excel"),
    ("xlsx", "Microsoft Excel"),
    // Archives
    ("dmg", "Disk Image"),
    ("gz", "gzip"),
    ("tar", "tar archive"),
    ("zip", "ZIP archive"),
    // Source and applications
    ("app", "Application"),
    ("c", "C source"),
    ("h", "C header"),
    ("js", "JavaScript"),
    ("py", "Python"),
    ("rb", "Ruby"),
    ("rs", "Rust"),
    ("sh", "Shell script"),
];

/// Immutable mnemonic → kind-substring mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindTable {
    entries: BTreeMap<String, String>,
}

impl KindTable {
    /// The built-in table
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_KINDS
                .iter()
                .map(|(ext, kind)| ((*ext).to_string(), (*kind).to_string()))
                .collect(),
        }
    }

    /// Overlay user entries; a user entry replaces a built-in one of the same name
    #[must_use]
    pub fn with_overrides(mut self, overrides: &HashMap<String, String>) -> Self {
        self.entries
            .extend(overrides.iter().map(|(ext, kind)| (ext.clone(), kind.clone())));
        self
    }

    /// Kind substring for `mnemonic` (exact, case-sensitive)
    #[must_use]
    pub fn lookup(&self, mnemonic: &str) -> Option<&str> {
        self.entries.get(mnemonic).map(String::as_str)
    }

    /// Entries sorted by mnemonic
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(ext, kind)| (ext.as_str(), kind.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for KindTable {
    fn default() -> Self {
        Self::builtin()
    }
}
