//! Path rendering utilities.
//!
//! Scanned paths are rendered with `/` separators and NFC-normalized
//! Unicode so that reports compare equal across platforms. macOS stores
//! file names in NFD (Decomposed) form, so `café.txt` can arrive as
//! `cafe\u{0301}.txt`; rendering both as NFC keeps the output stable.
//!
//! Normalization only affects rendering. The paths stored in a
//! [`ScanResult`](super::ScanResult) are left exactly as the walk produced
//! them.
//!
//! # Example
//!
//! ```
//! use dirdupes::scanner::path_utils::normalize_path_str;
//!
//! let nfc = "café.txt";
//! let nfd = "cafe\u{0301}.txt";
//! assert_eq!(normalize_path_str(nfc), normalize_path_str(nfd));
//! ```

use std::path::Path;
use unicode_normalization::UnicodeNormalization;

/// Normalize a string to NFC (Composed) form.
#[must_use]
pub fn normalize_path_str(s: &str) -> String {
    s.nfc().collect()
}

/// Render a path for display and export.
///
/// Invalid UTF-8 is replaced lossily, Windows separators become `/`, and
/// the result is NFC-normalized.
///
/// # Example
///
/// ```
/// use dirdupes::scanner::path_utils::display_path;
/// use std::path::Path;
///
/// assert_eq!(display_path(Path::new("root/foo/c.txt")), "root/foo/c.txt");
/// ```
#[must_use]
pub fn display_path(path: &Path) -> String {
    let lossy = path.to_string_lossy();
    if cfg!(windows) {
        normalize_path_str(&lossy.replace('\\', "/"))
    } else {
        normalize_path_str(&lossy)
    }
}
