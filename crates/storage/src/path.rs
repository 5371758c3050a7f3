//! Snapshot location validation.
//!
//! Snapshot locations come from configuration and are joined onto a storage
//! root, so they must never climb out of that root.

use std::path::{Component, Path, PathBuf};

use crate::error::{ErrorKind, Result};

/// Validates a snapshot location relative to the storage root.
///
/// Resolves `.` and `..` lexically and rejects anything that would leave the
/// root, contains a null byte, or resolves to nothing.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use rolba_storage::validate_path;
///
/// assert!(validate_path("vinyl_empire_records.json").is_ok());
/// assert!(validate_path("shops/../black_vinyl_bazar_records.json").is_ok());
/// assert!(validate_path("../outside.json").is_err());
/// assert!(validate_path("a\0b.json").is_err());
/// assert_eq!(
///     validate_path("./shops//vinyl.json").unwrap(),
///     Path::new("shops/vinyl.json")
/// );
/// ```
pub fn validate(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let invalid = || exn::Exn::from(ErrorKind::InvalidPath(path.to_path_buf()));
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(s) => {
                // Null bytes survive `components()` on Unix but truncate in syscalls.
                if s.as_encoded_bytes().contains(&0) {
                    return Err(invalid());
                }
                components.push(s)
            },
            Component::CurDir | Component::RootDir => {},
            Component::Prefix(_) => return Err(invalid()),
            Component::ParentDir => {
                if components.pop().is_none() {
                    return Err(invalid());
                }
            },
        }
    }
    match components.is_empty() {
        true => Err(invalid()),
        false => Ok(components.into_iter().collect()),
    }
}
