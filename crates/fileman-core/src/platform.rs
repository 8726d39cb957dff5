//! Explicit description of the host's filesystem conventions.
//!
//! Library code never inspects the compile target or environment directly;
//! the binary calls [`Platform::detect`] once and passes the result down.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Environment variable naming the system drive on drive-letter platforms.
pub const SYSTEM_DRIVE_VAR: &str = "SystemDrive";

/// Fallback system drive when the environment does not provide one.
pub const DEFAULT_SYSTEM_DRIVE: &str = "C:";

/// How the host names its filesystem roots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathConvention {
    /// A single tree rooted at `/`.
    SingleRoot,
    /// One root per volume, named `A:\` through `Z:\`.
    DriveLetters,
}

impl PathConvention {
    /// Convention of the compile target.
    pub fn native() -> Self {
        if cfg!(windows) {
            Self::DriveLetters
        } else {
            Self::SingleRoot
        }
    }
}

/// Host filesystem conventions used to pick default roots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    /// Root naming convention.
    pub convention: PathConvention,
    /// System drive, e.g. `C:`. Only meaningful for [`PathConvention::DriveLetters`].
    pub system_drive: String,
}

impl Platform {
    /// A single-root platform (Linux, macOS, ...).
    pub fn single_root() -> Self {
        Self {
            convention: PathConvention::SingleRoot,
            system_drive: String::new(),
        }
    }

    /// A drive-letter platform with the given system drive.
    pub fn drive_letters(system_drive: impl Into<String>) -> Self {
        Self {
            convention: PathConvention::DriveLetters,
            system_drive: system_drive.into(),
        }
    }

    /// Detect the running host's conventions.
    pub fn detect() -> Self {
        match PathConvention::native() {
            PathConvention::SingleRoot => Self::single_root(),
            PathConvention::DriveLetters => Self::drive_letters(
                std::env::var(SYSTEM_DRIVE_VAR)
                    .ok()
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| DEFAULT_SYSTEM_DRIVE.to_string()),
            ),
        }
    }

    /// Root used when the caller names no disk.
    pub fn default_root(&self) -> PathBuf {
        match self.convention {
            PathConvention::SingleRoot => PathBuf::from("/"),
            PathConvention::DriveLetters => {
                let drive = self.system_drive.trim_end_matches(['\\', '/']);
                let drive = if drive.is_empty() {
                    DEFAULT_SYSTEM_DRIVE
                } else {
                    drive
                };
                PathBuf::from(format!("{drive}\\"))
            }
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::detect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_root_default() {
        assert_eq!(Platform::single_root().default_root(), PathBuf::from("/"));
    }

    #[test]
    fn test_drive_letter_default() {
        assert_eq!(
            Platform::drive_letters("D:").default_root(),
            PathBuf::from("D:\\")
        );
        assert_eq!(
            Platform::drive_letters("E:\\").default_root(),
            PathBuf::from("E:\\")
        );
        assert_eq!(
            Platform::drive_letters("").default_root(),
            PathBuf::from("C:\\")
        );
    }

    #[test]
    fn test_detect_matches_target() {
        assert_eq!(Platform::detect().convention, PathConvention::native());
    }
}
