//! Root enumeration.
//!
//! Turns a [`RootSelection`] into the ordered list of paths to walk. On
//! single-root platforms "all drives" is just `/`; on drive-letter
//! platforms each of `A:\` through `Z:\` is probed and kept only when
//! accessible.

use std::path::{Path, PathBuf};

use fileman_core::{PathConvention, Platform, RootSelection};

/// Decides whether a candidate volume root is usable.
pub trait VolumeProbe {
    /// Return `true` when `root` can be walked.
    fn is_accessible(&self, root: &Path) -> bool;
}

/// Probe backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl VolumeProbe for FsProbe {
    fn is_accessible(&self, root: &Path) -> bool {
        std::fs::metadata(root).is_ok()
    }
}

impl<F> VolumeProbe for F
where
    F: Fn(&Path) -> bool,
{
    fn is_accessible(&self, root: &Path) -> bool {
        self(root)
    }
}

/// List every accessible volume root.
pub fn all_drives(platform: &Platform, probe: &dyn VolumeProbe) -> Vec<PathBuf> {
    match platform.convention {
        PathConvention::SingleRoot => vec![PathBuf::from("/")],
        PathConvention::DriveLetters => {
            let drives: Vec<PathBuf> = ('A'..='Z')
                .map(|letter| PathBuf::from(format!("{letter}:\\")))
                .filter(|root| probe.is_accessible(root))
                .collect();

            if drives.is_empty() {
                tracing::warn!("No accessible drives found");
            }
            drives
        }
    }
}

/// Resolve the roots an invocation should walk.
///
/// `selection.disk` is ignored when `selection.all` is set. With neither,
/// the platform's default root is used.
pub fn resolve_roots(
    selection: &RootSelection,
    platform: &Platform,
    probe: &dyn VolumeProbe,
) -> Vec<PathBuf> {
    if selection.all {
        return all_drives(platform, probe);
    }

    match &selection.disk {
        Some(disk) if !disk.as_os_str().is_empty() => vec![disk.clone()],
        _ => vec![platform.default_root()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_root_all_drives() {
        let never = |_: &Path| false;
        assert_eq!(
            all_drives(&Platform::single_root(), &never),
            vec![PathBuf::from("/")]
        );
    }

    #[test]
    fn test_drive_letters_probe_in_order() {
        let probe = |root: &Path| {
            let s = root.to_string_lossy();
            s.starts_with('C') || s.starts_with('E') || s.starts_with('Z')
        };
        let drives = all_drives(&Platform::drive_letters("C:"), &probe);

        assert_eq!(
            drives,
            vec![
                PathBuf::from("C:\\"),
                PathBuf::from("E:\\"),
                PathBuf::from("Z:\\"),
            ]
        );
    }

    #[test]
    fn test_no_accessible_drives() {
        let never = |_: &Path| false;
        assert!(all_drives(&Platform::drive_letters("C:"), &never).is_empty());
    }

    #[test]
    fn test_disk_ignored_when_all() {
        let always = |_: &Path| true;
        let selection = RootSelection {
            all: true,
            disk: Some(PathBuf::from("/ignored")),
        };

        assert_eq!(
            resolve_roots(&selection, &Platform::single_root(), &always),
            vec![PathBuf::from("/")]
        );
        assert_eq!(
            resolve_roots(&selection, &Platform::drive_letters("C:"), &always).len(),
            26
        );
    }

    #[test]
    fn test_explicit_disk() {
        let selection = RootSelection::disk("/var/log");
        assert_eq!(
            resolve_roots(&selection, &Platform::single_root(), &FsProbe),
            vec![PathBuf::from("/var/log")]
        );
    }

    #[test]
    fn test_default_root() {
        let selection = RootSelection::default();
        assert_eq!(
            resolve_roots(&selection, &Platform::single_root(), &FsProbe),
            vec![PathBuf::from("/")]
        );
        assert_eq!(
            resolve_roots(&selection, &Platform::drive_letters("D:"), &FsProbe),
            vec![PathBuf::from("D:\\")]
        );
    }

    #[test]
    fn test_fs_probe() {
        let temp = tempfile::TempDir::new().unwrap();
        assert!(FsProbe.is_accessible(temp.path()));
        assert!(!FsProbe.is_accessible(&temp.path().join("missing")));
    }
}
