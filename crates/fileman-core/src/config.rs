//! Walk configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Configuration for a single recursive walk.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct WalkConfig {
    /// Directory (or single file) the walk starts from; it is visited too.
    pub root: PathBuf,

    /// Descend into symlinked directories.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Visit dot-entries. On by default, so `*` matches `.bashrc`.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub include_hidden: bool,

    /// Depth limit below the root; `None` walks the whole tree.
    #[builder(default)]
    #[serde(default)]
    pub max_depth: Option<u32>,
}

fn default_true() -> bool {
    true
}

impl WalkConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.root {
            Some(ref root) if root.as_os_str().is_empty() => {
                Err("walk root must not be empty".to_string())
            }
            Some(_) => Ok(()),
            None => Err("walk root is required".to_string()),
        }
    }
}

impl WalkConfig {
    pub fn builder() -> WalkConfigBuilder {
        WalkConfigBuilder::default()
    }

    /// Config with default options rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_symlinks: false,
            include_hidden: true,
            max_depth: None,
        }
    }

    /// Return a copy of this config rooted somewhere else.
    pub fn with_root(&self, root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..self.clone()
        }
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Which roots an invocation should cover.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootSelection {
    /// Walk every accessible volume. When set, `disk` is ignored.
    pub all: bool,
    /// A single explicit root.
    pub disk: Option<PathBuf>,
}

impl RootSelection {
    /// Select every accessible volume.
    pub fn all_drives() -> Self {
        Self {
            all: true,
            disk: None,
        }
    }

    /// Select a single root.
    pub fn disk(path: impl Into<PathBuf>) -> Self {
        Self {
            all: false,
            disk: Some(path.into()),
        }
    }
}
