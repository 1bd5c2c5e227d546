use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::config::GardenClusterConfig;
use crate::error::{GardenError, GardenResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Garden,
    Seed,
    Shoot,
}

impl TargetKind {
    /// Kinds in drill-down order. A kind's index is its position in a target.
    pub const ALL: [TargetKind; 3] = [TargetKind::Garden, TargetKind::Seed, TargetKind::Shoot];

    pub fn depth(self) -> usize {
        match self {
            Self::Garden => 0,
            Self::Seed => 1,
            Self::Shoot => 2,
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Garden => write!(f, "garden"),
            Self::Seed => write!(f, "seed"),
            Self::Shoot => write!(f, "shoot"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetEntry {
    pub kind: TargetKind,
    pub name: String,
}

/// The current drill-down path, e.g. garden `dev` / seed `aws-eu1` / shoot `web`.
///
/// Entries always form a prefix of garden, seed, shoot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    #[serde(rename = "target", default)]
    entries: Vec<TargetEntry>,
}

impl Target {
    pub fn with_garden(name: impl Into<String>) -> Self {
        Self {
            entries: vec![TargetEntry {
                kind: TargetKind::Garden,
                name: name.into(),
            }],
        }
    }

    pub fn entries(&self) -> &[TargetEntry] {
        &self.entries
    }

    pub fn name_of(&self, kind: TargetKind) -> Option<&str> {
        self.entries.get(kind.depth()).map(|e| e.name.as_str())
    }

    pub fn require(&self, kind: TargetKind) -> GardenResult<&str> {
        self.name_of(kind).ok_or(GardenError::NotTargeted(kind))
    }

    pub fn deepest(&self) -> Option<&TargetEntry> {
        self.entries.last()
    }

    /// Targets `name` as `kind`, dropping anything below it. Seeds need a
    /// targeted garden and shoots a targeted seed.
    pub fn select(&mut self, kind: TargetKind, name: impl Into<String>) -> GardenResult<()> {
        let depth = kind.depth();
        if self.entries.len() < depth {
            return Err(GardenError::NotTargeted(TargetKind::ALL[depth - 1]));
        }
        self.entries.truncate(depth);
        self.entries.push(TargetEntry {
            kind,
            name: name.into(),
        });
        Ok(())
    }

    /// Removes `kind` and everything below it. The garden itself always
    /// stays targeted, so untargeting it only clears its children.
    pub fn untarget(&mut self, kind: TargetKind) -> GardenResult<Vec<TargetEntry>> {
        let depth = kind.depth().max(1);
        if self.entries.len() <= depth {
            return Err(GardenError::NotTargeted(TargetKind::ALL[depth]));
        }
        Ok(self.entries.split_off(depth))
    }

    pub fn untarget_deepest(&mut self) -> GardenResult<TargetEntry> {
        if self.entries.len() <= 1 {
            return Err(GardenError::NotTargeted(TargetKind::Seed));
        }
        self.entries
            .pop()
            .ok_or(GardenError::NotTargeted(TargetKind::Seed))
    }

    fn validate(&self) -> Result<(), String> {
        if self.entries.is_empty() {
            return Err("no garden targeted".to_string());
        }
        if self.entries.len() > TargetKind::ALL.len() {
            return Err(format!("{} entries, at most 3 allowed", self.entries.len()));
        }
        for (entry, expected) in self.entries.iter().zip(TargetKind::ALL) {
            if entry.kind != expected {
                return Err(format!(
                    "expected {expected} at position {}, found {}",
                    expected.depth(),
                    entry.kind
                ));
            }
        }
        Ok(())
    }
}

/// Flat-file persistence for [`Target`].
#[derive(Debug, Clone)]
pub struct TargetStore {
    path: PathBuf,
}

impl TargetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes a target for the first configured garden unless a target file
    /// already exists. Returns whether a file was written.
    pub fn ensure_initialized(&self, config: &GardenClusterConfig) -> GardenResult<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        let garden = config.default_garden()?;
        let target = Target::with_garden(&garden.name);

        let file = self.stage(&target)?;
        match file.persist_noclobber(&self.path) {
            Ok(_) => {
                tracing::info!(garden = %garden.name, "Initialized target with default garden");
                Ok(true)
            }
            // Someone else created it in the meantime; theirs stays.
            Err(e) if e.error.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(self.write_error(e.error)),
        }
    }

    pub fn read(&self) -> GardenResult<Target> {
        let read_error = |reason: String| GardenError::TargetRead {
            path: self.path.clone(),
            reason,
        };
        let content = std::fs::read_to_string(&self.path).map_err(|e| read_error(e.to_string()))?;
        let target: Target = serde_yaml::from_str(&content)
            .map_err(|e| read_error(format!("Invalid YAML: {e}")))?;
        target.validate().map_err(read_error)?;
        Ok(target)
    }

    /// Replaces the target file. Readers see either the old or the new file.
    pub fn write(&self, target: &Target) -> GardenResult<()> {
        let file = self.stage(target)?;
        file.persist(&self.path)
            .map_err(|e| self.write_error(e.error))?;
        tracing::debug!(path = %self.path.display(), "Target written");
        Ok(())
    }

    /// Serializes `target` into a flushed temp file next to the target file.
    /// The temp file is removed when dropped without being persisted.
    fn stage(&self, target: &Target) -> GardenResult<NamedTempFile> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|e| self.write_error(e))?;

        let content = serde_yaml::to_string(target)
            .map_err(|e| self.write_error(std::io::Error::other(e)))?;
        let mut file = NamedTempFile::new_in(dir).map_err(|e| self.write_error(e))?;
        file.write_all(content.as_bytes())
            .and_then(|()| file.as_file().sync_all())
            .map_err(|e| self.write_error(e))?;
        Ok(file)
    }

    fn write_error(&self, source: std::io::Error) -> GardenError {
        GardenError::TargetWrite {
            path: self.path.clone(),
            source,
        }
    }
}
