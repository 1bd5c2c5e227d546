use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GardenError, GardenResult};

/// Top-level garden cluster config file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GardenClusterConfig {
    #[serde(default)]
    pub garden_clusters: Vec<GardenCluster>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GardenCluster {
    pub name: String,
    /// Path to the garden kubeconfig. A leading `~` refers to the home directory.
    #[serde(rename = "kubeConfig")]
    pub kubeconfig: String,
}

impl GardenClusterConfig {
    pub fn from_file(path: &Path) -> GardenResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GardenError::ConfigRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config = Self::from_yaml(&content).map_err(|reason| GardenError::ConfigRead {
            path: path.to_path_buf(),
            reason,
        })?;
        tracing::debug!(
            path = %path.display(),
            gardens = config.garden_clusters.len(),
            "Loaded garden cluster config"
        );
        Ok(config)
    }

    fn from_yaml(content: &str) -> Result<Self, String> {
        // An empty document deserializes to unit, not to an empty mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_yaml::from_str(content).map_err(|e| format!("Invalid YAML: {e}"))?;

        let mut seen = HashSet::new();
        for cluster in &config.garden_clusters {
            if !seen.insert(cluster.name.as_str()) {
                return Err(format!("duplicate garden cluster name '{}'", cluster.name));
            }
        }
        Ok(config)
    }

    /// The garden that is targeted when nothing else has been selected yet.
    pub fn default_garden(&self) -> GardenResult<&GardenCluster> {
        self.garden_clusters
            .first()
            .ok_or(GardenError::NoGardenClusters)
    }

    pub fn find(&self, name: &str) -> Option<&GardenCluster> {
        self.garden_clusters.iter().find(|c| c.name == name)
    }
}

impl GardenCluster {
    /// Kubeconfig path with a leading `~` expanded against `home`.
    pub fn kubeconfig_path(&self, home: Option<&Path>) -> PathBuf {
        expand_home(&self.kubeconfig, home)
    }
}

/// Expands a leading `~` in `path`. Without a home directory the path is
/// returned unchanged.
pub fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    let expanded = shellexpand::tilde_with_context(path, || {
        home.map(|h| h.to_string_lossy().into_owned())
    });
    PathBuf::from(expanded.as_ref())
}
