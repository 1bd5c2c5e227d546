use std::path::{Path, PathBuf};

/// On-disk layout rooted at the garden home directory (`~/.garden` by default).
///
/// ```text
/// <root>/config                                                  garden cluster config
/// <root>/target                                                  current target
/// <root>/cache/<garden>/seeds/<seed>/kubeconfig.yaml             seed kubeconfig
/// <root>/cache/<garden>/seeds/<seed>/shoots/<shoot>/kubeconfig.yaml
/// ```
#[derive(Debug, Clone)]
pub struct GardenHome {
    root: PathBuf,
    user_home: Option<PathBuf>,
}

const DEFAULT_DIR: &str = ".garden";

impl GardenHome {
    pub fn new(root: impl Into<PathBuf>, user_home: Option<PathBuf>) -> Self {
        Self {
            root: root.into(),
            user_home,
        }
    }

    /// Uses `root` when given, otherwise `~/.garden`.
    pub fn resolve(root: Option<PathBuf>) -> Self {
        let user_home = dirs::home_dir();
        let root = root.unwrap_or_else(|| match &user_home {
            Some(home) => home.join(DEFAULT_DIR),
            None => PathBuf::from(DEFAULT_DIR),
        });
        Self { root, user_home }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The operator's home directory, used for `~` expansion.
    pub fn user_home(&self) -> Option<&Path> {
        self.user_home.as_deref()
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join("config")
    }

    pub fn target_path(&self) -> PathBuf {
        self.root.join("target")
    }

    fn seed_dir(&self, garden: &str, seed: &str) -> PathBuf {
        self.root.join("cache").join(garden).join("seeds").join(seed)
    }

    pub fn seed_kubeconfig(&self, garden: &str, seed: &str) -> PathBuf {
        self.seed_dir(garden, seed).join("kubeconfig.yaml")
    }

    pub fn shoot_kubeconfig(&self, garden: &str, seed: &str, shoot: &str) -> PathBuf {
        self.seed_dir(garden, seed)
            .join("shoots")
            .join(shoot)
            .join("kubeconfig.yaml")
    }
}
