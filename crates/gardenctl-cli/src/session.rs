use std::path::PathBuf;

use gardenctl_core::config::GardenClusterConfig;
use gardenctl_core::error::GardenResult;
use gardenctl_core::home::GardenHome;
use gardenctl_core::target::{Target, TargetStore};
use gardenctl_k8s::kubectl::KubectlBinary;
use gardenctl_k8s::resolver::CredentialResolver;

/// State every command starts from: the loaded config and the current target.
pub struct Session {
    pub home: GardenHome,
    pub config: GardenClusterConfig,
    pub store: TargetStore,
    pub target: Target,
    pub kubectl: KubectlBinary,
}

impl Session {
    pub fn load(home: Option<PathBuf>, kubectl: PathBuf) -> GardenResult<Self> {
        let home = GardenHome::resolve(home);
        let config = GardenClusterConfig::from_file(&home.config_path())?;
        let store = TargetStore::new(home.target_path());
        store.ensure_initialized(&config)?;
        let target = store.read()?;

        tracing::debug!(
            home = %home.root().display(),
            target = ?target.entries(),
            "Session loaded"
        );

        Ok(Self {
            home,
            config,
            store,
            target,
            kubectl: KubectlBinary::new(kubectl),
        })
    }

    pub fn resolver(&self) -> CredentialResolver {
        CredentialResolver::new(
            self.home.clone(),
            self.config.clone(),
            self.target.clone(),
            self.kubectl.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use gardenctl_core::error::GardenError;
    use gardenctl_core::target::TargetKind;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn first_load_targets_first_garden() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("config"),
            "gardenClusters:\n- name: dev\n  kubeConfig: ~/dev.yaml\n- name: prod\n  kubeConfig: ~/prod.yaml\n",
        )
        .unwrap();

        let session = Session::load(Some(temp.path().to_path_buf()), "kubectl".into()).unwrap();
        assert_eq!(session.target.name_of(TargetKind::Garden), Some("dev"));
        assert!(temp.path().join("target").exists());
    }

    #[test]
    fn missing_config_aborts() {
        let temp = TempDir::new().unwrap();
        let err = Session::load(Some(temp.path().to_path_buf()), "kubectl".into())
            .err()
            .unwrap();
        assert!(matches!(err, GardenError::ConfigRead { .. }));
        assert!(!temp.path().join("target").exists());
    }
}
