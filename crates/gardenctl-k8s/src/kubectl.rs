use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;

use gardenctl_core::error::{GardenError, GardenResult};

use crate::scan::{scan_credentials, ShootCredentials};

/// Runs kubectl against a specific kubeconfig.
#[async_trait]
pub trait Kubectl: Send + Sync {
    /// Runs kubectl with `KUBECONFIG` set to `kubeconfig` and returns its stdout.
    async fn output(&self, kubeconfig: &Path, args: &[&str]) -> GardenResult<String>;
}

/// The real `kubectl` binary.
#[derive(Debug, Clone)]
pub struct KubectlBinary {
    program: PathBuf,
}

impl Default for KubectlBinary {
    fn default() -> Self {
        Self::new("kubectl")
    }
}

impl KubectlBinary {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, kubeconfig: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.env("KUBECONFIG", kubeconfig);
        cmd
    }

    fn describe(&self, args: &[impl AsRef<str>]) -> String {
        let mut line = self.program.display().to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg.as_ref());
        }
        line
    }

    /// Runs kubectl with the terminal attached and returns its exit code.
    pub async fn passthrough(&self, kubeconfig: &Path, args: &[String]) -> GardenResult<i32> {
        tracing::debug!(kubeconfig = %kubeconfig.display(), ?args, "Running kubectl");
        let status = self
            .command(kubeconfig)
            .args(args)
            .status()
            .await
            .map_err(|e| GardenError::Subprocess {
                command: self.describe(args),
                reason: e.to_string(),
            })?;
        // Killed by a signal: report a generic failure.
        Ok(status.code().unwrap_or(1))
    }
}

#[async_trait]
impl Kubectl for KubectlBinary {
    async fn output(&self, kubeconfig: &Path, args: &[&str]) -> GardenResult<String> {
        tracing::debug!(kubeconfig = %kubeconfig.display(), ?args, "Running kubectl");
        let subprocess_error = |reason: String| GardenError::Subprocess {
            command: self.describe(args),
            reason,
        };

        let output = self
            .command(kubeconfig)
            .args(args)
            .output()
            .await
            .map_err(|e| subprocess_error(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(subprocess_error(format!(
                "{}: {}",
                output.status,
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// `kubectl config current-context`, trailing whitespace trimmed.
pub async fn current_context<K: Kubectl + ?Sized>(
    kubectl: &K,
    kubeconfig: &Path,
) -> GardenResult<String> {
    let output = kubectl
        .output(kubeconfig, &["config", "current-context"])
        .await?;
    Ok(output.trim_end().to_string())
}

/// Basic-auth credentials from `kubectl config view`.
pub async fn view_credentials<K: Kubectl + ?Sized>(
    kubectl: &K,
    kubeconfig: &Path,
) -> GardenResult<ShootCredentials> {
    let output = kubectl.output(kubeconfig, &["config", "view"]).await?;
    Ok(scan_credentials(&output))
}

#[cfg(test)]
pub(crate) mod fake {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// Replays canned stdout keyed by the joined argument list.
    #[derive(Default)]
    pub struct FakeKubectl {
        outputs: HashMap<String, String>,
        pub calls: Mutex<Vec<(PathBuf, String)>>,
    }

    impl FakeKubectl {
        pub fn with(mut self, args: &str, stdout: &str) -> Self {
            self.outputs.insert(args.to_string(), stdout.to_string());
            self
        }
    }

    #[async_trait]
    impl Kubectl for FakeKubectl {
        async fn output(&self, kubeconfig: &Path, args: &[&str]) -> GardenResult<String> {
            let key = args.join(" ");
            self.calls
                .lock()
                .unwrap()
                .push((kubeconfig.to_path_buf(), key.clone()));
            self.outputs
                .get(&key)
                .cloned()
                .ok_or_else(|| GardenError::Subprocess {
                    command: format!("kubectl {key}"),
                    reason: "exit status: 1".into(),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeKubectl;
    use super::*;

    #[tokio::test]
    async fn current_context_is_trimmed() {
        let kubectl = FakeKubectl::default().with("config current-context", "garden-dev\n");
        let name = current_context(&kubectl, Path::new("/g/dev.yaml")).await.unwrap();
        assert_eq!(name, "garden-dev");

        let calls = kubectl.calls.lock().unwrap();
        assert_eq!(calls[0].0, PathBuf::from("/g/dev.yaml"));
    }

    #[tokio::test]
    async fn credentials_from_config_view() {
        let view = "users:\n- name: alice\n  user:\n    username: alice\n    password: a1\n\
                    - name: bob\n  user:\n    username: bob\n    password: b1\n";
        let kubectl = FakeKubectl::default().with("config view", view);
        let credentials = view_credentials(&kubectl, Path::new("/g/shoot.yaml"))
            .await
            .unwrap();
        assert_eq!(
            (credentials.username.as_str(), credentials.password.as_str()),
            ("bob", "b1")
        );
    }

    #[tokio::test]
    async fn failing_kubectl_is_subprocess_error() {
        let kubectl = FakeKubectl::default();
        let err = current_context(&kubectl, Path::new("/g/dev.yaml"))
            .await
            .unwrap_err();
        assert!(matches!(err, GardenError::Subprocess { .. }));
    }

    #[tokio::test]
    async fn missing_binary_is_subprocess_error() {
        let kubectl = KubectlBinary::new("/nonexistent/kubectl-for-tests");
        let err = kubectl
            .output(Path::new("/g/dev.yaml"), &["version"])
            .await
            .unwrap_err();
        match err {
            GardenError::Subprocess { command, .. } => {
                assert_eq!(command, "/nonexistent/kubectl-for-tests version")
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
