use std::path::Path;

use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::Client;

use gardenctl_core::error::{GardenError, GardenResult};
use gardenctl_core::target::TargetKind;

/// Builds a client from the kubeconfig at `path`, using its current context.
/// Nothing is sent to the API server until the first request.
pub async fn create_client(kind: TargetKind, path: &Path) -> GardenResult<Client> {
    let build_error = |source: anyhow::Error| GardenError::ClientBuild {
        kind,
        path: path.to_path_buf(),
        source,
    };

    let kubeconfig = Kubeconfig::read_from(path).map_err(|e| build_error(e.into()))?;
    let kube_config = kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .map_err(|e| build_error(e.into()))?;
    let client = Client::try_from(kube_config).map_err(|e| build_error(e.into()))?;

    tracing::debug!(%kind, path = %path.display(), "Built API client");
    Ok(client)
}
