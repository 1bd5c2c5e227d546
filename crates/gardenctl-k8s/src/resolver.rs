use std::collections::HashMap;
use std::path::PathBuf;

use k8s_openapi::api::core::v1::Namespace;
use kube::api::{Api, ListParams};
use kube::{Client, ResourceExt};

use gardenctl_core::config::GardenClusterConfig;
use gardenctl_core::error::{GardenError, GardenResult};
use gardenctl_core::home::GardenHome;
use gardenctl_core::target::{Target, TargetKind};

use crate::client::create_client;
use crate::kubectl::{current_context, view_credentials, Kubectl, KubectlBinary};
use crate::scan::{match_namespace_suffix, scan_current_context, ShootCredentials};
use crate::shoot::{find_backing_namespace, list_shoots, Shoot};

/// Maps the current target to kubeconfigs and clients.
///
/// Paths and clients are resolved lazily and cached per kind for the
/// lifetime of the resolver, which is one command invocation.
pub struct CredentialResolver<K = KubectlBinary> {
    home: GardenHome,
    config: GardenClusterConfig,
    target: Target,
    kubectl: K,
    paths: HashMap<TargetKind, PathBuf>,
    clients: HashMap<TargetKind, Client>,
}

impl<K: Kubectl> CredentialResolver<K> {
    pub fn new(home: GardenHome, config: GardenClusterConfig, target: Target, kubectl: K) -> Self {
        Self {
            home,
            config,
            target,
            kubectl,
            paths: HashMap::new(),
            clients: HashMap::new(),
        }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn kubectl(&self) -> &K {
        &self.kubectl
    }

    /// Kind of the most specific targeted cluster.
    pub fn current_kind(&self) -> GardenResult<TargetKind> {
        self.target
            .deepest()
            .map(|e| e.kind)
            .ok_or(GardenError::NotTargeted(TargetKind::Garden))
    }

    pub fn kubeconfig_path_for(&mut self, kind: TargetKind) -> GardenResult<PathBuf> {
        if let Some(path) = self.paths.get(&kind) {
            return Ok(path.clone());
        }

        let garden = self.target.require(TargetKind::Garden)?;
        let path = match kind {
            TargetKind::Garden => self
                .config
                .find(garden)
                .ok_or_else(|| GardenError::UnknownGarden(garden.to_string()))?
                .kubeconfig_path(self.home.user_home()),
            TargetKind::Seed => {
                let seed = self.target.require(TargetKind::Seed)?;
                self.home.seed_kubeconfig(garden, seed)
            }
            TargetKind::Shoot => {
                let seed = self.target.require(TargetKind::Seed)?;
                let shoot = self.target.require(TargetKind::Shoot)?;
                self.home.shoot_kubeconfig(garden, seed, shoot)
            }
        };

        tracing::debug!(%kind, path = %path.display(), "Resolved kubeconfig");
        self.paths.insert(kind, path.clone());
        Ok(path)
    }

    pub async fn client_for(&mut self, kind: TargetKind) -> GardenResult<Client> {
        if let Some(client) = self.clients.get(&kind) {
            return Ok(client.clone());
        }
        let path = self.kubeconfig_path_for(kind)?;
        let client = create_client(kind, &path).await?;
        self.clients.insert(kind, client.clone());
        Ok(client)
    }

    /// Current context of the most specific targeted cluster, as reported by kubectl.
    pub async fn current_cluster_display_name(&mut self) -> GardenResult<String> {
        let kind = self.current_kind()?;
        let path = self.kubeconfig_path_for(kind)?;
        current_context(&self.kubectl, &path).await
    }

    pub async fn list_shoots(&mut self) -> GardenResult<Vec<Shoot>> {
        let client = self.client_for(TargetKind::Garden).await?;
        list_shoots(client).await
    }

    /// Namespace on the seed cluster that hosts the control plane of `shoot_name`.
    pub async fn shoot_backing_namespace(&mut self, shoot_name: &str) -> GardenResult<String> {
        let shoots = self.list_shoots().await?;
        find_backing_namespace(&shoots, shoot_name)
    }

    pub async fn shoot_cluster_credentials(&mut self) -> GardenResult<ShootCredentials> {
        self.client_for(TargetKind::Shoot).await?;
        let path = self.kubeconfig_path_for(TargetKind::Shoot)?;
        view_credentials(&self.kubectl, &path).await
    }

    /// Seed namespace name for the targeted shoot: the seed kubeconfig's
    /// current context, qualified by the first seed namespace ending with it.
    pub async fn shoot_cluster_display_name(&mut self) -> GardenResult<String> {
        let path = self.kubeconfig_path_for(TargetKind::Seed)?;
        let content = std::fs::read_to_string(&path).map_err(|e| GardenError::ClientBuild {
            kind: TargetKind::Seed,
            path: path.clone(),
            source: e.into(),
        })?;
        let short_name = scan_current_context(&content).unwrap_or_default();

        let client = self.client_for(TargetKind::Seed).await?;
        let api: Api<Namespace> = Api::all(client);
        let namespaces = api
            .list(&ListParams::default())
            .await
            .map_err(|e| GardenError::Api(e.into()))?;
        let names: Vec<String> = namespaces.items.iter().map(|ns| ns.name_any()).collect();

        Ok(qualify(&names, short_name))
    }
}

fn qualify(namespaces: &[String], short_name: String) -> String {
    match match_namespace_suffix(namespaces.iter().map(String::as_str), &short_name) {
        Some(full) => full.to_string(),
        None => short_name,
    }
}
