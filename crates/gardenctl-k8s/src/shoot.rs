use kube::api::{Api, ListParams};
use kube::{Client, CustomResource, ResourceExt};
use serde::{Deserialize, Serialize};

use gardenctl_core::error::{GardenError, GardenResult};

/// A managed cluster whose control plane runs on a seed.
///
/// Create/get/list/watch/patch go through `kube::Api<Shoot>`.
#[derive(CustomResource, Debug, Clone, Default, Serialize, Deserialize)]
#[kube(
    group = "garden.sapcloud.io",
    version = "v1",
    kind = "Shoot",
    namespaced,
    status = "ShootStatus",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct ShootSpec {
    #[serde(default)]
    pub cloud: ShootCloud,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes: Option<ShootKubernetes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns: Option<ShootDns>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShootCloud {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Seed hosting the control plane. Filled in by the scheduler when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShootKubernetes {
    pub version: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShootDns {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShootStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_operation: Option<LastOperation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastOperation {
    #[serde(rename = "type")]
    pub type_: String,
    pub state: String,
    #[serde(default)]
    pub progress: i32,
}

impl Shoot {
    pub fn seed_name(&self) -> Option<&str> {
        self.spec.cloud.seed.as_deref()
    }
}

/// Lists shoots across all namespaces of the garden cluster.
pub async fn list_shoots(client: Client) -> GardenResult<Vec<Shoot>> {
    let api: Api<Shoot> = Api::all(client);
    let list = api
        .list(&ListParams::default())
        .await
        .map_err(|e| GardenError::Api(e.into()))?;
    tracing::debug!(shoots = list.items.len(), "Listed shoots");
    Ok(list.items)
}

/// Namespace on the seed that holds the control plane of shoot `name`:
/// `shoot-<shoot namespace>-<name>`. When several shoots share the name the
/// last one listed wins.
pub fn backing_namespace(shoots: &[Shoot], name: &str) -> Option<String> {
    shoots
        .iter()
        .rev()
        .find(|s| s.name_any() == name)
        .map(|s| format!("shoot-{}-{}", s.namespace().unwrap_or_default(), name))
}

/// Like [`backing_namespace`], failing with `ShootNotFound` when no shoot matches.
pub fn find_backing_namespace(shoots: &[Shoot], name: &str) -> GardenResult<String> {
    backing_namespace(shoots, name).ok_or_else(|| GardenError::ShootNotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shoot(name: &str, namespace: &str) -> Shoot {
        let mut shoot = Shoot::new(name, ShootSpec::default());
        shoot.metadata.namespace = Some(namespace.to_string());
        shoot
    }

    #[test]
    fn backing_namespace_format() {
        let shoots = vec![shoot("other", "garden-dev"), shoot("myshoot", "garden-prod")];
        assert_eq!(
            backing_namespace(&shoots, "myshoot").as_deref(),
            Some("shoot-garden-prod-myshoot")
        );
    }

    #[test]
    fn backing_namespace_missing() {
        let shoots = vec![shoot("other", "garden-dev")];
        assert_eq!(backing_namespace(&shoots, "myshoot"), None);
    }

    #[test]
    fn unknown_shoot_is_not_found() {
        let shoots = vec![shoot("other", "garden-dev")];
        let err = find_backing_namespace(&shoots, "myshoot").unwrap_err();
        assert!(matches!(err, GardenError::ShootNotFound(name) if name == "myshoot"));
        assert_eq!(
            find_backing_namespace(&shoots, "other").unwrap(),
            "shoot-garden-dev-other"
        );
    }

    #[test]
    fn backing_namespace_last_match_wins() {
        let shoots = vec![shoot("web", "garden-a"), shoot("web", "garden-b")];
        assert_eq!(
            backing_namespace(&shoots, "web").as_deref(),
            Some("shoot-garden-b-web")
        );
    }

    #[test]
    fn deserializes_garden_shoot() {
        let shoot: Shoot = serde_json::from_value(serde_json::json!({
            "apiVersion": "garden.sapcloud.io/v1",
            "kind": "Shoot",
            "metadata": { "name": "web", "namespace": "garden-dev" },
            "spec": {
                "cloud": { "profile": "aws", "region": "eu-west-1", "seed": "aws-eu1" },
                "kubernetes": { "version": "1.10.1" },
                "dns": { "domain": "web.dev.example.com" }
            },
            "status": {
                "lastOperation": { "type": "Reconcile", "state": "Succeeded", "progress": 100 }
            }
        }))
        .unwrap();

        assert_eq!(shoot.seed_name(), Some("aws-eu1"));
        assert_eq!(shoot.spec.kubernetes.unwrap().version, "1.10.1");
        assert_eq!(shoot.status.unwrap().last_operation.unwrap().state, "Succeeded");
    }
}
