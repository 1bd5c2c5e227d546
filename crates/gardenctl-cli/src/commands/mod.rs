use clap::{Subcommand, ValueEnum};

use gardenctl_core::target::TargetKind;

pub mod credentials;
pub mod info;
pub mod kubeconfig;
pub mod kubectl;
pub mod ls;
pub mod namespace;
pub mod show;
pub mod target;
pub mod untarget;

#[derive(Subcommand)]
pub enum Commands {
    /// Target a garden, seed or shoot cluster
    Target(target::TargetArgs),
    /// Untarget the most specific cluster, or a kind and everything below it
    Drop(untarget::DropArgs),
    /// Print the current target
    Show(show::ShowArgs),
    /// List garden clusters or shoots
    Ls(ls::LsArgs),
    /// Print the name of the targeted cluster
    Info(info::InfoArgs),
    /// Print the kubeconfig path of a targeted cluster
    Kubeconfig(kubeconfig::KubeconfigArgs),
    /// Print the basic-auth credentials of the targeted shoot
    Credentials(credentials::CredentialsArgs),
    /// Print the seed namespace backing a shoot's control plane
    Namespace(namespace::NamespaceArgs),
    /// Run kubectl against the targeted cluster
    Kubectl(kubectl::KubectlArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Garden,
    Seed,
    Shoot,
}

impl From<KindArg> for TargetKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Garden => TargetKind::Garden,
            KindArg::Seed => TargetKind::Seed,
            KindArg::Shoot => TargetKind::Shoot,
        }
    }
}
