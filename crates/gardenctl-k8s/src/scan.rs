//! Line scanners over kubectl and kubeconfig text.
//!
//! These match the exact rendering of `kubectl config view`, where user
//! fields sit four spaces deep.

use std::fmt;

const USERNAME_PREFIX: &str = "    username: ";
const PASSWORD_PREFIX: &str = "    password: ";
const CURRENT_CONTEXT_PREFIX: &str = "current-context: ";

/// Basic-auth credentials of a shoot cluster.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ShootCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for ShootCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShootCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Picks username and password out of `kubectl config view` output. Every
/// matching line overwrites the previous value, so the last user listed wins.
pub fn scan_credentials(output: &str) -> ShootCredentials {
    let mut credentials = ShootCredentials::default();
    for line in output.lines() {
        if line.contains("password:") {
            credentials.password = strip(line, PASSWORD_PREFIX);
        } else if line.contains("username:") {
            credentials.username = strip(line, USERNAME_PREFIX);
        }
    }
    credentials
}

/// Value of the last `current-context:` line in a kubeconfig.
pub fn scan_current_context(kubeconfig: &str) -> Option<String> {
    kubeconfig
        .lines()
        .rev()
        .find(|line| line.contains("current-context:"))
        .map(|line| strip(line, CURRENT_CONTEXT_PREFIX))
}

/// First namespace whose name ends with `short_name`.
pub fn match_namespace_suffix<'a, I>(namespaces: I, short_name: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    if short_name.is_empty() {
        return None;
    }
    namespaces.into_iter().find(|ns| ns.ends_with(short_name))
}

fn strip(line: &str, prefix: &str) -> String {
    line.strip_prefix(prefix).unwrap_or(line).to_string()
}
