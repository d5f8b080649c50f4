use std::collections::HashMap;
use std::sync::Arc;

use relay::{Role, UserId};

use crate::profile::ProfileStore;

/// Who a connection belongs to, established at handshake time. Everything
/// after the handshake trusts this mapping.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
}

/// Turns the credential a client presents at handshake time into an
/// identity. `None` rejects the handshake.
pub trait IdentityProvider: Send + Sync {
    fn identify(&self, credential: &str) -> Option<Identity>;
}

pub type SharedIdentityProvider = Arc<dyn IdentityProvider>;

/// Resolves credentials against the profile store. The credential is the
/// stable user id minted at registration; the upstream auth service has
/// already vouched for it by the time a socket is opened.
pub struct ProfileIdentityProvider {
    profiles: Arc<ProfileStore>,
}

impl ProfileIdentityProvider {
    pub fn new(profiles: Arc<ProfileStore>) -> Self {
        Self { profiles }
    }
}

impl IdentityProvider for ProfileIdentityProvider {
    fn identify(&self, credential: &str) -> Option<Identity> {
        self.profiles.get(credential).map(|profile| Identity {
            user_id: profile.user_id,
            role: profile.role,
        })
    }
}

/// Test double with a fixed credential table.
pub struct StaticIdentityProvider {
    identities: HashMap<String, Identity>,
}

impl StaticIdentityProvider {
    pub fn new(identities: impl IntoIterator<Item = (String, Identity)>) -> Self {
        Self {
            identities: identities.into_iter().collect(),
        }
    }
}

impl IdentityProvider for StaticIdentityProvider {
    fn identify(&self, credential: &str) -> Option<Identity> {
        self.identities.get(credential).cloned()
    }
}
