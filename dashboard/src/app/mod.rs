//! # Composition Root
//!
//! [`Dashboard`] owns everything a page needs: the config, the credential store,
//! preferences, the API client and one [`RemoteCollection`] per listable resource.
//! There are no module-level singletons; tests build a `Dashboard` over a
//! [`MemoryStore`] and a fake API.

use std::sync::Arc;

use lib_utils::{validate_no_whitespace, validate_not_empty};
use shared::PageRequest;
use tracing::{info, warn};

use crate::config::Config;
use crate::core::error::{AppError, Result};
use crate::services::api::{
    partners, AgentResource, ApiClient, BookingResource, BusResource, GroupAgentResource,
    PartnerResource, RoleResource, SuperAgentResource, UserResource,
};
use crate::services::{CredentialStore, FileStore, KeyValueStore, MemoryStore, Preferences};
use crate::state::{CollectionSettings, RemoteCollection};

/// One collection per listable resource.
#[derive(Debug, Clone)]
pub struct Collections {
    pub partners: RemoteCollection<PartnerResource>,
    pub agents: RemoteCollection<AgentResource>,
    pub super_agents: RemoteCollection<SuperAgentResource>,
    pub group_agents: RemoteCollection<GroupAgentResource>,
    pub bookings: RemoteCollection<BookingResource>,
    pub buses: RemoteCollection<BusResource>,
    pub users: RemoteCollection<UserResource>,
    pub roles: RemoteCollection<RoleResource>,
}

impl Collections {
    fn new(client: &ApiClient, settings: CollectionSettings) -> Self {
        Self {
            partners: RemoteCollection::new(PartnerResource::new(client.clone()), settings),
            agents: RemoteCollection::new(AgentResource::new(client.clone()), settings),
            super_agents: RemoteCollection::new(SuperAgentResource::new(client.clone()), settings),
            group_agents: RemoteCollection::new(GroupAgentResource::new(client.clone()), settings),
            bookings: RemoteCollection::new(BookingResource::new(client.clone()), settings),
            buses: RemoteCollection::new(BusResource::new(client.clone()), settings),
            users: RemoteCollection::new(UserResource::new(client.clone()), settings),
            roles: RemoteCollection::new(RoleResource::new(client.clone()), settings),
        }
    }

    fn close_all(&self) {
        self.partners.close();
        self.agents.close();
        self.super_agents.close();
        self.group_agents.close();
        self.bookings.close();
        self.buses.close();
        self.users.close();
        self.roles.close();
    }
}

/// The dashboard's access layer, assembled.
#[derive(Debug)]
pub struct Dashboard {
    config: Config,
    credentials: Arc<CredentialStore>,
    preferences: Preferences,
    client: ApiClient,
    collections: Collections,
}

impl Dashboard {
    /// Assemble over `store`, which backs both credentials and preferences.
    pub fn new(config: Config, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let credentials = Arc::new(CredentialStore::new(Arc::clone(&store)));
        let preferences = Preferences::new(store);
        let client = ApiClient::new(&config, Arc::clone(&credentials))?;
        let collections = Collections::new(&client, CollectionSettings::from(&config));

        info!(
            api_base_url = %client.base_url(),
            has_credentials = credentials.has_api_credentials(),
            "Dashboard ready"
        );

        Ok(Self {
            config,
            credentials,
            preferences,
            client,
            collections,
        })
    }

    /// Assemble over the JSON file at `config.state_file`.
    pub fn with_file_store(config: Config) -> Result<Self> {
        let store = Arc::new(FileStore::new(config.state_file.clone()));
        Self::new(config, store)
    }

    /// Assemble with nothing persisted.
    pub fn in_memory(config: Config) -> Result<Self> {
        Self::new(config, Arc::new(MemoryStore::new()))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Client for direct service calls (`super_agents::assign_sub_agent(dashboard.client(), ..)`).
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn collections(&self) -> &Collections {
        &self.collections
    }

    /// Credential setup flow.
    ///
    /// Stores the pair, then probes the API with a one-item partner page. When the
    /// server rejects the pair (401/403) it is cleared again and the error returned.
    /// Any other failure leaves the pair stored: it could not be checked, not
    /// proven wrong.
    pub async fn setup_credentials(&self, api_key: &str, api_secret: &str) -> Result<()> {
        let api_key = api_key.trim();
        let api_secret = api_secret.trim();
        for (value, field) in [(api_key, "API key"), (api_secret, "API secret")] {
            validate_not_empty(value, field)
                .and_then(|()| validate_no_whitespace(value, field))
                .map_err(AppError::Validation)?;
        }

        self.credentials.set_api_credentials(api_key, api_secret);

        let probe = PageRequest::new(0, 1).map_err(AppError::Validation)?;
        match partners::list(&self.client, probe).await {
            Ok(_) => {
                info!(api_key = %shared::redact(api_key), "API credentials verified");
                Ok(())
            }
            Err(e) if e.needs_credentials() => {
                warn!(error = %e, "API rejected the credentials, clearing them");
                self.credentials.clear_api_credentials();
                Err(e)
            }
            Err(e) => {
                warn!(error = %e, "Could not verify API credentials");
                Err(e)
            }
        }
    }

    /// Forget the credentials and drop every collection's state. In-flight requests
    /// are cancelled; the next session starts from fresh collections.
    pub fn logout(&mut self) {
        self.credentials.clear_api_credentials();
        self.collections.close_all();
        self.collections = Collections::new(&self.client, CollectionSettings::from(&self.config));
        info!("Logged out");
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.collections.close_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn dashboard() -> Dashboard {
        let config = Config::new(Url::parse("http://127.0.0.1:9/api").unwrap());
        Dashboard::in_memory(config).unwrap()
    }

    #[tokio::test]
    async fn test_setup_rejects_blank_input() {
        let dashboard = dashboard();
        let err = dashboard.setup_credentials("  ", "secret").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(!dashboard.credentials().has_api_credentials());

        let err = dashboard.setup_credentials("pk live", "secret").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_logout_clears_and_renews_collections() {
        let mut dashboard = dashboard();
        dashboard.credentials().set_api_credentials("pk_live_1", "sk_live_1");
        let old = dashboard.collections().partners.clone();

        dashboard.logout();

        assert!(!dashboard.credentials().has_api_credentials());
        assert!(old.is_closed());
        assert!(!dashboard.collections().partners.is_closed());
    }
}
