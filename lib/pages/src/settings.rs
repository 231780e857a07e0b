//! Settings admin page.
//!
//! The fetched settings are also snapshotted under the local `config`
//! key, so the next start can render site chrome before the first
//! round-trip.

use std::sync::Arc;

use ipcman_client::storage::KEY_CONFIG;
use ipcman_client::Client;
use ipcman_rpc::types::{Settings, UpdateSettingsReq};
use ipcman_rpc::RpcError;
use ipcman_state::FetchSeq;

use crate::form::FormErrors;

#[derive(Debug, Clone, Default)]
pub struct SettingsPageState {
    pub settings: Settings,
    pub loading: bool,
    pub error: Option<String>,
}

impl SettingsPageState {
    pub const PATH: &'static str = "pages/settings";
}

#[derive(Debug, Clone, Default)]
pub struct SettingsForm {
    pub site_name: String,
    pub sign_up_enabled: bool,
}

impl SettingsForm {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            site_name: settings.site_name.clone(),
            sign_up_enabled: settings.sign_up_enabled,
        }
    }

    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        errors.require("siteName", &self.site_name);
        errors.into_result()
    }
}

pub struct SettingsPage {
    client: Arc<Client>,
    seq: FetchSeq,
}

impl SettingsPage {
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            client,
            seq: FetchSeq::new(),
        }
    }

    pub fn state(&self) -> SettingsPageState {
        self.client
            .store
            .get_as::<SettingsPageState>(SettingsPageState::PATH)
            .unwrap_or_default()
    }

    pub async fn load(&self) {
        let ticket = self.seq.begin();
        let store = &self.client.store;

        let mut state = self.state();
        state.loading = true;
        state.error = None;
        store.set(SettingsPageState::PATH, state);

        let result = self.client.admin.get_settings().await;
        if !self.seq.commit(ticket) {
            return;
        }

        let mut state = self.state();
        state.loading = false;
        match result {
            Ok(resp) => {
                let _ = self.client.storage.set(KEY_CONFIG, &resp.settings);
                state.settings = resp.settings;
                state.error = None;
            }
            Err(e) => state.error = Some(e.to_string()),
        }
        store.set(SettingsPageState::PATH, state);
    }

    /// Persisted settings snapshot from the last successful load.
    pub fn cached(&self) -> Option<Settings> {
        self.client.storage.get::<Settings>(KEY_CONFIG)
    }

    pub async fn update(&self, form: &SettingsForm) -> Result<(), RpcError> {
        self.client
            .admin
            .update_settings(&UpdateSettingsReq {
                site_name: form.site_name.clone(),
                sign_up_enabled: form.sign_up_enabled,
            })
            .await?;
        self.load().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_requires_site_name() {
        let errors = SettingsForm::default().validate().unwrap_err();
        assert!(errors.fields.contains_key("siteName"));

        let form = SettingsForm {
            site_name: "IPCManView".to_string(),
            sign_up_enabled: true,
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn form_prefills_from_settings() {
        let settings = Settings {
            site_name: "Cameras".to_string(),
            sign_up_enabled: false,
        };
        let form = SettingsForm::from_settings(&settings);
        assert_eq!(form.site_name, "Cameras");
        assert!(!form.sign_up_enabled);
    }
}
