//! Profile page — the signed-in user's account and active sessions.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use ipcman_client::Client;
use ipcman_rpc::types::{
    ProfileSession, RevokeAllMySessionsReq, RevokeMySessionReq, UpdateMyPasswordReq,
    UpdateMyUsernameReq,
};
use ipcman_rpc::RpcError;
use ipcman_state::FetchSeq;

use crate::form::FormErrors;

#[derive(Debug, Clone, Default)]
pub struct ProfilePageState {
    pub username: String,
    pub email: String,
    pub admin: bool,
    pub created_at_time: Option<DateTime<Utc>>,
    pub sessions: Vec<ProfileSession>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ProfilePageState {
    pub const PATH: &'static str = "pages/profile";
}

/// Change-password form with confirmation.
#[derive(Debug, Clone, Default)]
pub struct PasswordForm {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        errors.require("oldPassword", &self.old_password);
        errors.require("newPassword", &self.new_password);
        errors.confirm("confirmPassword", &self.new_password, &self.confirm_password);
        errors.into_result()
    }
}

pub struct ProfilePage {
    client: Arc<Client>,
    seq: FetchSeq,
}

impl ProfilePage {
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            client,
            seq: FetchSeq::new(),
        }
    }

    pub fn state(&self) -> ProfilePageState {
        self.client
            .store
            .get_as::<ProfilePageState>(ProfilePageState::PATH)
            .unwrap_or_default()
    }

    pub async fn load(&self) {
        let ticket = self.seq.begin();
        let store = &self.client.store;

        let mut state = self.state();
        state.loading = true;
        state.error = None;
        store.set(ProfilePageState::PATH, state);

        let result = self.client.user.get_profile_page().await;
        if !self.seq.commit(ticket) {
            return;
        }

        let mut state = self.state();
        state.loading = false;
        match result {
            Ok(resp) => {
                state.username = resp.username;
                state.email = resp.email;
                state.admin = resp.admin;
                state.created_at_time = resp.created_at_time;
                state.sessions = resp.sessions;
                state.error = None;
            }
            Err(e) => state.error = Some(e.to_string()),
        }
        store.set(ProfilePageState::PATH, state);
    }

    pub async fn update_username(&self, new_username: &str) -> Result<(), RpcError> {
        self.client
            .user
            .update_my_username(&UpdateMyUsernameReq {
                new_username: new_username.to_string(),
            })
            .await?;
        // The session carries the username; refresh both.
        let _ = self.client.session.fetch().await;
        self.load().await;
        Ok(())
    }

    /// Validate locally first; only a clean form goes to the server.
    pub async fn update_password(&self, form: &PasswordForm) -> Result<(), ProfileFormError> {
        form.validate().map_err(ProfileFormError::Form)?;
        self.client
            .user
            .update_my_password(&UpdateMyPasswordReq {
                old_password: form.old_password.clone(),
                new_password: form.new_password.clone(),
            })
            .await
            .map_err(ProfileFormError::Rpc)?;
        Ok(())
    }

    pub async fn revoke_session(&self, session_id: i64) -> Result<(), RpcError> {
        self.client
            .user
            .revoke_my_session(&RevokeMySessionReq { session_id })
            .await?;
        self.load().await;
        Ok(())
    }

    pub async fn revoke_all_sessions(&self) -> Result<(), RpcError> {
        self.client
            .user
            .revoke_all_my_sessions(&RevokeAllMySessionsReq {})
            .await?;
        self.load().await;
        Ok(())
    }
}

/// A password change fails either field-locally or at the server.
#[derive(Debug)]
pub enum ProfileFormError {
    Form(FormErrors),
    Rpc(RpcError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_form_requires_all_fields() {
        let errors = PasswordForm::default().validate().unwrap_err();
        assert!(errors.fields.contains_key("oldPassword"));
        assert!(errors.fields.contains_key("newPassword"));
    }

    #[test]
    fn password_form_rejects_mismatched_confirmation() {
        let form = PasswordForm {
            old_password: "old".to_string(),
            new_password: "new-secret".to_string(),
            confirm_password: "new-secert".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.fields.len(), 1);
        assert!(errors.fields.contains_key("confirmPassword"));
    }

    #[test]
    fn password_form_accepts_matching_confirmation() {
        let form = PasswordForm {
            old_password: "old".to_string(),
            new_password: "new-secret".to_string(),
            confirm_password: "new-secret".to_string(),
        };
        assert!(form.validate().is_ok());
    }
}
