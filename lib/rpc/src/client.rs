//! Service clients, one per capability area.
//!
//! Each method is a thin unary call through the shared
//! [`TwirpTransport`]; the method surface mirrors the service
//! definition one to one.

use std::sync::Arc;

use crate::error::RpcError;
use crate::transport::TwirpTransport;
use crate::types::*;

// ── HelloWorld ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct HelloWorldClient {
    transport: Arc<TwirpTransport>,
}

impl HelloWorldClient {
    const SERVICE: &'static str = "HelloWorld";

    pub fn new(transport: Arc<TwirpTransport>) -> Self {
        Self { transport }
    }

    pub async fn hello(&self, req: &HelloReq) -> Result<HelloResp, RpcError> {
        self.transport.call(Self::SERVICE, "Hello", req).await
    }
}

// ── Auth ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct AuthClient {
    transport: Arc<TwirpTransport>,
}

impl AuthClient {
    const SERVICE: &'static str = "Auth";

    pub fn new(transport: Arc<TwirpTransport>) -> Self {
        Self { transport }
    }

    pub async fn sign_up(&self, req: &SignUpReq) -> Result<SignUpResp, RpcError> {
        self.transport.call(Self::SERVICE, "SignUp", req).await
    }

    pub async fn forgot_password(
        &self,
        req: &ForgotPasswordReq,
    ) -> Result<ForgotPasswordResp, RpcError> {
        self.transport
            .call(Self::SERVICE, "ForgotPassword", req)
            .await
    }
}

// ── User ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct UserClient {
    transport: Arc<TwirpTransport>,
}

impl UserClient {
    const SERVICE: &'static str = "User";

    pub fn new(transport: Arc<TwirpTransport>) -> Self {
        Self { transport }
    }

    pub async fn get_home_page(&self) -> Result<GetHomePageResp, RpcError> {
        self.transport
            .call(Self::SERVICE, "GetHomePage", &Empty {})
            .await
    }

    pub async fn get_profile_page(&self) -> Result<GetProfilePageResp, RpcError> {
        self.transport
            .call(Self::SERVICE, "GetProfilePage", &Empty {})
            .await
    }

    pub async fn get_devices_page(&self) -> Result<GetDevicesPageResp, RpcError> {
        self.transport
            .call(Self::SERVICE, "GetDevicesPage", &Empty {})
            .await
    }

    pub async fn get_events_page(
        &self,
        req: &GetEventsPageReq,
    ) -> Result<GetEventsPageResp, RpcError> {
        self.transport
            .call(Self::SERVICE, "GetEventsPage", req)
            .await
    }

    pub async fn get_emails_page(
        &self,
        req: &GetEmailsPageReq,
    ) -> Result<GetEmailsPageResp, RpcError> {
        self.transport
            .call(Self::SERVICE, "GetEmailsPage", req)
            .await
    }

    pub async fn get_email_id_page(
        &self,
        req: &GetEmailIDPageReq,
    ) -> Result<GetEmailIDPageResp, RpcError> {
        self.transport
            .call(Self::SERVICE, "GetEmailIDPage", req)
            .await
    }

    pub async fn get_files_page(
        &self,
        req: &GetFilesPageReq,
    ) -> Result<GetFilesPageResp, RpcError> {
        self.transport.call(Self::SERVICE, "GetFilesPage", req).await
    }

    pub async fn update_my_username(&self, req: &UpdateMyUsernameReq) -> Result<Empty, RpcError> {
        self.transport
            .call(Self::SERVICE, "UpdateMyUsername", req)
            .await
    }

    pub async fn update_my_password(&self, req: &UpdateMyPasswordReq) -> Result<Empty, RpcError> {
        self.transport
            .call(Self::SERVICE, "UpdateMyPassword", req)
            .await
    }

    pub async fn revoke_my_session(&self, req: &RevokeMySessionReq) -> Result<Empty, RpcError> {
        self.transport
            .call(Self::SERVICE, "RevokeMySession", req)
            .await
    }

    pub async fn revoke_all_my_sessions(
        &self,
        req: &RevokeAllMySessionsReq,
    ) -> Result<Empty, RpcError> {
        self.transport
            .call(Self::SERVICE, "RevokeAllMySessions", req)
            .await
    }
}

// ── Admin ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct AdminClient {
    transport: Arc<TwirpTransport>,
}

impl AdminClient {
    const SERVICE: &'static str = "Admin";

    pub fn new(transport: Arc<TwirpTransport>) -> Self {
        Self { transport }
    }

    pub async fn get_admin_devices_page(
        &self,
        req: &GetAdminDevicesPageReq,
    ) -> Result<GetAdminDevicesPageResp, RpcError> {
        self.transport
            .call(Self::SERVICE, "GetAdminDevicesPage", req)
            .await
    }

    pub async fn get_admin_groups_page(
        &self,
        req: &GetAdminGroupsPageReq,
    ) -> Result<GetAdminGroupsPageResp, RpcError> {
        self.transport
            .call(Self::SERVICE, "GetAdminGroupsPage", req)
            .await
    }

    pub async fn get_admin_group_id_page(
        &self,
        req: &GetAdminGroupIDPageReq,
    ) -> Result<GetAdminGroupIDPageResp, RpcError> {
        self.transport
            .call(Self::SERVICE, "GetAdminGroupIDPage", req)
            .await
    }

    pub async fn get_admin_users_page(
        &self,
        req: &GetAdminUsersPageReq,
    ) -> Result<GetAdminUsersPageResp, RpcError> {
        self.transport
            .call(Self::SERVICE, "GetAdminUsersPage", req)
            .await
    }

    pub async fn create_device(&self, req: &CreateDeviceReq) -> Result<CreateDeviceResp, RpcError> {
        self.transport.call(Self::SERVICE, "CreateDevice", req).await
    }

    pub async fn get_device(&self, req: &GetDeviceReq) -> Result<GetDeviceResp, RpcError> {
        self.transport.call(Self::SERVICE, "GetDevice", req).await
    }

    pub async fn update_device(&self, req: &UpdateDeviceReq) -> Result<Empty, RpcError> {
        self.transport.call(Self::SERVICE, "UpdateDevice", req).await
    }

    pub async fn delete_device(&self, req: &DeleteDeviceReq) -> Result<Empty, RpcError> {
        self.transport.call(Self::SERVICE, "DeleteDevice", req).await
    }

    pub async fn create_group(&self, req: &CreateGroupReq) -> Result<CreateGroupResp, RpcError> {
        self.transport.call(Self::SERVICE, "CreateGroup", req).await
    }

    pub async fn get_group(&self, req: &GetGroupReq) -> Result<GetGroupResp, RpcError> {
        self.transport.call(Self::SERVICE, "GetGroup", req).await
    }

    pub async fn update_group(&self, req: &UpdateGroupReq) -> Result<Empty, RpcError> {
        self.transport.call(Self::SERVICE, "UpdateGroup", req).await
    }

    pub async fn delete_group(&self, req: &DeleteGroupReq) -> Result<Empty, RpcError> {
        self.transport.call(Self::SERVICE, "DeleteGroup", req).await
    }

    pub async fn set_group_disable(&self, req: &SetGroupDisableReq) -> Result<Empty, RpcError> {
        self.transport
            .call(Self::SERVICE, "SetGroupDisable", req)
            .await
    }

    pub async fn set_user_disable(&self, req: &SetUserDisableReq) -> Result<Empty, RpcError> {
        self.transport
            .call(Self::SERVICE, "SetUserDisable", req)
            .await
    }

    pub async fn set_user_admin(&self, req: &SetUserAdminReq) -> Result<Empty, RpcError> {
        self.transport.call(Self::SERVICE, "SetUserAdmin", req).await
    }

    pub async fn delete_events(&self, req: &DeleteEventsReq) -> Result<Empty, RpcError> {
        self.transport.call(Self::SERVICE, "DeleteEvents", req).await
    }

    pub async fn get_settings(&self) -> Result<GetSettingsResp, RpcError> {
        self.transport
            .call(Self::SERVICE, "GetSettings", &Empty {})
            .await
    }

    pub async fn update_settings(&self, req: &UpdateSettingsReq) -> Result<Empty, RpcError> {
        self.transport
            .call(Self::SERVICE, "UpdateSettings", req)
            .await
    }
}
