//! Request/response messages and data-transfer types.
//!
//! Field names follow the proto3 JSON mapping (lowerCamelCase); enums
//! travel as their proto name strings. Everything derives `Default` so
//! responses with omitted fields decode cleanly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use ipcman_state::pagination::{PagePagination, PagePaginationResult};
pub use ipcman_state::sort::Order;

/// Proto empty message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Empty {}

/// Wire form of an active sort. An empty `field` with
/// `ORDER_UNSPECIFIED` means "server default".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sort {
    pub field: String,
    pub order: Order,
}

impl From<&ipcman_state::SortState> for Sort {
    fn from(state: &ipcman_state::SortState) -> Self {
        Self {
            field: state.field.clone().unwrap_or_default(),
            order: state.order,
        }
    }
}

// ── DTOs ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Device {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub username: String,
    pub disabled: bool,
    pub created_at_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub disabled: bool,
    pub user_count: i64,
    pub created_at_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub admin: bool,
    pub disabled: bool,
    pub created_at_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Event {
    pub id: i64,
    pub device_id: i64,
    pub code: String,
    pub action: String,
    pub index: i64,
    pub created_at_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Email {
    pub id: i64,
    pub device_id: i64,
    pub from: String,
    pub subject: String,
    pub alarm_event: String,
    pub attachment_count: i32,
    pub created_at_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct File {
    pub id: i64,
    pub device_id: i64,
    pub file_path: String,
    pub kind: String,
    pub size: i64,
    pub start_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub site_name: String,
    pub sign_up_enabled: bool,
}

// ── HelloWorld ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HelloReq {
    pub subject: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HelloResp {
    pub text: String,
}

// ── Auth ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignUpReq {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignUpResp {
    pub user_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForgotPasswordReq {
    pub email: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForgotPasswordResp {}

// ── User: pages ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetHomePageResp {
    pub device_count: i64,
    pub event_count: i64,
    pub email_count: i64,
    pub file_count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileSession {
    pub id: i64,
    pub user_agent: String,
    pub ip: String,
    pub active: bool,
    pub current: bool,
    pub last_used_at_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetProfilePageResp {
    pub username: String,
    pub email: String,
    pub admin: bool,
    pub created_at_time: Option<DateTime<Utc>>,
    pub sessions: Vec<ProfileSession>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetDevicesPageResp {
    pub devices: Vec<Device>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetEventsPageReq {
    pub page: PagePagination,
    pub sort: Sort,
    #[serde(rename = "filterDeviceIDs")]
    pub filter_device_ids: Vec<i64>,
    pub filter_codes: Vec<String>,
    pub filter_actions: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetEventsPageResp {
    pub events: Vec<Event>,
    pub page_result: PagePaginationResult,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetEmailsPageReq {
    pub page: PagePagination,
    #[serde(rename = "filterDeviceIDs")]
    pub filter_device_ids: Vec<i64>,
    pub filter_alarm_events: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetEmailsPageResp {
    pub emails: Vec<Email>,
    pub page_result: PagePaginationResult,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetEmailIDPageReq {
    pub id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetEmailIDPageResp {
    pub email: Email,
    pub to: Vec<String>,
    pub text: String,
    pub attachments: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetFilesPageReq {
    pub page: PagePagination,
    #[serde(rename = "filterDeviceIDs")]
    pub filter_device_ids: Vec<i64>,
    #[serde(rename = "filterMonthID")]
    pub filter_month_id: String,
    pub order: Order,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetFilesPageResp {
    pub files: Vec<File>,
    pub page_result: PagePaginationResult,
}

// ── User: profile actions ───────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateMyUsernameReq {
    pub new_username: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateMyPasswordReq {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RevokeMySessionReq {
    pub session_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RevokeAllMySessionsReq {}

// ── Admin: pages ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetAdminDevicesPageReq {
    pub page: PagePagination,
    pub sort: Sort,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetAdminDevicesPageResp {
    pub devices: Vec<Device>,
    pub page_result: PagePaginationResult,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetAdminGroupsPageReq {
    pub page: PagePagination,
    pub sort: Sort,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetAdminGroupsPageResp {
    pub groups: Vec<Group>,
    pub page_result: PagePaginationResult,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetAdminGroupIDPageReq {
    pub id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetAdminGroupIDPageResp {
    pub group: Group,
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetAdminUsersPageReq {
    pub page: PagePagination,
    pub sort: Sort,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetAdminUsersPageResp {
    pub users: Vec<User>,
    pub page_result: PagePaginationResult,
}

// ── Admin: devices ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateDeviceReq {
    pub name: String,
    pub url: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateDeviceResp {
    pub id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetDeviceReq {
    pub id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetDeviceResp {
    pub device: Device,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateDeviceReq {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub username: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteDeviceReq {
    pub ids: Vec<i64>,
}

// ── Admin: groups ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateGroupReq {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateGroupResp {
    pub id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetGroupReq {
    pub id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetGroupResp {
    pub group: Group,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateGroupReq {
    pub id: i64,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteGroupReq {
    pub ids: Vec<i64>,
}

/// One id/disable pair for batch enable/disable actions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisableItem {
    pub id: i64,
    pub disable: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SetGroupDisableReq {
    pub items: Vec<DisableItem>,
}

// ── Admin: users ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SetUserDisableReq {
    pub items: Vec<DisableItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SetUserAdminReq {
    pub id: i64,
    pub admin: bool,
}

// ── Admin: events / settings ────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteEventsReq {
    pub ids: Vec<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetSettingsResp {
    pub settings: Settings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateSettingsReq {
    pub site_name: String,
    pub sign_up_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_serialize_with_wire_names() {
        let req = GetEventsPageReq {
            page: PagePagination::new(2, 25),
            sort: Sort {
                field: "created_at".to_string(),
                order: Order::Desc,
            },
            filter_device_ids: vec![1, 2],
            filter_codes: vec!["VideoMotion".to_string()],
            filter_actions: vec![],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["page"]["perPage"], 25);
        assert_eq!(json["sort"]["order"], "DESC");
        assert_eq!(json["filterDeviceIDs"][1], 2);
        assert_eq!(json["filterCodes"][0], "VideoMotion");
    }

    #[test]
    fn responses_decode_with_missing_fields() {
        let resp: GetEmailsPageResp = serde_json::from_str(
            r#"{"emails":[{"id":3,"subject":"Alarm"}],"pageResult":{"page":1,"nextPage":1}}"#,
        )
        .unwrap();
        assert_eq!(resp.emails[0].id, 3);
        assert_eq!(resp.emails[0].subject, "Alarm");
        assert_eq!(resp.page_result.next_page, 1);
        assert!(resp.emails[0].created_at_time.is_none());
    }

    #[test]
    fn sort_from_state_maps_cleared_to_empty_field() {
        let cleared = ipcman_state::SortState::default();
        let wire = Sort::from(&cleared);
        assert_eq!(wire.field, "");
        assert_eq!(wire.order, Order::Unspecified);

        let active = ipcman_state::SortState::new("name", Order::Asc);
        let wire = Sort::from(&active);
        assert_eq!(wire.field, "name");
        assert_eq!(wire.order, Order::Asc);
    }
}
