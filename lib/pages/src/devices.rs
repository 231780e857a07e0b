//! Devices page.
//!
//! The server returns the full device list in one response; the
//! device-id filter is applied client-side, so filtering never costs a
//! round-trip. Admin actions (create/update/delete) go through the
//! admin service and reload on success.

use std::sync::Arc;

use ipcman_client::Client;
use ipcman_rpc::types::{
    CreateDeviceReq, DeleteDeviceReq, Device, GetDeviceReq, UpdateDeviceReq,
};
use ipcman_rpc::RpcError;
use ipcman_state::{FetchSeq, RowRef, RowSelection};

use crate::form::FormErrors;
use crate::query::{dot_decode, dot_encode, QueryParams};

#[derive(Debug, Clone, Default)]
pub struct DevicesPageState {
    pub devices: Vec<Device>,
    pub selection: RowSelection<i64>,
    pub loading: bool,
    pub error: Option<String>,
}

impl DevicesPageState {
    pub const PATH: &'static str = "pages/devices";
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DevicesQuery {
    pub device_ids: Vec<i64>,
}

impl DevicesQuery {
    pub fn from_params(params: &QueryParams) -> Self {
        Self {
            device_ids: dot_decode(params.get("device")),
        }
    }

    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::empty();
        params.set("device", dot_encode(&self.device_ids));
        params
    }
}

/// Device create/update form. `new_password` may stay empty on update
/// to keep the stored credential.
#[derive(Debug, Clone, Default)]
pub struct DeviceForm {
    pub name: String,
    pub url: String,
    pub username: String,
    pub password: String,
}

impl DeviceForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        errors.require("name", &self.name);
        errors.require("url", &self.url);
        errors.into_result()
    }
}

pub struct DevicesPage {
    client: Arc<Client>,
    seq: FetchSeq,
}

impl DevicesPage {
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            client,
            seq: FetchSeq::new(),
        }
    }

    pub fn state(&self) -> DevicesPageState {
        self.client
            .store
            .get_as::<DevicesPageState>(DevicesPageState::PATH)
            .unwrap_or_default()
    }

    /// Enabled devices matching the query's id filter, in server order.
    pub fn visible(&self, query: &DevicesQuery) -> Vec<Device> {
        self.state()
            .devices
            .into_iter()
            .filter(|d| !d.disabled)
            .filter(|d| query.device_ids.is_empty() || query.device_ids.contains(&d.id))
            .collect()
    }

    pub async fn load(&self, query: &DevicesQuery) {
        let ticket = self.seq.begin();
        let store = &self.client.store;

        let mut state = self.state();
        state.loading = true;
        state.error = None;
        store.set(DevicesPageState::PATH, state);

        let result = self.client.user.get_devices_page().await;
        if !self.seq.commit(ticket) {
            return;
        }

        let mut state = self.state();
        state.loading = false;
        match result {
            Ok(resp) => {
                state.selection.sync(
                    resp.devices
                        .iter()
                        .filter(|d| query.device_ids.is_empty() || query.device_ids.contains(&d.id))
                        .map(|d| RowRef {
                            id: d.id,
                            disabled: d.disabled,
                        }),
                );
                state.devices = resp.devices;
                state.error = None;
            }
            Err(e) => state.error = Some(e.to_string()),
        }
        store.set(DevicesPageState::PATH, state);
    }

    pub fn check(&self, id: i64, value: bool) {
        self.client
            .store
            .mutate::<DevicesPageState, _>(DevicesPageState::PATH, |s| {
                s.selection.check(&id, value)
            });
    }

    pub fn check_all(&self, value: bool) {
        self.client
            .store
            .mutate::<DevicesPageState, _>(DevicesPageState::PATH, |s| {
                s.selection.check_all(value)
            });
    }

    // ── admin actions ──

    pub async fn create(&self, query: &DevicesQuery, form: &DeviceForm) -> Result<i64, RpcError> {
        let resp = self
            .client
            .admin
            .create_device(&CreateDeviceReq {
                name: form.name.clone(),
                url: form.url.clone(),
                username: form.username.clone(),
                password: form.password.clone(),
            })
            .await?;
        self.load(query).await;
        Ok(resp.id)
    }

    /// Initial values for the edit form.
    pub async fn edit_form(&self, id: i64) -> Result<DeviceForm, RpcError> {
        let resp = self.client.admin.get_device(&GetDeviceReq { id }).await?;
        Ok(DeviceForm {
            name: resp.device.name,
            url: resp.device.url,
            username: resp.device.username,
            password: String::new(),
        })
    }

    pub async fn update(
        &self,
        query: &DevicesQuery,
        id: i64,
        form: &DeviceForm,
    ) -> Result<(), RpcError> {
        self.client
            .admin
            .update_device(&UpdateDeviceReq {
                id,
                name: form.name.clone(),
                url: form.url.clone(),
                username: form.username.clone(),
                new_password: form.password.clone(),
            })
            .await?;
        self.load(query).await;
        Ok(())
    }

    pub async fn delete_selected(&self, query: &DevicesQuery) -> Result<(), RpcError> {
        let ids = self.state().selection.selections();
        if ids.is_empty() {
            return Ok(());
        }
        self.client
            .admin
            .delete_device(&DeleteDeviceReq { ids })
            .await?;
        self.load(query).await;
        Ok(())
    }
}
