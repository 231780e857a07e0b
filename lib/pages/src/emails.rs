//! Emails page — paged alarm-email list plus per-email detail.

use std::sync::Arc;

use ipcman_client::Client;
use ipcman_rpc::types::{Email, GetEmailIDPageReq, GetEmailIDPageResp, GetEmailsPageReq};
use ipcman_rpc::RpcError;
use ipcman_state::{FetchSeq, PagePagination, PagePaginationResult, PagePager};

use crate::query::{dot_decode, dot_encode, json_list_decode, json_list_encode, QueryParams};

#[derive(Debug, Clone, Default)]
pub struct EmailsPageState {
    pub emails: Vec<Email>,
    pub page_result: PagePaginationResult,
    pub loading: bool,
    pub error: Option<String>,
}

impl EmailsPageState {
    pub const PATH: &'static str = "pages/emails";
}

/// Detail state of a single email, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct EmailDetailState {
    pub email: Email,
    pub to: Vec<String>,
    pub text: String,
    pub attachments: Vec<String>,
}

impl EmailDetailState {
    pub fn path(id: i64) -> String {
        format!("pages/emails/{id}")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmailsQuery {
    pub page: PagePagination,
    pub device_ids: Vec<i64>,
    pub alarm_events: Vec<String>,
}

impl EmailsQuery {
    pub fn from_params(params: &QueryParams) -> Self {
        Self {
            page: params.page(),
            device_ids: dot_decode(params.get("device")),
            alarm_events: json_list_decode(params.get("alarmEvents")),
        }
    }

    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::empty();
        params.set_page(self.page);
        params.set("device", dot_encode(&self.device_ids));
        params.set("alarmEvents", json_list_encode(&self.alarm_events));
        params
    }

    fn request(&self) -> GetEmailsPageReq {
        GetEmailsPageReq {
            page: self.page,
            filter_device_ids: self.device_ids.clone(),
            filter_alarm_events: self.alarm_events.clone(),
        }
    }
}

pub struct EmailsPage {
    client: Arc<Client>,
    seq: FetchSeq,
}

impl EmailsPage {
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            client,
            seq: FetchSeq::new(),
        }
    }

    pub fn state(&self) -> EmailsPageState {
        self.client
            .store
            .get_as::<EmailsPageState>(EmailsPageState::PATH)
            .unwrap_or_default()
    }

    pub async fn load(&self, query: &EmailsQuery) {
        let ticket = self.seq.begin();
        let store = &self.client.store;

        let mut state = self.state();
        state.loading = true;
        state.error = None;
        store.set(EmailsPageState::PATH, state);

        let result = self.client.user.get_emails_page(&query.request()).await;
        if !self.seq.commit(ticket) {
            return;
        }

        let mut state = self.state();
        state.loading = false;
        match result {
            Ok(resp) => {
                state.emails = resp.emails;
                state.page_result = resp.page_result;
                state.error = None;
            }
            Err(e) => state.error = Some(e.to_string()),
        }
        store.set(EmailsPageState::PATH, state);
    }

    /// Load one email's detail state at `pages/emails/{id}`.
    pub async fn open(&self, id: i64) -> Result<(), RpcError> {
        let resp: GetEmailIDPageResp = self
            .client
            .user
            .get_email_id_page(&GetEmailIDPageReq { id })
            .await?;
        self.client.store.set(
            EmailDetailState::path(id).as_str(),
            EmailDetailState {
                email: resp.email,
                to: resp.to,
                text: resp.text,
                attachments: resp.attachments,
            },
        );
        Ok(())
    }

    pub async fn previous_page(&self, query: &mut EmailsQuery) {
        let result = self.state().page_result;
        let pager = PagePager::new(&result);
        if pager.previous_page_disabled() {
            return;
        }
        query.page.set_page(pager.previous_page());
        self.load(query).await;
    }

    pub async fn next_page(&self, query: &mut EmailsQuery) {
        let result = self.state().page_result;
        let pager = PagePager::new(&result);
        if pager.next_page_disabled() {
            return;
        }
        query.page.set_page(pager.next_page());
        self.load(query).await;
    }

    pub async fn set_per_page(&self, query: &mut EmailsQuery, per_page: i32) {
        if per_page == 0 {
            return;
        }
        query.page.set_per_page(per_page);
        self.load(query).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_round_trips() {
        let query = EmailsQuery {
            page: PagePagination::new(3, 10),
            device_ids: vec![2],
            alarm_events: vec!["VideoMotion".to_string()],
        };
        let params = query.to_params();
        assert_eq!(
            params.encode(),
            r#"?page=3&perPage=10&device=2&alarmEvents=["VideoMotion"]"#
        );
        assert_eq!(EmailsQuery::from_params(&params), query);
    }

    #[test]
    fn detail_path_is_keyed_by_id() {
        assert_eq!(EmailDetailState::path(42), "pages/emails/42");
    }
}
