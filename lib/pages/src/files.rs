//! Files page — paged recording/snapshot list.
//!
//! Files sort by start time only, so the query carries a bare order
//! token instead of a sort field.

use std::sync::Arc;

use ipcman_client::Client;
use ipcman_rpc::types::{File, GetFilesPageReq};
use ipcman_state::{
    encode_order, parse_order, FetchSeq, Order, PagePagination, PagePaginationResult, PagePager,
};

use crate::query::{dot_decode, dot_encode, QueryParams};

#[derive(Debug, Clone, Default)]
pub struct FilesPageState {
    pub files: Vec<File>,
    pub page_result: PagePaginationResult,
    pub loading: bool,
    pub error: Option<String>,
}

impl FilesPageState {
    pub const PATH: &'static str = "pages/files";
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilesQuery {
    pub page: PagePagination,
    pub device_ids: Vec<i64>,
    /// `YYYY-MM` month filter, empty for all months.
    pub month_id: String,
    pub order: Order,
}

impl FilesQuery {
    pub fn from_params(params: &QueryParams) -> Self {
        Self {
            page: params.page(),
            device_ids: dot_decode(params.get("device")),
            month_id: params.get("month").unwrap_or_default().to_string(),
            order: parse_order(params.get("order")),
        }
    }

    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::empty();
        params.set_page(self.page);
        params.set("device", dot_encode(&self.device_ids));
        params.set("month", self.month_id.clone());
        params.set("order", encode_order(self.order));
        params
    }

    fn request(&self) -> GetFilesPageReq {
        GetFilesPageReq {
            page: self.page,
            filter_device_ids: self.device_ids.clone(),
            filter_month_id: self.month_id.clone(),
            order: self.order,
        }
    }
}

pub struct FilesPage {
    client: Arc<Client>,
    seq: FetchSeq,
}

impl FilesPage {
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            client,
            seq: FetchSeq::new(),
        }
    }

    pub fn state(&self) -> FilesPageState {
        self.client
            .store
            .get_as::<FilesPageState>(FilesPageState::PATH)
            .unwrap_or_default()
    }

    pub async fn load(&self, query: &FilesQuery) {
        let ticket = self.seq.begin();
        let store = &self.client.store;

        let mut state = self.state();
        state.loading = true;
        state.error = None;
        store.set(FilesPageState::PATH, state);

        let result = self.client.user.get_files_page(&query.request()).await;
        if !self.seq.commit(ticket) {
            return;
        }

        let mut state = self.state();
        state.loading = false;
        match result {
            Ok(resp) => {
                state.files = resp.files;
                state.page_result = resp.page_result;
                state.error = None;
            }
            Err(e) => state.error = Some(e.to_string()),
        }
        store.set(FilesPageState::PATH, state);
    }

    pub async fn previous_page(&self, query: &mut FilesQuery) {
        let result = self.state().page_result;
        let pager = PagePager::new(&result);
        if pager.previous_page_disabled() {
            return;
        }
        query.page.set_page(pager.previous_page());
        self.load(query).await;
    }

    pub async fn next_page(&self, query: &mut FilesQuery) {
        let result = self.state().page_result;
        let pager = PagePager::new(&result);
        if pager.next_page_disabled() {
            return;
        }
        query.page.set_page(pager.next_page());
        self.load(query).await;
    }

    pub async fn set_per_page(&self, query: &mut FilesQuery, per_page: i32) {
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
        let query = FilesQuery {
            page: PagePagination::new(1, 50),
            device_ids: vec![5, 6],
            month_id: "2024-03".to_string(),
            order: Order::Desc,
        };
        let params = query.to_params();
        assert_eq!(
            params.encode(),
            "?page=1&perPage=50&device=5.6&month=2024-03&order=desc"
        );
        assert_eq!(FilesQuery::from_params(&params), query);
    }

    #[test]
    fn unspecified_order_drops_out_of_the_url() {
        let query = FilesQuery::default();
        assert_eq!(query.to_params().encode(), "");
    }
}
