//! Events page — paged device-event list with bulk delete.

use std::sync::Arc;

use ipcman_client::Client;
use ipcman_rpc::types::{DeleteEventsReq, Event, GetEventsPageReq, Sort};
use ipcman_rpc::RpcError;
use ipcman_state::{
    toggle_sort_field, FetchSeq, PagePagination, PagePaginationResult, PagePager, RowRef,
    RowSelection, SortState,
};

use crate::query::{dot_decode, dot_encode, json_list_decode, json_list_encode, QueryParams};

#[derive(Debug, Clone, Default)]
pub struct EventsPageState {
    pub events: Vec<Event>,
    pub page_result: PagePaginationResult,
    pub selection: RowSelection<i64>,
    pub loading: bool,
    pub error: Option<String>,
}

impl EventsPageState {
    pub const PATH: &'static str = "pages/events";
}

/// Everything that determines one fetch of the events list. Round-trips
/// through `page`, `perPage`, `sort`, `order`, `device`, `code` and
/// `action` query parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventsQuery {
    pub page: PagePagination,
    pub sort: SortState,
    pub device_ids: Vec<i64>,
    pub codes: Vec<String>,
    pub actions: Vec<String>,
}

impl EventsQuery {
    pub fn from_params(params: &QueryParams) -> Self {
        Self {
            page: params.page(),
            sort: params.sort(),
            device_ids: dot_decode(params.get("device")),
            codes: json_list_decode(params.get("code")),
            actions: json_list_decode(params.get("action")),
        }
    }

    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::empty();
        params.set_page(self.page);
        params.set_sort(&self.sort);
        params.set("device", dot_encode(&self.device_ids));
        params.set("code", json_list_encode(&self.codes));
        params.set("action", json_list_encode(&self.actions));
        params
    }

    fn request(&self) -> GetEventsPageReq {
        GetEventsPageReq {
            page: self.page,
            sort: Sort::from(&self.sort),
            filter_device_ids: self.device_ids.clone(),
            filter_codes: self.codes.clone(),
            filter_actions: self.actions.clone(),
        }
    }
}

pub struct EventsPage {
    client: Arc<Client>,
    seq: FetchSeq,
}

impl EventsPage {
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            client,
            seq: FetchSeq::new(),
        }
    }

    pub fn state(&self) -> EventsPageState {
        self.client
            .store
            .get_as::<EventsPageState>(EventsPageState::PATH)
            .unwrap_or_default()
    }

    /// Fetch and publish. A response that lost the race against a newer
    /// load is dropped.
    pub async fn load(&self, query: &EventsQuery) {
        let ticket = self.seq.begin();
        let store = &self.client.store;

        let mut state = self.state();
        state.loading = true;
        state.error = None;
        store.set(EventsPageState::PATH, state);

        let result = self.client.user.get_events_page(&query.request()).await;
        if !self.seq.commit(ticket) {
            return;
        }

        let mut state = self.state();
        state.loading = false;
        match result {
            Ok(resp) => {
                state
                    .selection
                    .sync(resp.events.iter().map(|e| RowRef::enabled(e.id)));
                state.events = resp.events;
                state.page_result = resp.page_result;
                state.error = None;
            }
            Err(e) => state.error = Some(e.to_string()),
        }
        store.set(EventsPageState::PATH, state);
    }

    // ── table interactions ──

    pub fn check(&self, id: i64, value: bool) {
        self.client
            .store
            .mutate::<EventsPageState, _>(EventsPageState::PATH, |s| s.selection.check(&id, value));
    }

    pub fn check_all(&self, value: bool) {
        self.client
            .store
            .mutate::<EventsPageState, _>(EventsPageState::PATH, |s| s.selection.check_all(value));
    }

    pub async fn toggle_sort(&self, query: &mut EventsQuery, field: &str) {
        query.sort = toggle_sort_field(&query.sort, field);
        self.load(query).await;
    }

    pub async fn previous_page(&self, query: &mut EventsQuery) {
        let result = self.state().page_result;
        let pager = PagePager::new(&result);
        if pager.previous_page_disabled() {
            return;
        }
        query.page.set_page(pager.previous_page());
        self.load(query).await;
    }

    pub async fn next_page(&self, query: &mut EventsQuery) {
        let result = self.state().page_result;
        let pager = PagePager::new(&result);
        if pager.next_page_disabled() {
            return;
        }
        query.page.set_page(pager.next_page());
        self.load(query).await;
    }

    pub async fn set_per_page(&self, query: &mut EventsQuery, per_page: i32) {
        if per_page == 0 {
            return;
        }
        query.page.set_per_page(per_page);
        self.load(query).await;
    }

    // ── actions ──

    /// Delete the checked events, then reload the current query.
    pub async fn delete_selected(&self, query: &EventsQuery) -> Result<(), RpcError> {
        let ids = self.state().selection.selections();
        if ids.is_empty() {
            return Ok(());
        }
        self.client
            .admin
            .delete_events(&DeleteEventsReq { ids })
            .await?;
        self.load(query).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipcman_state::Order;

    #[test]
    fn query_round_trips_through_params() {
        let query = EventsQuery {
            page: PagePagination::new(2, 25),
            sort: SortState::new("created_at", Order::Desc),
            device_ids: vec![1, 3],
            codes: vec!["VideoMotion".to_string()],
            actions: vec!["start".to_string()],
        };
        let params = query.to_params();
        assert_eq!(
            params.encode(),
            r#"?page=2&perPage=25&sort=created_at&order=desc&device=1.3&code=["VideoMotion"]&action=["start"]"#
        );
        assert_eq!(EventsQuery::from_params(&params), query);
    }

    #[test]
    fn empty_query_encodes_to_nothing() {
        let query = EventsQuery::default();
        assert_eq!(query.to_params().encode(), "");
        assert_eq!(
            EventsQuery::from_params(&QueryParams::empty()),
            EventsQuery::default()
        );
    }

    #[test]
    fn request_carries_filters_and_sort() {
        let query = EventsQuery {
            page: PagePagination::new(1, 10),
            sort: SortState::new("code", Order::Asc),
            device_ids: vec![7],
            codes: vec![],
            actions: vec![],
        };
        let req = query.request();
        assert_eq!(req.sort.field, "code");
        assert_eq!(req.sort.order, Order::Asc);
        assert_eq!(req.filter_device_ids, vec![7]);
    }
}
