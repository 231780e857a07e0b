//! Users admin page.

use std::sync::Arc;

use ipcman_client::Client;
use ipcman_rpc::types::{
    DisableItem, GetAdminUsersPageReq, SetUserAdminReq, SetUserDisableReq, Sort, User,
};
use ipcman_rpc::RpcError;
use ipcman_state::{
    toggle_sort_field, FetchSeq, PagePagination, PagePaginationResult, PagePager, RowRef,
    RowSelection, SortState,
};

use crate::query::QueryParams;

#[derive(Debug, Clone, Default)]
pub struct UsersPageState {
    pub users: Vec<User>,
    pub page_result: PagePaginationResult,
    pub selection: RowSelection<i64>,
    pub loading: bool,
    pub error: Option<String>,
}

impl UsersPageState {
    pub const PATH: &'static str = "pages/users";
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsersQuery {
    pub page: PagePagination,
    pub sort: SortState,
}

impl UsersQuery {
    pub fn from_params(params: &QueryParams) -> Self {
        Self {
            page: params.page(),
            sort: params.sort(),
        }
    }

    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::empty();
        params.set_page(self.page);
        params.set_sort(&self.sort);
        params
    }

    fn request(&self) -> GetAdminUsersPageReq {
        GetAdminUsersPageReq {
            page: self.page,
            sort: Sort::from(&self.sort),
        }
    }
}

pub struct UsersPage {
    client: Arc<Client>,
    seq: FetchSeq,
}

impl UsersPage {
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            client,
            seq: FetchSeq::new(),
        }
    }

    pub fn state(&self) -> UsersPageState {
        self.client
            .store
            .get_as::<UsersPageState>(UsersPageState::PATH)
            .unwrap_or_default()
    }

    pub async fn load(&self, query: &UsersQuery) {
        let ticket = self.seq.begin();
        let store = &self.client.store;

        let mut state = self.state();
        state.loading = true;
        state.error = None;
        store.set(UsersPageState::PATH, state);

        let result = self
            .client
            .admin
            .get_admin_users_page(&query.request())
            .await;
        if !self.seq.commit(ticket) {
            return;
        }

        let mut state = self.state();
        state.loading = false;
        match result {
            Ok(resp) => {
                state
                    .selection
                    .sync(resp.users.iter().map(|u| RowRef::enabled(u.id)));
                state.users = resp.users;
                state.page_result = resp.page_result;
                state.error = None;
            }
            Err(e) => state.error = Some(e.to_string()),
        }
        store.set(UsersPageState::PATH, state);
    }

    pub fn check(&self, id: i64, value: bool) {
        self.client
            .store
            .mutate::<UsersPageState, _>(UsersPageState::PATH, |s| s.selection.check(&id, value));
    }

    pub fn check_all(&self, value: bool) {
        self.client
            .store
            .mutate::<UsersPageState, _>(UsersPageState::PATH, |s| s.selection.check_all(value));
    }

    pub async fn toggle_sort(&self, query: &mut UsersQuery, field: &str) {
        query.sort = toggle_sort_field(&query.sort, field);
        self.load(query).await;
    }

    pub async fn previous_page(&self, query: &mut UsersQuery) {
        let result = self.state().page_result;
        let pager = PagePager::new(&result);
        if pager.previous_page_disabled() {
            return;
        }
        query.page.set_page(pager.previous_page());
        self.load(query).await;
    }

    pub async fn next_page(&self, query: &mut UsersQuery) {
        let result = self.state().page_result;
        let pager = PagePager::new(&result);
        if pager.next_page_disabled() {
            return;
        }
        query.page.set_page(pager.next_page());
        self.load(query).await;
    }

    pub async fn set_per_page(&self, query: &mut UsersQuery, per_page: i32) {
        if per_page == 0 {
            return;
        }
        query.page.set_per_page(per_page);
        self.load(query).await;
    }

    // ── admin actions ──

    pub async fn set_admin(&self, query: &UsersQuery, id: i64, admin: bool) -> Result<(), RpcError> {
        self.client
            .admin
            .set_user_admin(&SetUserAdminReq { id, admin })
            .await?;
        self.load(query).await;
        Ok(())
    }

    /// Enable or disable every checked user.
    pub async fn set_disable_selected(
        &self,
        query: &UsersQuery,
        disable: bool,
    ) -> Result<(), RpcError> {
        let items: Vec<DisableItem> = self
            .state()
            .selection
            .selections()
            .into_iter()
            .map(|id| DisableItem { id, disable })
            .collect();
        if items.is_empty() {
            return Ok(());
        }
        self.client
            .admin
            .set_user_disable(&SetUserDisableReq { items })
            .await?;
        self.load(query).await;
        Ok(())
    }
}
