//! Groups admin page.

use std::sync::Arc;

use ipcman_client::Client;
use ipcman_rpc::types::{
    CreateGroupReq, DeleteGroupReq, DisableItem, GetAdminGroupIDPageReq, GetAdminGroupsPageReq,
    GetGroupReq, Group, SetGroupDisableReq, Sort, UpdateGroupReq, User,
};
use ipcman_rpc::RpcError;
use ipcman_state::{
    toggle_sort_field, FetchSeq, PagePagination, PagePaginationResult, PagePager, RowRef,
    RowSelection, SortState,
};

use crate::form::FormErrors;
use crate::query::QueryParams;

#[derive(Debug, Clone, Default)]
pub struct GroupsPageState {
    pub groups: Vec<Group>,
    pub page_result: PagePaginationResult,
    pub selection: RowSelection<i64>,
    pub loading: bool,
    pub error: Option<String>,
}

impl GroupsPageState {
    pub const PATH: &'static str = "pages/groups";
}

/// Detail state of a single group and its members.
#[derive(Debug, Clone, Default)]
pub struct GroupDetailState {
    pub group: Group,
    pub users: Vec<User>,
}

impl GroupDetailState {
    pub fn path(id: i64) -> String {
        format!("pages/groups/{id}")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupsQuery {
    pub page: PagePagination,
    pub sort: SortState,
}

impl GroupsQuery {
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

    fn request(&self) -> GetAdminGroupsPageReq {
        GetAdminGroupsPageReq {
            page: self.page,
            sort: Sort::from(&self.sort),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GroupForm {
    pub name: String,
    pub description: String,
}

impl GroupForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        errors.require("name", &self.name);
        errors.into_result()
    }
}

pub struct GroupsPage {
    client: Arc<Client>,
    seq: FetchSeq,
}

impl GroupsPage {
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            client,
            seq: FetchSeq::new(),
        }
    }

    pub fn state(&self) -> GroupsPageState {
        self.client
            .store
            .get_as::<GroupsPageState>(GroupsPageState::PATH)
            .unwrap_or_default()
    }

    pub async fn load(&self, query: &GroupsQuery) {
        let ticket = self.seq.begin();
        let store = &self.client.store;

        let mut state = self.state();
        state.loading = true;
        state.error = None;
        store.set(GroupsPageState::PATH, state);

        let result = self
            .client
            .admin
            .get_admin_groups_page(&query.request())
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
                    .sync(resp.groups.iter().map(|g| RowRef::enabled(g.id)));
                state.groups = resp.groups;
                state.page_result = resp.page_result;
                state.error = None;
            }
            Err(e) => state.error = Some(e.to_string()),
        }
        store.set(GroupsPageState::PATH, state);
    }

    /// Load one group's detail state at `pages/groups/{id}`.
    pub async fn open(&self, id: i64) -> Result<(), RpcError> {
        let resp = self
            .client
            .admin
            .get_admin_group_id_page(&GetAdminGroupIDPageReq { id })
            .await?;
        self.client.store.set(
            GroupDetailState::path(id).as_str(),
            GroupDetailState {
                group: resp.group,
                users: resp.users,
            },
        );
        Ok(())
    }

    pub fn check(&self, id: i64, value: bool) {
        self.client
            .store
            .mutate::<GroupsPageState, _>(GroupsPageState::PATH, |s| s.selection.check(&id, value));
    }

    pub fn check_all(&self, value: bool) {
        self.client
            .store
            .mutate::<GroupsPageState, _>(GroupsPageState::PATH, |s| s.selection.check_all(value));
    }

    pub async fn toggle_sort(&self, query: &mut GroupsQuery, field: &str) {
        query.sort = toggle_sort_field(&query.sort, field);
        self.load(query).await;
    }

    pub async fn previous_page(&self, query: &mut GroupsQuery) {
        let result = self.state().page_result;
        let pager = PagePager::new(&result);
        if pager.previous_page_disabled() {
            return;
        }
        query.page.set_page(pager.previous_page());
        self.load(query).await;
    }

    pub async fn next_page(&self, query: &mut GroupsQuery) {
        let result = self.state().page_result;
        let pager = PagePager::new(&result);
        if pager.next_page_disabled() {
            return;
        }
        query.page.set_page(pager.next_page());
        self.load(query).await;
    }

    pub async fn set_per_page(&self, query: &mut GroupsQuery, per_page: i32) {
        if per_page == 0 {
            return;
        }
        query.page.set_per_page(per_page);
        self.load(query).await;
    }

    // ── admin actions ──

    pub async fn create(&self, query: &GroupsQuery, form: &GroupForm) -> Result<i64, RpcError> {
        let resp = self
            .client
            .admin
            .create_group(&CreateGroupReq {
                name: form.name.clone(),
                description: form.description.clone(),
            })
            .await?;
        self.load(query).await;
        Ok(resp.id)
    }

    pub async fn edit_form(&self, id: i64) -> Result<GroupForm, RpcError> {
        let resp = self.client.admin.get_group(&GetGroupReq { id }).await?;
        Ok(GroupForm {
            name: resp.group.name,
            description: resp.group.description,
        })
    }

    pub async fn update(
        &self,
        query: &GroupsQuery,
        id: i64,
        form: &GroupForm,
    ) -> Result<(), RpcError> {
        self.client
            .admin
            .update_group(&UpdateGroupReq {
                id,
                name: form.name.clone(),
                description: form.description.clone(),
            })
            .await?;
        self.load(query).await;
        Ok(())
    }

    pub async fn delete_selected(&self, query: &GroupsQuery) -> Result<(), RpcError> {
        let ids = self.state().selection.selections();
        if ids.is_empty() {
            return Ok(());
        }
        self.client
            .admin
            .delete_group(&DeleteGroupReq { ids })
            .await?;
        self.load(query).await;
        Ok(())
    }

    /// Enable or disable every checked group.
    pub async fn set_disable_selected(
        &self,
        query: &GroupsQuery,
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
            .set_group_disable(&SetGroupDisableReq { items })
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
    fn query_round_trips() {
        let query = GroupsQuery {
            page: PagePagination::new(2, 10),
            sort: SortState::new("name", Order::Desc),
        };
        let params = query.to_params();
        assert_eq!(params.encode(), "?page=2&perPage=10&sort=name&order=desc");
        assert_eq!(GroupsQuery::from_params(&params), query);
    }

    #[test]
    fn form_requires_name_only() {
        assert!(GroupForm::default().validate().is_err());
        assert!(GroupForm {
            name: "operators".to_string(),
            description: String::new(),
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn detail_path_is_keyed_by_id() {
        assert_eq!(GroupDetailState::path(9), "pages/groups/9");
    }
}
