//! State engine and view-state bookkeeping for the IPCManView client.
//!
//! Rust owns all dashboard state and logic; rendering layers (terminal,
//! native shell, web shell) only read it. Reactivity is explicit rather
//! than framework-magic:
//!
//! - `StateStore` — path-keyed values with pub/sub change notification
//! - `EventBus` — typed fan-out channel for live device events
//! - `sort` / `selection` / `pagination` — table view-state helpers
//! - `FetchSeq` — request fencing so stale responses never win
//!
//! # Path Addressing
//!
//! State lives in a flat `/`-separated namespace:
//! - Global: `session`, `theme`, `ws/state`
//! - Pages: `pages/devices`, `pages/events`
//!
//! Subscriptions match an exact path or a `prefix/*` pattern.
//!
//! # Example
//!
//! ```ignore
//! use ipcman_state::StateStore;
//!
//! let store = StateStore::new();
//! store.subscribe("pages/*", |path, _value| {
//!     println!("page state changed: {path}");
//! });
//! store.set("pages/devices", DevicesPageState::default());
//! ```

pub mod bus;
pub mod pagination;
pub mod selection;
pub mod seq;
pub mod sort;
pub mod store;
pub mod value;

pub use bus::EventBus;
pub use pagination::{PagePager, PagePagination, PagePaginationResult};
pub use selection::{RowRef, RowSelection};
pub use seq::{FetchSeq, FetchTicket};
pub use sort::{encode_order, parse_order, toggle_sort_field, Order, SortState};
pub use store::{ChangeHandler, StateStore};
pub use value::{StateValue, SubscriptionId};
