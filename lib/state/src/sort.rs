//! Tri-state column sorting and its URL query encoding.
//!
//! Clicking a column header cycles that column through
//! none → descending → ascending → none; clicking a different column
//! always starts at descending. The active sort round-trips through the
//! `sort` and `order` query parameters so list URLs stay shareable.

use serde::{Deserialize, Serialize};

/// Sort direction. The numeric encoding is fixed: the header-click cycle
/// advances `(order + 1) % 3`, so reordering variants would change UX.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Order {
    #[default]
    #[serde(rename = "ORDER_UNSPECIFIED")]
    Unspecified = 0,
    #[serde(rename = "DESC")]
    Desc = 1,
    #[serde(rename = "ASC")]
    Asc = 2,
}

impl Order {
    fn next(self) -> Order {
        match self {
            Order::Unspecified => Order::Desc,
            Order::Desc => Order::Asc,
            Order::Asc => Order::Unspecified,
        }
    }
}

/// Query-string token for an order: `"desc"`, `"asc"`, or empty.
pub fn encode_order(order: Order) -> &'static str {
    match order {
        Order::Desc => "desc",
        Order::Asc => "asc",
        Order::Unspecified => "",
    }
}

/// Parse a query-string token; anything unrecognized is `Unspecified`.
pub fn parse_order(token: Option<&str>) -> Order {
    match token {
        Some("desc") => Order::Desc,
        Some("asc") => Order::Asc,
        _ => Order::Unspecified,
    }
}

/// Active sort of a list page.
///
/// `field` is `None` exactly when `order` is `Unspecified`; a cleared
/// sort drops both query parameters from the URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    pub field: Option<String>,
    pub order: Order,
}

impl SortState {
    pub fn new(field: impl Into<String>, order: Order) -> Self {
        Self {
            field: Some(field.into()),
            order,
        }
    }

    /// Rebuild from the `sort` and `order` query parameters.
    pub fn from_query(sort: Option<&str>, order: Option<&str>) -> Self {
        let order = parse_order(order);
        let field = sort.filter(|s| !s.is_empty()).map(str::to_string);
        match (field, order) {
            (Some(field), order) if order != Order::Unspecified => Self {
                field: Some(field),
                order,
            },
            _ => Self::default(),
        }
    }

    /// The `(sort, order)` query parameter pair, `None` when cleared.
    pub fn to_query(&self) -> Option<(&str, &'static str)> {
        self.field
            .as_deref()
            .filter(|_| self.order != Order::Unspecified)
            .map(|f| (f, encode_order(self.order)))
    }

    /// Direction this state sorts `field` by, if it does.
    pub fn order_of(&self, field: &str) -> Option<Order> {
        (self.field.as_deref() == Some(field)).then_some(self.order)
    }
}

/// Next sort state after a click on `field`'s column header.
///
/// A different field starts a fresh descending sort; the same field
/// advances the cycle, and landing back on `Unspecified` clears the
/// field entirely.
pub fn toggle_sort_field(current: &SortState, field: &str) -> SortState {
    if current.field.as_deref() == Some(field) {
        let order = current.order.next();
        if order == Order::Unspecified {
            return SortState::default();
        }
        return SortState::new(field, order);
    }
    SortState::new(field, Order::Desc)
}
