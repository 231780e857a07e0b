//! Checkbox-table row selection bookkeeping.

/// Identity and enablement of one visible row, as fed into
/// [`RowSelection::sync`] whenever a new page of rows arrives.
#[derive(Debug, Clone)]
pub struct RowRef<T> {
    pub id: T,
    pub disabled: bool,
}

impl<T> RowRef<T> {
    pub fn enabled(id: T) -> Self {
        Self {
            id,
            disabled: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct RowItem<T> {
    id: T,
    checked: bool,
    disabled: bool,
}

/// Per-row checked flags for the currently visible rows.
///
/// The tracked set is always exactly the identifiers last passed to
/// [`sync`](Self::sync): flags persist across a resync for ids that stay
/// visible and are dropped for ids that leave. Disabled rows keep their
/// place in the list but are ignored by `check`/`check_all` and by the
/// select-all checkbox queries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSelection<T: PartialEq + Clone> {
    items: Vec<RowItem<T>>,
}

impl<T: PartialEq + Clone> RowSelection<T> {
    pub fn new(rows: impl IntoIterator<Item = RowRef<T>>) -> Self {
        let mut selection = Self { items: Vec::new() };
        selection.sync(rows);
        selection
    }

    /// Rebuild the tracked set to exactly `rows`, preserving checked
    /// flags for identifiers that persist across the change.
    pub fn sync(&mut self, rows: impl IntoIterator<Item = RowRef<T>>) {
        let previous = std::mem::take(&mut self.items);
        self.items = rows
            .into_iter()
            .map(|row| RowItem {
                checked: previous
                    .iter()
                    .find(|p| p.id == row.id)
                    .is_some_and(|p| p.checked),
                id: row.id,
                disabled: row.disabled,
            })
            .collect();
    }

    /// Set one row's checked flag. Unknown and disabled ids are a no-op.
    pub fn check(&mut self, id: &T, value: bool) {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| &item.id == id && !item.disabled)
        {
            item.checked = value;
        }
    }

    /// Set every enabled row's checked flag.
    pub fn check_all(&mut self, value: bool) {
        for item in self.items.iter_mut().filter(|item| !item.disabled) {
            item.checked = value;
        }
    }

    /// Checked identifiers, in display order.
    pub fn selections(&self) -> Vec<T> {
        self.items
            .iter()
            .filter(|item| item.checked)
            .map(|item| item.id.clone())
            .collect()
    }

    /// Whether one row is currently checked.
    pub fn checked(&self, id: &T) -> bool {
        self.items
            .iter()
            .any(|item| &item.id == id && item.checked)
    }

    /// True iff every enabled row is checked and at least one exists.
    /// Drives the select-all checkbox's checked state.
    pub fn multiple(&self) -> bool {
        let mut enabled = 0usize;
        for item in &self.items {
            if item.disabled {
                continue;
            }
            if !item.checked {
                return false;
            }
            enabled += 1;
        }
        enabled > 0
    }

    /// True iff some but not all enabled rows are checked. Drives the
    /// select-all checkbox's indeterminate state.
    pub fn indeterminate(&self) -> bool {
        let enabled = self.items.iter().filter(|i| !i.disabled).count();
        let checked = self
            .items
            .iter()
            .filter(|i| !i.disabled && i.checked)
            .count();
        checked > 0 && checked < enabled
    }

    /// True iff at least one row is checked. Drives bulk-action buttons.
    pub fn any(&self) -> bool {
        self.items.iter().any(|item| item.checked)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(ids: &[i64]) -> Vec<RowRef<i64>> {
        ids.iter().copied().map(RowRef::enabled).collect()
    }

    // ========================================================================
    // Resync
    // ========================================================================

    #[test]
    fn resync_preserves_surviving_flags_and_drops_the_rest() {
        let mut sel = RowSelection::new(rows(&[1, 2, 3]));
        sel.check(&2, true);

        sel.sync(rows(&[2, 3, 4]));
        assert_eq!(sel.selections(), vec![2]);
        assert_eq!(sel.len(), 3);
        assert!(!sel.checked(&1));

        // 1 comes back without its old flag.
        sel.sync(rows(&[1, 2]));
        assert!(!sel.checked(&1));
        assert!(sel.checked(&2));
    }

    #[test]
    fn resync_to_empty_clears_everything() {
        let mut sel = RowSelection::new(rows(&[1, 2]));
        sel.check_all(true);
        sel.sync(rows(&[]));
        assert!(sel.is_empty());
        assert!(sel.selections().is_empty());
        assert!(!sel.multiple());
    }

    // ========================================================================
    // Check / check_all
    // ========================================================================

    #[test]
    fn check_unknown_id_is_noop() {
        let mut sel = RowSelection::new(rows(&[1, 2]));
        sel.check(&99, true);
        assert!(sel.selections().is_empty());
    }

    #[test]
    fn check_disabled_row_is_noop() {
        let mut sel = RowSelection::new(vec![
            RowRef::enabled(1),
            RowRef {
                id: 2,
                disabled: true,
            },
        ]);
        sel.check(&2, true);
        assert!(!sel.checked(&2));

        sel.check_all(true);
        assert_eq!(sel.selections(), vec![1]);
    }

    #[test]
    fn check_all_then_uncheck_one() {
        let mut sel = RowSelection::new(rows(&[1, 2, 3]));
        sel.check_all(true);
        assert_eq!(sel.selections(), vec![1, 2, 3]);

        sel.check(&2, false);
        assert_eq!(sel.selections(), vec![1, 3]);
    }

    // ========================================================================
    // Select-all checkbox queries
    // ========================================================================

    #[test]
    fn check_all_true_implies_multiple_not_indeterminate() {
        let mut sel = RowSelection::new(rows(&[1, 2, 3]));
        sel.check_all(true);
        assert!(sel.multiple());
        assert!(!sel.indeterminate());
    }

    #[test]
    fn one_of_many_checked_is_indeterminate_not_multiple() {
        let mut sel = RowSelection::new(rows(&[1, 2]));
        sel.check(&1, true);
        assert!(sel.indeterminate());
        assert!(!sel.multiple());
        assert!(sel.any());
    }

    #[test]
    fn nothing_checked_is_neither() {
        let sel = RowSelection::new(rows(&[1, 2]));
        assert!(!sel.multiple());
        assert!(!sel.indeterminate());
        assert!(!sel.any());
    }

    #[test]
    fn empty_row_set_never_reports_multiple() {
        let mut sel = RowSelection::<i64>::default();
        sel.check_all(true);
        assert!(!sel.multiple());
        assert!(!sel.indeterminate());
    }

    #[test]
    fn all_rows_disabled_never_reports_multiple() {
        let mut sel = RowSelection::new(vec![
            RowRef {
                id: 1,
                disabled: true,
            },
            RowRef {
                id: 2,
                disabled: true,
            },
        ]);
        sel.check_all(true);
        assert!(!sel.multiple());
        assert!(!sel.indeterminate());
    }

    #[test]
    fn disabled_rows_do_not_block_multiple() {
        let mut sel = RowSelection::new(vec![
            RowRef::enabled(1),
            RowRef {
                id: 2,
                disabled: true,
            },
            RowRef::enabled(3),
        ]);
        sel.check_all(true);
        assert!(sel.multiple());
        assert_eq!(sel.selections(), vec![1, 3]);
    }

    #[test]
    fn string_ids_work() {
        let mut sel = RowSelection::new(vec![
            RowRef::enabled("rule-a".to_string()),
            RowRef::enabled("rule-b".to_string()),
        ]);
        sel.check(&"rule-b".to_string(), true);
        assert_eq!(sel.selections(), vec!["rule-b".to_string()]);
    }
}
