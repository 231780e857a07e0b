//! Field-level form validation.
//!
//! Validation failures are synchronous and rendered next to the
//! offending field; they never travel through the transport error path
//! or end up as toasts.

use std::collections::BTreeMap;

/// Per-field error messages plus an optional form-wide message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors {
    pub message: Option<String>,
    pub fields: BTreeMap<String, String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.message.is_none() && self.fields.is_empty()
    }

    pub fn field(&mut self, name: &str, message: impl Into<String>) {
        self.fields.insert(name.to_string(), message.into());
    }

    /// Required-field check.
    pub fn require(&mut self, name: &str, value: &str) {
        if value.trim().is_empty() {
            self.field(name, "Required.");
        }
    }

    /// Cross-field equality check (e.g. password confirmation).
    pub fn confirm(&mut self, name: &str, value: &str, confirmation: &str) {
        if value != confirmation {
            self.field(name, "Values do not match.");
        }
    }

    /// `Ok(())` when clean, `Err(self)` otherwise.
    pub fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_form_passes() {
        let mut errors = FormErrors::default();
        errors.require("name", "cam-01");
        errors.confirm("confirmPassword", "a", "a");
        assert!(errors.into_result().is_ok());
    }

    #[test]
    fn missing_required_field_is_reported_by_name() {
        let mut errors = FormErrors::default();
        errors.require("name", "   ");
        let errors = errors.into_result().unwrap_err();
        assert_eq!(errors.fields.get("name").unwrap(), "Required.");
    }

    #[test]
    fn mismatched_confirmation_is_reported() {
        let mut errors = FormErrors::default();
        errors.confirm("confirmPassword", "a", "b");
        let errors = errors.into_result().unwrap_err();
        assert!(errors.fields.contains_key("confirmPassword"));
        assert!(errors.message.is_none());
    }
}
