//! CRUD page view-models.
//!
//! Each page owns a query type (round-tripping through URL-style query
//! parameters, so every list view is a shareable URL), a state type
//! published to the shared `StateStore` under `pages/...`, an async
//! loader fenced against stale responses, and its actions. Rendering
//! layers subscribe to `pages/*` and draw whatever is there.
//!
//! Failure policy: a failed load or action writes the server's message
//! into the page state (or returns it to the caller for form-shaped
//! actions) and stops. No retries, no backoff — the user refreshes.

pub mod devices;
pub mod emails;
pub mod events;
pub mod files;
pub mod form;
pub mod groups;
pub mod profile;
pub mod query;
pub mod settings;
pub mod users;

pub use query::QueryParams;
