//! Twirp client for the IPCManView RPC service.
//!
//! Unary calls are HTTP POSTs to `{base}/twirp/{Service}/{Method}` with
//! proto3-JSON bodies. Methods are grouped by capability area the way
//! the service definition groups them:
//!
//! - [`HelloWorldClient`] — public
//! - [`AuthClient`] — sign-up / password recovery
//! - [`UserClient`] — pages and profile actions for signed-in users
//! - [`AdminClient`] — device/group/user/settings administration
//!
//! Every call's completion is observed by the transport's interceptors
//! (see [`Interceptor`]); errors still propagate to the caller
//! unchanged.

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{AdminClient, AuthClient, HelloWorldClient, UserClient};
pub use error::{ErrorCode, RpcError};
pub use transport::{Interceptor, TwirpTransport};
