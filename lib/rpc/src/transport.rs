use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::RpcError;

/// Observes the completion of every unary call.
///
/// Interceptors see the call's terminal status after the response (or
/// failure) is known, and must not alter it — the error, if any, still
/// propagates to the caller unchanged. The session layer uses this to
/// revalidate the cached session when a call comes back
/// `unauthenticated`.
pub trait Interceptor: Send + Sync {
    fn call_done(&self, service: &str, method: &str, error: Option<&RpcError>);
}

/// Unary Twirp transport: `POST {base}/twirp/{Service}/{Method}` with
/// JSON request and response bodies.
///
/// Holds no per-call mutable state, so one transport is shared by every
/// service client.
pub struct TwirpTransport {
    http: reqwest::Client,
    base_url: String,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl TwirpTransport {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            interceptors: Vec::new(),
        }
    }

    pub fn with_interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub(crate) fn method_url(&self, service: &str, method: &str) -> String {
        format!("{}/twirp/{service}/{method}", self.base_url)
    }

    /// Issue one unary call and decode its response.
    pub async fn call<Req, Resp>(
        &self,
        service: &str,
        method: &str,
        req: &Req,
    ) -> Result<Resp, RpcError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let result = self.call_inner(service, method, req).await;
        if let Err(err) = &result {
            debug!(service, method, code = err.code.as_str(), "rpc failed");
        }
        for interceptor in &self.interceptors {
            interceptor.call_done(service, method, result.as_ref().err());
        }
        result
    }

    async fn call_inner<Req, Resp>(
        &self,
        service: &str,
        method: &str,
        req: &Req,
    ) -> Result<Resp, RpcError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let resp = self
            .http
            .post(self.method_url(service, method))
            .json(req)
            .send()
            .await
            .map_err(|e| RpcError::transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.bytes().await.unwrap_or_default();
            return Err(RpcError::from_body(status.as_u16(), &body));
        }

        resp.json::<Resp>()
            .await
            .map_err(|e| RpcError::transport(format!("decoding {service}/{method}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_url_joins_base_service_method() {
        let transport =
            TwirpTransport::new(reqwest::Client::new(), "http://localhost:8080/");
        assert_eq!(
            transport.method_url("User", "GetHomePage"),
            "http://localhost:8080/twirp/User/GetHomePage"
        );
    }

    #[test]
    fn interceptors_accumulate() {
        struct Nop;
        impl Interceptor for Nop {
            fn call_done(&self, _: &str, _: &str, _: Option<&RpcError>) {}
        }

        let transport = TwirpTransport::new(reqwest::Client::new(), "http://x")
            .with_interceptor(Arc::new(Nop))
            .with_interceptor(Arc::new(Nop));
        assert_eq!(transport.interceptors.len(), 2);
    }
}
