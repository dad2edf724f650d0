//! Rate limiting middleware.

use std::{net::IpAddr, sync::Arc};

use salvo::prelude::*;
use tracing::error;

use crate::{errors::ApiError, limiter::RateLimiter};

/// Rejects clients that have exhausted their bucket with `429`.
#[derive(Debug, Clone)]
pub(crate) struct RateLimit {
    limiter: Arc<RateLimiter>,
}

impl RateLimit {
    pub(crate) fn new(limiter: Arc<RateLimiter>) -> Self {
        Self { limiter }
    }
}

#[handler]
impl RateLimit {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        if !self.limiter.enabled() {
            ctrl.call_next(req, depot, res).await;

            return;
        }

        let verdict = match client_ip(req) {
            Some(ip) if self.limiter.allow(ip) => Ok(()),
            Some(_ip) => Err(ApiError::RateLimitExceeded),
            None => {
                error!(
                    remote_addr = %req.remote_addr(),
                    "cannot rate limit a request without a client IP"
                );

                Err(ApiError::ServerError)
            }
        };

        match verdict {
            Ok(()) => {
                ctrl.call_next(req, depot, res).await;
            }
            Err(rejection) => {
                res.render(rejection);
                ctrl.skip_rest();
            }
        }
    }
}

fn client_ip(req: &Request) -> Option<IpAddr> {
    let addr = req.remote_addr();

    addr.as_ipv4()
        .map(|v4| IpAddr::V4(*v4.ip()))
        .or_else(|| addr.as_ipv6().map(|v6| IpAddr::V6(*v6.ip())))
}

#[cfg(test)]
mod tests {
    use std::{
        net::SocketAddr,
        sync::atomic::{AtomicUsize, Ordering},
    };

    use salvo::test::{ResponseExt, TestClient};
    use serde_json::Value;
    use testresult::TestResult;

    use crate::limiter::LimiterSettings;

    use super::*;

    #[handler]
    async fn ok() -> &'static str {
        "ok"
    }

    fn make_service(settings: LimiterSettings) -> Service {
        let limiter = Arc::new(RateLimiter::new(settings));

        Service::new(Router::new().hoop(RateLimit::new(limiter)).get(ok))
    }

    #[tokio::test]
    async fn disabled_limiter_passes_requests_through() -> TestResult {
        let service = make_service(LimiterSettings {
            enabled: false,
            ..LimiterSettings::default()
        });

        for _ in 0..10 {
            let mut res = TestClient::get("http://example.com").send(&service).await;

            assert_eq!(res.status_code, Some(StatusCode::OK));
            assert_eq!(res.take_string().await?, "ok");
        }

        Ok(())
    }

    #[tokio::test]
    async fn request_without_client_ip_is_a_server_error() -> TestResult {
        let service = make_service(LimiterSettings::default());

        let mut res = TestClient::get("http://example.com").send(&service).await;
        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(
            body["error"],
            "the server encountered a problem and could not process your request"
        );

        Ok(())
    }

    /// Gives every request the same peer address.
    #[derive(Debug, Clone, Copy)]
    struct FromPeer(SocketAddr);

    #[handler]
    impl FromPeer {
        async fn handle(
            &self,
            req: &mut Request,
            depot: &mut Depot,
            res: &mut Response,
            ctrl: &mut FlowCtrl,
        ) {
            *req.remote_addr_mut() = self.0.into();
            ctrl.call_next(req, depot, res).await;
        }
    }

    #[derive(Debug, Clone, Default)]
    struct Counted(Arc<AtomicUsize>);

    #[handler]
    impl Counted {
        async fn handle(&self) -> &'static str {
            self.0.fetch_add(1, Ordering::SeqCst);

            "ok"
        }
    }

    #[tokio::test]
    async fn client_over_its_burst_gets_429() -> TestResult {
        let limiter = Arc::new(RateLimiter::new(LimiterSettings::default()));
        let counted = Counted::default();
        let calls = Arc::clone(&counted.0);

        let service = Service::new(
            Router::new()
                .hoop(FromPeer(SocketAddr::from(([203, 0, 113, 7], 51000))))
                .hoop(RateLimit::new(limiter))
                .get(counted),
        );

        for attempt in 1..=4 {
            let res = TestClient::get("http://example.com").send(&service).await;

            assert_eq!(res.status_code, Some(StatusCode::OK), "attempt {attempt}");
        }

        let mut res = TestClient::get("http://example.com").send(&service).await;
        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::TOO_MANY_REQUESTS));
        assert_eq!(body["error"], "rate limit exceeded");
        assert_eq!(calls.load(Ordering::SeqCst), 4, "rejected request reached the handler");

        Ok(())
    }
}
