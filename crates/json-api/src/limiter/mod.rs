//! Per-client request rate limiting.
//!
//! Every client IP gets its own token bucket. Buckets idle for longer than
//! [`IDLE_EVICTION`] are dropped by a background sweeper so the map does not
//! grow without bound.

mod bucket;
mod middleware;

use std::{
    net::IpAddr,
    sync::Arc,
    time::{Duration, Instant},
};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tokio::task::JoinHandle;
use tracing::debug;

use bucket::TokenBucket;

pub(crate) use middleware::RateLimit;

/// How often the sweeper scans for idle clients.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Clients unseen for longer than this are forgotten.
const IDLE_EVICTION: Duration = Duration::from_secs(180);

/// Token bucket parameters shared by every client.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LimiterSettings {
    /// Sustained refill rate, in requests per second.
    pub(crate) rps: f64,

    /// Bucket capacity; a new client may make this many requests at once.
    pub(crate) burst: u32,

    /// When off, every request is admitted and nothing is tracked.
    pub(crate) enabled: bool,
}

impl Default for LimiterSettings {
    fn default() -> Self {
        Self {
            rps: 2.0,
            burst: 4,
            enabled: true,
        }
    }
}

#[derive(Debug)]
struct Client {
    bucket: TokenBucket,
    last_seen: Instant,
}

type Clients = Arc<Mutex<FxHashMap<IpAddr, Client>>>;

/// Registry of per-IP buckets.
#[derive(Debug)]
pub(crate) struct RateLimiter {
    settings: LimiterSettings,
    clients: Clients,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl RateLimiter {
    /// A limiter without a sweeper; idle clients are only evicted by
    /// [`RateLimiter::sweep_at`].
    pub(crate) fn new(settings: LimiterSettings) -> Self {
        Self {
            settings,
            clients: Arc::default(),
            sweeper: Mutex::new(None),
        }
    }

    /// A limiter with its sweeper running on the current Tokio runtime.
    pub(crate) fn start(settings: LimiterSettings) -> Arc<Self> {
        let limiter = Self::new(settings);

        if settings.enabled {
            let clients = Arc::clone(&limiter.clients);

            *limiter.sweeper.lock() = Some(tokio::spawn(async move {
                let mut ticker = tokio::time::interval(SWEEP_INTERVAL);

                // The first tick completes immediately.
                ticker.tick().await;

                loop {
                    ticker.tick().await;

                    sweep(&clients, Instant::now());
                }
            }));
        }

        Arc::new(limiter)
    }

    pub(crate) fn enabled(&self) -> bool {
        self.settings.enabled
    }

    /// Take a token for `ip`.
    pub(crate) fn allow(&self, ip: IpAddr) -> bool {
        self.allow_at(ip, Instant::now())
    }

    pub(crate) fn allow_at(&self, ip: IpAddr, now: Instant) -> bool {
        if !self.settings.enabled {
            return true;
        }

        let LimiterSettings { rps, burst, .. } = self.settings;

        let mut clients = self.clients.lock();

        let client = clients.entry(ip).or_insert_with(|| Client {
            bucket: TokenBucket::full(burst, now),
            last_seen: now,
        });

        client.last_seen = now;
        client.bucket.take(rps, burst, now)
    }

    /// Forget clients idle at `now`; returns how many were dropped.
    pub(crate) fn sweep_at(&self, now: Instant) -> usize {
        sweep(&self.clients, now)
    }

    /// Stop the sweeper. Tracked clients are kept.
    pub(crate) fn stop(&self) {
        if let Some(sweeper) = self.sweeper.lock().take() {
            sweeper.abort();

            debug!("rate limiter sweeper stopped");
        }
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.clients.lock().len()
    }

    #[cfg(test)]
    fn is_tracking(&self, ip: IpAddr) -> bool {
        self.clients.lock().contains_key(&ip)
    }
}

impl Drop for RateLimiter {
    fn drop(&mut self) {
        self.stop();
    }
}

fn sweep(clients: &Mutex<FxHashMap<IpAddr, Client>>, now: Instant) -> usize {
    let mut clients = clients.lock();
    let before = clients.len();

    clients.retain(|_ip, client| now.saturating_duration_since(client.last_seen) <= IDLE_EVICTION);

    let evicted = before - clients.len();

    if evicted > 0 {
        debug!(evicted, remaining = clients.len(), "evicted idle rate limiter clients");
    }

    evicted
}

#[cfg(test)]
mod tests {
    use std::net::{Ipv4Addr, Ipv6Addr};

    use super::*;

    const ALICE: IpAddr = IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1));
    const BOB: IpAddr = IpAddr::V6(Ipv6Addr::LOCALHOST);

    #[test]
    fn clients_have_independent_buckets() {
        let limiter = RateLimiter::new(LimiterSettings::default());
        let now = Instant::now();

        for _ in 0..4 {
            assert!(limiter.allow_at(ALICE, now), "alice's burst should be admitted");
        }

        assert!(!limiter.allow_at(ALICE, now), "alice should be limited");
        assert!(limiter.allow_at(BOB, now), "bob should be unaffected by alice");
        assert!(
            limiter.allow_at(ALICE, now + Duration::from_millis(500)),
            "alice should get a token back after half a second"
        );
    }

    #[test]
    fn sweep_forgets_idle_clients_only() {
        let limiter = RateLimiter::new(LimiterSettings::default());
        let start = Instant::now();

        limiter.allow_at(ALICE, start);
        limiter.allow_at(BOB, start + Duration::from_secs(120));

        let evicted = limiter.sweep_at(start + Duration::from_secs(181));

        assert_eq!(evicted, 1, "only alice has been idle long enough");
        assert!(!limiter.is_tracking(ALICE), "alice should be forgotten");
        assert!(limiter.is_tracking(BOB), "bob was seen recently");
    }

    #[test]
    fn returning_client_gets_a_full_bucket() {
        let limiter = RateLimiter::new(LimiterSettings {
            rps: 0.0,
            burst: 1,
            enabled: true,
        });
        let start = Instant::now();

        assert!(limiter.allow_at(ALICE, start), "first request should pass");
        assert!(!limiter.allow_at(ALICE, start), "zero rps never refills");

        let later = start + Duration::from_secs(200);

        limiter.sweep_at(later);

        assert!(limiter.allow_at(ALICE, later), "an evicted client starts fresh");
    }

    #[test]
    fn disabled_limiter_admits_everything_without_tracking() {
        let limiter = RateLimiter::new(LimiterSettings {
            enabled: false,
            ..LimiterSettings::default()
        });
        let now = Instant::now();

        let admitted = (0..100).filter(|_| limiter.allow_at(ALICE, now)).count();

        assert_eq!(admitted, 100, "every request should pass");
        assert_eq!(limiter.tracked(), 0, "nothing should be tracked");
    }

    #[tokio::test]
    async fn stop_aborts_the_sweeper() {
        let limiter = RateLimiter::start(LimiterSettings::default());

        assert!(limiter.sweeper.lock().is_some(), "sweeper should be running");

        limiter.stop();

        assert!(limiter.sweeper.lock().is_none(), "sweeper should be gone");
    }
}
