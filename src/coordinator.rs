use crate::api::{self, Error};
use crate::model::{Api, Status};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Matches the two minute refresh cadence PVOutput recommends for status reads.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(120);

pub type Snapshot = Option<Arc<Status>>;

/// Cached status snapshot shared by all sensor entities of one system.
///
/// The snapshot is only ever replaced as a whole, so readers see either the previous or the
/// new status and never a mix of both.
pub struct Coordinator {
    api: Api,
    interval: Duration,
    sender: watch::Sender<Snapshot>,
    /// Start of the last refresh attempt, successful or not
    last_attempt: Mutex<Option<Instant>>,
}

impl Coordinator {
    pub fn new(api: Api, interval: Duration) -> Self {
        let (sender, _) = watch::channel(None);
        Coordinator {
            api,
            interval,
            sender,
            last_attempt: Mutex::new(None),
        }
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Latest snapshot, `None` until the first successful refresh.
    pub fn data(&self) -> Snapshot {
        self.sender.borrow().clone()
    }

    /// Receiver notified every time the snapshot is replaced.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.sender.subscribe()
    }

    /// Replace the snapshot and notify subscribers.
    pub fn set_data(&self, status: Status) -> Arc<Status> {
        let status = Arc::new(status);
        self.sender.send_replace(Some(status.clone()));
        status
    }

    /// Fetch a new status. On failure the previous snapshot stays in place.
    pub async fn refresh(&self) -> Result<Arc<Status>, Error> {
        let status = api::status(&self.api).await?;
        log::debug!(
            "system {}: status reported at {} {}",
            self.api.system_id,
            status.reported_date,
            status.reported_time
        );

        Ok(self.set_data(status))
    }

    /// Refresh at most once per `interval`. A failed attempt also counts, so an exhausted
    /// request quota is not hit again before the interval is over.
    pub async fn refresh_if_due(&self) -> Result<(), Error> {
        if !self.start_attempt() {
            log::info!(
                "system {}: last refresh attempt is less than {:?} old; keeping cached status",
                self.api.system_id,
                self.interval
            );
            return Ok(());
        }

        self.refresh().await.map(|_| ()).map_err(|e| {
            log::warn!(
                "system {}: refresh failed, keeping previous status: {}",
                self.api.system_id,
                e
            );
            e
        })
    }

    /// Claim the next refresh attempt if `interval` has passed since the previous one.
    fn start_attempt(&self) -> bool {
        let mut last_attempt = match self.last_attempt.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let due = last_attempt.map_or(true, |instant| instant.elapsed() >= self.interval);
        if due {
            *last_attempt = Some(Instant::now());
        }
        due
    }
}
