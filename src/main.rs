#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate prometheus;
#[macro_use]
extern crate rocket;

use config::Config;
use pvoutput_rs::api;
use pvoutput_rs::coordinator::{self, Coordinator};
use pvoutput_rs::model::ConfigEntry;
use pvoutput_rs::sensor::{self, SensorEntity, SensorState};
use rocket::http::ContentType;
use rocket::{Build, Rocket, State};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::OnceCell;

mod metrics;

#[derive(Clone, serde::Deserialize)]
pub struct PvOutputConfig {
    api_url: String,
    api_key: String,
    system_id: String,
    /// Seconds between status refreshes
    interval: u64,
}

/// Structure containing state for API handlers.
pub struct StateData {
    entry: ConfigEntry,
    coordinator: Arc<Coordinator>,
    /// Filled by the first successful `sensor::setup_entry()`
    entities: OnceCell<Vec<SensorEntity>>,
    /// Last failed setup, replayed until the refresh interval has passed
    setup_failure: Mutex<Option<(Instant, api::Error)>>,
}

impl StateData {
    fn new(entry: ConfigEntry, coordinator: Coordinator) -> Self {
        StateData {
            entry,
            coordinator: Arc::new(coordinator),
            entities: OnceCell::new(),
            setup_failure: Mutex::new(None),
        }
    }

    /// Sensors of the configured system. Set up on first use; after a failed setup the same
    /// error is returned until the refresh interval has passed, then setup is attempted again.
    async fn entities(&self) -> Result<&[SensorEntity], api::Error> {
        if let Some(entities) = self.entities.get() {
            return Ok(entities);
        }
        if let Some(e) = self.recent_setup_failure() {
            log::info!(
                "system {}: setup failed less than {:?} ago, not retrying yet",
                self.entry.system_id,
                self.coordinator.interval()
            );
            return Err(e);
        }

        self.entities
            .get_or_try_init(|| async {
                let mut registered = Vec::new();
                sensor::setup_entry(&self.coordinator, &self.entry, |entities| {
                    registered = entities
                })
                .await?;
                log::info!(
                    "registered {} sensors for system {}",
                    registered.len(),
                    self.entry.system_id
                );
                Ok::<_, api::Error>(registered)
            })
            .await
            .map(Vec::as_slice)
            .map_err(|e| {
                log::warn!("system {}: setup failed: {}", self.entry.system_id, e);
                if let Ok(mut failure) = self.setup_failure.lock() {
                    *failure = Some((Instant::now(), e.clone()));
                }
                e
            })
    }

    fn recent_setup_failure(&self) -> Option<api::Error> {
        let failure = self.setup_failure.lock().ok()?;
        let recent = failure
            .as_ref()
            .filter(|(at, _)| at.elapsed() < self.coordinator.interval())
            .map(|(_, e)| e.clone());
        recent
    }

    /// Refresh status if due. A stale status is still served when the refresh fails.
    async fn refresh(&self) -> Result<(), api::Error> {
        match self.coordinator.refresh_if_due().await {
            Err(e) if self.coordinator.data().is_none() => Err(e),
            _ => Ok(()),
        }
    }
}

pub fn read_settings() -> Result<PvOutputConfig, config::ConfigError> {
    let mut settings = Config::default();
    settings
        .set_default("api_url", api::API_URL)?
        .set_default("interval", coordinator::DEFAULT_INTERVAL.as_secs() as i64)?
        .merge(config::Environment::with_prefix("PVOUTPUT"))?;

    settings.try_into()
}

#[get("/metrics")]
async fn metrics_route(state: &State<StateData>) -> Result<String, api::Error> {
    let entities = state.entities().await?;
    state.refresh().await?;
    metrics::publish(&state.entry.system_id, entities);
    metrics::read()
}

#[get("/sensors")]
async fn sensors_route(state: &State<StateData>) -> Result<(ContentType, String), api::Error> {
    let entities = state.entities().await?;
    state.refresh().await?;

    let states: Vec<SensorState> = entities.iter().map(SensorEntity::state).collect();
    serde_json::to_string_pretty(&states)
        .map(|body| (ContentType::JSON, body))
        .or(Err(api::Error::FormatError))
}

#[get("/system")]
async fn system_route(state: &State<StateData>) -> Result<String, api::Error> {
    let system = api::system(state.coordinator.api()).await?;

    Ok(format!("{:#?}", system))
}

#[launch]
fn rocket() -> Rocket<Build> {
    env_logger::init();

    let settings = read_settings().expect("Configuration error");
    let api = api::api(
        settings.api_url,
        settings.api_key,
        settings.system_id.clone(),
    )
    .expect("Unable to build HTTP client");
    let state = StateData::new(
        ConfigEntry {
            system_id: settings.system_id,
        },
        Coordinator::new(api, Duration::from_secs(settings.interval)),
    );

    rocket::build()
        .manage(state)
        .mount("/", routes![metrics_route, sensors_route, system_route])
}
