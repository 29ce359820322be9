pub mod description;
pub mod entity;

use crate::api::{self, Error};
use crate::coordinator::Coordinator;
use crate::model::{ConfigEntry, System};
pub use description::{DeviceClass, SensorDescription, StateClass, SENSORS};
pub use entity::{DeviceInfo, SensorEntity, SensorState};
use std::sync::Arc;

/// Build one entity per entry of `SENSORS` for `system_id`, all sharing `coordinator`.
pub fn create_entities(
    coordinator: &Arc<Coordinator>,
    system_id: &str,
    system: &System,
) -> Vec<SensorEntity> {
    SENSORS
        .iter()
        .map(|description| SensorEntity::new(coordinator.clone(), description, system_id, system))
        .collect()
}

/// Set up the sensors of a config entry.
///
/// Fetches the system description once and hands every entity to `add_entities` in a single
/// batch. A failed fetch is returned before anything is added.
pub async fn setup_entry<F>(
    coordinator: &Arc<Coordinator>,
    entry: &ConfigEntry,
    add_entities: F,
) -> Result<(), Error>
where
    F: FnOnce(Vec<SensorEntity>),
{
    let system = api::system(coordinator.api()).await?;
    log::debug!(
        "system {}: {} ({})",
        entry.system_id,
        system.system_name,
        system.inverter_brand.as_deref().unwrap_or("unknown inverter")
    );

    add_entities(create_entities(coordinator, &entry.system_id, &system));
    Ok(())
}
