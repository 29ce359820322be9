use super::description::{DeviceClass, SensorDescription, StateClass};
use crate::coordinator::{Coordinator, Snapshot};
use crate::model::System;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

pub const DOMAIN: &str = "pvoutput";
pub const MANUFACTURER: &str = "PVOutput";

/// Identity of the PVOutput system every sensor of one entry belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceInfo {
    pub configuration_url: String,
    pub identifiers: Vec<(String, String)>,
    pub manufacturer: String,
    pub model: Option<String>,
    pub name: String,
}

impl DeviceInfo {
    fn new(system_id: &str, system: &System) -> Self {
        DeviceInfo {
            configuration_url: format!("https://pvoutput.org/list.jsp?sid={}", system_id),
            identifiers: vec![(DOMAIN.to_string(), system_id.to_string())],
            manufacturer: MANUFACTURER.to_string(),
            model: system.inverter_brand.clone(),
            name: system.system_name.clone(),
        }
    }
}

/// Serializable view of an entity at the time it was read.
#[derive(Debug, Serialize)]
pub struct SensorState<'a> {
    pub unique_id: &'a str,
    pub name: &'a str,
    pub native_value: Option<f64>,
    pub unit_of_measurement: &'a str,
    pub device_class: Option<DeviceClass>,
    pub state_class: Option<StateClass>,
    pub device: &'a DeviceInfo,
}

/// One PVOutput sensor bound to the shared coordinator.
///
/// Holds no reading of its own; the value is recomputed from the coordinator's current
/// snapshot on every read.
pub struct SensorEntity {
    description: &'static SensorDescription,
    coordinator: Arc<Coordinator>,
    unique_id: String,
    device_info: DeviceInfo,
}

impl SensorEntity {
    pub fn new(
        coordinator: Arc<Coordinator>,
        description: &'static SensorDescription,
        system_id: &str,
        system: &System,
    ) -> Self {
        SensorEntity {
            description,
            coordinator,
            unique_id: format!("{}_{}", system_id, description.key),
            device_info: DeviceInfo::new(system_id, system),
        }
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn description(&self) -> &'static SensorDescription {
        self.description
    }

    pub fn device_info(&self) -> &DeviceInfo {
        &self.device_info
    }

    /// Entity name relative to the device name.
    pub fn name(&self) -> &str {
        self.description.name
    }

    /// Current reading, `None` when no status was fetched yet or the field is unset.
    pub fn native_value(&self) -> Option<f64> {
        self.coordinator
            .data()
            .and_then(|status| (self.description.value_fn)(&status))
    }

    /// Receiver notified whenever the coordinator replaces its snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.coordinator.subscribe()
    }

    pub fn state(&self) -> SensorState<'_> {
        SensorState {
            unique_id: &self.unique_id,
            name: self.name(),
            native_value: self.native_value(),
            unit_of_measurement: self.description.native_unit_of_measurement,
            device_class: self.description.device_class,
            state_class: self.description.state_class,
            device: &self.device_info,
        }
    }
}
