use crate::model::Status;
use serde::Serialize;
use std::fmt;

pub const ENERGY_WATT_HOUR: &str = "Wh";
pub const ENERGY_KILO_WATT_HOUR_PER_KILO_WATT: &str = "kWh/kW";
pub const POWER_WATT: &str = "W";
pub const TEMP_CELSIUS: &str = "°C";
pub const ELECTRIC_POTENTIAL_VOLT: &str = "V";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    Energy,
    Power,
    Temperature,
    Voltage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StateClass {
    /// Instantaneous reading.
    Measurement,
    /// Counter that only grows, apart from periodic resets (PVOutput resets daily).
    TotalIncreasing,
}

pub type ValueFn = fn(&Status) -> Option<f64>;

/// Describes one PVOutput sensor: how it is presented and how its value is read from a status.
#[derive(Clone, Copy)]
pub struct SensorDescription {
    pub key: &'static str,
    pub name: &'static str,
    pub native_unit_of_measurement: &'static str,
    pub device_class: Option<DeviceClass>,
    pub state_class: Option<StateClass>,
    pub value_fn: ValueFn,
}

impl fmt::Debug for SensorDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SensorDescription")
            .field("key", &self.key)
            .field("name", &self.name)
            .field("native_unit_of_measurement", &self.native_unit_of_measurement)
            .field("device_class", &self.device_class)
            .field("state_class", &self.state_class)
            .finish()
    }
}

fn energy_consumption(status: &Status) -> Option<f64> {
    status.energy_consumption.map(|v| v as f64)
}

fn energy_generation(status: &Status) -> Option<f64> {
    status.energy_generation.map(|v| v as f64)
}

fn normalized_output(status: &Status) -> Option<f64> {
    status.normalized_output
}

fn power_consumption(status: &Status) -> Option<f64> {
    status.power_consumption.map(|v| v as f64)
}

fn power_generation(status: &Status) -> Option<f64> {
    status.power_generation.map(|v| v as f64)
}

fn temperature(status: &Status) -> Option<f64> {
    status.temperature
}

fn voltage(status: &Status) -> Option<f64> {
    status.voltage
}

pub static SENSORS: [SensorDescription; 7] = [
    SensorDescription {
        key: "energy_consumption",
        name: "Energy consumed",
        native_unit_of_measurement: ENERGY_WATT_HOUR,
        device_class: Some(DeviceClass::Energy),
        state_class: Some(StateClass::TotalIncreasing),
        value_fn: energy_consumption,
    },
    SensorDescription {
        key: "energy_generation",
        name: "Energy generated",
        native_unit_of_measurement: ENERGY_WATT_HOUR,
        device_class: Some(DeviceClass::Energy),
        state_class: Some(StateClass::TotalIncreasing),
        value_fn: energy_generation,
    },
    SensorDescription {
        key: "normalized_output",
        name: "Efficiency",
        native_unit_of_measurement: ENERGY_KILO_WATT_HOUR_PER_KILO_WATT,
        device_class: None,
        state_class: Some(StateClass::Measurement),
        value_fn: normalized_output,
    },
    SensorDescription {
        key: "power_consumption",
        name: "Power consumed",
        native_unit_of_measurement: POWER_WATT,
        device_class: Some(DeviceClass::Power),
        state_class: Some(StateClass::Measurement),
        value_fn: power_consumption,
    },
    SensorDescription {
        key: "power_generation",
        name: "Power generated",
        native_unit_of_measurement: POWER_WATT,
        device_class: Some(DeviceClass::Power),
        state_class: Some(StateClass::Measurement),
        value_fn: power_generation,
    },
    SensorDescription {
        key: "temperature",
        name: "Temperature",
        native_unit_of_measurement: TEMP_CELSIUS,
        device_class: Some(DeviceClass::Temperature),
        state_class: Some(StateClass::Measurement),
        value_fn: temperature,
    },
    SensorDescription {
        key: "voltage",
        name: "Voltage",
        native_unit_of_measurement: ELECTRIC_POTENTIAL_VOLT,
        device_class: Some(DeviceClass::Voltage),
        state_class: Some(StateClass::Measurement),
        value_fn: voltage,
    },
];
