type WattHours = u64;
type Watts = i64;

/// Connection details for one PVOutput system.
#[derive(Debug, Clone)]
pub struct Api {
    pub api_url: String,
    pub api_key: String,
    pub system_id: String,
    pub client: reqwest::Client,
}

/// Configuration entry handed to `sensor::setup_entry`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub system_id: String,
}

/// Latest readings reported by `getstatus.jsp`.
///
/// Every reading is optional: PVOutput reports `NaN` for values the system
/// never uploaded, which is kept distinct from a reported zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Status {
    pub reported_date: String,
    pub reported_time: String,
    pub energy_consumption: Option<WattHours>,
    pub energy_generation: Option<WattHours>,
    pub normalized_output: Option<f64>,
    pub power_consumption: Option<Watts>,
    pub power_generation: Option<Watts>,
    pub temperature: Option<f64>,
    pub voltage: Option<f64>,
}

/// Static system description reported by `getsystem.jsp`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct System {
    pub system_name: String,
    pub system_size: Option<u64>,
    pub zipcode: Option<String>,
    pub panels: Option<u32>,
    pub panel_power: Option<u32>,
    pub panel_brand: Option<String>,
    pub inverters: Option<u32>,
    pub inverter_power: Option<u32>,
    pub inverter_brand: Option<String>,
    pub orientation: Option<String>,
    pub array_tilt: Option<f64>,
    pub shade: Option<String>,
    pub install_date: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /* minutes */
    pub status_interval: Option<u32>,
}
