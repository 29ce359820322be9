use prometheus::{Encoder, GaugeVec, TextEncoder};
use pvoutput_rs::sensor::SensorEntity;

lazy_static! {
    static ref SENSOR_GAUGE: GaugeVec = register_gauge_vec!(
        opts!(
            "pvoutput_sensor",
            "latest value of a PVOutput sensor, in the unit given by the `unit` label",
        ),
        &["system_id", "key", "unit"],
    )
    .unwrap();
}

/// Feed current value of every entity to Prometheus. Unset values drop their series so that
/// they read as missing rather than zero.
pub fn publish(system_id: &str, entities: &[SensorEntity]) {
    for entity in entities {
        let description = entity.description();
        let labels = [
            system_id,
            description.key,
            description.native_unit_of_measurement,
        ];

        match entity.native_value() {
            Some(value) => SENSOR_GAUGE.with_label_values(&labels).set(value),
            None => {
                if SENSOR_GAUGE.remove_label_values(&labels).is_ok() {
                    log::debug!("{} is unset, removed from metrics", entity.unique_id());
                }
            }
        }
    }
}

/// Render every registered metric in the Prometheus text format.
pub fn read() -> Result<String, pvoutput_rs::Error> {
    let mut exposition = Vec::new();
    TextEncoder::new()
        .encode(&prometheus::gather(), &mut exposition)
        .or(Err(pvoutput_rs::Error::FormatError))?;

    String::from_utf8(exposition).or(Err(pvoutput_rs::Error::FormatError))
}
