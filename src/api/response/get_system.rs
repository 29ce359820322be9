use super::{column, first_record};
use csv::{ReaderBuilder, StringRecord, Terminator};
use crate::api::Error;
use crate::model::System;

const SYSTEM_NAME: usize = 0;
const SYSTEM_SIZE: usize = 1;
const ZIPCODE: usize = 2;
const PANELS: usize = 3;
const PANEL_POWER: usize = 4;
const PANEL_BRAND: usize = 5;
const INVERTERS: usize = 6;
const INVERTER_POWER: usize = 7;
const INVERTER_BRAND: usize = 8;
const ORIENTATION: usize = 9;
const ARRAY_TILT: usize = 10;
const SHADE: usize = 11;
const INSTALL_DATE: usize = 12;
const LATITUDE: usize = 13;
const LONGITUDE: usize = 14;
const STATUS_INTERVAL: usize = 15;

fn parse_record(record: &StringRecord) -> Result<System, String> {
    let system_name = column::<String>(record, SYSTEM_NAME, "system name")?
        .ok_or_else(|| String::from("missing system name"))?;

    Ok(System {
        system_name,
        system_size: column(record, SYSTEM_SIZE, "system size")?,
        zipcode: column(record, ZIPCODE, "postcode")?,
        panels: column(record, PANELS, "number of panels")?,
        panel_power: column(record, PANEL_POWER, "panel power")?,
        panel_brand: column(record, PANEL_BRAND, "panel brand")?,
        inverters: column(record, INVERTERS, "number of inverters")?,
        inverter_power: column(record, INVERTER_POWER, "inverter power")?,
        inverter_brand: column(record, INVERTER_BRAND, "inverter brand")?,
        orientation: column(record, ORIENTATION, "orientation")?,
        array_tilt: column(record, ARRAY_TILT, "array tilt")?,
        shade: column(record, SHADE, "shade")?,
        install_date: column(record, INSTALL_DATE, "install date")?,
        latitude: column(record, LATITUDE, "latitude")?,
        longitude: column(record, LONGITUDE, "longitude")?,
        status_interval: column(record, STATUS_INTERVAL, "status interval")?,
    })
}

/// Parse the body of a `getsystem.jsp` response.
///
/// Only the first `;`-separated section describes the system itself; the
/// remaining sections (secondary arrays, tariffs, teams) are ignored.
pub fn parse_system(body: &str) -> Result<System, Error> {
    let mut builder = ReaderBuilder::new();
    builder.terminator(Terminator::Any(b';'));

    first_record(body, &mut builder)
        .and_then(|record| parse_record(&record))
        .map_err(|reason| Error::InvalidResponse(body.to_string(), reason))
}
