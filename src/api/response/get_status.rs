use super::{column, first_record};
use csv::{ReaderBuilder, StringRecord};
use crate::api::Error;
use crate::model::Status;

/* date,time,energy_generation,power_generation,energy_consumption,power_consumption,
 * normalized_output,temperature,voltage */
const DATE: usize = 0;
const TIME: usize = 1;
const ENERGY_GENERATION: usize = 2;
const POWER_GENERATION: usize = 3;
const ENERGY_CONSUMPTION: usize = 4;
const POWER_CONSUMPTION: usize = 5;
const NORMALIZED_OUTPUT: usize = 6;
const TEMPERATURE: usize = 7;
const VOLTAGE: usize = 8;

fn required(record: &StringRecord, index: usize, name: &str) -> Result<String, String> {
    column::<String>(record, index, name)?.ok_or_else(|| format!("missing {}", name))
}

fn parse_record(record: &StringRecord) -> Result<Status, String> {
    Ok(Status {
        reported_date: required(record, DATE, "date")?,
        reported_time: required(record, TIME, "time")?,
        energy_generation: column(record, ENERGY_GENERATION, "energy generation")?,
        power_generation: column(record, POWER_GENERATION, "power generation")?,
        energy_consumption: column(record, ENERGY_CONSUMPTION, "energy consumption")?,
        power_consumption: column(record, POWER_CONSUMPTION, "power consumption")?,
        normalized_output: column(record, NORMALIZED_OUTPUT, "normalized output")?,
        temperature: column(record, TEMPERATURE, "temperature")?,
        voltage: column(record, VOLTAGE, "voltage")?,
    })
}

/// Parse the body of a `getstatus.jsp` response.
pub fn parse_status(body: &str) -> Result<Status, Error> {
    first_record(body, &mut ReaderBuilder::new())
        .and_then(|record| parse_record(&record))
        .map_err(|reason| Error::InvalidResponse(body.to_string(), reason))
}
