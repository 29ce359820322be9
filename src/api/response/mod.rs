pub mod get_status;
pub mod get_system;

use csv::{ReaderBuilder, StringRecord, Trim};
use std::str::FromStr;

const UNSET: &str = "NaN";

/// Read the first record of `body`. PVOutput never quotes values, so quotes are kept as-is.
fn first_record(body: &str, builder: &mut ReaderBuilder) -> Result<StringRecord, String> {
    let mut reader = builder
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(body.as_bytes());

    let record = reader
        .records()
        .next()
        .ok_or_else(|| String::from("empty response"))?;
    record.map_err(|e| e.to_string())
}

/// Read optional column `index` of a CSV record.
///
/// Missing, empty and `NaN` columns are unset. Anything else must parse as `T`.
fn column<T: FromStr>(
    record: &StringRecord,
    index: usize,
    name: &str,
) -> Result<Option<T>, String> {
    match record.get(index).map(str::trim) {
        None | Some("") | Some(UNSET) => Ok(None),
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| format!("invalid {}: {:?}", name, raw)),
    }
}

#[cfg(test)]
mod test {
    use super::get_status::parse_status;
    use super::get_system::parse_system;
    use crate::api::Error;
    use std::fs;
    use std::path::PathBuf;

    fn read_resource(filename: &str) -> String {
        let mut d = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        d.push(format!("resources/test/{}", filename));
        fs::read_to_string(d.as_path()).unwrap()
    }

    #[test]
    fn column_treats_nan_and_empty_as_unset() {
        let columns = csv::StringRecord::from(vec!["12", "NaN", "", " 7 "]);
        assert_eq!(Some(12), super::column::<u64>(&columns, 0, "a").unwrap());
        assert_eq!(None, super::column::<u64>(&columns, 1, "b").unwrap());
        assert_eq!(None, super::column::<u64>(&columns, 2, "c").unwrap());
        assert_eq!(Some(7), super::column::<u64>(&columns, 3, "d").unwrap());
        assert_eq!(None, super::column::<u64>(&columns, 4, "e").unwrap());
        assert!(super::column::<u64>(&csv::StringRecord::from(vec!["x"]), 0, "f").is_err());
    }

    #[test]
    fn get_status() {
        let status = parse_status(&read_resource("getstatus.csv")).unwrap();
        assert_eq!("20221029", status.reported_date);
        assert_eq!("14:35", status.reported_time);
        assert_eq!(Some(6547), status.energy_generation);
        assert_eq!(Some(1782), status.power_generation);
        assert_eq!(Some(3142), status.energy_consumption);
        assert_eq!(Some(421), status.power_consumption);
        assert_eq!(Some(1.637), status.normalized_output);
        assert_eq!(Some(23.4), status.temperature);
        assert_eq!(Some(238.6), status.voltage);
    }

    #[test]
    fn get_status_unset_readings() {
        let status = parse_status(&read_resource("getstatus_nan.csv")).unwrap();
        assert_eq!(Some(0), status.energy_generation);
        assert_eq!(Some(0), status.power_generation);
        assert_eq!(None, status.energy_consumption);
        assert_eq!(None, status.power_consumption);
        assert_eq!(None, status.temperature);
        assert_eq!(None, status.voltage);
    }

    #[test]
    fn get_status_invalid() {
        let input = read_resource("invalid.csv");
        match parse_status(&input) {
            Err(Error::InvalidResponse(body, _)) => assert_eq!(input, body),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn get_status_requires_timestamp() {
        assert!(matches!(
            parse_status(""),
            Err(Error::InvalidResponse(_, _))
        ));
    }

    #[test]
    fn get_system() {
        let system = parse_system(&read_resource("getsystem.csv")).unwrap();
        assert_eq!("Rooftop Array", system.system_name);
        assert_eq!(Some(4500), system.system_size);
        assert_eq!(Some(String::from("2000")), system.zipcode);
        assert_eq!(Some(18), system.panels);
        assert_eq!(Some(250), system.panel_power);
        assert_eq!(Some(String::from("Trina")), system.panel_brand);
        assert_eq!(Some(1), system.inverters);
        assert_eq!(Some(4600), system.inverter_power);
        assert_eq!(Some(String::from("SMA")), system.inverter_brand);
        assert_eq!(Some(String::from("N")), system.orientation);
        assert_eq!(Some(22.5), system.array_tilt);
        assert_eq!(Some(String::from("No")), system.shade);
        assert_eq!(Some(String::from("20190310")), system.install_date);
        assert_eq!(Some(-33.86), system.latitude);
        assert_eq!(Some(151.2), system.longitude);
        assert_eq!(Some(5), system.status_interval);
    }

    #[test]
    fn get_status_crlf_terminated() {
        let status =
            parse_status("20221029,14:35,6547,1782,NaN,NaN,1.637,NaN,238.6\r\n").unwrap();
        assert_eq!(Some(238.6), status.voltage);
        assert_eq!(None, status.temperature);
    }

    #[test]
    fn get_system_reads_first_section_only() {
        let system = parse_system("Garage,3000;1500,Second Array\n").unwrap();
        assert_eq!("Garage", system.system_name);
        assert_eq!(Some(3000), system.system_size);
        assert_eq!(None, system.zipcode);
    }

    #[test]
    fn get_system_name_only() {
        let system = parse_system("Shed").unwrap();
        assert_eq!("Shed", system.system_name);
        assert_eq!(None, system.inverter_brand);
        assert_eq!(None, system.status_interval);
    }

    #[test]
    fn get_system_invalid() {
        assert!(matches!(
            parse_system(&read_resource("invalid.csv")),
            Err(Error::InvalidResponse(_, _))
        ));
        assert!(matches!(
            parse_system(""),
            Err(Error::InvalidResponse(_, _))
        ));
    }
}
