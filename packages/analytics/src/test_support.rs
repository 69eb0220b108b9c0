use chrono::{NaiveDate, NaiveDateTime};
use hotspot_map_hotspot_models::HotspotRecord;
use hotspot_map_store::RecordStore;

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(date: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M").unwrap()
}

pub fn hotspot(date: &str, source: &str, fuel: &str, estarea: Option<f64>) -> HotspotRecord {
    HotspotRecord {
        lat: 55.0,
        lon: -115.0,
        rep_date: at(date),
        source: source.to_string(),
        fuel: fuel.to_string(),
        fwi: Some(10.0),
        ros: None,
        hfi: Some(100.0),
        estarea,
    }
}

pub fn store(records: Vec<HotspotRecord>) -> RecordStore {
    RecordStore::from_records(records).unwrap()
}

/// Ten hotspots over four days, three sources and three fuels, deliberately
/// not in date order.
pub fn sample_store() -> RecordStore {
    store(vec![
        hotspot("2024-01-03 14:00", "NASA_can", "C2", Some(4.0)),
        hotspot("2024-01-01 01:00", "NASA_can", "C2", Some(1.0)),
        hotspot("2024-01-01 23:59", "NASA7", "water", None),
        hotspot("2024-01-02 12:00", "NASA7", "C2", Some(2.0)),
        hotspot("2024-01-02 12:30", "NASA_usa", "O1a", Some(3.0)),
        hotspot("2024-01-04 00:00", "NASA_can", "O1a", Some(8.0)),
        hotspot("2024-01-03 09:00", "NASA_usa", "water", None),
        hotspot("2024-01-01 10:00", "NASA_usa", "C2", Some(6.0)),
        hotspot("2024-01-04 22:00", "NASA7", "C2", Some(5.0)),
        hotspot("2024-01-02 03:00", "NASA_can", "water", Some(7.0)),
    ])
}
