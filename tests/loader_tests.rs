use std::io::Write;

use campus_directory::{
    DirectoryConfig, DirectoryStore, LoadError, LoadSummary,
    loader::{read_buildings, read_schedules},
};
use tempfile::NamedTempFile;

fn data_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn config_for(
    buildings: Option<&NamedTempFile>,
    schedules: Option<&NamedTempFile>,
) -> DirectoryConfig {
    DirectoryConfig {
        buildings_path: buildings.map(|f| f.path().to_path_buf()),
        schedules_path: schedules.map(|f| f.path().to_path_buf()),
        ..DirectoryConfig::default()
    }
}

#[test]
fn read_buildings_handles_flat_rows() {
    let file = data_file("A,Alpha Hall,0,0\r\nB,\"Beta\",3,4\n\nC,Gamma,oops\n");
    let buildings = read_buildings(file.path()).unwrap();

    assert_eq!(buildings.len(), 3);
    assert_eq!(buildings[0].long_name, "Alpha Hall");
    assert_eq!(buildings[0].y, 0.0);
    assert_eq!(buildings[1].long_name, "\"Beta\"");
    assert_eq!((buildings[1].x, buildings[1].y), (3.0, 4.0));
    assert!(buildings[2].x.is_nan());
    assert!(buildings[2].y.is_nan());
}

#[test]
fn read_schedules_keeps_untrimmed_fields() {
    let file = data_file("Sam,9am,A\nLee, 10am,B,extra\n");
    let schedules = read_schedules(file.path()).unwrap();

    assert_eq!(schedules.len(), 2);
    assert_eq!(schedules[1].friend, "Lee");
    assert_eq!(schedules[1].time, " 10am");
    assert_eq!(schedules[1].short_name, "B");
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.csv");
    let err = read_buildings(&path).unwrap_err();
    assert!(matches!(err, LoadError::Missing(ref p) if p == &path));
    assert!(err.to_string().contains("absent.csv"));
}

#[test]
fn store_loads_from_paths() {
    let buildings = data_file("A,Alpha,0,0\nB,Beta,3,4\n");
    let schedules = data_file("Sam,9am,A\n");
    let store = DirectoryStore::new();

    assert_eq!(store.load_buildings_from_path(buildings.path()).unwrap(), 2);
    assert_eq!(store.load_schedules_from_path(schedules.path()).unwrap(), 1);
    assert_eq!(store.classes_for_friend(Some("sam"))[0].short_name, "A");
}

#[test]
fn reload_publishes_every_configured_source() {
    let buildings = data_file("A,Alpha,0,0\nB,Beta,3,4\n");
    let schedules = data_file("Sam,9am,A\nLee,9am,B\nKim,9am,Z\n");
    let store = DirectoryStore::new();

    let summary = store
        .reload(&config_for(Some(&buildings), Some(&schedules)))
        .unwrap();
    assert_eq!(
        summary,
        LoadSummary {
            buildings: 2,
            schedules: 3
        }
    );
}

#[test]
fn reload_keeps_unconfigured_half() {
    let buildings = data_file("A,Alpha,0,0\n");
    let store = DirectoryStore::new();
    store.load_schedules(["Sam,9am,A", "Lee,9am,A"]);

    let summary = store.reload(&config_for(Some(&buildings), None)).unwrap();
    assert_eq!(summary.buildings, 1);
    assert_eq!(summary.schedules, 2);
}

#[test]
fn failed_reload_publishes_nothing() {
    let buildings = data_file("A,Alpha,0,0\n");
    let store = DirectoryStore::new();
    store.load_buildings(["Z,Zeta,1,1"]);

    let mut config = config_for(Some(&buildings), None);
    config.schedules_path = Some(buildings.path().with_extension("missing"));
    let err = store.reload(&config).unwrap_err();

    assert!(matches!(err, LoadError::Missing(_)));
    assert!(store.find_building_by_short_name("Z").is_some());
    assert!(store.find_building_by_short_name("A").is_none());
}

#[test]
fn reload_without_sources_is_an_error() {
    let store = DirectoryStore::new();
    let err = store.reload(&DirectoryConfig::default()).unwrap_err();
    assert!(matches!(err, LoadError::NoSources));
}
