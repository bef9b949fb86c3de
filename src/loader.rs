use std::{fs::File, path::Path};

use csv::{Reader, ReaderBuilder, StringRecord, Trim};

use crate::{
    building::Building,
    error::{LoadError, LoadResult},
    schedule_entry::ScheduleEntry,
};

/// Reads a building file (`short,long,x,y` per line) into records.
pub fn read_buildings<P: AsRef<Path>>(path: P) -> LoadResult<Vec<Building>> {
    read_records(path.as_ref(), |record| Building::from_fields(record.iter()))
}

/// Reads a schedule file (`friend,time,short` per line) into records.
pub fn read_schedules<P: AsRef<Path>>(path: P) -> LoadResult<Vec<ScheduleEntry>> {
    read_records(path.as_ref(), |record| {
        ScheduleEntry::from_fields(record.iter())
    })
}

fn read_records<T, F>(path: &Path, mut convert: F) -> LoadResult<Vec<T>>
where
    F: FnMut(&StringRecord) -> T,
{
    let mut reader = flat_reader(path)?;
    let mut records = Vec::new();
    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        records.push(convert(&record));
    }
    tracing::debug!(path = %path.display(), count = records.len(), "read data file");
    Ok(records)
}

// Data files are bare comma-separated rows: no header, no quoting, no trimming.
fn flat_reader(path: &Path) -> LoadResult<Reader<File>> {
    if !path.exists() {
        return Err(LoadError::Missing(path.to_path_buf()));
    }
    let file = File::open(path)?;
    Ok(ReaderBuilder::new()
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .trim(Trim::None)
        .from_reader(file))
}
