use crate::book::AttendanceBook;
use crate::errors::AppError;
use crate::models::{AttendanceRecord, Member};
use crate::roster::{RawMember, migrate_legacy};
use serde::de::DeserializeOwned;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{info, warn};

const MEMBERS_FILE: &str = "members.json";
const RECORDS_FILE: &str = "records.json";

#[derive(Debug, Clone)]
pub struct DataPaths {
    pub dir: PathBuf,
    pub members: PathBuf,
    pub records: PathBuf,
}

impl DataPaths {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            members: dir.join(MEMBERS_FILE),
            records: dir.join(RECORDS_FILE),
            dir,
        }
    }
}

pub fn resolve_data_paths() -> DataPaths {
    match env::var("APP_DATA_DIR") {
        Ok(dir) if !dir.is_empty() => DataPaths::in_dir(dir),
        _ => DataPaths::in_dir("data"),
    }
}

/// Loads both collections. A missing or unreadable blob yields an empty
/// collection. Members still carrying a legacy `group` are migrated and the
/// migrated roster is written back right away.
pub async fn load_book(paths: &DataPaths) -> AttendanceBook {
    let raw: Vec<RawMember> = load_json(&paths.members).await;
    let legacy = raw.iter().filter(|m| m.group.is_some()).count();
    let members = migrate_legacy(raw);
    if legacy > 0 && persist_members(paths, &members).await.is_ok() {
        info!(migrated = legacy, "rewrote legacy members");
    }
    let records: Vec<AttendanceRecord> = load_json(&paths.records).await;
    info!(
        members = members.len(),
        records = records.len(),
        "loaded attendance data"
    );
    AttendanceBook::new(members, records)
}

async fn load_json<T: DeserializeOwned + Default>(path: &Path) -> T {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(err) => {
                warn!("failed to parse {}: {err}", path.display());
                T::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => T::default(),
        Err(err) => {
            warn!("failed to read {}: {err}", path.display());
            T::default()
        }
    }
}

pub async fn persist_members(paths: &DataPaths, members: &[Member]) -> Result<(), AppError> {
    write_json(&paths.members, members).await
}

pub async fn persist_records(
    paths: &DataPaths,
    records: &[AttendanceRecord],
) -> Result<(), AppError> {
    write_json(&paths.records, records).await
}

pub async fn persist_book(paths: &DataPaths, book: &AttendanceBook) -> Result<(), AppError> {
    persist_members(paths, book.members()).await?;
    if let Err(err) = persist_records(paths, book.records.records()).await {
        warn!(
            members = %paths.members.display(),
            "members were written but records were not; stored records are stale"
        );
        return Err(err);
    }
    Ok(())
}

/// Writes next to `path` and renames over it, so a failed write leaves the
/// previous blob intact.
async fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(value).map_err(AppError::internal)?;
    let staging = staging_path(path);
    let written = match fs::write(&staging, payload).await {
        Ok(()) => fs::rename(&staging, path).await,
        Err(err) => Err(err),
    };
    if let Err(err) = written {
        warn!("failed to write {}: {err}", path.display());
        let _ = fs::remove_file(&staging).await;
        return Err(AppError::internal(err));
    }
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
