use crate::model::TaskStore;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

const STORE_FILE: &str = "tasks_v1.yml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreScope {
    Default,
    Custom,
}

#[derive(Debug, Clone)]
pub struct StoreLocation {
    pub path: PathBuf,
    pub scope: StoreScope,
}

impl StoreLocation {
    pub fn custom(path: impl Into<PathBuf>) -> Self {
        StoreLocation {
            path: path.into(),
            scope: StoreScope::Custom,
        }
    }
}

pub fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "daymark").context("locating data directory")
}

pub fn locate_store(custom: Option<PathBuf>) -> Result<StoreLocation> {
    if let Some(path) = custom {
        return Ok(StoreLocation::custom(path));
    }
    let dirs = project_dirs()?;
    Ok(StoreLocation {
        path: dirs.data_dir().join(STORE_FILE),
        scope: StoreScope::Default,
    })
}

/// Reads the whole store. Never fails: a missing file is an empty store, and
/// an unreadable or malformed one is moved aside and treated as empty.
pub fn load_store(location: &StoreLocation) -> TaskStore {
    let data = match fs::read(&location.path) {
        Ok(data) => data,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("no store at {:?}, starting empty", location.path);
            return TaskStore::default();
        }
        Err(err) => {
            log::warn!("reading {:?} failed: {}", location.path, err);
            quarantine(&location.path);
            return TaskStore::default();
        }
    };
    if data.iter().all(u8::is_ascii_whitespace) {
        return TaskStore::default();
    }
    match serde_yaml::from_slice::<TaskStore>(&data) {
        Ok(mut store) => {
            store.prune_empty();
            store
        }
        Err(err) => {
            log::warn!("store {:?} is malformed: {}", location.path, err);
            quarantine(&location.path);
            TaskStore::default()
        }
    }
}

/// Replaces the persisted store with `store`. The new content is written to a
/// sibling file first and renamed over the old one.
pub fn save_store(location: &StoreLocation, store: &TaskStore) -> Result<()> {
    if let Some(parent) = location.path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| format!("creating {:?}", parent))?;
        }
    }
    let serialized = serde_yaml::to_string(store).context("serializing tasks")?;
    let tmp = sibling(&location.path, "tmp");
    fs::write(&tmp, serialized).with_context(|| format!("writing {:?}", tmp))?;
    fs::rename(&tmp, &location.path)
        .with_context(|| format!("replacing {:?}", location.path))?;
    log::debug!("saved store to {:?}", location.path);
    Ok(())
}

fn quarantine(path: &Path) {
    let target = quarantine_target(path);
    match fs::rename(path, &target) {
        Ok(()) => log::warn!("moved unreadable store to {:?}", target),
        Err(err) => log::error!("could not move {:?} aside: {}", path, err),
    }
}

/// `<name>.corrupt`, or `<name>.corrupt.<n>` with the first free `n` once
/// earlier backups exist.
fn quarantine_target(path: &Path) -> PathBuf {
    let first = sibling(path, "corrupt");
    if !first.exists() {
        return first;
    }
    (1u32..)
        .map(|n| sibling(path, &format!("corrupt.{}", n)))
        .find(|candidate| !candidate.exists())
        .unwrap_or(first)
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| STORE_FILE.into());
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}
