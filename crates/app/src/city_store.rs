//! JSON city file standing in for the external building store.
//!
//! The file is read once at startup and rewritten (write to `{path}.tmp`,
//! then rename) whenever the building list changes, so a crash mid-write
//! never leaves a truncated city behind.

use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use simulation::buildings::{Building, CityBuildings};

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "I/O error: {e}"),
            StoreError::Json(e) => write!(f, "Malformed city file: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityFile {
    #[serde(default)]
    pub buildings: Vec<Building>,
}

pub fn load_city(path: &Path) -> Result<CityFile, StoreError> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub fn save_city(path: &Path, city: &CityFile) -> Result<(), StoreError> {
    let data = serde_json::to_vec_pretty(city)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut tmp_path = path.as_os_str().to_owned();
    tmp_path.push(".tmp");
    let tmp_path = PathBuf::from(tmp_path);

    let mut file = File::create(&tmp_path)?;
    file.write_all(&data)?;
    file.sync_all()?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Where the city lives on disk and which list generation it last saw.
#[derive(Resource, Debug)]
pub struct CityStore {
    pub path: PathBuf,
    saved_generation: Option<u64>,
}

impl CityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            saved_generation: None,
        }
    }
}

/// Startup: replace the (empty) building list with the file's contents.
/// A missing file is a fresh city; a malformed one is logged and ignored.
pub fn load_city_on_startup(mut store: ResMut<CityStore>, mut city: ResMut<CityBuildings>) {
    match load_city(&store.path) {
        Ok(file) => {
            let total = file.buildings.len();
            let dropped = city.replace_all(file.buildings);
            info!(
                "Loaded {} buildings from {} ({} dropped)",
                total - dropped,
                store.path.display(),
                dropped
            );
        }
        Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("No city file at {}, starting empty", store.path.display());
        }
        Err(e) => {
            warn!("Could not load {}: {e}", store.path.display());
        }
    }
    store.saved_generation = Some(city.generation());
}

pub fn save_city_on_change(mut store: ResMut<CityStore>, city: Res<CityBuildings>) {
    if !city.is_changed() || store.saved_generation == Some(city.generation()) {
        return;
    }
    let file = CityFile {
        buildings: city.as_slice().to_vec(),
    };
    match save_city(&store.path, &file) {
        Ok(()) => debug!("Saved {} buildings to {}", city.len(), store.path.display()),
        Err(e) => warn!("Could not save {}: {e}", store.path.display()),
    }
    // A failed write is not retried until the list changes again.
    store.saved_generation = Some(city.generation());
}

pub struct CityStorePlugin {
    pub path: PathBuf,
}

impl Plugin for CityStorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(CityStore::new(self.path.clone()))
            .add_systems(Startup, load_city_on_startup)
            .add_systems(
                Update,
                save_city_on_change.after(simulation::SimulationUpdateSet::Commit),
            );
    }
}
