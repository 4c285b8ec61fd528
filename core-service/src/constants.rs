//! Central Configuration Constants
//!
//! Single source of truth for the standard model set and pipeline defaults.
//! To change which features a standard model consumes, only edit this file.

use std::time::Duration;

/// Maximum number of readings accepted in one batch
pub const MAX_BATCH_LEN: usize = 1800;

/// Default per-request deadline (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default location of the model manifest
pub const DEFAULT_MODELS_PATH: &str = "models/manifest.json";

/// Worker limit used when the host parallelism cannot be queried
pub const FALLBACK_WORKER_LIMIT: usize = 4;

// ============================================
// Standard models
// ============================================

pub const TEMPERATURE_MODEL: &str = "temperature";
pub const VIBRATION_MODEL: &str = "vibration";
pub const MAGNETIC_FLUX_MODEL: &str = "magnetic_flux";
pub const AUDIBLE_SOUND_MODEL: &str = "audible_sound";
pub const ULTRA_SOUND_MODEL: &str = "ultra_sound";

pub const TEMPERATURE_ONE: &str = "temperature_one";
pub const TEMPERATURE_TWO: &str = "temperature_two";
pub const VIBRATION_X: &str = "vibration_x";
pub const VIBRATION_Y: &str = "vibration_y";
pub const VIBRATION_Z: &str = "vibration_z";
pub const MAGNETIC_FLUX_X: &str = "magnetic_flux_x";
pub const MAGNETIC_FLUX_Y: &str = "magnetic_flux_y";
pub const MAGNETIC_FLUX_Z: &str = "magnetic_flux_z";
pub const AUDIBLE_SOUND: &str = "audible_sound";
pub const ULTRA_SOUND: &str = "ultra_sound";

pub const TEMPERATURE_FEATURES: &[&str] = &[TEMPERATURE_ONE, TEMPERATURE_TWO];
pub const VIBRATION_FEATURES: &[&str] = &[VIBRATION_X, VIBRATION_Y, VIBRATION_Z];
pub const MAGNETIC_FLUX_FEATURES: &[&str] = &[MAGNETIC_FLUX_X, MAGNETIC_FLUX_Y, MAGNETIC_FLUX_Z];
pub const AUDIBLE_SOUND_FEATURES: &[&str] = &[VIBRATION_X, VIBRATION_Y, VIBRATION_Z, AUDIBLE_SOUND];
pub const ULTRA_SOUND_FEATURES: &[&str] = &[VIBRATION_X, VIBRATION_Y, VIBRATION_Z, ULTRA_SOUND];

/// The five standard models, in registry order, with their ordered inputs
pub const STANDARD_MODELS: &[(&str, &[&str])] = &[
    (TEMPERATURE_MODEL, TEMPERATURE_FEATURES),
    (VIBRATION_MODEL, VIBRATION_FEATURES),
    (MAGNETIC_FLUX_MODEL, MAGNETIC_FLUX_FEATURES),
    (AUDIBLE_SOUND_MODEL, AUDIBLE_SOUND_FEATURES),
    (ULTRA_SOUND_MODEL, ULTRA_SOUND_FEATURES),
];

// ============================================
// Helper functions
// ============================================

/// Default size of the model worker pool
pub fn default_worker_limit() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(FALLBACK_WORKER_LIMIT)
}

/// Default per-request deadline
pub fn default_request_timeout() -> Duration {
    Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
}
