//! Health Rules & Thresholds
//!
//! Bounds for the condition tiers and anomaly bands.
//! Constants only; the lookups live in `analyzer`.

// ============================================================================
// MACHINE CONDITION
// ============================================================================

/// Safe requires average temperature strictly below this
pub const SAFE_TEMPERATURE_MAX: f64 = 80.0;

/// Safe requires average vibration strictly below this
pub const SAFE_VIBRATION_MAX: f64 = 1.8;

/// Maintain requires average temperature strictly below this
pub const MAINTAIN_TEMPERATURE_MAX: f64 = 100.0;

/// Maintain requires average vibration strictly below this
pub const MAINTAIN_VIBRATION_MAX: f64 = 2.8;

// ============================================================================
// TEMPERATURE BANDS (lower bounds, inclusive)
// ============================================================================

pub const MODERATE_OVERHEATING_FROM: f64 = 80.0;
pub const SIGNIFICANT_OVERHEATING_FROM: f64 = 100.0;
pub const CRITICAL_OVERHEATING_FROM: f64 = 120.0;

// ============================================================================
// VIBRATION BANDS (lower bounds, inclusive)
// ============================================================================

pub const UNBALANCE_FROM: f64 = 1.8;
pub const MISALIGNMENT_FROM: f64 = 2.8;
pub const LOOSENESS_FROM: f64 = 4.5;
pub const BEARING_FAULT_FROM: f64 = 7.1;
