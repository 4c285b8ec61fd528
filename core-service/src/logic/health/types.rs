//! Health Types
//!
//! Diagnosis labels and the health report.
//! Data structures only.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::constants::{TEMPERATURE_ONE, TEMPERATURE_TWO, VIBRATION_X, VIBRATION_Y, VIBRATION_Z};
use crate::error::{PipelineError, PipelineResult};
use crate::logic::pipeline::ModeValues;

// ============================================================================
// LABELS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MachineCondition {
    #[serde(rename = "Safe Condition")]
    Safe,
    #[serde(rename = "Maintain Condition")]
    Maintain,
    #[serde(rename = "Repair Condition")]
    Repair,
}

impl MachineCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            MachineCondition::Safe => "Safe Condition",
            MachineCondition::Maintain => "Maintain Condition",
            MachineCondition::Repair => "Repair Condition",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureAnomaly {
    #[serde(rename = "No significant temperature anomaly detected")]
    None,
    #[serde(rename = "Moderate Overheating - Check Lubrication")]
    ModerateOverheating,
    #[serde(rename = "Significant Overheating - Possible Misalignment or Bearing Wear")]
    SignificantOverheating,
    #[serde(rename = "Critical Overheating - Immediate Repair Needed")]
    CriticalOverheating,
}

impl TemperatureAnomaly {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureAnomaly::None => "No significant temperature anomaly detected",
            TemperatureAnomaly::ModerateOverheating => "Moderate Overheating - Check Lubrication",
            TemperatureAnomaly::SignificantOverheating => {
                "Significant Overheating - Possible Misalignment or Bearing Wear"
            }
            TemperatureAnomaly::CriticalOverheating => "Critical Overheating - Immediate Repair Needed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VibrationAnomaly {
    #[serde(rename = "No significant vibration anomaly detected")]
    None,
    #[serde(rename = "Unbalance Fault")]
    Unbalance,
    #[serde(rename = "Misalignment Fault")]
    Misalignment,
    #[serde(rename = "Looseness Fault")]
    Looseness,
    #[serde(rename = "Bearing Fault or Gear Mesh Fault")]
    BearingOrGearMesh,
}

impl VibrationAnomaly {
    pub fn as_str(&self) -> &'static str {
        match self {
            VibrationAnomaly::None => "No significant vibration anomaly detected",
            VibrationAnomaly::Unbalance => "Unbalance Fault",
            VibrationAnomaly::Misalignment => "Misalignment Fault",
            VibrationAnomaly::Looseness => "Looseness Fault",
            VibrationAnomaly::BearingOrGearMesh => "Bearing Fault or Gear Mesh Fault",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallHealth {
    Healthy,
    Unhealthy,
}

impl std::fmt::Display for MachineCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// INPUTS & REPORT
// ============================================================================

/// Mode values the analyzer reads
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthInputs {
    pub temperature_one: f64,
    pub temperature_two: f64,
    pub vibration_x: f64,
    pub vibration_y: f64,
    pub vibration_z: f64,
}

impl HealthInputs {
    pub fn from_modes(modes: &ModeValues) -> PipelineResult<Self> {
        let get = |name: &str| {
            modes
                .get(name)
                .copied()
                .ok_or_else(|| PipelineError::Internal(format!("no mode value for '{}'", name)))
        };

        Ok(Self {
            temperature_one: get(TEMPERATURE_ONE)?,
            temperature_two: get(TEMPERATURE_TWO)?,
            vibration_x: get(VIBRATION_X)?,
            vibration_y: get(VIBRATION_Y)?,
            vibration_z: get(VIBRATION_Z)?,
        })
    }

    pub fn avg_temperature(&self) -> f64 {
        (self.temperature_one + self.temperature_two) / 2.0
    }

    pub fn avg_vibration(&self) -> f64 {
        (self.vibration_x + self.vibration_y + self.vibration_z) / 3.0
    }
}

/// Diagnosis for one batch. Field order matches the response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub machine_condition: MachineCondition,
    pub temperature_analysis: TemperatureAnomaly,
    pub vibration_analysis: VibrationAnomaly,
    pub timestamp: DateTime<Local>,
    pub overall_health: OverallHealth,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.overall_health == OverallHealth::Healthy
    }
}
