//! Health Analyzer
//!
//! Pure lookups from averaged mode values to a diagnosis.
//! Same inputs always give the same report, apart from the timestamp.

use chrono::{DateTime, Local};

use super::rules::{
    BEARING_FAULT_FROM, CRITICAL_OVERHEATING_FROM, LOOSENESS_FROM, MAINTAIN_TEMPERATURE_MAX,
    MAINTAIN_VIBRATION_MAX, MISALIGNMENT_FROM, MODERATE_OVERHEATING_FROM, SAFE_TEMPERATURE_MAX,
    SAFE_VIBRATION_MAX, SIGNIFICANT_OVERHEATING_FROM, UNBALANCE_FROM,
};
use super::types::{
    HealthInputs, HealthReport, MachineCondition, OverallHealth, TemperatureAnomaly,
    VibrationAnomaly,
};

/// Analyze with the current wall-clock time
pub fn analyze(inputs: &HealthInputs) -> HealthReport {
    analyze_at(inputs, Local::now())
}

/// Analyze with an explicit evaluation time
pub fn analyze_at(inputs: &HealthInputs, timestamp: DateTime<Local>) -> HealthReport {
    let avg_temperature = inputs.avg_temperature();
    let avg_vibration = inputs.avg_vibration();

    let machine_condition = evaluate_condition(avg_temperature, avg_vibration);
    let overall_health = if machine_condition == MachineCondition::Safe {
        OverallHealth::Healthy
    } else {
        OverallHealth::Unhealthy
    };

    HealthReport {
        machine_condition,
        temperature_analysis: temperature_anomaly(avg_temperature),
        vibration_analysis: vibration_anomaly(avg_vibration),
        timestamp,
        overall_health,
    }
}

/// Both variables must satisfy a tier's bounds; they are never combined.
pub fn evaluate_condition(avg_temperature: f64, avg_vibration: f64) -> MachineCondition {
    if avg_temperature < SAFE_TEMPERATURE_MAX && avg_vibration < SAFE_VIBRATION_MAX {
        MachineCondition::Safe
    } else if avg_temperature < MAINTAIN_TEMPERATURE_MAX && avg_vibration < MAINTAIN_VIBRATION_MAX {
        MachineCondition::Maintain
    } else {
        MachineCondition::Repair
    }
}

pub fn temperature_anomaly(avg_temperature: f64) -> TemperatureAnomaly {
    if avg_temperature < MODERATE_OVERHEATING_FROM {
        TemperatureAnomaly::None
    } else if avg_temperature < SIGNIFICANT_OVERHEATING_FROM {
        TemperatureAnomaly::ModerateOverheating
    } else if avg_temperature < CRITICAL_OVERHEATING_FROM {
        TemperatureAnomaly::SignificantOverheating
    } else {
        TemperatureAnomaly::CriticalOverheating
    }
}

pub fn vibration_anomaly(avg_vibration: f64) -> VibrationAnomaly {
    if avg_vibration < UNBALANCE_FROM {
        VibrationAnomaly::None
    } else if avg_vibration < MISALIGNMENT_FROM {
        VibrationAnomaly::Unbalance
    } else if avg_vibration < LOOSENESS_FROM {
        VibrationAnomaly::Misalignment
    } else if avg_vibration < BEARING_FAULT_FROM {
        VibrationAnomaly::Looseness
    } else {
        VibrationAnomaly::BearingOrGearMesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(t1: f64, t2: f64, vibration: f64) -> HealthInputs {
        HealthInputs {
            temperature_one: t1,
            temperature_two: t2,
            vibration_x: vibration,
            vibration_y: vibration,
            vibration_z: vibration,
        }
    }

    #[test]
    fn test_safe_healthy_reading() {
        let report = analyze(&inputs(60.0, 70.0, 0.5));

        assert_eq!(report.machine_condition, MachineCondition::Safe);
        assert_eq!(report.overall_health, OverallHealth::Healthy);
        assert_eq!(report.temperature_analysis.as_str(), "No significant temperature anomaly detected");
        assert_eq!(report.vibration_analysis.as_str(), "No significant vibration anomaly detected");
        assert!(report.is_healthy());
    }

    #[test]
    fn test_safe_temperature_boundary() {
        assert_eq!(evaluate_condition(79.999, 1.0), MachineCondition::Safe);
        assert_ne!(evaluate_condition(80.0, 1.0), MachineCondition::Safe);
        assert_eq!(evaluate_condition(80.0, 1.0), MachineCondition::Maintain);
        assert_eq!(evaluate_condition(80.0, 2.8), MachineCondition::Repair);
        assert_eq!(temperature_anomaly(80.0), TemperatureAnomaly::ModerateOverheating);
    }

    #[test]
    fn test_tiers_require_both_bounds() {
        // Cool but shaking hard is not safe
        assert_eq!(evaluate_condition(20.0, 1.8), MachineCondition::Maintain);
        assert_eq!(evaluate_condition(20.0, 5.0), MachineCondition::Repair);
        assert_eq!(evaluate_condition(99.9, 0.1), MachineCondition::Maintain);
        assert_eq!(evaluate_condition(100.0, 0.1), MachineCondition::Repair);
    }

    #[test]
    fn test_temperature_bands() {
        assert_eq!(temperature_anomaly(79.9), TemperatureAnomaly::None);
        assert_eq!(temperature_anomaly(99.9), TemperatureAnomaly::ModerateOverheating);
        assert_eq!(temperature_anomaly(100.0), TemperatureAnomaly::SignificantOverheating);
        assert_eq!(temperature_anomaly(120.0), TemperatureAnomaly::CriticalOverheating);
    }

    #[test]
    fn test_vibration_bands() {
        assert_eq!(vibration_anomaly(1.79), VibrationAnomaly::None);
        assert_eq!(vibration_anomaly(1.8), VibrationAnomaly::Unbalance);
        assert_eq!(vibration_anomaly(2.8), VibrationAnomaly::Misalignment);
        assert_eq!(vibration_anomaly(4.5), VibrationAnomaly::Looseness);
        assert_eq!(vibration_anomaly(7.1), VibrationAnomaly::BearingOrGearMesh);
    }

    #[test]
    fn test_report_is_deterministic_apart_from_timestamp() {
        let at = Local::now();
        let input = inputs(90.0, 95.0, 2.0);
        assert_eq!(analyze_at(&input, at), analyze_at(&input, at));
        assert_eq!(analyze_at(&input, at).overall_health, OverallHealth::Unhealthy);
    }

    #[test]
    fn test_report_serializes_labels() {
        let report = analyze(&inputs(110.0, 110.0, 3.0));
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["machine_condition"], "Repair Condition");
        assert_eq!(
            value["temperature_analysis"],
            "Significant Overheating - Possible Misalignment or Bearing Wear"
        );
        assert_eq!(value["vibration_analysis"], "Misalignment Fault");
        assert_eq!(value["overall_health"], "Unhealthy");
        assert!(value["timestamp"].is_string());
    }
}
