//! Plant interlock chain.
//!
//! The status is decided first-match-wins over a fixed priority list:
//! fault, maintenance, thermal disinfection, main switch, operating window.

use chp_core::HourOfDay;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Start of the daily operating window (inclusive hour).
pub const OPERATING_WINDOW_START: u8 = 6;
/// End of the daily operating window (exclusive hour).
pub const OPERATING_WINDOW_END: u8 = 22;

/// Boolean plant signals feeding the interlock chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantSignals {
    pub fault: bool,
    pub main_switch_on: bool,
    pub maintenance_due: bool,
    pub thermal_disinfection_active: bool,
}

/// Result of an interlock evaluation, stamped with the evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlantStatus {
    Fault { at: NaiveTime },
    MaintenanceDue { at: NaiveTime },
    ThermalDisinfectionActive { at: NaiveTime },
    SwitchedOff { at: NaiveTime },
    OutsideOperatingWindow { at: NaiveTime },
    Running { at: NaiveTime },
}

impl PlantStatus {
    pub fn at(&self) -> NaiveTime {
        match *self {
            PlantStatus::Fault { at }
            | PlantStatus::MaintenanceDue { at }
            | PlantStatus::ThermalDisinfectionActive { at }
            | PlantStatus::SwitchedOff { at }
            | PlantStatus::OutsideOperatingWindow { at }
            | PlantStatus::Running { at } => at,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, PlantStatus::Running { .. })
    }

    /// Operator-facing reason text.
    pub fn reason(&self) -> &'static str {
        match self {
            PlantStatus::Fault { .. } => "CHP off: fault detected",
            PlantStatus::MaintenanceDue { .. } => "CHP off: maintenance required",
            PlantStatus::ThermalDisinfectionActive { .. } => {
                "CHP off: thermal disinfection active"
            }
            PlantStatus::SwitchedOff { .. } => "CHP off: main switch is off",
            PlantStatus::OutsideOperatingWindow { .. } => "CHP off: outside operating hours",
            PlantStatus::Running { .. } => "CHP on",
        }
    }
}

impl fmt::Display for PlantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.reason(), self.at().format("%H:%M:%S"))
    }
}

/// Evaluate the interlock chain at time `at`.
pub fn evaluate_status(signals: PlantSignals, at: NaiveTime) -> PlantStatus {
    let hour = HourOfDay::from(at);
    if signals.fault {
        PlantStatus::Fault { at }
    } else if signals.maintenance_due {
        PlantStatus::MaintenanceDue { at }
    } else if signals.thermal_disinfection_active {
        PlantStatus::ThermalDisinfectionActive { at }
    } else if !signals.main_switch_on {
        PlantStatus::SwitchedOff { at }
    } else if hour.in_window(OPERATING_WINDOW_START, OPERATING_WINDOW_END) {
        PlantStatus::Running { at }
    } else {
        PlantStatus::OutsideOperatingWindow { at }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn signals(fault: bool, main: bool, maint: bool, disinfect: bool) -> PlantSignals {
        PlantSignals {
            fault,
            main_switch_on: main,
            maintenance_due: maint,
            thermal_disinfection_active: disinfect,
        }
    }

    /// Straight-line reference for the priority chain.
    fn expected(s: PlantSignals, hour: u32) -> &'static str {
        if s.fault {
            "fault"
        } else if s.maintenance_due {
            "maint"
        } else if s.thermal_disinfection_active {
            "disinfect"
        } else if !s.main_switch_on {
            "off"
        } else if (6..22).contains(&hour) {
            "run"
        } else {
            "window"
        }
    }

    fn tag(status: PlantStatus) -> &'static str {
        match status {
            PlantStatus::Fault { .. } => "fault",
            PlantStatus::MaintenanceDue { .. } => "maint",
            PlantStatus::ThermalDisinfectionActive { .. } => "disinfect",
            PlantStatus::SwitchedOff { .. } => "off",
            PlantStatus::OutsideOperatingWindow { .. } => "window",
            PlantStatus::Running { .. } => "run",
        }
    }

    #[test]
    fn exhaustive_signal_table() {
        for bits in 0u8..16 {
            let s = signals(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0, bits & 8 != 0);
            for hour in [0, 5, 6, 10, 21, 22, 23] {
                let status = evaluate_status(s, at(hour));
                assert_eq!(tag(status), expected(s, hour), "signals={s:?} hour={hour}");
                assert_eq!(status.at(), at(hour));
            }
        }
    }

    #[test]
    fn fault_wins_over_everything() {
        let status = evaluate_status(signals(true, true, true, true), at(10));
        assert_eq!(status, PlantStatus::Fault { at: at(10) });
    }

    #[test]
    fn running_inside_window() {
        let status = evaluate_status(signals(false, true, false, false), at(10));
        assert!(status.is_running());
        assert_eq!(status.to_string(), "CHP on at 10:00:00");
    }

    #[test]
    fn window_edges() {
        let s = signals(false, true, false, false);
        assert!(evaluate_status(s, at(6)).is_running());
        assert!(!evaluate_status(s, at(22)).is_running());
        let late = NaiveTime::from_hms_opt(5, 59, 59).unwrap();
        assert_eq!(
            evaluate_status(s, late),
            PlantStatus::OutsideOperatingWindow { at: late }
        );
    }

    #[test]
    fn switched_off_ignores_time() {
        let s = signals(false, false, false, false);
        assert_eq!(
            evaluate_status(s, at(12)).reason(),
            "CHP off: main switch is off"
        );
    }
}
