//! Heating-circuit heat balance.
//!
//! `Q = rho * V * cp * (T_flow - T_return)`, plus the inverse used to size a
//! flow temperature for a given building heat load.

use crate::error::{PlantError, PlantResult};
use chp_core::units::{
    Density, MassRate, Power, SpecificHeat, VolumeRate, jpkgk, kgpm3, kgps, w,
};

/// Heat transfer medium of the circuit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Medium {
    pub density: Density,
    pub cp: SpecificHeat,
}

impl Medium {
    pub fn new(density_kg_m3: f64, cp_j_kgk: f64) -> Self {
        Self {
            density: kgpm3(density_kg_m3),
            cp: jpkgk(cp_j_kgk),
        }
    }

    pub fn water() -> Self {
        Self::new(1000.0, 4184.0)
    }

    pub fn mass_rate(&self, volume_rate: VolumeRate) -> MassRate {
        kgps(self.density.value * volume_rate.value)
    }

    /// Heat capacity rate `m_dot * cp` (W/K).
    fn capacity_rate(&self, volume_rate: VolumeRate) -> f64 {
        self.mass_rate(volume_rate).value * self.cp.value
    }
}

impl Default for Medium {
    fn default() -> Self {
        Self::water()
    }
}

/// Thermal power delivered by the circuit.
///
/// # Errors
///
/// [`PlantError::NonPhysical`] unless the flow is hotter than the return.
pub fn heat_output(
    flow_temp: f64,
    return_temp: f64,
    volume_rate: VolumeRate,
    medium: &Medium,
) -> PlantResult<Power> {
    let delta_t = flow_temp - return_temp;
    if !(delta_t > 0.0) {
        return Err(PlantError::NonPhysical {
            what: "flow temperature must exceed return temperature",
        });
    }
    Ok(w(medium.capacity_rate(volume_rate) * delta_t))
}

/// Transmission heat load `UA * (T_in - T_out)`, never negative.
pub fn heat_load(ua_w_per_k: f64, indoor_setpoint: f64, outdoor_temp: f64) -> Power {
    w((ua_w_per_k * (indoor_setpoint - outdoor_temp)).max(0.0))
}

/// Flow temperature needed to carry `load` at the given volume rate.
pub fn flow_temp_for_load(
    load: Power,
    volume_rate: VolumeRate,
    return_temp: f64,
    medium: &Medium,
) -> PlantResult<f64> {
    if !(volume_rate.value > 0.0) {
        return Err(PlantError::NonPhysical {
            what: "volume rate must be positive",
        });
    }
    Ok(load.value / medium.capacity_rate(volume_rate) + return_temp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chp_core::units::{kw, m3ph};

    #[test]
    fn output_of_sample_circuit() {
        let q = heat_output(60.0, 40.0, m3ph(2.5), &Medium::water()).unwrap();
        let expected_w = 1000.0 * 2.5 / 3600.0 * 4184.0 * 20.0;
        assert!((q.value - expected_w).abs() < 1e-6);
        assert!((q.value / 1000.0 - 58.111).abs() < 1e-3);
    }

    #[test]
    fn output_requires_positive_spread() {
        assert!(matches!(
            heat_output(40.0, 40.0, m3ph(1.0), &Medium::water()),
            Err(PlantError::NonPhysical { .. })
        ));
        assert!(heat_output(35.0, 40.0, m3ph(1.0), &Medium::water()).is_err());
    }

    #[test]
    fn load_is_clipped_at_zero() {
        assert_eq!(heat_load(300.0, 20.0, 25.0).value, 0.0);
        assert!((heat_load(300.0, 20.0, 0.0).value - 6000.0).abs() < 1e-9);
    }

    #[test]
    fn flow_temp_for_hourly_load() {
        let medium = Medium::new(1000.0, 4180.0);
        let t = flow_temp_for_load(kw(6.0), m3ph(0.5), 30.0, &medium).unwrap();
        let m_dot = 0.5 * 1000.0 / 3600.0;
        assert!((t - (6000.0 / (m_dot * 4180.0) + 30.0)).abs() < 1e-9);
        assert!(flow_temp_for_load(kw(6.0), m3ph(0.0), 30.0, &medium).is_err());
    }

    #[test]
    fn water_stores_si_properties() {
        let water = Medium::water();
        assert_eq!(water.density.value, 1000.0);
        assert_eq!(water.cp.value, 4184.0);
        assert!((water.mass_rate(m3ph(3.6)).value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn output_and_inverse_agree() {
        let medium = Medium::water();
        let q = heat_output(55.0, 30.0, m3ph(1.2), &medium).unwrap();
        let t = flow_temp_for_load(q, m3ph(1.2), 30.0, &medium).unwrap();
        assert!((t - 55.0).abs() < 1e-9);
    }
}
