//! parametros del semaforo y de la simulacion

use crate::error::LightError;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Tiempos del hilo de fases.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    /// limite inferior del ciclo (ms)
    pub min_cycle_ms: u64,
    /// limite superior del ciclo (ms), inclusivo
    pub max_cycle_ms: u64,
    /// pausa entre vueltas del loop (ms)
    pub poll_interval_ms: u64,
    /// sortear una duracion nueva despues de cada cambio en vez de una sola al arrancar
    pub redraw_each_cycle: bool,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            min_cycle_ms: 4_000,
            max_cycle_ms: 6_000,
            poll_interval_ms: 1,
            redraw_each_cycle: false,
        }
    }
}

impl LightConfig {
    pub fn validate(&self) -> Result<(), LightError> {
        if self.min_cycle_ms == 0 {
            return Err(LightError::InvalidConfig("min_cycle_ms debe ser mayor que 0".into()));
        }
        if self.min_cycle_ms > self.max_cycle_ms {
            return Err(LightError::InvalidConfig(format!(
                "min_cycle_ms ({}) es mayor que max_cycle_ms ({})",
                self.min_cycle_ms, self.max_cycle_ms
            )));
        }
        if self.poll_interval_ms == 0 {
            return Err(LightError::InvalidConfig("poll_interval_ms debe ser mayor que 0".into()));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Diseño de una corrida de la simulacion
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub lights: u32,
    pub waiters_per_light: u32,
    pub run_secs: u64,
    pub light: LightConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            lights: 1,
            waiters_per_light: 2,
            run_secs: 15,
            light: LightConfig::default(),
        }
    }
}

impl SimConfig {
    /// Lee la configuracion de un archivo JSON; los campos ausentes toman el valor por defecto.
    pub fn from_file(path: &Path) -> Result<Self, LightError> {
        let text = fs::read_to_string(path).map_err(|source| LightError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SimConfig = serde_json::from_str(&text).map_err(|source| LightError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LightError> {
        if self.lights == 0 {
            return Err(LightError::InvalidConfig("se necesita al menos un semaforo".into()));
        }
        self.light.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_light_config() {
        let config = LightConfig::default();
        assert_eq!(config.min_cycle_ms, 4_000);
        assert_eq!(config.max_cycle_ms, 6_000);
        assert_eq!(config.poll_interval_ms, 1);
        assert!(!config.redraw_each_cycle);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let config = LightConfig { min_cycle_ms: 10, max_cycle_ms: 5, ..Default::default() };
        assert!(matches!(config.validate(), Err(LightError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_zero_poll() {
        let config = LightConfig { poll_interval_ms: 0, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SimConfig =
            serde_json::from_str(r#"{ "lights": 3, "light": { "min_cycle_ms": 100, "max_cycle_ms": 200 } }"#)
                .unwrap();
        assert_eq!(config.lights, 3);
        assert_eq!(config.waiters_per_light, 2);
        assert_eq!(config.light.min_cycle_ms, 100);
        assert_eq!(config.light.poll_interval_ms, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_missing() {
        let err = SimConfig::from_file(Path::new("/no/existe/sim.json")).unwrap_err();
        assert!(matches!(err, LightError::ConfigIo { .. }));
    }
}
