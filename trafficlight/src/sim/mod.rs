// Sistema de simulacion: semaforos con hilos que esperan el verde

use crate::config::SimConfig;
use crate::error::LightError;
use crate::light::TrafficLight;
use crate::model::TrafficLightPhase;
use lightsync::WorkerSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

// cada cuanto un hilo que espera revisa si la corrida termino
const WAITER_POLL: Duration = Duration::from_millis(200);
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Resultado de una corrida.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimReport {
    pub lights: u32,
    /// verdes vistos sumando todos los hilos que esperan
    pub greens_observed: u64,
    /// (id del semaforo, fase al terminar)
    pub final_phases: Vec<(u32, TrafficLightPhase)>,
}

/// Corre la simulacion completa y la apaga con joins acotados.
pub fn run(config: &SimConfig) -> Result<SimReport, LightError> {
    config.validate()?;
    info!(
        lights = config.lights,
        waiters = config.waiters_per_light,
        run_secs = config.run_secs,
        "iniciando simulacion"
    );

    let mut lights = Vec::with_capacity(config.lights as usize);
    for _ in 0..config.lights {
        let light = TrafficLight::new(config.light.clone())?;
        light.simulate()?;
        lights.push(light);
    }

    let greens = Arc::new(AtomicU64::new(0));
    let waiters = WorkerSet::new("sim-waiters");
    for light in &lights {
        for n in 0..config.waiters_per_light {
            let watcher = light.subscribe();
            let greens = greens.clone();
            waiters.spawn(format!("espera-{}-{}", light.id(), n), move |stop| {
                while !stop.is_cancelled() {
                    if watcher.wait_for_green_timeout(WAITER_POLL).is_ok() {
                        greens.fetch_add(1, Ordering::Relaxed);
                        info!(light_id = watcher.light_id(), waiter = n, "verde, el vehiculo pasa");
                    }
                }
            })?;
        }
    }

    thread::sleep(Duration::from_secs(config.run_secs));

    debug!("deteniendo hilos de espera");
    waiters.shutdown_timeout(WAITER_POLL + SHUTDOWN_GRACE)?;

    let mut final_phases = Vec::with_capacity(lights.len());
    for light in &lights {
        light.shutdown_timeout(config.light.poll_interval() + SHUTDOWN_GRACE)?;
        final_phases.push((light.id(), light.current_phase()));
    }

    let report = SimReport {
        lights: config.lights,
        greens_observed: greens.load(Ordering::Relaxed),
        final_phases,
    };
    info!(greens = report.greens_observed, "simulacion finalizada");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LightConfig;

    #[test]
    fn test_short_run_reports_every_light() {
        let config = SimConfig {
            lights: 2,
            waiters_per_light: 2,
            run_secs: 1,
            light: LightConfig { min_cycle_ms: 20, max_cycle_ms: 40, ..Default::default() },
        };
        let report = run(&config).unwrap();
        assert_eq!(report.lights, 2);
        assert_eq!(report.final_phases.len(), 2);
        // cada hilo que espera ve todos los verdes de su semaforo
        assert!(report.greens_observed >= 4, "verdes: {}", report.greens_observed);
    }

    #[test]
    fn test_rejects_zero_lights() {
        let config = SimConfig { lights: 0, ..Default::default() };
        assert!(matches!(run(&config), Err(LightError::InvalidConfig(_))));
    }
}
