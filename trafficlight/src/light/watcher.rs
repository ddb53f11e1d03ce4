// espera bloqueante hasta ver verde

use crate::error::LightError;
use crate::model::TrafficLightPhase;
use lightsync::{Subscription, SyncError};
use std::time::{Duration, Instant};
use tracing::trace;

// descarta todo lo que no sea verde
pub(crate) fn drain_until_green(light_id: u32, mut recv: impl FnMut() -> TrafficLightPhase) {
    loop {
        let phase = recv();
        trace!(light_id, %phase, "fase recibida");
        if phase.is_green() {
            return;
        }
    }
}

pub(crate) fn drain_until_green_timeout(
    light_id: u32,
    timeout: Duration,
    mut recv: impl FnMut(Duration) -> Option<TrafficLightPhase>,
) -> Result<(), LightError> {
    let start = Instant::now();
    loop {
        let remaining = timeout.saturating_sub(start.elapsed());
        match recv(remaining) {
            Some(phase) if phase.is_green() => return Ok(()),
            Some(phase) => trace!(light_id, %phase, "fase recibida"),
            None => {
                return Err(SyncError::ReceiveTimeout {
                    waited_ms: start.elapsed().as_millis() as u64,
                }
                .into())
            }
        }
    }
}

/// Suscripcion propia a los cambios de un semaforo.
///
/// A diferencia de `TrafficLight::wait_for_green`, que compite con los
/// demas por la misma cola, cada `PhaseWatcher` recibe todos los cambios
/// publicados desde que se creo.
pub struct PhaseWatcher {
    light_id: u32,
    sub: Subscription<TrafficLightPhase>,
}

impl PhaseWatcher {
    pub(crate) fn new(light_id: u32, sub: Subscription<TrafficLightPhase>) -> Self {
        Self { light_id, sub }
    }

    pub fn light_id(&self) -> u32 {
        self.light_id
    }

    /// Bloquea hasta el proximo cambio de fase.
    pub fn next_phase(&self) -> TrafficLightPhase {
        self.sub.recv()
    }

    pub fn next_phase_timeout(&self, timeout: Duration) -> Option<TrafficLightPhase> {
        self.sub.recv_timeout(timeout)
    }

    pub fn try_next_phase(&self) -> Option<TrafficLightPhase> {
        self.sub.try_recv()
    }

    pub fn wait_for_green(&self) {
        drain_until_green(self.light_id, || self.sub.recv());
    }

    pub fn wait_for_green_timeout(&self, timeout: Duration) -> Result<(), LightError> {
        drain_until_green_timeout(self.light_id, timeout, |d| self.sub.recv_timeout(d))
    }
}
