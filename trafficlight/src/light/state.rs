// estado de fase protegido por mutex

use crate::model::TrafficLightPhase;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Fase actual del semaforo. Toda lectura y escritura pasa por el lock.
#[derive(Debug, Default)]
pub struct PhaseState {
    current: Mutex<TrafficLightPhase>,
}

impl PhaseState {
    /// Arranca en rojo.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, TrafficLightPhase> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self) -> TrafficLightPhase {
        *self.lock()
    }

    pub fn set(&self, phase: TrafficLightPhase) {
        *self.lock() = phase;
    }

    /// Cambia rojo <-> verde bajo un solo lock y devuelve la fase nueva.
    pub fn toggle(&self) -> TrafficLightPhase {
        let mut current = self.lock();
        *current = current.toggled();
        *current
    }
}
