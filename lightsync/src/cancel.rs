//! bandera de parada compartida entre el dueño y sus workers

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Token de cancelacion. Clonarlo es barato (incrementa un Arc).
///
/// Los loops de fondo lo revisan en cada vuelta; el dueño llama `cancel`
/// antes de hacer join para que el join termine.
#[derive(Clone, Debug, Default)]
pub struct StopToken {
    cancelled: Arc<AtomicBool>,
}

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
