//! generador de ids unicos y crecientes

use crate::error::SyncError;
use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicU32, Ordering};

// generador global del proceso, nunca se reinicia
static GLOBAL_IDS: Lazy<IdGenerator> = Lazy::new(|| IdGenerator::starting_at(0));

/// Contador atomico de ids. Cada llamada a `next_id` devuelve un valor
/// estrictamente mayor que todos los anteriores del mismo generador.
///
/// El contador no da la vuelta: al llegar a `u32::MAX` las llamadas
/// siguientes fallan con `IdsExhausted` y ningun id se repite.
#[derive(Debug)]
pub struct IdGenerator {
    next: AtomicU32,
}

impl IdGenerator {
    pub fn starting_at(first: u32) -> Self {
        Self {
            next: AtomicU32::new(first),
        }
    }

    pub fn next_id(&self) -> Result<u32, SyncError> {
        self.next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1))
            .map_err(|last| SyncError::IdsExhausted { last })
    }

    /// Id que se entregaria en la proxima llamada.
    pub fn peek(&self) -> u32 {
        self.next.load(Ordering::Relaxed)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::starting_at(0)
    }
}

/// Generador compartido por todo el proceso.
pub fn global_ids() -> &'static IdGenerator {
    &GLOBAL_IDS
}
