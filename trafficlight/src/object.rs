//! objeto de trafico base: id, tipo, posicion y sus hilos de fondo

use crate::model::{ObjectType, Position};
use lightsync::{IdGenerator, StopToken, SyncError, WorkerSet};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Base comun de los objetos de la simulacion.
///
/// Cada objeto recibe un id unico al construirse y es dueño exclusivo de
/// los hilos que lanza. Al destruirse el `WorkerSet` cancela y une todos
/// esos hilos antes de liberar el resto del estado.
pub struct TrafficObject {
    id: u32,
    object_type: ObjectType,
    position: Mutex<Position>,
    workers: WorkerSet,
}

impl TrafficObject {
    /// Falla solo si el generador ya entrego su ultimo id.
    pub fn new(object_type: ObjectType, ids: &IdGenerator) -> Result<Self, SyncError> {
        let id = ids.next_id()?;
        Ok(Self {
            id,
            object_type,
            position: Mutex::new(Position::default()),
            workers: WorkerSet::new(format!("{:?}#{}", object_type, id)),
        })
    }

    pub fn id(&self) -> u32 { self.id }

    pub fn object_type(&self) -> ObjectType { self.object_type }

    pub fn set_position(&self, x: f64, y: f64) {
        let mut pos = self.position.lock().unwrap_or_else(PoisonError::into_inner);
        *pos = Position::new(x, y);
    }

    pub fn position(&self) -> Position {
        *self.position.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lanza un hilo de fondo ligado a la vida de este objeto.
    pub fn spawn_worker<F>(&self, name: impl Into<String>, f: F) -> Result<(), SyncError>
    where
        F: FnOnce(StopToken) + Send + 'static,
    {
        self.workers.spawn(name, f)
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    pub fn running_workers(&self) -> usize {
        self.workers.running()
    }

    pub fn shutdown(&self) -> Result<(), SyncError> {
        self.workers.shutdown()
    }

    pub fn shutdown_timeout(&self, timeout: Duration) -> Result<(), SyncError> {
        self.workers.shutdown_timeout(timeout)
    }
}
