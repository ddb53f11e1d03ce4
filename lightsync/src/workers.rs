//! conjunto de hilos de fondo de un objeto
//! el dueño registra cada hilo que lanza y les hace join al destruirse

use crate::cancel::StopToken;
use crate::error::SyncError;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

// hilo registrado con el nombre que se le dio al lanzarlo
struct Worker {
    name: String,
    handle: JoinHandle<()>,
}

/// Hilos de fondo que pertenecen a un solo objeto.
///
/// Todos comparten un `StopToken`. `shutdown` cancela el token y hace join
/// a cada hilo en el orden en que se lanzaron; cada handle se une una sola
/// vez. `Drop` hace lo mismo, de modo que ningun hilo sobrevive al dueño.
pub struct WorkerSet {
    owner: String,
    stop: StopToken,
    workers: Mutex<Vec<Worker>>,
}

impl WorkerSet {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            stop: StopToken::new(),
            workers: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Worker>> {
        self.workers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lanza `f` en un hilo nuevo con nombre y guarda su handle.
    pub fn spawn<F>(&self, name: impl Into<String>, f: F) -> Result<(), SyncError>
    where
        F: FnOnce(StopToken) + Send + 'static,
    {
        let name = name.into();
        let token = self.stop.clone();
        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || f(token))
            .map_err(|source| SyncError::Spawn {
                name: name.clone(),
                source,
            })?;

        debug!(owner = %self.owner, worker = %name, "worker lanzado");
        self.lock().push(Worker { name, handle });
        Ok(())
    }

    /// Handles todavia sin join.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Hilos que siguen corriendo.
    pub fn running(&self) -> usize {
        self.lock().iter().filter(|w| !w.handle.is_finished()).count()
    }

    /// Cancela y hace join a todos en orden de insercion.
    ///
    /// Si algun worker hizo panic se sigue con el resto y se devuelve el
    /// primer error al final.
    pub fn shutdown(&self) -> Result<(), SyncError> {
        self.stop.cancel();
        // el lock se suelta antes de bloquear en los joins
        let workers = std::mem::take(&mut *self.lock());
        let mut first_err = None;
        for worker in workers {
            match worker.handle.join() {
                Ok(()) => debug!(owner = %self.owner, worker = %worker.name, "worker unido"),
                Err(_) => {
                    warn!(owner = %self.owner, worker = %worker.name, "worker termino con panic");
                    first_err.get_or_insert(SyncError::WorkerPanicked { name: worker.name });
                }
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Como `shutdown` pero sin esperar mas de `timeout`.
    ///
    /// Si vence el plazo los handles se conservan; un `shutdown` posterior
    /// (o el `Drop`) los une cuando terminen.
    pub fn shutdown_timeout(&self, timeout: Duration) -> Result<(), SyncError> {
        self.stop.cancel();
        let start = Instant::now();
        loop {
            let pending = self.running();
            if pending == 0 {
                return self.shutdown();
            }
            if start.elapsed() >= timeout {
                return Err(SyncError::JoinTimeout {
                    pending,
                    waited_ms: start.elapsed().as_millis() as u64,
                });
            }
            thread::sleep(Duration::from_millis(1));
        }
    }
}

impl Drop for WorkerSet {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!(owner = %self.owner, error = %e, "error al unir workers en drop");
        }
    }
}
