// semaforo: estado de fase, hilo de fases y esperas

mod cycle;
mod state;
mod watcher;

pub use state::PhaseState;
pub use watcher::PhaseWatcher;

use crate::config::LightConfig;
use crate::error::LightError;
use crate::model::{ObjectType, TrafficLightPhase};
use crate::object::TrafficObject;
use cycle::{cycle_through_phases, CycleContext};
use lightsync::{global_ids, IdGenerator, MessageQueue, PhaseBroadcast};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{info, warn};

// cuenta hilos de fases vivos; se descuenta al salir del hilo aunque haga panic
struct ActiveCycle(Arc<AtomicUsize>);

impl Drop for ActiveCycle {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Semaforo de dos fases con un hilo de fondo que lo alterna.
///
/// Arranca en rojo. `simulate` lanza el hilo de fases; cada cambio se manda
/// a la cola de espera (compartida por todos los que llaman
/// `wait_for_green`) y a cada `PhaseWatcher` suscrito. Destruir el semaforo
/// detiene y une todos sus hilos.
pub struct TrafficLight {
    object: TrafficObject,
    state: Arc<PhaseState>,
    queue: Arc<MessageQueue<TrafficLightPhase>>,
    broadcast: Arc<PhaseBroadcast<TrafficLightPhase>>,
    active_cycles: Arc<AtomicUsize>,
    // lo toman los hilos de fases al cambiar y el setter/simulate al revisar
    writer: Arc<Mutex<()>>,
    config: LightConfig,
}

impl TrafficLight {
    /// Crea un semaforo con un id del generador global del proceso.
    pub fn new(config: LightConfig) -> Result<Self, LightError> {
        Self::with_ids(config, global_ids())
    }

    pub fn with_ids(config: LightConfig, ids: &IdGenerator) -> Result<Self, LightError> {
        config.validate()?;
        Ok(Self {
            object: TrafficObject::new(ObjectType::TrafficLight, ids)?,
            state: Arc::new(PhaseState::new()),
            queue: Arc::new(MessageQueue::new()),
            broadcast: Arc::new(PhaseBroadcast::new()),
            active_cycles: Arc::new(AtomicUsize::new(0)),
            writer: Arc::new(Mutex::new(())),
            config,
        })
    }

    fn lock_writer(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn id(&self) -> u32 {
        self.object.id()
    }

    pub fn object(&self) -> &TrafficObject {
        &self.object
    }

    pub fn config(&self) -> &LightConfig {
        &self.config
    }

    /// Lanza un hilo de fases nuevo. Se puede llamar varias veces; todos los
    /// hilos comparten estado y cola.
    pub fn simulate(&self) -> Result<(), LightError> {
        let ctx = CycleContext {
            light_id: self.id(),
            state: self.state.clone(),
            queue: self.queue.clone(),
            broadcast: self.broadcast.clone(),
            writer: self.writer.clone(),
            config: self.config.clone(),
        };
        let name = format!("semaforo-{}-ciclo-{}", self.id(), self.object.worker_count());

        // un set_current_phase en curso termina antes de que el hilo cuente como activo
        let _writer = self.lock_writer();
        self.active_cycles.fetch_add(1, Ordering::AcqRel);
        let guard = ActiveCycle(self.active_cycles.clone());
        let spawned = self.object.spawn_worker(name, move |stop| {
            let _guard = guard;
            cycle_through_phases(ctx, stop);
        });
        // si el spawn falla el closure (y su guard) ya se soltaron
        spawned.map_err(LightError::from)
    }

    /// Hay al menos un hilo de fases corriendo.
    pub fn is_cycling(&self) -> bool {
        self.active_cycles.load(Ordering::Acquire) > 0
    }

    pub fn current_phase(&self) -> TrafficLightPhase {
        self.state.get()
    }

    /// Escritura directa de la fase; solo se permite sin hilo de fases activo.
    ///
    /// La revision y la escritura ocurren bajo el mismo lock que usa
    /// `simulate`, asi que un hilo de fases no puede arrancar entre ambas.
    pub fn set_current_phase(&self, phase: TrafficLightPhase) -> Result<(), LightError> {
        let _writer = self.lock_writer();
        if self.is_cycling() {
            return Err(LightError::BroadcasterActive { light_id: self.id() });
        }
        self.state.set(phase);
        Ok(())
    }

    /// Bloquea hasta sacar un verde de la cola compartida.
    ///
    /// Si varios hilos esperan sobre el mismo semaforo los cambios se
    /// reparten entre ellos; para ver todos los cambios usar `subscribe`.
    pub fn wait_for_green(&self) {
        watcher::drain_until_green(self.id(), || self.queue.receive());
    }

    pub fn wait_for_green_timeout(&self, timeout: Duration) -> Result<(), LightError> {
        watcher::drain_until_green_timeout(self.id(), timeout, |d| self.queue.receive_timeout(d))
    }

    /// Suscripcion independiente que recibe cada cambio desde ahora.
    pub fn subscribe(&self) -> PhaseWatcher {
        PhaseWatcher::new(self.id(), self.broadcast.subscribe())
    }

    /// Cambios en la cola compartida que nadie ha consumido.
    pub fn pending_phases(&self) -> usize {
        self.queue.len()
    }

    /// Detiene los hilos de fases y los une en orden.
    pub fn shutdown(&self) -> Result<(), LightError> {
        self.object.shutdown()?;
        info!(light_id = self.id(), "semaforo detenido");
        Ok(())
    }

    pub fn shutdown_timeout(&self, timeout: Duration) -> Result<(), LightError> {
        self.object.shutdown_timeout(timeout)?;
        info!(light_id = self.id(), "semaforo detenido");
        Ok(())
    }
}

impl Drop for TrafficLight {
    fn drop(&mut self) {
        // los hilos se unen antes de soltar estado, cola y broadcast
        if let Err(e) = self.object.shutdown() {
            warn!(light_id = self.id(), error = %e, "error al detener el semaforo");
        }
    }
}
