//! cola de mensajes bloqueante entre hilos
//! varios productores, cada mensaje lo recibe un solo consumidor

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Cola FIFO sin limite de capacidad con `receive` bloqueante.
///
/// `send` nunca bloquea al productor. `receive` duerme al hilo hasta que
/// haya un mensaje y lo saca de la cabeza; el mensaje se entrega una sola
/// vez, asi que si hay varios consumidores sobre la misma cola los mensajes
/// se reparten entre ellos.
pub struct MessageQueue<T> {
    queue: Mutex<VecDeque<T>>,
    available: Condvar,
}

impl<T> MessageQueue<T> {
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            available: Condvar::new(),
        }
    }

    // los datos de la cola siguen siendo validos aunque otro hilo haga panic con el lock
    fn lock(&self) -> MutexGuard<'_, VecDeque<T>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Agrega el mensaje al final y despierta a un receptor.
    pub fn send(&self, msg: T) {
        let mut q = self.lock();
        q.push_back(msg);
        self.available.notify_one();
    }

    /// Bloquea hasta que haya un mensaje y lo devuelve.
    pub fn receive(&self) -> T {
        let mut q = self.lock();
        // el predicado se revisa en cada despertar (despertares espurios)
        loop {
            if let Some(msg) = q.pop_front() {
                return msg;
            }
            q = self.available.wait(q).unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Igual que `receive` pero se rinde al pasar `timeout`.
    pub fn receive_timeout(&self, timeout: Duration) -> Option<T> {
        // un plazo que no cabe en Instant es lo mismo que esperar sin limite
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return Some(self.receive());
        };
        let mut q = self.lock();
        loop {
            if let Some(msg) = q.pop_front() {
                return Some(msg);
            }
            let now = Instant::now();
            if now >= deadline {
                return None;
            }
            let (guard, _) = self
                .available
                .wait_timeout(q, deadline - now)
                .unwrap_or_else(PoisonError::into_inner);
            q = guard;
        }
    }

    /// Saca la cabeza si existe, sin bloquear.
    pub fn try_receive(&self) -> Option<T> {
        self.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl<T> Default for MessageQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
