//! broadcast de mensajes: una cola por suscriptor
//! cada suscriptor ve todos los mensajes publicados despues de suscribirse

use crate::queue::MessageQueue;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;

/// Publicador que copia cada mensaje a todas las suscripciones vivas.
///
/// Las suscripciones se guardan como `Weak`, asi que soltar una
/// `Subscription` basta para darse de baja; la limpieza ocurre en el
/// siguiente `publish`.
pub struct PhaseBroadcast<T> {
    subscribers: Mutex<Vec<Weak<MessageQueue<T>>>>,
}

impl<T: Clone> PhaseBroadcast<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn subscribe(&self) -> Subscription<T> {
        let queue = Arc::new(MessageQueue::new());
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::downgrade(&queue));
        Subscription { queue }
    }

    /// Entrega una copia a cada suscriptor vivo. Devuelve cuantos la recibieron.
    pub fn publish(&self, msg: T) -> usize {
        let mut subs = self.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
        let mut delivered = 0;
        subs.retain(|weak| match weak.upgrade() {
            Some(queue) => {
                queue.send(msg.clone());
                delivered += 1;
                true
            }
            None => false,
        });
        delivered
    }

    /// Suscripciones todavia vivas.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }
}

impl<T: Clone> Default for PhaseBroadcast<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Lado receptor de un `PhaseBroadcast`.
pub struct Subscription<T> {
    queue: Arc<MessageQueue<T>>,
}

impl<T> Subscription<T> {
    pub fn recv(&self) -> T {
        self.queue.receive()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<T> {
        self.queue.receive_timeout(timeout)
    }

    pub fn try_recv(&self) -> Option<T> {
        self.queue.try_receive()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}
