//! lightsync: primitivas de hilos del sistema
//! cola bloqueante, broadcast por suscriptor, stop token, workers y ids

pub mod queue;
pub mod broadcast;
pub mod cancel;
pub mod workers;
pub mod ids;
pub mod error;

pub use queue::MessageQueue;
pub use broadcast::{PhaseBroadcast, Subscription};
pub use cancel::StopToken;
pub use workers::WorkerSet;
pub use ids::{global_ids, IdGenerator};
pub use error::SyncError;
