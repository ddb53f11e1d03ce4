//! errores de las primitivas de hilos

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    /// el sistema operativo no pudo crear el hilo
    #[error("no se pudo lanzar el worker '{name}': {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// el worker termino con panic; el join se hizo igual
    #[error("el worker '{name}' termino con panic")]
    WorkerPanicked { name: String },

    /// quedaron workers vivos al vencer el plazo del join
    #[error("{pending} worker(s) siguen vivos tras esperar {waited_ms}ms")]
    JoinTimeout { pending: usize, waited_ms: u64 },

    /// el generador llego al ultimo id representable
    #[error("ids agotados: el generador llego a {last}")]
    IdsExhausted { last: u32 },

    #[error("no llego ningun mensaje en {waited_ms}ms")]
    ReceiveTimeout { waited_ms: u64 },
}
