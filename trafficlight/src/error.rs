//! errores del semaforo y de la simulacion

use lightsync::SyncError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LightError {
    /// escritura externa mientras un hilo de fases es dueño del estado
    #[error("el semaforo #{light_id} tiene un hilo de fases activo; la fase no se puede escribir desde afuera")]
    BroadcasterActive { light_id: u32 },

    #[error("configuracion invalida: {0}")]
    InvalidConfig(String),

    #[error("no se pudo leer la configuracion {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuracion mal formada en {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Sync(#[from] SyncError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LightError::BroadcasterActive { light_id: 3 };
        assert!(err.to_string().starts_with("el semaforo #3"));

        let err: LightError = SyncError::ReceiveTimeout { waited_ms: 10 }.into();
        assert_eq!(err.to_string(), "no llego ningun mensaje en 10ms");
    }
}
