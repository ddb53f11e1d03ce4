// trafficlight/src/log.rs
// instala el subscriber de tracing para el binario. la libreria solo emite eventos.

use tracing_subscriber::EnvFilter;

/// Filtro por `RUST_LOG`; si no esta definido usa `info` o `debug` con `verbose`.
pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // try_init: en tests puede haber un subscriber instalado
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .try_init();
}
