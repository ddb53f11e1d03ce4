// modulo raiz de trafficlight
// semaforo con hilo de fases, espera bloqueante y simulacion

pub mod model;
pub mod object;
pub mod light;
pub mod config;
pub mod error;
pub mod log;
pub mod sim;

// reexports comodos
pub use model::*;
pub use object::TrafficObject;
pub use light::{PhaseState, PhaseWatcher, TrafficLight};
pub use config::{LightConfig, SimConfig};
pub use error::LightError;
pub use sim::{run, SimReport};
