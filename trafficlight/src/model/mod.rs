// reune las piezas del modelo

mod coord;
mod kind;
mod traffic;

pub use coord::Position;
pub use kind::ObjectType;
pub use traffic::TrafficLightPhase;
