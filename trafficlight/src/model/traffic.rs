// estados del semaforo

use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TrafficLightPhase {
    #[default]
    Red,
    Green,
}

impl TrafficLightPhase {
    /// Siguiente fase: rojo pasa a verde y verde a rojo.
    pub fn toggled(self) -> Self {
        match self {
            TrafficLightPhase::Red => TrafficLightPhase::Green,
            TrafficLightPhase::Green => TrafficLightPhase::Red,
        }
    }

    pub fn is_green(self) -> bool {
        self == TrafficLightPhase::Green
    }
}

impl fmt::Display for TrafficLightPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrafficLightPhase::Red => write!(f, "rojo"),
            TrafficLightPhase::Green => write!(f, "verde"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_alternates() {
        let mut phase = TrafficLightPhase::default();
        assert_eq!(phase, TrafficLightPhase::Red);
        for n in 1..=6 {
            phase = phase.toggled();
            assert_eq!(phase.is_green(), n % 2 == 1);
        }
    }
}
