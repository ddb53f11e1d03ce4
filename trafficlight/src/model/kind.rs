// tipo de objeto de trafico

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ObjectType {
    #[default]
    NoObject,
    TrafficLight,
}
