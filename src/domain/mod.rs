// Domain layer: value types and ports (capabilities injected from the adapters layer).

pub mod model;
pub mod ports;
