// Domain layer: request models and ports (interfaces). No backend-specific dependencies.

pub mod model;
pub mod ports;
