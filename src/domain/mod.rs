// Domain layer: project model and the ports to the identity service.

pub mod model;
pub mod ports;
