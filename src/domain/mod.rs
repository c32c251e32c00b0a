// Domain layer: request/result models and the gateway port.

pub mod model;
pub mod ports;
