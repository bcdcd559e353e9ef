// Domain layer: the conversion job model and the ports the engine drives.

pub mod model;
pub mod ports;
