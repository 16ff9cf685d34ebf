// Domain layer: name values and the ports the batch engine talks through.

pub mod model;
pub mod ports;
