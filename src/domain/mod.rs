// Domain layer: wire models and the ports the shell talks through.

pub mod model;
pub mod ports;
