// Domain layer: vacancy and statistics models plus the source port.

pub mod model;
pub mod ports;
