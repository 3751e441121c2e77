// Domain layer: puzzle grid model and ports (interfaces) for message sources and config.

pub mod model;
pub mod ports;
