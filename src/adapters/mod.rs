// Adapters layer: concrete implementations for external systems (stream, serial device, replay).

pub mod payload;
pub mod replay;
pub mod serial;
pub mod simulator;
pub mod twitter;
