// Application layer: wires a message source, the handler and a matrix device together.

pub mod pipeline;
