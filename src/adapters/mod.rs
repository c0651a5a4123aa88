// Adapters layer: concrete implementations for external systems (generation service, output sinks).

pub mod gemini;
pub mod output;
