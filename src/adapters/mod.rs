// Adapters layer: concrete implementations for external systems (LLM provider, HTTP server).

pub mod gateway;
pub mod http;
