//! Ollama chat backend adapter

pub mod gateway;

pub use gateway::OllamaGateway;
