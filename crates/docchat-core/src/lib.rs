pub mod event_bus;
pub mod orchestrator;
pub mod ports;
