//! Adapter implementations for monitored site ports.

pub mod http;
pub mod memory;
pub mod postgres;

mod scripted;

pub use scripted::ScriptedProber;
