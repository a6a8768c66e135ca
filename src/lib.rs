// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app;
pub mod countdown;
pub mod display;
pub mod platform;
pub mod runtime;
pub mod setup;
pub mod timefmt;
pub mod ui;
