#[path = "builder/client_builder.rs"]
mod client_builder;

#[path = "builder/state.rs"]
mod state;

#[path = "builder/resilience.rs"]
mod resilience;

#[path = "builder/settings.rs"]
mod settings;

#[path = "builder/build.rs"]
mod build;

pub use client_builder::ClientBuilder;
