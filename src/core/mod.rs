pub mod config;
pub mod constants;
pub mod debounce;
pub mod geo;
pub mod loader;
pub mod viewport;
