pub mod config;
pub mod units;
pub mod validation;

#[cfg(target_arch = "wasm32")]
pub mod wasm;
