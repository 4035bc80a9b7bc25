/// Main configuration module.
///
/// Re-exports submodules for relay configuration.
pub mod relay;
