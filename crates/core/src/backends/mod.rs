pub mod traits;

// Backend implementations
pub mod simulated;
