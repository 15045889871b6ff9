pub mod clock;
pub mod debounce;
pub mod telemetry;

pub use clock::*;
pub use debounce::Debouncer;
pub use telemetry::*;
