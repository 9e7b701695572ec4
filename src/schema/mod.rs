pub mod behavior;
pub mod speech;
pub mod traits;
pub mod trigger;
