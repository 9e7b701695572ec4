pub mod behavior;
pub mod effects;
pub mod engine;
pub mod interaction;
pub mod openings;
pub mod scaler;
pub mod session;
pub mod speech;
pub mod trigger;
