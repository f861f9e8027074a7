pub mod phase;
pub mod scheduler;
pub mod timer;
