pub mod clock;
pub mod subscribers;
