pub mod offset;
pub mod progress;
pub mod spy;
