pub mod ease;
pub mod index;
pub mod props;
pub mod spring;
pub mod timeline;
