pub mod app;
pub mod catalog;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod fs_utils;
pub mod gallery;
pub mod gesture;
pub mod image_utils;
pub mod sampler;
pub mod saver;
pub mod store;
pub mod ui;
