// src/services/mod.rs
pub mod catalog;
pub mod classifier;
pub mod completion;
pub mod composer;
pub mod guide;
pub mod lookup;
pub mod session_manager;
pub mod transcript;
