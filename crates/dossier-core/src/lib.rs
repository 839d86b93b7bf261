//! Dossier Core Library
//!
//! This crate provides the domain models and configuration shared across the
//! Dossier upload components.

pub mod config;
pub mod models;

// Re-export commonly used types
pub use config::UploadConfig;
pub use models::{
    BatchFile, FileDescriptor, IntentMatch, UploadIntent, UploadState, UploadStatus,
};
