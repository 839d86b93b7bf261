pub mod upload;
pub mod wire;

pub use upload::{BatchFile, FileDescriptor, IntentMatch, UploadIntent, UploadState, UploadStatus};
pub use wire::{
    DeleteDocumentRequest, DeleteDocumentResponse, SignedUrlEntry, SignedUrlRequestItem,
    SignedUrlsResponse,
};
