mod client;
mod columns;
mod session;
mod types;

pub use client::{ConvertBackend, HttpConvertClient};
pub use session::UploadSession;
pub use types::{
    ConversionMode, ConvertPayload, SelectedFile, SessionStatus, ACCEPTED_EXTENSIONS,
    ADVISED_MAX_BYTES,
};
