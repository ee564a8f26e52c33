//! # File Operations
//!
//! Native file picking for attachment fields, using the `rfd` crate.

use careadmin_core::FileUpload;
use rfd::AsyncFileDialog;

/// Image extensions offered first in the picker
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Show a file picker and read the chosen file
///
/// Returns `None` if the operator cancels.
pub async fn pick_upload(title: &str) -> Option<FileUpload> {
    let file = AsyncFileDialog::new()
        .set_title(title)
        .add_filter("Images", IMAGE_EXTENSIONS)
        .add_filter("All Files", &["*"])
        .pick_file()
        .await?;

    let name = file.file_name();
    let bytes = file.read().await;
    tracing::debug!(file = %name, size = bytes.len(), "Picked attachment");
    Some(FileUpload::new(name, bytes))
}
