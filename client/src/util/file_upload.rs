//! Profile image file reading.
//!
//! The type and size checks run on the `File` metadata before any bytes are
//! read; only accepted files are loaded into a data URL.

#[cfg(test)]
#[path = "file_upload_test.rs"]
mod file_upload_test;

use session::ValidationError;
#[cfg(feature = "hydrate")]
use session::ProfileImage;

/// Browser `File.size` is a JS number; clamp into a byte count.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn size_in_bytes(size: f64) -> u64 {
    if size.is_finite() && size > 0.0 { size as u64 } else { 0 }
}

/// Check metadata reported by the browser for a picked file.
pub fn check_picked_file(mime: &str, size: f64) -> Result<(), ValidationError> {
    session::profile::check_profile_image(mime, size_in_bytes(size))
}

/// Validate `file` and read it as a data URL.
#[cfg(feature = "hydrate")]
pub async fn read_profile_image(file: web_sys::File) -> Result<ProfileImage, String> {
    use wasm_bindgen::JsCast as _;
    use wasm_bindgen::closure::Closure;

    let mime = file.type_();
    check_picked_file(&mime, file.size()).map_err(|e| e.to_string())?;

    let reader = web_sys::FileReader::new().map_err(|e| format!("{e:?}"))?;
    let (tx, rx) = futures::channel::oneshot::channel::<()>();
    let onload = Closure::once(move || {
        let _ = tx.send(());
    });
    reader.set_onloadend(Some(onload.as_ref().unchecked_ref()));
    reader.read_as_data_url(&file).map_err(|e| format!("{e:?}"))?;
    rx.await.map_err(|_| "file read was cancelled".to_owned())?;
    drop(onload);

    let data_url = reader
        .result()
        .ok()
        .and_then(|value| value.as_string())
        .ok_or_else(|| "could not read the selected file".to_owned())?;
    ProfileImage::new(&mime, size_in_bytes(file.size()), data_url).map_err(|e| e.to_string())
}
