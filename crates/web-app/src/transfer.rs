//! Best-effort delivery of an exported data set to the user.
//!
//! The clipboard is preferred. When clipboard access fails, e.g. because the
//! document is not focused or the permission was denied, the export is
//! offered as a file download instead.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

#[allow(clippy::missing_errors_doc)]
pub async fn deliver_export(file_name: &str, content: &str) -> Result<(), String> {
    if copy_to_clipboard(content).await.is_ok() {
        return Ok(());
    }
    download_file(file_name, content)
}

async fn copy_to_clipboard(content: &str) -> Result<(), String> {
    let Some(window) = web_sys::window() else {
        return Err("failed to get window".to_string());
    };
    JsFuture::from(window.navigator().clipboard().write_text(content))
        .await
        .map(|_| ())
        .map_err(|err| format!("failed to write to clipboard: {err:?}"))
}

fn download_file(file_name: &str, content: &str) -> Result<(), String> {
    let blob = web_sys::Blob::new_with_str_sequence(&js_sys::Array::of1(&JsValue::from_str(
        content,
    )))
    .map_err(|err| format!("failed to create blob: {err:?}"))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|err| format!("failed to create object URL: {err:?}"))?;
    let element = gloo_utils::document()
        .create_element("a")
        .map_err(|err| format!("failed to create anchor element: {err:?}"))?;
    let Ok(anchor) = element.dyn_into::<web_sys::HtmlAnchorElement>() else {
        return Err("failed to create anchor element".to_string());
    };
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();
    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}
