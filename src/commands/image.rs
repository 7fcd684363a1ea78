//! Image Commands

use serde::Serialize;

use super::call;

#[derive(Serialize)]
struct UploadImageArgs<'a> {
    name: &'a str,
    #[serde(rename = "dataUrl")]
    data_url: &'a str,
}

/// Store a photo and return the URI the webview can load it from
pub async fn upload_image(name: &str, data_url: &str) -> Result<String, String> {
    let js_args = serde_wasm_bindgen::to_value(&UploadImageArgs { name, data_url })
        .map_err(|e| format!("Failed to serialize args: {}", e))?;
    call("upload_image", js_args).await
}
