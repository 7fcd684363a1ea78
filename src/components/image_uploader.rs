//! Image Uploader Component
//!
//! Photo picker for the draft. Files are checked for type and size before
//! they are read; previews use object URLs released when superseded.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement, Url};

use crate::context::{use_app_context, AppContext};
use crate::error::AppError;
use crate::image::{encode_image, validate_image};
use crate::store::AppStateStoreFields;

async fn read_bytes(file: &File) -> Result<Vec<u8>, AppError> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| AppError::Storage(format!("{:?}", e)))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

fn load_file(ctx: AppContext, file: File) {
    let media_type = file.type_();
    if let Err(e) = validate_image(&media_type, file.size() as u64) {
        ctx.report(e.into());
        return;
    }
    // Session the photo belongs to
    let key = ctx.store.editor().read_untracked().key().cloned();
    spawn_local(async move {
        let bytes = match read_bytes(&file).await {
            Ok(bytes) => bytes,
            Err(e) => {
                ctx.report(e);
                return;
            }
        };
        let encoded = match encode_image(&file.name(), &media_type, &bytes) {
            Ok(encoded) => encoded,
            Err(e) => {
                ctx.report(e.into());
                return;
            }
        };
        let preview = Url::create_object_url_with_blob(&file).unwrap_or_else(|_| encoded.data_url.clone());
        let released = ctx
            .store
            .editor()
            .write()
            .select_image(key.as_ref(), preview, encoded);
        if let Some(url) = released {
            let _ = Url::revoke_object_url(&url);
        }
    });
}

#[component]
pub fn ImageUploader() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;
    let src = Memo::new(move |_| {
        store
            .editor()
            .read()
            .draft()
            .image
            .display_src()
            .map(str::to_string)
    });

    let on_change = move |ev: web_sys::Event| {
        let Some(input) = ev.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) else {
            return;
        };
        let file = input.files().and_then(|files| files.get(0));
        // Allow picking the same file again
        input.set_value("");
        if let Some(file) = file {
            load_file(ctx, file);
        }
    };

    view! {
        <label class="image-uploader">
            {move || match src.get() {
                Some(src) => view! { <img class="image-preview" src=src alt="Foto do prato" /> }.into_any(),
                None => view! { <span class="image-placeholder">"+ Adicionar uma foto"</span> }.into_any(),
            }}
            <input type="file" accept="image/*" class="hidden-input" on:change=on_change />
        </label>
    }
}
