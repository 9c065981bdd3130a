//! Photo picker
//!
//! Native file picker for the student photo.

use dioxus::prelude::*;
use ktm_core::PhotoAttachment;
use rfd::FileDialog;

/// Button that opens a file picker and hands back the chosen photo
///
/// # Examples
///
/// ```rust,ignore
/// rsx! {
///     PhotoPicker {
///         on_pick: move |photo| form.write().attach_photo(photo),
///     }
/// }
/// ```
#[component]
pub fn PhotoPicker(
    /// Called with the chosen file
    on_pick: EventHandler<PhotoAttachment>,
    #[props(default = "Pilih Foto".to_string())]
    label: String,
) -> Element {
    let mut picking = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let handle_pick = move |_| {
        picking.set(true);
        error.set(None);

        spawn(async move {
            // Picker and file read both block
            let picked = tokio::task::spawn_blocking(move || {
                FileDialog::new()
                    .add_filter("images", &["png", "jpg", "jpeg", "webp"])
                    .set_title("Pilih Foto")
                    .pick_file()
                    .map(PhotoAttachment::from_path)
            })
            .await;

            match picked {
                Ok(Some(Ok(photo))) => {
                    tracing::debug!(file = %photo.file_name, "Photo selected");
                    on_pick.call(photo);
                }
                Ok(Some(Err(e))) => {
                    error.set(Some(format!("Gagal membaca foto: {}", e)));
                }
                Ok(None) => {
                    // Cancelled
                }
                Err(e) => {
                    error.set(Some(format!("File picker error: {}", e)));
                }
            }
            picking.set(false);
        });
    };

    rsx! {
        div { class: "photo-picker",
            button {
                class: "btn-secondary photo-picker-btn",
                r#type: "button",
                onclick: handle_pick,
                disabled: picking(),
                if picking() { "Memilih..." } else { "{label}" }
            }

            if let Some(err) = error() {
                div { class: "photo-picker__error", "⚠️ {err}" }
            }
        }
    }
}
