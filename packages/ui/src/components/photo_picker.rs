//! Image file input that hands back a [`PhotoUpload`].

use api::PhotoUpload;
use dioxus::prelude::*;

use crate::status::StatusMessage;

#[component]
pub fn PhotoPicker(
    #[props(default)] id: String,
    #[props(default)] disabled: bool,
    /// `None` when the selection was cleared.
    on_pick: EventHandler<Option<PhotoUpload>>,
    /// Reading or validating the file failed.
    on_error: EventHandler<StatusMessage>,
) -> Element {
    let mut preview_name = use_signal(String::new);

    let onchange = move |evt: FormEvent| async move {
        let Some(file) = evt.files().into_iter().next() else {
            preview_name.set(String::new());
            on_pick.call(None);
            return;
        };
        let name = file.name();
        match file.read_bytes().await {
            Ok(bytes) => {
                let upload = PhotoUpload::new(name.clone(), bytes.to_vec());
                match upload.validate() {
                    Ok(()) => {
                        preview_name.set(name);
                        on_pick.call(Some(upload));
                    }
                    Err(e) => {
                        preview_name.set(String::new());
                        on_pick.call(None);
                        on_error.call(StatusMessage::warning(e.to_string()));
                    }
                }
            }
            Err(e) => {
                on_pick.call(None);
                on_error.call(StatusMessage::failed("Could not read the file", &e));
            }
        }
    };

    rsx! {
        div {
            class: "photo-picker",
            input {
                id: "{id}",
                class: "form-control",
                r#type: "file",
                accept: "image/*",
                disabled,
                onchange,
            }
            if !preview_name().is_empty() {
                small { class: "photo-picker-name", "{preview_name}" }
            }
        }
    }
}
