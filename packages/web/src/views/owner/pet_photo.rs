use api::PhotoUpload;
use dioxus::prelude::*;
use ui::components::{Button, Card, Loading, PhotoPicker};
use ui::{use_api, StatusAlert, StatusMessage};

use crate::views::shared::LoadError;
use crate::Route;

#[component]
pub fn PetPhoto(id: i64) -> Element {
    let api = use_api();
    let nav = use_navigator();
    let mut photo = use_signal(|| Option::<PhotoUpload>::None);
    let mut uploading = use_signal(|| false);
    let mut message = use_signal(|| Option::<StatusMessage>::None);

    let find_api = api.clone();
    let asset_api = api.clone();
    let pet = use_resource(move || {
        let api = find_api.clone();
        async move { api.find_pet(id).await }
    });

    let handle_upload = move |_| {
        let Some(upload) = photo() else {
            message.set(Some(StatusMessage::warning("Choose an image first.")));
            return;
        };
        let api = api.clone();
        spawn(async move {
            uploading.set(true);
            let result = api.upload_pet_photo(id, upload).await;
            uploading.set(false);
            match result {
                Ok(()) => {
                    nav.push(Route::OwnerPets {});
                }
                Err(e) => message.set(Some(StatusMessage::failed("Could not upload the photo", &e))),
            }
        });
    };

    let body = match &*pet.read() {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! { LoadError { what: "Could not load the pet", error: e.clone() } },
        Some(Ok(None)) => rsx! { p { class: "muted", "That pet does not exist." } },
        Some(Ok(Some(pet))) => {
            let current = pet.photo_url.as_deref().map(|f| asset_api.asset_url("pets", f));
            let name = pet.name.clone();
            rsx! {
                h2 { "{name}" }
                if let Some(src) = current {
                    img { class: "photo-preview", src: "{src}", alt: "{name}" }
                } else {
                    p { class: "muted", "No photo yet." }
                }
            }
        }
    };

    rsx! {
        Card {
            title: "Pet photo",
            StatusAlert { message }
            {body}
            PhotoPicker {
                id: "pet-photo",
                disabled: uploading(),
                on_pick: move |picked| photo.set(picked),
                on_error: move |msg| message.set(Some(msg)),
            }
            div {
                class: "form-actions",
                Button {
                    disabled: uploading() || photo.read().is_none(),
                    onclick: handle_upload,
                    if uploading() { "Uploading…" } else { "Upload" }
                }
                Link { class: "btn btn-outline", to: Route::OwnerPets {}, "Back" }
            }
        }
    }
}
