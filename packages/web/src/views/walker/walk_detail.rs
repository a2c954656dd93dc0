use api::{ApiError, PhotoUpload, Walk, WalkAction, WalkPhoto};
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Card, Loading, PhotoPicker};
use ui::{use_api, StatusAlert, StatusMessage};

use crate::views::shared::{LoadError, LocationList, PhotoGallery, WalkFacts};
use crate::Route;

async fn load(api: &api::ApiClient, id: i64) -> Result<(Walk, Vec<WalkPhoto>), ApiError> {
    let walk = api.walker_walk(id).await?;
    let photos = api.walk_photos(id).await.unwrap_or_else(|e| {
        tracing::warn!(walk = id, "could not load photos: {e}");
        Vec::new()
    });
    Ok((walk, photos))
}

#[component]
pub fn WalkerWalkDetail(id: i64) -> Element {
    let api = use_api();
    let mut message = use_signal(|| Option::<StatusMessage>::None);
    let mut busy = use_signal(|| false);

    let mut id_signal = use_signal(|| id);
    if *id_signal.peek() != id {
        id_signal.set(id);
    }

    let load_api = api.clone();
    let mut detail = use_resource(move || {
        let api = load_api.clone();
        let id = id_signal();
        async move { load(&api, id).await }
    });

    let transition = move |action: WalkAction| {
        if busy() {
            return;
        }
        let api = api.clone();
        spawn(async move {
            busy.set(true);
            let result = api.walk_transition(id, action).await;
            busy.set(false);
            match result {
                Ok(()) => {
                    let text = match action {
                        WalkAction::Start => "Walk started.",
                        WalkAction::End => "Walk finished.",
                        WalkAction::Accept => "Walk accepted.",
                        WalkAction::Reject => "Walk rejected.",
                    };
                    message.set(Some(StatusMessage::success(text)));
                    detail.restart();
                }
                Err(e) => message.set(Some(StatusMessage::failed("Could not update the walk", &e))),
            }
        });
    };

    rsx! {
        div {
            class: "page-header",
            h1 { "Walk #{id}" }
            Link { class: "btn btn-outline", to: Route::WalkerWalks {}, "All walks" }
        }
        StatusAlert { message }
        match &*detail.read() {
            None => rsx! { Loading {} },
            Some(Err(e)) => rsx! { LoadError { what: "Could not load the walk", error: e.clone() } },
            Some(Ok((walk, photos))) => {
                let status = walk.status;
                let accept = transition.clone();
                let reject = transition.clone();
                let start = transition.clone();
                let end = transition.clone();
                rsx! {
                    div {
                        class: "detail-grid",
                        Card {
                            title: "Details",
                            WalkFacts { walk: walk.clone() }
                            div {
                                class: "form-actions",
                                if status.can_respond() {
                                    Button {
                                        disabled: busy(),
                                        onclick: move |_| accept(WalkAction::Accept),
                                        "Accept"
                                    }
                                    Button {
                                        variant: ButtonVariant::Destructive,
                                        disabled: busy(),
                                        onclick: move |_| reject(WalkAction::Reject),
                                        "Reject"
                                    }
                                }
                                if status.can_start() {
                                    Button {
                                        disabled: busy(),
                                        onclick: move |_| start(WalkAction::Start),
                                        "Start walk"
                                    }
                                } else if status.can_end() {
                                    Button {
                                        variant: ButtonVariant::Secondary,
                                        disabled: busy(),
                                        onclick: move |_| end(WalkAction::End),
                                        "End walk"
                                    }
                                }
                            }
                        }
                        Card {
                            title: "Route",
                            LocationList { locations: walk.locations.clone() }
                        }
                        Card {
                            title: "Photos",
                            PhotoGallery { photos: photos.clone() }
                            if status.can_end() {
                                PhotoUploadForm {
                                    walk_id: walk.id,
                                    message,
                                    on_uploaded: move |_| detail.restart(),
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Photos can be added while the walk is in progress.
#[component]
fn PhotoUploadForm(
    walk_id: i64,
    message: Signal<Option<StatusMessage>>,
    on_uploaded: EventHandler<()>,
) -> Element {
    let api = use_api();
    let mut photo = use_signal(|| Option::<PhotoUpload>::None);
    let mut uploading = use_signal(|| false);
    // Resets the file input after a successful upload
    let mut picker_key = use_signal(|| 0u32);

    let handle_upload = move |_| {
        let Some(upload) = photo() else {
            return;
        };
        let api = api.clone();
        let mut message = message;
        spawn(async move {
            uploading.set(true);
            let result = api.upload_walk_photo(walk_id, upload).await;
            uploading.set(false);
            match result {
                Ok(()) => {
                    photo.set(None);
                    *picker_key.write() += 1;
                    message.set(Some(StatusMessage::success("Photo uploaded.")));
                    on_uploaded.call(());
                }
                Err(e) => message.set(Some(StatusMessage::failed("Could not upload the photo", &e))),
            }
        });
    };

    rsx! {
        div {
            class: "photo-upload",
            PhotoPicker {
                key: "{picker_key}",
                id: "walk-photo",
                disabled: uploading(),
                on_pick: move |picked| photo.set(picked),
                on_error: move |msg| {
                    let mut message = message;
                    message.set(Some(msg));
                },
            }
            Button {
                disabled: uploading() || photo.read().is_none(),
                onclick: handle_upload,
                if uploading() { "Uploading…" } else { "Upload photo" }
            }
        }
    }
}
