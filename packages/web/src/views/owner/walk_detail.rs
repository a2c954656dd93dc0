use api::{ApiError, ReviewInput, Walk, WalkPhoto};
use dioxus::prelude::*;
use ui::components::{Button, Card, Field, Loading, TextArea};
use ui::{format, use_api, use_config, StatusAlert, StatusMessage};

use crate::views::shared::{LoadError, LocationList, PhotoGallery, WalkFacts};
use crate::Route;

async fn load(api: &api::ApiClient, id: i64) -> Result<(Walk, Vec<WalkPhoto>), ApiError> {
    let walk = api.walk(id).await?;
    // Photos are secondary; a failure there should not hide the walk
    let photos = api.walk_photos(id).await.unwrap_or_else(|e| {
        tracing::warn!(walk = id, "could not load photos: {e}");
        Vec::new()
    });
    Ok((walk, photos))
}

/// Owner's view of one walk. Refreshes on a timer while the walk is live so
/// new locations and photos show up.
#[component]
pub fn OwnerWalkDetail(id: i64) -> Element {
    let api = use_api();
    let refresh = use_config().location.walk_refresh();

    let mut id_signal = use_signal(|| id);
    if *id_signal.peek() != id {
        id_signal.set(id);
    }

    let mut detail = use_resource(move || {
        let api = api.clone();
        let id = id_signal();
        async move { load(&api, id).await }
    });

    use_future(move || async move {
        loop {
            api::timer::sleep(refresh).await;
            let live = matches!(&*detail.peek(), Some(Ok((walk, _))) if walk.status.is_live());
            if live {
                tracing::debug!(walk = *id_signal.peek(), "refreshing live walk");
                detail.restart();
            }
        }
    });

    rsx! {
        div {
            class: "page-header",
            h1 { "Walk #{id}" }
            Link { class: "btn btn-outline", to: Route::OwnerWalks {}, "All walks" }
        }
        match &*detail.read() {
            None => rsx! { Loading {} },
            Some(Err(e)) => rsx! { LoadError { what: "Could not load the walk", error: e.clone() } },
            Some(Ok((walk, photos))) => {
                let last = walk
                    .last_location()
                    .map(|l| format::coordinates(l.lat, l.lng));
                rsx! {
                    div {
                        class: "detail-grid",
                        Card {
                            title: "Details",
                            WalkFacts { walk: walk.clone() }
                            if walk.status.is_live() {
                                p { class: "muted", "This page refreshes every {refresh.as_secs()} seconds." }
                            }
                        }
                        Card {
                            title: "Route",
                            if let Some(last) = last {
                                p { "Last known position: {last}" }
                            }
                            LocationList { locations: walk.locations.clone() }
                        }
                        Card {
                            title: "Photos",
                            PhotoGallery { photos: photos.clone() }
                        }
                        if let Some(review) = walk.review.as_ref() {
                            Card {
                                title: "Your review",
                                p { class: "stars", "{format::stars(review.rating)}" }
                                if let Some(comment) = review.comment.clone() {
                                    p { "{comment}" }
                                }
                            }
                        }
                        if walk.can_review() {
                            ReviewForm {
                                walk_id: walk.id,
                                on_saved: move |_| detail.restart(),
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ReviewForm(walk_id: i64, on_saved: EventHandler<()>) -> Element {
    let api = use_api();
    let mut rating = use_signal(|| 5u8);
    let mut comment = use_signal(String::new);
    let mut saving = use_signal(|| false);
    let mut message = use_signal(|| Option::<StatusMessage>::None);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if saving() {
            return;
        }
        let api = api.clone();
        spawn(async move {
            let input = match (ReviewInput {
                rating: rating(),
                comment: comment(),
            })
            .validate()
            {
                Ok(input) => input,
                Err(e) => {
                    message.set(Some(StatusMessage::warning(e.to_string())));
                    return;
                }
            };

            saving.set(true);
            let result = api.leave_review(walk_id, &input).await;
            saving.set(false);

            match result {
                Ok(()) => {
                    message.set(Some(StatusMessage::success("Review saved.")));
                    on_saved.call(());
                }
                Err(e) => message.set(Some(StatusMessage::failed("Could not save the review", &e))),
            }
        });
    };

    rsx! {
        Card {
            title: "Leave a review",
            StatusAlert { message }
            form {
                onsubmit: handle_submit,
                Field {
                    label: "Rating",
                    html_for: "review-rating",
                    select {
                        id: "review-rating",
                        class: "form-control",
                        value: "{rating}",
                        onchange: move |evt| {
                            if let Ok(value) = evt.value().parse() {
                                rating.set(value);
                            }
                        },
                        for n in (1..=5u8).rev() {
                            option { key: "{n}", value: "{n}", "{format::stars(n)}" }
                        }
                    }
                }
                Field {
                    label: "Comment",
                    html_for: "review-comment",
                    TextArea {
                        id: "review-comment",
                        value: comment(),
                        oninput: move |evt: FormEvent| comment.set(evt.value()),
                    }
                }
                Button {
                    r#type: "submit",
                    disabled: saving(),
                    if saving() { "Saving…" } else { "Send review" }
                }
            }
        }
    }
}
