use api::NewWalkForm;
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Card, Field, Input, Loading, TextArea};
use ui::{format, use_api, StatusAlert, StatusMessage};

use crate::views::shared::LoadError;
use crate::Route;

#[component]
pub fn RequestWalk() -> Element {
    rsx! { RequestWalkForm { walker_id: None } }
}

/// Request a walk from a walker picked on their profile.
#[component]
pub fn RequestWalkWith(walker_id: i64) -> Element {
    rsx! { RequestWalkForm { key: "{walker_id}", walker_id: Some(walker_id) } }
}

const DEFAULT_DURATION: &str = "30";

#[component]
fn RequestWalkForm(walker_id: Option<i64>) -> Element {
    let api = use_api();
    let nav = use_navigator();

    let mut pet_id = use_signal(String::new);
    let mut date = use_signal(String::new);
    let mut time = use_signal(String::new);
    let mut duration = use_signal(|| DEFAULT_DURATION.to_string());
    let mut notes = use_signal(String::new);
    let mut sending = use_signal(|| false);
    let mut message = use_signal(|| Option::<StatusMessage>::None);

    let pets_api = api.clone();
    let pets = use_resource(move || {
        let api = pets_api.clone();
        async move { api.list_pets().await }
    });

    let walker_api = api.clone();
    let walker = use_resource(move || {
        let api = walker_api.clone();
        async move {
            match walker_id {
                Some(id) => api.walker(id).await.map(Some),
                None => Ok(None),
            }
        }
    });

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        spawn(async move {
            message.set(None);
            let form = NewWalkForm {
                pet_id: pet_id(),
                date: date(),
                time: time(),
                duration_minutes: duration(),
                notes: notes(),
                walker_id,
            };
            let walk = match form.build() {
                Ok(walk) => walk,
                Err(e) => {
                    message.set(Some(StatusMessage::warning(e.to_string())));
                    return;
                }
            };

            sending.set(true);
            let result = api.create_walk(&walk).await;
            sending.set(false);

            match result {
                Ok(created) => {
                    tracing::info!(walk = created.id, "walk requested");
                    nav.push(Route::OwnerWalkDetail { id: created.id });
                }
                Err(e) => message.set(Some(StatusMessage::failed("Could not request the walk", &e))),
            }
        });
    };

    let walker_line = match &*walker.read() {
        Some(Ok(Some(w))) => Some(format!(
            "{} · {}",
            w.display_name(),
            format::price_per_hour(w.price_per_hour)
        )),
        _ => None,
    };

    rsx! {
        Card {
            title: "Request a walk",
            StatusAlert { message }
            if let Some(line) = walker_line {
                p { class: "chosen-walker", "Walker: {line}" }
            }
            match &*pets.read() {
                None => rsx! { Loading {} },
                Some(Err(e)) => rsx! { LoadError { what: "Could not load your pets", error: e.clone() } },
                Some(Ok(list)) if list.is_empty() => rsx! {
                    p {
                        class: "muted",
                        "Add a pet before requesting a walk. "
                        Link { to: Route::NewPet {}, "Add pet" }
                    }
                },
                Some(Ok(list)) => {
                    let options: Vec<(i64, String)> =
                        list.iter().map(|p| (p.id, p.name.clone())).collect();
                    rsx! {
                        form {
                            onsubmit: handle_submit.clone(),
                            Field {
                                label: "Pet",
                                html_for: "walk-pet",
                                select {
                                    id: "walk-pet",
                                    class: "form-control",
                                    value: pet_id(),
                                    onchange: move |evt| pet_id.set(evt.value()),
                                    option { value: "", "Choose a pet" }
                                    for (id, name) in options {
                                        option { key: "{id}", value: "{id}", "{name}" }
                                    }
                                }
                            }
                            div {
                                class: "form-row",
                                Field {
                                    label: "Date",
                                    html_for: "walk-date",
                                    Input {
                                        id: "walk-date",
                                        r#type: "date",
                                        value: date(),
                                        oninput: move |evt: FormEvent| date.set(evt.value()),
                                    }
                                }
                                Field {
                                    label: "Time",
                                    html_for: "walk-time",
                                    Input {
                                        id: "walk-time",
                                        r#type: "time",
                                        value: time(),
                                        oninput: move |evt: FormEvent| time.set(evt.value()),
                                    }
                                }
                                Field {
                                    label: "Duration (minutes)",
                                    html_for: "walk-duration",
                                    Input {
                                        id: "walk-duration",
                                        r#type: "number",
                                        min: "10",
                                        step: "5",
                                        value: duration(),
                                        oninput: move |evt: FormEvent| duration.set(evt.value()),
                                    }
                                }
                            }
                            Field {
                                label: "Notes",
                                html_for: "walk-notes",
                                TextArea {
                                    id: "walk-notes",
                                    value: notes(),
                                    oninput: move |evt: FormEvent| notes.set(evt.value()),
                                }
                            }
                            div {
                                class: "form-actions",
                                Button {
                                    r#type: "submit",
                                    disabled: sending(),
                                    if sending() { "Sending…" } else { "Request walk" }
                                }
                                Button {
                                    variant: ButtonVariant::Outline,
                                    onclick: move |_| {
                                        nav.push(Route::OwnerWalks {});
                                    },
                                    "Cancel"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
