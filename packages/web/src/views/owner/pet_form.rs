use api::{Pet, PetInput};
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Card, Field, Input, Loading, TextArea};
use ui::{use_api, StatusAlert, StatusMessage};

use crate::views::shared::LoadError;
use crate::Route;

#[component]
pub fn NewPet() -> Element {
    rsx! { PetForm { existing: None } }
}

/// Edit form. There is no single-pet endpoint, so the pet is found in the list.
#[component]
pub fn EditPet(id: i64) -> Element {
    let api = use_api();
    let mut id_signal = use_signal(|| id);
    if *id_signal.peek() != id {
        id_signal.set(id);
    }

    let pet = use_resource(move || {
        let api = api.clone();
        let id = id_signal();
        async move { api.find_pet(id).await }
    });

    let view = match &*pet.read() {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! { LoadError { what: "Could not load the pet", error: e.clone() } },
        Some(Ok(None)) => rsx! {
            div {
                class: "alert alert-warning",
                "That pet does not exist. "
                Link { to: Route::OwnerPets {}, "Back to my pets" }
            }
        },
        Some(Ok(Some(pet))) => rsx! { PetForm { key: "{pet.id}", existing: Some(pet.clone()) } },
    };
    view
}

#[component]
fn PetForm(existing: Option<Pet>) -> Element {
    let api = use_api();
    let nav = use_navigator();
    let editing = existing.as_ref().map(|p| p.id);
    let initial = existing.as_ref().map(PetInput::from_pet).unwrap_or_default();

    let mut name = use_signal(|| initial.name.clone());
    let mut kind = use_signal(|| initial.kind.clone());
    let mut notes = use_signal(|| initial.notes.clone());
    let mut saving = use_signal(|| false);
    let mut message = use_signal(|| Option::<StatusMessage>::None);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        spawn(async move {
            message.set(None);
            let input = match (PetInput {
                name: name(),
                kind: kind(),
                notes: notes(),
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
            let result = match editing {
                Some(id) => api.update_pet(id, &input).await,
                None => api.create_pet(&input).await,
            };
            saving.set(false);

            match result {
                Ok(pet) => {
                    tracing::info!(pet = pet.id, "pet saved");
                    nav.push(Route::OwnerPets {});
                }
                Err(e) => message.set(Some(StatusMessage::failed("Could not save the pet", &e))),
            }
        });
    };

    let title = if editing.is_some() { "Edit pet" } else { "New pet" };

    rsx! {
        Card {
            title: title.to_string(),
            StatusAlert { message }
            form {
                onsubmit: handle_submit,
                Field {
                    label: "Name",
                    html_for: "pet-name",
                    Input {
                        id: "pet-name",
                        value: name(),
                        oninput: move |evt: FormEvent| name.set(evt.value()),
                    }
                }
                Field {
                    label: "Type",
                    html_for: "pet-type",
                    Input {
                        id: "pet-type",
                        placeholder: "Dog, cat…",
                        value: kind(),
                        oninput: move |evt: FormEvent| kind.set(evt.value()),
                    }
                }
                Field {
                    label: "Notes",
                    html_for: "pet-notes",
                    TextArea {
                        id: "pet-notes",
                        placeholder: "Allergies, temperament…",
                        value: notes(),
                        oninput: move |evt: FormEvent| notes.set(evt.value()),
                    }
                }
                div {
                    class: "form-actions",
                    Button {
                        r#type: "submit",
                        disabled: saving(),
                        if saving() { "Saving…" } else { "Save" }
                    }
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| {
                            nav.push(Route::OwnerPets {});
                        },
                        "Cancel"
                    }
                }
            }
        }
    }
}
