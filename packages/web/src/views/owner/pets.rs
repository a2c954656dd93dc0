use api::Pet;
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, EmptyState, Loading};
use ui::{use_api, StatusAlert, StatusMessage};

use crate::views::shared::LoadError;
use crate::Route;

#[component]
pub fn OwnerPets() -> Element {
    let api = use_api();
    let mut message = use_signal(|| Option::<StatusMessage>::None);
    let mut deleting = use_signal(|| Option::<i64>::None);

    let list_api = api.clone();
    let mut pets = use_resource(move || {
        let api = list_api.clone();
        async move { api.list_pets().await }
    });

    let handle_delete = move |pet: Pet| {
        if deleting().is_some() {
            return;
        }
        let api = api.clone();
        spawn(async move {
            deleting.set(Some(pet.id));
            let result = api.delete_pet(pet.id).await;
            deleting.set(None);
            match result {
                Ok(()) => {
                    message.set(Some(StatusMessage::success(format!("{} was removed.", pet.name))));
                    pets.restart();
                }
                Err(e) => message.set(Some(StatusMessage::failed("Could not delete the pet", &e))),
            }
        });
    };

    rsx! {
        div {
            class: "page-header",
            h1 { "My pets" }
            Link { class: "btn btn-primary", to: Route::NewPet {}, "Add pet" }
        }
        StatusAlert { message }
        match &*pets.read() {
            None => rsx! { Loading {} },
            Some(Err(e)) => rsx! { LoadError { what: "Could not load your pets", error: e.clone() } },
            Some(Ok(list)) if list.is_empty() => rsx! { EmptyState { text: "You have not added any pets yet." } },
            Some(Ok(list)) => rsx! {
                table {
                    class: "table",
                    thead {
                        tr {
                            th { "Photo" }
                            th { "Name" }
                            th { "Type" }
                            th { "Notes" }
                            th {}
                        }
                    }
                    tbody {
                        for (id, pet) in list.iter().map(|p| (p.id, p.clone())) {
                            PetRow {
                                key: "{id}",
                                busy: deleting() == Some(id),
                                on_delete: handle_delete.clone(),
                                pet,
                            }
                        }
                    }
                }
            },
        }
    }
}

#[component]
fn PetRow(pet: Pet, busy: bool, on_delete: EventHandler<Pet>) -> Element {
    let api = use_api();
    let photo = pet.photo_url.as_deref().map(|f| api.asset_url("pets", f));
    let notes = pet.notes.clone().unwrap_or_default();
    let id = pet.id;
    let target = pet.clone();

    rsx! {
        tr {
            td {
                if let Some(src) = photo {
                    img { class: "thumb", src: "{src}", alt: "{pet.name}" }
                } else {
                    span { class: "muted", "No photo" }
                }
            }
            td { "{pet.name}" }
            td { "{pet.kind}" }
            td { "{notes}" }
            td {
                class: "row-actions",
                Link { class: "btn btn-outline", to: Route::EditPet { id }, "Edit" }
                Link { class: "btn btn-outline", to: Route::PetPhoto { id }, "Photo" }
                Button {
                    variant: ButtonVariant::Destructive,
                    disabled: busy,
                    onclick: move |_| on_delete.call(target.clone()),
                    if busy { "Deleting…" } else { "Delete" }
                }
            }
        }
    }
}
