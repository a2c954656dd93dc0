//! Login and registration for both roles.

use api::{Credentials, Registration};
use dioxus::prelude::*;
use store::Role;
use ui::components::{Button, Card, Field, Input, PhotoPicker};
use ui::icons::{FaDog, FaPaw};
use ui::{use_api, use_session, use_sessions, Icon, StatusAlert, StatusMessage};

use crate::Route;

#[component]
pub fn LoginOwner() -> Element {
    rsx! { LoginForm { role: Role::Owner } }
}

#[component]
pub fn LoginWalker() -> Element {
    rsx! { LoginForm { role: Role::Walker } }
}

#[component]
pub fn RegisterOwner() -> Element {
    rsx! { RegisterForm { role: Role::Owner } }
}

#[component]
pub fn RegisterWalker() -> Element {
    rsx! { RegisterForm { role: Role::Walker } }
}

fn role_title(role: Role) -> &'static str {
    match role {
        Role::Owner => "Pet owner",
        Role::Walker => "Walker",
    }
}

fn other(role: Role) -> Role {
    match role {
        Role::Owner => Role::Walker,
        Role::Walker => Role::Owner,
    }
}

#[component]
fn AuthShell(role: Role, title: String, children: Element) -> Element {
    rsx! {
        div {
            class: "auth-container",
            div {
                class: "auth-brand",
                if role == Role::Owner {
                    Icon { icon: FaPaw, width: 32, height: 32 }
                } else {
                    Icon { icon: FaDog, width: 32, height: 32 }
                }
                h1 { "Paseo" }
                p { class: "muted", "{title}" }
            }
            Card { class: "auth-card", {children} }
        }
    }
}

#[component]
fn LoginForm(role: Role) -> Element {
    let api = use_api();
    let sessions = use_sessions();
    let session = use_session();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut loading = use_signal(|| false);
    let mut message = use_signal(|| Option::<StatusMessage>::None);

    // Already signed in with this role
    use_effect(move || {
        if session.read().as_ref().map(|s| s.role) == Some(role) {
            nav.replace(Route::home(role));
        }
    });

    let title = format!("{} login", role_title(role));
    let switch_label = format!("I am a {}", role_title(other(role)).to_lowercase());

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        let sessions = sessions.clone();
        spawn(async move {
            message.set(None);
            let credentials = match (Credentials {
                email: email(),
                password: password(),
            })
            .validate()
            {
                Ok(c) => c,
                Err(e) => {
                    message.set(Some(StatusMessage::warning(e.to_string())));
                    return;
                }
            };

            loading.set(true);
            let result = api.login(role, &credentials).await;
            loading.set(false);

            match result {
                Ok(auth) => match sessions.login(role, auth.token, auth.profile) {
                    Ok(_) => {
                        nav.replace(Route::home(role));
                    }
                    Err(e) => message.set(Some(StatusMessage::failed("Could not sign in", &e))),
                },
                Err(e) => message.set(Some(StatusMessage::failed("Login failed", &e))),
            }
        });
    };

    rsx! {
        AuthShell {
            role,
            title,
            StatusAlert { message }
            form {
                onsubmit: handle_login,
                Field {
                    label: "Email",
                    html_for: "login-email",
                    Input {
                        id: "login-email",
                        r#type: "email",
                        placeholder: "you@example.com",
                        value: email(),
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }
                }
                Field {
                    label: "Password",
                    html_for: "login-password",
                    Input {
                        id: "login-password",
                        r#type: "password",
                        value: password(),
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }
                }
                Button {
                    r#type: "submit",
                    class: "btn-block",
                    disabled: loading(),
                    if loading() { "Signing in…" } else { "Sign in" }
                }
            }
            div {
                class: "auth-links",
                Link { to: Route::register(role), "Create an account" }
                Link {
                    to: Route::login(other(role)),
                    "{switch_label}"
                }
            }
        }
    }
}

#[component]
fn RegisterForm(role: Role) -> Element {
    let api = use_api();
    let nav = use_navigator();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut price = use_signal(String::new);
    let mut photo = use_signal(|| Option::<api::PhotoUpload>::None);
    let mut loading = use_signal(|| false);
    let mut message = use_signal(|| Option::<StatusMessage>::None);

    let title = format!("New {} account", role_title(role).to_lowercase());

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        spawn(async move {
            message.set(None);
            let form = Registration {
                name: name(),
                email: email(),
                password: password(),
                price_hour: (role == Role::Walker).then(|| price()),
                photo: photo(),
            };
            let form = match form.validate() {
                Ok(f) => f,
                Err(e) => {
                    message.set(Some(StatusMessage::warning(e.to_string())));
                    return;
                }
            };

            loading.set(true);
            let result = api.register(role, &form).await;
            loading.set(false);

            match result {
                Ok(()) => {
                    tracing::info!(%role, "registered");
                    nav.push(Route::login(role));
                }
                Err(e) => message.set(Some(StatusMessage::failed("Registration failed", &e))),
            }
        });
    };

    rsx! {
        AuthShell {
            role,
            title,
            StatusAlert { message }
            form {
                onsubmit: handle_register,
                Field {
                    label: "Name",
                    html_for: "reg-name",
                    Input {
                        id: "reg-name",
                        value: name(),
                        oninput: move |evt: FormEvent| name.set(evt.value()),
                    }
                }
                Field {
                    label: "Email",
                    html_for: "reg-email",
                    Input {
                        id: "reg-email",
                        r#type: "email",
                        value: email(),
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }
                }
                Field {
                    label: "Password",
                    html_for: "reg-password",
                    Input {
                        id: "reg-password",
                        r#type: "password",
                        value: password(),
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }
                }
                if role == Role::Walker {
                    Field {
                        label: "Price per hour (Bs)",
                        html_for: "reg-price",
                        Input {
                            id: "reg-price",
                            r#type: "number",
                            min: "0",
                            step: "0.5",
                            value: price(),
                            oninput: move |evt: FormEvent| price.set(evt.value()),
                        }
                    }
                }
                Field {
                    label: "Profile photo (optional)",
                    html_for: "reg-photo",
                    PhotoPicker {
                        id: "reg-photo",
                        on_pick: move |picked| photo.set(picked),
                        on_error: move |msg| message.set(Some(msg)),
                    }
                }
                Button {
                    r#type: "submit",
                    class: "btn-block",
                    disabled: loading(),
                    if loading() { "Creating account…" } else { "Create account" }
                }
            }
            div {
                class: "auth-links",
                Link { to: Route::login(role), "I already have an account" }
            }
        }
    }
}
