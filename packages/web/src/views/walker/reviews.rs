use api::Review;
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Card, EmptyState, Loading};
use ui::{format, use_api, StatusAlert, StatusMessage};

use crate::views::shared::LoadError;

fn average(reviews: &[Review]) -> Option<f64> {
    let rated: Vec<u8> = reviews.iter().map(|r| r.rating).filter(|r| *r > 0).collect();
    if rated.is_empty() {
        return None;
    }
    Some(rated.iter().map(|r| f64::from(*r)).sum::<f64>() / rated.len() as f64)
}

#[component]
pub fn WalkerReviews() -> Element {
    let api = use_api();
    let reviews = use_resource(move || {
        let api = api.clone();
        async move { api.my_reviews().await }
    });

    rsx! {
        h1 { "My reviews" }
        match &*reviews.read() {
            None => rsx! { Loading {} },
            Some(Err(e)) => rsx! { LoadError { what: "Could not load your reviews", error: e.clone() } },
            Some(Ok(list)) if list.is_empty() => rsx! { EmptyState { text: "No reviews yet." } },
            Some(Ok(list)) => {
                let summary = format::rating(average(list), Some(list.len() as u32));
                rsx! {
                    p { class: "review-summary", "{summary}" }
                    for (i, review) in list.iter().cloned().enumerate() {
                        ReviewCard { key: "{i}", review }
                    }
                }
            }
        }
    }
}

/// Rows of the expanded review, as fetched from the backend.
fn detail_rows(review: &Review) -> Vec<(&'static str, String)> {
    let walk = review.walk.as_ref();
    let mut rows = vec![("Rating", format!("{}/5", review.rating.min(5)))];
    if let Some(id) = walk.and_then(|w| w.id) {
        rows.push(("Walk", format!("#{id}")));
    }
    if let Some(pet) = walk.and_then(|w| w.pet.as_ref()).and_then(|p| p.name.clone()) {
        rows.push(("Pet", pet));
    }
    rows.push(("Owner", review.author().unwrap_or("Anonymous").to_string()));
    rows.push(("Posted", format::optional_datetime(review.created_at.as_deref())));
    rows
}

#[component]
fn ReviewCard(review: Review) -> Element {
    let author = review.author().unwrap_or("Anonymous").to_string();
    let pet = review
        .walk
        .as_ref()
        .and_then(|w| w.pet.as_ref())
        .and_then(|p| p.name.clone());
    let when = format::optional_datetime(review.created_at.as_deref());
    let stars = format::stars(review.rating);
    let comment = review.comment.clone().filter(|c| !c.trim().is_empty());

    let api = use_api();
    let mut detail = use_signal(|| None::<Review>);
    let mut loading = use_signal(|| false);
    let mut message = use_signal(|| None::<StatusMessage>);
    let review_id = review.id;

    let toggle_detail = move |_: MouseEvent| {
        if detail.peek().is_some() {
            detail.set(None);
            return;
        }
        let Some(id) = review_id else {
            return;
        };
        let api = api.clone();
        spawn(async move {
            loading.set(true);
            message.set(None);
            let result = api.review(id).await;
            loading.set(false);
            match result {
                Ok(full) => detail.set(Some(full)),
                Err(e) => message.set(Some(StatusMessage::failed("Could not load review", &e))),
            }
        });
    };
    let detail_label = if detail().is_some() { "Hide details" } else { "Details" };
    let rows = detail().as_ref().map(detail_rows);

    rsx! {
        Card {
            class: "review",
            div {
                class: "review-header",
                span { class: "stars", "{stars}" }
                span { class: "muted", "{when}" }
            }
            p {
                strong { "{author}" }
                if let Some(pet) = pet {
                    " walked with {pet}"
                }
            }
            if let Some(comment) = comment {
                p { "{comment}" }
            }
            if let Some(rows) = rows {
                dl {
                    class: "review-detail",
                    for (label, value) in rows {
                        div {
                            key: "{label}",
                            dt { "{label}" }
                            dd { "{value}" }
                        }
                    }
                }
            }
            StatusAlert { message }
            if review_id.is_some() {
                Button {
                    variant: ButtonVariant::Ghost,
                    disabled: loading(),
                    onclick: toggle_detail,
                    "{detail_label}"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: u8) -> Review {
        serde_json::from_value(serde_json::json!({"rating": rating})).unwrap()
    }

    #[test]
    fn test_average_ignores_unrated() {
        assert_eq!(average(&[]), None);
        assert_eq!(average(&[review(4), review(5), review(0)]), Some(4.5));
    }

    #[test]
    fn test_detail_rows_show_walk_pet_and_owner() {
        let full: Review = serde_json::from_value(serde_json::json!({
            "id": 7,
            "rating": 4,
            "walk": {"id": 42, "pet": {"name": "Rocky"}, "owner": {"name": "Ana"}}
        }))
        .unwrap();
        let rows = detail_rows(&full);
        assert_eq!(rows[0], ("Rating", "4/5".to_string()));
        assert!(rows.contains(&("Walk", "#42".to_string())));
        assert!(rows.contains(&("Pet", "Rocky".to_string())));
        assert!(rows.contains(&("Owner", "Ana".to_string())));
        assert!(rows.contains(&("Posted", "-".to_string())));

        let bare = detail_rows(&review(0));
        let labels: Vec<&str> = bare.iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, ["Rating", "Owner", "Posted"]);
    }
}
