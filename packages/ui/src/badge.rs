use api::WalkStatus;
use dioxus::prelude::*;

pub fn status_class(status: WalkStatus) -> &'static str {
    match status {
        WalkStatus::Pending => "badge badge-warning",
        WalkStatus::Accepted => "badge badge-info",
        WalkStatus::Rejected => "badge badge-danger",
        WalkStatus::InProgress => "badge badge-primary",
        WalkStatus::Finished => "badge badge-success",
        WalkStatus::Unknown => "badge badge-muted",
    }
}

pub fn status_label(status: WalkStatus) -> &'static str {
    match status {
        WalkStatus::Pending => "Pending",
        WalkStatus::Accepted => "Accepted",
        WalkStatus::Rejected => "Rejected",
        WalkStatus::InProgress => "In progress",
        WalkStatus::Finished => "Finished",
        WalkStatus::Unknown => "Unknown",
    }
}

#[component]
pub fn WalkStatusBadge(status: WalkStatus) -> Element {
    rsx! {
        span { class: "{status_class(status)}", "{status_label(status)}" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_progress_is_primary() {
        assert_eq!(status_class(WalkStatus::InProgress), "badge badge-primary");
        assert_eq!(status_label(WalkStatus::InProgress), "In progress");
    }
}
