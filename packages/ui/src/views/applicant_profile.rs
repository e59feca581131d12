use access::access_list::ProfileView;
use access::ApplicationStatus;
use dioxus::prelude::*;

use crate::components::{Badge, BadgeVariant, Button, ButtonVariant};

use super::ModalOverlay;

/// Read-only applicant profile with per-status application counts and the
/// applicant's application list, which loads separately.
#[component]
pub fn ApplicantProfileModal(
    view: ProfileView,
    on_close: EventHandler<()>,
    on_refresh: EventHandler<()>,
) -> Element {
    let profile = &view.profile;
    let title = format!("{} {}", profile.first_name, profile.last_name);
    let role = profile.role.label();
    let program = profile.program.label();
    let counts: Vec<(&'static str, usize)> = ApplicationStatus::ALL
        .iter()
        .map(|status| (status.label(), profile.application_status_count.get(*status)))
        .collect();
    let applications: Vec<(i64, String, String, &'static str)> = view
        .applications
        .iter()
        .map(|app| {
            (
                app.id,
                app.company.clone().unwrap_or_else(|| "Unknown company".to_string()),
                app.position.clone().unwrap_or_default(),
                app.status.label(),
            )
        })
        .collect();

    rsx! {
        ModalOverlay {
            title: title,
            wide: true,
            on_close: move |_| on_close.call(()),
            div {
                class: "profile-summary",
                p { class: "profile-email", "{profile.email}" }
                div {
                    class: "profile-badges",
                    Badge { variant: BadgeVariant::Outline, "{role}" }
                    Badge { variant: BadgeVariant::Default, "{program}" }
                    if profile.is_archived {
                        Badge { variant: BadgeVariant::Destructive, "Archived" }
                    }
                }
                p { class: "view-muted", "{profile.applications} applications" }
            }

            div {
                class: "profile-counts",
                for (label, count) in counts {
                    div {
                        key: "{label}",
                        class: "profile-count",
                        span { class: "profile-count-value", "{count}" }
                        span { class: "profile-count-label", "{label}" }
                    }
                }
            }

            h3 { class: "view-section-title", "Job Applications" }
            if view.loading {
                p { class: "view-muted", "Loading applications..." }
            } else if applications.is_empty() {
                p { class: "view-muted", "No job applications yet." }
            } else {
                ul {
                    class: "profile-applications",
                    for (id, company, position, status) in applications {
                        li {
                            key: "{id}",
                            span { class: "profile-application-company", "{company}" }
                            span { class: "profile-application-position", "{position}" }
                            Badge { variant: BadgeVariant::Outline, "{status}" }
                        }
                    }
                }
            }

            div {
                class: "dialog-footer",
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| on_refresh.call(()),
                    "Refresh"
                }
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: move |_| on_close.call(()),
                    "Close"
                }
            }
        }
    }
}
