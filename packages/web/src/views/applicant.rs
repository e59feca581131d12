use access::Redirect;
use dioxus::prelude::*;

use ui::{use_console_config, use_session, DashboardLayout};

use crate::{follow_redirect, Route};

#[component]
pub fn ApplicantShell() -> Element {
    let config = use_console_config();
    let navigator = use_navigator();

    rsx! {
        DashboardLayout {
            is_admin: false,
            on_redirect: move |to: Redirect| follow_redirect(navigator, &config.routes, to),
            nav: rsx! {
                Link { class: "shell-nav-link", to: Route::ApplicantDashboard {}, "Dashboard" }
            },
            Outlet::<Route> {}
        }
    }
}

#[component]
pub fn ApplicantDashboard() -> Element {
    let session = use_session();
    let name = session()
        .user
        .map(|user| user.display_name())
        .unwrap_or_default();

    rsx! {
        div {
            class: "applicant-dashboard",
            h2 { class: "view-section-title", "Hi {name}" }
            p { class: "view-muted", "Your applications and updates will show up here." }
        }
    }
}
