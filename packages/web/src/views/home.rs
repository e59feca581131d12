use dioxus::prelude::*;

use ui::use_session;

use crate::Route;

/// Public entry. Signed-out visitors land here after a gate redirect.
#[component]
pub fn Home() -> Element {
    let session = use_session();
    let state = session();

    rsx! {
        div {
            class: "home",
            h1 { "Launchpad" }
            if state.loading {
                p { class: "view-muted", "Checking your session..." }
            } else if let Some(user) = state.user {
                p { "Signed in as {user.email}" }
                if user.is_admin {
                    Link { class: "home-link", to: Route::AdminDashboard {}, "Go to the admin portal" }
                } else {
                    Link { class: "home-link", to: Route::ApplicantDashboard {}, "Go to the student portal" }
                }
            } else {
                p { class: "view-muted", "Sign in to continue." }
            }
        }
    }
}
