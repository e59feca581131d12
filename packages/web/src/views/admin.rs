use access::{Redirect, UserDirectory, UserRecord};
use dioxus::prelude::*;

use ui::components::{use_toast, ToastOptions};
use ui::{use_console_config, use_directory, use_session, DashboardLayout, UserAccessManager};

use crate::{follow_redirect, Route};

#[component]
pub fn AdminShell() -> Element {
    let config = use_console_config();
    let navigator = use_navigator();

    rsx! {
        DashboardLayout {
            is_admin: true,
            on_redirect: move |to: Redirect| follow_redirect(navigator, &config.routes, to),
            nav: rsx! {
                Link { class: "shell-nav-link", to: Route::AdminDashboard {}, "Dashboard" }
                Link { class: "shell-nav-link", to: Route::AdminSettings {}, "User Access" }
            },
            Outlet::<Route> {}
        }
    }
}

#[component]
pub fn AdminDashboard() -> Element {
    let session = use_session();
    let name = session()
        .user
        .map(|user| user.display_name())
        .unwrap_or_default();

    rsx! {
        div {
            class: "admin-dashboard",
            h2 { class: "view-section-title", "Welcome back, {name}" }
            p { class: "view-muted", "Manage who can reach the admin portal from User Access." }
            Link { class: "home-link", to: Route::AdminSettings {}, "Open User Access" }
        }
    }
}

/// Owns the page-level user list and keeps it in step with the access manager.
#[component]
pub fn AdminSettings() -> Element {
    let directory = use_directory();
    let session = use_session();
    let toast = use_toast();
    let mut users = use_signal(Vec::<UserRecord>::new);
    let mut loading = use_signal(|| true);

    let _loader = use_resource(move || {
        let directory = directory.clone();
        async move {
            match directory.list_users().await {
                Ok(list) => users.set(list),
                Err(e) => {
                    tracing::warn!("Failed to load users: {e}");
                    toast.error(
                        "Failed to load users".to_string(),
                        ToastOptions::new().description(e.to_string()),
                    );
                }
            }
            loading.set(false);
        }
    });

    let current_user_id = session()
        .user
        .and_then(|user| user.match_record(&users.read()));

    rsx! {
        UserAccessManager {
            users: users(),
            current_user_id,
            loading: loading(),
            on_user_update: move |updated: UserRecord| {
                let mut users = users.write();
                match users.iter_mut().find(|user| user.id == updated.id) {
                    Some(user) => *user = updated,
                    None => users.push(updated),
                }
            },
        }
    }
}
