use access::gate::evaluate;
use access::shell::NOTIFICATIONS_EMPTY_TEXT;
use access::{
    EmptyNotifications, Gate, GatePhase, Notification, NotificationSource, Redirect, RequiredRole,
    ShellChrome, ShellLabels,
};
use dioxus::prelude::*;

use crate::components::{Button, ButtonSize, ButtonVariant};
use crate::icons::{FaBars, FaBell, FaXmark};
use crate::{use_console_config, use_session, Icon};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Session-gated dashboard chrome.
///
/// Shows a spinner while the session loads, asks the caller to navigate away
/// (once) when nobody is signed in or the signed-in role does not match
/// `is_admin`, and otherwise renders the header, sidebar `nav` and `children`.
#[component]
pub fn DashboardLayout(
    /// Whether this shell is for admins (true) or applicants (false).
    #[props(default)]
    is_admin: bool,
    /// Called with the redirect target when the session may not see this shell.
    on_redirect: EventHandler<Redirect>,
    /// Sidebar navigation, rendered in the desktop aside and the mobile drawer.
    nav: Element,
    children: Element,
) -> Element {
    let session = use_session();
    let config = use_console_config();
    let threshold = config.shell.scroll_threshold;

    let mut gate = use_signal(Gate::new);
    let mut chrome = use_signal(move || ShellChrome::new(threshold));
    let mut notifications = use_signal(Vec::<Notification>::new);

    use_effect(use_reactive((&is_admin,), move |(is_admin,)| {
        let required = RequiredRole::from_is_admin(is_admin);
        let decision = gate.write().observe(&session(), required);
        if let Some(to) = decision.navigate {
            on_redirect.call(to);
        }
    }));

    let _notifications = use_resource(use_reactive((&is_admin,), move |(is_admin,)| {
        let user = session().user.filter(|_| !is_admin);
        async move {
            if let Some(user) = user {
                notifications.set(EmptyNotifications.fetch(&user).await);
            }
        }
    }));

    #[cfg(target_arch = "wasm32")]
    use_effect(move || {
        spawn(async move {
            loop {
                gloo_timers::future::sleep(std::time::Duration::from_millis(100)).await;
                let y = web_sys::window()
                    .and_then(|w| w.scroll_y().ok())
                    .unwrap_or(0.0);
                if (y > threshold) != chrome.peek().scrolled {
                    chrome.write().track_scroll(y);
                }
            }
        });
    });

    let required = RequiredRole::from_is_admin(is_admin);
    let user = match evaluate(&session(), required) {
        GatePhase::Loading => {
            return rsx! {
                document::Link { rel: "stylesheet", href: VIEWS_CSS }
                div {
                    class: "shell-loading",
                    div { class: "spinner" }
                }
            };
        }
        GatePhase::Unauthenticated | GatePhase::Mismatch(_) => return rsx! {},
        GatePhase::Ready(user) => user,
    };

    let labels = ShellLabels::for_shell(required, &user);
    let state = chrome();
    let items = notifications();
    let unread = access::shell::has_unread(&items);
    let rows: Vec<(i64, bool, String, String)> = items
        .iter()
        .map(|n| (n.id, n.read, n.message.clone(), n.display_time()))
        .collect();
    let header_class = if state.scrolled {
        "shell-header shell-header--scrolled"
    } else {
        "shell-header"
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "shell",
            header {
                class: "{header_class}",
                div {
                    class: "shell-header-start",
                    Button {
                        variant: ButtonVariant::Ghost,
                        size: ButtonSize::Icon,
                        class: "shell-menu-toggle",
                        title: "Toggle menu",
                        onclick: move |_| chrome.write().toggle_nav(),
                        Icon { icon: FaBars, width: 18, height: 18 }
                    }
                    h1 { class: "shell-title", "{labels.portal_title}" }
                }
                div {
                    class: "shell-header-end",
                    if labels.show_notifications {
                        div {
                            class: "notifications",
                            Button {
                                variant: ButtonVariant::Ghost,
                                size: ButtonSize::Icon,
                                class: "notifications-trigger",
                                title: "Notifications",
                                onclick: move |_| chrome.write().toggle_notifications(),
                                Icon { icon: FaBell, width: 18, height: 18 }
                                if unread {
                                    span { class: "notifications-dot" }
                                }
                            }
                            if state.notifications_open {
                                div {
                                    class: "notifications-popover",
                                    div { class: "notifications-heading", "Notifications" }
                                    if items.is_empty() {
                                        div {
                                            class: "notifications-empty",
                                            Icon { icon: FaBell, width: 40, height: 40 }
                                            p { "{NOTIFICATIONS_EMPTY_TEXT}" }
                                        }
                                    } else {
                                        for (id, read, message, time) in rows {
                                            div {
                                                key: "{id}",
                                                class: if read { "notification" } else { "notification notification--unread" },
                                                p { class: "notification-message", "{message}" }
                                                p { class: "notification-time", "{time}" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                    div {
                        class: "shell-user",
                        p { class: "shell-user-name", "{labels.user_name}" }
                        p { class: "shell-user-role", "{labels.role_caption}" }
                    }
                }
            }

            if state.nav_open {
                div {
                    class: "shell-drawer-backdrop",
                    onclick: move |_| chrome.write().close_nav(),
                }
                aside {
                    class: "shell-drawer",
                    div {
                        class: "shell-drawer-header",
                        h2 { "Launchpad" }
                        Button {
                            variant: ButtonVariant::Ghost,
                            size: ButtonSize::Icon,
                            title: "Close menu",
                            onclick: move |_| chrome.write().close_nav(),
                            Icon { icon: FaXmark, width: 16, height: 16 }
                        }
                    }
                    nav {
                        onclick: move |_| chrome.write().close_nav(),
                        {nav.clone()}
                    }
                }
            }

            div {
                class: "shell-body",
                aside { class: "shell-sidebar", nav { {nav} } }
                main { class: "shell-main", {children} }
            }
        }
    }
}
