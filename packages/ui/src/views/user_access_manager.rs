use access::notice::Operation;
use access::{AccessList, Program, UserDirectory, UserRecord, ViewTab};
use dioxus::prelude::*;

use crate::components::{
    Badge, BadgeVariant, Button, ButtonSize, ButtonVariant, Input, Label, NoticeToasts, Switch,
    TabList, use_toast,
};
use crate::icons::{FaBoxArchive, FaKey, FaMagnifyingGlass, FaShieldHalved, FaTag, FaUserPlus};
use crate::{use_console_config, use_directory, Icon};

use super::{ApplicantProfileModal, ModalOverlay};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Admin table of every user account with role switches, account creation,
/// password resets and applicant profiles.
///
/// `users` seeds the table and replaces it whenever the parent passes a new list.
/// Confirmed changes are reported through `on_user_update`.
#[component]
pub fn UserAccessManager(
    users: Vec<UserRecord>,
    current_user_id: Option<i64>,
    #[props(default)] loading: bool,
    on_user_update: Option<EventHandler<UserRecord>>,
) -> Element {
    let config = use_console_config();
    let directory = use_directory();
    let toasts = use_toast();

    let mut list = use_signal(|| {
        let mut list = AccessList::new(users.clone(), current_user_id)
            .with_defaults(config.accounts.clone());
        if let Some(handler) = on_user_update {
            list.set_update_listener(Some(Box::new(move |user: &UserRecord| {
                handler.call(user.clone())
            })));
        }
        list
    });

    use_effect(use_reactive((&users, &current_user_id), move |(users, current)| {
        let mut list = list.write();
        list.replace_users(users);
        list.set_current_user(current);
    }));

    use_drop(move || {
        if let Ok(mut list) = list.try_write() {
            list.teardown();
        }
    });

    let toggle_admin = use_callback({
        let directory = directory.clone();
        move |user_id: i64| {
            let ticket = match list.write().begin_toggle_admin(user_id) {
                Ok(ticket) => ticket,
                Err(e) => {
                    toasts.notice(&Operation::ToggleAdmin.failed(&e));
                    return;
                }
            };
            let directory = directory.clone();
            spawn(async move {
                let result = directory.set_admin(ticket.user_id(), ticket.is_admin()).await;
                let done = list.write().finish_toggle_admin(ticket, result);
                if let Some(notice) = done.notice {
                    toasts.notice(&notice);
                }
            });
        }
    });

    let create_user = use_callback({
        let directory = directory.clone();
        move |_: ()| {
            let ticket = match list.write().begin_create_user() {
                Ok(ticket) => ticket,
                Err(e) => {
                    toasts.notice(&Operation::CreateUser.failed(&e));
                    return;
                }
            };
            let directory = directory.clone();
            spawn(async move {
                let result = directory.create_user(ticket.draft()).await;
                let done = list.write().finish_create_user(ticket, result);
                if let Some(notice) = done.notice {
                    toasts.notice(&notice);
                }
            });
        }
    });

    let reset_password = use_callback({
        let directory = directory.clone();
        move |_: ()| {
            let ticket = match list.write().begin_reset_password() {
                Ok(ticket) => ticket,
                Err(e) => {
                    toasts.notice(&Operation::ResetPassword.failed(&e));
                    return;
                }
            };
            let directory = directory.clone();
            spawn(async move {
                let result = directory
                    .reset_password(ticket.user_id(), ticket.new_password())
                    .await;
                let done = list.write().finish_reset_password(ticket, result);
                if let Some(notice) = done.notice {
                    toasts.notice(&notice);
                }
            });
        }
    });

    let open_profile = use_callback({
        let directory = directory.clone();
        move |user_id: i64| {
            let ticket = match list.write().begin_open_profile(user_id) {
                Ok(ticket) => ticket,
                Err(e) => {
                    toasts.notice(&Operation::LoadApplications.failed(&e));
                    return;
                }
            };
            let directory = directory.clone();
            spawn(async move {
                let result = directory.list_applications(ticket.user_id()).await;
                let done = list.write().finish_open_profile(ticket, result);
                if let Some(notice) = done.notice {
                    toasts.notice(&notice);
                }
            });
        }
    });

    let refresh = use_callback(move |_: ()| {
        let ticket = list.write().begin_refresh();
        let directory = directory.clone();
        spawn(async move {
            let result = directory.list_users().await;
            let done = list.write().finish_refresh(ticket, result);
            if let Some(notice) = done.notice {
                toasts.notice(&notice);
            }
        });
    });

    let state = list.read();
    let rows: Vec<(UserRecord, bool, bool)> = state
        .visible()
        .into_iter()
        .map(|user| {
            (
                user.clone(),
                state.is_current_user(user.id),
                state.admin_toggle_disabled(user.id),
            )
        })
        .collect();
    let query = state.query().to_string();
    let active_tab = state.tab().as_str().to_string();
    let create = state.create_dialog().clone();
    let reset = state.reset_dialog().clone();
    let profile = state.profile().cloned();
    let refreshing = state.is_refreshing();
    drop(state);

    let tabs: Vec<(String, String)> = ViewTab::ALL
        .iter()
        .map(|tab| (tab.as_str().to_string(), tab.label().to_string()))
        .collect();
    let default_password = config.accounts.password.clone();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "access-manager",
            div {
                class: "access-header",
                div {
                    h3 { class: "view-section-title", "User Management" }
                    p { class: "view-muted", "Create and manage users in the system." }
                }
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: move |_| list.write().open_create_dialog(),
                    Icon { icon: FaUserPlus, width: 14, height: 14 }
                    "Create New User"
                }
            }

            div {
                class: "access-card",
                div {
                    class: "access-toolbar",
                    div {
                        class: "access-search",
                        Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                        Input {
                            class: "access-search-input",
                            placeholder: "Search users...",
                            value: query,
                            oninput: move |evt: FormEvent| list.write().search(evt.value()),
                        }
                    }
                    TabList {
                        tabs: tabs,
                        active: active_tab,
                        on_select: move |value: String| {
                            match value.parse::<ViewTab>() {
                                Ok(tab) => list.write().select_view(tab),
                                Err(e) => tracing::warn!("{e}"),
                            }
                        },
                    }
                }

                table {
                    class: "access-table",
                    thead {
                        tr {
                            th { "User" }
                            th { "Email" }
                            th { class: "text-center", "Role" }
                            th { class: "text-center", "Admin Access" }
                            th { class: "text-center", "Actions" }
                        }
                    }
                    tbody {
                        if loading || refreshing {
                            for i in 0..3 {
                                tr {
                                    key: "skeleton-{i}",
                                    class: "skeleton-row",
                                    td { div { class: "skeleton skeleton--avatar" } }
                                    td { div { class: "skeleton skeleton--text" } }
                                    td { div { class: "skeleton skeleton--badge" } }
                                    td { div { class: "skeleton skeleton--switch" } }
                                    td { div { class: "skeleton skeleton--button" } }
                                }
                            }
                        } else if rows.is_empty() {
                            tr {
                                td { colspan: "5", class: "access-empty", "No users found" }
                            }
                        } else {
                            for (user, is_self, toggle_disabled) in rows {
                                UserRow {
                                    key: "{user.id}",
                                    user: user.clone(),
                                    is_self: is_self,
                                    toggle_disabled: toggle_disabled,
                                    on_toggle_admin: move |id| toggle_admin.call(id),
                                    on_reset_password: move |id| list.write().open_reset_dialog(id),
                                    on_view_profile: move |id| open_profile.call(id),
                                }
                            }
                        }
                    }
                }
            }

            if create.open {
                ModalOverlay {
                    title: "Create New User",
                    on_close: move |_| list.write().close_create_dialog(),
                    p { class: "view-muted", "Create a new user account. All fields are required." }
                    div {
                        class: "form-grid",
                        div {
                            Label { html_for: "firstName", "First Name" }
                            Input {
                                id: "firstName",
                                placeholder: "First name",
                                value: create.draft.first_name.clone(),
                                oninput: move |evt: FormEvent| list.write().draft_mut().first_name = evt.value(),
                            }
                        }
                        div {
                            Label { html_for: "lastName", "Last Name" }
                            Input {
                                id: "lastName",
                                placeholder: "Last name",
                                value: create.draft.last_name.clone(),
                                oninput: move |evt: FormEvent| list.write().draft_mut().last_name = evt.value(),
                            }
                        }
                    }
                    div {
                        class: "form-field",
                        Label { html_for: "email", "Email" }
                        Input {
                            id: "email",
                            r#type: "email",
                            placeholder: "user@example.com",
                            value: create.draft.email.clone(),
                            oninput: move |evt: FormEvent| list.write().draft_mut().email = evt.value(),
                        }
                    }
                    div {
                        class: "form-field",
                        Label { html_for: "password", "Password" }
                        Input {
                            id: "password",
                            r#type: "password",
                            placeholder: "Create a password",
                            value: create.draft.password.clone(),
                            oninput: move |evt: FormEvent| list.write().draft_mut().password = evt.value(),
                        }
                        p { class: "view-muted", "Default password is \"{default_password}\"" }
                    }
                    div {
                        class: "form-field",
                        Label { html_for: "program", "Program" }
                        select {
                            id: "program",
                            class: "input",
                            value: create.draft.program.as_str(),
                            onchange: move |evt| match Program::parse(&evt.value()) {
                                Some(program) => list.write().draft_mut().program = program,
                                None => tracing::warn!("unknown program {}", evt.value()),
                            },
                            for program in Program::ALL {
                                option {
                                    value: program.as_str(),
                                    {program.label()}
                                }
                            }
                        }
                    }
                    div {
                        class: "dialog-footer",
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| list.write().close_create_dialog(),
                            "Cancel"
                        }
                        Button {
                            variant: ButtonVariant::Primary,
                            disabled: create.submitting,
                            onclick: move |_| create_user.call(()),
                            "Create User"
                        }
                    }
                }
            }

            if reset.open {
                ModalOverlay {
                    title: "Reset Password",
                    on_close: move |_| list.write().close_reset_dialog(),
                    p { class: "view-muted", "Enter a new password for this user." }
                    div {
                        class: "form-field",
                        Label { html_for: "new-password", "New Password" }
                        Input {
                            id: "new-password",
                            r#type: "password",
                            placeholder: "Enter new password",
                            value: reset.new_password.clone(),
                            oninput: move |evt: FormEvent| list.write().set_new_password(evt.value()),
                        }
                    }
                    div {
                        class: "dialog-footer",
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| list.write().close_reset_dialog(),
                            "Cancel"
                        }
                        Button {
                            variant: ButtonVariant::Primary,
                            onclick: move |_| reset_password.call(()),
                            "Reset Password"
                        }
                    }
                }
            }

            if let Some(view) = profile {
                ApplicantProfileModal {
                    view: view,
                    on_close: move |_| list.write().close_profile(),
                    on_refresh: move |_| refresh.call(()),
                }
            }
        }
    }
}

#[component]
fn UserRow(
    user: UserRecord,
    is_self: bool,
    toggle_disabled: bool,
    on_toggle_admin: EventHandler<i64>,
    on_reset_password: EventHandler<i64>,
    on_view_profile: EventHandler<i64>,
) -> Element {
    let id = user.id;
    let initials = user.initials();
    let full_name = user.full_name();
    let row_class = if user.is_archived {
        "access-row access-row--archived"
    } else {
        "access-row"
    };

    rsx! {
        tr {
            class: "{row_class}",
            td {
                div {
                    class: "access-user",
                    span { class: "avatar", "{initials}" }
                    span {
                        class: "access-user-name",
                        "{full_name}"
                        if is_self {
                            span { class: "access-you", "(You)" }
                        }
                    }
                }
            }
            td { class: "access-email", "{user.email}" }
            td {
                class: "text-center",
                div {
                    class: "access-badges",
                    if user.is_admin {
                        Badge {
                            variant: BadgeVariant::Default,
                            Icon { icon: FaShieldHalved, width: 10, height: 10 }
                            "Admin"
                        }
                    } else {
                        Badge {
                            variant: BadgeVariant::Outline,
                            Icon { icon: FaTag, width: 10, height: 10 }
                            "Applicant"
                        }
                    }
                    if user.is_archived {
                        Badge {
                            variant: BadgeVariant::Destructive,
                            Icon { icon: FaBoxArchive, width: 10, height: 10 }
                            "Archived"
                        }
                    }
                }
            }
            td {
                class: "text-center",
                Switch {
                    checked: user.is_admin,
                    disabled: toggle_disabled,
                    label: "Admin access",
                    on_toggle: move |_| on_toggle_admin.call(id),
                }
            }
            td {
                class: "text-center",
                if user.is_admin {
                    Button {
                        variant: ButtonVariant::Outline,
                        size: ButtonSize::Small,
                        title: "Reset Password",
                        onclick: move |_| on_reset_password.call(id),
                        Icon { icon: FaKey, width: 14, height: 14 }
                    }
                } else {
                    Button {
                        variant: ButtonVariant::Outline,
                        size: ButtonSize::Small,
                        title: "View Profile",
                        onclick: move |_| on_view_profile.call(id),
                        "View Profile"
                    }
                }
            }
        }
    }
}
