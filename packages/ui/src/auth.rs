//! Session context for the UI.

use access::SessionState;
use dioxus::prelude::*;

use crate::use_directory;

/// The current session. `loading` stays true until the provider has answered once.
pub fn use_session() -> Signal<SessionState> {
    use_context::<Signal<SessionState>>()
}

/// Fetches the session on mount and shares it with every gated shell below.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let directory = use_directory();
    let mut session = use_signal(SessionState::default);

    let _ = use_resource(move || {
        let directory = directory.clone();
        async move {
            match directory.session().await {
                Ok(user) => {
                    tracing::debug!(signed_in = user.is_some(), "session loaded");
                    session.set(SessionState {
                        user,
                        loading: false,
                    });
                }
                Err(e) => {
                    tracing::warn!("Failed to load session: {e}");
                    session.set(SessionState::signed_out());
                }
            }
        }
    });

    use_context_provider(|| session);

    rsx! {
        {children}
    }
}
