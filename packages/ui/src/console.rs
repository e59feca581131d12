//! Application-wide configuration and the user directory, provided as context.

use access::ConsoleConfig;
use api::HttpDirectory;
use dioxus::prelude::*;

/// Provides the [`ConsoleConfig`] and an [`HttpDirectory`] built from it.
#[component]
pub fn ConsoleProvider(config: ConsoleConfig, children: Element) -> Element {
    let configured = config.api.base_url.clone();
    use_context_provider(move || HttpDirectory::new(resolve_base_url(&configured)));
    use_context_provider(|| config);

    rsx! {
        {children}
    }
}

pub fn use_console_config() -> ConsoleConfig {
    use_context::<ConsoleConfig>()
}

pub fn use_directory() -> HttpDirectory {
    use_context::<HttpDirectory>()
}

/// reqwest needs absolute URLs; an empty base means the page's own origin.
fn resolve_base_url(configured: &str) -> String {
    if !configured.is_empty() {
        return configured.to_string();
    }
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(origin) = web_sys::window().and_then(|w| w.location().origin().ok()) {
            return origin;
        }
    }
    tracing::warn!("no api base_url configured; requests will use relative paths");
    String::new()
}
