use access::{ConsoleConfig, Redirect, RouteConfig};
use dioxus::prelude::*;

use ui::components::ToastProvider;
use ui::{AuthProvider, ConsoleProvider, THEME_CSS};
use views::{AdminDashboard, AdminSettings, AdminShell, ApplicantDashboard, ApplicantShell, Home};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Home {},
    #[layout(AdminShell)]
        #[route("/admin/dashboard")]
        AdminDashboard {},
        #[route("/admin/settings")]
        AdminSettings {},
    #[end_layout]
    #[layout(ApplicantShell)]
        #[route("/applicant/dashboard")]
        ApplicantDashboard {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    {
        match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime.block_on(launch_server()),
            Err(e) => eprintln!("Failed to start tokio runtime: {e}"),
        }
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() {
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use tracing_subscriber::EnvFilter;

    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let router = axum::Router::new().serve_dioxus_application(ServeConfig::new(), App);

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            return;
        }
    };
    tracing::info!("Server listening on {}", addr);

    if let Err(e) = axum::serve(listener, router.into_make_service()).await {
        tracing::error!("Server error: {}", e);
    }
}

/// The embedded `console.toml`, or defaults when it does not parse.
fn load_config() -> ConsoleConfig {
    match ConsoleConfig::from_toml(include_str!("../console.toml")) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Invalid {}, using defaults: {e}", ConsoleConfig::filename());
            ConsoleConfig::default()
        }
    }
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: THEME_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        ConsoleProvider {
            config,
            ToastProvider {
                AuthProvider {
                    Router::<Route> {}
                }
            }
        }
    }
}

/// Replace the current entry with the configured path for `to`.
///
/// Paths that are not routes of this app fall back to the public entry.
pub(crate) fn follow_redirect(navigator: Navigator, routes: &RouteConfig, to: Redirect) {
    let path = to.path(routes);
    let route = path.parse::<Route>().unwrap_or_else(|_| {
        tracing::warn!("Redirect target {path} is not a known route");
        Route::Home {}
    });
    tracing::debug!(?to, "session gate redirect");
    navigator.replace(route);
}
