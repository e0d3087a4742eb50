#![allow(non_snake_case)]

#[cfg(feature = "ssr")]
mod config {
    use serde::Deserialize;

    #[derive(Deserialize, Clone, Debug, Default)]
    #[serde(default)]
    pub struct Config {
        pub server: ServerConfig,
        pub api: ApiConfig,
    }

    #[derive(Deserialize, Clone, Debug)]
    #[serde(default)]
    pub struct ServerConfig {
        pub bind: String,
        pub port: u16,
    }

    impl Default for ServerConfig {
        fn default() -> Self {
            Self {
                bind: "0.0.0.0".into(),
                port: 3000,
            }
        }
    }

    /// Where the gateway forwards `/api/*` requests.
    #[derive(Deserialize, Clone, Debug)]
    #[serde(default)]
    pub struct ApiConfig {
        pub upstream: String,
    }

    impl Default for ApiConfig {
        fn default() -> Self {
            Self {
                upstream: "http://localhost:8000".into(),
            }
        }
    }

    pub fn load(path: &str) -> Config {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("failed to parse config {path}: {e}, using defaults");
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("failed to read config {path}: {e}, using defaults");
                Config::default()
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn missing_sections_fall_back_to_defaults() {
            let config: Config = toml::from_str("[api]\nupstream = \"https://api.greencredits.ie\"\n").unwrap();
            assert_eq!(config.api.upstream, "https://api.greencredits.ie");
            assert_eq!(config.server.port, 3000);
            assert_eq!(config.server.bind, "0.0.0.0");
        }

        #[test]
        fn unreadable_file_uses_defaults() {
            let config = load("/nonexistent/gc-console.toml");
            assert_eq!(config.api.upstream, "http://localhost:8000");
        }
    }
}

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::Router;
    use gc_gateway::{gateway_router, AppState};
    use gc_ui::{shell, App};
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use tower_http::trace::TraceLayer;
    use tracing_subscriber::{fmt, EnvFilter};

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let configPath = if let Some(idx) = args.iter().position(|a| a == "--config") {
        args.get(idx + 1)
            .cloned()
            .unwrap_or_else(|| "config.example.toml".into())
    } else {
        "config.example.toml".into()
    };

    let appConfig = config::load(&configPath);
    tracing::info!(
        "loaded config from {configPath}: bind={}:{} upstream={}",
        appConfig.server.bind,
        appConfig.server.port,
        appConfig.api.upstream
    );

    let conf = match get_configuration(None) {
        Ok(conf) => conf,
        Err(e) => {
            tracing::error!("failed to load Leptos configuration: {e}");
            return;
        }
    };
    let leptosOptions = conf.leptos_options;
    let addr = format!("{}:{}", appConfig.server.bind, appConfig.server.port);

    let routes = generate_route_list(App);

    // The gateway carries its own state; merged after the Leptos state is applied.
    let apiRouter = gateway_router(AppState::new(&appConfig.api.upstream));

    let app = Router::new()
        .leptos_routes(&leptosOptions, routes, {
            let leptosOptions = leptosOptions.clone();
            move || shell(leptosOptions.clone())
        })
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptosOptions)
        .merge(apiRouter)
        .layer(TraceLayer::new_for_http());

    tracing::info!("listening on {addr}");
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("failed to bind to {addr}: {e}");
            return;
        }
    };
    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        tracing::error!("server exited with error: {e}");
    }
}

#[cfg(not(feature = "ssr"))]
fn main() {}
