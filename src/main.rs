use std::sync::Arc;

use anyhow::Context;

use hubbly_onboarding::auth::{AnonymousAuth, AuthService, OtpFlow};
use hubbly_onboarding::config::{AppConfig, StoreConfig};
use hubbly_onboarding::store::{LibSqlProfileStore, ProfileStore, RestProfileStore};
use hubbly_onboarding::wizard::{WizardDeps, WizardManager, WizardRouteState, wizard_routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env().context("Invalid configuration")?;

    eprintln!("Hubbly onboarding v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: http://0.0.0.0:{}/api/wizard/status", config.port);

    // ── Profile store ───────────────────────────────────────────────────
    let store: Arc<dyn ProfileStore> = match &config.store {
        StoreConfig::Local { db_path } => {
            let store = LibSqlProfileStore::new_local(db_path)
                .await
                .with_context(|| format!("Failed to open database at {}", db_path.display()))?;
            eprintln!("   Store: {}", db_path.display());
            Arc::new(store)
        }
        StoreConfig::Rest { base_url, api_key } => {
            eprintln!("   Store: {base_url}");
            Arc::new(RestProfileStore::new(base_url.clone(), api_key.clone()))
        }
    };

    // No phone provider is wired in: every save goes to the demo tables.
    let auth: Arc<dyn AuthService> = Arc::new(AnonymousAuth);
    eprintln!("   Auth: anonymous (demo saves)");

    let manager = Arc::new(WizardManager::new(
        WizardDeps {
            store,
            auth: Arc::clone(&auth),
            media: None,
        },
        config.validation_rules(),
        config.service_timeout,
    ));
    let otp = Arc::new(OtpFlow::new(
        auth,
        config.default_country_code.clone(),
        config.service_timeout,
    ));

    let app = wizard_routes(WizardRouteState { manager, otp });

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .with_context(|| format!("Failed to bind port {}", config.port))?;
    tracing::info!(port = config.port, "Wizard API started");
    axum::serve(listener, app).await?;

    Ok(())
}
