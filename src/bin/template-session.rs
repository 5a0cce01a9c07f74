use std::sync::Arc;

use anyhow::Result;

use template_session::catalog::TemplateStore;
use template_session::config::Config;
use template_session::format::JsonFormatter;
use template_session::notification::LogNotifier;
use template_session::session::TemplateSession;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    // Parse configuration from command line and environment
    let config = Config::from_args_and_env()?;

    // Create and initialize the template store
    let mut store = TemplateStore::new(&config);
    store.initialize().await?;

    let session = TemplateSession::new(
        Arc::new(store),
        Arc::new(LogNotifier),
        Arc::new(JsonFormatter::default()),
    );

    let template = config.get_effective_template();
    session.load_template(&template).await;

    match session.content().await {
        Some(text) => {
            println!("{}", text);
            Ok(())
        }
        None => {
            // The notifier already reported the failure
            std::process::exit(1);
        }
    }
}
