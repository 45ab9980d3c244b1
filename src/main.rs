use random_quiz_client::{app_state::AppState, config::Config, errors::AppResult, views::LoginView};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    if let Err(err) = run().await {
        log::error!("{} ({})", err, err.error_code());
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let config = Config::from_env();
    config.validate()?;
    log::info!("Using quiz API at {}", config.api_url);

    let mut state = AppState::new(config)?;

    let username = std::env::var("QUIZ_USERNAME").ok();
    let password = std::env::var("QUIZ_PASSWORD").ok();
    let (Some(username), Some(password)) = (username, password) else {
        log::info!("QUIZ_USERNAME/QUIZ_PASSWORD not set; skipping login");
        return Ok(());
    };

    let mut login = LoginView { username, password };
    login.submit(&mut state.session).await?;
    if let Some(seconds) = state.session.session().seconds_until_expiry(chrono::Utc::now()) {
        log::info!("Signed in; token valid for {}s", seconds);
    }

    let topics = state.topics.list(true).await?;
    log::info!("{} topics available", topics.len());
    for topic in topics {
        log::info!("  [{}] {}", topic.id, topic.name);
    }

    login.logout(&mut state.session);
    Ok(())
}
