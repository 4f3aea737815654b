pub mod models;
pub mod config;
pub mod cli;
pub mod classifier;
pub mod transport;
pub mod render;
pub mod widget;
pub mod console;

use classifier::KeywordClassifier;
use cli::Args;
use config::keywords::{ load_keywords, KeywordConfig };
use log::info;
use render::TerminalRenderer;
use std::error::Error;
use std::sync::Arc;
use tokio::io::BufReader;
use tokio::sync::Mutex;
use transport::HttpTransport;
use widget::ChatWidget;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Chat Configuration ---");
    info!("Server URL: {}", args.server_url);
    info!("Chat Path: {}", args.chat_path);
    info!("Mode: {}", args.mode);
    info!("Language: {}", args.language.as_deref().unwrap_or("(server default)"));
    info!("Keywords Path: {}", args.keywords_path.as_deref().unwrap_or("(built-in)"));
    info!("Viewport Lines: {}", args.viewport_lines);
    info!("-------------------------");

    let keywords = match &args.keywords_path {
        Some(path) => load_keywords(path)?,
        None => Arc::new(KeywordConfig::default()),
    };
    let transport = HttpTransport::new(&args.server_url, Some(&args.chat_path))?;
    info!("Posting messages to: {}", transport.endpoint());

    let view = Arc::new(Mutex::new(TerminalRenderer::stdout(args.viewport_lines)));
    let widget = ChatWidget::new(
        args.mode,
        Arc::new(transport),
        KeywordClassifier::new(keywords),
        view
    ).with_language(args.language.clone());

    let sent = console::drive(BufReader::new(tokio::io::stdin()), widget).await?;
    info!("Session ended after {} message(s)", sent);

    Ok(())
}
