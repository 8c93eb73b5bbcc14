use std::sync::Arc;

use tracing::info;

use reletter_client::api::HttpDiaryApi;
use reletter_client::config::ClientConfig;
use reletter_client::notify::Notifier;
use reletter_client::page::{GroupDateKey, GroupDiaryPage, LoadOutcome};
use reletter_client::render::DiaryPageView;
use reletter_client::session::StaticSession;
use reletter_client::sidebar::{Sidebar, SidebarView};

const USAGE: &str = "usage: reletter <group-id> [YYYY-MM-DD] [--json]";

/// Alerts go to stderr so they stay visible next to the rendered page.
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&self, message: &str) {
        eprintln!("[!] {}", message);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reletter_viewer=debug,reletter_client=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut json = false;
    let mut positional = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(());
            }
            _ => positional.push(arg),
        }
    }
    let Some(group_id) = positional.first().cloned() else {
        anyhow::bail!(USAGE);
    };
    let key = GroupDateKey::with_default_date(group_id, positional.get(1).map(String::as_str));

    // Config
    let config = ClientConfig::from_env();
    info!("Using diary API at {}", config.api_url);

    let api = Arc::new(HttpDiaryApi::new(&config)?);
    let session = Arc::new(StaticSession::new(config.access_token.clone()));
    let page = GroupDiaryPage::new(api.clone(), session.clone(), Arc::new(StderrNotifier));
    let mut sidebar = Sidebar::new(api.clone(), session);

    let (outcome, ()) = tokio::join!(page.load(&key), sidebar.refresh());
    info!("Page load finished: {:?}", outcome);

    let view = DiaryPageView::from_state(&page.state(), api.base_url());
    if json {
        let doc = serde_json::json!({
            "page": view,
            "outcome": format!("{:?}", outcome),
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print_sidebar(&sidebar.view());
        print_page(&view);
    }

    if matches!(outcome, LoadOutcome::MissingCredential | LoadOutcome::InvalidCredential) {
        anyhow::bail!("Not signed in: {:?}", outcome);
    }
    Ok(())
}

fn print_sidebar(view: &SidebarView) {
    println!("📂 그룹");
    match view.groups_empty {
        Some(msg) => println!("  {}", msg),
        None => view.group_labels.iter().for_each(|l| println!("  {}", l)),
    }
    println!("👥 친구 목록");
    match view.friends_empty {
        Some(msg) => println!("  {}", msg),
        None => view.friend_labels.iter().for_each(|l| println!("  {}", l)),
    }
    println!();
}

fn print_page(view: &DiaryPageView) {
    println!("{}", view.heading);
    if !view.date_label.is_empty() {
        println!("{}", view.date_label);
    }
    println!("읽음 {} · 안 읽음 {}", view.tally.read, view.tally.unread);
    println!();

    if let Some(msg) = view.empty_message {
        println!("{}", msg);
        return;
    }
    for card in &view.cards {
        println!("## {}", card.title);
        println!("{}", card.meta);
        if let Some(url) = &card.image_url {
            println!("[image] {}", url);
        }
        println!("{}", card.content);
        println!();
    }
}
