mod config;
mod contact;
mod controller;
mod error;
mod fetcher;
mod filter;
mod menu;
mod model;
mod navigation;
mod notify;
mod render;
mod reveal;
mod source;
mod target;
mod timing;
mod view;

use futures::FutureExt;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::{Config, PageKind};
use contact::SimulatedTransport;
use controller::{filter_button, nav_link, PageController, PageEvent, PageSetup};
use error::AppError;
use fetcher::{fallback_categories, ContentIndexFetcher};
use filter::ALL_CATEGORIES;
use portfolio_common::http::{HttpClient, HttpClientConfig};
use target::MemoryDocument;

const NAV_LINKS: [&str; 5] = [
    "index.html",
    "about.html",
    "projects.html",
    "blog.html",
    "contact.html",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting dft-blog");

    let config = Config::from_env()?;
    info!(
        index = ?config.index,
        page = ?config.page,
        category = %config.category,
        query = %config.query,
        "configuration loaded"
    );

    let source = source::from_config(&config, || {
        let http_config = HttpClientConfig::from_env();
        info!(
            timeout_ms = http_config.timeout.as_millis(),
            max_retries = http_config.max_retries,
            "http client configured"
        );
        Ok(HttpClient::new(http_config)?)
    })?;
    info!(source = %source.describe(), "content source ready");
    let fetcher = ContentIndexFetcher::new(source);

    let markup = match config.page {
        PageKind::Post => render_post(&fetcher, &config).await?,
        PageKind::Blog | PageKind::Home => drive_page(fetcher, &config).await,
    };

    println!("{markup}");
    info!("dft-blog finished");
    Ok(())
}

async fn render_post(fetcher: &ContentIndexFetcher, config: &Config) -> Result<String, AppError> {
    let slug = config.slug.as_deref().unwrap_or_default();
    let content = fetcher.load().await;
    let post = content
        .posts
        .iter()
        .find(|p| p.slug == slug)
        .ok_or_else(|| AppError::Index(format!("no post with slug {slug:?}")))?;
    info!(slug, title = %post.title, "rendering post page");
    Ok(render::render_post_page(post))
}

/// Run the page controller against a headless document, replaying the configured filter as
/// user input, and return the resulting markup.
async fn drive_page(fetcher: ContentIndexFetcher, config: &Config) -> String {
    let mut categories: Vec<String> = std::iter::once(ALL_CATEGORIES.to_string())
        .chain(fallback_categories().into_keys())
        .collect();
    categories[1..].sort();
    if !categories.contains(&config.category) {
        categories.push(config.category.clone());
    }
    let category_refs: Vec<&str> = categories.iter().map(String::as_str).collect();

    let (path, document) = match config.page {
        PageKind::Home => ("/index.html", home_document()),
        _ => ("/blog.html", blog_document(&category_refs)),
    };

    let mut page = PageController::new(document, Box::new(SimulatedTransport::default()));
    page.init(&PageSetup {
        path,
        nav_links: &NAV_LINKS,
        filter_categories: &category_refs,
        recent_limit: config.recent_limit,
    });

    let mut replay = Vec::new();
    if config.category != ALL_CATEGORIES {
        replay.push(PageEvent::FilterClick(config.category.clone()));
    }
    if !config.query.trim().is_empty() {
        replay.push(PageEvent::SearchInput(config.query.clone()));
    }
    let (tx, rx) = mpsc::channel(replay.len().max(1));
    for event in replay {
        if let Err(e) = tx.send(event).await {
            warn!(event = ?e.0, "page stopped accepting events");
        }
    }
    drop(tx);

    let load = async move { fetcher.load().await }.boxed();
    let page = page.run(load, rx).await;
    info!(
        category = page.view().category(),
        query = page.view().query(),
        renders = page.listing_renders(),
        hidden_cards = page.reveal().hidden_count(),
        menu = ?page.menu_state(),
        navbar = ?page.navbar_background(),
        scroll_top = ?page.scroll_top(),
        notifications = page.notifications().visible().count(),
        contact_pending = page.contact_form().is_some_and(|f| f.in_flight()),
        listing_bytes = page
            .target()
            .markup(controller::BLOG_POSTS)
            .map_or(0, str::len),
        "page settled"
    );
    page.into_target().dump()
}

fn page_chrome() -> Vec<String> {
    let mut selectors = vec![
        navigation::NAVBAR.to_string(),
        menu::HAMBURGER.to_string(),
        menu::NAV_MENU.to_string(),
    ];
    selectors.extend(NAV_LINKS.iter().map(|href| nav_link(href)));
    selectors
}

fn blog_document(categories: &[&str]) -> MemoryDocument {
    let mut selectors = page_chrome();
    selectors.push(controller::BLOG_HEADER.to_string());
    selectors.extend(categories.iter().map(|c| filter_button(c)));
    selectors.push(controller::BLOG_POSTS.to_string());
    MemoryDocument::with_elements(selectors.iter().map(String::as_str))
}

fn home_document() -> MemoryDocument {
    let mut selectors = page_chrome();
    selectors.push(".area-card".to_string());
    selectors.push(controller::RECENT_POSTS.to_string());
    selectors.push(contact::CONTACT_FORM.to_string());
    MemoryDocument::with_elements(selectors.iter().map(String::as_str))
}
