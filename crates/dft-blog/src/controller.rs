/// Page controller: one-shot setup plus the event loop that ties user input to the
/// fetch → filter → render pipeline.
///
/// Every handler runs to completion before the next event is taken. The only work that
/// outlives a handler is the content load, a pending contact submission, and the timers
/// (search debounce, notification expiry); `run` selects over all of them.
use futures::future::{BoxFuture, OptionFuture};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::contact::{ContactError, ContactForm, ContactMessage, ContactTransport, CONTACT_FORM};
use crate::filter::recent_posts;
use crate::menu::{self, MenuEvent, MenuState};
use crate::model::LoadedContent;
use crate::navigation::{anchor_scroll_top, is_active_link, navbar_background, NAVBAR};
use crate::notify::{NotificationCenter, NOTIFICATIONS};
use crate::render::{preview_card_id, render_recent_posts, render_search_box};
use crate::reveal::{RevealTracker, Visibility, REVEAL_SELECTORS};
use crate::target::RenderTarget;
use crate::timing::{Debouncer, Throttle, SCROLL_THROTTLE, SEARCH_DEBOUNCE};
use crate::view::{render_view, ViewState};

pub const BLOG_POSTS: &str = "#blog-posts";
pub const BLOG_HEADER: &str = ".blog-header";
pub const BLOG_SEARCH: &str = ".blog-search";
pub const SEARCH_INPUT: &str = "#blog-search-input";
pub const RECENT_POSTS: &str = "#recent-posts-container";
const ACTIVE_CLASS: &str = "active";

pub fn filter_button(category: &str) -> String {
    format!(r#".filter-btn[data-category="{category}"]"#)
}

pub fn nav_link(href: &str) -> String {
    format!(r#".nav-link[href="{href}"]"#)
}

/// What the page looks like before any event arrives.
#[derive(Debug, Clone, Default)]
pub struct PageSetup<'a> {
    /// Location path, e.g. `/blog.html`.
    pub path: &'a str,
    /// Hrefs of the navigation links.
    pub nav_links: &'a [&'a str],
    /// Category ids that may have a filter button, `all` included.
    pub filter_categories: &'a [&'a str],
    pub recent_limit: usize,
}

#[derive(Debug, Clone)]
pub enum PageEvent {
    SearchInput(String),
    FilterClick(String),
    Menu(MenuEvent),
    Scroll { y: f64 },
    AnchorClick {
        href: String,
        target_top: Option<f64>,
        header_height: Option<f64>,
    },
    Intersect { selector: String, ratio: f64 },
    ContactSubmit(ContactMessage),
    NotificationClick(u64),
}

pub struct PageController<T: RenderTarget> {
    target: T,
    content: Option<LoadedContent>,
    view: ViewState,
    filter_categories: Vec<String>,
    recent_limit: usize,
    search: Debouncer<String>,
    scroll: Throttle,
    navbar_background: Option<&'static str>,
    scroll_top: Option<f64>,
    reveal: RevealTracker,
    notifications: NotificationCenter,
    contact: Option<ContactForm>,
    transport: Box<dyn ContactTransport>,
    submission: Option<BoxFuture<'static, Result<(), ContactError>>>,
    listing_renders: usize,
}

impl<T: RenderTarget> PageController<T> {
    pub fn new(target: T, transport: Box<dyn ContactTransport>) -> Self {
        Self {
            target,
            content: None,
            view: ViewState::default(),
            filter_categories: Vec::new(),
            recent_limit: 0,
            search: Debouncer::new(SEARCH_DEBOUNCE),
            scroll: Throttle::new(SCROLL_THROTTLE),
            navbar_background: None,
            scroll_top: None,
            reveal: RevealTracker::new(),
            notifications: NotificationCenter::new(),
            contact: None,
            transport,
            submission: None,
            listing_renders: 0,
        }
    }

    /// One-shot page setup. Each behaviour is wired only if its elements exist.
    pub fn init(&mut self, setup: &PageSetup<'_>) {
        if self.target.query(BLOG_HEADER) && !self.target.query(BLOG_SEARCH) {
            self.target
                .insert_after(BLOG_HEADER, BLOG_SEARCH, &render_search_box());
        }

        self.filter_categories = setup
            .filter_categories
            .iter()
            .filter(|c| self.target.query(&filter_button(c)))
            .map(|c| c.to_string())
            .collect();
        self.mark_active_filter();

        for href in setup.nav_links {
            let selector = nav_link(href);
            self.target
                .set_class(&selector, ACTIVE_CLASS, is_active_link(href, setup.path));
        }

        MenuState::Closed.write(&mut self.target);

        for selector in REVEAL_SELECTORS {
            self.observe(selector);
        }

        if self.target.query(CONTACT_FORM) {
            self.contact = Some(ContactForm::default());
            if !self.target.query(NOTIFICATIONS) {
                self.target.insert_after(CONTACT_FORM, NOTIFICATIONS, "");
            }
        }

        self.recent_limit = setup.recent_limit;

        debug!(
            search = self.target.query(SEARCH_INPUT),
            filters = self.filter_categories.len(),
            contact = self.contact.is_some(),
            "page initialized"
        );
    }

    /// Install freshly loaded content and render every container that exists.
    pub fn set_content(&mut self, content: LoadedContent) {
        info!(posts = content.posts.len(), origin = ?content.origin, "content ready");
        self.content = Some(content);
        self.render_listing();
        self.render_recent();
    }

    /// Drive the page until `events` closes and no load, debounce, or submission is pending.
    pub async fn run(
        mut self,
        load: BoxFuture<'static, LoadedContent>,
        mut events: mpsc::Receiver<PageEvent>,
    ) -> Self {
        let mut load = Some(load);
        let mut events_open = true;

        loop {
            let debounce_at = self.search.deadline();
            let expiry_at = self.notifications.next_expiry();
            if !events_open && load.is_none() && debounce_at.is_none() && self.submission.is_none() {
                break;
            }

            tokio::select! {
                Some(content) = OptionFuture::from(load.as_mut()), if load.is_some() => {
                    load = None;
                    self.set_content(content);
                }
                Some(result) = OptionFuture::from(self.submission.as_mut()), if self.submission.is_some() => {
                    self.submission = None;
                    if let Some(form) = self.contact.as_mut() {
                        form.finish(result, &mut self.notifications, Instant::now());
                    }
                    self.render_notifications();
                }
                event = events.recv(), if events_open => match event {
                    Some(event) => self.handle(event, Instant::now()),
                    None => events_open = false,
                },
                _ = tokio::time::sleep_until(debounce_at.unwrap_or_else(Instant::now)), if debounce_at.is_some() => {
                    self.flush_search(Instant::now());
                }
                _ = tokio::time::sleep_until(expiry_at.unwrap_or_else(Instant::now)), if expiry_at.is_some() => {
                    self.expire_notifications(Instant::now());
                }
            }
        }
        self
    }

    pub fn handle(&mut self, event: PageEvent, now: Instant) {
        match event {
            PageEvent::SearchInput(text) => {
                if self.target.query(SEARCH_INPUT) {
                    self.search.push(text, now);
                }
            }
            PageEvent::FilterClick(category) => self.select_category(&category),
            PageEvent::Menu(event) => {
                menu::handle(&mut self.target, event);
            }
            PageEvent::Scroll { y } => {
                if self.target.query(NAVBAR) && self.scroll.try_acquire(now) {
                    self.navbar_background = Some(navbar_background(y));
                }
            }
            PageEvent::AnchorClick {
                href,
                target_top,
                header_height,
            } => {
                if let Some(top) = anchor_scroll_top(&href, target_top, header_height) {
                    self.scroll_top = Some(top);
                }
            }
            PageEvent::Intersect { selector, ratio } => {
                if self.reveal.on_intersect(&selector, ratio) {
                    Visibility::Revealed.write(&mut self.target, &selector);
                    debug!(selector = %selector, "element revealed");
                }
            }
            PageEvent::ContactSubmit(fields) => self.submit_contact(fields),
            PageEvent::NotificationClick(id) => {
                if self.notifications.dismiss(id) {
                    self.render_notifications();
                }
            }
        }
    }

    /// Apply the debounced search text if its quiet period has elapsed.
    pub fn flush_search(&mut self, now: Instant) {
        if let Some(query) = self.search.take_due(now) {
            self.view = self.view.with_query(&query);
            self.render_listing();
        }
    }

    fn select_category(&mut self, category: &str) {
        if !self.filter_categories.iter().any(|c| c == category) {
            return;
        }
        self.view = self.view.with_category(category);
        self.mark_active_filter();
        self.render_listing();
    }

    fn mark_active_filter(&mut self) {
        for category in &self.filter_categories {
            let active = category == self.view.category();
            self.target
                .set_class(&filter_button(category), ACTIVE_CLASS, active);
        }
    }

    fn submit_contact(&mut self, fields: ContactMessage) {
        let Some(form) = self.contact.as_mut() else {
            return;
        };
        if form.in_flight() {
            return;
        }
        form.fields = fields;
        if let Some(message) = form.begin() {
            self.submission = Some(self.transport.send(message));
        }
    }

    fn render_listing(&mut self) {
        let Some(content) = &self.content else {
            return;
        };
        if !self.target.query(BLOG_POSTS) {
            return;
        }
        let markup = render_view(content, &self.view);
        self.target.mount(BLOG_POSTS, &markup);
        self.listing_renders += 1;
    }

    fn render_recent(&mut self) {
        let Some(content) = &self.content else {
            return;
        };
        if !self.target.query(RECENT_POSTS) {
            return;
        }
        let recent = recent_posts(&content.posts, self.recent_limit);
        let markup = render_recent_posts(&recent, &content.categories);
        self.target.mount(RECENT_POSTS, &markup);
        // Cards mounted after setup still need to fade in.
        let selectors: Vec<String> = recent.iter().map(|p| preview_card_selector(&p.slug)).collect();
        for selector in &selectors {
            self.observe(selector);
        }
    }

    /// Track `selector` for reveal and write its current visibility, if it is on the page.
    fn observe(&mut self, selector: &str) {
        if self.target.query(selector) {
            let state = self.reveal.register(selector);
            state.write(&mut self.target, selector);
        }
    }

    /// Remove banners whose display time has run out.
    pub fn expire_notifications(&mut self, now: Instant) {
        self.notifications.expire(now);
        self.render_notifications();
    }

    fn render_notifications(&mut self) {
        let markup = self.notifications.render();
        self.target.mount(NOTIFICATIONS, &markup);
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn into_target(self) -> T {
        self.target
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn menu_state(&self) -> MenuState {
        MenuState::read(&self.target)
    }

    pub fn navbar_background(&self) -> Option<&'static str> {
        self.navbar_background
    }

    pub fn scroll_top(&self) -> Option<f64> {
        self.scroll_top
    }

    pub fn reveal(&self) -> &RevealTracker {
        &self.reveal
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn contact_form(&self) -> Option<&ContactForm> {
        self.contact.as_ref()
    }

    pub fn listing_renders(&self) -> usize {
        self.listing_renders
    }
}

pub fn preview_card_selector(slug: &str) -> String {
    format!("#{}", preview_card_id(slug))
}
