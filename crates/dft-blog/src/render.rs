/// HTML fragments for posts: full listing cards, homepage preview cards, and the standalone
/// post page.
///
/// Text taken from the content index (titles, excerpts, tags, metadata) is escaped. The
/// optional `content` body is an HTML fragment and is embedded as-is.
use crate::model::{CategoryMap, Post};

const IMAGE_PLACEHOLDER: &str = "📊";
const SITE_URL: &str = "https://dft.codes";

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Long-form date such as "January 15, 2025". Unparsable dates are shown verbatim.
pub fn format_long_date(post: &Post) -> String {
    match post.published_on() {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => post.date.clone(),
    }
}

/// Display name for a category id; unknown ids are shown as-is.
pub fn category_display_name<'a>(id: &'a str, categories: &'a CategoryMap) -> &'a str {
    categories.get(id).map(|c| c.name.as_str()).unwrap_or(id)
}

/// Names used by listing cards when the index carries no lookup of its own.
fn builtin_category_name(id: &str) -> Option<&'static str> {
    match id {
        "dft" => Some("DFT"),
        "quantum-materials" => Some("Quantum Materials"),
        "tutorials" => Some("Tutorials"),
        "research" => Some("Research"),
        _ => None,
    }
}

fn tag_list(post: &Post) -> String {
    let tags = post.tags();
    if tags.is_empty() {
        return String::new();
    }
    let spans: String = tags
        .iter()
        .map(|tag| format!(r#"<span class="blog-tag">{}</span>"#, html_escape(tag)))
        .collect();
    format!(r#"<div class="blog-post-tags">{spans}</div>"#)
}

fn read_time(post: &Post, class: &str) -> String {
    match post.read_time.as_deref().filter(|t| !t.is_empty()) {
        Some(t) if class.is_empty() => format!("<span>{}</span>", html_escape(t)),
        Some(t) => format!(r#"<span class="{class}">{}</span>"#, html_escape(t)),
        None => String::new(),
    }
}

/// Card used on the blog listing page.
pub fn render_full_card(post: &Post, categories: &CategoryMap) -> String {
    let title = html_escape(&post.title);
    let href = html_escape(&post.href());
    let category = categories
        .get(&post.category)
        .map(|c| c.name.as_str())
        .or_else(|| builtin_category_name(&post.category))
        .unwrap_or(&post.category);

    let image = match post.image.as_deref().filter(|src| !src.is_empty()) {
        Some(src) => format!(
            r#"<img src="{}" alt="{title}" loading="lazy">"#,
            html_escape(src)
        ),
        None => format!(r#"<div class="placeholder">{IMAGE_PLACEHOLDER}</div>"#),
    };

    format!(
        r#"<article class="blog-post-card" data-category="{category_id}">
    <div class="blog-post-image">{image}</div>
    <div class="blog-post-content">
        <div class="blog-post-meta">
            <span class="blog-post-date">{date}</span>
            <span class="blog-post-category">{category}</span>
            {read_time}
        </div>
        <h2 class="blog-post-title"><a href="{href}">{title}</a></h2>
        <p class="blog-post-excerpt">{excerpt}</p>
        {tags}
        <a href="{href}" class="read-more">Read More</a>
    </div>
</article>"#,
        category_id = html_escape(&post.category),
        date = format_long_date(post),
        category = html_escape(category),
        read_time = read_time(post, "blog-post-read-time"),
        excerpt = html_escape(&post.excerpt),
        tags = tag_list(post),
    )
}

/// Element id of a post's preview card. Cards mounted after page setup are reached through it.
pub fn preview_card_id(slug: &str) -> String {
    format!("preview-{slug}")
}

/// Compact card used in the homepage "recent posts" section.
pub fn render_preview_card(post: &Post, categories: &CategoryMap) -> String {
    format!(
        r#"<div class="blog-preview-card" id="{id}">
    <div class="blog-preview-content">
        <div class="blog-preview-meta">{date} • {category}</div>
        <h3 class="blog-preview-title"><a href="{href}">{title}</a></h3>
        <p class="blog-preview-excerpt">{excerpt}</p>
    </div>
</div>"#,
        id = html_escape(&preview_card_id(&post.slug)),
        date = format_long_date(post),
        category = html_escape(category_display_name(&post.category, categories)),
        href = html_escape(&post.href()),
        title = html_escape(&post.title),
        excerpt = html_escape(&post.excerpt),
    )
}

pub fn render_no_posts() -> String {
    r#"<div class="no-posts">
    <h3>No posts found</h3>
    <p>Try adjusting your search or filter criteria.</p>
</div>"#
        .to_string()
}

/// Contents of the `blog-posts` container.
pub fn render_listing(posts: &[&Post], categories: &CategoryMap) -> String {
    if posts.is_empty() {
        return render_no_posts();
    }
    posts
        .iter()
        .map(|post| render_full_card(post, categories))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Contents of the `recent-posts-container` element.
pub fn render_recent_posts(posts: &[Post], categories: &CategoryMap) -> String {
    let cards: Vec<String> = posts
        .iter()
        .map(|post| render_preview_card(post, categories))
        .collect();
    format!(r#"<div class="areas-grid">{}</div>"#, cards.join("\n"))
}

pub fn render_search_box() -> String {
    r#"<div class="blog-search">
    <input type="text" id="blog-search-input" placeholder="Search blog posts...">
    <span class="search-icon">🔍</span>
</div>"#
        .to_string()
}

fn placeholder_body(post: &Post) -> String {
    format!(
        r#"<p>This is a sample blog post about {topic}. The actual content would be written in markdown or HTML and stored in individual post files.</p>
<h2>Introduction</h2>
<p>This post explores the fascinating world of computational condensed matter physics, specifically focusing on the topics covered in the title.</p>
<h2>Key Concepts</h2>
<ul>
    <li>First-principles calculations</li>
    <li>Electronic structure theory</li>
    <li>Computational methods</li>
    <li>Materials properties</li>
</ul>
<h2>Conclusion</h2>
<p>Understanding these concepts is crucial for advancing our knowledge in computational materials science and developing new materials with desired properties.</p>"#,
        topic = html_escape(&post.title.to_lowercase()),
    )
}

/// Standalone document served at `blog/posts/<slug>.html`.
pub fn render_post_page(post: &Post) -> String {
    let title = html_escape(&post.title);
    let keywords = html_escape(&post.tags().join(", "));
    let author = post
        .author
        .as_deref()
        .map(|a| format!("<span>By {}</span>", html_escape(a)))
        .unwrap_or_default();
    let body = match post.content.as_deref().filter(|c| !c.trim().is_empty()) {
        Some(content) => content.to_string(),
        None => placeholder_body(post),
    };

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - DFT.codes</title>
    <meta name="description" content="{description}">
    <meta name="keywords" content="{keywords}">
    <link rel="stylesheet" href="../../css/style.css">
    <link rel="stylesheet" href="../../css/blog.css">
    <link href="https://fonts.googleapis.com/css2?family=Inter:wght@300;400;500;600;700&display=swap" rel="stylesheet">
    <link rel="canonical" href="{SITE_URL}/blog/posts/{slug}.html">
</head>
<body>
    <nav class="navbar">
        <div class="nav-container">
            <div class="nav-logo"><a href="../../index.html">Nishi P. Hazarika</a></div>
            <div class="nav-menu" id="nav-menu">
                <a href="../../index.html" class="nav-link">Home</a>
                <a href="../../about.html" class="nav-link">About</a>
                <a href="../../projects.html" class="nav-link">Projects</a>
                <a href="../../blog.html" class="nav-link active">Blog</a>
                <a href="../../contact.html" class="nav-link">Contact</a>
            </div>
            <div class="hamburger" id="hamburger"><span></span><span></span><span></span></div>
        </div>
    </nav>

    <main class="blog-post">
        <header class="blog-post-header">
            <h1>{title}</h1>
            <div class="meta">
                {author}
                <span>{date}</span>
                {read_time}
            </div>
            {tags}
        </header>

        <div class="blog-post-body">
{body}
        </div>

        <div class="author-info">
            <h3>About the Author</h3>
            <p>Nishi Prabhat Hazarika is an MSc Physics student at IIT Hyderabad specializing in computational condensed matter physics, with focus on density functional theory and topological quantum materials.</p>
        </div>

        <div class="blog-navigation">
            <div class="nav-prev"><div class="nav-label">Previous Post</div><a href="#">Previous Article</a></div>
            <div class="nav-next"><div class="nav-label">Next Post</div><a href="#">Next Article</a></div>
        </div>
    </main>

    <footer class="footer">
        <div class="container">
            <p>&copy; 2025 Nishi Prabhat Hazarika. All rights reserved.</p>
        </div>
    </footer>

    <script src="../../js/main.js"></script>
</body>
</html>"##,
        description = html_escape(&post.excerpt),
        slug = html_escape(&post.slug),
        date = format_long_date(post),
        read_time = read_time(post, ""),
        tags = tag_list(post),
    )
}
