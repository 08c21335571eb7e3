// ABOUTME: Line-oriented terminal transport for browsing sessions.
// ABOUTME: Reads one command per line, applies it to the session, and redraws the active page.

use std::io::{self, BufRead, Write};

use rsspager_feed::html_to_text;
use rsspager_menu::{Article, Fetcher, PageView, Renderer, Reply, Session};

/// Renders item descriptions as plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextRenderer;

impl Renderer for PlainTextRenderer {
    fn render(&self, description: &str) -> String {
        html_to_text(description)
    }
}

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Select(&'a str),
    Add(&'a str),
    List,
    Quit,
    Blank,
}

pub fn parse_command(line: &str) -> Command<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Command::Blank;
    }

    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    match word {
        "add" | "/add" => Command::Add(rest.trim()),
        "list" | "/list" => Command::List,
        "quit" | "/quit" => Command::Quit,
        _ => Command::Select(line),
    }
}

/// Runs the command loop until `quit` or end of input.
pub fn run<F, R, I, W>(session: &mut Session<F, R>, input: I, out: &mut W) -> io::Result<()>
where
    F: Fetcher,
    R: Renderer,
    I: BufRead,
    W: Write,
{
    render_page(out, &session.page_view())?;

    for line in input.lines() {
        let line = line?;
        match parse_command(&line) {
            Command::Blank => continue,
            Command::Quit => break,
            Command::List => {}
            Command::Add(url) => match session.add_feed(url) {
                Ok(index) => {
                    let title = session
                        .navigator()
                        .feeds()
                        .get(index)
                        .map(|doc| doc.channel.title.clone())
                        .unwrap_or_default();
                    writeln!(out, "added [feed:{index}] {title}")?;
                }
                Err(err) => {
                    tracing::warn!(url, error = %err, "add feed failed");
                    writeln!(out, "failed to add feed: {err}")?;
                }
            },
            Command::Select(token) => {
                if let Reply::Article(article) = session.handle(token) {
                    render_article(out, &article)?;
                }
            }
        }
        render_page(out, &session.page_view())?;
        out.flush()?;
    }

    Ok(())
}

/// One `[token] text` row per entry, then the navigation group.
pub fn render_page(out: &mut impl Write, view: &PageView) -> io::Result<()> {
    for entry in &view.entries {
        writeln!(out, "[{}] {}", entry.token, entry.text)?;
    }

    let mut nav = vec!["[back]".to_string()];
    if view.has_previous {
        nav.push("[previous]".to_string());
    }
    nav.push(format!("[page {}]", view.page_label()));
    if view.has_next {
        nav.push("[next]".to_string());
    }
    writeln!(out, "{}", nav.join(" "))
}

pub fn render_article(out: &mut impl Write, article: &Article) -> io::Result<()> {
    let title = if article.title.trim().is_empty() {
        "(untitled)"
    } else {
        article.title.as_str()
    };
    writeln!(out, "== {title} ==")?;
    if let Some(link) = &article.link {
        writeln!(out, "{link}")?;
    }
    if let Some(published) = article.published {
        writeln!(out, "published: {}", published.to_rfc2822())?;
    }
    writeln!(out)?;
    writeln!(out, "{}", article.body)?;
    writeln!(out)
}
