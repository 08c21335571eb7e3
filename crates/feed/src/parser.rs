// ABOUTME: Namespace-aware RSS 2.0 decoder built on quick-xml's NsReader.
// ABOUTME: Maps element/attribute names onto the Document model, then runs postprocess + validation.

use std::str::FromStr;

use quick_xml::encoding::Decoder;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use tracing::debug;

use crate::error::FeedError;
use crate::link::ATOM_NAMESPACE;
use crate::models::{Category, Cloud, Document, Enclosure, Guid, Image, Item, Link, Source};
use crate::time_parse::parse_feed_date;
use crate::validate::ValidationOptions;

/// Parses raw feed bytes into a ready-to-use document.
///
/// # Arguments
/// * `data` - Raw RSS 2.0 bytes
/// * `origin_url` - URL the bytes were fetched from, used to synthesize a
///   self-link when the feed doesn't declare one
/// * `options` - Optional validation rules
///
/// # Returns
/// * `Ok(Document)` - Decoded, normalized, and validated document
/// * `Err(FeedError)` - Nothing is returned on failure, not even a partial document
pub fn parse_document(
    data: &[u8],
    origin_url: Option<&str>,
    options: &ValidationOptions,
) -> Result<Document, FeedError> {
    let mut doc = decode_document(data)?;

    doc.postprocess();
    if let Some(origin) = origin_url {
        if doc.resolve_self_link(origin) {
            debug!(origin, "synthesized atom self-link");
        }
    }
    doc.validate(options)?;

    debug!(
        title = %doc.channel.title,
        items = doc.channel.items.len(),
        "parsed rss document"
    );
    Ok(doc)
}

/// Decodes bytes into the document model without postprocessing or validation.
///
/// Unknown elements are skipped. Elements in a foreign namespace are skipped
/// together with everything nested inside them; `link` is also accepted in the
/// Atom namespace. A default namespace declared on `<rss>` itself counts as RSS.
pub fn decode_document(data: &[u8]) -> Result<Document, FeedError> {
    let mut reader = NsReader::from_reader(data);
    let decoder = reader.decoder();
    let mut buf = Vec::new();

    let mut builder = Builder::default();
    let mut stack: Vec<Open> = Vec::new();
    let mut rss_namespace: Option<Vec<u8>> = None;

    loop {
        buf.clear();
        let (ns, event) = reader
            .read_resolved_event_into(&mut buf)
            .map_err(FeedError::decode)?;

        if stack.is_empty() && !builder.seen_root {
            if let (ResolveResult::Bound(Namespace(uri)), Event::Start(e) | Event::Empty(e)) =
                (&ns, &event)
            {
                if e.local_name().as_ref() == b"rss" && *uri != ATOM_NAMESPACE.as_bytes() {
                    rss_namespace = Some(uri.to_vec());
                }
            }
        }
        let scope = Scope::of(&ns, rss_namespace.as_deref());

        match event {
            Event::Start(ref e) => {
                let open = Open::new(e, scope, namespace_of(&ns), decoder)?;
                builder.start(&stack, &open)?;
                stack.push(open);
            }
            Event::Empty(ref e) => {
                let open = Open::new(e, scope, namespace_of(&ns), decoder)?;
                builder.start(&stack, &open)?;
                builder.end(&stack, open)?;
            }
            Event::End(_) => {
                if let Some(open) = stack.pop() {
                    builder.end(&stack, open)?;
                }
            }
            Event::Text(ref e) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&e.decode().map_err(FeedError::decode)?);
                }
            }
            Event::CData(ref e) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&e.decode().map_err(FeedError::decode)?);
                }
            }
            Event::GeneralRef(ref e) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&resolve_reference(e)?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(FeedError::Decode(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }

    builder.finish()
}

/// Which vocabulary an element belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Rss,
    Atom,
    Foreign,
}

impl Scope {
    /// `rss_namespace` is the namespace the `<rss>` root was declared in, if any.
    fn of(ns: &ResolveResult, rss_namespace: Option<&[u8]>) -> Self {
        match ns {
            ResolveResult::Unbound => Scope::Rss,
            ResolveResult::Bound(Namespace(uri)) if *uri == ATOM_NAMESPACE.as_bytes() => {
                Scope::Atom
            }
            ResolveResult::Bound(Namespace(uri)) if Some(*uri) == rss_namespace => Scope::Rss,
            _ => Scope::Foreign,
        }
    }
}

fn namespace_of(ns: &ResolveResult) -> Option<String> {
    match ns {
        ResolveResult::Bound(Namespace(uri)) => Some(String::from_utf8_lossy(uri).into_owned()),
        ResolveResult::Unknown(prefix) => Some(format!(
            "unbound prefix `{}`",
            String::from_utf8_lossy(prefix)
        )),
        ResolveResult::Unbound => None,
    }
}

/// An element whose end tag hasn't been seen yet.
#[derive(Debug)]
struct Open {
    name: String,
    scope: Scope,
    namespace: Option<String>,
    attrs: Vec<(String, String)>,
    text: String,
}

impl Open {
    fn new(
        e: &BytesStart,
        scope: Scope,
        namespace: Option<String>,
        decoder: Decoder,
    ) -> Result<Self, FeedError> {
        let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();

        let mut attrs = Vec::new();
        for attr in e.attributes() {
            let attr = attr.map_err(FeedError::decode)?;
            if attr.key.as_namespace_binding().is_some() {
                continue;
            }
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let raw = decoder.decode(&attr.value).map_err(FeedError::decode)?;
            attrs.push((key, unescape_attr(&raw)?));
        }

        Ok(Open {
            name,
            scope,
            namespace,
            attrs,
            text: String::new(),
        })
    }

    /// Path component for descendants; foreign elements poison the path.
    fn path_name(&self) -> &str {
        match self.scope {
            Scope::Rss => self.name.as_str(),
            Scope::Atom | Scope::Foreign => "#",
        }
    }

    fn attr(&self, key: &str) -> String {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .unwrap_or_default()
    }

    fn text(&self) -> String {
        self.text.trim().to_string()
    }

    /// Integer character data; blank means absent.
    fn number<T: FromStr>(&self) -> Result<Option<T>, FeedError> {
        parse_number(&self.name, &self.text)
    }

    fn number_attr<T: FromStr>(&self, key: &str) -> Result<Option<T>, FeedError> {
        parse_number(&format!("{}@{}", self.name, key), &self.attr(key))
    }

    /// Date character data; blank means absent.
    fn date(&self) -> Result<Option<chrono::DateTime<chrono::Utc>>, FeedError> {
        if self.text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(parse_feed_date(&self.text)?))
    }

    fn into_link(self) -> Result<Link, FeedError> {
        Ok(Link {
            namespace: (self.scope == Scope::Atom).then(|| ATOM_NAMESPACE.to_string()),
            href: self.attr("href"),
            hreflang: self.attr("hreflang"),
            length: self.number_attr("length")?,
            title: self.attr("title"),
            media_type: self.attr("type"),
            rel: self.attr("rel"),
            value: self.text(),
        })
    }

    fn into_category(self) -> Category {
        Category {
            domain: self.attr("domain"),
            value: self.text(),
        }
    }
}

fn parse_number<T: FromStr>(element: &str, raw: &str) -> Result<Option<T>, FeedError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<T>()
        .map(Some)
        .map_err(|_| FeedError::invalid_number(element, trimmed))
}

/// Expands a character reference or predefined entity; unknown entities stay literal.
fn resolve_reference(reference: &BytesRef) -> Result<String, FeedError> {
    if let Some(c) = reference.resolve_char_ref().map_err(FeedError::decode)? {
        return Ok(c.to_string());
    }
    let name = reference.decode().map_err(FeedError::decode)?;
    Ok(match resolve_predefined_entity(&name) {
        Some(text) => text.to_string(),
        None => format!("&{name};"),
    })
}

/// Attribute values get the same reference handling as character data.
fn unescape_attr(raw: &str) -> Result<String, FeedError> {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        match after.find(';') {
            Some(semi) => {
                out.push_str(&resolve_reference(&BytesRef::new(&after[..semi]))?);
                rest = &after[semi + 1..];
            }
            None => {
                out.push_str(&rest[amp..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    Ok(out)
}

/// Accumulates the document as elements close.
#[derive(Debug, Default)]
struct Builder {
    doc: Document,
    seen_root: bool,
}

impl Builder {
    fn start(&mut self, stack: &[Open], open: &Open) -> Result<(), FeedError> {
        if stack.is_empty() {
            if self.seen_root {
                return Err(FeedError::Decode("multiple root elements".to_string()));
            }
            if open.scope != Scope::Rss || open.name != "rss" {
                let found = match &open.namespace {
                    Some(ns) => format!("<{}> in namespace {ns}", open.name),
                    None => format!("<{}>", open.name),
                };
                return Err(FeedError::Decode(format!(
                    "expected <rss> root element, found {found}"
                )));
            }
            self.seen_root = true;
            self.doc.version = open.attr("version");
            return Ok(());
        }

        if open.scope != Scope::Rss {
            return Ok(());
        }

        let channel = &mut self.doc.channel;
        match (path(stack).as_slice(), open.name.as_str()) {
            (["rss", "channel"], "item") => channel.items.push(Item::default()),
            (["rss", "channel"], "image") => {
                channel.image.get_or_insert_with(Image::default);
            }
            _ => {}
        }
        Ok(())
    }

    fn end(&mut self, stack: &[Open], open: Open) -> Result<(), FeedError> {
        match open.scope {
            Scope::Foreign => return Ok(()),
            Scope::Atom if open.name != "link" => return Ok(()),
            _ => {}
        }

        let channel = &mut self.doc.channel;
        match path(stack).as_slice() {
            ["rss", "channel"] => close_channel_field(channel, open)?,
            ["rss", "channel", "item"] => {
                if let Some(item) = channel.items.last_mut() {
                    close_item_field(item, open)?;
                }
            }
            ["rss", "channel", "image"] => {
                if let Some(image) = channel.image.as_mut() {
                    close_image_field(image, open)?;
                }
            }
            ["rss", "channel", "skipHours"] if open.name == "hour" => {
                if let Some(hour) = open.number::<u8>()? {
                    channel.skip_hours.push(hour);
                }
            }
            ["rss", "channel", "skipDays"] if open.name == "day" => {
                channel.skip_days.push(open.text());
            }
            _ => {}
        }
        Ok(())
    }

    fn finish(self) -> Result<Document, FeedError> {
        if !self.seen_root {
            return Err(FeedError::Decode("no <rss> element found".to_string()));
        }
        Ok(self.doc)
    }
}

fn path(stack: &[Open]) -> Vec<&str> {
    stack.iter().map(Open::path_name).collect()
}

fn close_channel_field(channel: &mut crate::models::Channel, open: Open) -> Result<(), FeedError> {
    match open.name.as_str() {
        "title" => channel.title = open.text(),
        "link" => channel.links.push(open.into_link()?),
        "description" => channel.description = open.text(),
        "language" => channel.language = open.text(),
        "copyright" => channel.copyright = open.text(),
        "managingEditor" => channel.managing_editor = open.text(),
        "webMaster" => channel.web_master = open.text(),
        "pubDate" => channel.pub_date = open.date()?,
        "lastBuildDate" => channel.last_build_date = open.date()?,
        "category" => channel.categories.push(open.into_category()),
        "generator" => channel.generator = open.text(),
        "docs" => channel.docs = open.text(),
        "cloud" => {
            channel.cloud = Some(Cloud {
                domain: open.attr("domain"),
                port: open.number_attr("port")?,
                path: open.attr("path"),
                register_procedure: open.attr("registerProcedure"),
                protocol: open.attr("protocol"),
            })
        }
        "ttl" => channel.ttl = open.number()?,
        "rating" => channel.rating = open.text(),
        _ => {}
    }
    Ok(())
}

fn close_item_field(item: &mut Item, open: Open) -> Result<(), FeedError> {
    match open.name.as_str() {
        "title" => item.title = open.text(),
        "link" => item.links.push(open.into_link()?),
        "description" => item.description = open.text(),
        "author" => item.author = open.text(),
        "category" => item.categories.push(open.into_category()),
        "comments" => item.comments = open.text(),
        "enclosure" => {
            item.enclosure = Some(Enclosure {
                url: open.attr("url"),
                length: open.number_attr("length")?,
                mime_type: open.attr("type"),
            })
        }
        "guid" => {
            item.guid = Some(Guid {
                is_perma_link: open.attr("isPermaLink"),
                value: open.text(),
            })
        }
        "pubDate" => item.pub_date = open.date()?,
        "source" => {
            item.source = Some(Source {
                url: open.attr("url"),
                value: open.text(),
            })
        }
        _ => {}
    }
    Ok(())
}

fn close_image_field(image: &mut Image, open: Open) -> Result<(), FeedError> {
    match open.name.as_str() {
        "url" => image.url = open.text(),
        "title" => image.title = open.text(),
        "link" => image.link = open.text(),
        "width" => image.width = open.number()?,
        "height" => image.height = open.number()?,
        "description" => image.description = open.text(),
        _ => {}
    }
    Ok(())
}
