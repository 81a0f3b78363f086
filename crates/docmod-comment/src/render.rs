//! Comment to HTML rendering.
//!
//! Comment text is rendered with `pulldown-cmark`. Bracketed references
//! without a link definition are offered to [`DocLink::parse`] and resolved
//! through the renderer's [`LinkResolver`], so every comment body in a
//! module links the same way. References into the current package are
//! links only when they name one of the package's [`Symbols`], so text
//! such as `s[i]` stays as written.
//!
//! Doc comments have no emphasis syntax: `*` and `_` delimiters are
//! written back as literal text.

use std::ops::Range;
use std::sync::Arc;

use pulldown_cmark::{BrokenLink, CowStr, Event, Options, Parser, Tag, TagEnd, html};

use crate::link::{DocLink, LinkResolver, Symbols};

/// Renders doc comments to HTML for one module.
#[derive(Clone, Debug)]
pub struct CommentRenderer {
    resolver: Arc<LinkResolver>,
    symbols: Symbols,
}

impl CommentRenderer {
    /// Create a renderer that resolves doc links with `resolver`.
    ///
    /// The renderer knows no current-package symbols; use
    /// [`for_package`](Self::for_package) to render a package's comments.
    #[must_use]
    pub fn new(resolver: LinkResolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
            symbols: Symbols::default(),
        }
    }

    /// Renderer for the package declaring `symbols`, sharing this resolver.
    #[must_use]
    pub fn for_package(&self, symbols: Symbols) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
            symbols,
        }
    }

    /// The resolver used for doc links.
    #[must_use]
    pub fn resolver(&self) -> &LinkResolver {
        &self.resolver
    }

    /// Render a comment as block-level HTML.
    ///
    /// Returns an empty string for blank comments.
    #[must_use]
    pub fn render(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }

        let mut out = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut out, self.parser(text));
        out
    }

    /// Render a short text without the wrapping paragraph.
    ///
    /// Used for one-line summaries that are embedded in other markup.
    #[must_use]
    pub fn render_inline(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }

        let events = self.parser(text).filter(|event| {
            !matches!(
                event,
                Event::Start(Tag::Paragraph) | Event::End(TagEnd::Paragraph)
            )
        });

        let mut out = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut out, events);
        out.trim_end().to_owned()
    }

    fn parser<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Event<'a>> + 'a {
        let callback = move |broken: BrokenLink| self.resolve_reference(&broken.reference);
        Parser::new_with_broken_link_callback(text, Options::empty(), Some(callback))
            .into_offset_iter()
            .map(move |(event, range)| literal_emphasis(text, event, range))
    }

    /// Resolve an undefined `[reference]` as a doc link.
    fn resolve_reference<'a>(&self, reference: &str) -> Option<(CowStr<'a>, CowStr<'a>)> {
        let link = DocLink::parse(reference)?;
        if link.import_path.is_empty() && !self.symbols.contains(&link) {
            return None;
        }
        let url = self.resolver.resolve(&link)?;
        Some((url.into(), CowStr::Borrowed("")))
    }
}

/// Replace emphasis tags with the delimiters they were parsed from.
///
/// `range` is the source range of the whole emphasis span, so the opening
/// delimiter starts it and the closing delimiter ends it.
fn literal_emphasis<'a>(text: &'a str, event: Event<'a>, range: Range<usize>) -> Event<'a> {
    let (len, opening) = match &event {
        Event::Start(Tag::Emphasis) => (1, true),
        Event::Start(Tag::Strong) => (2, true),
        Event::End(TagEnd::Emphasis) => (1, false),
        Event::End(TagEnd::Strong) => (2, false),
        _ => return event,
    };
    let delimiter = if opening {
        text.get(range.start..range.start + len)
    } else {
        range.end.checked_sub(len).and_then(|start| text.get(start..range.end))
    };
    Event::Text(CowStr::Borrowed(delimiter.unwrap_or("")))
}
