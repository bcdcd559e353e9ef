use crate::core::{RenderOptions, Renderer};
use pulldown_cmark::{
    html, CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream,
};
use regex::Regex;
use std::borrow::Cow;
use std::ops::Range;
use std::sync::LazyLock;

static FRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(1/2|1/4|3/4)\b").expect("fraction pattern is valid"));

static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:(?:https?|ftp|file)://|mailto:)[^\s<>]+").expect("url pattern is valid")
});

/// Markdown to HTML over pulldown-cmark, plus the passes the parser itself
/// has no switch for: intraword emphasis, bare URL links, hard line breaks
/// and fractions.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    fn parser_options(&self) -> Options {
        // Fenced code and backslash line breaks are always on in CommonMark.
        let mut options = Options::empty();
        options.set(Options::ENABLE_TABLES, self.options.tables);
        options.set(Options::ENABLE_STRIKETHROUGH, self.options.strikethrough);
        options.set(Options::ENABLE_HEADING_ATTRIBUTES, self.options.heading_ids);
        options.set(Options::ENABLE_DEFINITION_LIST, self.options.definition_lists);
        options.set(
            Options::ENABLE_SMART_PUNCTUATION,
            self.options.smart_punctuation,
        );
        options
    }

    /// Splits prose text into plain runs and links, applying fractions to
    /// the plain runs only.
    fn expand_text<'a>(&self, text: CowStr<'a>) -> Vec<Event<'a>> {
        let urls = if self.options.autolink {
            find_urls(&text)
        } else {
            Vec::new()
        };

        if urls.is_empty() {
            return vec![Event::Text(self.typeset(text))];
        }

        let mut events = Vec::with_capacity(urls.len() * 3 + 1);
        let mut last = 0;
        for url in urls {
            if url.start > last {
                events.push(Event::Text(self.typeset_str(&text[last..url.start])));
            }
            let href = text[url.clone()].to_string();
            events.push(Event::Start(Tag::Link {
                link_type: LinkType::Inline,
                dest_url: href.clone().into(),
                title: CowStr::Borrowed(""),
                id: CowStr::Borrowed(""),
            }));
            events.push(Event::Text(href.into()));
            events.push(Event::End(TagEnd::Link));
            last = url.end;
        }
        if last < text.len() {
            events.push(Event::Text(self.typeset_str(&text[last..])));
        }
        events
    }

    fn typeset<'a>(&self, text: CowStr<'a>) -> CowStr<'a> {
        if !self.options.smart_fractions {
            return text;
        }
        let replaced = match replace_fractions(&text) {
            Cow::Owned(replaced) => Some(replaced),
            Cow::Borrowed(_) => None,
        };
        match replaced {
            Some(replaced) => replaced.into(),
            None => text,
        }
    }

    fn typeset_str<'a>(&self, text: &str) -> CowStr<'a> {
        if self.options.smart_fractions {
            replace_fractions(text).into_owned().into()
        } else {
            text.to_string().into()
        }
    }
}

impl Renderer for MarkdownRenderer {
    fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.parser_options()).into_offset_iter();
        let no_intra_emphasis = self.options.no_intra_emphasis;
        let hard_line_breaks = self.options.hard_line_breaks;

        let mut emphasis = Vec::new();
        let events = parser.map(|(event, range)| {
            if no_intra_emphasis {
                demote_intraword_emphasis(markdown, event, range, &mut emphasis)
            } else {
                event
            }
        });

        let mut in_code_block = false;
        let mut link_depth = 0usize;
        let events = TextMergeStream::new(events).flat_map(|event| match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                in_code_block = true;
                vec![Event::Start(Tag::CodeBlock(kind))]
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                vec![Event::End(TagEnd::CodeBlock)]
            }
            Event::Start(tag @ (Tag::Link { .. } | Tag::Image { .. })) => {
                link_depth += 1;
                vec![Event::Start(tag)]
            }
            Event::End(tag @ (TagEnd::Link | TagEnd::Image)) => {
                link_depth = link_depth.saturating_sub(1);
                vec![Event::End(tag)]
            }
            Event::SoftBreak if hard_line_breaks => vec![Event::HardBreak],
            Event::Text(text) if !in_code_block && link_depth == 0 => self.expand_text(text),
            Event::Text(text) if !in_code_block => vec![Event::Text(self.typeset(text))],
            other => vec![other],
        });

        let mut html_output = String::with_capacity(markdown.len() + markdown.len() / 2);
        html::push_html(&mut html_output, events);
        html_output
    }
}

/// Turns `*` emphasis opened right after a letter or digit back into
/// literal text, so `snake*case*name` stays as written. `stack` pairs each
/// end tag with the decision made for its start tag.
fn demote_intraword_emphasis<'a>(
    markdown: &'a str,
    event: Event<'a>,
    range: Range<usize>,
    stack: &mut Vec<bool>,
) -> Event<'a> {
    match event {
        Event::Start(tag @ (Tag::Emphasis | Tag::Strong)) => {
            let width = if matches!(tag, Tag::Strong) { 2 } else { 1 };
            let intraword = markdown[..range.start]
                .chars()
                .next_back()
                .is_some_and(char::is_alphanumeric);
            stack.push(intraword);
            if intraword {
                let delimiter = markdown
                    .get(range.start..range.start + width)
                    .unwrap_or("*");
                Event::Text(CowStr::Borrowed(delimiter))
            } else {
                Event::Start(tag)
            }
        }
        Event::End(tag @ (TagEnd::Emphasis | TagEnd::Strong)) => {
            if stack.pop().unwrap_or(false) {
                let width = if tag == TagEnd::Strong { 2 } else { 1 };
                let delimiter = range
                    .end
                    .checked_sub(width)
                    .and_then(|start| markdown.get(start..range.end))
                    .unwrap_or("*");
                Event::Text(CowStr::Borrowed(delimiter))
            } else {
                Event::End(tag)
            }
        }
        other => other,
    }
}

/// Byte ranges of bare URLs, without trailing sentence punctuation or an
/// unbalanced closing parenthesis.
fn find_urls(text: &str) -> Vec<Range<usize>> {
    URL.find_iter(text)
        .filter_map(|found| {
            let url = trim_url(found.as_str());
            let scheme_len = found
                .as_str()
                .find("://")
                .map_or("mailto:".len(), |at| at + "://".len());
            (url.len() > scheme_len).then(|| found.start()..found.start() + url.len())
        })
        .collect()
}

fn trim_url(mut url: &str) -> &str {
    while let Some(last) = url.chars().next_back() {
        let unbalanced = last == ')' && url.matches('(').count() < url.matches(')').count();
        if ".,:;!?'\"".contains(last) || unbalanced {
            url = &url[..url.len() - last.len_utf8()];
        } else {
            break;
        }
    }
    url
}

/// Replaces `1/2`, `1/4` and `3/4` unless they touch another `/`, which
/// keeps dates like `1/2/2024` and paths like `10/1/2` intact.
fn replace_fractions(text: &str) -> Cow<'_, str> {
    let mut output = String::new();
    let mut last = 0;

    for found in FRACTION.find_iter(text) {
        let before = text[..found.start()].chars().next_back();
        let after = text[found.end()..].chars().next();
        if before == Some('/') || after == Some('/') {
            continue;
        }
        output.push_str(&text[last..found.start()]);
        output.push_str(match found.as_str() {
            "1/2" => "½",
            "1/4" => "¼",
            _ => "¾",
        });
        last = found.end();
    }

    if last == 0 {
        return Cow::Borrowed(text);
    }
    output.push_str(&text[last..]);
    Cow::Owned(output)
}
