use heck::KebabCase;
use openssl::rand::rand_bytes;
use pulldown_cmark::{html, CowStr, Event, LinkType, Options, Parser, Tag};
use std::collections::HashSet;
use std::mem;

/// Generates an hexadecimal representation of 32 bytes of random data
pub fn random_hex() -> String {
    let mut bytes = [0; 32];
    rand_bytes(&mut bytes).expect("Error while generating random bytes");
    bytes
        .iter()
        .fold(String::new(), |res, byte| format!("{}{:02x}", res, byte))
}

/// Turns a post title into the slug used in its URL
pub fn make_slug(title: &str) -> String {
    title
        .to_kebab_case()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect()
}

/// Returns (HTML, hashtags)
///
/// Hashtags found in text are turned into links to the tag page under
/// `base_url`, which must include the scheme. Code blocks are left untouched.
pub fn md_to_html(md: &str, base_url: &str) -> (String, HashSet<String>) {
    let mut hashtags = HashSet::new();
    let mut in_code = false;

    let events = Parser::new_ext(md, Options::all())
        .flat_map(|evt| match evt {
            Event::Start(Tag::CodeBlock(_)) => {
                in_code = true;
                vec![evt]
            }
            Event::End(Tag::CodeBlock(_)) => {
                in_code = false;
                vec![evt]
            }
            Event::Text(txt) if !in_code => link_hashtags(&txt, base_url, &mut hashtags),
            e => vec![e],
        })
        .collect::<Vec<_>>();

    let mut buf = String::new();
    html::push_html(&mut buf, events.into_iter());
    (buf, hashtags)
}

fn link_hashtags(txt: &str, base_url: &str, hashtags: &mut HashSet<String>) -> Vec<Event<'static>> {
    let mut events = vec![];
    let mut text = String::new();
    let mut prev: Option<char> = None;
    let mut chars = txt.chars().peekable();

    while let Some(c) = chars.next() {
        let starts_tag = c == '#' && prev.map_or(true, |p| !p.is_alphanumeric());
        if !starts_tag {
            text.push(c);
            prev = Some(c);
            continue;
        }

        let mut tag = String::new();
        while let Some(&next) = chars.peek() {
            if next.is_alphanumeric() || next == '-' || next == '_' {
                tag.push(next);
                chars.next();
            } else {
                break;
            }
        }
        if tag.is_empty() {
            text.push(c);
            prev = Some(c);
            continue;
        }

        if !text.is_empty() {
            events.push(Event::Text(CowStr::from(mem::take(&mut text))));
        }
        let link = Tag::Link(
            LinkType::Inline,
            format!("{}/posts/tag/{}", base_url, tag.to_lowercase()).into(),
            tag.clone().into(),
        );
        events.push(Event::Start(link.clone()));
        events.push(Event::Text(format!("#{}", tag).into()));
        events.push(Event::End(link));
        prev = tag.chars().last();
        hashtags.insert(tag);
    }

    if !text.is_empty() {
        events.push(Event::Text(text.into()));
    }
    events
}
