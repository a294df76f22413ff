use crate::templates::{self, ToHtml};
use quire_api::tags::TagDto;
use quire_models::{
    post_images::PostImage,
    posts::{Post, PostDisplayType},
    users::User,
    Connection, Result,
};
use rocket::http::{Method, Status};
use rocket::request::Request;
use rocket::response::{self, content::Html as HtmlCt, Responder, Response};
use std::collections::hash_map::DefaultHasher;
use std::hash::Hasher;
use std::io::Write;

/// Rendered HTML, served with an `ETag` so that unchanged fragments can be
/// answered with `304 Not Modified`.
#[derive(Debug)]
pub struct Ructe(pub Vec<u8>);

impl<'r> Responder<'r> for Ructe {
    fn respond_to(self, r: &Request<'_>) -> response::Result<'r> {
        if r.method() != Method::Get {
            return HtmlCt(self.0).respond_to(r);
        }
        let mut hasher = DefaultHasher::new();
        hasher.write(&self.0);
        let etag = format!("\"{:x}\"", hasher.finish());
        if r.headers().get("If-None-Match").any(|s| s == etag) {
            Response::build()
                .status(Status::NotModified)
                .raw_header("ETag", etag)
                .ok()
        } else {
            Response::build()
                .merge(HtmlCt(self.0).respond_to(r)?)
                .raw_header("ETag", etag)
                .ok()
        }
    }
}

/// How each post of a stream is rendered
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PostFormat {
    Title,
    Full,
}

/// Renders every post with the template matching `format`, one after the
/// other.
///
/// Images are only loaded for multi-photo posts, and the edit link is only
/// shown to the author of the post.
pub fn post_stream(
    conn: &Connection,
    posts: &[Post],
    user: Option<&User>,
    format: PostFormat,
) -> Result<Ructe> {
    let mut res = vec![];
    for post in posts {
        let is_owner = post.is_owner(user);
        match format {
            PostFormat::Title => templates::posts::title_html(&mut res, post, is_owner)?,
            PostFormat::Full => {
                let images = if post.display_type() == PostDisplayType::MultiPhoto {
                    post.images(conn)?
                } else {
                    Vec::<PostImage>::new()
                };
                templates::posts::full_html(&mut res, post, &images, is_owner)?
            }
        }
    }
    Ok(Ructe(res))
}

/// CSS class of a tag in the cloud, from its count and the extreme counts
/// of the cloud it is part of
pub fn tag_css_class(count: i64, min: i64, max: i64) -> &'static str {
    let distribution = (max - min) / 5;
    if count == max {
        "maxTag"
    } else if count == min {
        "minTag"
    } else if count as f64 > min as f64 + distribution as f64 * 1.75 {
        "largeTag"
    } else if count > min + distribution {
        "mediumTag"
    } else {
        "smallTag"
    }
}

/// Renders the tag cloud as an HTML list of links to the tag pages
pub fn tag_cloud(base_url: &str, tags: &[TagDto]) -> std::io::Result<Ructe> {
    let max = tags.iter().map(|t| t.tag_count).max().unwrap_or(0);
    let min = tags.iter().map(|t| t.tag_count).min().unwrap_or(0);

    let mut res = vec![];
    res.write_all(b"<ul class='taglist'>")?;
    for tag in tags {
        write!(res, "<li><a href='{}/posts/tag/", base_url)?;
        tag.tag_value.to_lowercase().to_html(&mut res)?;
        write!(res, "' class='{}'>", tag_css_class(tag.tag_count, min, max))?;
        tag.tag_value.to_html(&mut res)?;
        res.write_all(b"</a></li>")?;
    }
    res.write_all(b"</ul>")?;
    Ok(Ructe(res))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(id: i32, value: &str, count: i64) -> TagDto {
        TagDto {
            tag_id: id,
            tag_value: value.to_owned(),
            tag_count: count,
        }
    }

    #[test]
    fn css_classes() {
        // distribution is 2: medium above 3, large above 4.5
        assert_eq!(tag_css_class(11, 1, 11), "maxTag");
        assert_eq!(tag_css_class(1, 1, 11), "minTag");
        assert_eq!(tag_css_class(2, 1, 11), "smallTag");
        assert_eq!(tag_css_class(3, 1, 11), "smallTag");
        assert_eq!(tag_css_class(4, 1, 11), "mediumTag");
        assert_eq!(tag_css_class(5, 1, 11), "largeTag");
        assert_eq!(tag_css_class(10, 1, 11), "largeTag");
    }

    #[test]
    fn css_classes_small_spread() {
        // distribution is 0 when max - min < 5
        assert_eq!(tag_css_class(3, 1, 4), "largeTag");
        assert_eq!(tag_css_class(2, 1, 4), "largeTag");
        assert_eq!(tag_css_class(7, 7, 7), "maxTag");
    }

    #[test]
    fn cloud_markup() {
        let html = tag_cloud(
            "https://example.org",
            &[tag(1, "Diesel", 1), tag(2, "Rust", 11), tag(3, "web", 4)],
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(html.0).unwrap(),
            "<ul class='taglist'>\
             <li><a href='https://example.org/posts/tag/diesel' class='minTag'>Diesel</a></li>\
             <li><a href='https://example.org/posts/tag/rust' class='maxTag'>Rust</a></li>\
             <li><a href='https://example.org/posts/tag/web' class='mediumTag'>web</a></li>\
             </ul>"
        );
    }

    #[test]
    fn empty_cloud() {
        let html = tag_cloud("https://example.org", &[]).unwrap();
        assert_eq!(
            String::from_utf8(html.0).unwrap(),
            "<ul class='taglist'></ul>"
        );
    }

    #[test]
    fn cloud_values_are_escaped() {
        let html = tag_cloud("https://example.org", &[tag(1, "<b>&", 2)]).unwrap();
        let html = String::from_utf8(html.0).unwrap();
        assert!(html.contains("&lt;b&gt;&amp;</a>"));
        assert!(!html.contains("<b>"));
    }
}
