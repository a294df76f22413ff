use crate::template_utils::PostFormat;
use quire_models::config::PagingConfig;
use rocket::http::{Cookie, Cookies, RawStr};
use rocket::request::FromParam;
use shrinkwraprs::Shrinkwrap;

/// A zero-based page number, taken from the path
#[derive(Shrinkwrap, Copy, Clone, Debug, PartialEq)]
pub struct Page(i32);

impl<'r> FromParam<'r> for Page {
    type Error = &'r RawStr;

    fn from_param(param: &'r RawStr) -> Result<Self, Self::Error> {
        match param.parse::<i32>() {
            Ok(page) if page >= 0 => Ok(Page(page)),
            _ => Err(param),
        }
    }
}

impl Page {
    /// Rows covered by this page, for pages of `size` items
    pub fn limits(self, size: i32) -> (i32, i32) {
        (
            self.0.saturating_mul(size),
            self.0.saturating_add(1).saturating_mul(size),
        )
    }
}

/// The paged post listings a client can scroll through.
///
/// The number of posts served by the last page of each stream is kept in
/// the client's session, to tell whether another page is worth asking for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Stream {
    PostTitles,
    TagPostTitles,
    Posts,
    TaggedPosts,
    LikedPosts,
}

impl Stream {
    /// Name of the session attribute of this stream
    pub fn attribute(self) -> &'static str {
        match self {
            Stream::PostTitles => "posttitles",
            Stream::TagPostTitles => "tagposttitles",
            Stream::Posts => "posts",
            Stream::TaggedPosts => "taggedposts",
            Stream::LikedPosts => "likedposts",
        }
    }

    pub fn format(self) -> PostFormat {
        match self {
            Stream::PostTitles | Stream::TagPostTitles => PostFormat::Title,
            Stream::Posts | Stream::TaggedPosts | Stream::LikedPosts => PostFormat::Full,
        }
    }

    pub fn page_size(self, paging: &PagingConfig) -> i32 {
        match self.format() {
            PostFormat::Title => paging.title_paging_size,
            PostFormat::Full => paging.post_paging_size,
        }
    }

    /// Stores how many posts the last page of this stream contained
    pub fn remember(self, cookies: &mut Cookies<'_>, served: usize) {
        cookies.add_private(Cookie::new(self.attribute(), served.to_string()));
    }

    /// A stream has a next page unless its last page was not full. A stream
    /// that was never served has one.
    pub fn has_next(self, cookies: &mut Cookies<'_>, paging: &PagingConfig) -> bool {
        cookies
            .get_private(self.attribute())
            .and_then(|cookie| cookie.value().parse::<i64>().ok())
            .map_or(true, |served| served >= i64::from(self.page_size(paging)))
    }
}

pub mod errors;
pub mod key_value;
pub mod likes;
pub mod posts;
pub mod session;
pub mod tags;

#[cfg(all(test, feature = "sqlite"))]
pub(crate) mod tests {
    use super::*;
    use crate::init_rocket;
    use quire_common::utils::random_hex;
    use quire_models::{
        db_conn::{init_pool, DbConn},
        migrations::run_pending_migrations,
    };
    use rocket::{
        http::{ContentType, Status},
        local::Client,
    };
    use std::env::temp_dir;

    /// A client for an application backed by a fresh SQLite database, and a
    /// connection to that database
    pub(crate) fn client() -> (Client, DbConn) {
        let path = temp_dir().join(format!("quire-{}.sqlite", random_hex()));
        let pool = init_pool(&path.to_string_lossy(), Some(4), None)
            .expect("Couldn't create the database pool");
        let conn = DbConn(pool.get().expect("Couldn't get a connection"));
        run_pending_migrations(&conn).expect("Couldn't run migrations");
        let client = Client::new(init_rocket(rocket::ignite(), pool))
            .expect("Couldn't start the application");
        (client, conn)
    }

    pub(crate) fn login(client: &Client, username: &str, password: &str) -> Status {
        client
            .post("/login")
            .header(ContentType::Form)
            .body(format!("username={}&password={}", username, password))
            .dispatch()
            .status()
    }

    #[test]
    fn page_limits() {
        assert_eq!(Page(0).limits(10), (0, 10));
        assert_eq!(Page(3).limits(50), (150, 200));
        assert_eq!(Page(i32::MAX).limits(10), (i32::MAX, i32::MAX));
        assert_eq!(Page(i32::MAX / 10).limits(10).1, i32::MAX);
        assert_eq!(*Page(2), 2);
    }

    #[test]
    fn page_param() {
        assert_eq!(Page::from_param(RawStr::from_str("4")), Ok(Page(4)));
        assert!(Page::from_param(RawStr::from_str("-1")).is_err());
        assert!(Page::from_param(RawStr::from_str("two")).is_err());
    }

    #[test]
    fn stream_page_sizes() {
        let paging = PagingConfig::default();
        assert_eq!(Stream::PostTitles.page_size(&paging), 50);
        assert_eq!(Stream::TagPostTitles.page_size(&paging), 50);
        assert_eq!(Stream::Posts.page_size(&paging), 10);
        assert_eq!(Stream::LikedPosts.page_size(&paging), 10);
        assert_eq!(Stream::TaggedPosts.format(), PostFormat::Full);
    }
}
