use crate::routes::{errors::ErrorPage, Page, Stream};
use crate::template_utils::{post_stream, Ructe};
use quire_models::{db_conn::DbConn, posts::Post, users::User, CONFIG};
use rocket::http::Cookies;
use rocket_contrib::json::Json;

/// Renders a page of `stream`, and remembers its size in the session
fn serve(
    stream: Stream,
    conn: &DbConn,
    posts: Vec<Post>,
    user: Option<User>,
    cookies: &mut Cookies<'_>,
) -> Result<Ructe, ErrorPage> {
    let res = post_stream(conn, &posts, user.as_ref(), stream.format())?;
    stream.remember(cookies, posts.len());
    Ok(res)
}

fn has_next(stream: Stream, mut cookies: Cookies<'_>) -> Json<bool> {
    Json(stream.has_next(&mut cookies, &CONFIG.paging))
}

#[get("/titles/page/<page>")]
pub fn titles(
    page: Page,
    conn: DbConn,
    user: Option<User>,
    mut cookies: Cookies<'_>,
) -> Result<Ructe, ErrorPage> {
    let stream = Stream::PostTitles;
    let limits = page.limits(stream.page_size(&CONFIG.paging));
    let posts = Post::list_published(&conn, limits)?;
    serve(stream, &conn, posts, user, &mut cookies)
}

#[get("/titles/more")]
pub fn titles_more(cookies: Cookies<'_>) -> Json<bool> {
    has_next(Stream::PostTitles, cookies)
}

#[get("/titles/tag/<tag_id>/page/<page>")]
pub fn tag_titles(
    tag_id: i32,
    page: Page,
    conn: DbConn,
    user: Option<User>,
    mut cookies: Cookies<'_>,
) -> Result<Ructe, ErrorPage> {
    let stream = Stream::TagPostTitles;
    let limits = page.limits(stream.page_size(&CONFIG.paging));
    let posts = Post::list_by_tag_id(&conn, tag_id, limits)?;
    serve(stream, &conn, posts, user, &mut cookies)
}

#[get("/titles/tag/<_tag_id>/more")]
pub fn tag_titles_more(_tag_id: i32, cookies: Cookies<'_>) -> Json<bool> {
    has_next(Stream::TagPostTitles, cookies)
}

#[get("/page/<page>")]
pub fn posts(
    page: Page,
    conn: DbConn,
    user: Option<User>,
    mut cookies: Cookies<'_>,
) -> Result<Ructe, ErrorPage> {
    let stream = Stream::Posts;
    let limits = page.limits(stream.page_size(&CONFIG.paging));
    let posts = Post::list_published(&conn, limits)?;
    serve(stream, &conn, posts, user, &mut cookies)
}

#[get("/more")]
pub fn posts_more(cookies: Cookies<'_>) -> Json<bool> {
    has_next(Stream::Posts, cookies)
}

#[get("/tag/<tag_id>/page/<page>")]
pub fn tagged(
    tag_id: i32,
    page: Page,
    conn: DbConn,
    user: Option<User>,
    mut cookies: Cookies<'_>,
) -> Result<Ructe, ErrorPage> {
    let stream = Stream::TaggedPosts;
    let limits = page.limits(stream.page_size(&CONFIG.paging));
    let posts = Post::list_by_tag_id(&conn, tag_id, limits)?;
    serve(stream, &conn, posts, user, &mut cookies)
}

#[get("/tag/<_tag_id>/more")]
pub fn tagged_more(_tag_id: i32, cookies: Cookies<'_>) -> Json<bool> {
    has_next(Stream::TaggedPosts, cookies)
}

#[get("/likes/<user_id>/page/<page>")]
pub fn liked(
    user_id: i32,
    page: Page,
    conn: DbConn,
    user: Option<User>,
    mut cookies: Cookies<'_>,
) -> Result<Ructe, ErrorPage> {
    let stream = Stream::LikedPosts;
    let limits = page.limits(stream.page_size(&CONFIG.paging));
    let posts = Post::list_liked_by(&conn, user_id, limits)?;
    serve(stream, &conn, posts, user, &mut cookies)
}

#[get("/likes/<_user_id>/more")]
pub fn liked_more(_user_id: i32, cookies: Cookies<'_>) -> Json<bool> {
    has_next(Stream::LikedPosts, cookies)
}
