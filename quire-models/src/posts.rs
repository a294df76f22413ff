use crate::{
    ap_url,
    post_images::PostImage,
    post_tags::{NewPostTag, PostTag},
    safe_string::SafeString,
    schema::{likes, post_tags, posts},
    tags::Tag,
    users::User,
    Connection, Error, Result, CONFIG,
};
use chrono::NaiveDateTime;
use diesel::{self, ExpressionMethods, QueryDsl, RunQueryDsl};
use quire_common::utils::{make_slug, md_to_html};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// How a post is laid out when rendered in a stream
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostDisplayType {
    Post,
    Note,
    Link,
    SinglePhoto,
    MultiPhoto,
}

impl PostDisplayType {
    pub fn as_str(self) -> &'static str {
        match self {
            PostDisplayType::Post => "post",
            PostDisplayType::Note => "note",
            PostDisplayType::Link => "link",
            PostDisplayType::SinglePhoto => "single_photo",
            PostDisplayType::MultiPhoto => "multi_photo",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            PostDisplayType::Post => "post-standard",
            PostDisplayType::Note => "post-note",
            PostDisplayType::Link => "post-link",
            PostDisplayType::SinglePhoto => "post-single-photo",
            PostDisplayType::MultiPhoto => "post-multi-photo",
        }
    }
}

impl Default for PostDisplayType {
    fn default() -> Self {
        PostDisplayType::Post
    }
}

impl FromStr for PostDisplayType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "post" => Ok(PostDisplayType::Post),
            "note" => Ok(PostDisplayType::Note),
            "link" => Ok(PostDisplayType::Link),
            "single_photo" => Ok(PostDisplayType::SinglePhoto),
            "multi_photo" => Ok(PostDisplayType::MultiPhoto),
            _ => Err(Error::InvalidValue),
        }
    }
}

impl fmt::Display for PostDisplayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Queryable, Identifiable, Clone, Debug, Serialize)]
pub struct Post {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub slug: String,
    pub content: SafeString,
    pub source: String,
    pub display_type: String,
    pub post_link: Option<String>,
    pub published: bool,
    pub likes_count: i32,
    pub creation_date: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "posts"]
pub struct NewPost {
    pub user_id: i32,
    pub title: String,
    pub slug: String,
    pub content: SafeString,
    pub source: String,
    pub display_type: String,
    pub post_link: Option<String>,
    pub published: bool,
    pub creation_date: Option<NaiveDateTime>,
}

impl NewPost {
    /// Builds a published post from its markdown source. Also returns the
    /// hashtags found in the text.
    pub fn from_markdown(
        author: &User,
        title: &str,
        source: &str,
        display_type: PostDisplayType,
    ) -> (NewPost, HashSet<String>) {
        let (content, hashtags) = md_to_html(source, &ap_url(&CONFIG.base_url));
        let post = NewPost {
            user_id: author.id,
            title: title.to_owned(),
            slug: make_slug(title),
            content: SafeString::new(&content),
            source: source.to_owned(),
            display_type: display_type.to_string(),
            post_link: None,
            published: true,
            creation_date: None,
        };
        (post, hashtags)
    }
}

impl Post {
    insert!(posts, NewPost);
    get!(posts);

    /// Published posts, newest first
    pub fn list_published(conn: &Connection, (min, max): (i32, i32)) -> Result<Vec<Post>> {
        posts::table
            .filter(posts::published.eq(true))
            .order((posts::creation_date.desc(), posts::id.desc()))
            .offset(min.into())
            .limit((max - min).into())
            .load::<Post>(conn)
            .map_err(Error::from)
    }

    /// Published posts carrying the given tag, newest first
    pub fn list_by_tag_id(
        conn: &Connection,
        tag_id: i32,
        (min, max): (i32, i32),
    ) -> Result<Vec<Post>> {
        let ids = post_tags::table
            .filter(post_tags::tag_id.eq(tag_id))
            .select(post_tags::post_id);
        posts::table
            .filter(posts::id.eq_any(ids))
            .filter(posts::published.eq(true))
            .order((posts::creation_date.desc(), posts::id.desc()))
            .offset(min.into())
            .limit((max - min).into())
            .load::<Post>(conn)
            .map_err(Error::from)
    }

    /// Published posts liked by a user, most recently liked first
    pub fn list_liked_by(
        conn: &Connection,
        user_id: i32,
        (min, max): (i32, i32),
    ) -> Result<Vec<Post>> {
        likes::table
            .inner_join(posts::table)
            .filter(likes::user_id.eq(user_id))
            .filter(posts::published.eq(true))
            .order((likes::creation_date.desc(), likes::id.desc()))
            .select(posts::all_columns)
            .offset(min.into())
            .limit((max - min).into())
            .load::<Post>(conn)
            .map_err(Error::from)
    }

    pub fn display_type(&self) -> PostDisplayType {
        self.display_type.parse().unwrap_or_default()
    }

    pub fn is_owner(&self, user: Option<&User>) -> bool {
        user.map_or(false, |u| u.id == self.user_id)
    }

    pub fn images(&self, conn: &Connection) -> Result<Vec<PostImage>> {
        PostImage::list_for_post(conn, self.id)
    }

    pub fn tags(&self, conn: &Connection) -> Result<Vec<Tag>> {
        let ids = post_tags::table
            .filter(post_tags::post_id.eq(self.id))
            .select(post_tags::tag_id);
        crate::schema::tags::table
            .filter(crate::schema::tags::id.eq_any(ids))
            .order(crate::schema::tags::tag_value.asc())
            .load::<Tag>(conn)
            .map_err(Error::from)
    }

    /// Replaces the tags of this post with the given values, creating the
    /// missing tags.
    pub fn set_tags<S: AsRef<str>>(&self, conn: &Connection, values: &[S]) -> Result<Vec<Tag>> {
        diesel::delete(post_tags::table.filter(post_tags::post_id.eq(self.id))).execute(conn)?;
        let mut tags: Vec<Tag> = vec![];
        for value in values {
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            let tag = Tag::find_or_create(conn, value)?;
            if tags.iter().any(|t| t.id == tag.id) {
                continue;
            }
            PostTag::insert(
                conn,
                NewPostTag {
                    post_id: self.id,
                    tag_id: tag.id,
                },
            )?;
            tags.push(tag);
        }
        Ok(tags)
    }
}
