use crate::{
    schema::{post_tags, posts, tags},
    Connection, Error, Result,
};
use diesel::{self, ExpressionMethods, QueryDsl, RunQueryDsl};
use quire_api::tags::TagDto;
use std::{cmp::Ordering, collections::HashMap};

#[derive(Clone, Debug, Identifiable, Serialize, Queryable)]
pub struct Tag {
    pub id: i32,
    pub tag_value: String,
}

#[derive(Insertable)]
#[table_name = "tags"]
pub struct NewTag {
    pub tag_value: String,
}

/// Orders tag values alphabetically, ignoring case
fn cmp_values(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

impl Tag {
    insert!(tags, NewTag);
    get!(tags);
    find_by!(tags, find_by_value, tag_value as &str);

    pub fn find_or_create(conn: &Connection, value: &str) -> Result<Tag> {
        match Tag::find_by_value(conn, value) {
            Err(Error::NotFound) => Tag::insert(
                conn,
                NewTag {
                    tag_value: value.to_owned(),
                },
            ),
            res => res,
        }
    }

    pub fn list_all(conn: &Connection) -> Result<Vec<Tag>> {
        let mut tags = tags::table.load::<Tag>(conn)?;
        tags.sort_by(|a, b| cmp_values(&a.tag_value, &b.tag_value));
        Ok(tags)
    }

    /// Every tag value, in alphabetical order
    pub fn values(conn: &Connection) -> Result<Vec<String>> {
        Ok(Tag::list_all(conn)?
            .into_iter()
            .map(|t| t.tag_value)
            .collect())
    }

    /// Number of published posts for each tag id. Tags that are only used
    /// by drafts are absent.
    fn published_counts(conn: &Connection) -> Result<HashMap<i32, i64>> {
        let tag_ids = post_tags::table
            .inner_join(posts::table)
            .filter(posts::published.eq(true))
            .select(post_tags::tag_id)
            .load::<i32>(conn)?;
        Ok(tag_ids.into_iter().fold(HashMap::new(), |mut counts, id| {
            *counts.entry(id).or_insert(0) += 1;
            counts
        }))
    }

    /// Every tag, with the number of published posts using it
    pub fn list_with_counts(conn: &Connection) -> Result<Vec<TagDto>> {
        let counts = Tag::published_counts(conn)?;
        Ok(Tag::list_all(conn)?
            .into_iter()
            .map(|tag| TagDto {
                tag_count: counts.get(&tag.id).copied().unwrap_or(0),
                tag_id: tag.id,
                tag_value: tag.tag_value,
            })
            .collect())
    }

    /// The `limit` most used tags, sorted alphabetically. Unused tags are
    /// never part of the cloud.
    pub fn cloud(conn: &Connection, limit: usize) -> Result<Vec<TagDto>> {
        let mut tags = Tag::list_with_counts(conn)?
            .into_iter()
            .filter(|t| t.tag_count > 0)
            .collect::<Vec<_>>();
        tags.sort_by(|a, b| {
            b.tag_count
                .cmp(&a.tag_count)
                .then_with(|| cmp_values(&a.tag_value, &b.tag_value))
        });
        tags.truncate(limit);
        tags.sort_by(|a, b| cmp_values(&a.tag_value, &b.tag_value));
        Ok(tags)
    }
}
