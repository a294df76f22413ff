use crate::{schema::post_tags, Error, Result};
use diesel::{self, ExpressionMethods, QueryDsl, RunQueryDsl};

#[derive(Clone, Queryable, Identifiable)]
pub struct PostTag {
    pub id: i32,
    pub post_id: i32,
    pub tag_id: i32,
}

#[derive(Insertable)]
#[table_name = "post_tags"]
pub struct NewPostTag {
    pub post_id: i32,
    pub tag_id: i32,
}

impl PostTag {
    insert!(post_tags, NewPostTag);
    list_by!(post_tags, for_post, post_id as i32);
}
