use crate::{
    posts::Post,
    schema::{likes, posts},
    Connection, Error, Result,
};
use chrono::NaiveDateTime;
use diesel::{self, Connection as _, ExpressionMethods, QueryDsl, RunQueryDsl};
use tracing::info;

#[derive(Clone, Queryable, Identifiable, Debug)]
pub struct Like {
    pub id: i32,
    pub user_id: i32,
    pub post_id: i32,
    pub creation_date: NaiveDateTime,
}

#[derive(Default, Insertable)]
#[table_name = "likes"]
pub struct NewLike {
    pub user_id: i32,
    pub post_id: i32,
}

impl Like {
    insert!(likes, NewLike);
    find_by!(likes, find_by_user_on_post, user_id as i32, post_id as i32);
    list_by!(likes, list_for_post, post_id as i32);

    /// Likes a post, or removes the like if the user already liked it.
    ///
    /// Returns the change applied to the like count of the post: `1` for a
    /// new like, `-1` for a removed one.
    pub fn toggle(conn: &Connection, user_id: i32, post_id: i32) -> Result<i32> {
        conn.transaction::<_, Error, _>(|| {
            let post = Post::get(conn, post_id)?;
            let delta = match Like::find_by_user_on_post(conn, user_id, post.id) {
                Ok(like) => {
                    diesel::delete(&like).execute(conn)?;
                    -1
                }
                Err(Error::NotFound) => {
                    Like::insert(
                        conn,
                        NewLike {
                            user_id,
                            post_id: post.id,
                        },
                    )?;
                    1
                }
                Err(e) => return Err(e),
            };
            diesel::update(posts::table.filter(posts::id.eq(post.id)))
                .set(posts::likes_count.eq(posts::likes_count + delta))
                .execute(conn)?;
            info!(user_id, post_id, delta, "like toggled");
            Ok(delta)
        })
    }
}
