use crate::{schema::post_images, Error, Result};
use diesel::{self, ExpressionMethods, QueryDsl, RunQueryDsl};

/// One of the pictures of a multi-photo post
#[derive(Clone, Debug, Queryable, Identifiable, Serialize)]
pub struct PostImage {
    pub id: i32,
    pub post_id: i32,
    pub url: String,
    pub alt_text: String,
}

#[derive(Insertable)]
#[table_name = "post_images"]
pub struct NewPostImage {
    pub post_id: i32,
    pub url: String,
    pub alt_text: String,
}

impl PostImage {
    insert!(post_images, NewPostImage);
    list_by!(post_images, list_for_post, post_id as i32);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{posts::tests::fill_database, tests::db};
    use diesel::Connection;

    #[test]
    fn images_are_listed_in_insertion_order() {
        let conn = &db();
        conn.test_transaction::<_, (), _>(|| {
            let (_, posts) = fill_database(conn, 2);
            for name in &["first", "second", "third"] {
                PostImage::insert(
                    conn,
                    NewPostImage {
                        post_id: posts[0].id,
                        url: format!("/static/media/{}.png", name),
                        alt_text: name.to_string(),
                    },
                )
                .unwrap();
            }

            let images = posts[0].images(conn).unwrap();
            assert_eq!(
                images.iter().map(|i| i.alt_text.as_str()).collect::<Vec<_>>(),
                vec!["first", "second", "third"]
            );
            assert!(posts[1].images(conn).unwrap().is_empty());

            diesel::delete(&images[1]).execute(conn).unwrap();
            assert_eq!(PostImage::list_for_post(conn, posts[0].id).unwrap().len(), 2);
            Ok(())
        });
    }
}
