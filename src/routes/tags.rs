use crate::routes::errors::ErrorPage;
use crate::template_utils::{tag_cloud, Ructe};
use quire_api::tags::TagDto;
use quire_models::{ap_url, db_conn::DbConn, tags::Tag, CONFIG};
use rocket_contrib::json::Json;

#[get("/tags")]
pub fn all(conn: DbConn) -> Result<Json<Vec<TagDto>>, ErrorPage> {
    Ok(Json(Tag::list_with_counts(&conn)?))
}

#[get("/tagvalues")]
pub fn values(conn: DbConn) -> Result<Json<Vec<String>>, ErrorPage> {
    Ok(Json(Tag::values(&conn)?))
}

#[get("/tagcloud")]
pub fn cloud(conn: DbConn) -> Result<Ructe, ErrorPage> {
    let tags = Tag::cloud(&conn, CONFIG.paging.tag_cloud_size)?;
    Ok(tag_cloud(&ap_url(&CONFIG.base_url), &tags)?)
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use crate::routes::tests::client;
    use assert_json_diff::assert_json_eq;
    use diesel::{sql_query, RunQueryDsl};
    use quire_models::{
        ap_url,
        posts::{NewPost, Post, PostDisplayType},
        users::NewUser,
        CONFIG,
    };
    use rocket::http::{ContentType, Status};
    use serde_json::{json, Value};

    #[test]
    fn tags_and_cloud() {
        let (client, conn) = client();
        let alice = NewUser::new_local(&conn, "alice".to_owned(), String::new(), None).unwrap();
        let posts = (0..3)
            .map(|i| {
                let (post, _) = NewPost::from_markdown(
                    &alice,
                    &format!("Tagged {}", i),
                    "",
                    PostDisplayType::Post,
                );
                Post::insert(&conn, post).unwrap()
            })
            .collect::<Vec<_>>();
        let rust = posts[0].set_tags(&*conn, &["Rust", "Web"]).unwrap();
        posts[1].set_tags(&*conn, &["Rust"]).unwrap();
        posts[2].set_tags(&*conn, &["Rust", "diesel"]).unwrap();

        let mut res = client.get("/json/posts/tagvalues").dispatch();
        assert_eq!(res.content_type(), Some(ContentType::JSON));
        let values: Value = serde_json::from_str(&res.body_string().unwrap()).unwrap();
        assert_json_eq!(values, json!(["diesel", "Rust", "Web"]));

        let mut res = client.get("/json/posts/tags").dispatch();
        let tags: Value = serde_json::from_str(&res.body_string().unwrap()).unwrap();
        assert_json_eq!(
            tags[1],
            json!({ "tagId": rust[0].id, "tagValue": "Rust", "tagCount": 3 })
        );
        assert_eq!(tags.as_array().unwrap().len(), 3);

        let mut res = client.get("/json/posts/tagcloud").dispatch();
        assert_eq!(res.status(), Status::Ok);
        assert_eq!(res.content_type(), Some(ContentType::HTML));
        let base = ap_url(&CONFIG.base_url);
        assert_eq!(
            res.body_string().unwrap(),
            format!(
                "<ul class='taglist'>\
                 <li><a href='{0}/posts/tag/diesel' class='minTag'>diesel</a></li>\
                 <li><a href='{0}/posts/tag/rust' class='maxTag'>Rust</a></li>\
                 <li><a href='{0}/posts/tag/web' class='minTag'>Web</a></li>\
                 </ul>",
                base
            )
        );
    }

    #[test]
    fn empty_cloud() {
        let (client, _conn) = client();
        let mut res = client.get("/json/posts/tagcloud").dispatch();
        assert_eq!(res.body_string().unwrap(), "<ul class='taglist'></ul>");
        let mut res = client.get("/json/posts/tags").dispatch();
        assert_eq!(res.body_string().unwrap(), "[]");
    }

    #[test]
    fn database_errors_are_server_errors() {
        let (client, conn) = client();
        sql_query("DROP TABLE post_tags").execute(&*conn).unwrap();
        sql_query("DROP TABLE tags").execute(&*conn).unwrap();

        let mut res = client.get("/json/posts/tags").dispatch();
        assert_eq!(res.status(), Status::InternalServerError);
        assert_eq!(res.content_type(), Some(ContentType::JSON));
        let body: Value = serde_json::from_str(&res.body_string().unwrap()).unwrap();
        assert_json_eq!(body, json!({ "error": "Something broke on our side" }));

        let res = client.get("/json/posts/tagcloud").dispatch();
        assert_eq!(res.status(), Status::InternalServerError);
    }
}
