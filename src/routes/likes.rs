use crate::routes::errors::ErrorPage;
use quire_models::{db_conn::DbConn, likes::Like, users::User, Error};
use rocket_contrib::json::Json;

/// Likes or unlikes a post, answering with the change of its like count
#[get("/post/like/<post_id>")]
pub fn toggle(post_id: i32, user: Option<User>, conn: DbConn) -> Result<Json<i32>, ErrorPage> {
    let user = user.ok_or(Error::Unauthorized)?;
    Ok(Json(Like::toggle(&conn, user.id, post_id)?))
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use crate::routes::tests::{client, login};
    use assert_json_diff::assert_json_eq;
    use quire_models::{
        posts::{NewPost, Post, PostDisplayType},
        users::NewUser,
    };
    use rocket::http::Status;
    use serde_json::{json, Value};

    #[test]
    fn like_and_unlike() {
        let (client, conn) = client();
        let alice = NewUser::new_local(
            &conn,
            "alice".to_owned(),
            "Alice".to_owned(),
            Some("secret".to_owned()),
        )
        .unwrap();
        let (post, _) = NewPost::from_markdown(&alice, "Liked", "", PostDisplayType::Note);
        let post = Post::insert(&conn, post).unwrap();
        let uri = format!("/json/posts/post/like/{}", post.id);

        let mut res = client.get(uri.clone()).dispatch();
        assert_eq!(res.status(), Status::Unauthorized);
        let body: Value = serde_json::from_str(&res.body_string().unwrap()).unwrap();
        assert!(body["error"].is_string());

        assert_eq!(login(&client, "alice", "secret"), Status::SeeOther);
        let mut res = client.get(uri.clone()).dispatch();
        assert_eq!(res.status(), Status::Ok);
        assert_eq!(res.body_string().unwrap(), "1");
        assert_eq!(Post::get(&conn, post.id).unwrap().likes_count, 1);

        let mut res = client.get(uri).dispatch();
        assert_eq!(res.body_string().unwrap(), "-1");
        assert_eq!(Post::get(&conn, post.id).unwrap().likes_count, 0);

        let mut res = client
            .get(format!("/json/posts/post/like/{}", post.id + 1))
            .dispatch();
        assert_eq!(res.status(), Status::NotFound);
        let body: Value = serde_json::from_str(&res.body_string().unwrap()).unwrap();
        assert_json_eq!(
            body,
            json!({ "error": format!("Nothing found at /json/posts/post/like/{}", post.id + 1) })
        );
    }
}
