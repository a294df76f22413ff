use crate::routes::errors::ErrorPage;
use quire_models::{
    db_conn::DbConn,
    users::{User, AUTH_COOKIE},
};
use rocket::http::{Cookie, Cookies};
use rocket::request::LenientForm;
use rocket::response::Redirect;
use tracing::{info, warn};

#[derive(FromForm)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[post("/login", data = "<form>")]
pub fn create(
    conn: DbConn,
    form: LenientForm<LoginForm>,
    mut cookies: Cookies<'_>,
) -> Result<Redirect, ErrorPage> {
    let user = User::login(&conn, &form.username, &form.password).map_err(|e| {
        warn!("Failed login attempt for {}", form.username);
        e
    })?;
    cookies.add_private(Cookie::new(AUTH_COOKIE, user.id.to_string()));
    info!("{} logged in", user.username);
    Ok(Redirect::to("/"))
}

#[get("/logout")]
pub fn delete(mut cookies: Cookies<'_>) -> Redirect {
    if let Some(cookie) = cookies.get_private(AUTH_COOKIE) {
        cookies.remove_private(cookie);
    }
    Redirect::to("/")
}
