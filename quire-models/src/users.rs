use crate::{db_conn::DbConn, schema::users, Connection, Error, Result};
use chrono::NaiveDateTime;
use diesel::{self, ExpressionMethods, QueryDsl, RunQueryDsl};
use rocket::{
    outcome::IntoOutcome,
    request::{self, FromRequest, Request},
    Outcome,
};
use tracing::trace;

#[derive(Queryable, Identifiable, Clone, Debug, Serialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub display_name: String,
    #[serde(skip_serializing)]
    pub hashed_password: Option<String>,
    pub creation_date: NaiveDateTime,
}

#[derive(Default, Insertable)]
#[table_name = "users"]
pub struct NewUser {
    pub username: String,
    pub display_name: String,
    pub hashed_password: Option<String>,
}

/// Name of the private cookie holding the id of the logged in user
pub const AUTH_COOKIE: &str = "user_id";

impl User {
    insert!(users, NewUser);
    get!(users);
    find_by!(users, find_by_name, username as &str);

    pub fn hash_pass(pass: &str) -> Result<String> {
        bcrypt::hash(pass, 10).map_err(Error::from)
    }

    pub fn auth(&self, pass: &str) -> bool {
        self.hashed_password
            .as_ref()
            .map(|hash| bcrypt::verify(pass, hash).unwrap_or(false))
            .unwrap_or(false)
    }

    /// Finds a user by name and checks their password
    pub fn login(conn: &Connection, name: &str, password: &str) -> Result<User> {
        let user = User::find_by_name(conn, name).map_err(|_| Error::Unauthorized)?;
        if user.auth(password) {
            Ok(user)
        } else {
            Err(Error::Unauthorized)
        }
    }
}

impl NewUser {
    /// Creates a new local user
    pub fn new_local(
        conn: &Connection,
        username: String,
        display_name: String,
        password: Option<String>,
    ) -> Result<User> {
        let hashed_password = match password {
            Some(pass) => Some(User::hash_pass(&pass)?),
            None => None,
        };
        User::insert(
            conn,
            NewUser {
                username,
                display_name,
                hashed_password,
            },
        )
    }
}

impl<'a, 'r> FromRequest<'a, 'r> for User {
    type Error = ();

    fn from_request(request: &'a Request<'r>) -> request::Outcome<User, ()> {
        let conn = match request.guard::<DbConn>() {
            Outcome::Success(conn) => conn,
            Outcome::Failure(failure) => return Outcome::Failure(failure),
            Outcome::Forward(()) => return Outcome::Forward(()),
        };
        let user = request
            .cookies()
            .get_private(AUTH_COOKIE)
            .and_then(|cookie| cookie.value().parse().ok())
            .and_then(|id| User::get(&*conn, id).ok());
        trace!("Request made by {:?}", user.as_ref().map(|u| &u.username));
        user.or_forward(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::tests::db;
    use diesel::Connection;

    pub(crate) fn fill_database(conn: &crate::Connection) -> Vec<User> {
        let admin = NewUser::new_local(
            conn,
            "admin".to_owned(),
            "The admin".to_owned(),
            None,
        )
        .unwrap();
        let user = NewUser::new_local(conn, "user".to_owned(), "Some user".to_owned(), None)
            .unwrap();
        let other = NewUser::new_local(conn, "other".to_owned(), String::new(), None).unwrap();
        vec![admin, user, other]
    }

    #[test]
    fn find_by() {
        let conn = &db();
        conn.test_transaction::<_, (), _>(|| {
            let users = fill_database(conn);
            let found = User::find_by_name(conn, "user").unwrap();
            assert_eq!(found.id, users[1].id);
            assert_eq!(User::get(conn, users[0].id).unwrap().username, "admin");
            assert!(matches!(
                User::find_by_name(conn, "nobody"),
                Err(Error::NotFound)
            ));
            assert_eq!(
                users::table.count().get_result::<i64>(conn).unwrap(),
                3
            );
            Ok(())
        });
    }

    #[test]
    fn auth() {
        let conn = &db();
        conn.test_transaction::<_, (), _>(|| {
            let test_user = NewUser::new_local(
                conn,
                "test".to_owned(),
                "test user".to_owned(),
                Some("test_password".to_owned()),
            )
            .unwrap();

            assert!(test_user.auth("test_password"));
            assert!(!test_user.auth("other_password"));
            assert!(User::login(conn, "test", "test_password").is_ok());
            assert!(matches!(
                User::login(conn, "test", "nope"),
                Err(Error::Unauthorized)
            ));
            assert!(matches!(
                User::login(conn, "ghost", "test_password"),
                Err(Error::Unauthorized)
            ));
            Ok(())
        });
    }

    #[test]
    fn users_without_password_cannot_log_in() {
        let conn = &db();
        conn.test_transaction::<_, (), _>(|| {
            let users = fill_database(conn);
            assert!(!users[0].auth(""));
            Ok(())
        });
    }
}
