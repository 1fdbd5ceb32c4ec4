use serde::Serialize;
use sqlx::FromRow;

/// Public columns of `users`. `id` may be INT4 (SERIAL) and `role` a native enum
/// type, so both are cast to the types decoded here.
const SELECT_USER_BY_USERNAME: &str =
    "SELECT id::BIGINT AS id, username, email, role::TEXT AS role FROM users WHERE username = $1";

/// A row of the `users` table. Credentials are managed by the identity provider;
/// only the public columns are read here.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
}

/// Looks up a user by username.
pub async fn find_by_username(
    pool: &sqlx::PgPool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(SELECT_USER_BY_USERNAME)
        .bind(username)
        .fetch_optional(pool)
        .await
}
