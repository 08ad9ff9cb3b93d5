//! Fixed SQL text for each entity table. `$N` placeholders work on both backends,
//! and generated keys come back through `RETURNING id`.

/// Row cap for unconditional listings. Bound as the `$1` of every `*_LIST_ALL` statement.
pub const LIST_LIMIT: i64 = 50;

pub const CLIENT_INSERT: &str = "INSERT INTO client (name) VALUES ($1) RETURNING id";
pub const CLIENT_SELECT_BY_ID: &str = "SELECT id, name FROM client WHERE id = $1";
pub const CLIENT_LIST_ALL: &str = "SELECT id, name FROM client ORDER BY id LIMIT $1";
pub const CLIENT_UPDATE_NAME: &str = "UPDATE client SET name = $1 WHERE id = $2";
pub const CLIENT_DELETE_BY_ID: &str = "DELETE FROM client WHERE id = $1";

pub const WORKER_INSERT: &str =
    "INSERT INTO worker (name, birthday, email, level, salary) VALUES ($1, $2, $3, $4, $5) RETURNING id";
pub const WORKER_SELECT_BY_ID: &str =
    "SELECT id, name, birthday, email, level, salary FROM worker WHERE id = $1";
pub const WORKER_LIST_ALL: &str =
    "SELECT id, name, birthday, email, level, salary FROM worker ORDER BY id LIMIT $1";
pub const WORKER_UPDATE_NAME: &str = "UPDATE worker SET name = $1 WHERE id = $2";
pub const WORKER_DELETE_BY_ID: &str = "DELETE FROM worker WHERE id = $1";

pub const PROJECT_INSERT: &str =
    "INSERT INTO project (name, client_id, start_date, finish_date) VALUES ($1, $2, $3, $4) RETURNING id";
pub const PROJECT_SELECT_BY_ID: &str =
    "SELECT id, name, client_id, start_date, finish_date FROM project WHERE id = $1";
pub const PROJECT_LIST_ALL: &str =
    "SELECT id, name, client_id, start_date, finish_date FROM project ORDER BY id LIMIT $1";
pub const PROJECT_UPDATE_NAME: &str = "UPDATE project SET name = $1 WHERE id = $2";
pub const PROJECT_DELETE_BY_ID: &str = "DELETE FROM project WHERE id = $1";
