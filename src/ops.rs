use rusqlite::Connection;

use crate::error::AppError;
use crate::model::{Task, TITLE_MAX_LEN};

fn validate_title(title: &str) -> Result<(), AppError> {
    if title.is_empty() {
        return Err(AppError::Validation("title must not be empty".into()));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(AppError::Validation(format!(
            "title must be at most {TITLE_MAX_LEN} characters"
        )));
    }
    Ok(())
}

fn task_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        complete: row.get::<_, i64>(2)? != 0,
        created_at: row.get(3)?,
    })
}

pub fn list_tasks(conn: &Connection) -> Result<Vec<Task>, AppError> {
    let mut stmt =
        conn.prepare("SELECT id, title, complete, created_at FROM tasks ORDER BY id")?;
    let rows = stmt.query_map([], task_from_row)?;
    let mut tasks = Vec::new();
    for row in rows {
        tasks.push(row?);
    }
    Ok(tasks)
}

pub fn insert_task(conn: &Connection, title: &str) -> Result<Task, AppError> {
    validate_title(title)?;
    conn.execute("INSERT INTO tasks (title) VALUES (?1)", [title])?;
    let id = conn.last_insert_rowid();
    let task = conn.query_row(
        "SELECT id, title, complete, created_at FROM tasks WHERE id = ?1",
        [id],
        task_from_row,
    )?;
    Ok(task)
}

pub fn get_task(conn: &Connection, id: i64) -> Result<Option<Task>, AppError> {
    let mut stmt =
        conn.prepare_cached("SELECT id, title, complete, created_at FROM tasks WHERE id = ?1")?;
    match stmt.query_row([id], task_from_row) {
        Ok(task) => Ok(Some(task)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn toggle_complete(conn: &Connection, id: i64) -> Result<(), AppError> {
    let changed = conn.execute(
        "UPDATE tasks SET complete = 1 - complete WHERE id = ?1",
        [id],
    )?;
    if changed == 0 {
        return Err(AppError::NotFound(id));
    }
    Ok(())
}

pub fn delete_task(conn: &Connection, id: i64) -> Result<(), AppError> {
    let changed = conn.execute("DELETE FROM tasks WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::NotFound(id));
    }
    Ok(())
}
