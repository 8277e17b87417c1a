//! `PostgreSQL` repository implementation for board storage.

use super::{
    models::{ColumnRow, NewColumnRow, NewTaskRow, TaskRow},
    schema::{columns, tasks},
};
use crate::board::{
    domain::{Column, ColumnId, Position, Task, TaskId, Title},
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult, BoardTransaction},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// Schema applied by [`PostgresBoardRepository::bootstrap_schema`].
pub const BOARD_SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_board_tables/up.sql");

/// Advisory lock key guarding board-scope mutations.
const BOARD_LOCK_KEY: i64 = 0x006b_616e_6261_6e00;

/// `PostgreSQL`-backed board repository.
///
/// Every unit of work runs on one pooled connection inside
/// `PgConnection::transaction`, offloaded with
/// [`tokio::task::spawn_blocking`]. Read-write transactions use the default
/// `READ COMMITTED` isolation plus explicit locks; snapshots run as
/// `REPEATABLE READ, READ ONLY`.
#[derive(Debug, Clone)]
pub struct PostgresBoardRepository {
    pool: BoardPgPool,
}

impl PostgresBoardRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub const fn pool(&self) -> &BoardPgPool {
        &self.pool
    }

    /// Creates the board tables when they do not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::Persistence`] when the schema cannot be
    /// applied.
    pub async fn bootstrap_schema(&self) -> BoardRepositoryResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(BOARD_SCHEMA_SQL)
                .map_err(BoardRepositoryError::persistence)
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> BoardRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> BoardRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut pooled = pool.get().map_err(BoardRepositoryError::persistence)?;
            let connection: &mut PgConnection = &mut pooled;
            f(connection)
        })
        .await
        .map_err(BoardRepositoryError::persistence)?
    }
}

impl From<DieselError> for BoardRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl BoardRepository for PostgresBoardRepository {
    async fn transaction<F, T>(&self, work: F) -> BoardRepositoryResult<T>
    where
        F: FnOnce(&mut dyn BoardTransaction) -> BoardRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        self.run_blocking(move |connection| {
            connection.transaction::<_, BoardRepositoryError, _>(|conn| {
                work(&mut PgBoardTransaction { conn })
            })
        })
        .await
    }

    async fn snapshot<F, T>(&self, work: F) -> BoardRepositoryResult<T>
    where
        F: FnOnce(&mut dyn BoardTransaction) -> BoardRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        self.run_blocking(move |connection| {
            connection
                .build_transaction()
                .repeatable_read()
                .read_only()
                .run::<_, BoardRepositoryError, _>(|conn| work(&mut PgBoardTransaction { conn }))
        })
        .await
    }

    async fn ping(&self) -> BoardRepositoryResult<()> {
        self.run_blocking(|connection| {
            diesel::sql_query("SELECT 1").execute(connection)?;
            Ok(())
        })
        .await
    }
}

/// Board transaction bound to one open `PostgreSQL` transaction.
struct PgBoardTransaction<'a> {
    conn: &'a mut PgConnection,
}

fn to_count<N>(value: N) -> BoardRepositoryResult<u32>
where
    N: TryInto<u32, Error = std::num::TryFromIntError>,
{
    value.try_into().map_err(BoardRepositoryError::persistence)
}

fn into_tasks(rows: Vec<TaskRow>) -> BoardRepositoryResult<Vec<Task>> {
    rows.into_iter().map(TaskRow::into_domain).collect()
}

impl BoardTransaction for PgBoardTransaction<'_> {
    fn lock_board(&mut self) -> BoardRepositoryResult<()> {
        diesel::sql_query("SELECT pg_advisory_xact_lock($1)")
            .bind::<diesel::sql_types::BigInt, _>(BOARD_LOCK_KEY)
            .execute(self.conn)?;
        Ok(())
    }

    fn lock_columns(&mut self, ids: &[ColumnId]) -> BoardRepositoryResult<Vec<ColumnId>> {
        let uuids: Vec<Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        let locked = columns::table
            .filter(columns::id.eq_any(uuids))
            .order(columns::id.asc())
            .select(columns::id)
            .for_update()
            .load::<Uuid>(self.conn)?;
        Ok(locked.into_iter().map(ColumnId::from_uuid).collect())
    }

    fn find_task(&mut self, id: TaskId) -> BoardRepositoryResult<Option<Task>> {
        tasks::table
            .find(id.into_inner())
            .select(TaskRow::as_select())
            .first::<TaskRow>(self.conn)
            .optional()?
            .map(TaskRow::into_domain)
            .transpose()
    }

    fn find_task_for_update(&mut self, id: TaskId) -> BoardRepositoryResult<Option<Task>> {
        tasks::table
            .find(id.into_inner())
            .select(TaskRow::as_select())
            .for_update()
            .first::<TaskRow>(self.conn)
            .optional()?
            .map(TaskRow::into_domain)
            .transpose()
    }

    fn find_column(&mut self, id: ColumnId) -> BoardRepositoryResult<Option<Column>> {
        columns::table
            .find(id.into_inner())
            .select(ColumnRow::as_select())
            .first::<ColumnRow>(self.conn)
            .optional()?
            .map(ColumnRow::into_domain)
            .transpose()
    }

    fn count_columns(&mut self) -> BoardRepositoryResult<u32> {
        let total: i64 = columns::table.count().get_result(self.conn)?;
        to_count(total)
    }

    fn count_tasks(&mut self, column_id: ColumnId) -> BoardRepositoryResult<u32> {
        let total: i64 = tasks::table
            .filter(tasks::column_id.eq(column_id.into_inner()))
            .count()
            .get_result(self.conn)?;
        to_count(total)
    }

    fn columns(&mut self) -> BoardRepositoryResult<Vec<Column>> {
        columns::table
            .order((columns::position.asc(), columns::id.asc()))
            .select(ColumnRow::as_select())
            .load::<ColumnRow>(self.conn)?
            .into_iter()
            .map(ColumnRow::into_domain)
            .collect()
    }

    fn tasks_in_column(&mut self, column_id: ColumnId) -> BoardRepositoryResult<Vec<Task>> {
        let rows = tasks::table
            .filter(tasks::column_id.eq(column_id.into_inner()))
            .order((
                tasks::position.asc(),
                tasks::created_at.asc(),
                tasks::id.asc(),
            ))
            .select(TaskRow::as_select())
            .load::<TaskRow>(self.conn)?;
        into_tasks(rows)
    }

    fn all_tasks(&mut self) -> BoardRepositoryResult<Vec<Task>> {
        let rows = tasks::table
            .order((
                tasks::position.asc(),
                tasks::created_at.asc(),
                tasks::id.asc(),
            ))
            .select(TaskRow::as_select())
            .load::<TaskRow>(self.conn)?;
        into_tasks(rows)
    }

    fn insert_column(&mut self, column: &Column) -> BoardRepositoryResult<()> {
        let row = NewColumnRow::from_domain(column)?;
        diesel::insert_into(columns::table)
            .values(&row)
            .execute(self.conn)?;
        Ok(())
    }

    fn insert_task(&mut self, task: &Task) -> BoardRepositoryResult<()> {
        let row = NewTaskRow::from_domain(task)?;
        diesel::insert_into(tasks::table)
            .values(&row)
            .execute(self.conn)
            .map_err(|err| match err {
                DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                    BoardRepositoryError::ColumnNotFound(task.column_id())
                }
                _ => BoardRepositoryError::persistence(err),
            })?;
        Ok(())
    }

    fn update_column_title(&mut self, id: ColumnId, title: &Title) -> BoardRepositoryResult<bool> {
        let updated = diesel::update(columns::table.find(id.into_inner()))
            .set(columns::title.eq(title.as_str()))
            .execute(self.conn)?;
        Ok(updated > 0)
    }

    fn update_task_content(
        &mut self,
        id: TaskId,
        title: &Title,
        description: &str,
    ) -> BoardRepositoryResult<bool> {
        let updated = diesel::update(tasks::table.find(id.into_inner()))
            .set((
                tasks::title.eq(title.as_str()),
                tasks::description.eq(description),
            ))
            .execute(self.conn)?;
        Ok(updated > 0)
    }

    fn set_column_position(
        &mut self,
        id: ColumnId,
        position: Position,
    ) -> BoardRepositoryResult<()> {
        diesel::update(columns::table.find(id.into_inner()))
            .set(columns::position.eq(position.to_persisted()?))
            .execute(self.conn)?;
        Ok(())
    }

    fn set_task_position(&mut self, id: TaskId, position: Position) -> BoardRepositoryResult<()> {
        diesel::update(tasks::table.find(id.into_inner()))
            .set(tasks::position.eq(position.to_persisted()?))
            .execute(self.conn)?;
        Ok(())
    }

    fn relocate_task(
        &mut self,
        id: TaskId,
        column_id: ColumnId,
        position: Position,
    ) -> BoardRepositoryResult<()> {
        diesel::update(tasks::table.find(id.into_inner()))
            .set((
                tasks::column_id.eq(column_id.into_inner()),
                tasks::position.eq(position.to_persisted()?),
            ))
            .execute(self.conn)?;
        Ok(())
    }

    fn delete_task(&mut self, id: TaskId) -> BoardRepositoryResult<bool> {
        let deleted = diesel::delete(tasks::table.find(id.into_inner())).execute(self.conn)?;
        Ok(deleted > 0)
    }

    fn delete_tasks_in_column(&mut self, column_id: ColumnId) -> BoardRepositoryResult<u32> {
        let owned = tasks::table.filter(tasks::column_id.eq(column_id.into_inner()));
        let deleted = diesel::delete(owned).execute(self.conn)?;
        to_count(deleted)
    }

    fn delete_column(&mut self, id: ColumnId) -> BoardRepositoryResult<bool> {
        let deleted = diesel::delete(columns::table.find(id.into_inner())).execute(self.conn)?;
        Ok(deleted > 0)
    }
}
