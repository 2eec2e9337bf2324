pub mod assert;

use actix_web::error::BlockingError;
use anyhow::Context;
use diesel::sql_types::{Bigint, Unsigned};
use diesel::{r2d2::ConnectionManager, MysqlConnection};
use r2d2::PooledConnection;

use crate::{protocol::ERR_UNAVAILABLE, DbPool};

pub type DbConn = PooledConnection<ConnectionManager<MysqlConnection>>;

pub fn get_db_conn(pool: &DbPool) -> anyhow::Result<DbConn> {
    pool.get().context(ERR_UNAVAILABLE)
}

no_arg_sql_function!(last_insert_id, Unsigned<Bigint>);

/// Unwrap a `web::block` failure back into the inner error so callers
/// see its own message (e.g. a slot conflict) instead of the executor
/// wrapper's debug formatting.
pub fn flatten_block_err(err: BlockingError<anyhow::Error>) -> anyhow::Error {
    match err {
        BlockingError::Error(err) => err,
        BlockingError::Canceled => anyhow::anyhow!(ERR_UNAVAILABLE),
    }
}
