use actix_web::web;
use anyhow::{bail, Context};
use diesel::prelude::*;

use crate::{database::get_db_conn, protocol::ERR_UNAVAILABLE, DbPool};

pub async fn assert_staff(pool: &DbPool, staff_id: u64) -> anyhow::Result<()> {
    use crate::schema::staff;

    let conn = get_db_conn(pool)?;
    let res = web::block(move || {
        staff::table
            .filter(staff::id.eq(staff_id))
            .filter(staff::is_active.eq(true))
            .count()
            .get_result::<i64>(&conn)
    })
    .await
    .context(ERR_UNAVAILABLE)?;

    if res == 0 {
        bail!("No such staff member");
    }

    Ok(())
}
