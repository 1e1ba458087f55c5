use chrono::{Duration, NaiveDateTime};
use diesel::dsl::max;
use diesel::prelude::*;

use super::{inserted_id, ConnectedClient, NewConnectedClient, Store, StoreError};
use crate::schema::connected_clients;

/// How long a check-in keeps a client listed.
pub const CHECK_IN_TTL_SECS: i64 = 60;

impl Store {
    pub fn create_client_check_in(
        &self,
        ip_address: &str,
        node_name: &str,
        now: NaiveDateTime,
    ) -> Result<ConnectedClient, StoreError> {
        self.transaction(|conn| {
            diesel::insert_into(connected_clients::table)
                .values(&NewConnectedClient {
                    ip_address,
                    node_name,
                    expires_at: now + Duration::seconds(CHECK_IN_TTL_SECS),
                    created_at: now,
                    updated_at: now,
                })
                .execute(conn)?;

            let id = inserted_id(conn)?;
            Ok(connected_clients::table
                .find(id)
                .first::<ConnectedClient>(conn)?)
        })
    }

    /// Current check-in of every `(ip_address, node_name)` pair.
    pub fn list_latest_clients(&self) -> Result<Vec<ConnectedClient>, StoreError> {
        use crate::schema::connected_clients::dsl::*;

        self.transaction(|conn| {
            let newest: Vec<i32> = connected_clients
                .group_by((ip_address, node_name))
                .select(max(id))
                .load::<Option<i32>>(conn)?
                .into_iter()
                .flatten()
                .collect();

            Ok(connected_clients
                .filter(id.eq_any(newest))
                .order(id.asc())
                .load::<ConnectedClient>(conn)?)
        })
    }

    pub fn delete_expired_clients(&self, now: NaiveDateTime) -> Result<usize, StoreError> {
        use crate::schema::connected_clients::dsl::*;

        self.with_conn(|conn| {
            Ok(diesel::delete(connected_clients.filter(expires_at.lt(now))).execute(conn)?)
        })
    }
}
