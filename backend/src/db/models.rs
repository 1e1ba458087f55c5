use chrono::NaiveDateTime;
use common::req::SensorReport;
use common::res::AccountInfo;
use diesel::prelude::*;

use crate::schema::*;

#[derive(Debug, Clone, Queryable)]
pub struct Account {
    pub id: i32,
    pub username: String,
    pub password: String, // argon2 PHC string
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Account> for AccountInfo {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            created_at: account.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = accounts)]
pub struct NewAccount<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Queryable, serde::Serialize)]
pub struct Sensor {
    pub id: i32,
    pub node_id: String,
    pub node_name: String,
    pub memory_size: String,
    pub sensor_id: String,
    pub sensor_name: String,
    pub sensor_value: String,
    pub status: String,
    pub last_active: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = sensors)]
pub struct NewSensor<'a> {
    pub node_id: &'a str,
    pub node_name: &'a str,
    pub memory_size: &'a str,
    pub sensor_id: &'a str,
    pub sensor_name: &'a str,
    pub sensor_value: &'a str,
    pub status: &'a str,
    pub last_active: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl<'a> NewSensor<'a> {
    pub fn from_report(report: &'a SensorReport, now: NaiveDateTime) -> Self {
        Self {
            node_id: &report.node_id,
            node_name: &report.node_name,
            memory_size: &report.memory_size,
            sensor_id: &report.sensor_id,
            sensor_name: &report.sensor_name,
            sensor_value: &report.sensor_value,
            status: &report.status,
            last_active: now,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One entry per distinct node, `id` is the newest reading of that node.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SensorNode {
    pub id: i32,
    pub node_name: String,
}

#[derive(Debug, Clone, PartialEq, Queryable, serde::Serialize)]
pub struct ConnectedClient {
    pub id: i32,
    pub ip_address: String,
    pub node_name: String,
    pub expires_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = connected_clients)]
pub struct NewConnectedClient<'a> {
    pub ip_address: &'a str,
    pub node_name: &'a str,
    pub expires_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
