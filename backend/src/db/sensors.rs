use chrono::NaiveDateTime;
use common::req::SensorReport;
use diesel::dsl::max;
use diesel::prelude::*;

use super::{inserted_id, NewSensor, Sensor, SensorNode, Store, StoreError};
use crate::schema::sensors;

impl Store {
    pub fn create_sensor_reading(
        &self,
        report: &SensorReport,
        now: NaiveDateTime,
    ) -> Result<Sensor, StoreError> {
        log::debug!("insert reading {}/{}", report.node_name, report.sensor_id);

        self.transaction(|conn| {
            diesel::insert_into(sensors::table)
                .values(&NewSensor::from_report(report, now))
                .execute(conn)?;

            let id = inserted_id(conn)?;
            Ok(sensors::table.find(id).first::<Sensor>(conn)?)
        })
    }

    pub fn list_sensor_nodes(&self) -> Result<Vec<SensorNode>, StoreError> {
        use crate::schema::sensors::dsl::*;

        self.with_conn(|conn| {
            let rows = sensors
                .group_by(node_name)
                .select((max(id), node_name))
                .order(node_name.asc())
                .load::<(Option<i32>, String)>(conn)?;

            Ok(rows
                .into_iter()
                .filter_map(|(newest, name)| {
                    newest.map(|newest| SensorNode {
                        id: newest,
                        node_name: name,
                    })
                })
                .collect())
        })
    }

    /// Every reading of `name`, newest first.
    pub fn list_sensors_by_node_name(&self, name: &str) -> Result<Vec<Sensor>, StoreError> {
        use crate::schema::sensors::dsl::*;

        self.with_conn(|conn| {
            Ok(sensors
                .filter(node_name.eq(name))
                .order(id.desc())
                .load::<Sensor>(conn)?)
        })
    }

    /// Current reading of every `(node_name, sensor_id)` pair.
    pub fn list_latest_sensors(&self) -> Result<Vec<Sensor>, StoreError> {
        use crate::schema::sensors::dsl::*;

        self.transaction(|conn| {
            let newest: Vec<i32> = sensors
                .group_by((node_name, sensor_id))
                .select(max(id))
                .load::<Option<i32>>(conn)?
                .into_iter()
                .flatten()
                .collect();

            Ok(sensors
                .filter(id.eq_any(newest))
                .order(id.asc())
                .load::<Sensor>(conn)?)
        })
    }

    /// Fails with [`StoreError::NotFound`] when the node has no readings.
    pub fn delete_sensors_by_node_name(&self, name: &str) -> Result<usize, StoreError> {
        use crate::schema::sensors::dsl::*;

        self.with_conn(|conn| {
            let deleted = diesel::delete(sensors.filter(node_name.eq(name))).execute(conn)?;
            if deleted == 0 {
                return Err(StoreError::NotFound);
            }
            Ok(deleted)
        })
    }
}
