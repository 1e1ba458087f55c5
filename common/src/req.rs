// keep in sync with api.rs of backend

/// Body of `POST /account/register` and `POST /account/login`.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn is_complete(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.is_empty()
    }
}

/// A single reading pushed by a node, body of `POST /sensors`.
/// Nodes may send the free-form fields as JSON numbers, they are stored as text.
#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
pub struct SensorReport {
    #[serde(default, deserialize_with = "text")]
    pub node_id: String,
    pub node_name: String,
    #[serde(default, deserialize_with = "text")]
    pub memory_size: String,
    #[serde(deserialize_with = "text")]
    pub sensor_id: String,
    #[serde(default, deserialize_with = "text")]
    pub sensor_name: String,
    #[serde(default, deserialize_with = "text")]
    pub sensor_value: String,
    #[serde(default, deserialize_with = "text")]
    pub status: String,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Null,
}

fn text<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match <Scalar as serde::Deserialize>::deserialize(deserializer)? {
        Scalar::Str(s) => s,
        Scalar::Int(n) => n.to_string(),
        Scalar::UInt(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
        Scalar::Null => String::new(),
    })
}

impl SensorReport {
    /// `node_name` and `sensor_id` form the grouping key and must be set.
    pub fn is_complete(&self) -> bool {
        !self.node_name.trim().is_empty() && !self.sensor_id.trim().is_empty()
    }
}

/// Body of `POST /client`.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct ClientCheckIn {
    pub ip_address: String,
    pub node_name: String,
}

impl ClientCheckIn {
    pub fn is_complete(&self) -> bool {
        !self.ip_address.trim().is_empty() && !self.node_name.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensor_report_optional_fields_default_to_empty() {
        let report: SensorReport =
            serde_json::from_str(r#"{"node_name":"room1","sensor_id":"DHT22_t"}"#).unwrap();
        assert_eq!(report.node_name, "room1");
        assert_eq!(report.sensor_value, "");
        assert!(report.is_complete());
    }

    #[test]
    fn sensor_report_requires_grouping_key() {
        assert!(serde_json::from_str::<SensorReport>(r#"{"node_name":"room1"}"#).is_err());

        let blank = SensorReport {
            node_name: "  ".into(),
            sensor_id: "DHT22_t".into(),
            ..Default::default()
        };
        assert!(!blank.is_complete());
    }

    #[test]
    fn sensor_report_accepts_numeric_fields() {
        let report: SensorReport = serde_json::from_str(
            r#"{"node_id":1,"node_name":"room1","memory_size":242732,
                "sensor_id":"DHT22_t","sensor_name":"temp","sensor_value":23.89999962,
                "status":null}"#,
        )
        .unwrap();
        assert_eq!(report.node_id, "1");
        assert_eq!(report.memory_size, "242732");
        assert_eq!(report.sensor_value, "23.89999962");
        assert_eq!(report.status, "");

        assert!(serde_json::from_str::<SensorReport>(
            r#"{"node_name":"room1","sensor_id":{"nested":true}}"#
        )
        .is_err());
    }

    #[test]
    fn blank_credentials_are_incomplete() {
        let creds = Credentials {
            username: "admin".into(),
            password: String::new(),
        };
        assert!(!creds.is_complete());
    }
}
