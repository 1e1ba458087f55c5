use chrono::{NaiveDateTime, SubsecRound, Utc};

/// Current UTC time, truncated to the microsecond precision the store keeps.
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(6)
}
