//! JSON wire mapping. Dates are written and read as `yyyy-MM-dd`.

use super::WireMapper;
use crate::error::ServiceError;
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;

/// serde_json-backed mapper for any entity with serde impls.
pub struct JsonMapper<T> {
    _entity: PhantomData<fn() -> T>,
}

impl<T> JsonMapper<T> {
    pub fn new() -> Self {
        JsonMapper { _entity: PhantomData }
    }
}

impl<T> Default for JsonMapper<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> WireMapper<T> for JsonMapper<T>
where
    T: Serialize + DeserializeOwned,
{
    fn from_wire(&self, text: &str) -> Result<T, ServiceError> {
        serde_json::from_str(text).map_err(|e| ServiceError::MalformedInput(e.to_string()))
    }

    fn to_wire(&self, entity: &T) -> Result<String, ServiceError> {
        serde_json::to_string(entity).map_err(|e| ServiceError::Internal(e.to_string()))
    }

    fn to_wire_list(&self, entities: &[T]) -> Result<String, ServiceError> {
        serde_json::to_string(entities).map_err(|e| ServiceError::Internal(e.to_string()))
    }
}

pub mod date_format {
    use crate::sql::DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

pub mod option_date_format {
    use crate::sql::DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.collect_str(&d.format(DATE_FORMAT)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(raw) => NaiveDate::parse_from_str(&raw, DATE_FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}
