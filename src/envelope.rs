//! The `{ret, data, msg}` wrapper returned by every YesDev service.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, YesDevError};

/// The only `ret` value that means success.
pub const RET_OK: i64 = 200;

/// Response envelope returned by every YesDev service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T = Value> {
    /// Application-level status code.
    #[serde(deserialize_with = "crate::serde_utils::lenient_i64")]
    pub ret: i64,

    /// Payload, absent or `null` on most failures.
    #[serde(default)]
    pub data: Option<T>,

    /// Human-readable explanation, usually set on failure.
    #[serde(default, deserialize_with = "crate::serde_utils::string_or_empty")]
    pub msg: String,
}

impl<T> Envelope<T> {
    /// Returns true if `ret == 200`.
    pub fn is_success(&self) -> bool {
        self.ret == RET_OK
    }

    /// Check `ret` only, discarding the payload.
    pub fn into_unit(self) -> Result<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(YesDevError::remote(self.ret, self.msg))
        }
    }
}

impl Envelope<Value> {
    /// Check `ret` and require a non-null payload, decoding it into `T`.
    pub fn into_data<T: DeserializeOwned>(self, service: &str) -> Result<T> {
        if !self.is_success() {
            return Err(YesDevError::remote(self.ret, self.msg));
        }
        match self.data {
            None | Some(Value::Null) => Err(YesDevError::MissingData {
                service: service.to_string(),
            }),
            Some(data) => Ok(serde_json::from_value(data)?),
        }
    }
}
