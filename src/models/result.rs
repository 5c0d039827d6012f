//! Result envelope shared by the engine and the protocols
//!
//! Operations hand callers `{code, message, data}` instead of panicking or
//! throwing. Callers check `code` before trusting `data`.

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt::Display;

/// Numeric outcome code (serialized as a bare integer)
#[derive(Serialize_repr, Deserialize_repr, Clone, Copy, Debug, PartialEq, Eq)]
#[repr(i8)]
pub enum ResultCode {
    Ok = 0,
    /// Preconditions unmet; nothing was changed
    StructuralError = -1,
    /// Bullet alignment only: nothing to align to (not an error)
    ForwardingAbsence = -2,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OpResult<T> {
    pub code: ResultCode,
    pub message: String,
    pub data: Option<T>,
}

impl<T> OpResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: ResultCode::Ok,
            message: String::new(),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: ResultCode::StructuralError,
            message: message.into(),
            data: None,
        }
    }

    pub fn absent(message: impl Into<String>) -> Self {
        Self {
            code: ResultCode::ForwardingAbsence,
            message: message.into(),
            data: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == ResultCode::Ok
    }

    /// Wrap a `Result`, mapping any error to a structural error
    pub fn from_result<E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::error(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_serializes_as_integer() {
        let result: OpResult<u32> = OpResult::error("no previous sibling");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["code"], -1);
        assert_eq!(json["message"], "no previous sibling");
        assert!(json["data"].is_null());

        let absent: OpResult<f64> = OpResult::absent("no children");
        assert_eq!(serde_json::to_value(&absent).unwrap()["code"], -2);
    }

    #[test]
    fn test_from_result() {
        let ok: OpResult<&str> = OpResult::from_result(Ok::<_, String>("done"));
        assert!(ok.is_ok());
        assert_eq!(ok.data, Some("done"));

        let err: OpResult<()> = OpResult::from_result(Err("boom"));
        assert_eq!(err.code, ResultCode::StructuralError);
        assert_eq!(err.message, "boom");
    }
}
