//! OTLP/JSON wire model for the logs signal.
//!
//! These types mirror the `opentelemetry.proto.*.v1` messages the emitter
//! writes, with the protobuf JSON mapping applied by serde: camelCase field
//! names, 64-bit integers as decimal strings, bytes as base64, and unset
//! fields left out of the output entirely.

/// `opentelemetry.proto.common`
pub mod common {
    /// `opentelemetry.proto.common.v1`
    pub mod v1 {
        use serde::Serialize;

        /// `AnyValue` is used to represent any type of attribute value.
        ///
        /// Exactly one variant is populated, serialised as a single-field
        /// object such as `{"stringValue":"..."}`.
        #[derive(Debug, Clone, PartialEq, Serialize)]
        pub enum AnyValue {
            /// A UTF-8 string.
            #[serde(rename = "stringValue")]
            String(String),
            /// A boolean.
            #[serde(rename = "boolValue")]
            Bool(bool),
            /// A signed 64-bit integer, written as a decimal string.
            #[serde(
                rename = "intValue",
                serialize_with = "crate::proto::serializers::serialize_i64_to_string"
            )]
            Int(i64),
            /// A double precision float.
            #[serde(
                rename = "doubleValue",
                serialize_with = "crate::proto::serializers::serialize_f64"
            )]
            Double(f64),
            /// Raw bytes, written as base64.
            #[serde(
                rename = "bytesValue",
                serialize_with = "crate::proto::serializers::serialize_to_base64"
            )]
            Bytes(Vec<u8>),
            /// An ordered list of values.
            #[serde(rename = "arrayValue")]
            Array(ArrayValue),
            /// A list of key/value pairs.
            #[serde(rename = "kvlistValue")]
            Map(KeyValueList),
        }

        impl AnyValue {
            /// Returns the string payload if this is a `String` value.
            pub fn as_str(&self) -> Option<&str> {
                match self {
                    AnyValue::String(s) => Some(s),
                    _ => None,
                }
            }
        }

        /// ArrayValue is a list of AnyValue messages.
        #[derive(Debug, Clone, Default, PartialEq, Serialize)]
        pub struct ArrayValue {
            /// Array of values. The array may be empty (contain 0 elements).
            #[serde(skip_serializing_if = "Vec::is_empty")]
            pub values: Vec<AnyValue>,
        }

        /// KeyValueList is a list of KeyValue messages. Keys are not required
        /// to be unique and their order carries no meaning.
        #[derive(Debug, Clone, Default, PartialEq, Serialize)]
        pub struct KeyValueList {
            /// A collection of key/value pairs.
            #[serde(skip_serializing_if = "Vec::is_empty")]
            pub values: Vec<KeyValue>,
        }

        /// KeyValue is a key-value pair that is used to store Span attributes, Link
        /// attributes, etc.
        #[derive(Debug, Clone, PartialEq, Serialize)]
        pub struct KeyValue {
            /// The attribute key.
            pub key: String,
            /// The attribute value.
            pub value: AnyValue,
        }

        impl KeyValue {
            /// Create a new `KeyValue` holding a string value.
            pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
                KeyValue {
                    key: key.into(),
                    value: AnyValue::String(value.into()),
                }
            }
        }

        /// InstrumentationScope is a message representing the instrumentation scope information
        /// such as the fully qualified name and version.
        #[derive(Debug, Clone, Default, PartialEq, Serialize)]
        #[serde(rename_all = "camelCase")]
        pub struct InstrumentationScope {
            /// An empty instrumentation scope name means the name is unknown.
            #[serde(skip_serializing_if = "String::is_empty")]
            pub name: String,
            /// The version of the instrumentation scope.
            #[serde(skip_serializing_if = "String::is_empty")]
            pub version: String,
        }
    }
}

/// `opentelemetry.proto.resource`
pub mod resource {
    /// `opentelemetry.proto.resource.v1`
    pub mod v1 {
        use crate::proto::common::v1::KeyValue;
        use serde::Serialize;

        /// Resource information.
        #[derive(Debug, Clone, Default, PartialEq, Serialize)]
        pub struct Resource {
            /// Set of attributes that describe the resource.
            #[serde(skip_serializing_if = "Vec::is_empty")]
            pub attributes: Vec<KeyValue>,
        }
    }
}

/// `opentelemetry.proto.logs`
pub mod logs {
    /// `opentelemetry.proto.logs.v1`
    pub mod v1 {
        use crate::proto::common::v1::{AnyValue, InstrumentationScope, KeyValue};
        use crate::proto::resource::v1::Resource;
        use serde::Serialize;

        /// LogsData represents the logs data that can be stored in a persistent storage,
        /// OR can be embedded by other protocols that transfer OTLP logs data but do not
        /// implement the OTLP protocol.
        #[derive(Debug, Clone, Default, PartialEq, Serialize)]
        #[serde(rename_all = "camelCase")]
        pub struct LogsData {
            /// An array of ResourceLogs.
            #[serde(skip_serializing_if = "Vec::is_empty")]
            pub resource_logs: Vec<ResourceLogs>,
        }

        /// A collection of ScopeLogs from a Resource.
        #[derive(Debug, Clone, Default, PartialEq, Serialize)]
        #[serde(rename_all = "camelCase")]
        pub struct ResourceLogs {
            /// The resource for the logs in this message.
            #[serde(skip_serializing_if = "Option::is_none")]
            pub resource: Option<Resource>,
            /// A list of ScopeLogs that originate from a resource.
            #[serde(skip_serializing_if = "Vec::is_empty")]
            pub scope_logs: Vec<ScopeLogs>,
        }

        /// A collection of Logs produced by a Scope.
        #[derive(Debug, Clone, Default, PartialEq, Serialize)]
        #[serde(rename_all = "camelCase")]
        pub struct ScopeLogs {
            /// The instrumentation scope information for the logs in this message.
            #[serde(skip_serializing_if = "Option::is_none")]
            pub scope: Option<InstrumentationScope>,
            /// A list of log records.
            #[serde(skip_serializing_if = "Vec::is_empty")]
            pub log_records: Vec<LogRecord>,
        }

        /// A log record according to OpenTelemetry Log Data Model:
        /// <https://github.com/open-telemetry/oteps/blob/main/text/logs/0097-log-data-model.md>
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(rename_all = "camelCase")]
        pub struct LogRecord {
            /// time_unix_nano is the time when the event occurred.
            #[serde(
                skip_serializing_if = "is_zero",
                serialize_with = "crate::proto::serializers::serialize_u64_to_string"
            )]
            pub time_unix_nano: u64,
            /// Time when the event was observed by the collection system.
            #[serde(
                skip_serializing_if = "is_zero",
                serialize_with = "crate::proto::serializers::serialize_u64_to_string"
            )]
            pub observed_time_unix_nano: u64,
            /// Numerical value of the severity, normalized to values described in Log Data Model.
            #[serde(skip_serializing_if = "is_unspecified")]
            pub severity_number: i32,
            /// The severity text (also known as log level).
            #[serde(skip_serializing_if = "String::is_empty")]
            pub severity_text: String,
            /// A value containing the body of the log record.
            #[serde(skip_serializing_if = "Option::is_none")]
            pub body: Option<AnyValue>,
            /// Additional attributes that describe the specific event occurrence.
            #[serde(skip_serializing_if = "Vec::is_empty")]
            pub attributes: Vec<KeyValue>,
            /// A unique identifier for a trace, 16 bytes.
            #[serde(
                skip_serializing_if = "Option::is_none",
                serialize_with = "crate::proto::serializers::serialize_opt_to_base64"
            )]
            pub trace_id: Option<[u8; 16]>,
            /// A unique identifier for a span within a trace, 8 bytes.
            #[serde(
                skip_serializing_if = "Option::is_none",
                serialize_with = "crate::proto::serializers::serialize_opt_to_base64"
            )]
            pub span_id: Option<[u8; 8]>,
            /// W3C trace flags of the correlated span. Omitted when zero.
            #[serde(skip_serializing_if = "Option::is_none")]
            pub flags: Option<u32>,
        }

        fn is_zero(v: &u64) -> bool {
            *v == 0
        }

        fn is_unspecified(v: &i32) -> bool {
            *v == 0
        }
    }
}

pub(crate) mod serializers {
    use base64::prelude::{Engine, BASE64_STANDARD};
    use serde::Serializer;

    pub(crate) fn serialize_u64_to_string<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub(crate) fn serialize_i64_to_string<S>(value: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    // JSON has no literal for NaN or the infinities; protobuf JSON spells them as strings.
    pub(crate) fn serialize_f64<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if value.is_infinite() && value.is_sign_positive() {
            serializer.serialize_str("Infinity")
        } else if value.is_infinite() {
            serializer.serialize_str("-Infinity")
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub(crate) fn serialize_to_base64<S, T>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: AsRef<[u8]>,
    {
        serializer.serialize_str(&BASE64_STANDARD.encode(bytes.as_ref()))
    }

    pub(crate) fn serialize_opt_to_base64<S, T>(
        bytes: &Option<T>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: AsRef<[u8]>,
    {
        match bytes {
            Some(bytes) => serialize_to_base64(bytes, serializer),
            None => serializer.serialize_none(),
        }
    }
}
