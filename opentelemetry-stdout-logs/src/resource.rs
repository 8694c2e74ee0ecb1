//! Identity of the emitting service.
//!
//! Every record carries the same five resource attributes: the service name
//! and version from [`ServiceIdentity`], and the SDK name, language and
//! version of this crate.
use std::{borrow::Cow, env};

use crate::proto::common::v1::{InstrumentationScope, KeyValue};
use crate::proto::resource::v1::Resource;

const OTEL_RESOURCE_ATTRIBUTES: &str = "OTEL_RESOURCE_ATTRIBUTES";
const OTEL_SERVICE_NAME: &str = "OTEL_SERVICE_NAME";

const SERVICE_NAME: &str = "service.name";
const SERVICE_VERSION: &str = "service.version";
const TELEMETRY_SDK_NAME: &str = "telemetry.sdk.name";
const TELEMETRY_SDK_LANGUAGE: &str = "telemetry.sdk.language";
const TELEMETRY_SDK_VERSION: &str = "telemetry.sdk.version";

const SDK_NAME: &str = env!("CARGO_PKG_NAME");
const SDK_LANGUAGE: &str = "rust";
const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

const UNKNOWN_SERVICE: &str = "unknown_service";

/// Service name and version reported in every record's resource.
///
/// Built once at startup and owned by a [`LogEmitter`](crate::LogEmitter);
/// it never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIdentity {
    service_name: Cow<'static, str>,
    service_version: Cow<'static, str>,
}

impl ServiceIdentity {
    /// Create an identity from an explicit name and version.
    pub fn new(
        service_name: impl Into<Cow<'static, str>>,
        service_version: impl Into<Cow<'static, str>>,
    ) -> Self {
        ServiceIdentity {
            service_name: service_name.into(),
            service_version: service_version.into(),
        }
    }

    /// Read the identity from the standard OpenTelemetry environment variables.
    ///
    /// The name comes from `OTEL_SERVICE_NAME`, then from `service.name` in
    /// `OTEL_RESOURCE_ATTRIBUTES`, and defaults to `unknown_service`. The
    /// version comes from `service.version` in `OTEL_RESOURCE_ATTRIBUTES`
    /// and defaults to empty.
    pub fn from_env() -> Self {
        let resource_attributes = env::var(OTEL_RESOURCE_ATTRIBUTES).unwrap_or_default();

        let service_name = env::var(OTEL_SERVICE_NAME)
            .ok()
            .filter(|s| !s.is_empty())
            .or_else(|| resource_attribute(&resource_attributes, SERVICE_NAME))
            .unwrap_or_else(|| UNKNOWN_SERVICE.to_owned());
        let service_version =
            resource_attribute(&resource_attributes, SERVICE_VERSION).unwrap_or_default();

        ServiceIdentity::new(service_name, service_version)
    }

    /// The `service.name` resource attribute.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// The `service.version` resource attribute.
    pub fn service_version(&self) -> &str {
        &self.service_version
    }

    pub(crate) fn resource(&self) -> Resource {
        Resource {
            attributes: vec![
                KeyValue::string(SERVICE_NAME, &*self.service_name),
                KeyValue::string(SERVICE_VERSION, &*self.service_version),
                KeyValue::string(TELEMETRY_SDK_NAME, SDK_NAME),
                KeyValue::string(TELEMETRY_SDK_LANGUAGE, SDK_LANGUAGE),
                KeyValue::string(TELEMETRY_SDK_VERSION, SDK_VERSION),
            ],
        }
    }
}

impl Default for ServiceIdentity {
    fn default() -> Self {
        ServiceIdentity::new(UNKNOWN_SERVICE, "")
    }
}

pub(crate) fn instrumentation_scope() -> InstrumentationScope {
    InstrumentationScope {
        name: SDK_NAME.to_owned(),
        version: SDK_VERSION.to_owned(),
    }
}

/// Look up `key` in a `key1=value1,key2=value2,...` list. The last entry wins.
fn resource_attribute(attributes: &str, key: &str) -> Option<String> {
    attributes
        .split_terminator(',')
        .filter_map(|entry| entry.split_once('='))
        .filter(|(k, _)| k.trim() == key)
        .map(|(_, v)| v.trim().to_owned())
        .next_back()
}
