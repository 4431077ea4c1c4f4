use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ReportError, json_type_name};
use crate::keys;

/// Overall outcome of a configuration run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// At least one resource was changed
    Changed,
    #[default]
    Unchanged,
    /// At least one resource failed
    Failed,
}

/// User-defined data carried by a report from an agent to report processors.
///
/// Keys are strings; values are any JSON value. Callers may store whatever
/// they like here. The class tagger only ever writes the keys listed in
/// [`keys::tags::ALL`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Userdata(Map<String, Value>);

impl Userdata {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, returning the previous one under `key` if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Reads `key` back as a list of strings.
    ///
    /// Returns `None` when the key is absent, is not an array, or holds a
    /// non-string element.
    #[must_use]
    pub fn string_list(&self, key: &str) -> Option<Vec<&str>> {
        self.0
            .get(key)?
            .as_array()?
            .iter()
            .map(Value::as_str)
            .collect()
    }

    /// Stores `items` under `key` as a JSON array of strings.
    pub(crate) fn set_string_list(&mut self, key: &str, items: &[String]) {
        let list = items.iter().cloned().map(Value::String).collect();
        self.0.insert(key.to_string(), Value::Array(list));
    }

    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Userdata {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Summary of a single configuration agent run.
///
/// Serialized as a JSON object. `userdata` is always emitted, as `{}` when
/// empty. Top-level keys this type does not model are kept as extra fields
/// and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Certname of the node the run happened on
    pub host: String,
    /// When the run started
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub status: RunStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_uuid: Option<String>,
    /// Absent on input means empty.
    #[serde(default)]
    pub userdata: Userdata,
    /// Host fields not modeled above (resource events, metrics, logs, ...)
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Report {
    /// Starts a report for `host` timestamped now, with empty userdata.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self::at(host, Utc::now())
    }

    /// Starts a report for `host` with an explicit start time.
    #[must_use]
    pub fn at(host: impl Into<String>, time: DateTime<Utc>) -> Self {
        Self {
            host: host.into(),
            time,
            status: RunStatus::default(),
            configuration_version: None,
            environment: None,
            transaction_uuid: None,
            userdata: Userdata::new(),
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn userdata(&self) -> &Userdata {
        &self.userdata
    }

    pub fn userdata_mut(&mut self) -> &mut Userdata {
        &mut self.userdata
    }

    /// Host fields not modeled by this type.
    #[must_use]
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Sets an extra host field, returning the previous value if any.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::ReservedField`] when `key` is one of
    /// [`keys::REPORT_FIELDS`]; writing it here would shadow the typed field
    /// in the serialized report.
    pub fn insert_extra(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, ReportError> {
        let key = key.into();
        if keys::REPORT_FIELDS.contains(&key.as_str()) {
            return Err(ReportError::ReservedField { key });
        }
        Ok(self.extra.insert(key, value.into()))
    }

    pub fn remove_extra(&mut self, key: &str) -> Option<Value> {
        self.extra.remove(key)
    }

    /// Serializes the report, userdata included.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Json`] if a value fails to serialize.
    pub fn to_value(&self) -> Result<Value, ReportError> {
        Ok(serde_json::to_value(self)?)
    }

    /// # Errors
    ///
    /// Returns [`ReportError::Json`] if a value fails to serialize.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Rebuilds a report from its serialized form.
    ///
    /// A missing `userdata` key yields an empty map. A `userdata` that is
    /// present but not an object (including `null`) is rejected with
    /// [`ReportError::MalformedUserdata`].
    ///
    /// # Errors
    ///
    /// [`ReportError::NotAnObject`] for a non-object document,
    /// [`ReportError::MalformedUserdata`] as above, and [`ReportError::Json`]
    /// when a typed field is missing or has the wrong type.
    pub fn from_value(value: Value) -> Result<Self, ReportError> {
        let Value::Object(map) = &value else {
            return Err(ReportError::NotAnObject {
                found: json_type_name(&value),
            });
        };
        if let Some(userdata) = map.get(keys::USERDATA)
            && !userdata.is_object()
        {
            return Err(ReportError::MalformedUserdata {
                found: json_type_name(userdata),
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Parses a JSON string and rebuilds the report via [`Report::from_value`].
    ///
    /// # Errors
    ///
    /// Same as [`Report::from_value`], plus [`ReportError::Json`] for invalid JSON.
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }
}
