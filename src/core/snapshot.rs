use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Snapshot section, one per vendor endpoint.
///
/// The aliases are the section names of the older snapshot dumps.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Section {
    #[display("site_list")]
    #[serde(rename = "site_list", alias = "plant_info")]
    SiteList,

    #[display("site_detail")]
    #[serde(rename = "site_detail", alias = "plant_details")]
    SiteDetail,

    #[display("device_telemetry")]
    #[serde(rename = "device_telemetry", alias = "device_power")]
    DeviceTelemetry,

    #[display("history_chart")]
    #[serde(rename = "history_chart", alias = "plant_chart")]
    HistoryChart,

    #[display("battery_detail")]
    #[serde(rename = "battery_detail", alias = "battery_info")]
    BatteryDetail,
}

/// Raw vendor responses of a single refresh chain.
///
/// Sections are kept exactly as the vendor returned them and are only interpreted when resolving
/// a metric. There is no way to modify a snapshot once it is built.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(BTreeMap<Section, Value>);

impl Snapshot {
    pub fn section(&self, section: Section) -> Option<&Value> {
        self.0.get(&section)
    }

    /// Look up a raw field by its [JSON pointer](https://www.rfc-editor.org/rfc/rfc6901).
    pub fn lookup(&self, section: Section, pointer: &str) -> Option<&Value> {
        self.section(section)?.pointer(pointer)
    }

    pub fn sections(&self) -> impl Iterator<Item = Section> + '_ {
        self.0.keys().copied()
    }
}

impl FromIterator<(Section, Value)> for Snapshot {
    fn from_iter<T: IntoIterator<Item = (Section, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
