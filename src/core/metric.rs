mod definitions;

pub use self::definitions::METRICS;
use crate::core::snapshot::Section;

#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display)]
pub enum DeviceClass {
    #[display("power")]
    Power,

    #[display("energy")]
    Energy,

    #[display("battery")]
    Battery,

    #[display("timestamp")]
    Timestamp,

    #[display("temperature")]
    Temperature,

    #[display("voltage")]
    Voltage,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display)]
pub enum StateClass {
    #[display("measurement")]
    Measurement,

    #[display("total")]
    Total,

    #[display("total_increasing")]
    TotalIncreasing,
}

/// How a raw vendor field turns into a metric value.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Conversion {
    /// Number or numeric string.
    Float,

    /// Like [`Conversion::Float`], but without the sign.
    Absolute,

    /// Number, or numeric string with an optional trailing `%`.
    Percentage,

    /// `YYYY-MM-DD HH:MM:SS` in the local time.
    Timestamp,

    /// Power flow code: importing, standby, or exporting.
    Direction,

    /// Battery flow code: charging, idle, or discharging.
    BatteryDirection,

    /// Integer flag rendered as `Yes` or `No`.
    YesNo,
}

/// Where the raw value lives in a snapshot.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Source {
    pub section: Section,

    /// JSON pointer inside the section.
    pub pointer: &'static str,
}

impl Source {
    pub const fn site_detail(pointer: &'static str) -> Self {
        Self { section: Section::SiteDetail, pointer }
    }

    pub const fn device_telemetry(pointer: &'static str) -> Self {
        Self { section: Section::DeviceTelemetry, pointer }
    }

    pub const fn history_chart(pointer: &'static str) -> Self {
        Self { section: Section::HistoryChart, pointer }
    }

    pub const fn battery_detail(pointer: &'static str) -> Self {
        Self { section: Section::BatteryDetail, pointer }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct MetricDefinition {
    pub key: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub device_class: Option<DeviceClass>,
    pub state_class: Option<StateClass>,
    pub unit: Option<&'static str>,
    pub source: Source,
    pub conversion: Conversion,
}

impl MetricDefinition {
    #[must_use]
    pub fn find(key: &str) -> Option<&'static Self> {
        METRICS.iter().find(|definition| definition.key == key)
    }
}
