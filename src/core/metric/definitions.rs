use super::{Conversion, DeviceClass, MetricDefinition, Source, StateClass};

const WATTS: Option<&str> = Some("W");
const KILOWATT_HOURS: Option<&str> = Some("kWh");
const PERCENT: Option<&str> = Some("%");
const TONNES: Option<&str> = Some("t");

/// Every metric the poller knows about.
pub const METRICS: &[MetricDefinition] = &[
    // Site detail:
    MetricDefinition {
        key: "nowPower",
        name: "Current Power",
        icon: "mdi:solar-power",
        device_class: Some(DeviceClass::Power),
        state_class: Some(StateClass::Measurement),
        unit: WATTS,
        source: Source::site_detail("/plantDetail/nowPower"),
        conversion: Conversion::Float,
    },
    MetricDefinition {
        key: "todayElectricity",
        name: "Today Generation",
        icon: "mdi:solar-power",
        device_class: Some(DeviceClass::Energy),
        state_class: Some(StateClass::TotalIncreasing),
        unit: KILOWATT_HOURS,
        source: Source::site_detail("/plantDetail/todayElectricity"),
        conversion: Conversion::Float,
    },
    MetricDefinition {
        key: "monthElectricity",
        name: "Current Month Generation",
        icon: "mdi:solar-power",
        device_class: Some(DeviceClass::Energy),
        state_class: Some(StateClass::TotalIncreasing),
        unit: KILOWATT_HOURS,
        source: Source::site_detail("/plantDetail/monthElectricity"),
        conversion: Conversion::Float,
    },
    MetricDefinition {
        key: "yearElectricity",
        name: "Current Year Generation",
        icon: "mdi:solar-power",
        device_class: Some(DeviceClass::Energy),
        state_class: Some(StateClass::TotalIncreasing),
        unit: KILOWATT_HOURS,
        source: Source::site_detail("/plantDetail/yearElectricity"),
        conversion: Conversion::Float,
    },
    MetricDefinition {
        key: "totalElectricity",
        name: "Total Generation",
        icon: "mdi:solar-power",
        device_class: Some(DeviceClass::Energy),
        state_class: Some(StateClass::TotalIncreasing),
        unit: KILOWATT_HOURS,
        source: Source::site_detail("/plantDetail/totalElectricity"),
        conversion: Conversion::Float,
    },
    MetricDefinition {
        key: "totalConsumpElec",
        name: "Total Consumption",
        icon: "mdi:home-lightning-bolt",
        device_class: Some(DeviceClass::Energy),
        state_class: Some(StateClass::TotalIncreasing),
        unit: KILOWATT_HOURS,
        source: Source::site_detail("/plantDetail/totalConsumpElec"),
        conversion: Conversion::Float,
    },
    MetricDefinition {
        key: "totalBuyElec",
        name: "Total Grid Import",
        icon: "mdi:transmission-tower-import",
        device_class: Some(DeviceClass::Energy),
        state_class: Some(StateClass::TotalIncreasing),
        unit: KILOWATT_HOURS,
        source: Source::site_detail("/plantDetail/totalBuyElec"),
        conversion: Conversion::Float,
    },
    MetricDefinition {
        key: "totalSellElec",
        name: "Total Grid Export",
        icon: "mdi:transmission-tower-export",
        device_class: Some(DeviceClass::Energy),
        state_class: Some(StateClass::TotalIncreasing),
        unit: KILOWATT_HOURS,
        source: Source::site_detail("/plantDetail/totalSellElec"),
        conversion: Conversion::Float,
    },
    MetricDefinition {
        key: "selfUseRate",
        name: "Self-Use Rate",
        icon: "mdi:home-percent",
        device_class: None,
        state_class: Some(StateClass::Measurement),
        unit: PERCENT,
        source: Source::site_detail("/plantDetail/selfUseRate"),
        conversion: Conversion::Percentage,
    },
    MetricDefinition {
        key: "totalPlantTreeNum",
        name: "Trees Planted",
        icon: "mdi:tree",
        device_class: None,
        state_class: Some(StateClass::Total),
        unit: None,
        source: Source::site_detail("/plantDetail/totalPlantTreeNum"),
        conversion: Conversion::Float,
    },
    MetricDefinition {
        key: "totalReduceCo2",
        name: "CO₂ Reduction",
        icon: "mdi:molecule-co2",
        device_class: None,
        state_class: Some(StateClass::Total),
        unit: TONNES,
        source: Source::site_detail("/plantDetail/totalReduceCo2"),
        conversion: Conversion::Float,
    },
    MetricDefinition {
        key: "lastUploadTime",
        name: "Last Update",
        icon: "mdi:clock",
        device_class: Some(DeviceClass::Timestamp),
        state_class: None,
        unit: None,
        source: Source::site_detail("/plantDetail/lastUploadTime"),
        conversion: Conversion::Timestamp,
    },
    // History chart, today's figures:
    MetricDefinition {
        key: "dailyConsumption",
        name: "Today Consumption",
        icon: "mdi:home-lightning-bolt",
        device_class: Some(DeviceClass::Energy),
        state_class: Some(StateClass::TotalIncreasing),
        unit: KILOWATT_HOURS,
        source: Source::history_chart("/viewBean/useElec"),
        conversion: Conversion::Float,
    },
    MetricDefinition {
        key: "dailyGridImport",
        name: "Today Grid Import",
        icon: "mdi:transmission-tower-import",
        device_class: Some(DeviceClass::Energy),
        state_class: Some(StateClass::TotalIncreasing),
        unit: KILOWATT_HOURS,
        source: Source::history_chart("/viewBean/buyElec"),
        conversion: Conversion::Float,
    },
    MetricDefinition {
        key: "dailyGridExport",
        name: "Today Grid Export",
        icon: "mdi:transmission-tower-export",
        device_class: Some(DeviceClass::Energy),
        state_class: Some(StateClass::TotalIncreasing),
        unit: KILOWATT_HOURS,
        source: Source::history_chart("/viewBean/sellElec"),
        conversion: Conversion::Float,
    },
    MetricDefinition {
        key: "dailyBatteryCharge",
        name: "Today Battery Charge",
        icon: "mdi:battery-charging",
        device_class: Some(DeviceClass::Energy),
        state_class: Some(StateClass::TotalIncreasing),
        unit: KILOWATT_HOURS,
        source: Source::history_chart("/viewBean/batChargeElec"),
        conversion: Conversion::Float,
    },
    MetricDefinition {
        key: "dailyBatteryDischarge",
        name: "Today Battery Discharge",
        icon: "mdi:battery-minus",
        device_class: Some(DeviceClass::Energy),
        state_class: Some(StateClass::TotalIncreasing),
        unit: KILOWATT_HOURS,
        source: Source::history_chart("/viewBean/batDischargeElec"),
        conversion: Conversion::Float,
    },
    MetricDefinition {
        key: "dailyTreesPlanted",
        name: "Today Trees Planted",
        icon: "mdi:tree",
        device_class: None,
        state_class: Some(StateClass::Total),
        unit: None,
        source: Source::history_chart("/viewBean/plantTreeNum"),
        conversion: Conversion::Float,
    },
    MetricDefinition {
        key: "dailyReduceCo2",
        name: "Today CO₂ Reduction",
        icon: "mdi:molecule-co2",
        device_class: None,
        state_class: Some(StateClass::Total),
        unit: TONNES,
        source: Source::history_chart("/viewBean/reduceCo2"),
        conversion: Conversion::Float,
    },
    // Device telemetry:
    MetricDefinition {
        key: "pvPower",
        name: "PV Power",
        icon: "mdi:solar-power",
        device_class: Some(DeviceClass::Power),
        state_class: Some(StateClass::Measurement),
        unit: WATTS,
        source: Source::device_telemetry("/storeDevicePower/pvPower"),
        conversion: Conversion::Float,
    },
    MetricDefinition {
        key: "gridPower",
        name: "Grid Power",
        icon: "mdi:transmission-tower",
        device_class: Some(DeviceClass::Power),
        state_class: Some(StateClass::Measurement),
        unit: WATTS,
        source: Source::device_telemetry("/storeDevicePower/gridPower"),
        conversion: Conversion::Float,
    },
    MetricDefinition {
        key: "gridPowerAbsolute",
        name: "Grid Power Absolute",
        icon: "mdi:transmission-tower",
        device_class: Some(DeviceClass::Power),
        state_class: Some(StateClass::Measurement),
        unit: WATTS,
        source: Source::device_telemetry("/storeDevicePower/gridPower"),
        conversion: Conversion::Absolute,
    },
    MetricDefinition {
        key: "batteryPower",
        name: "Battery Power",
        icon: "mdi:battery-charging",
        device_class: Some(DeviceClass::Power),
        state_class: Some(StateClass::Measurement),
        unit: WATTS,
        source: Source::device_telemetry("/storeDevicePower/batteryPower"),
        conversion: Conversion::Float,
    },
    MetricDefinition {
        key: "batteryPowerAbsolute",
        name: "Battery Power Absolute",
        icon: "mdi:battery-charging",
        device_class: Some(DeviceClass::Power),
        state_class: Some(StateClass::Measurement),
        unit: WATTS,
        source: Source::device_telemetry("/storeDevicePower/batteryPower"),
        conversion: Conversion::Absolute,
    },
    MetricDefinition {
        key: "outPower",
        name: "Output Power",
        icon: "mdi:power-plug",
        device_class: Some(DeviceClass::Power),
        state_class: Some(StateClass::Measurement),
        unit: WATTS,
        source: Source::device_telemetry("/storeDevicePower/outPower"),
        conversion: Conversion::Float,
    },
    MetricDefinition {
        key: "totalLoadPower",
        name: "Total Load Power",
        icon: "mdi:home-lightning-bolt",
        device_class: Some(DeviceClass::Power),
        state_class: Some(StateClass::Measurement),
        unit: WATTS,
        source: Source::device_telemetry("/storeDevicePower/totalLoadPower"),
        conversion: Conversion::Float,
    },
    MetricDefinition {
        key: "batCurr",
        name: "Battery Current",
        icon: "mdi:current-dc",
        device_class: None,
        state_class: Some(StateClass::Measurement),
        unit: Some("A"),
        source: Source::device_telemetry("/storeDevicePower/batCurr"),
        conversion: Conversion::Float,
    },
    MetricDefinition {
        key: "batEnergyPercent",
        name: "Battery Level",
        icon: "mdi:battery",
        device_class: Some(DeviceClass::Battery),
        state_class: Some(StateClass::Measurement),
        unit: PERCENT,
        source: Source::device_telemetry("/storeDevicePower/batEnergyPercent"),
        conversion: Conversion::Float,
    },
    MetricDefinition {
        key: "batCapcity",
        name: "Battery Capacity",
        icon: "mdi:battery-charging-100",
        device_class: None,
        state_class: None,
        unit: Some("Ah"),
        source: Source::device_telemetry("/storeDevicePower/batCapcity"),
        conversion: Conversion::Float,
    },
    MetricDefinition {
        key: "pvDirection",
        name: "PV Direction",
        icon: "mdi:solar-power",
        device_class: None,
        state_class: None,
        unit: None,
        source: Source::device_telemetry("/storeDevicePower/pvDirection"),
        conversion: Conversion::Direction,
    },
    MetricDefinition {
        key: "gridDirection",
        name: "Grid Direction",
        icon: "mdi:transmission-tower",
        device_class: None,
        state_class: None,
        unit: None,
        source: Source::device_telemetry("/storeDevicePower/gridDirection"),
        conversion: Conversion::Direction,
    },
    MetricDefinition {
        key: "batteryDirection",
        name: "Battery Direction",
        icon: "mdi:battery",
        device_class: None,
        state_class: None,
        unit: None,
        source: Source::device_telemetry("/storeDevicePower/batteryDirection"),
        conversion: Conversion::BatteryDirection,
    },
    MetricDefinition {
        key: "outPutDirection",
        name: "Output Direction",
        icon: "mdi:power-plug",
        device_class: None,
        state_class: None,
        unit: None,
        source: Source::device_telemetry("/storeDevicePower/outPutDirection"),
        conversion: Conversion::Direction,
    },
    MetricDefinition {
        key: "isOnline",
        name: "Device Online",
        icon: "mdi:power-plug",
        device_class: None,
        state_class: None,
        unit: None,
        source: Source::device_telemetry("/storeDevicePower/isOnline"),
        conversion: Conversion::YesNo,
    },
    // Battery detail, first battery module:
    MetricDefinition {
        key: "batVoltage",
        name: "Battery Voltage",
        icon: "mdi:lightning-bolt",
        device_class: Some(DeviceClass::Voltage),
        state_class: Some(StateClass::Measurement),
        unit: Some("V"),
        source: Source::battery_detail("/list/0/batVoltage"),
        conversion: Conversion::Float,
    },
    MetricDefinition {
        key: "batTemperature",
        name: "Battery Temperature",
        icon: "mdi:thermometer",
        device_class: Some(DeviceClass::Temperature),
        state_class: Some(StateClass::Measurement),
        unit: Some("°C"),
        source: Source::battery_detail("/list/0/batTemperature"),
        conversion: Conversion::Float,
    },
];
