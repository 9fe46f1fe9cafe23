use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use super::window::{ChartWindow, YearMonth};

#[derive(Serialize)]
pub struct LoginForm<'a> {
    pub lang: &'static str,
    pub username: &'a str,
    pub password: &'a str,

    #[serde(rename = "rememberMe")]
    pub remember_me: bool,
}

/// The portal sends every filter field, even when it is empty.
#[derive(Serialize)]
pub struct PlantListForm {
    #[serde(rename = "pageNo")]
    page_number: &'static str,

    #[serde(rename = "pageSize")]
    page_size: &'static str,

    #[serde(rename = "orderByIndex")]
    order_by_index: &'static str,

    #[serde(rename = "officeId")]
    office_id: &'static str,

    #[serde(rename = "clientDate")]
    client_date: NaiveDate,

    #[serde(rename = "runningState")]
    running_state: &'static str,

    #[serde(rename = "selectInputType")]
    select_input_type: u8,

    #[serde(rename = "plantName")]
    plant_name: &'static str,

    #[serde(rename = "deviceSn")]
    device_serial_number: &'static str,

    #[serde(rename = "type")]
    type_: &'static str,

    #[serde(rename = "countryCode")]
    country_code: &'static str,

    #[serde(rename = "isRename")]
    is_rename: &'static str,

    #[serde(rename = "isTimeError")]
    is_time_error: &'static str,

    #[serde(rename = "systemPowerLeast")]
    system_power_least: &'static str,

    #[serde(rename = "systemPowerMost")]
    system_power_most: &'static str,
}

impl PlantListForm {
    pub const fn new(client_date: NaiveDate) -> Self {
        Self {
            page_number: "",
            page_size: "",
            order_by_index: "",
            office_id: "",
            client_date,
            running_state: "",
            select_input_type: 1,
            plant_name: "",
            device_serial_number: "",
            type_: "",
            country_code: "",
            is_rename: "",
            is_time_error: "",
            system_power_least: "",
            system_power_most: "",
        }
    }
}

#[derive(Serialize)]
pub struct PlantDetailForm<'a> {
    #[serde(rename = "plantuid")]
    pub plant_uid: &'a str,

    #[serde(rename = "clientDate")]
    pub client_date: NaiveDate,
}

#[serde_as]
#[derive(Serialize)]
pub struct DevicePowerQuery<'a> {
    /// Left empty, the serial number is enough.
    #[serde(rename = "plantuid")]
    pub plant_uid: &'static str,

    #[serde(rename = "devicesn")]
    pub serial_number: &'a str,

    /// Cache buster.
    #[serde_as(as = "serde_with::TimestampMilliSeconds<i64>")]
    #[serde(rename = "_")]
    pub timestamp: DateTime<Utc>,
}

#[serde_as]
#[derive(Serialize)]
pub struct PlantChartQuery<'a> {
    #[serde(rename = "plantuid")]
    plant_uid: &'a str,

    #[serde(rename = "chartDateType")]
    chart_date_type: u8,

    #[serde(rename = "energyType")]
    energy_type: u8,

    #[serde(rename = "clientDate")]
    client_date: NaiveDate,

    #[serde(rename = "deviceSnArr")]
    device_serial_numbers: &'static str,

    #[serde(rename = "chartCountType")]
    chart_count_type: u8,

    #[serde(rename = "itemCode")]
    item_code: u8,

    #[serde(rename = "previousChartDay")]
    previous_day: NaiveDate,

    #[serde(rename = "nextChartDay")]
    next_day: NaiveDate,

    #[serde(rename = "chartDay")]
    day: NaiveDate,

    #[serde_as(as = "serde_with::DisplayFromStr")]
    #[serde(rename = "previousChartMonth")]
    previous_month: YearMonth,

    #[serde_as(as = "serde_with::DisplayFromStr")]
    #[serde(rename = "nextChartMonth")]
    next_month: YearMonth,

    #[serde_as(as = "serde_with::DisplayFromStr")]
    #[serde(rename = "chartMonth")]
    month: YearMonth,

    #[serde(rename = "previousChartYear")]
    previous_year: i32,

    #[serde(rename = "nextChartYear")]
    next_year: i32,

    #[serde(rename = "chartYear")]
    year: i32,

    #[serde(rename = "elecDevicesn")]
    serial_number: &'a str,

    #[serde_as(as = "serde_with::TimestampMilliSeconds<i64>")]
    #[serde(rename = "_")]
    timestamp: DateTime<Utc>,
}

impl<'a> PlantChartQuery<'a> {
    pub fn new(
        plant_uid: &'a str,
        serial_number: &'a str,
        window: &ChartWindow,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            plant_uid,
            chart_date_type: 1,
            energy_type: 0,
            client_date: window.days.current,
            device_serial_numbers: "",
            chart_count_type: 2,
            item_code: 0,
            previous_day: window.days.previous,
            next_day: window.days.next,
            day: window.days.current,
            previous_month: window.months.previous,
            next_month: window.months.next,
            month: window.months.current,
            previous_year: window.years.previous,
            next_year: window.years.next,
            year: window.years.current,
            serial_number,
            timestamp,
        }
    }
}

#[derive(Serialize)]
pub struct BatteryListForm<'a> {
    #[serde(rename = "plantuid")]
    pub plant_uid: &'a str,

    #[serde(rename = "deviceSn")]
    pub serial_number: &'a str,
}

/// Entry of `plantList`, only the fields the chain needs.
#[serde_as]
#[derive(Deserialize)]
pub struct Plant {
    #[serde_as(as = "serde_with::FromInto<PlantUid>")]
    #[serde(rename = "plantuid")]
    pub uid: String,
}

/// Some accounts get numeric site IDs.
#[derive(Deserialize)]
#[serde(untagged)]
enum PlantUid {
    Text(String),
    Number(serde_json::Number),
}

impl From<PlantUid> for String {
    fn from(uid: PlantUid) -> Self {
        match uid {
            PlantUid::Text(text) => text,
            PlantUid::Number(number) => number.to_string(),
        }
    }
}

#[derive(Deserialize)]
pub struct PlantDetailInfo {
    #[serde(rename = "plantDetail")]
    pub detail: PlantDetail,
}

#[derive(Deserialize)]
pub struct PlantDetail {
    #[serde(rename = "snList", default)]
    pub serial_numbers: Vec<String>,
}
