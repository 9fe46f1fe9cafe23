//! [SAJ eSolar](https://fop.saj-electric.com) portal client.

mod error;
mod models;
mod session;
mod window;

use std::time::Duration;

use bon::Builder;
use chrono::{Local, NaiveDate, Utc};
use reqwest::{
    Client,
    header::{ACCEPT, HeaderMap, HeaderValue},
};
use secrecy::SecretString;
use serde::Deserialize;

pub use self::error::{FailureKind, FetchError};
use self::{
    models::{
        BatteryListForm,
        DevicePowerQuery,
        Plant,
        PlantChartQuery,
        PlantDetailForm,
        PlantDetailInfo,
        PlantListForm,
    },
    session::Session,
    window::ChartWindow,
};
use crate::{
    core::snapshot::{Section, Snapshot},
    prelude::*,
};

const PLANT_LIST: &str = "/monitor/site/getUserPlantList";
const PLANT_DETAIL: &str = "/monitor/site/getPlantDetailInfo";
const DEVICE_POWER: &str = "/monitor/site/getStoreOrAcDevicePowerInfo";
const PLANT_CHART: &str = "/monitor/site/getPlantDetailChart2";
const BATTERY_LIST: &str = "/cloudMonitor/deviceInfo/findBatteryRealTimeList";

#[derive(Builder)]
pub struct Api {
    /// Portal base URL, for example: `https://fop.saj-electric.com/saj`.
    #[builder(into)]
    base_url: String,

    #[builder(into)]
    username: String,

    password: SecretString,

    /// Per-call timeout, applies to the logout too.
    #[builder(default = Duration::from_secs(15))]
    timeout: Duration,

    /// Also fetch the history chart and the battery details.
    #[builder(default)]
    with_history: bool,
}

impl Api {
    /// Run the whole chain: either all the sections, or a single classified failure.
    pub async fn refresh(&self) -> Result<Snapshot, FetchError> {
        self.refresh_on(Local::now().date_naive()).await
    }

    /// Run the chain for the specified client date.
    #[instrument(skip_all, fields(client_date = %client_date, with_history = self.with_history))]
    pub async fn refresh_on(&self, client_date: NaiveDate) -> Result<Snapshot, FetchError> {
        let session =
            Session::login(self.new_client()?, self.base_url(), &self.username, &self.password)
                .await?;
        let result = Chain { session: &session, client_date, with_history: self.with_history }
            .run()
            .await;
        session.logout().await;
        if let Ok(snapshot) = &result {
            info!(n_sections = snapshot.sections().count(), "refreshed");
        }
        result
    }

    /// Fresh client with an empty cookie jar: sessions are never reused between refreshes.
    fn new_client(&self) -> Result<Client, FetchError> {
        let headers =
            HeaderMap::from_iter([(ACCEPT, HeaderValue::from_static("application/json"))]);
        Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .cookie_store(true)
            .timeout(self.timeout)
            .build()
            .map_err(FetchError::Client)
    }

    fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Where the chain is. Each stage carries what the previous responses have revealed.
#[derive(derive_more::Display)]
enum Stage {
    #[display("fetching sites")]
    FetchingSites,

    #[display("fetching site detail")]
    FetchingDetail { plant_uid: String },

    #[display("fetching telemetry")]
    FetchingTelemetry { plant_uid: String, serial_number: String },

    #[display("fetching history")]
    FetchingHistory { plant_uid: String, serial_number: String },

    #[display("done")]
    Done,
}

struct Chain<'s> {
    session: &'s Session,
    client_date: NaiveDate,
    with_history: bool,
}

impl Chain<'_> {
    async fn run(self) -> Result<Snapshot, FetchError> {
        let mut sections = Vec::with_capacity(5);
        let mut stage = Stage::FetchingSites;
        loop {
            debug!(%stage);
            stage = match stage {
                Stage::FetchingSites => {
                    let site_list = self
                        .session
                        .post(PLANT_LIST, &(), &PlantListForm::new(self.client_date))
                        .await?;
                    let plant_uid = Self::first_plant(&site_list)?.uid;
                    sections.push((Section::SiteList, site_list));
                    Stage::FetchingDetail { plant_uid }
                }

                Stage::FetchingDetail { plant_uid } => {
                    let form =
                        PlantDetailForm { plant_uid: &plant_uid, client_date: self.client_date };
                    let site_detail = self.session.post(PLANT_DETAIL, &(), &form).await?;
                    let serial_number = Self::first_serial_number(&site_detail)?;
                    sections.push((Section::SiteDetail, site_detail));
                    Stage::FetchingTelemetry { plant_uid, serial_number }
                }

                Stage::FetchingTelemetry { plant_uid, serial_number } => {
                    let query = DevicePowerQuery {
                        plant_uid: "",
                        serial_number: &serial_number,
                        timestamp: Utc::now(),
                    };
                    let telemetry = self.session.post(DEVICE_POWER, &query, &()).await?;
                    sections.push((Section::DeviceTelemetry, telemetry));
                    if self.with_history {
                        Stage::FetchingHistory { plant_uid, serial_number }
                    } else {
                        Stage::Done
                    }
                }

                Stage::FetchingHistory { plant_uid, serial_number } => {
                    let window = ChartWindow::around(self.client_date).ok_or_else(|| {
                        FetchError::data(PLANT_CHART, "client date is out of the calendar range")
                    })?;
                    let query =
                        PlantChartQuery::new(&plant_uid, &serial_number, &window, Utc::now());
                    let history_chart = self.session.get(PLANT_CHART, &query).await?;
                    sections.push((Section::HistoryChart, history_chart));

                    let form =
                        BatteryListForm { plant_uid: &plant_uid, serial_number: &serial_number };
                    let battery_detail = self.session.post(BATTERY_LIST, &(), &form).await?;
                    sections.push((Section::BatteryDetail, battery_detail));
                    Stage::Done
                }

                Stage::Done => break,
            };
        }
        Ok(sections.into_iter().collect())
    }

    /// Always the first site, multiple sites are not supported.
    fn first_plant(site_list: &serde_json::Value) -> Result<Plant, FetchError> {
        let n_plants = site_list["plantList"].as_array().map_or(0, Vec::len);
        if n_plants > 1 {
            warn!(n_plants, "multiple sites found, using the first one");
        }
        let plant = site_list
            .pointer("/plantList/0")
            .ok_or_else(|| FetchError::data(PLANT_LIST, "no plants found"))?;
        Plant::deserialize(plant).map_err(|source| FetchError::Json { path: PLANT_LIST, source })
    }

    fn first_serial_number(site_detail: &serde_json::Value) -> Result<String, FetchError> {
        PlantDetailInfo::deserialize(site_detail)
            .map_err(|source| FetchError::Json { path: PLANT_DETAIL, source })?
            .detail
            .serial_numbers
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::data(PLANT_DETAIL, "no device serial numbers"))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        Mock,
        MockServer,
        ResponseTemplate,
        matchers::{body_string_contains, header, method, path, query_param},
    };

    use super::*;
    use crate::core::mapper::{Value, is_available, resolve};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn api(server: &MockServer, with_history: bool) -> Api {
        Api::builder()
            .base_url(server.uri())
            .username("solar@example.com")
            .password(SecretString::from("hunter2".to_string()))
            .timeout(Duration::from_secs(5))
            .with_history(with_history)
            .build()
    }

    async fn mount_login(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_string_contains("username=solar%40example.com"))
            .and(body_string_contains("rememberMe=true"))
            .respond_with(
                ResponseTemplate::new(200).insert_header("Set-Cookie", "JSESSIONID=42; Path=/"),
            )
            .expect(1)
            .mount(server)
            .await;
    }

    async fn mount_logout(server: &MockServer, n_calls: u64) {
        Mock::given(method("POST"))
            .and(path("/logout"))
            .respond_with(ResponseTemplate::new(200))
            .expect(n_calls)
            .mount(server)
            .await;
    }

    async fn mount_json(
        server: &MockServer,
        http_method: &str,
        endpoint: &str,
        body: serde_json::Value,
    ) {
        Mock::given(method(http_method))
            .and(path(endpoint))
            .and(header("cookie", "JSESSIONID=42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    async fn mount_site(server: &MockServer) {
        mount_json(
            server,
            "POST",
            PLANT_LIST,
            json!({"plantList": [{"plantuid": "PLANT-1", "plantName": "Roof"}]}),
        )
        .await;
        mount_json(
            server,
            "POST",
            PLANT_DETAIL,
            json!({"plantDetail": {"selfUseRate": "87%", "snList": ["H1S2"]}}),
        )
        .await;
    }

    async fn mount_telemetry(server: &MockServer) {
        mount_json(
            server,
            "POST",
            DEVICE_POWER,
            json!({"storeDevicePower": {"pvPower": "1500.5", "gridDirection": 1, "isOnline": 1}}),
        )
        .await;
    }

    #[tokio::test]
    async fn refresh_ok() -> Result {
        let server = MockServer::start().await;
        mount_login(&server).await;
        mount_site(&server).await;
        mount_telemetry(&server).await;
        mount_logout(&server, 1).await;

        let snapshot = api(&server, false).refresh_on(date()).await?;

        assert_eq!(
            snapshot.sections().collect::<Vec<_>>(),
            [Section::SiteList, Section::SiteDetail, Section::DeviceTelemetry],
        );
        assert_eq!(resolve(&snapshot, "pvPower"), Some(Value::Number(1500.5)));
        assert_eq!(resolve(&snapshot, "selfUseRate"), Some(Value::Number(87.0)));
        assert_eq!(resolve(&snapshot, "gridDirection"), Some(Value::Label("Exporting".into())));
        assert!(is_available(&snapshot));
        Ok(())
    }

    #[tokio::test]
    async fn refresh_with_history_ok() -> Result {
        let server = MockServer::start().await;
        mount_login(&server).await;
        mount_site(&server).await;
        mount_telemetry(&server).await;
        Mock::given(method("GET"))
            .and(path(PLANT_CHART))
            .and(query_param("plantuid", "PLANT-1"))
            .and(query_param("elecDevicesn", "H1S2"))
            .and(query_param("clientDate", "2024-03-15"))
            .and(query_param("previousChartDay", "2024-03-14"))
            .and(query_param("nextChartDay", "2024-03-16"))
            .and(query_param("previousChartMonth", "2024-02"))
            .and(query_param("chartMonth", "2024-03"))
            .and(query_param("nextChartMonth", "2024-04"))
            .and(query_param("previousChartYear", "2023"))
            .and(query_param("nextChartYear", "2025"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"viewBean": {"buyElec": "3.4"}})),
            )
            .expect(1)
            .mount(&server)
            .await;
        mount_json(
            &server,
            "POST",
            BATTERY_LIST,
            json!({"list": [{"batVoltage": "52.1", "batTemperature": 21}]}),
        )
        .await;
        mount_logout(&server, 1).await;

        let snapshot = api(&server, true).refresh_on(date()).await?;

        assert_eq!(snapshot.sections().count(), 5);
        assert_eq!(resolve(&snapshot, "dailyGridImport"), Some(Value::Number(3.4)));
        assert_eq!(resolve(&snapshot, "batVoltage"), Some(Value::Number(52.1)));
        assert_eq!(resolve(&snapshot, "batTemperature"), Some(Value::Number(21.0)));
        Ok(())
    }

    #[tokio::test]
    async fn unauthorized_login_is_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(PLANT_LIST))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        mount_logout(&server, 0).await;

        let error = api(&server, false).refresh_on(date()).await.unwrap_err();
        assert_eq!(error.kind(), FailureKind::Auth);
    }

    #[tokio::test]
    async fn failed_login_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        mount_logout(&server, 0).await;

        let error = api(&server, false).refresh_on(date()).await.unwrap_err();
        assert_eq!(error.kind(), FailureKind::Transport);
    }

    #[tokio::test]
    async fn empty_site_list_is_data_error() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        mount_json(&server, "POST", PLANT_LIST, json!({"plantList": []})).await;
        Mock::given(method("POST"))
            .and(path(PLANT_DETAIL))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        mount_logout(&server, 1).await;

        let error = api(&server, false).refresh_on(date()).await.unwrap_err();
        assert_eq!(error.kind(), FailureKind::Data);
    }

    #[tokio::test]
    async fn failed_site_detail_is_transport_error() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        mount_json(&server, "POST", PLANT_LIST, json!({"plantList": [{"plantuid": "PLANT-1"}]}))
            .await;
        Mock::given(method("POST"))
            .and(path(PLANT_DETAIL))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        mount_logout(&server, 1).await;

        let error = api(&server, false).refresh_on(date()).await.unwrap_err();
        assert_eq!(error.kind(), FailureKind::Transport);
    }

    #[tokio::test]
    async fn missing_serial_number_is_data_error() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        mount_json(&server, "POST", PLANT_LIST, json!({"plantList": [{"plantuid": "PLANT-1"}]}))
            .await;
        mount_json(&server, "POST", PLANT_DETAIL, json!({"plantDetail": {"snList": []}})).await;
        mount_logout(&server, 1).await;

        let error = api(&server, false).refresh_on(date()).await.unwrap_err();
        assert_eq!(error.kind(), FailureKind::Data);
    }

    #[tokio::test]
    async fn malformed_telemetry_is_data_error() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        mount_site(&server).await;
        Mock::given(method("POST"))
            .and(path(DEVICE_POWER))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("<html>Session expired</html>"),
            )
            .mount(&server)
            .await;
        mount_logout(&server, 1).await;

        let error = api(&server, false).refresh_on(date()).await.unwrap_err();
        assert_eq!(error.kind(), FailureKind::Data);
    }

    #[tokio::test]
    async fn failed_battery_detail_is_transport_error() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        mount_site(&server).await;
        mount_telemetry(&server).await;
        mount_json(&server, "GET", PLANT_CHART, json!({"viewBean": {}})).await;
        Mock::given(method("POST"))
            .and(path(BATTERY_LIST))
            .respond_with(ResponseTemplate::new(502))
            .expect(1)
            .mount(&server)
            .await;
        mount_logout(&server, 1).await;

        let error = api(&server, true).refresh_on(date()).await.unwrap_err();
        assert_eq!(error.kind(), FailureKind::Transport);
    }

    #[tokio::test]
    async fn numeric_plant_uid_ok() -> Result {
        let server = MockServer::start().await;
        mount_login(&server).await;
        mount_json(&server, "POST", PLANT_LIST, json!({"plantList": [{"plantuid": 1042}]})).await;
        Mock::given(method("POST"))
            .and(path(PLANT_DETAIL))
            .and(body_string_contains("plantuid=1042"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"plantDetail": {"snList": ["H1S2"]}})),
            )
            .expect(1)
            .mount(&server)
            .await;
        mount_telemetry(&server).await;
        mount_logout(&server, 1).await;

        let snapshot = api(&server, false).refresh_on(date()).await?;
        assert!(is_available(&snapshot));
        Ok(())
    }

    #[tokio::test]
    async fn failed_logout_keeps_snapshot() -> Result {
        let server = MockServer::start().await;
        mount_login(&server).await;
        mount_site(&server).await;
        mount_telemetry(&server).await;
        Mock::given(method("POST"))
            .and(path("/logout"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let snapshot = api(&server, false).refresh_on(date()).await?;
        assert_eq!(resolve(&snapshot, "pvPower"), Some(Value::Number(1500.5)));
        Ok(())
    }

    #[tokio::test]
    async fn cancelled_refresh_still_logs_out() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("POST"))
            .and(path(PLANT_LIST))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;
        mount_logout(&server, 1).await;

        let api = api(&server, false);
        let result = tokio::time::timeout(Duration::from_millis(500), api.refresh_on(date())).await;
        assert!(result.is_err(), "the refresh should have timed out");

        // Give the background logout a chance to reach the server:
        tokio::time::sleep(Duration::from_millis(500)).await;
    }
}
