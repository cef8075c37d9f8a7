// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the HTTP device using wiremock.

use kohler_lib::{Device, DeviceError, Error, HttpClient, Intensity, LightId, ValveId};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts both telemetry endpoints and builds a device against the server.
async fn device_with(
    mock_server: &MockServer,
    values: Value,
    system_info: Value,
) -> Device<HttpClient> {
    Mock::given(method("GET"))
        .and(path("/values.cgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(values))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/system_info.cgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(system_info))
        .mount(mock_server)
        .await;

    Device::http(mock_server.uri().replace("http://", ""))
        .accept_liability_terms()
        .build()
        .await
        .unwrap()
}

/// A two-valve installation: valve 1 with three ports (functions 5, 7, 2),
/// valve 2 with two ports (functions 9, 3).
fn two_valve_values() -> Value {
    json!({
        "valve1_installed": true,
        "valve2_installed": true,
        "valve1PortsAvailable": "3",
        "valve1_outlet1_func": {"id": 5},
        "valve1_outlet2_func": {"id": 7},
        "valve1_outlet3_func": {"id": 2},
        "valve2PortsAvailable": "2",
        "valve2_outlet1_func": {"id": 9},
        "valve2_outlet2_func": {"id": 3},
        "light1_installed": true,
        "light1_name": "Shower Light",
        "light1_level": 40,
        "def_temp": 100,
        "MAC": "AA:BB:CC:DD:EE:FF",
        "controller_version_string": "2.4.1",
    })
}

mod refresh {
    use super::*;

    #[tokio::test]
    async fn build_populates_projections() {
        let mock_server = MockServer::start().await;
        let device = device_with(
            &mock_server,
            two_valve_values(),
            json!({
                "valve1outlet5": true,
                "valve1outlet7": false,
                "valve2outlet9": true,
                "valve1_Currentstatus": "On",
                "valve2_Currentstatus": "Off",
                "valve1Temp": 101.5,
                "valve1Setpoint": 104,
                "degree_symbol": "&degF",
            }),
        )
        .await;

        assert!(device.last_refresh_succeeded());
        assert!(device.is_outlet_on(ValveId::ONE, 1));
        assert!(!device.is_outlet_on(ValveId::ONE, 2));
        // Outlet 3 maps to function 2, which system info does not report
        assert!(!device.is_outlet_on(ValveId::ONE, 3));
        assert!(device.is_outlet_on(ValveId::TWO, 1));

        assert!(device.is_valve_on(ValveId::ONE));
        assert!(!device.is_valve_on(ValveId::TWO));
        assert!(device.is_shower_on());

        assert_eq!(device.current_temperature(), Some(101.5));
        assert_eq!(device.target_temperature(), Some(104.0));
        assert_eq!(device.temperature_unit().symbol(), "°F");

        assert_eq!(device.mac_address().as_deref(), Some("AA:BB:CC:DD:EE:FF"));
        assert_eq!(device.firmware_version().as_deref(), Some("2.4.1"));
        assert_eq!(device.light_brightness(LightId::ONE).value(), 40);
    }

    #[tokio::test]
    async fn system_info_failure_leaves_values_projections_fresh() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/values.cgi"))
            .respond_with(ResponseTemplate::new(200).set_body_json(two_valve_values()))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/system_info.cgi"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let device = Device::http(mock_server.uri().replace("http://", ""))
            .accept_liability_terms()
            .build()
            .await
            .unwrap();

        // The cycle failed as a whole, but values-derived projections are
        // fresh and usable.
        assert!(!device.last_refresh_succeeded());
        assert_eq!(device.light_brightness(LightId::ONE).value(), 40);
        assert!(device.is_light_installed(LightId::ONE));
        assert!(!device.is_outlet_on(ValveId::ONE, 1));
    }

    #[tokio::test]
    async fn refresh_notifies_subscribers() {
        let mock_server = MockServer::start().await;
        let device = device_with(&mock_server, two_valve_values(), json!({})).await;

        let outcomes = std::sync::Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = std::sync::Arc::clone(&outcomes);
        device.on_refresh(move |outcome| sink.lock().push(*outcome));

        device.refresh().await;

        let seen = outcomes.lock();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].is_success());
    }
}

mod build {
    use super::*;

    #[tokio::test]
    async fn build_fails_without_liability_acceptance() {
        let result = Device::http("192.168.1.100").build_without_refresh();
        assert!(matches!(
            result,
            Err(Error::Device(DeviceError::LiabilityTermsNotAccepted))
        ));
    }

    #[tokio::test]
    async fn build_fails_when_values_endpoint_is_down() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/values.cgi"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/system_info.cgi"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&mock_server)
            .await;

        let result = Device::http(mock_server.uri().replace("http://", ""))
            .accept_liability_terms()
            .build()
            .await;

        assert!(matches!(
            result,
            Err(Error::Device(DeviceError::NotReady(_)))
        ));
    }
}

mod outlets {
    use super::*;

    #[tokio::test]
    async fn open_outlet_preserves_other_valve_and_existing_outlets() {
        let mock_server = MockServer::start().await;
        let device = device_with(
            &mock_server,
            two_valve_values(),
            json!({
                "valve1outlet5": true,
                "valve2outlet9": true,
                "valve1_Currentstatus": "Off",
                "valve2_Currentstatus": "Off",
                "valve1Setpoint": 104,
            }),
        )
        .await;

        // Valve 1 gains outlet 2 next to the already open outlet 1; valve 2's
        // open set rides along unchanged. One call per valve number.
        Mock::given(method("GET"))
            .and(path("/quick_shower.cgi"))
            .and(query_param("valve1_outlet", "12"))
            .and(query_param("valve1_massage", "0"))
            .and(query_param("valve1_temp", "104.0"))
            .and(query_param("valve2_outlet", "1"))
            .and(query_param("valve2_temp", "104.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .expect(2)
            .mount(&mock_server)
            .await;

        device.open_outlet(ValveId::ONE, 2).await.unwrap();
    }

    #[tokio::test]
    async fn close_outlet_removes_only_the_target() {
        let mock_server = MockServer::start().await;
        let device = device_with(
            &mock_server,
            two_valve_values(),
            json!({
                "valve1outlet5": true,
                "valve1outlet7": true,
                "valve1_Currentstatus": "On",
                "valve1Setpoint": 104,
            }),
        )
        .await;

        Mock::given(method("GET"))
            .and(path("/quick_shower.cgi"))
            .and(query_param("valve1_outlet", "2"))
            .and(query_param("valve2_outlet", ""))
            .and(query_param("valve1_temp", "104.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .expect(2)
            .mount(&mock_server)
            .await;

        device.close_outlet(ValveId::ONE, 1).await.unwrap();
    }

    #[tokio::test]
    async fn open_outlet_can_target_the_last_physical_port() {
        let mock_server = MockServer::start().await;
        let device = device_with(
            &mock_server,
            two_valve_values(),
            json!({"valve1Setpoint": 104}),
        )
        .await;

        Mock::given(method("GET"))
            .and(path("/quick_shower.cgi"))
            .and(query_param("valve1_outlet", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .expect(2)
            .mount(&mock_server)
            .await;

        device.open_outlet(ValveId::ONE, 3).await.unwrap();
    }
}

mod temperature {
    use super::*;

    #[tokio::test]
    async fn set_target_temperature_while_idle_only_caches() {
        let mock_server = MockServer::start().await;
        let device = device_with(
            &mock_server,
            two_valve_values(),
            json!({
                "valve1_Currentstatus": "Off",
                "valve1Setpoint": 104,
            }),
        )
        .await;

        Mock::given(method("GET"))
            .and(path("/quick_shower.cgi"))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .expect(0)
            .mount(&mock_server)
            .await;

        device.set_target_temperature(96.0).await.unwrap();

        // The cached optimistic value wins while the shower is idle
        assert_eq!(device.target_temperature(), Some(96.0));
    }

    #[tokio::test]
    async fn set_target_temperature_while_running_reissues_outlets() {
        let mock_server = MockServer::start().await;
        let device = device_with(
            &mock_server,
            two_valve_values(),
            json!({
                "valve1outlet5": true,
                "valve1_Currentstatus": "On",
                "valve1Setpoint": 104,
            }),
        )
        .await;

        Mock::given(method("GET"))
            .and(path("/quick_shower.cgi"))
            .and(query_param("valve1_outlet", "1"))
            .and(query_param("valve1_temp", "96.0"))
            .and(query_param("valve2_temp", "96.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .expect(2)
            .mount(&mock_server)
            .await;

        device.set_target_temperature(96.0).await.unwrap();

        // While running, the live setpoint still wins over the cache
        assert_eq!(device.target_temperature(), Some(104.0));
    }
}

mod shower {
    use super::*;

    #[tokio::test]
    async fn turn_on_reopens_last_used_outlets() {
        let mock_server = MockServer::start().await;
        let device = device_with(
            &mock_server,
            two_valve_values(),
            json!({
                "valve1outlet5": true,
                "valve2outlet9": true,
                "valve1Setpoint": 104,
            }),
        )
        .await;

        Mock::given(method("GET"))
            .and(path("/quick_shower.cgi"))
            .and(query_param("valve_num", "1"))
            .and(query_param("valve1_outlet", "1"))
            .and(query_param("valve2_outlet", "1"))
            .and(query_param("valve1_temp", "104.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .expect(1)
            .mount(&mock_server)
            .await;

        device.turn_on_shower(None).await.unwrap();
    }

    #[tokio::test]
    async fn turn_on_with_explicit_temperature() {
        let mock_server = MockServer::start().await;
        let device = device_with(&mock_server, two_valve_values(), json!({})).await;

        Mock::given(method("GET"))
            .and(path("/quick_shower.cgi"))
            .and(query_param("valve1_temp", "102.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .expect(1)
            .mount(&mock_server)
            .await;

        device.turn_on_shower(Some(102.5)).await.unwrap();
    }

    #[tokio::test]
    async fn turn_off_sends_stop_shower() {
        let mock_server = MockServer::start().await;
        let device = device_with(&mock_server, two_valve_values(), json!({})).await;

        Mock::given(method("GET"))
            .and(path("/stop_shower.cgi"))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .expect(1)
            .mount(&mock_server)
            .await;

        device.turn_off_shower().await.unwrap();
    }
}

mod lights {
    use super::*;

    #[tokio::test]
    async fn set_light_sends_module_and_intensity() {
        let mock_server = MockServer::start().await;
        let device = device_with(&mock_server, two_valve_values(), json!({})).await;

        Mock::given(method("GET"))
            .and(path("/light_on.cgi"))
            .and(query_param("module", "1"))
            .and(query_param("intensity", "75"))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .expect(1)
            .mount(&mock_server)
            .await;

        device
            .set_light(LightId::ONE, Intensity::new(75).unwrap())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn light_off_sends_module() {
        let mock_server = MockServer::start().await;
        let device = device_with(&mock_server, two_valve_values(), json!({})).await;

        Mock::given(method("GET"))
            .and(path("/light_off.cgi"))
            .and(query_param("module", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .expect(1)
            .mount(&mock_server)
            .await;

        device.light_off(LightId::TWO).await.unwrap();
    }
}

mod polling {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn poller_refreshes_while_subscribed() {
        let mock_server = MockServer::start().await;
        let device = Arc::new(device_with(&mock_server, two_valve_values(), json!({})).await);

        let cycles = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&cycles);
        device.on_refresh(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let poller = Arc::clone(&device).start_polling(Duration::from_millis(50));
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert!(poller.is_running());
        assert!(cycles.load(Ordering::SeqCst) >= 1);

        poller.stop();
    }

    #[tokio::test]
    async fn poller_skips_ticks_without_subscribers() {
        let mock_server = MockServer::start().await;
        let device = Arc::new(device_with(&mock_server, two_valve_values(), json!({})).await);

        let poller = Arc::clone(&device).start_polling(Duration::from_millis(50));
        tokio::time::sleep(Duration::from_millis(300)).await;
        drop(poller);

        // Only the builder's initial refresh reached the device
        let requests = mock_server.received_requests().await.unwrap();
        let values_fetches = requests
            .iter()
            .filter(|r| r.url.path() == "/values.cgi")
            .count();
        assert_eq!(values_fetches, 1);
    }
}

mod variables {
    use super::*;

    #[tokio::test]
    async fn save_variable_writes_setpoint_index() {
        let mock_server = MockServer::start().await;
        let device = device_with(&mock_server, two_valve_values(), json!({})).await;

        Mock::given(method("GET"))
            .and(path("/save_variable.cgi"))
            .and(query_param("index", "38"))
            .and(query_param("value", "104.0"))
            .and(query_param("valve", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .expect(1)
            .mount(&mock_server)
            .await;

        device
            .save_variable(38, "104.0", Some(ValveId::ONE))
            .await
            .unwrap();
    }
}
