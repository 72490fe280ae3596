//! Tests for the system-wide probes: transceivers, resource usage and status

mod common;

use common::{
    sorted_series, FakeClient, RESOURCE_USAGE_FIXTURE, SYSTEM_STATUS_FIXTURE,
    TRANSCEIVERS_FIXTURE,
};
use fortigate_exporter::fortigate::metadata::SYSTEM_STATUS_PATH;
use fortigate_exporter::probes::{
    probe_system_interface_transceivers, probe_system_resource_usage, probe_system_status,
    system_interface_transceivers, system_resource_usage,
};

#[tokio::test]
async fn test_transceivers_info_per_interface() {
    // Given: Four plugged transceivers
    let mut client = FakeClient::new();
    client.prepare(system_interface_transceivers::PATH, TRANSCEIVERS_FIXTURE);

    // When: Running the probe
    let outcome = probe_system_interface_transceivers(&client, None).await;

    // Then: One info series per interface, value 1
    assert!(outcome.is_success());
    assert_eq!(
        sorted_series(&outcome.observations),
        vec![
            "fortigate_inteface_transceivers_info{interface=\"ha1\",type=\"SFP/SFP+/SFP28\",vendor=\"FORTINET\",vendorpartnumber=\"FTL\",vendorserialnumber=\"U00000\"} 1",
            "fortigate_inteface_transceivers_info{interface=\"ha2\",type=\"SFP/SFP+/SFP28\",vendor=\"FORTINET\",vendorpartnumber=\"FTL\",vendorserialnumber=\"U00000\"} 1",
            "fortigate_inteface_transceivers_info{interface=\"port33\",type=\"QSFP/QSFP+\",vendor=\"FORTINET\",vendorpartnumber=\"FTL\",vendorserialnumber=\"U00000\"} 1",
            "fortigate_inteface_transceivers_info{interface=\"port34\",type=\"QSFP/QSFP+\",vendor=\"FORTINET\",vendorpartnumber=\"FTL\",vendorserialnumber=\"U00000\"} 1",
        ]
    );
    assert_eq!(
        client.requests(),
        vec![(system_interface_transceivers::PATH.to_string(), String::new())]
    );
}

#[tokio::test]
async fn test_resource_usage_ratios_and_sessions() {
    // Given: 12% CPU, 47% memory and 1523 sessions
    let mut client = FakeClient::new();
    client.prepare(system_resource_usage::PATH, RESOURCE_USAGE_FIXTURE);

    // When: Running the probe
    let outcome = probe_system_resource_usage(&client, None).await;

    // Then: Percentages become ratios, sessions are passed through
    assert!(outcome.is_success());
    assert_eq!(
        sorted_series(&outcome.observations),
        vec![
            "fortigate_cpu_usage_ratio{} 0.12",
            "fortigate_current_sessions{} 1523",
            "fortigate_memory_usage_ratio{} 0.47",
        ]
    );
    assert_eq!(
        client.requests(),
        vec![(
            system_resource_usage::PATH.to_string(),
            system_resource_usage::QUERY.to_string()
        )]
    );
}

#[tokio::test]
async fn test_resource_usage_omits_families_without_samples() {
    // Given: Firmware that only reports CPU usage
    let mut client = FakeClient::new();
    client.prepare(
        system_resource_usage::PATH,
        r#"{"results": {"cpu": [{"current": 50}], "session": []}, "vdom": "root"}"#,
    );

    // When: Running the probe
    let outcome = probe_system_resource_usage(&client, None).await;

    // Then: Only the CPU family is emitted, never a zero placeholder
    assert!(outcome.is_success());
    assert_eq!(
        sorted_series(&outcome.observations),
        vec!["fortigate_cpu_usage_ratio{} 0.5"]
    );
}

#[tokio::test]
async fn test_system_status_version_info() {
    let mut client = FakeClient::new();
    client.prepare(SYSTEM_STATUS_PATH, SYSTEM_STATUS_FIXTURE);

    let outcome = probe_system_status(&client, None).await;

    assert!(outcome.is_success());
    assert_eq!(
        sorted_series(&outcome.observations),
        vec![
            "fortigate_version_info{build=\"2463\",serial=\"FGVM01TM00000000\",version=\"v7.4.1\"} 1"
        ]
    );
}
