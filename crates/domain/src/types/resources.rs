//! Parameter shapes for the resource endpoints
//!
//! These are plain serde structs. Field names go over the wire in camelCase
//! and absent optional fields are omitted entirely.

use serde::{Deserialize, Serialize};

use crate::impl_wire_enum_conversions;

/// Transport protocol of a forwarding rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardProtocol {
    Tcp,
    Udp,
}

impl_wire_enum_conversions!(ForwardProtocol {
    Tcp => "tcp",
    Udp => "udp",
});

/// Sampling interval for trend queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendInterval {
    Minute,
    Hour,
    Day,
}

impl_wire_enum_conversions!(TrendInterval {
    Minute => "minute",
    Hour => "hour",
    Day => "day",
});

/// Page selection shared by list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

// ----------------------------------------------------------------------------
// Attacks and traffic
// ----------------------------------------------------------------------------

/// Filter for the attack report list
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    /// Unix seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    /// Unix seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    #[serde(flatten)]
    pub page: Page,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackRef {
    pub attack_id: String,
}

/// Time-series query used by the traffic, bandwidth and connection trends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendQuery {
    pub ip: String,
    pub start_time: i64,
    pub end_time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<TrendInterval>,
}

// ----------------------------------------------------------------------------
// Blackhole control
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlackholeQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(flatten)]
    pub page: Page,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlackholeRelease {
    pub ips: Vec<String>,
}

// ----------------------------------------------------------------------------
// Domain configuration
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(flatten)]
    pub page: Page,
}

/// A protected domain and where its traffic is sent after scrubbing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainConfig {
    pub order_id: String,
    pub domain: String,
    pub origin_ips: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub https: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainRef {
    pub order_id: String,
    pub domain: String,
}

// ----------------------------------------------------------------------------
// Forwarding rules
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardRuleQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<ForwardProtocol>,
    #[serde(flatten)]
    pub page: Page,
}

/// Layer-4 forwarding from a protected port to origin addresses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardRule {
    /// Absent on creation, required on update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    pub order_id: String,
    pub protocol: ForwardProtocol,
    pub port: u16,
    pub origin_ips: Vec<String>,
    pub origin_port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardRuleRef {
    pub order_id: String,
    pub rule_id: String,
}

// ----------------------------------------------------------------------------
// Orders
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub page: Page,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRef {
    pub order_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRenewal {
    pub order_id: String,
    pub months: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpgrade {
    pub order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protection_gbps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth_mbps: Option<u32>,
}
