//! Resource endpoints
//!
//! Every resource method is the same shape: typed parameters in, an
//! authenticated [`RequestSpec`] out, dispatched through
//! [`GttxClient::send`]. GET and DELETE carry parameters in the query
//! string, POST and PATCH as a JSON body.

use gttx_domain::{
    AttackQuery, AttackRef, BlackholeQuery, BlackholeRelease, DomainConfig, DomainQuery, DomainRef,
    ForwardRule, ForwardRuleQuery, ForwardRuleRef, OrderQuery, OrderRef, OrderRenewal,
    OrderUpgrade, Result, TrendQuery,
};
use serde_json::Value;

use super::client::GttxClient;
use super::request::RequestSpec;

/// Name, HTTP method and path of a resource method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointInfo {
    pub name: &'static str,
    pub method: &'static str,
    pub path: &'static str,
}

macro_rules! resource_endpoints {
    (@spec GET $path:literal, $params:ident) => {
        RequestSpec::get($path).authenticated().with_query($params)
    };
    (@spec DELETE $path:literal, $params:ident) => {
        RequestSpec::delete($path).authenticated().with_query($params)
    };
    (@spec POST $path:literal, $params:ident) => {
        RequestSpec::post($path).authenticated().with_json_body($params)
    };
    (@spec PATCH $path:literal, $params:ident) => {
        RequestSpec::patch($path).authenticated().with_json_body($params)
    };
    ($( $(#[$meta:meta])* $name:ident => $verb:ident $path:literal ($params:ty); )*) => {
        impl GttxClient {
            $(
                $(#[$meta])*
                pub async fn $name(&self, params: &$params) -> Result<Value> {
                    let spec = resource_endpoints!(@spec $verb $path, params)?;
                    self.send(spec).await
                }
            )*
        }

        /// All resource methods, in declaration order
        pub const RESOURCE_ENDPOINTS: &[EndpointInfo] = &[
            $( EndpointInfo { name: stringify!($name), method: stringify!($verb), path: $path }, )*
        ];
    };
}

resource_endpoints! {
    /// Attack reports, newest first
    list_attacks => GET "/xddos/attack/list" (AttackQuery);
    get_attack_detail => GET "/xddos/attack/detail" (AttackRef);

    /// Inbound traffic in packets per second
    query_traffic_trend => GET "/xddos/flow/trend" (TrendQuery);
    query_bandwidth_trend => GET "/xddos/flow/bandwidth" (TrendQuery);
    query_connection_trend => GET "/xddos/flow/connection" (TrendQuery);

    list_blackholes => GET "/xddos/blackhole/list" (BlackholeQuery);
    /// Ask the provider to lift blackholing for the given addresses
    release_blackhole => POST "/xddos/blackhole/release" (BlackholeRelease);

    list_domains => GET "/xddos/domain/list" (DomainQuery);
    create_domain => POST "/xddos/domain" (DomainConfig);
    update_domain => PATCH "/xddos/domain" (DomainConfig);
    delete_domain => DELETE "/xddos/domain" (DomainRef);

    list_forward_rules => GET "/xddos/rule/list" (ForwardRuleQuery);
    create_forward_rule => POST "/xddos/rule" (ForwardRule);
    /// `rule_id` must be set
    update_forward_rule => PATCH "/xddos/rule" (ForwardRule);
    delete_forward_rule => DELETE "/xddos/rule" (ForwardRuleRef);

    list_orders => GET "/xddos/order/list" (OrderQuery);
    get_order => GET "/xddos/order/detail" (OrderRef);
    /// Protected addresses attached to an order
    list_order_ips => GET "/xddos/order/ip" (OrderRef);
    renew_order => POST "/xddos/order/renew" (OrderRenewal);
    upgrade_order => PATCH "/xddos/order/upgrade" (OrderUpgrade);
}
