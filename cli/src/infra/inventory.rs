//! Infrastructure implementation of the `HostInventory` port.
//!
//! `ZabbixClient` talks JSON-RPC 2.0 to the Zabbix frontend API. It is built
//! explicitly from [`InventoryConfig`]; nothing is held in global state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::application::ports::HostInventory;
use crate::domain::{HostGroup, InventoryConfig, InventoryError, InventoryHost};

/// HTTP timeout for a single API call.
pub const API_TIMEOUT: Duration = Duration::from_secs(30);

/// Authenticated Zabbix API client.
pub struct ZabbixClient {
    agent: ureq::Agent,
    endpoint: String,
    auth: String,
    auth_in_body: bool,
    next_id: AtomicU64,
}

impl ZabbixClient {
    /// Build a client and authenticate.
    ///
    /// With an API token no request is made. Otherwise `user.login` is called
    /// with the configured username and password.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing or the login call fails.
    pub fn connect(config: &InventoryConfig) -> Result<Self> {
        let agent = ureq::AgentBuilder::new().timeout(API_TIMEOUT).build();
        let mut client = Self {
            agent,
            endpoint: config.endpoint(),
            auth: String::new(),
            auth_in_body: config.auth_in_body,
            next_id: AtomicU64::new(1),
        };

        if let Some(token) = &config.api_token {
            client.auth.clone_from(token);
            return Ok(client);
        }

        let username = config
            .username
            .as_deref()
            .context("inventory username is not configured (RUNOVER_INVENTORY_USER)")?;
        let password = config
            .password
            .as_deref()
            .context("inventory password is not configured (RUNOVER_INVENTORY_PASSWORD)")?;
        client.auth = client
            .call("user.login", json!({ "username": username, "password": password }))
            .context("inventory login failed")?;
        tracing::debug!(endpoint = %client.endpoint, user = username, "logged in to inventory");
        Ok(client)
    }

    /// Perform one JSON-RPC call and decode its `result`.
    fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let session = (!self.auth.is_empty()).then_some(self.auth.as_str());
        let body = rpc_request(method, params, id, session.filter(|_| self.auth_in_body));

        let mut request = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json-rpc");
        if let Some(token) = session.filter(|_| !self.auth_in_body) {
            request = request.set("Authorization", &format!("Bearer {token}"));
        }

        let response = match request.send_json(body) {
            Ok(r) => r,
            Err(ureq::Error::Status(code, _)) => {
                anyhow::bail!("{method}: inventory API returned HTTP {code}")
            }
            Err(e) => anyhow::bail!("{method}: cannot reach {}: {e}", self.endpoint),
        };
        let reply: Value = response
            .into_json()
            .with_context(|| format!("{method}: response is not JSON"))?;
        Ok(decode_response(reply)?)
    }
}

impl HostInventory for ZabbixClient {
    fn host_groups(&self) -> Result<Vec<HostGroup>> {
        self.call("hostgroup.get", json!({ "output": ["groupid", "name"] }))
    }

    fn hosts_in_group(&self, group_id: &str) -> Result<Vec<String>> {
        let hosts: Vec<InventoryHost> = self.call(
            "host.get",
            json!({ "groupids": group_id, "output": ["hostid", "name"] }),
        )?;
        Ok(hosts.into_iter().map(|h| h.name).collect())
    }
}

/// Build a JSON-RPC 2.0 request body.
///
/// `auth` goes into the body only for servers older than Zabbix 6.4; newer
/// ones take it from the `Authorization` header.
#[must_use]
pub fn rpc_request(method: &str, params: Value, id: u64, auth: Option<&str>) -> Value {
    let mut body = json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
        "id": id,
    });
    if let Some(auth) = auth {
        body["auth"] = Value::String(auth.to_string());
    }
    body
}

/// Extract and decode `result` from a JSON-RPC reply.
///
/// # Errors
///
/// Returns [`InventoryError::Api`] for an `error` member and
/// [`InventoryError::MalformedResponse`] when `result` is missing or has an
/// unexpected shape.
pub fn decode_response<T: DeserializeOwned>(mut reply: Value) -> Result<T, InventoryError> {
    if let Some(error) = reply.get("error") {
        return Err(InventoryError::Api {
            code: error["code"].as_i64().unwrap_or_default(),
            message: error["message"].as_str().unwrap_or_default().to_string(),
            data: error["data"].as_str().unwrap_or_default().to_string(),
        });
    }
    let result = reply
        .get_mut("result")
        .map(Value::take)
        .ok_or_else(|| InventoryError::MalformedResponse("missing 'result'".to_string()))?;
    serde_json::from_value(result).map_err(|e| InventoryError::MalformedResponse(e.to_string()))
}
