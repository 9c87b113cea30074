//! HTTP client for the node, plus the contract implementations built on it.
//!
//! Wire format: every call is a POST of `{"action": ..., ...params}`; the
//! node answers `{"result": ...}` or `{"error": "..."}`. Writes carry an
//! explicit `sender` and the handle's fixed gas ceiling.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join_all;
use serde::Deserialize;
use tally_types::{AccountAddress, Candidate, CandidateId, ElectionWindow, Timestamp};

use crate::contract::{
    CandidateFetch, ElectionBinder, ElectionContract, ElectionHandle, DEFAULT_GAS_LIMIT,
};
use crate::error::ChainError;

/// Default per-request timeout. A hung node call surfaces as
/// [`ChainError::Timeout`] instead of suspending the operation forever.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

// ── ChainClient ─────────────────────────────────────────────────────────

/// JSON-RPC client for a single node endpoint.
#[derive(Clone)]
pub struct ChainClient {
    http: reqwest::Client,
    node_url: String,
}

impl ChainClient {
    /// Create a client targeting the given base URL with the default
    /// request timeout.
    pub fn new(node_url: impl Into<String>) -> Result<Self, ChainError> {
        Self::with_timeout(node_url, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a client with an explicit per-request timeout.
    pub fn with_timeout(
        node_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ChainError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| ChainError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            node_url: node_url.into(),
        })
    }

    /// The configured node URL.
    pub fn node_url(&self) -> &str {
        &self.node_url
    }

    /// Send a request and return the `result` field.
    pub(crate) async fn rpc_call(
        &self,
        action: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, ChainError> {
        let mut body = params;
        body.as_object_mut()
            .ok_or_else(|| ChainError::InvalidResponse("params must be a JSON object".into()))?
            .insert("action".to_string(), serde_json::json!(action));

        let response = self
            .http
            .post(&self.node_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChainError::from_transport(action, e))?;

        if !response.status().is_success() {
            return Err(ChainError::Rpc(format!(
                "{action}: node returned HTTP {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ChainError::InvalidResponse(format!("{action}: {e}")))?;

        if let Some(err) = json.get("error").and_then(|e| e.as_str()) {
            return Err(ChainError::classify_node_error(action, err));
        }

        Ok(json.get("result").cloned().unwrap_or(json))
    }
}

// ── ChainElection ───────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CandidateRecord {
    id: u32,
    name: String,
    party: String,
    vote_count: u64,
}

#[derive(Deserialize)]
struct DatesResult {
    starts_at: u64,
    ends_at: u64,
}

#[derive(Deserialize)]
struct CheckVoteResult {
    voted: bool,
}

#[derive(Deserialize)]
struct CountResult {
    count: u32,
}

/// [`ElectionContract`] implementation over a bound on-chain instance.
pub struct ChainElection {
    client: ChainClient,
    handle: ElectionHandle,
}

impl ChainElection {
    pub fn new(client: ChainClient, handle: ElectionHandle) -> Self {
        Self { client, handle }
    }

    pub fn handle(&self) -> &ElectionHandle {
        &self.handle
    }

    fn contract_params(&self) -> serde_json::Value {
        serde_json::json!({ "to": self.handle.contract_address.as_str() })
    }

    fn write_params(&self, sender: &AccountAddress) -> serde_json::Value {
        serde_json::json!({
            "to": self.handle.contract_address.as_str(),
            "sender": sender.as_str(),
            "gas": self.handle.gas_limit,
        })
    }

    async fn fetch_candidate(&self, id: CandidateId) -> Result<Candidate, ChainError> {
        let mut params = self.contract_params();
        params["id"] = serde_json::json!(id.as_u32());

        let result = self.client.rpc_call("get_candidate", params).await?;
        let record: CandidateRecord = serde_json::from_value(result)
            .map_err(|e| ChainError::InvalidResponse(format!("get_candidate: {e}")))?;

        Ok(Candidate {
            id: CandidateId::new(record.id),
            name: record.name,
            party: record.party,
            vote_count: record.vote_count,
        })
    }
}

#[async_trait]
impl ElectionContract for ChainElection {
    async fn candidate_count(&self) -> Result<u32, ChainError> {
        let result = self
            .client
            .rpc_call("get_count_candidates", self.contract_params())
            .await?;
        let resp: CountResult = serde_json::from_value(result)
            .map_err(|e| ChainError::InvalidResponse(format!("get_count_candidates: {e}")))?;
        Ok(resp.count)
    }

    async fn candidates(&self, offset: u32, limit: u32) -> Result<Vec<CandidateFetch>, ChainError> {
        // The node exposes only per-id reads, so a page fans out into
        // concurrent fetches. Each slot keeps its own outcome.
        let ids: Vec<CandidateId> = (offset + 1..=offset.saturating_add(limit))
            .map(CandidateId::new)
            .collect();

        let fetches = join_all(ids.iter().map(|id| self.fetch_candidate(*id))).await;

        Ok(ids.into_iter().zip(fetches).collect())
    }

    async fn add_candidate(
        &self,
        sender: &AccountAddress,
        name: &str,
        party: &str,
    ) -> Result<(), ChainError> {
        let mut params = self.write_params(sender);
        params["name"] = serde_json::json!(name);
        params["party"] = serde_json::json!(party);

        self.client.rpc_call("add_candidate", params).await?;
        Ok(())
    }

    async fn set_dates(
        &self,
        sender: &AccountAddress,
        window: ElectionWindow,
    ) -> Result<(), ChainError> {
        let mut params = self.write_params(sender);
        params["starts_at"] = serde_json::json!(window.starts_at.as_secs());
        params["ends_at"] = serde_json::json!(window.ends_at.as_secs());

        self.client.rpc_call("set_dates", params).await?;
        Ok(())
    }

    async fn get_dates(&self) -> Result<Option<ElectionWindow>, ChainError> {
        let result = self
            .client
            .rpc_call("get_dates", self.contract_params())
            .await?;
        let dates: DatesResult = serde_json::from_value(result)
            .map_err(|e| ChainError::InvalidResponse(format!("get_dates: {e}")))?;

        if dates.starts_at == 0 && dates.ends_at == 0 {
            return Ok(None);
        }

        ElectionWindow::new(Timestamp::new(dates.starts_at), Timestamp::new(dates.ends_at))
            .map(Some)
            .map_err(|e| ChainError::InvalidResponse(format!("get_dates: {e}")))
    }

    async fn check_vote(&self, account: &AccountAddress) -> Result<bool, ChainError> {
        let mut params = self.contract_params();
        params["account"] = serde_json::json!(account.as_str());

        let result = self.client.rpc_call("check_vote", params).await?;
        let resp: CheckVoteResult = serde_json::from_value(result)
            .map_err(|e| ChainError::InvalidResponse(format!("check_vote: {e}")))?;
        Ok(resp.voted)
    }

    async fn vote(
        &self,
        sender: &AccountAddress,
        candidate: CandidateId,
    ) -> Result<(), ChainError> {
        let mut params = self.write_params(sender);
        params["candidate_id"] = serde_json::json!(candidate.as_u32());

        self.client.rpc_call("vote", params).await?;
        Ok(())
    }
}

// ── ChainBinder ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ElectionAddressResult {
    #[serde(default)]
    address: Option<String>,
}

/// Resolves the deployed election contract through the node.
pub struct ChainBinder {
    client: ChainClient,
    gas_limit: u64,
}

impl ChainBinder {
    pub fn new(client: ChainClient) -> Self {
        Self {
            client,
            gas_limit: DEFAULT_GAS_LIMIT,
        }
    }

    pub fn with_gas_limit(client: ChainClient, gas_limit: u64) -> Self {
        Self { client, gas_limit }
    }
}

#[async_trait]
impl ElectionBinder for ChainBinder {
    async fn bind(&self) -> Result<(ElectionHandle, Arc<dyn ElectionContract>), ChainError> {
        let result = self
            .client
            .rpc_call("election_address", serde_json::json!({}))
            .await?;

        let resp: ElectionAddressResult = serde_json::from_value(result)
            .map_err(|e| ChainError::InvalidResponse(format!("election_address: {e}")))?;

        let raw = resp.address.ok_or(ChainError::NotDeployed)?;
        let contract_address = AccountAddress::parse(&raw)
            .map_err(|e| ChainError::InvalidResponse(format!("election_address: {e}")))?;

        tracing::info!(contract = %contract_address, "bound election contract");

        let handle = ElectionHandle {
            contract_address,
            gas_limit: self.gas_limit,
        };
        let election = ChainElection::new(self.client.clone(), handle.clone());

        Ok((handle, Arc::new(election)))
    }
}
