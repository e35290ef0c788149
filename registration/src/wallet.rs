//! Optional wallet provider surface.
//!
//! A front end may be handed a [`WalletProvider`] at startup; nothing in the
//! registration flow depends on one being present. [`MockWallet`] backs the
//! provider with an in-memory vote store for demos and tests.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WalletError {
    #[error("unsupported wallet method: {0}")]
    Unsupported(String),

    #[error("invalid params for {method}: {reason}")]
    InvalidParams { method: String, reason: String },

    #[error("request rejected: {0}")]
    Rejected(String),
}

pub type ListenerId = u64;
pub type Listener = Arc<dyn Fn(&Value) + Send + Sync>;

/// Request/response and event-subscription surface of a browser-style
/// wallet provider.
pub trait WalletProvider: Send + Sync {
    /// Capability flag: true when a real wallet backs this provider.
    fn is_wallet(&self) -> bool;

    fn request(&self, method: &str, params: &[Value]) -> Result<Value, WalletError>;

    fn on(&self, event: &str, listener: Listener) -> ListenerId;

    /// Returns false if no such listener was registered.
    fn remove_listener(&self, event: &str, id: ListenerId) -> bool;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoteResult {
    pub success: bool,
    pub transaction_hash: String,
    pub block_number: u64,
    pub voter_id: String,
    pub candidate_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VotingStatus {
    pub voter_id: String,
    pub has_voted: bool,
    pub candidate_id: Option<String>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    pub chain_id: u64,
    pub name: String,
    pub is_testnet: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MockVote {
    pub candidate_id: String,
    pub transaction_hash: String,
    pub block_number: u64,
    pub timestamp: String,
}

/// In-memory votes keyed by voter id.
#[derive(Debug, Default)]
pub struct MockVoteStore {
    votes: HashMap<String, MockVote>,
    next_block: u64,
}

impl MockVoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        voter_id: &str,
        candidate_id: &str,
    ) -> Result<VoteResult, WalletError> {
        if self.votes.contains_key(voter_id) {
            return Err(WalletError::Rejected(format!(
                "voter {voter_id} has already voted"
            )));
        }

        self.next_block += 1;
        let vote = MockVote {
            candidate_id: candidate_id.to_string(),
            transaction_hash: format!("0x{:064x}", self.next_block),
            block_number: self.next_block,
            timestamp: crate::wasm_utils::now_iso_string(),
        };
        let result = VoteResult {
            success: true,
            transaction_hash: vote.transaction_hash.clone(),
            block_number: vote.block_number,
            voter_id: voter_id.to_string(),
            candidate_id: candidate_id.to_string(),
        };
        self.votes.insert(voter_id.to_string(), vote);
        Ok(result)
    }

    pub fn get(&self, voter_id: &str) -> Option<&MockVote> {
        self.votes.get(voter_id)
    }

    pub fn has_voted(&self, voter_id: &str) -> bool {
        self.votes.contains_key(voter_id)
    }

    pub fn status(&self, voter_id: &str) -> VotingStatus {
        let vote = self.get(voter_id);
        VotingStatus {
            voter_id: voter_id.to_string(),
            has_voted: vote.is_some(),
            candidate_id: vote.map(|v| v.candidate_id.clone()),
            timestamp: vote.map(|v| v.timestamp.clone()),
        }
    }

    /// Votes per candidate.
    pub fn tally(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for vote in self.votes.values() {
            *counts.entry(vote.candidate_id.clone()).or_insert(0) += 1;
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }
}

pub const EVENT_ACCOUNTS_CHANGED: &str = "accountsChanged";
pub const EVENT_VOTE_CAST: &str = "voteCast";

pub struct MockWallet {
    account: String,
    network: NetworkInfo,
    store: Mutex<MockVoteStore>,
    listeners: Mutex<HashMap<String, Vec<(ListenerId, Listener)>>>,
    next_listener: AtomicU64,
}

impl MockWallet {
    pub fn new(account: &str, network: NetworkInfo) -> Self {
        Self {
            account: account.to_string(),
            network,
            store: Mutex::new(MockVoteStore::new()),
            listeners: Mutex::new(HashMap::new()),
            next_listener: AtomicU64::new(1),
        }
    }

    /// Local development chain.
    pub fn local() -> Self {
        Self::new(
            "0x0000000000000000000000000000000000000001",
            NetworkInfo {
                chain_id: 1337,
                name: "Localhost".to_string(),
                is_testnet: true,
            },
        )
    }

    /// Listeners run after the registry lock is released, so they may
    /// subscribe or unsubscribe from inside the callback.
    fn emit(&self, event: &str, payload: &Value) {
        let subscribed: Vec<Listener> = match self.listeners.lock() {
            Ok(listeners) => listeners
                .get(event)
                .map(|entries| entries.iter().map(|(_, l)| Arc::clone(l)).collect())
                .unwrap_or_default(),
            Err(_) => {
                log::error!("Wallet listener lock poisoned; dropping {} event", event);
                return;
            }
        };
        for listener in subscribed {
            listener(payload);
        }
    }

    fn with_store<T>(
        &self,
        f: impl FnOnce(&mut MockVoteStore) -> Result<T, WalletError>,
    ) -> Result<T, WalletError> {
        let mut store = self
            .store
            .lock()
            .map_err(|_| WalletError::Rejected("vote store unavailable".to_string()))?;
        f(&mut *store)
    }
}

fn string_param(
    method: &str,
    params: &[Value],
    index: usize,
    name: &str,
) -> Result<String, WalletError> {
    params
        .get(index)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| WalletError::InvalidParams {
            method: method.to_string(),
            reason: format!("missing {name}"),
        })
}

impl WalletProvider for MockWallet {
    fn is_wallet(&self) -> bool {
        true
    }

    fn request(&self, method: &str, params: &[Value]) -> Result<Value, WalletError> {
        log::debug!("Wallet request: {}", method);
        match method {
            "eth_chainId" => Ok(json!(format!("0x{:x}", self.network.chain_id))),
            "eth_accounts" => Ok(json!([self.account])),
            "eth_requestAccounts" => {
                let accounts = json!([self.account]);
                self.emit(EVENT_ACCOUNTS_CHANGED, &accounts);
                Ok(accounts)
            }
            "wallet_networkInfo" => Ok(json!(self.network)),
            "voting_castVote" => {
                let voter_id = string_param(method, params, 0, "voter id")?;
                let candidate_id = string_param(method, params, 1, "candidate id")?;
                let result = self.with_store(|store| store.record(&voter_id, &candidate_id))?;
                let payload = json!(result);
                self.emit(EVENT_VOTE_CAST, &payload);
                Ok(payload)
            }
            "voting_status" => {
                let voter_id = string_param(method, params, 0, "voter id")?;
                let status = self.with_store(|store| Ok(store.status(&voter_id)))?;
                Ok(json!(status))
            }
            other => Err(WalletError::Unsupported(other.to_string())),
        }
    }

    fn on(&self, event: &str, listener: Listener) -> ListenerId {
        let id = self.next_listener.fetch_add(1, Ordering::Relaxed);
        match self.listeners.lock() {
            Ok(mut listeners) => listeners
                .entry(event.to_string())
                .or_default()
                .push((id, listener)),
            Err(_) => log::error!("Wallet listener lock poisoned; {} subscription dropped", event),
        }
        id
    }

    fn remove_listener(&self, event: &str, id: ListenerId) -> bool {
        let Ok(mut listeners) = self.listeners.lock() else {
            return false;
        };
        let Some(subscribed) = listeners.get_mut(event) else {
            return false;
        };
        let before = subscribed.len();
        subscribed.retain(|(listener_id, _)| *listener_id != id);
        before != subscribed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn store_rejects_second_vote() {
        let mut store = MockVoteStore::new();
        let first = store.record("voter-1", "candidate-a").unwrap();
        assert!(first.success);
        assert_eq!(first.block_number, 1);
        assert_eq!(first.transaction_hash.len(), 66);

        let err = store.record("voter-1", "candidate-b").unwrap_err();
        assert!(matches!(err, WalletError::Rejected(_)));
        assert_eq!(store.get("voter-1").unwrap().candidate_id, "candidate-a");
    }

    #[test]
    fn store_tally_and_status() {
        let mut store = MockVoteStore::new();
        assert!(store.is_empty());
        store.record("v1", "a").unwrap();
        store.record("v2", "a").unwrap();
        store.record("v3", "b").unwrap();

        assert_eq!(store.len(), 3);
        let tally = store.tally();
        assert_eq!(tally["a"], 2);
        assert_eq!(tally["b"], 1);

        let status = store.status("v3");
        assert!(status.has_voted);
        assert_eq!(status.candidate_id.as_deref(), Some("b"));
        assert!(!store.status("v9").has_voted);
    }

    #[test]
    fn wallet_reports_chain_and_network() {
        let wallet = MockWallet::local();
        assert!(wallet.is_wallet());
        assert_eq!(wallet.request("eth_chainId", &[]).unwrap(), json!("0x539"));

        let info: NetworkInfo =
            serde_json::from_value(wallet.request("wallet_networkInfo", &[]).unwrap()).unwrap();
        assert_eq!(info.chain_id, 1337);
        assert!(info.is_testnet);
    }

    #[test]
    fn cast_vote_notifies_listeners_until_removed() {
        let wallet = MockWallet::local();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let id = wallet.on(
            EVENT_VOTE_CAST,
            Arc::new(move |payload: &Value| sink.lock().unwrap().push(payload.clone())),
        );

        let result = wallet
            .request("voting_castVote", &[json!("voter-7"), json!("candidate-x")])
            .unwrap();
        let result: VoteResult = serde_json::from_value(result).unwrap();
        assert_eq!(result.voter_id, "voter-7");
        assert_eq!(seen.lock().unwrap().len(), 1);

        assert!(wallet.remove_listener(EVENT_VOTE_CAST, id));
        assert!(!wallet.remove_listener(EVENT_VOTE_CAST, id));
        wallet
            .request("voting_castVote", &[json!("voter-8"), json!("candidate-x")])
            .unwrap();
        assert_eq!(seen.lock().unwrap().len(), 1);

        let status = wallet.request("voting_status", &[json!("voter-8")]).unwrap();
        let status: VotingStatus = serde_json::from_value(status).unwrap();
        assert!(status.has_voted);
    }

    #[test]
    fn listener_can_unsubscribe_itself() {
        let wallet = Arc::new(MockWallet::local());
        let calls = Arc::new(Mutex::new(0));
        let own_id = Arc::new(Mutex::new(None));

        let listener: Listener = {
            let wallet = Arc::clone(&wallet);
            let calls = Arc::clone(&calls);
            let own_id = Arc::clone(&own_id);
            Arc::new(move |_: &Value| {
                *calls.lock().unwrap() += 1;
                if let Some(id) = own_id.lock().unwrap().take() {
                    wallet.remove_listener(EVENT_VOTE_CAST, id);
                }
            })
        };
        *own_id.lock().unwrap() = Some(wallet.on(EVENT_VOTE_CAST, listener));

        // Run on another thread so a re-entrant lock shows up as a timeout
        let (done, finished) = mpsc::channel();
        let caster = Arc::clone(&wallet);
        std::thread::spawn(move || {
            caster
                .request("voting_castVote", &[json!("voter-1"), json!("candidate-a")])
                .unwrap();
            caster
                .request("voting_castVote", &[json!("voter-2"), json!("candidate-a")])
                .unwrap();
            done.send(()).unwrap();
        });

        finished.recv_timeout(Duration::from_secs(3)).unwrap();
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn bad_requests_are_errors() {
        let wallet = MockWallet::local();
        assert_eq!(
            wallet.request("eth_sendTransaction", &[]),
            Err(WalletError::Unsupported("eth_sendTransaction".to_string()))
        );
        assert!(matches!(
            wallet.request("voting_castVote", &[json!("voter-1")]),
            Err(WalletError::InvalidParams { .. })
        ));
    }
}
