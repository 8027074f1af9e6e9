#![allow(dead_code)]

use {
    alloy::primitives::U256,
    anyhow::{anyhow, bail, Result},
    async_trait::async_trait,
    nft_market::{
        managers::{
            contract_manager::{ConfirmedTransaction, ContractGateway, PendingTransaction, TokenUriResolver},
            metadata_manager::{FetchedDocument, MetadataFetcher},
            notification_manager::Notifier,
        },
        models::nft::{Numeric, RawNftRecord},
    },
    std::{collections::HashMap, sync::Mutex},
};

pub fn record(token_id: impl Into<Numeric>, price_wei: &str, creator: &str) -> RawNftRecord {
    RawNftRecord {
        token_id: token_id.into(),
        price: Numeric::Text(price_wei.to_string()),
        creator: creator.to_string(),
        is_listed: true,
    }
}

pub fn uri_for(token_id: u64) -> String {
    format!("https://meta.example/{}.json", token_id)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TxBehaviour {
    Confirm,
    RejectOnSubmit,
    Revert,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    Buy { token_id: u64, value: U256 },
    PlaceOnSale { token_id: u64, price: U256, value: U256 },
}

pub struct MockGateway {
    pub on_sale: Vec<RawNftRecord>,
    pub owned: Vec<RawNftRecord>,
    /// Token ids whose tokenURI call fails.
    pub broken_uris: Vec<u64>,
    pub fail_reads: bool,
    pub tx: TxBehaviour,
    pub calls: Mutex<Vec<GatewayCall>>,
    pub resolved: Mutex<Vec<u64>>,
}

impl MockGateway {
    pub fn new(on_sale: Vec<RawNftRecord>) -> MockGateway {
        MockGateway {
            on_sale,
            owned: Vec::new(),
            broken_uris: Vec::new(),
            fail_reads: false,
            tx: TxBehaviour::Confirm,
            calls: Mutex::new(Vec::new()),
            resolved: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    fn submit(&self, call: GatewayCall) -> Result<Box<dyn PendingTransaction>> {
        if self.tx == TxBehaviour::RejectOnSubmit {
            bail!("insufficient funds for gas * price + value");
        }
        let hash = format!("0x{:064x}", self.calls.lock().unwrap().len() + 1);
        self.calls.lock().unwrap().push(call);
        Ok(Box::new(MockPendingTx {
            hash,
            revert: self.tx == TxBehaviour::Revert,
        }))
    }
}

#[async_trait]
impl TokenUriResolver for MockGateway {
    async fn token_uri(&self, token_id: u64) -> Result<String> {
        self.resolved.lock().unwrap().push(token_id);
        if self.broken_uris.contains(&token_id) {
            bail!("execution reverted: URI query for nonexistent token");
        }
        Ok(uri_for(token_id))
    }
}

#[async_trait]
impl ContractGateway for MockGateway {
    async fn get_all_nfts_on_sale(&self) -> Result<Vec<RawNftRecord>> {
        if self.fail_reads {
            bail!("connection refused");
        }
        Ok(self.on_sale.clone())
    }

    async fn get_owned_nfts(&self) -> Result<Vec<RawNftRecord>> {
        if self.fail_reads {
            bail!("connection refused");
        }
        Ok(self.owned.clone())
    }

    async fn buy_nft(&self, token_id: u64, value: U256) -> Result<Box<dyn PendingTransaction>> {
        self.submit(GatewayCall::Buy { token_id, value })
    }

    async fn place_nft_on_sale(
        &self,
        token_id: u64,
        price: U256,
        value: U256,
    ) -> Result<Box<dyn PendingTransaction>> {
        self.submit(GatewayCall::PlaceOnSale { token_id, price, value })
    }
}

pub struct MockPendingTx {
    hash: String,
    revert: bool,
}

#[async_trait]
impl PendingTransaction for MockPendingTx {
    fn tx_hash(&self) -> String {
        self.hash.clone()
    }

    async fn wait(self: Box<Self>) -> Result<ConfirmedTransaction> {
        if self.revert {
            return Err(anyhow!("{} reverted", self.hash));
        }
        Ok(ConfirmedTransaction {
            tx_hash: self.hash,
            block_number: Some(1),
        })
    }
}

/// Serves canned documents by URI; unknown URIs behave like a dead host.
#[derive(Default)]
pub struct MockFetcher {
    pub documents: HashMap<String, (u16, String)>,
    pub fetched: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn with(mut self, uri: String, status: u16, body: &str) -> MockFetcher {
        self.documents.insert(uri, (status, body.to_string()));
        self
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataFetcher for MockFetcher {
    async fn fetch(&self, uri: &str) -> Result<FetchedDocument> {
        self.fetched.lock().unwrap().push(uri.to_string());
        match self.documents.get(uri) {
            Some((status, body)) => Ok(FetchedDocument {
                status: *status,
                body: body.clone().into_bytes(),
            }),
            None => bail!("error sending request for url ({})", uri),
        }
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
