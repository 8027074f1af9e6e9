use {
    crate::{
        config::Config,
        errors::MarketError,
        models::nft::{Numeric, RawNftRecord},
    },
    alloy::{
        network::{Ethereum, ReceiptResponse},
        primitives::{Address, U256},
        providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder},
        signers::local::PrivateKeySigner,
        sol,
    },
    anyhow::{Context, Result},
    async_trait::async_trait,
    log::debug,
    std::time::Duration,
};

sol! {
    #[sol(rpc)]
    interface INftMarketplace {
        struct MarketItem {
            uint256 tokenId;
            uint256 price;
            address creator;
            bool isListed;
        }

        function getAllNftsOnSale() external view returns (MarketItem[] memory);
        function getOwnedNfts() external view returns (MarketItem[] memory);
        function tokenURI(uint256 tokenId) external view returns (string memory);
        function buyNft(uint256 tokenId) external payable;
        function placeNftOnSale(uint256 tokenId, uint256 price) external payable;
    }
}

/// Receipt details we care about once a transaction is mined.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmedTransaction {
    pub tx_hash: String,
    pub block_number: Option<u64>,
}

/// A submitted transaction. `wait` resolves once it's mined and fails on
/// revert or timeout.
#[async_trait]
pub trait PendingTransaction: Send {
    fn tx_hash(&self) -> String;
    async fn wait(self: Box<Self>) -> Result<ConfirmedTransaction>;
}

/// Looks up the metadata URI of a token. Split out from the gateway so the
/// enrichment pipeline only borrows what it calls.
#[async_trait]
pub trait TokenUriResolver: Send + Sync {
    async fn token_uri(&self, token_id: u64) -> Result<String>;
}

#[async_trait]
pub trait ContractGateway: TokenUriResolver {
    async fn get_all_nfts_on_sale(&self) -> Result<Vec<RawNftRecord>>;
    async fn get_owned_nfts(&self) -> Result<Vec<RawNftRecord>>;
    async fn buy_nft(&self, token_id: u64, value: U256) -> Result<Box<dyn PendingTransaction>>;
    async fn place_nft_on_sale(
        &self,
        token_id: u64,
        price: U256,
        value: U256,
    ) -> Result<Box<dyn PendingTransaction>>;
}

pub struct ContractManager {
    contract: INftMarketplace::INftMarketplaceInstance<DynProvider>,
    account: Address,
    tx_timeout: Duration,
}

impl ContractManager {
    /// Connects to the marketplace contract with the configured signer.
    ///
    /// # Arguments
    /// * `config` - RPC endpoint, contract address, signing key and timeouts
    pub fn new(config: &Config) -> Result<ContractManager> {
        let signer: PrivateKeySigner = config
            .private_key
            .parse()
            .map_err(|e| MarketError::Config(format!("PRIVATE_KEY is not a valid key: {e}")))?;
        let account = signer.address();
        let rpc_url: reqwest::Url = config
            .rpc_url
            .parse()
            .with_context(|| format!("RPC_URL is not a valid URL: {}", config.rpc_url))?;

        let provider = ProviderBuilder::new()
            .wallet(signer)
            .connect_http(rpc_url)
            .erased();

        debug!("Connected to marketplace {} as {}", config.marketplace_address, account);
        Ok(ContractManager {
            contract: INftMarketplace::new(config.marketplace_address, provider),
            account,
            tx_timeout: config.tx_timeout,
        })
    }

    pub fn account(&self) -> Address {
        self.account
    }

    fn pending(&self, inner: PendingTransactionBuilder<Ethereum>) -> Box<dyn PendingTransaction> {
        Box::new(AlloyPendingTransaction {
            inner,
            timeout: self.tx_timeout,
        })
    }
}

fn into_record(item: INftMarketplace::MarketItem) -> RawNftRecord {
    RawNftRecord {
        token_id: Numeric::Wide(item.tokenId),
        price: Numeric::Wide(item.price),
        creator: item.creator.to_checksum(None),
        is_listed: item.isListed,
    }
}

#[async_trait]
impl TokenUriResolver for ContractManager {
    async fn token_uri(&self, token_id: u64) -> Result<String> {
        let uri = self
            .contract
            .tokenURI(U256::from(token_id))
            .call()
            .await
            .with_context(|| format!("tokenURI({}) failed", token_id))?;
        Ok(uri)
    }
}

#[async_trait]
impl ContractGateway for ContractManager {
    async fn get_all_nfts_on_sale(&self) -> Result<Vec<RawNftRecord>> {
        let items = self
            .contract
            .getAllNftsOnSale()
            .call()
            .await
            .context("getAllNftsOnSale failed")?;
        Ok(items.into_iter().map(into_record).collect())
    }

    async fn get_owned_nfts(&self) -> Result<Vec<RawNftRecord>> {
        // the contract keys ownership off msg.sender
        let items = self
            .contract
            .getOwnedNfts()
            .from(self.account)
            .call()
            .await
            .context("getOwnedNfts failed")?;
        Ok(items.into_iter().map(into_record).collect())
    }

    async fn buy_nft(&self, token_id: u64, value: U256) -> Result<Box<dyn PendingTransaction>> {
        let pending = self
            .contract
            .buyNft(U256::from(token_id))
            .value(value)
            .send()
            .await
            .with_context(|| format!("buyNft({}) was not accepted", token_id))?;
        Ok(self.pending(pending))
    }

    async fn place_nft_on_sale(
        &self,
        token_id: u64,
        price: U256,
        value: U256,
    ) -> Result<Box<dyn PendingTransaction>> {
        let pending = self
            .contract
            .placeNftOnSale(U256::from(token_id), price)
            .value(value)
            .send()
            .await
            .with_context(|| format!("placeNftOnSale({}) was not accepted", token_id))?;
        Ok(self.pending(pending))
    }
}

struct AlloyPendingTransaction {
    inner: PendingTransactionBuilder<Ethereum>,
    timeout: Duration,
}

#[async_trait]
impl PendingTransaction for AlloyPendingTransaction {
    fn tx_hash(&self) -> String {
        format!("{:#x}", self.inner.tx_hash())
    }

    async fn wait(self: Box<Self>) -> Result<ConfirmedTransaction> {
        let tx_hash = self.tx_hash();
        let AlloyPendingTransaction { inner, timeout } = *self;
        let receipt = inner
            .with_timeout(Some(timeout))
            .get_receipt()
            .await
            .map_err(|e| MarketError::Transaction(format!("{tx_hash}: {e}")))?;

        if !receipt.status() {
            return Err(MarketError::Transaction(format!("{tx_hash} reverted")).into());
        }
        Ok(ConfirmedTransaction {
            tx_hash,
            block_number: receipt.block_number(),
        })
    }
}
