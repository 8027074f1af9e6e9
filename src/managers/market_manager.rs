use {
    crate::{
        errors::MarketError,
        managers::{
            contract_manager::{ConfirmedTransaction, ContractGateway},
            metadata_manager::MetadataFetcher,
            notification_manager::Notifier,
        },
        models::nft::EnrichedNft,
        utils::{pipeline::enrich_records, units::ether_to_wei},
    },
    alloy::primitives::U256,
    anyhow::Result,
    log::{debug, error, info},
    std::sync::Arc,
};

/// NFTs currently on sale, plus the purchase action.
pub struct ListedNftsLoader {
    gateway: Arc<dyn ContractGateway>,
    fetcher: Arc<dyn MetadataFetcher>,
    notifier: Arc<dyn Notifier>,
}

impl ListedNftsLoader {
    pub fn new(
        gateway: Arc<dyn ContractGateway>,
        fetcher: Arc<dyn MetadataFetcher>,
        notifier: Arc<dyn Notifier>,
    ) -> ListedNftsLoader {
        ListedNftsLoader { gateway, fetcher, notifier }
    }

    /// Every NFT on sale. A failed contract read logs and yields an empty list.
    pub async fn load(&self) -> Vec<EnrichedNft> {
        match self.gateway.get_all_nfts_on_sale().await {
            Ok(records) => {
                debug!("Contract returned {} NFTs on sale", records.len());
                enrich_records(records, self.gateway.as_ref(), self.fetcher.as_ref()).await
            }
            Err(e) => {
                error!("Error loading NFTs on sale: {:?}", e);
                Vec::new()
            }
        }
    }

    pub async fn buy(&self, token_id: u64, price: f64) {
        buy_nft(self.gateway.as_ref(), self.notifier.as_ref(), token_id, price).await
    }
}

/// NFTs owned by the signing account, plus the listing action.
pub struct OwnedNftsLoader {
    gateway: Arc<dyn ContractGateway>,
    fetcher: Arc<dyn MetadataFetcher>,
    notifier: Arc<dyn Notifier>,
    listing_fee: U256,
}

impl OwnedNftsLoader {
    pub fn new(
        gateway: Arc<dyn ContractGateway>,
        fetcher: Arc<dyn MetadataFetcher>,
        notifier: Arc<dyn Notifier>,
        listing_fee: U256,
    ) -> OwnedNftsLoader {
        OwnedNftsLoader { gateway, fetcher, notifier, listing_fee }
    }

    pub async fn load(&self) -> Vec<EnrichedNft> {
        match self.gateway.get_owned_nfts().await {
            Ok(records) => {
                debug!("Contract returned {} owned NFTs", records.len());
                enrich_records(records, self.gateway.as_ref(), self.fetcher.as_ref()).await
            }
            Err(e) => {
                error!("Error loading owned NFTs: {:?}", e);
                Vec::new()
            }
        }
    }

    pub async fn list(&self, token_id: u64, price: f64) {
        list_nft(
            self.gateway.as_ref(),
            self.notifier.as_ref(),
            self.listing_fee,
            token_id,
            price,
        )
        .await
    }
}

/// Buys `token_id`, paying `price` ether, and waits for the receipt.
/// Failures are logged and go no further.
pub async fn buy_nft(gateway: &dyn ContractGateway, notifier: &dyn Notifier, token_id: u64, price: f64) {
    info!("Buying NFT #{} for {} ETH", token_id, price);
    match submit_purchase(gateway, token_id, price).await {
        Ok(tx) => {
            info!("Purchase of NFT #{} confirmed in {}", token_id, tx.tx_hash);
            notifier.notify(&format!("You bought NFT #{} for {} ETH", token_id, price));
        }
        Err(e) => error!("{}", MarketError::Transaction(format!("buy NFT #{}: {:#}", token_id, e))),
    }
}

/// Puts `token_id` on sale at `price` ether. The contract charges
/// `listing_fee` wei on top, sent as the transaction value.
pub async fn list_nft(
    gateway: &dyn ContractGateway,
    notifier: &dyn Notifier,
    listing_fee: U256,
    token_id: u64,
    price: f64,
) {
    info!("Listing NFT #{} for {} ETH", token_id, price);
    match submit_listing(gateway, listing_fee, token_id, price).await {
        Ok(tx) => {
            info!("Listing of NFT #{} confirmed in {}", token_id, tx.tx_hash);
            notifier.notify(&format!("NFT #{} is now on sale for {} ETH", token_id, price));
        }
        Err(e) => error!("{}", MarketError::Transaction(format!("list NFT #{}: {:#}", token_id, e))),
    }
}

async fn submit_purchase(
    gateway: &dyn ContractGateway,
    token_id: u64,
    price: f64,
) -> Result<ConfirmedTransaction> {
    let value = ether_to_wei(price)?;
    let pending = gateway.buy_nft(token_id, value).await?;
    debug!("Submitted purchase of NFT #{}: {}", token_id, pending.tx_hash());
    pending.wait().await
}

async fn submit_listing(
    gateway: &dyn ContractGateway,
    listing_fee: U256,
    token_id: u64,
    price: f64,
) -> Result<ConfirmedTransaction> {
    let price_wei = ether_to_wei(price)?;
    let pending = gateway.place_nft_on_sale(token_id, price_wei, listing_fee).await?;
    debug!("Submitted listing of NFT #{}: {}", token_id, pending.tx_hash());
    pending.wait().await
}
