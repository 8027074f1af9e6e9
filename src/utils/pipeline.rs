use {
    crate::{
        errors::MarketError,
        managers::{
            contract_manager::TokenUriResolver,
            metadata_manager::{FetchedDocument, MetadataFetcher},
        },
        models::nft::{EnrichedNft, NftMetadata, RawNftRecord},
    },
    log::{debug, warn},
};

/// Turns raw contract records into display-ready NFTs.
///
/// Records are handled one at a time and in order: a URI lookup and a
/// metadata GET each. Unreachable metadata becomes a placeholder; any other
/// failure drops just that record.
///
/// # Arguments
/// * `records` - records as returned by the contract
/// * `resolver` - answers `tokenURI` for each token id
/// * `fetcher` - downloads the metadata document behind the URI
pub async fn enrich_records<R, F>(
    records: Vec<RawNftRecord>,
    resolver: &R,
    fetcher: &F,
) -> Vec<EnrichedNft>
where
    R: TokenUriResolver + ?Sized,
    F: MetadataFetcher + ?Sized,
{
    let total = records.len();
    let mut enriched = Vec::with_capacity(total);
    for record in records {
        match enrich_record(record, resolver, fetcher).await {
            Ok(nft) => enriched.push(nft),
            Err(e) => warn!("Skipping NFT record: {}", e),
        }
    }
    debug!("Enriched {}/{} NFT records", enriched.len(), total);
    enriched
}

async fn enrich_record<R, F>(
    record: RawNftRecord,
    resolver: &R,
    fetcher: &F,
) -> Result<EnrichedNft, MarketError>
where
    R: TokenUriResolver + ?Sized,
    F: MetadataFetcher + ?Sized,
{
    let dropped = |reason: String| MarketError::RecordProcessing {
        token_id: record.token_id.to_decimal_string(),
        reason,
    };

    let token_id = record
        .token_id
        .to_plain_integer()
        .map_err(|e| dropped(e.to_string()))?;
    let uri = resolver
        .token_uri(token_id)
        .await
        .map_err(|e| dropped(format!("{:#}", e)))?;

    let mut meta = match fetch_document(&uri, fetcher).await {
        // a reachable document that isn't metadata is a broken record, not a missing one
        Ok(document) => document
            .json::<NftMetadata>()
            .map_err(|e| dropped(format!("malformed metadata at {}: {}", uri, e)))?,
        Err(e) => {
            debug!("Using placeholder metadata for #{}: {}", token_id, e);
            NftMetadata::placeholder(token_id)
        }
    };

    if meta.name.trim().is_empty() {
        meta.name = NftMetadata::placeholder(token_id).name;
    }

    let price = record.price_in_ether().map_err(|e| dropped(e.to_string()))?;

    Ok(EnrichedNft {
        price,
        token_id,
        creator: record.creator,
        is_listed: record.is_listed,
        meta,
    })
}

async fn fetch_document<F>(uri: &str, fetcher: &F) -> Result<FetchedDocument, MarketError>
where
    F: MetadataFetcher + ?Sized,
{
    let unavailable = |reason: String| MarketError::MetadataUnavailable {
        uri: uri.to_string(),
        reason,
    };

    let document = fetcher
        .fetch(uri)
        .await
        .map_err(|e| unavailable(format!("{:#}", e)))?;
    if !document.ok() {
        return Err(unavailable(format!("HTTP {}", document.status)));
    }
    Ok(document)
}
