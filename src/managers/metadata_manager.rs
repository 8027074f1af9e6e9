use {
    crate::utils::ipfs::resolve_gateway_uri,
    anyhow::Result,
    async_trait::async_trait,
    reqwest::Client,
    serde::de::DeserializeOwned,
    std::time::Duration,
};

/// Status and raw body of a metadata request.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchedDocument {
    /// True for any 2xx status.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }
}

/// GETs a token metadata document. An `Err` means the request never got a
/// response; HTTP error statuses come back as a document with `ok() == false`.
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    async fn fetch(&self, uri: &str) -> Result<FetchedDocument>;
}

pub struct MetadataManager {
    client: Client,
    ipfs_gateway: String,
}

impl MetadataManager {
    pub fn new(ipfs_gateway: &str, timeout: Duration) -> Result<MetadataManager> {
        let client = Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(MetadataManager {
            client,
            ipfs_gateway: ipfs_gateway.to_string(),
        })
    }
}

#[async_trait]
impl MetadataFetcher for MetadataManager {
    async fn fetch(&self, uri: &str) -> Result<FetchedDocument> {
        let url = resolve_gateway_uri(uri, &self.ipfs_gateway);
        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(FetchedDocument { status, body })
    }
}
