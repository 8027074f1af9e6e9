const IPFS_SCHEME: &str = "ipfs://";

/// Maps `ipfs://<cid>/<path>` onto an HTTP gateway. Anything else is
/// returned untouched.
pub fn resolve_gateway_uri(uri: &str, gateway: &str) -> String {
    let Some(rest) = uri.strip_prefix(IPFS_SCHEME) else {
        return uri.to_string();
    };
    // some minters write ipfs://ipfs/<cid>
    let rest = rest.strip_prefix("ipfs/").unwrap_or(rest);
    format!("{}/{}", gateway.trim_end_matches('/'), rest)
}
