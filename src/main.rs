use {
    anyhow::Result,
    clap::{Parser, Subcommand},
    log::info,
    nft_market::{
        config::Config,
        managers::{
            contract_manager::{ContractGateway, ContractManager},
            market_manager::{ListedNftsLoader, OwnedNftsLoader},
            metadata_manager::{MetadataFetcher, MetadataManager},
            notification_manager::{ConsoleNotifier, Notifier},
        },
        models::nft::EnrichedNft,
    },
    std::sync::Arc,
};

#[derive(Parser)]
#[command(name = "nft-market", about = "Browse, buy and list NFTs on the marketplace contract")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show every NFT currently on sale
    Listed {
        #[arg(long)]
        json: bool,
    },
    /// Show the NFTs owned by the configured account
    Owned {
        #[arg(long)]
        json: bool,
    },
    /// Buy an NFT at its listed price (in ETH)
    Buy { token_id: u64, price: f64 },
    /// Put an owned NFT on sale at a price (in ETH)
    List { token_id: u64, price: f64 },
}

fn print_nfts(nfts: &[EnrichedNft], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(nfts)?);
        return Ok(());
    }
    if nfts.is_empty() {
        println!("No NFTs found");
    }
    for nft in nfts {
        println!(
            "#{:<6} {:<32} {:>12} ETH  creator {}{}",
            nft.token_id,
            nft.meta.name,
            nft.price,
            nft.creator,
            if nft.is_listed { "  [on sale]" } else { "" }
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    let cli = Cli::parse();
    let config = Config::from_env()?;

    let contract = ContractManager::new(&config)?;
    info!("Using account {}", contract.account());
    let gateway: Arc<dyn ContractGateway> = Arc::new(contract);
    let fetcher: Arc<dyn MetadataFetcher> =
        Arc::new(MetadataManager::new(&config.ipfs_gateway, config.metadata_timeout)?);
    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);

    match cli.command {
        Command::Listed { json } => {
            let loader = ListedNftsLoader::new(gateway, fetcher, notifier);
            print_nfts(&loader.load().await, json)?;
        }
        Command::Owned { json } => {
            let loader = OwnedNftsLoader::new(gateway, fetcher, notifier, config.listing_fee);
            print_nfts(&loader.load().await, json)?;
        }
        Command::Buy { token_id, price } => {
            ListedNftsLoader::new(gateway, fetcher, notifier)
                .buy(token_id, price)
                .await;
        }
        Command::List { token_id, price } => {
            OwnedNftsLoader::new(gateway, fetcher, notifier, config.listing_fee)
                .list(token_id, price)
                .await;
        }
    }
    Ok(())
}
