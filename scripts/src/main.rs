use clap::Parser;
use pragma_scripts::{
    artifacts::ArtifactStore, cli::Cli, client::StarknetClient, commands::ScriptContext,
    config::NetworkProfile, manifest::ManifestStore,
};
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // A missing `.env` is fine, the variables may come from the shell
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let Cli {
        network,
        port,
        rpc_url,
        deployments_dir,
        build_dir,
        command,
    } = Cli::parse();

    let profile = NetworkProfile::from_env(network, port, rpc_url.as_deref())?;
    info!("Running against {network} at {}", profile.rpc_url);

    let ctx = ScriptContext::new(
        network,
        StarknetClient::new(&profile),
        ArtifactStore::new(build_dir),
        ManifestStore::new(deployments_dir, network.name()),
    );

    if let Err(e) = command.run(&ctx).await {
        error!("{e}");
        std::process::exit(1);
    }

    Ok(())
}
