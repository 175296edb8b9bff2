#![deny(clippy::all)]
#![deny(missing_debug_implementations)]

use timecheck_server::Cli;

#[cfg(feature = "embed")]
#[derive(rust_embed::RustEmbed)]
#[folder = "$TIMECHECK_EMBED_DIR"]
struct Frontend;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::builder();

    #[cfg(feature = "embed")]
    let cli = cli.embedded(timecheck_server::Frontend::new_embedded::<Frontend>());

    cli.build().run().await?;

    Ok(())
}
