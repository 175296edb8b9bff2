use std::env;
use std::net::ToSocketAddrs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::{Parser, ValueEnum};
use reqwest::Url;
use typed_builder::TypedBuilder;

use crate::env_file::EnvFile;
use crate::error::ServerError;
use crate::{trace, Endpoint, Frontend, Proxy, Server};

/// How the frontend is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Forward frontend requests to a development server.
    Proxy,
    /// Serve a built frontend from a directory.
    Dir,
    /// Serve the frontend embedded into this binary.
    Embed,
    /// Serve only `/api`, a reverse proxy in front of the server serves the frontend.
    None,
}

#[derive(Parser, Debug)]
#[command(version, about = "Serves the timecheck API and frontend.")]
struct Arguments {
    /// How the frontend is served.
    #[arg(long, value_enum, default_value_t = Mode::Proxy, env = "TIMECHECK_MODE")]
    mode: Mode,
    /// The development server to proxy frontend requests to.
    #[arg(long, default_value = "http://localhost:3000/", env = "TIMECHECK_PROXY")]
    proxy: Url,
    /// The directory that contains the built frontend.
    #[arg(long, default_value = "./dist", env = "TIMECHECK_DIR")]
    dir: PathBuf,
    /// The address to listen to.
    #[arg(long, default_value = "0.0.0.0:8080", env = "TIMECHECK_LISTEN_ADDR")]
    listen: String,
    /// Seconds a client may take to send its request headers.
    #[arg(long, default_value_t = 10, env = "TIMECHECK_READ_TIMEOUT")]
    read_timeout: u64,
}

/// The default command line instance for the timecheck server.
#[derive(Debug, TypedBuilder)]
pub struct Cli {
    /// The frontend embedded into the binary, used by [`Mode::Embed`].
    #[builder(default, setter(strip_option))]
    embedded: Option<Frontend>,
}

impl Cli {
    fn create_endpoint(self, args: &Arguments) -> anyhow::Result<Endpoint> {
        let endpoint = Endpoint::new();

        let endpoint = match args.mode {
            Mode::Proxy => {
                let proxy = Proxy::new(args.proxy.clone()).context("failed to create proxy")?;
                tracing::info!("Proxying frontend to: {}", proxy.upstream());

                endpoint.with_proxy(proxy)
            }
            Mode::Dir => {
                let frontend = Frontend::new_path(&args.dir);
                if !frontend.has_index_html() {
                    tracing::warn!(dir = %args.dir.display(), "frontend directory has no index.html");
                }

                endpoint.with_frontend(frontend)
            }
            Mode::Embed => {
                endpoint.with_frontend(self.embedded.ok_or(ServerError::NoEmbeddedFrontend)?)
            }
            Mode::None => {
                tracing::warn!("no frontend mode, this only works behind a reverse proxy that serves the frontend");

                endpoint
            }
        };

        Ok(endpoint)
    }

    /// Parses the arguments and runs the server.
    pub async fn run(self) -> anyhow::Result<()> {
        let env_file =
            EnvFile::load(env::current_dir().context("failed to read current directory")?);
        env_file.apply();

        let args = Arguments::parse();

        // The development server prints its own output, access logs are kept short next to it.
        trace::init_default("TIMECHECK_LOG", args.mode == Mode::Proxy);
        env_file.report();

        let listen_addr = args
            .listen
            .to_socket_addrs()
            .context("failed to parse address")
            .and_then(|m| {
                m.into_iter()
                    .next()
                    .ok_or_else(|| anyhow!("failed to parse address"))
            })?;
        let read_timeout = Duration::from_secs(args.read_timeout);

        let endpoint = self.create_endpoint(&args)?;

        let server = Server::bind(listen_addr)?.header_read_timeout(read_timeout);
        tracing::info!("Listening at: http://{}/", server.local_addr());

        server
            .serve_service(endpoint.into_tower_service(), shutdown_signal())
            .await?;

        tracing::info!("Server stopped.");

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(reason = %e, "failed to listen for shutdown signal");
        // Keep serving, the process can still be killed.
        std::future::pending::<()>().await;
    }
}
