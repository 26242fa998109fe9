use anyhow::Result;
use clap::{Parser, Subcommand};
use querier::{router, run_session, AppState, EmptyLinePolicy, SessionConfig};
use std::io::IsTerminal;
use std::net::SocketAddr;
use std::process::ExitCode;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};
use tse_core::{InvertedIndex, PageDir};

const EXIT_USAGE: u8 = 1;
const EXIT_BAD_PAGE_DIR: u8 = 2;
const EXIT_INDEX_UNREADABLE: u8 = 3;
const EXIT_INDEX_CORRUPT: u8 = 4;
const EXIT_RUNTIME: u8 = 5;

#[derive(Parser)]
#[command(name = "querier")]
#[command(about = "Answer AND/OR queries against a saved index", long_about = None)]
struct Args {
    /// Crawler page directory the index was built from
    #[arg(long)]
    pages: String,
    /// Index file written by the indexer
    #[arg(long)]
    index: String,
    /// What an empty query line does
    #[arg(long, value_enum, default_value_t = EmptyLinePolicy::Skip)]
    on_empty: EmptyLinePolicy,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand)]
enum Mode {
    /// Serve queries over HTTP instead of reading stdin
    Serve {
        /// Host to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        /// Port to bind
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { EXIT_USAGE } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    let pages = match PageDir::open(&args.pages) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("querier: {e}");
            return ExitCode::from(EXIT_BAD_PAGE_DIR);
        }
    };
    let index = match InvertedIndex::load(&args.index) {
        Ok(i) => i,
        Err(e) => {
            eprintln!("querier: {e}");
            let code = if e.is_unreadable() { EXIT_INDEX_UNREADABLE } else { EXIT_INDEX_CORRUPT };
            return ExitCode::from(code);
        }
    };
    tracing::info!(index = %args.index, num_words = index.num_words(), "index loaded");

    let result = match args.mode {
        None => interactive(&index, &pages, args.on_empty),
        Some(Mode::Serve { host, port }) => serve(AppState::new(index, pages), &host, port),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("querier: {e:#}");
            ExitCode::from(EXIT_RUNTIME)
        }
    }
}

fn interactive(index: &InvertedIndex, pages: &PageDir, on_empty: EmptyLinePolicy) -> Result<()> {
    let stdin = std::io::stdin();
    let config = SessionConfig { on_empty, prompt: stdin.is_terminal() };
    let mut out = std::io::stdout().lock();
    let mut diag = std::io::stderr().lock();
    run_session(index, pages, stdin.lock(), &mut out, &mut diag, &config)?;
    Ok(())
}

fn serve(state: AppState, host: &str, port: u16) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(async move {
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "server listening");
        axum::serve(listener, router(state)).await?;
        Ok::<(), anyhow::Error>(())
    })
}
