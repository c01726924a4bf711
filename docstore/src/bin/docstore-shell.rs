use std::process;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::runtime::Builder;
use tracing::{debug, error, info};

use docstore::clock::{Clock, CoarseClock, SystemClock};
use docstore::shell::cli::{ClockSource, ShellArgs};
use docstore::shell::session::Session;
use docstore::{JsonCodec, VersionedStore};

fn main() {
    let args = ShellArgs::from_args(std::env::args_os()).unwrap_or_else(|err| err.exit());

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();
    if let Err(err) = tracing_log::LogTracer::init() {
        eprintln!("Unable to forward log records: {}", err);
    }

    info!("Store engine: {}", args.store_config.engine.as_str());
    info!("Clock source: {:?}", args.clock);

    let runtime = create_runtime();
    let clock: Arc<dyn Clock + Send + Sync> = match args.clock {
        ClockSource::System => Arc::new(SystemClock::new()),
        ClockSource::Coarse => {
            let coarse = Arc::new(CoarseClock::new());
            let ticking = Arc::clone(&coarse);
            runtime.spawn(async move { ticking.run().await });
            coarse
        }
    };

    let store = VersionedStore::from_config(&args.store_config, clock, JsonCodec);
    if let Err(err) = runtime.block_on(run(Session::new(store))) {
        error!("Shell terminated: {}", err);
        process::exit(1);
    }
    debug!("Input closed, exiting");
}

async fn run(session: Session) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    while let Some(line) = lines.next_line().await? {
        if let Some(response) = session.handle_line(&line) {
            stdout.write_all(format!("{}\n", response).as_bytes()).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}

fn create_runtime() -> tokio::runtime::Runtime {
    Builder::new_current_thread()
        .thread_name_fn(|| {
            static ATOMIC_ID: AtomicUsize = AtomicUsize::new(0);
            let id = ATOMIC_ID.fetch_add(1, Ordering::SeqCst);
            format!("docstore-wrk-{}", id)
        })
        .enable_all()
        .build()
        .unwrap_or_else(|err| {
            eprintln!("Unable to create runtime: {}", err);
            process::exit(1)
        })
}
