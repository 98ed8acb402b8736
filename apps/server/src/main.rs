use anyhow::Context;
use bps::kernel::ApiConfig;
use bps::kernel::config::load_config;
use bps_logger::Logger;
use bps_server::Server;

#[cfg(feature = "profiling")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

#[bps_runtime::main(high_performance)]
async fn main() -> anyhow::Result<()> {
    #[cfg(feature = "profiling")]
    let _profiler = dhat::Profiler::new_heap();

    let cfg: ApiConfig = load_config(Some("server")).context("Critical: Configuration is malformed")?;
    let _log = Logger::init(env!("CARGO_PKG_NAME"), &cfg.log).context("Critical: Logger setup failed")?;

    Server::builder().config(cfg).build()?.run().await
}
