use std::process::ExitCode;

use args::Args;
use chain::RpcConnector;
use clap::Parser;
use directory::ContractDirectory;
use relayer::Relayer;
use tracing::{error, info};

mod args;
mod bindings;
mod chain;
mod directory;
mod errors;
mod event;
mod evm;
mod logging;
mod relayer;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    logging::init();

    let args = Args::parse();
    let directory = ContractDirectory::new(&args.contract_info);
    info!(
        source = %args.source_rpc,
        destination = %args.destination_rpc,
        metadata = %directory.path().display(),
        window = args.window,
        "starting bridge scanner"
    );

    let connector = RpcConnector::new(args.source(), args.destination());
    let relayer = Relayer::new(connector, directory, args.warden_key(), args.window);

    if relayer.run_once().await {
        ExitCode::SUCCESS
    } else {
        error!("relay pass incomplete");
        ExitCode::FAILURE
    }
}
