use std::process::ExitCode;

use bridge_test::infrastructure::logging;
use bridge_test::{config, launch, Args, BridgeTestError};
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // .env must be loaded before clap reads the environment
    dotenvy::dotenv().ok();
    let args = Args::parse();
    logging::init_cli_logger(args.verbose);

    let config = config::load();
    match launch(args, &config).await {
        Ok(outcome) => {
            tracing::debug!("Run finished: {:?}", outcome);
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("Error: {:#}", err);
            if let Some(hint) = err
                .downcast_ref::<BridgeTestError>()
                .and_then(BridgeTestError::hint)
            {
                tracing::error!("{}", hint);
            }
            ExitCode::FAILURE
        }
    }
}
