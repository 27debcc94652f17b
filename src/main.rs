// src/main.rs

use jobstep::{cli, logging};

#[tokio::main]
async fn main() {
    let args = cli::parse();

    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("jobstep error: {err:?}");
        std::process::exit(1);
    }

    match jobstep::run(args).await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("jobstep error: {err:?}");
            std::process::exit(1);
        }
    }
}
