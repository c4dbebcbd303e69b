mod application;
mod domain;
mod infrastructure;
mod presentation;

use crate::infrastructure::http_client::HyperHttpClient;
use crate::presentation::cli::Cli;
use clap::Parser;

/// postjson: one JSON POST, one rendered response
///
/// Reads a JSON payload from a file or from the terminal, posts it to the
/// given URL and prints the reply as sorted, indented JSON. Replies sent as
/// `application/octet-stream` are saved under the name the server advertises.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let request_service = HyperHttpClient::new().create_request_service();

    if let Err(err) = cli.run(&request_service).await {
        eprintln!("{:?}", err);
        std::process::exit(1);
    }
}
