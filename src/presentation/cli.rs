use crate::application::builders::request_builder::RequestBuilder;
use crate::application::services::HttpRequestService;
use crate::domain::value_objects::HeaderSet;
use crate::infrastructure::config::{JsonSource, OutputTarget, RunConfig};
use crate::infrastructure::{input, logging, output};
use anyhow::Result;
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// CLI configuration for postjson
#[derive(Parser, Debug)]
#[command(name = "postjson", version)]
#[command(about = "It performs HTTP POST request with json parameter", long_about = None)]
pub struct Cli {
    /// Requested URL
    pub url: String,

    /// File with json; read interactively when omitted
    #[arg(short = 'j', long = "json")]
    pub json_file: Option<PathBuf>,

    /// File to save response
    #[arg(short = 'o', long = "output")]
    pub out_file: Option<PathBuf>,

    /// File with a json object of extra request headers
    #[arg(short = 'e', long = "headers")]
    pub headers_file: Option<PathBuf>,

    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn to_config(&self) -> RunConfig {
        RunConfig {
            url: self.url.clone(),
            payload: JsonSource::from_path(self.json_file.as_ref()),
            headers: self.headers_file.clone().map(JsonSource::File),
            output: self
                .out_file
                .clone()
                .map_or(OutputTarget::Stdout, OutputTarget::File),
            attachment_dir: PathBuf::new(),
            verbose: self.verbose,
        }
    }

    pub async fn run(&self, request_service: &HttpRequestService) -> Result<()> {
        let config = self.to_config();
        logging::init(config.verbose);
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        run(&config, request_service, stdin.lock(), &mut stdout).await
    }
}

/// One pass through the pipeline: payload, headers, request, output
pub async fn run<R: BufRead, W: Write>(
    config: &RunConfig,
    request_service: &HttpRequestService,
    mut reader: R,
    out: &mut W,
) -> Result<()> {
    let payload = input::read_json(&config.payload, &mut reader, &mut *out)?;

    let mut headers = HeaderSet::new();
    if let Some(source) = &config.headers {
        let document = input::read_json(source, &mut reader, &mut *out)?;
        headers.overlay(document.0, &source.to_string())?;
    }

    let request = RequestBuilder::new()
        .url(&config.url)?
        .headers(headers)
        .payload(payload)
        .build()?;

    writeln!(out, "Performing HTTP request to {} ...", config.url)?;
    let outcome = request_service.execute(request).await?;
    output::emit(outcome, &config.output, &config.attachment_dir, out)
}
