// src/main.rs
use clap::Parser;
use log::info;
use market_structure_detector::config::{setup_logging, Args};
use market_structure_detector::{DetectorConfig, MarketStructureEngine, MultiTimeframeReport};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    setup_logging(args.debug);

    let config = match &args.config {
        Some(path) => DetectorConfig::from_json_file(path)?,
        None => DetectorConfig::default(),
    };
    let engine = MarketStructureEngine::with_config(config);

    let inputs = args.inputs()?;
    info!("Analyzing {} timeframe(s)", inputs.len());

    let report = MultiTimeframeReport::collect(&engine, &inputs, args.strict);
    report.log_summary();

    println!("{}", report.to_json_string(args.iso_timestamps, args.pretty)?);

    Ok(())
}
