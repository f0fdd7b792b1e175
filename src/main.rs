use job_board_scraper::config::Config;
use job_board_scraper::error::Result;
use job_board_scraper::gateway::ConfiguredGateway;
use job_board_scraper::logging::{init_logging, LoggerConfig};
use job_board_scraper::{log_error, log_info, utils, JobBoard};

const CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_file_or_default(CONFIG_PATH)?;
    init_logging(LoggerConfig::from_config(&config.logging)?)?;

    log_info!(
        "[main] Starting job board scrape via {:?} gateway",
        config.gateway
    );

    let gateway = ConfiguredGateway::from_config(&config)?;
    let board = JobBoard::new(gateway)
        .with_batch_size(config.batch_size)
        .with_options(config.parsing.into());

    let postings = match board.load_job_postings().await {
        Ok(postings) => postings,
        Err(e) => {
            log_error!(&e => "[main] Scrape failed");
            return Err(e);
        }
    };

    utils::save_json(&postings, &config.output)?;
    log_info!(
        "[main] Wrote {} postings to {}",
        postings.len(),
        config.output
    );
    Ok(())
}
