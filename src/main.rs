// src/main.rs
use std::sync::Arc;

use env_logger::Env;
use log::info;
use structopt::StructOpt;

use sumarize::config::Settings;
use sumarize::delivery::api_server::run_server;
use sumarize::infrastructure::repositories::SqliteSummaryRepository;

#[derive(StructOpt, Debug)]
#[structopt(name = "sumarize")]
struct Opt {
    #[structopt(short, long, default_value = "config.yml")]
    config: String,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let opt = Opt::from_args();
    let settings = match Settings::load(&opt.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {:?}", e);
            std::process::exit(1);
        }
    };

    info!("using database {}", settings.database.url);
    let repo = match SqliteSummaryRepository::new(&settings.database.url).await {
        Ok(repo) => repo,
        Err(e) => {
            eprintln!("Failed to open database: {}", e);
            std::process::exit(1);
        }
    };

    run_server(settings, Arc::new(repo)).await
}
