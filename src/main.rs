use anyhow::Result;
use clap::Parser;
use exam_csv_import::cli::Cli;
use exam_csv_import::services::{write_sample, ApiExamStore, StoreBackend, TomlExamStore};
use exam_csv_import::utils::logging;
use exam_csv_import::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = cli.apply(Config::from_env());

    // 初始化日志
    logging::init(config.verbose_logging);

    if let Some(path) = &cli.sample {
        write_sample(path).await?;
        return Ok(());
    }

    let store = match (cli.save, cli.api) {
        (false, _) => None,
        (true, false) => Some(StoreBackend::Toml(TomlExamStore::from_config(&config))),
        (true, true) => Some(StoreBackend::Api(ApiExamStore::from_config(&config)?)),
    };

    let stats = App::initialize(config, store)?.run(cli.files).await?;

    if !stats.all_passed() {
        std::process::exit(1);
    }

    Ok(())
}
