use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::{error, info, LevelFilter};
use sigma_cli::{emit, parse_size_limit, AnalyzerConfig, CliError, CliResult, OutputFormat, Session};

#[derive(Parser, Debug)]
#[command(
    name = "sigma",
    version = env!("CARGO_PKG_VERSION"),
    about = "Extract and compare receiver-reported position sigma from GNSS files",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
    /// Формат вывода: text, json, json-pretty
    #[arg(short, long, global = true, default_value = "text")]
    format: String,
    /// Ограничение размера входа (16MB, 512KB, none)
    #[arg(long, global = true, default_value = "16MB")]
    max_bytes: String,
    /// Знаков после запятой в отчёте
    #[arg(long, global = true, default_value = "3")]
    decimals: u32,
    /// Записать результат в файл вместо stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
    /// Тихий режим (только ошибки)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    /// Подробный лог (прогресс и предупреждения)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Статистика sigma по одному или нескольким файлам
    Analyze {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Сравнение двух файлов (второй минус первый)
    Compare { first: PathBuf, second: PathBuf },
    /// Обзор структуры SBF потока
    Inspect { file: PathBuf },
    /// Разброс координат LLH / XYZ файла
    Scatter { file: PathBuf },
}

fn build_config(cli: &Cli) -> CliResult<AnalyzerConfig> {
    let output_format: OutputFormat = cli
        .format
        .parse()
        .map_err(|e| CliError::Config(format!("--format: {e}")))?;
    let max_input_bytes =
        parse_size_limit(&cli.max_bytes).map_err(|e| CliError::Config(format!("--max-bytes: {e}")))?;

    Ok(AnalyzerConfig {
        output_format,
        output_path: cli.output.clone(),
        max_input_bytes,
        decimals: cli.decimals,
        ..Default::default()
    })
}

fn run(cli: &Cli) -> CliResult<()> {
    let config = build_config(cli)?;

    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("  Output format : {}", config.output_format);
    match config.max_input_bytes {
        Some(limit) => info!("  Input limit   : {limit} B"),
        None => info!("  Input limit   : none"),
    }
    info!("  Output        : {:?}", config.output_path);
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let mut session = Session::new(config);
    let out = match &cli.command {
        Command::Analyze { files } => session.run_analyze(files)?,
        Command::Compare { first, second } => session.run_compare(first, second)?,
        Command::Inspect { file } => session.run_inspect(file)?,
        Command::Scatter { file } => session.run_scatter(file)?,
    };

    emit(&out, session.config().output_path.as_deref())
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.quiet {
        LevelFilter::Error
    } else if cli.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .format_timestamp_secs()
        .init();

    if let Err(e) = run(&cli) {
        error!("{e}");
        std::process::exit(e.exit_code());
    }
}
