//! 밴다르몰로지 대시보드 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 최신 거래일 강도 점수 (데모 데이터)
//! bandar --demo score
//!
//! # 특정 날짜, 금융 섹터 상위 10개
//! bandar --input hasil_gabungan.csv top --date 2024-07-26 --sector Financials --limit 10
//!
//! # 종목 비교
//! bandar --demo compare --codes BBCA,BBRI,BMRI
//!
//! # 주간 섹터 거래량
//! bandar --demo weekly sector --metric volume
//!
//! # 필터 선택지 (섹터 / 거래일 / 종목)
//! bandar --demo list sectors
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use bandar_analytics::WeeklyMetric;
use bandar_cli::commands::{
    compare::{run_compare, CompareConfig},
    demo::{run_demo, DemoConfig},
    list::{run_list, ListTarget},
    score::{run_score, ScoreConfig},
    stock::{run_stock, StockConfig},
    summary::{run_summary, SummaryConfig},
    top::{run_top, TopConfig},
    weekly::{run_sector_weekly, run_stock_weekly},
};
use bandar_cli::{AppContext, InputOptions, OutputFormat};
use bandar_core::{init_logging, AppConfig, LogConfig};
use clap::{Parser, Subcommand};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "bandar")]
#[command(about = "Bandarmology dashboard CLI - 강도 점수 및 빅플레이어 패턴 분석", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로
    #[arg(short, long, global = true, default_value = "config/default.toml")]
    config: String,

    /// 로그 레벨 (설정값 대신 사용)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// 입력 CSV 경로 (없으면 설정의 data.input_path)
    #[arg(short, long, global = true)]
    input: Option<String>,

    /// 데모 데이터 사용
    #[arg(long, global = true, default_value = "false")]
    demo: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 강도 점수 테이블
    Score {
        /// 거래일 (YYYY-MM-DD, 기본값: 최신)
        #[arg(short, long)]
        date: Option<String>,

        /// 섹터 필터 (여러 번 지정 가능)
        #[arg(short, long)]
        sector: Vec<String>,

        /// 출력 형식 (table, csv, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// 출력 파일 경로 (기본값: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// 강도 점수 상위 종목
    Top {
        #[arg(short, long)]
        date: Option<String>,

        #[arg(short, long)]
        sector: Vec<String>,

        /// 표시 개수 (기본값: dashboard.top_n)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// 시장 요약 및 패턴 분포
    Summary {
        #[arg(short, long)]
        date: Option<String>,

        #[arg(short, long)]
        sector: Vec<String>,
    },

    /// 종목 일별 이력
    Stock {
        /// 종목 코드
        #[arg(long)]
        code: String,

        /// 기준일 (포함)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// 종목 비교 (2~4개)
    Compare {
        /// 쉼표로 구분된 종목 코드
        #[arg(long, value_delimiter = ',')]
        codes: Vec<String>,

        #[arg(short, long)]
        date: Option<String>,
    },

    /// 주간 분석
    Weekly {
        #[command(subcommand)]
        target: WeeklyTarget,
    },

    /// 필터 선택지 조회
    List {
        /// 대상 (sectors, dates, stocks)
        target: String,

        /// 출력 형식 (table, csv, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// 데모 데이터셋 CSV 저장
    Demo {
        /// 출력 파일 경로
        #[arg(short, long)]
        output: String,

        /// 난수 시드 (기본값: data.demo_seed)
        #[arg(long)]
        seed: Option<u64>,

        /// 영업일 수 (기본값: data.demo_days)
        #[arg(long)]
        days: Option<usize>,
    },
}

#[derive(Subcommand)]
enum WeeklyTarget {
    /// 섹터별 주간 지표
    Sector {
        /// 지표 (price, volume, frequency)
        #[arg(short, long, default_value = "price")]
        metric: String,
    },
    /// 종목 주간 추이 및 외국인 수급
    Stock {
        #[arg(long)]
        code: String,
    },
}

/// 설정 파일이 없으면 기본값과 환경 변수만 사용합니다.
fn load_config(path: &str) -> Result<AppConfig> {
    AppConfig::load(path).with_context(|| format!("Failed to load config: {}", path))
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;

    let mut log_config = LogConfig::from_settings(&config.logging);
    if let Some(level) = &cli.log_level {
        log_config.level = level.clone();
    }
    init_logging(log_config).map_err(|e| anyhow::anyhow!("Failed to init logging: {}", e))?;
    if !Path::new(&cli.config).exists() {
        info!("설정 파일이 없어 기본값을 사용합니다: {}", cli.config);
    }

    if let Commands::Demo { output, seed, days } = &cli.command {
        let demo = DemoConfig {
            output: output.clone(),
            days: days.unwrap_or(config.data.demo_days),
            seed: seed.unwrap_or(config.data.demo_seed),
        };
        run_demo(&demo)?;
        return Ok(());
    }

    let input = InputOptions {
        input: cli.input.clone(),
        demo: cli.demo,
    };
    let ctx = AppContext::load(config, &input)?;

    let result = match cli.command {
        Commands::Score {
            date,
            sector,
            format,
            output,
        } => {
            let score = ScoreConfig {
                date,
                sectors: sector,
                format: OutputFormat::parse(&format)?,
                output,
            };
            run_score(&ctx, &score).map(|n| info!("{}개 행 점수화 완료", n))
        }
        Commands::Top {
            date,
            sector,
            limit,
        } => run_top(
            &ctx,
            &TopConfig {
                date,
                sectors: sector,
                limit,
            },
        )
        .map(|_| ()),
        Commands::Summary { date, sector } => run_summary(
            &ctx,
            &SummaryConfig {
                date,
                sectors: sector,
            },
        ),
        Commands::Stock { code, date } => {
            run_stock(&ctx, &StockConfig { code, date }).map(|_| ())
        }
        Commands::Compare { codes, date } => {
            run_compare(&ctx, &CompareConfig { codes, date }).map(|_| ())
        }
        Commands::Weekly { target } => match target {
            WeeklyTarget::Sector { metric } => {
                let metric: WeeklyMetric = metric.parse()?;
                run_sector_weekly(&ctx, metric).map(|_| ())
            }
            WeeklyTarget::Stock { code } => run_stock_weekly(&ctx, &code).map(|_| ()),
        },
        Commands::List { target, format } => {
            let target = ListTarget::parse(&target)?;
            run_list(&ctx, target, OutputFormat::parse(&format)?).map(|_| ())
        }
        Commands::Demo { .. } => Ok(()),
    };

    if let Err(e) = &result {
        error!("명령 실행 실패: {:#}", e);
    }
    result
}
