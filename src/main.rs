use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use cwu_cost_toolbox::{app, config, heating, ui_cli, units::EnergyPriceUnit, wire};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// 온수(CWU) 가열비, 효율, 배관 단열 손실 계산기.
#[derive(Debug, Parser)]
#[command(name = "cwu_cost_toolbox", version, about)]
struct Cli {
    /// 출력 언어 (auto/pl/en/ko)
    #[arg(long, short = 'L', global = true, default_value = "auto")]
    lang: String,
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 가열비/효율/손실/절감 시나리오를 계산한다. 생략한 값은 설정의 기본값을 쓴다.
    Calc {
        /// 청구 단가 [zł/m³]
        #[arg(long)]
        bill: Option<f64>,
        /// 도시 요금 프리셋 (heat-price보다 우선순위가 낮다)
        #[arg(long)]
        city: Option<String>,
        /// 순 열요금
        #[arg(long)]
        heat_price: Option<f64>,
        /// 요금 단위 (GJ/MJ)
        #[arg(long)]
        unit: Option<EnergyPriceUnit>,
        /// 부가세율 [%]
        #[arg(long)]
        vat: Option<f64>,
        /// 세대 월 사용량 [m³]
        #[arg(long)]
        month_m3: Option<f64>,
        /// 세대 수
        #[arg(long)]
        units: Option<u32>,
        /// 가열 온도차 [°C]
        #[arg(long = "dt")]
        dt: Option<f64>,
        /// 결과를 JSON으로 출력한다
        #[arg(long)]
        json: bool,
    },
    /// JSON 파일({"old": {...}, "new": {...}})로 배관 단열 손실을 비교한다.
    Audit {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// 도시별 열요금 표를 출력한다.
    Tariffs,
    /// 온수 설비 절감 요령을 출력한다.
    Tips,
    /// 대화형 메뉴를 실행한다 (기본값).
    Interactive,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 요청된 명령을 실행한다.
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match try_run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "command failed");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: Cli) -> Result<(), app::AppError> {
    let mut cfg = config::load_from(&cli.config)?;
    debug!(config = %cli.config.display(), "config ready");
    let tr = app::translator_for(&cfg, &cli.lang);

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Calc {
            bill,
            city,
            heat_price,
            unit,
            vat,
            month_m3,
            units,
            dt,
            json,
        } => {
            let mut input = cfg.defaults.to_billing_input();
            if let Some(city) = city {
                input.heat_price_net = cfg.tariffs.price_or_default(&city);
                input.price_unit = EnergyPriceUnit::Gigajoule;
            }
            input.bill_rate = bill.unwrap_or(input.bill_rate);
            input.heat_price_net = heat_price.unwrap_or(input.heat_price_net);
            input.price_unit = unit.unwrap_or(input.price_unit);
            input.vat_percent = vat.unwrap_or(input.vat_percent);
            input.monthly_consumption_m3 = month_m3.unwrap_or(input.monthly_consumption_m3);
            input.dwelling_count = units.unwrap_or(input.dwelling_count);
            input.delta_t = dt.unwrap_or(input.delta_t);

            let result = heating::compute_all(&input)?;
            if json {
                let response = wire::CalcResponse::from(&result);
                println!(
                    "{}",
                    serde_json::to_string_pretty(&response).map_err(wire::WireError::from)?
                );
            } else {
                print!("{}", ui_cli::render_calculation(&tr, &result));
            }
        }
        Command::Audit { input, json } => {
            let body = std::fs::read_to_string(&input)?;
            let request: wire::AuditRequest =
                serde_json::from_str(&body).map_err(wire::WireError::from)?;
            if json {
                let response = wire::audit(&request)?;
                println!(
                    "{}",
                    serde_json::to_string_pretty(&response).map_err(wire::WireError::from)?
                );
            } else {
                let old = heating::PipeSegment::from(&request.old);
                let new = heating::PipeSegment::from(&request.new);
                let result = heating::compute_audit(&old, &new)?;
                print!("{}", ui_cli::render_audit(&tr, &result));
            }
        }
        Command::Tariffs => {
            print!("{}", ui_cli::render_tariffs(&tr, &cfg.tariffs));
        }
        Command::Tips => {
            print!("{}", ui_cli::render_tips(&tr));
        }
        Command::Interactive => {
            app::run(&mut cfg, &cli.lang)?;
        }
    }
    Ok(())
}
