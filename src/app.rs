use tracing::info;

use crate::config::Config;
use crate::heating::CalcError;
use crate::i18n::{self, Translator};
use crate::ui_cli;
use crate::ui_cli::MenuChoice;
use crate::wire::WireError;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] crate::config::ConfigError),
    /// 계산 입력 오류
    #[error("계산 오류: {0}")]
    Calc(#[from] CalcError),
    /// 요청 JSON 처리 오류
    #[error("요청 처리 오류: {0}")]
    Wire(#[from] WireError),
}

/// 설정의 언어 코드로 번역기를 만든다.
pub fn translator_for(config: &Config, cli_lang: &str) -> Translator {
    let code = i18n::resolve_language(cli_lang, Some(config.language.as_str()));
    Translator::new_with_pack(&code, config.language_pack_dir.as_deref())
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(config: &mut Config, cli_lang: &str) -> Result<(), AppError> {
    let mut tr = translator_for(config, cli_lang);
    info!(language = tr.language_code(), "interactive session started");
    loop {
        let outcome = match ui_cli::main_menu(&tr)? {
            MenuChoice::Calculation => ui_cli::handle_calculation(&tr, config),
            MenuChoice::Audit => ui_cli::handle_audit(&tr),
            MenuChoice::Tariffs => ui_cli::handle_tariffs(&tr, config),
            MenuChoice::Tips => ui_cli::handle_tips(&tr),
            MenuChoice::Settings => {
                if ui_cli::handle_settings(&tr, config)? {
                    tr = translator_for(config, "auto");
                }
                config.save()?;
                Ok(())
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        };
        // 잘못된 입력은 메뉴로 돌아가고, 입출력 오류만 상위로 전파한다.
        match outcome {
            Err(AppError::Calc(e)) => {
                println!("{}: {e}", tr.t(i18n::keys::ERROR_PREFIX));
            }
            other => other?,
        }
    }
    Ok(())
}
