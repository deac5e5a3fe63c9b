//! 온수(CWU) 가열비 계산 로직을 라이브러리로 분리하여 CLI 뿐 아니라 웹/문서 프런트엔드도 같은 식을 쓰게 한다.

pub mod app;
pub mod config;
pub mod heating;
pub mod i18n;
pub mod tariffs;
pub mod ui_cli;
pub mod units;
pub mod wire;
