//! 일별 거래 레코드.
//!
//! 종목 × 거래일 단위의 원시 행입니다. 수치 필드는 수집 단계에서
//! 한 번 검증되므로 이후 단계에서는 항상 유한값임을 가정할 수 있습니다.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::flow::ForeignFlow;
use super::signal::FinalSignal;

/// 주차 라벨 형식 (연도-일요일 기준 주차, 예: `2024-30`).
pub const WEEK_FORMAT: &str = "%Y-%U";

/// 종목별 일간 거래 레코드.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingRecord {
    /// 종목 코드
    pub stock_code: String,
    /// 거래일
    pub date: NaiveDate,
    /// 섹터
    pub sector: String,
    /// 회사명
    pub company_name: String,
    /// 종가 (선택 컬럼)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close: Option<Decimal>,
    /// 거래량
    pub volume: u64,
    /// 체결 빈도 (선택 컬럼)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<u64>,
    /// 호가 불균형 (관례상 [-1, 1], 입력에서는 범위 제한 없음)
    pub imbalance: f64,
    /// 외국인 매수 금액
    pub foreign_buy: Decimal,
    /// 외국인 매도 금액
    pub foreign_sell: Decimal,
    /// 최종 신호
    pub final_signal: FinalSignal,
    /// 수집 단계에서 일부 값이 중립값으로 대체된 행
    #[serde(default)]
    pub degraded: bool,
}

impl TradingRecord {
    /// 필수 필드로 새 레코드를 생성합니다.
    pub fn new(
        stock_code: impl Into<String>,
        date: NaiveDate,
        volume: u64,
        imbalance: f64,
        foreign_buy: Decimal,
        foreign_sell: Decimal,
        final_signal: FinalSignal,
    ) -> Self {
        let stock_code = stock_code.into();
        Self {
            company_name: format!("{stock_code} Tbk."),
            stock_code,
            date,
            sector: String::new(),
            close: None,
            volume,
            frequency: None,
            imbalance,
            foreign_buy,
            foreign_sell,
            final_signal,
            degraded: false,
        }
    }

    /// 섹터를 설정합니다.
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = sector.into();
        self
    }

    /// 회사명을 설정합니다.
    pub fn with_company_name(mut self, name: impl Into<String>) -> Self {
        self.company_name = name.into();
        self
    }

    /// 종가와 체결 빈도를 설정합니다.
    pub fn with_market_data(mut self, close: Option<Decimal>, frequency: Option<u64>) -> Self {
        self.close = close;
        self.frequency = frequency;
        self
    }

    /// 외국인 수급 방향.
    pub fn foreign_flow(&self) -> ForeignFlow {
        ForeignFlow::from_amounts(self.foreign_buy, self.foreign_sell)
    }

    /// 외국인 순매수 금액 (매수 - 매도).
    pub fn net_foreign_flow(&self) -> Decimal {
        self.foreign_buy - self.foreign_sell
    }

    /// 외국인 매수 금액 (f64).
    pub fn foreign_buy_f64(&self) -> f64 {
        self.foreign_buy.to_f64().unwrap_or(0.0)
    }

    /// 외국인 매도 금액 (f64).
    pub fn foreign_sell_f64(&self) -> f64 {
        self.foreign_sell.to_f64().unwrap_or(0.0)
    }

    /// 주차 라벨 (`%Y-%U`).
    pub fn week_key(&self) -> String {
        self.date.format(WEEK_FORMAT).to_string()
    }
}
