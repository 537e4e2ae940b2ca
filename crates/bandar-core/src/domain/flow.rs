//! 외국인 수급 방향.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 외국인 자금 흐름 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForeignFlow {
    /// 순매수 (매수 > 매도)
    Inflow,
    /// 순매도 또는 동일
    Outflow,
}

impl ForeignFlow {
    /// 매수/매도 금액으로 방향을 결정합니다. 동일하면 `Outflow`입니다.
    pub fn from_amounts(buy: Decimal, sell: Decimal) -> Self {
        if buy > sell {
            Self::Inflow
        } else {
            Self::Outflow
        }
    }

    /// 표시용 라벨.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inflow => "Inflow",
            Self::Outflow => "Outflow",
        }
    }
}

impl fmt::Display for ForeignFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_flow_direction() {
        assert_eq!(ForeignFlow::from_amounts(dec!(10), dec!(2)), ForeignFlow::Inflow);
        assert_eq!(ForeignFlow::from_amounts(dec!(2), dec!(10)), ForeignFlow::Outflow);
        assert_eq!(ForeignFlow::from_amounts(dec!(5), dec!(5)), ForeignFlow::Outflow);
    }
}
