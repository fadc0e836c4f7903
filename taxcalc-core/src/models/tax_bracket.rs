use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One marginal-rate tier of a bracket schedule.
///
/// `min_income` is inclusive, `max_income` is an exclusive cap; the top
/// bracket of a schedule carries `None` and is open-ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
}
