//! Payroll record model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::net_pay;

use super::EmployeeId;

/// Monthly pay components for one employee.
///
/// All amounts are non-negative. Stored amounts are usually whole numbers
/// but fractional values are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollRecord {
    /// The employee this record belongs to; also the record's key.
    pub employee_id: EmployeeId,
    /// Basic salary.
    pub basic: Decimal,
    /// Allowances.
    #[serde(default)]
    pub allowance: Decimal,
    /// Bonus.
    #[serde(default)]
    pub bonus: Decimal,
    /// Tax deduction.
    #[serde(default)]
    pub tax: Decimal,
    /// Insurance deduction.
    #[serde(default)]
    pub insurance: Decimal,
}

impl PayrollRecord {
    /// A record with every amount at zero, used when none is stored.
    pub fn zeroed(employee_id: EmployeeId) -> Self {
        Self {
            employee_id,
            basic: Decimal::ZERO,
            allowance: Decimal::ZERO,
            bonus: Decimal::ZERO,
            tax: Decimal::ZERO,
            insurance: Decimal::ZERO,
        }
    }

    /// Net pay of this record. See [`net_pay`].
    pub fn net_pay(&self) -> Decimal {
        net_pay(self)
    }

    /// Name of the first negative amount, if any.
    pub fn negative_field(&self) -> Option<&'static str> {
        [
            ("basic", self.basic),
            ("allowance", self.allowance),
            ("bonus", self.bonus),
            ("tax", self.tax),
            ("insurance", self.insurance),
        ]
        .into_iter()
        .find(|(_, amount)| amount.is_sign_negative() && !amount.is_zero())
        .map(|(field, _)| field)
    }
}
