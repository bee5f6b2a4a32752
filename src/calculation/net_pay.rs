//! Net pay from a payroll record.

use rust_decimal::Decimal;

use crate::models::PayrollRecord;

/// Net pay: `basic + allowance + bonus - tax - insurance`.
///
/// No rounding is applied; display layers format to two decimals.
///
/// # Examples
///
/// ```
/// use hr_core::calculation::net_pay;
/// use hr_core::models::{EmployeeId, PayrollRecord};
/// use rust_decimal::Decimal;
///
/// let record = PayrollRecord {
///     employee_id: EmployeeId(1),
///     basic: Decimal::new(5000, 0),
///     allowance: Decimal::new(800, 0),
///     bonus: Decimal::new(200, 0),
///     tax: Decimal::new(150, 0),
///     insurance: Decimal::new(100, 0),
/// };
/// assert_eq!(net_pay(&record), Decimal::new(5750, 0));
/// ```
pub fn net_pay(record: &PayrollRecord) -> Decimal {
    record.basic + record.allowance + record.bonus - record.tax - record.insurance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmployeeId;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_fractional_amounts_are_exact() {
        let record = PayrollRecord {
            employee_id: EmployeeId(1),
            basic: dec("4100.10"),
            allowance: dec("0.20"),
            bonus: dec("0"),
            tax: dec("410.01"),
            insurance: dec("99.99"),
        };
        assert_eq!(net_pay(&record), dec("3590.30"));
    }

    #[test]
    fn test_deductions_may_exceed_earnings() {
        let record = PayrollRecord {
            employee_id: EmployeeId(1),
            basic: dec("100"),
            allowance: dec("0"),
            bonus: dec("0"),
            tax: dec("150"),
            insurance: dec("0"),
        };
        assert_eq!(net_pay(&record), dec("-50"));
    }
}
