//! Payroll queries and updates.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::error::{HrError, HrResult};
use crate::models::{EmployeeId, PayrollRecord};

use super::state::HrState;

/// One employee's line in the payroll summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollLine {
    /// The employee.
    pub employee_id: EmployeeId,
    /// Their display name.
    pub name: String,
    /// Their pay components (zero when none are stored).
    pub record: PayrollRecord,
    /// Net pay of `record`.
    pub net_pay: Decimal,
}

/// Net pay for every employee in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollSummary {
    /// One line per employee, in directory order.
    pub lines: Vec<PayrollLine>,
    /// Sum of all net pay.
    pub total_net_pay: Decimal,
}

impl HrState {
    /// The payroll record of an employee, or a zero-valued one when none
    /// is stored.
    pub fn payroll_for(&self, employee_id: EmployeeId) -> PayrollRecord {
        self.payroll
            .iter()
            .find(|p| p.employee_id == employee_id)
            .cloned()
            .unwrap_or_else(|| PayrollRecord::zeroed(employee_id))
    }

    /// Inserts or replaces the payroll record of an existing employee.
    pub fn set_payroll(&mut self, record: PayrollRecord) -> HrResult<()> {
        self.employee(record.employee_id)?;
        if let Some(field) = record.negative_field() {
            return Err(HrError::InvalidEmployee {
                field: field.to_string(),
                message: "payroll amounts must not be negative".to_string(),
            });
        }

        info!(employee_id = %record.employee_id, net_pay = %record.net_pay(), "Payroll updated");
        match self
            .payroll
            .iter_mut()
            .find(|p| p.employee_id == record.employee_id)
        {
            Some(existing) => *existing = record,
            None => self.payroll.push(record),
        }
        Ok(())
    }

    /// Net pay per employee plus the total.
    pub fn payroll_summary(&self) -> PayrollSummary {
        let lines: Vec<PayrollLine> = self
            .employees
            .iter()
            .map(|employee| {
                let record = self.payroll_for(employee.id);
                PayrollLine {
                    employee_id: employee.id,
                    name: employee.name.clone(),
                    net_pay: record.net_pay(),
                    record,
                }
            })
            .collect();
        let total_net_pay = lines.iter().map(|line| line.net_pay).sum();

        PayrollSummary {
            lines,
            total_net_pay,
        }
    }
}
