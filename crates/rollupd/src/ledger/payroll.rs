//! Company payroll: one funded account and a fixed employee roster.

use std::collections::BTreeMap;

use serde::Serialize;

use super::errors::{DomainError, Entity};

/// Balance the company account holds before any request is applied.
pub const INITIAL_COMPANY_BALANCE: u64 = 50_000;

/// Payroll employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    /// Display name used in notices.
    pub name: String,
    /// Amount paid per salary distribution.
    pub salary: u64,
    /// Total paid to this employee so far.
    pub paid: u64,
}

impl Employee {
    fn new(name: &str, salary: u64) -> Self {
        Self {
            name: name.to_owned(),
            salary,
            paid: 0,
        }
    }
}

/// Company account and employee roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payroll {
    balance: u64,
    employees: BTreeMap<u32, Employee>,
}

impl Default for Payroll {
    fn default() -> Self {
        let employees = BTreeMap::from([
            (1, Employee::new("John Doe", 5_000)),
            (2, Employee::new("Jane Smith", 6_000)),
            (3, Employee::new("Bob Johnson", 5_500)),
        ]);
        Self {
            balance: INITIAL_COMPANY_BALANCE,
            employees,
        }
    }
}

impl Payroll {
    /// Current company balance.
    #[must_use]
    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Employee roster keyed by id.
    #[must_use]
    pub fn employees(&self) -> &BTreeMap<u32, Employee> {
        &self.employees
    }

    pub(super) fn add_funds(&mut self, amount: u64) -> Result<String, DomainError> {
        let balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| DomainError::invalid_amount("amount", amount.to_string()))?;
        self.balance = balance;
        Ok(format!(
            "Added {amount} to company balance. New balance: {balance}"
        ))
    }

    pub(super) fn distribute_salary(&mut self, employee_id: &str) -> Result<String, DomainError> {
        let not_found = DomainError::NotFound {
            entity: Entity::Employee,
        };
        if employee_id.is_empty() || !employee_id.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(not_found);
        }
        let id = employee_id.parse::<u32>().map_err(|_| not_found.clone())?;
        let employee = self.employees.get_mut(&id).ok_or(not_found)?;
        let salary = employee.salary;
        let balance = self
            .balance
            .checked_sub(salary)
            .ok_or_else(|| DomainError::insufficient_funds(self.balance, salary))?;
        employee.paid = employee.paid.saturating_add(salary);
        self.balance = balance;
        Ok(format!(
            "Salary of {salary} distributed to {}. New company balance: {balance}",
            employee.name
        ))
    }
}
