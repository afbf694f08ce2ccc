//! Built-in employee records used by the `--demo` mode and the examples.

use crate::value::{Context, Value};

const EMPLOYEES: [(&str, i64, &str, i64); 8] = [
    ("John", 34, "Engineering", 85000),
    ("Sarah", 29, "Marketing", 72000),
    ("Michael", 41, "Engineering", 110000),
    ("Emma", 27, "HR", 65000),
    ("Robert", 36, "Finance", 95000),
    ("Lisa", 32, "Marketing", 78000),
    ("David", 45, "Engineering", 120000),
    ("Jessica", 31, "HR", 68000),
];

/// Eight employees with `name`, `age`, `department` and `salary` fields
pub fn employees() -> Vec<Context> {
    EMPLOYEES
        .iter()
        .map(|&(name, age, department, salary)| {
            let mut record = Context::new();
            record.insert("name".to_string(), Value::from(name));
            record.insert("age".to_string(), Value::Integer(age));
            record.insert("department".to_string(), Value::from(department));
            record.insert("salary".to_string(), Value::Integer(salary));
            record
        })
        .collect()
}
