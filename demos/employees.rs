//! Filtering the built-in employee records with a few queries

use vibeql::{sample, QueryEngine, Value};

fn main() {
    let employees = sample::employees();
    let engine = QueryEngine::new();

    let queries = [
        ("Engineers over 35", "department = Engineering AND age > 35"),
        (
            "Marketing employees or high earners",
            "department = Marketing OR salary > 100000",
        ),
        (
            "Young engineers or HR employees",
            "(department = Engineering OR department = HR) AND age < 35",
        ),
        ("Everyone outside engineering", "NOT department = Engineering"),
    ];

    for (title, text) in queries {
        let query = engine.compile(text);
        println!("{} ({}):", title, query.expression());
        for employee in query.apply(&employees) {
            let field = |name: &str| employee.get(name).map(Value::to_string).unwrap_or_default();
            println!(
                "  - {}: {} years old, {}, ${}",
                field("name"),
                field("age"),
                field("department"),
                field("salary")
            );
        }
        println!();
    }
}
