#![allow(dead_code)]

use serde_json::{Value, json};
use std::fs;
use std::path::Path;

/// A record whose ratios land clearly inside one label tier.
pub fn record(id: &str, roe: f64, sales_growth: f64, net_profit: f64, sales: f64) -> Value {
    json!({
        "company": {
            "id": id,
            "company_name": format!("{} Ltd", id),
            "roe_percentage": roe,
            "roce_percentage": roe + 2.0,
            "book_value": 250
        },
        "analysis": {
            "sales_growth": sales_growth,
            "dividend_payout": 20,
            "points": [
                "Company has good return on equity",
                "Stock is trading at 8 times its book value",
                "Working capital is under pressure"
            ]
        },
        "data": {
            "profitandloss": [
                {"net_profit": 1, "sales": 100},
                {"net_profit": net_profit, "sales": sales}
            ],
            "balancesheet": [
                {"borrowings": 50, "reserves": 400}
            ]
        }
    })
}

pub fn write_record(dir: &Path, file_stem: &str, value: &Value) {
    let body = serde_json::to_string_pretty(value).expect("serialize fixture");
    fs::write(dir.join(format!("{}.json", file_stem)), body).expect("write fixture");
}

/// Thirty records per tier with some spread inside each tier.
pub fn write_tiered_corpus(dir: &Path) -> usize {
    let mut written = 0;
    for i in 0..30 {
        let step = i as f64;
        let strong = format!("STRONG{:02}", i);
        write_record(dir, &strong, &record(&strong, 20.0 + step, 14.0 + step * 0.5, 15.0 + step * 0.2, 100.0));

        let moderate = format!("MOD{:02}", i);
        write_record(dir, &moderate, &record(&moderate, 9.0 + step * 0.15, 6.0 + step * 0.1, 6.0 + step * 0.1, 100.0));

        let weak = format!("WEAK{:02}", i);
        write_record(dir, &weak, &record(&weak, 1.0 + step * 0.2, 1.0, 1.0 + step * 0.1, 100.0));
        written += 3;
    }
    written
}
