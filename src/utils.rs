// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calendar::Month;
use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

pub const DEFAULT_CURRENCY: &str = "R$";
pub const DEFAULT_INSTALLMENTS: i64 = 12;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<Month> {
    Ok(s.parse::<Month>()?)
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Installment count as typed by the user, read like an integer prefix:
/// `"2.5"` and `"3x"` give 2 and 3. Values without leading digits, and zero,
/// fall back to `fallback`; negative values pass through so the expander can
/// reject them.
pub fn installment_count(raw: &str, fallback: i64) -> i64 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return fallback;
    }
    match digits[..end].parse::<i64>() {
        Ok(0) => fallback,
        Ok(n) if negative => -n,
        Ok(n) => n,
        // more digits than fit in an i64
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    }
}

pub fn fmt_money(d: &Decimal, symbol: &str) -> String {
    format!("{} {:.2}", symbol, d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

// Settings
pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn get_currency(conn: &Connection) -> Result<String> {
    Ok(get_setting(conn, "currency")?.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()))
}

pub fn get_default_installments(conn: &Connection) -> Result<i64> {
    match get_setting(conn, "installments")? {
        Some(s) => s
            .parse::<i64>()
            .with_context(|| format!("Invalid installments setting '{}'", s)),
        None => Ok(DEFAULT_INSTALLMENTS),
    }
}
