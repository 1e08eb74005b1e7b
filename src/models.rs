// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calendar::Month;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four record collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Loans,
    Fixed,
    Car,
    General,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Loans,
        Category::Fixed,
        Category::Car,
        Category::General,
    ];

    /// Collection name used in the exchange document and in the database.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Loans => "loans",
            Category::Fixed => "fixed",
            Category::Car => "car",
            Category::General => "general",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Category::Loans => "Loans",
            Category::Fixed => "Fixed expenses",
            Category::Car => "Car expenses",
            Category::General => "General expenses",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "loans" | "loan" => Ok(Category::Loans),
            "fixed" => Ok(Category::Fixed),
            "car" => Ok(Category::Car),
            "general" => Ok(Category::General),
            other => Err(format!("Unknown category '{}'", other)),
        }
    }
}

/// Per-category record details. The associated `CATEGORY` selects the
/// amount-splitting rule and the date field used for bucketing.
pub trait Kind: Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned {
    const CATEGORY: Category;

    /// The category's own date field, used when the record is not an installment.
    fn own_date(&self) -> Option<NaiveDate>;

    /// Overwrites the category's own date field. No-op for categories without one.
    fn stamp_date(&mut self, date: NaiveDate);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanKind {
    Lent,
    Borrowed,
}

impl LoanKind {
    pub fn label(&self) -> &'static str {
        match self {
            LoanKind::Lent => "Lent",
            LoanKind::Borrowed => "Borrowed",
        }
    }
}

impl FromStr for LoanKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lent" => Ok(LoanKind::Lent),
            "borrowed" => Ok(LoanKind::Borrowed),
            other => Err(format!("Unknown loan type '{}' (use lent|borrowed)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    #[default]
    Pending,
    Paid,
    Overdue,
}

impl LoanStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LoanStatus::Pending => "Pending",
            LoanStatus::Paid => "Paid",
            LoanStatus::Overdue => "Overdue",
        }
    }
}

impl FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(LoanStatus::Pending),
            "paid" => Ok(LoanStatus::Paid),
            "overdue" => Ok(LoanStatus::Overdue),
            other => Err(format!(
                "Unknown loan status '{}' (use pending|paid|overdue)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    #[serde(rename = "type")]
    pub kind: LoanKind,
    /// Percent; absent counts as zero.
    #[serde(default, with = "money::option")]
    pub interest: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_date::deserialize")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: LoanStatus,
}

impl Kind for Loan {
    const CATEGORY: Category = Category::Loans;

    fn own_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    fn stamp_date(&mut self, date: NaiveDate) {
        self.due_date = Some(date);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixed {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub due_day: Option<u32>,
}

impl Kind for Fixed {
    const CATEGORY: Category = Category::Fixed;

    fn own_date(&self) -> Option<NaiveDate> {
        None
    }

    fn stamp_date(&mut self, _date: NaiveDate) {}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_date::deserialize")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub mileage: Option<String>,
}

impl Kind for Car {
    const CATEGORY: Category = Category::Car;

    fn own_date(&self) -> Option<NaiveDate> {
        self.date
    }

    fn stamp_date(&mut self, date: NaiveDate) {
        self.date = Some(date);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct General {
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_date::deserialize")]
    pub date: Option<NaiveDate>,
}

impl Kind for General {
    const CATEGORY: Category = Category::General;

    fn own_date(&self) -> Option<NaiveDate> {
        self.date
    }

    fn stamp_date(&mut self, date: NaiveDate) {
        self.date = Some(date);
    }
}

/// Position of a record inside an expanded installment series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    pub installment_number: u32,
    pub total_installments: u32,
    pub installment_date: NaiveDate,
    /// Id of the transient base item the series was expanded from.
    pub parent_id: i64,
    /// Whole-series amount.
    #[serde(with = "money")]
    pub original_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record<K> {
    pub id: i64,
    #[serde(default)]
    pub description: String,
    #[serde(with = "money")]
    pub amount: Decimal,
    #[serde(flatten)]
    pub details: K,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Kept apart from the series metadata so a record whose metadata failed
    /// to parse is still recognizable as an installment.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_installment: bool,
    #[serde(flatten)]
    pub installment: Option<Installment>,
}

impl<K: Kind> Record<K> {
    pub fn new(id: i64, description: impl Into<String>, amount: Decimal, details: K) -> Self {
        Self {
            id,
            description: description.into(),
            amount,
            details,
            created_at: Some(Utc::now()),
            is_installment: false,
            installment: None,
        }
    }

    pub fn installment(&self) -> Option<&Installment> {
        self.installment.as_ref().filter(|_| self.is_installment)
    }

    /// Flagged as an installment but carrying no usable series metadata.
    pub fn lost_installment(&self) -> bool {
        self.is_installment && self.installment.is_none()
    }

    pub fn is_installment(&self) -> bool {
        self.installment().is_some()
    }

    /// Date that drives monthly bucketing: the installment date wins over the
    /// category's own date field.
    pub fn bucket_date(&self) -> Option<NaiveDate> {
        self.installment()
            .map(|i| i.installment_date)
            .or_else(|| self.details.own_date())
    }

    pub fn bucket_month(&self) -> Option<Month> {
        self.bucket_date().map(Month::of)
    }
}

/// The exchange document: four named collections in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub loans: Vec<Record<Loan>>,
    #[serde(default)]
    pub fixed: Vec<Record<Fixed>>,
    #[serde(default)]
    pub car: Vec<Record<Car>>,
    #[serde(default)]
    pub general: Vec<Record<General>>,
}

impl Ledger {
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Loans => self.loans.len(),
            Category::Fixed => self.fixed.len(),
            Category::Car => self.car.len(),
            Category::General => self.general.len(),
        }
    }

    pub fn len(&self) -> usize {
        Category::ALL.iter().map(|c| self.count(*c)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Display label for the known sub-category keys; unknown keys pass through.
pub fn category_label(key: &str) -> &str {
    match key {
        "rent" => "Rent",
        "internet" => "Internet",
        "phone" => "Phone",
        "utilities" => "Utilities",
        "subscription" => "Subscriptions",
        "fuel" => "Fuel",
        "maintenance" => "Maintenance",
        "insurance" => "Insurance",
        "taxes" => "Taxes",
        "repairs" => "Repairs",
        "food" => "Food",
        "transport" => "Transport",
        "health" => "Health",
        "entertainment" => "Entertainment",
        "education" => "Education",
        "clothing" => "Clothing",
        "shopping" => "Shopping",
        "other" => "Other",
        other => other,
    }
}

/// Date fields coming from hand-edited or older exports may be empty strings
/// or garbage; those deserialize as absent instead of failing the document.
mod lenient_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().map(str::trim).and_then(parse))
    }

    fn parse(s: &str) -> Option<NaiveDate> {
        if s.is_empty() {
            return None;
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().or_else(|| {
            s.get(..10)
                .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
        })
    }
}

/// Money fields are stored as exact decimal strings. On input they accept
/// strings or JSON numbers; values beyond the `Decimal` range saturate to
/// `Decimal::MAX`/`Decimal::MIN`.
pub mod money {
    use rust_decimal::Decimal;
    use rust_decimal::prelude::FromPrimitive;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::str::FromStr;
    use tracing::warn;

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        let value: serde_json::Value = Deserialize::deserialize(deserializer)?;
        from_value(&value).ok_or_else(|| D::Error::custom(format!("invalid amount {}", value)))
    }

    fn from_value(value: &serde_json::Value) -> Option<Decimal> {
        match value {
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Decimal::from(i))
                } else if let Some(u) = n.as_u64() {
                    Some(Decimal::from(u))
                } else {
                    n.as_f64().and_then(from_f64)
                }
            }
            serde_json::Value::String(s) => {
                let s = s.trim();
                Decimal::from_str(s)
                    .or_else(|_| Decimal::from_scientific(s))
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(from_f64))
            }
            _ => None,
        }
    }

    /// Shortest decimal form of `v`, saturating outside the `Decimal` range.
    pub fn from_f64(v: f64) -> Option<Decimal> {
        if !v.is_finite() {
            return None;
        }
        if let Ok(d) = Decimal::from_str(&v.to_string()) {
            return Some(d);
        }
        if v.abs() < 1.0 {
            return Decimal::from_f64(v).or(Some(Decimal::ZERO));
        }
        warn!(value = v, "amount outside the decimal range, saturating");
        Some(if v > 0.0 { Decimal::MAX } else { Decimal::MIN })
    }

    pub mod option {
        use rust_decimal::Decimal;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(d) => serializer.collect_str(d),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
        where
            D: Deserializer<'de>,
        {
            use serde::de::Error;

            let value: serde_json::Value = Deserialize::deserialize(deserializer)?;
            if value.is_null() {
                return Ok(None);
            }
            super::from_value(&value)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid amount {}", value)))
        }
    }
}
