use std::future::Future;
use std::sync::Mutex;

use jiff::civil::Date;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

use africasuite_core::models::parameter::ParameterValues;
use africasuite_core::models::template::{ReportTemplate, TemplateCategory};

use super::DataSource;
use crate::error::ReportError;

const PAYMENT_METHODS: &[&str] = &["Cash", "Card", "Orange Money", "MTN MoMo", "Wave"];
const ROOM_TYPES: &[(&str, &str, i64)] = &[
    ("standard", "Standard", 30),
    ("deluxe", "Deluxe", 18),
    ("suite", "Suite", 8),
    ("bungalow", "Bungalow", 4),
];
const NATIONALITIES: &[&str] = &[
    "Sénégal",
    "Côte d'Ivoire",
    "France",
    "Mali",
    "Nigeria",
    "Ghana",
];
const CHANNELS: &[&str] = &["Direct", "Booking.com", "Expedia", "Agence locale", "Walk-in"];
const OUTLETS: &[(&str, &str)] = &[
    ("restaurant", "Restaurant Le Baobab"),
    ("bar", "Bar Terrasse"),
    ("room_service", "Room Service"),
    ("pool_bar", "Pool Bar"),
];
const DISHES: &[&str] = &[
    "Thiéboudienne",
    "Yassa Poulet",
    "Attiéké Poisson",
    "Mafé",
    "Bissap",
    "Jus de Gingembre",
];
const PROVIDERS: &[(&str, &str)] = &[
    ("orange_money", "Orange Money"),
    ("mtn_momo", "MTN MoMo"),
    ("wave", "Wave"),
    ("moov_money", "Moov Money"),
];

/// Pseudo-random stand-in for the hotel data services.
///
/// Amounts are whole currency units, so totals are exact sums of their parts.
pub struct MockDataSource {
    rng: Mutex<StdRng>,
}

impl MockDataSource {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible figures for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn generate(
        &self,
        template: &ReportTemplate,
        parameters: &ParameterValues,
    ) -> Result<Value, ReportError> {
        template.require_parameters(parameters)?;

        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let data = match template.category {
            TemplateCategory::Financial => financial(&mut *rng, parameters),
            TemplateCategory::Occupancy => occupancy(&mut *rng, parameters),
            TemplateCategory::Guest => guests(&mut *rng, parameters),
            TemplateCategory::FoodBeverage => food_beverage(&mut *rng, parameters),
            TemplateCategory::MobileMoney => mobile_money(&mut *rng, parameters),
            TemplateCategory::NightAudit => night_audit(&mut *rng, parameters),
        };
        Ok(data)
    }
}

impl Default for MockDataSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DataSource for MockDataSource {
    fn synthesize(
        &self,
        template: &ReportTemplate,
        parameters: &ParameterValues,
    ) -> impl Future<Output = Result<Value, ReportError>> + Send {
        std::future::ready(self.generate(template, parameters))
    }
}

fn financial(rng: &mut impl Rng, parameters: &ParameterValues) -> Value {
    let include_breakdown = parameters
        .get("include_breakdown")
        .and_then(Value::as_bool)
        .unwrap_or(true);

    let rooms = amount(rng, 1_500_000, 4_500_000);
    let restaurant = amount(rng, 300_000, 1_200_000);
    let services = amount(rng, 80_000, 400_000);
    let total = rooms + restaurant + services;
    let expenses = amount(rng, total * 30 / 100, total * 55 / 100);
    let net_income = total - expenses;

    let breakdown: Vec<Value> = if include_breakdown {
        [("Rooms", rooms), ("Restaurant", restaurant), ("Services", services)]
            .iter()
            .map(|(category, value)| {
                json!({ "category": category, "amount": value, "share": share(*value, total) })
            })
            .collect()
    } else {
        Vec::new()
    };

    let payments: Vec<Value> = split(rng, total, PAYMENT_METHODS.len())
        .into_iter()
        .zip(PAYMENT_METHODS)
        .map(|(value, method)| {
            json!({
                "method": method,
                "transactions": rng.gen_range(3..=60),
                "amount": value,
            })
        })
        .collect();

    let insights = vec![
        format!(
            "Rooms generated **{:.1}%** of total revenue.",
            share(rooms, total)
        ),
        format!(
            "Net margin for the day stands at {:.1}%.",
            share(net_income, total)
        ),
    ];

    json!({
        "revenue": {
            "rooms": rooms,
            "restaurant": restaurant,
            "services": services,
            "total": total,
        },
        "expenses": { "total": expenses },
        "net_income": net_income,
        "breakdown": breakdown,
        "payments": payments,
        "insights": insights,
    })
}

fn occupancy(rng: &mut impl Rng, parameters: &ParameterValues) -> Value {
    let (start, nights) = period(parameters);
    let selected = selected(parameters, "room_types");

    let mut rooms_sold_total = 0;
    let mut rooms_available_total = 0;
    let mut revenue_total = 0;
    let mut room_types = Vec::new();
    for (id, label, rooms) in ROOM_TYPES {
        if !selected.is_empty() && !selected.iter().any(|s| s == id) {
            continue;
        }
        let available = rooms * nights;
        let sold = rng.gen_range(available * 45 / 100..=available * 95 / 100);
        let adr = amount(rng, 35_000, 180_000);
        rooms_sold_total += sold;
        rooms_available_total += available;
        revenue_total += sold * adr;
        room_types.push(json!({
            "room_type": label,
            "rooms_sold": sold,
            "rate": share(sold, available),
            "adr": adr,
        }));
    }

    let per_night = (rooms_available_total / nights.max(1)).max(1);
    let daily: Vec<Value> = (0..nights)
        .map(|i| {
            let sold = rng.gen_range(per_night * 40 / 100..=per_night);
            json!({
                "date": day_label(start, i),
                "rooms_sold": sold,
                "rate": share(sold, per_night),
            })
        })
        .collect();

    let rate = share(rooms_sold_total, rooms_available_total);
    json!({
        "occupancy": {
            "rate": rate,
            "adr": checked_div(revenue_total, rooms_sold_total),
            "revpar": checked_div(revenue_total, rooms_available_total),
            "rooms_sold": rooms_sold_total,
            "rooms_available": rooms_available_total,
        },
        "room_types": room_types,
        "daily": daily,
        "insights": [
            format!("Average occupancy over {nights} nights: **{rate:.1}%**."),
        ],
    })
}

fn guests(rng: &mut impl Rng, parameters: &ParameterValues) -> Value {
    let segment = parameters
        .get("segment")
        .and_then(Value::as_str)
        .unwrap_or("all")
        .to_string();

    let total: i64 = rng.gen_range(120..=900);
    let returning = rng.gen_range(total * 15 / 100..=total * 45 / 100);
    let new = total - returning;

    let nationalities: Vec<Value> = split(rng, total, NATIONALITIES.len())
        .into_iter()
        .zip(NATIONALITIES)
        .map(|(count, country)| {
            json!({ "country": country, "guests": count, "share": share(count, total) })
        })
        .collect();

    let channels: Vec<Value> = split(rng, total, CHANNELS.len())
        .into_iter()
        .zip(CHANNELS)
        .map(|(bookings, channel)| {
            json!({
                "channel": channel,
                "bookings": bookings,
                "revenue": bookings * amount(rng, 40_000, 120_000),
            })
        })
        .collect();

    json!({
        "segment": segment,
        "guests": {
            "total": total,
            "new": new,
            "returning": returning,
            "average_stay": round1(rng.gen_range(1.2..4.5)),
            "satisfaction": round1(rng.gen_range(72.0..98.0)),
        },
        "nationalities": nationalities,
        "channels": channels,
        "insights": [
            format!("{:.1}% of guests ({segment}) are returning customers.", share(returning, total)),
        ],
    })
}

fn food_beverage(rng: &mut impl Rng, parameters: &ParameterValues) -> Value {
    let selected = selected(parameters, "outlets");

    let mut total = 0;
    let mut covers_total = 0;
    let mut outlets = Vec::new();
    for (id, label) in OUTLETS {
        if !selected.is_empty() && !selected.iter().any(|s| s == id) {
            continue;
        }
        let covers: i64 = rng.gen_range(10..=220);
        let revenue = covers * amount(rng, 4_000, 18_000);
        total += revenue;
        covers_total += covers;
        outlets.push(json!({ "outlet": label, "covers": covers, "revenue": revenue }));
    }

    let top_items: Vec<Value> = DISHES
        .iter()
        .map(|item| {
            let quantity: i64 = rng.gen_range(5..=90);
            json!({
                "item": item,
                "quantity": quantity,
                "revenue": quantity * amount(rng, 2_500, 9_000),
            })
        })
        .collect();

    json!({
        "sales": {
            "total": total,
            "covers": covers_total,
            "average_ticket": checked_div(total, covers_total),
        },
        "outlets": outlets,
        "top_items": top_items,
    })
}

fn mobile_money(rng: &mut impl Rng, parameters: &ParameterValues) -> Value {
    let selected = selected(parameters, "providers");
    let min_amount = parameters.get("min_amount").and_then(Value::as_i64);

    let mut total = 0;
    let mut transactions_total = 0;
    let mut succeeded_total = 0;
    let mut providers = Vec::new();
    for (id, label) in PROVIDERS {
        if !selected.is_empty() && !selected.iter().any(|s| s == id) {
            continue;
        }
        let transactions: i64 = rng.gen_range(20..=400);
        let succeeded = rng.gen_range(transactions * 85 / 100..=transactions);
        let value = succeeded * amount(rng, 5_000, 60_000);
        total += value;
        transactions_total += transactions;
        succeeded_total += succeeded;
        providers.push(json!({
            "provider": label,
            "transactions": transactions,
            "amount": value,
            "success_rate": share(succeeded, transactions),
        }));
    }

    let mut insights = vec![format!(
        "{} of {} mobile-money transactions succeeded.",
        succeeded_total, transactions_total
    )];
    if let Some(min) = min_amount {
        insights.push(format!("Transactions below {min} are excluded."));
    }

    json!({
        "payments": {
            "total": total,
            "transactions": transactions_total,
            "success_rate": share(succeeded_total, transactions_total),
            "fees": total / 100,
        },
        "providers": providers,
        "insights": insights,
    })
}

fn night_audit(rng: &mut impl Rng, parameters: &ParameterValues) -> Value {
    let room_revenue = amount(rng, 1_200_000, 4_000_000);
    let other_revenue = amount(rng, 200_000, 1_500_000);
    let discrepancy_count = rng.gen_range(0..=3);
    let discrepancies: Vec<Value> = (0..discrepancy_count)
        .map(|i| {
            json!({
                "folio": format!("F-{}", 10_400 + i * 37),
                "description": "Charge posted without matching payment",
                "amount": amount(rng, 5_000, 75_000),
            })
        })
        .collect();

    let mut notes = vec![format!(
        "{discrepancy_count} folio discrepancies require follow-up."
    )];
    if let Some(auditor) = parameters.get("auditor").and_then(Value::as_str) {
        notes.push(format!("Audit closed by {auditor}."));
    }

    json!({
        "audit": {
            "room_revenue": room_revenue,
            "other_revenue": other_revenue,
            "total_revenue": room_revenue + other_revenue,
            "rooms_occupied": rng.gen_range(20..=60),
            "no_shows": rng.gen_range(0..=5),
        },
        "discrepancies": discrepancies,
        "notes": notes,
    })
}

/// Random whole amount in `[low, high]`, rounded down to hundreds.
fn amount(rng: &mut impl Rng, low: i64, high: i64) -> i64 {
    let value = if high > low {
        rng.gen_range(low..=high)
    } else {
        low
    };
    (value / 100) * 100
}

/// Split `total` into `parts` non-negative whole shares that sum to `total`.
fn split(rng: &mut impl Rng, total: i64, parts: usize) -> Vec<i64> {
    if parts == 0 {
        return Vec::new();
    }
    let weights: Vec<i64> = (0..parts).map(|_| rng.gen_range(1..=10)).collect();
    let weight_sum: i64 = weights.iter().sum();
    let mut shares: Vec<i64> = weights.iter().map(|w| total * w / weight_sum).collect();
    let assigned: i64 = shares.iter().sum();
    if let Some(first) = shares.first_mut() {
        *first += total - assigned;
    }
    shares
}

fn share(part: i64, whole: i64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        round1(part as f64 * 100.0 / whole as f64)
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn checked_div(numerator: i64, denominator: i64) -> i64 {
    if denominator == 0 {
        0
    } else {
        numerator / denominator
    }
}

fn selected(parameters: &ParameterValues, name: &str) -> Vec<String> {
    parameters
        .get(name)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Start date and night count of a `date_range` parameter. Unparseable or
/// missing ranges fall back to a week with no anchor date.
fn period(parameters: &ParameterValues) -> (Option<Date>, i64) {
    let range = parameters.get("date_range");
    let parse = |key: &str| {
        range
            .and_then(|r| r.get(key))
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<Date>().ok())
    };
    match (parse("start"), parse("end")) {
        (Some(start), Some(end)) if end >= start => {
            let nights = start
                .until(end)
                .map(|span| i64::from(span.get_days()) + 1)
                .unwrap_or(7);
            (Some(start), nights.clamp(1, 31))
        }
        (start, _) => (start, 7),
    }
}

fn day_label(start: Option<Date>, offset: i64) -> String {
    let date = start.and_then(|mut date| {
        for _ in 0..offset {
            date = date.tomorrow().ok()?;
        }
        Some(date)
    });
    match date {
        Some(date) => date.to_string(),
        None => format!("Day {}", offset + 1),
    }
}
