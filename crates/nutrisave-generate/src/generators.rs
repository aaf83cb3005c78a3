use rand::Rng;

/// Quantity labels appended to base item names.
pub const QUANTITY_LABELS: [&str; 7] = ["250g", "500g", "1kg", "2kg", "Package", "Bottle", "Box"];

pub const PRICE_MIN: f64 = 10.0;
pub const PRICE_MAX: f64 = 300.0;
pub const STOCK_MAX: u32 = 200;

pub fn pick_quantity_label(rng: &mut impl Rng) -> &'static str {
    QUANTITY_LABELS[rng.random_range(0..QUANTITY_LABELS.len())]
}

/// Uniform price in `[PRICE_MIN, PRICE_MAX]`, rounded to cents.
pub fn pick_price(rng: &mut impl Rng) -> f64 {
    let raw = rng.random_range(PRICE_MIN..=PRICE_MAX);
    round_cents(raw).clamp(PRICE_MIN, PRICE_MAX)
}

pub fn pick_stock(rng: &mut impl Rng) -> u32 {
    rng.random_range(0..=STOCK_MAX)
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// True when `value` has no more than two decimal places.
pub fn has_cent_precision(value: f64) -> bool {
    value.is_finite() && round_cents(value) == value
}
