use crate::domain::chart::PriceScale;

/// Text and vertical position of one price label
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub price: f64,
    pub text: String,
    pub y: f64,
}

/// Evenly spaced labels from the bottom bound to the top bound.
pub fn price_labels(scale: &PriceScale, count: usize, precision: usize) -> Vec<AxisLabel> {
    scale
        .ticks(count)
        .into_iter()
        .map(|price| AxisLabel { price, text: format!("{:.*}", precision, price), y: scale.price_to_y(price) })
        .collect()
}
