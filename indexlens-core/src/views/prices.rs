use serde::Serialize;

use crate::domain::prices::label_year;
use crate::domain::PriceSeries;
use crate::params::PricePeriod;

/// Contiguous tail of a price series selected by period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceWindow<'a> {
    pub period: PricePeriod,
    pub dates: &'a [String],
    pub values: &'a [f64],
}

/// Points whose year is at least `current_year - period.years()`.
///
/// When no point qualifies, or the first qualifying point is the first point
/// of the series, the full series is returned.
pub fn window(series: &PriceSeries, period: PricePeriod, current_year: i32) -> PriceWindow<'_> {
    let start_year = current_year - period.years();
    let len = series.dates.len().min(series.values.len());
    let start = series.dates[..len]
        .iter()
        .position(|d| label_year(d).is_some_and(|y| y >= start_year))
        .unwrap_or(0);

    PriceWindow {
        period,
        dates: &series.dates[start..len],
        values: &series.values[start..len],
    }
}

impl PriceWindow<'_> {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(min, max)` of the window, or `None` when empty.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.values.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    pub fn first_label(&self) -> Option<&str> {
        self.dates.first().map(String::as_str)
    }

    pub fn last_label(&self) -> Option<&str> {
        self.dates.last().map(String::as_str)
    }
}
