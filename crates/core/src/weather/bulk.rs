use super::{FormattedWeatherRecord, Result, WeatherError};

/// Outcome of a bulk lookup: resolved records and not-found markers, each in
/// input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkResult {
    pub found: Vec<FormattedWeatherRecord>,
    /// `None` when every query resolved.
    pub not_found: Option<Vec<String>>,
}

impl BulkResult {
    /// Records the outcome of one query.
    ///
    /// `NotFound` becomes a marker; any other error is handed back so the
    /// caller can abort the whole batch.
    pub fn record(
        &mut self,
        query: &str,
        outcome: Result<FormattedWeatherRecord>,
    ) -> Result<()> {
        match outcome {
            Ok(record) => self.found.push(record),
            Err(WeatherError::NotFound) => self
                .not_found
                .get_or_insert_with(Vec::new)
                .push(not_found_marker(query)),
            Err(err) => return Err(err),
        }
        Ok(())
    }

    /// Number of queries accounted for.
    pub fn len(&self) -> usize {
        self.found.len() + self.not_found.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Formats the not-found marker for a query, quoting it as given.
///
/// # Examples
///
/// ```
/// use havo_core::weather::not_found_marker;
///
/// assert_eq!(not_found_marker("locationnotfound"), "'locationnotfound' not found");
/// ```
pub fn not_found_marker(query: &str) -> String {
    format!("'{}' not found", query)
}
