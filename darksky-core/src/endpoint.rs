//! Endpoint paths and the precipitation batch encoder.
//!
//! Every API operation is addressed as `/{route}/{api_key}` plus an optional
//! parameter segment. The key and parameters are embedded verbatim — the
//! wire format carries no percent-encoding, so callers own any escaping.

use chrono::{DateTime, Utc};
use std::fmt;

use crate::error::Error;
use crate::model::PrecipitationQuery;
use crate::time;

/// The base url for all API calls.
pub const BASE_URL: &str = "https://api.darkskyapp.com/v1";

/// The API operations, named as they appear in the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Forecast,
    Precipitation,
    Interesting,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Forecast => "forecast",
            Route::Precipitation => "precipitation",
            Route::Interesting => "interesting",
        }
    }

    pub const fn all() -> &'static [Route] {
        &[Route::Forecast, Route::Precipitation, Route::Interesting]
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the path for `route`, embedding the API key and, when the route
/// takes one, a parameter segment.
///
/// A present-but-empty segment keeps its `/` separator (an empty
/// precipitation batch still addresses `/precipitation/{key}/`), while a
/// route with no segment ends at the key.
pub fn endpoint(route: Route, api_key: &str, params: Option<&str>) -> String {
    match params {
        Some(params) => format!("/{route}/{api_key}/{params}"),
        None => format!("/{route}/{api_key}"),
    }
}

/// The `lat,long` parameter segment used by the forecast routes.
pub fn point_params(latitude: f64, longitude: f64) -> String {
    format!("{latitude},{longitude}")
}

/// Encode a precipitation batch as `lat,long,time` tokens joined with `;`,
/// preserving input order.
///
/// Each entry's effective timestamp (explicit, or `now` when absent) is
/// validated against the accepted window and normalized to UTC. The first
/// failing entry aborts the whole batch; nothing partial is produced.
pub fn batch_params(
    now: DateTime<Utc>,
    queries: &[PrecipitationQuery],
) -> Result<String, Error> {
    let mut tokens = Vec::with_capacity(queries.len());

    for query in queries {
        let effective = query.time.unwrap_or_else(|| now.timestamp());
        let normalized = time::normalize(now, effective)?;
        tokens.push(format!("{},{},{}", query.latitude, query.longitude, normalized));
    }

    Ok(tokens.join(";"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reference_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2012, 10, 17, 12, 0, 0).unwrap()
    }

    fn parse_blob(blob: &str) -> Vec<(f64, f64, i64)> {
        blob.split(';')
            .map(|token| {
                let mut parts = token.split(',');
                (
                    parts.next().unwrap().parse().unwrap(),
                    parts.next().unwrap().parse().unwrap(),
                    parts.next().unwrap().parse().unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn route_names_match_the_api_paths() {
        assert_eq!(Route::Forecast.as_str(), "forecast");
        assert_eq!(Route::Precipitation.as_str(), "precipitation");
        assert_eq!(Route::Interesting.as_str(), "interesting");
    }

    #[test]
    fn display_matches_as_str() {
        for route in Route::all() {
            assert_eq!(route.to_string(), route.as_str());
        }
    }

    #[test]
    fn forecast_path_embeds_coordinates_verbatim() {
        let params = point_params(37.126617, -87.842756);
        assert_eq!(
            endpoint(Route::Forecast, "KEY", Some(&params)),
            "/forecast/KEY/37.126617,-87.842756"
        );
    }

    #[test]
    fn storms_path_ends_at_the_key() {
        assert_eq!(endpoint(Route::Interesting, "KEY", None), "/interesting/KEY");
    }

    #[test]
    fn empty_segment_keeps_its_separator() {
        assert_eq!(
            endpoint(Route::Precipitation, "KEY", Some("")),
            "/precipitation/KEY/"
        );
    }

    #[test]
    fn batch_joins_entries_in_input_order() {
        let now = reference_now();
        let base = now.timestamp();
        let queries = [
            PrecipitationQuery::at(37.126617, -87.842756, base - 60),
            PrecipitationQuery::at(49.2827, -123.1207, base),
            PrecipitationQuery::at(1.0, 2.0, base + 60),
        ];

        let blob = batch_params(now, &queries).unwrap();
        assert_eq!(
            blob,
            format!(
                "37.126617,-87.842756,{};49.2827,-123.1207,{};1,2,{}",
                base - 60,
                base,
                base + 60
            )
        );
        assert_eq!(blob.split(';').count(), queries.len());
    }

    #[test]
    fn missing_times_default_to_now() {
        let now = reference_now();
        let blob = batch_params(now, &[PrecipitationQuery::new(1.0, 2.0)]).unwrap();
        assert_eq!(blob, format!("1,2,{}", now.timestamp()));
    }

    #[test]
    fn one_bad_entry_fails_the_whole_batch() {
        let now = reference_now();
        let stale = now.timestamp() - (time::PAST_WINDOW_HOURS * 3600 + 1);
        let queries = [
            PrecipitationQuery::new(1.0, 2.0),
            PrecipitationQuery::at(3.0, 4.0, stale),
            PrecipitationQuery::new(5.0, 6.0),
        ];

        match batch_params(now, &queries).unwrap_err() {
            Error::OutOfRangeTime(reported) => assert_eq!(reported, stale),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_batch_encodes_an_empty_blob() {
        assert_eq!(batch_params(reference_now(), &[]).unwrap(), "");
    }

    #[test]
    fn encoded_blob_round_trips_to_the_same_tuples() {
        let now = reference_now();
        let base = now.timestamp();
        let queries = [
            PrecipitationQuery::at(37.126617, -87.842756, base - 7200),
            PrecipitationQuery::at(-49.25, 123.5, base + 3600),
        ];

        let blob = batch_params(now, &queries).unwrap();
        let recovered = parse_blob(&blob);

        assert_eq!(recovered.len(), queries.len());
        for (query, (latitude, longitude, timestamp)) in queries.iter().zip(recovered) {
            assert_eq!(latitude, query.latitude);
            assert_eq!(longitude, query.longitude);
            assert_eq!(Some(timestamp), query.time);
        }
    }
}
