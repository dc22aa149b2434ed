use chrono::{DateTime, Duration, Utc};

use crate::fetch::parsing::parse_first_tle;
use crate::fetch::{ElementSet, FetchError, TleSource, TtlCache};
use crate::registry::Satellite;

/// Fetches element sets through a [`TleSource`], caching successes per catalog number.
pub struct ElementSetFetcher<S> {
    source: S,
    cache: TtlCache<u32, ElementSet>,
}

impl<S: TleSource> ElementSetFetcher<S> {
    pub fn new(source: S, ttl: Duration) -> Self {
        Self {
            source,
            cache: TtlCache::new(ttl),
        }
    }

    /// Cached element set for `norad_id`, or a fresh one from the source.
    pub async fn fetch_at(
        &mut self,
        norad_id: u32,
        now: DateTime<Utc>,
    ) -> Result<ElementSet, FetchError> {
        if let Some(cached) = self.cache.get(&norad_id, now) {
            log::debug!(
                "Using cached TLE for CATNR={} (fetched {})",
                norad_id,
                cached.fetched_at
            );
            return Ok(cached.clone());
        }

        let text = self.source.fetch_tle_text(norad_id).await?;
        let (name, line1, line2) =
            parse_first_tle(&text).ok_or(FetchError::MalformedPayload { norad_id })?;

        let element_set = ElementSet {
            norad_id,
            name,
            line1,
            line2,
            fetched_at: now,
        };
        log::info!("Fetched TLE for CATNR={}", norad_id);
        self.cache.insert(norad_id, element_set.clone(), now);

        Ok(element_set)
    }

    /// Fetch every satellite in order. Failures are returned per satellite.
    pub async fn fetch_all(
        &mut self,
        satellites: &[Satellite],
    ) -> Vec<(Satellite, Result<ElementSet, FetchError>)> {
        let now = Utc::now();
        let mut results = Vec::with_capacity(satellites.len());
        for sat in satellites {
            let result = self.fetch_at(sat.norad_id, now).await;
            results.push((sat.clone(), result));
        }
        results
    }
}
