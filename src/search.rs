//! Search criteria as typed into the form, and the request they turn into.
//!
//! [`SearchCriteria`] is raw form input. [`SearchCriteria::validate`] checks it
//! and produces a [`SearchQuery`], which is the only thing the fetcher accepts,
//! so an unchecked form can never reach the network.

use crate::error::SearchError;
use chrono::NaiveDate;
use reqwest::Url;

pub const SEARCH_PATH: &str = "kiwi";
pub const ADULTS: u32 = 1;
pub const TRAVEL_CLASS: &str = "ECONOMY";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub return_date: String,
    pub round_trip: bool,
}

/// A validated search, ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

impl SearchCriteria {
    pub fn validate(&self) -> Result<SearchQuery, SearchError> {
        let origin = self.origin.trim();
        let destination = self.destination.trim();
        let departure = self.departure_date.trim();

        if origin.is_empty() || destination.is_empty() || departure.is_empty() {
            return Err(SearchError::MissingFields);
        }

        let departure_date = parse_date("departure date", departure)?;

        // Return date only matters for round trips, and only when one was given.
        let return_date = match self.return_date.trim() {
            value if self.round_trip && !value.is_empty() => Some(parse_date("return date", value)?),
            _ => None,
        };

        Ok(SearchQuery {
            origin: origin.to_string(),
            destination: destination.to_string(),
            departure_date,
            return_date,
        })
    }
}

impl SearchQuery {
    /// Builds `<base>/kiwi?origin=..&destination=..&date=..&adults=1&travelClass=ECONOMY[&returnDate=..]`.
    pub fn to_url(&self, base: &str) -> Result<Url, SearchError> {
        let mut url = Url::parse(base).map_err(|_| SearchError::InvalidUrl(base.to_string()))?;

        url.path_segments_mut()
            .map_err(|_| SearchError::InvalidUrl(base.to_string()))?
            .pop_if_empty()
            .push(SEARCH_PATH);

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("origin", &self.origin)
                .append_pair("destination", &self.destination)
                .append_pair("date", &self.departure_date.format(DATE_FORMAT).to_string())
                .append_pair("adults", &ADULTS.to_string())
                .append_pair("travelClass", TRAVEL_CLASS);
            if let Some(ret) = self.return_date {
                query.append_pair("returnDate", &ret.format(DATE_FORMAT).to_string());
            }
        }

        Ok(url)
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, SearchError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| SearchError::InvalidDate {
        field,
        value: value.to_string(),
    })
}
