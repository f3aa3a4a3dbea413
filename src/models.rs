use chrono::DateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use std::collections::HashMap;

pub const NOT_AVAILABLE: &str = "N/A";
pub const UNKNOWN_AIRLINE: &str = "Unknown Airline";
pub const PRICE_SYMBOL: &str = "₹";

/// A carrier entry. Null or non-string fields decode as `None` so one bad
/// entry can't sink the whole response; such entries never reach the lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Carrier {
    #[serde(default, deserialize_with = "string_or_none")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub name: Option<String>,
}

/// One entry of the search endpoint's flight list. Fields we don't render are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FlightRecord {
    // Kept as raw values: only string codes can match a carrier.
    #[serde(default)]
    pub airlines: Option<Vec<Value>>,
    #[serde(rename = "dTimeUTC", default)]
    pub departure_utc: Option<Number>,
    #[serde(rename = "aTimeUTC", default)]
    pub arrival_utc: Option<Number>,
    #[serde(default)]
    pub price: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub flights: Option<Vec<FlightRecord>>,
    #[serde(default)]
    pub data: Option<Vec<FlightRecord>>,
    #[serde(default)]
    pub carriers: Option<Vec<Carrier>>,
}

impl SearchResponse {
    /// `flights` wins over `data`; a response with neither has no flights.
    pub fn flight_list(&self) -> &[FlightRecord] {
        self.flights
            .as_deref()
            .or(self.data.as_deref())
            .unwrap_or_default()
    }

    pub fn carrier_list(&self) -> &[Carrier] {
        self.carriers.as_deref().unwrap_or_default()
    }
}

/// Carrier code to display name, valid for one response only.
#[derive(Debug, Default)]
pub struct CarrierLookup {
    names: HashMap<String, String>,
}

impl CarrierLookup {
    pub fn from_carriers(carriers: &[Carrier]) -> Self {
        let names = carriers
            .iter()
            .filter_map(|c| Some((c.code.clone()?, c.name.clone()?)))
            .collect();
        Self { names }
    }

    pub fn name(&self, code: &str) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }
}

/// Display-ready summary of a single flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightCard {
    pub airline: String,
    pub departure: String,
    pub arrival: String,
    pub price: String,
}

impl FlightCard {
    pub fn from_record(flight: &FlightRecord, lookup: &CarrierLookup) -> Self {
        let airline = match flight.airlines.as_ref().and_then(|codes| codes.first()) {
            Some(code) => code
                .as_str()
                .and_then(|code| lookup.name(code))
                .unwrap_or(UNKNOWN_AIRLINE)
                .to_string(),
            None => NOT_AVAILABLE.to_string(),
        };

        Self {
            airline,
            departure: format_clock(flight.departure_utc.as_ref()),
            arrival: format_clock(flight.arrival_utc.as_ref()),
            price: format_price(flight.price.as_ref()),
        }
    }
}

/// Maps every flight in the response to a card, keeping the response order.
pub fn build_cards(response: &SearchResponse) -> Vec<FlightCard> {
    let lookup = CarrierLookup::from_carriers(response.carrier_list());
    response
        .flight_list()
        .iter()
        .map(|flight| FlightCard::from_record(flight, &lookup))
        .collect()
}

/// Epoch seconds to 24-hour `HH:MM` (UTC).
pub fn format_clock(epoch_secs: Option<&Number>) -> String {
    let secs = epoch_secs.and_then(|n| n.as_i64().or_else(|| n.as_f64().map(|f| f.floor() as i64)));

    secs.and_then(|s| DateTime::from_timestamp(s, 0))
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

pub fn format_price(price: Option<&Value>) -> String {
    match price {
        None | Some(Value::Null) => NOT_AVAILABLE.to_string(),
        Some(Value::String(s)) => format!("{}{}", PRICE_SYMBOL, s),
        Some(other) => format!("{}{}", PRICE_SYMBOL, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> SearchResponse {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn renders_single_flight_with_known_carrier() {
        let response = parse(json!({
            "flights": [{"airlines": ["AA"], "dTimeUTC": 0, "aTimeUTC": 3600, "price": 100}],
            "carriers": [{"code": "AA", "name": "American"}]
        }));

        let cards = build_cards(&response);
        assert_eq!(
            cards,
            vec![FlightCard {
                airline: "American".into(),
                departure: "00:00".into(),
                arrival: "01:00".into(),
                price: "₹100".into(),
            }]
        );
    }

    #[test]
    fn missing_airlines_field_is_not_available() {
        let response = parse(json!({
            "flights": [{"dTimeUTC": 0, "price": 50}],
            "carriers": [{"code": "AA", "name": "American"}]
        }));
        assert_eq!(build_cards(&response)[0].airline, "N/A");
    }

    #[test]
    fn empty_airlines_list_is_not_available() {
        let response = parse(json!({"flights": [{"airlines": []}]}));
        assert_eq!(build_cards(&response)[0].airline, "N/A");
    }

    #[test]
    fn unmatched_code_is_unknown_airline() {
        let response = parse(json!({
            "flights": [{"airlines": ["ZZ"]}],
            "carriers": [{"code": "AA", "name": "American"}]
        }));
        assert_eq!(build_cards(&response)[0].airline, "Unknown Airline");
    }

    #[test]
    fn missing_carriers_makes_every_code_unknown() {
        let response = parse(json!({"flights": [{"airlines": ["AA"]}]}));
        assert_eq!(build_cards(&response)[0].airline, "Unknown Airline");
    }

    #[test]
    fn absent_times_and_price_are_not_available() {
        let response = parse(json!({"flights": [{"airlines": ["AA"]}]}));
        let card = &build_cards(&response)[0];
        assert_eq!(card.departure, "N/A");
        assert_eq!(card.arrival, "N/A");
        assert_eq!(card.price, "N/A");
    }

    #[test]
    fn null_fields_behave_like_absent_ones() {
        let response = parse(json!({
            "flights": [{"airlines": null, "dTimeUTC": null, "price": null}]
        }));
        let card = &build_cards(&response)[0];
        assert_eq!(card.airline, "N/A");
        assert_eq!(card.departure, "N/A");
        assert_eq!(card.price, "N/A");
    }

    #[test]
    fn data_field_is_used_when_flights_is_absent() {
        let response = parse(json!({
            "data": [{"airlines": ["BA"], "dTimeUTC": 45_000, "price": 2500}],
            "carriers": [{"code": "BA", "name": "British Airways"}]
        }));
        let cards = build_cards(&response);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].airline, "British Airways");
        assert_eq!(cards[0].departure, "12:30");
        assert_eq!(cards[0].price, "₹2500");
    }

    #[test]
    fn flights_field_is_preferred_over_data() {
        let response = parse(json!({
            "flights": [],
            "data": [{"airlines": ["AA"]}]
        }));
        assert!(build_cards(&response).is_empty());
    }

    #[test]
    fn empty_lists_produce_no_cards() {
        assert!(build_cards(&parse(json!({"flights": [], "carriers": []}))).is_empty());
        assert!(build_cards(&parse(json!({"data": []}))).is_empty());
        assert!(build_cards(&parse(json!({}))).is_empty());
        assert!(parse(json!({})).carrier_list().is_empty());
    }

    #[test]
    fn cards_keep_input_order() {
        let response = parse(json!({
            "flights": [
                {"airlines": ["UA"], "price": 3},
                {"airlines": ["AA"], "price": 1},
                {"airlines": ["DL"], "price": 2}
            ],
            "carriers": [
                {"code": "AA", "name": "American"},
                {"code": "DL", "name": "Delta"},
                {"code": "UA", "name": "United"}
            ]
        }));
        let airlines: Vec<_> = build_cards(&response).into_iter().map(|c| c.airline).collect();
        assert_eq!(airlines, ["United", "American", "Delta"]);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let response = parse(json!({
            "flights": [{"airlines": ["AA"], "flyFrom": "DEL", "route": [{"id": 1}]}],
            "carriers": [{"code": "AA", "name": "American", "logo": "aa.png"}],
            "currency": "INR"
        }));
        assert_eq!(build_cards(&response)[0].airline, "American");
    }

    #[test]
    fn fractional_values_are_handled() {
        let response = parse(json!({
            "flights": [{"dTimeUTC": 3599.9, "price": 99.5}]
        }));
        let card = &build_cards(&response)[0];
        assert_eq!(card.departure, "00:59");
        assert_eq!(card.price, "₹99.5");
    }

    #[test]
    fn times_wrap_to_24_hour_clock() {
        let late = Number::from(1_700_000_000_i64); // 2023-11-14 22:13:20 UTC
        assert_eq!(format_clock(Some(&late)), "22:13");
    }

    #[test]
    fn later_duplicate_carrier_wins() {
        let response = parse(json!({
            "carriers": [
                {"code": "AA", "name": "Old"},
                {"code": "AA", "name": "American"}
            ]
        }));
        let lookup = CarrierLookup::from_carriers(response.carrier_list());
        assert_eq!(lookup.name("AA"), Some("American"));
    }

    #[test]
    fn null_carrier_code_is_skipped() {
        let response = parse(json!({
            "flights": [{"airlines": ["AA"], "price": 100}],
            "carriers": [
                {"code": null, "name": "X"},
                {"code": "AA", "name": "American"}
            ]
        }));
        let cards = build_cards(&response);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].airline, "American");
        assert_eq!(cards[0].price, "₹100");
    }

    #[test]
    fn null_carrier_name_leaves_code_unknown() {
        let response = parse(json!({
            "flights": [{"airlines": ["AA"]}],
            "carriers": [{"code": "AA", "name": null}]
        }));
        assert_eq!(build_cards(&response)[0].airline, "Unknown Airline");
    }

    #[test]
    fn non_string_carrier_fields_are_skipped() {
        let response = parse(json!({
            "flights": [{"airlines": ["7"]}, {"airlines": ["BA"]}],
            "carriers": [
                {"code": 7, "name": "Numeric"},
                {"code": "BA", "name": ["British Airways"]}
            ]
        }));
        let airlines: Vec<_> = build_cards(&response).into_iter().map(|c| c.airline).collect();
        assert_eq!(airlines, ["Unknown Airline", "Unknown Airline"]);
    }

    #[test]
    fn numeric_airline_code_is_unknown_airline() {
        let response = parse(json!({
            "flights": [{"airlines": [42], "price": 10}],
            "carriers": [{"code": "42", "name": "Forty Two"}]
        }));
        let card = &build_cards(&response)[0];
        assert_eq!(card.airline, "Unknown Airline");
        assert_eq!(card.price, "₹10");
    }

    #[test]
    fn null_airline_code_is_unknown_airline() {
        let response = parse(json!({"flights": [{"airlines": [null, "AA"]}]}));
        assert_eq!(build_cards(&response)[0].airline, "Unknown Airline");
    }
}
