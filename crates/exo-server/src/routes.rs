//! Request routing, independent of the HTTP transport.

use serde::Serialize;
use serde_json::{Map, Value, json};

/// Fields echoed by `POST /routes/Habitability`.
pub const HABITABILITY_FIELDS: [&str; 15] = [
    "distance",
    "oxygen",
    "nitrogen",
    "temp",
    "size",
    "mass",
    "radius",
    "orbitalPeriod",
    "StellarMass",
    "StellarRadius",
    "ETemp",
    "SystemAge",
    "atmosphericthickness",
    "magneticfield",
    "carbon",
];

/// Fields returned by `POST /routes/PlanetData`.
pub const PLANET_DATA_FIELDS: [&str; 10] = [
    "name",
    "mass",
    "radius",
    "orbitalp",
    "temp",
    "atmosphere",
    "magneticfield",
    "oxygen",
    "carbon",
    "nitrogen",
];

const REQUIRED_PLANET_FIELDS: [&str; 3] = ["name", "mass", "radius"];

#[derive(Debug, Clone, PartialEq)]
pub struct RouteResponse {
    pub status: u16,
    pub body: Value,
}

impl RouteResponse {
    fn json(status: u16, body: impl Serialize) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self { status, body },
            Err(e) => Self::error(500, format!("Error{e}")),
        }
    }

    fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": message.into() }),
        }
    }
}

/// Dispatch one request. `body` is the raw request body.
pub fn route(method: &str, url: &str, body: &str) -> RouteResponse {
    let path = url.split('?').next().unwrap_or(url);
    match (method, path) {
        ("POST", "/routes/Habitability") => with_json(body, habitability),
        ("POST", "/routes/PlanetData") => with_json(body, planet_data),
        _ => RouteResponse::error(404, "Not Found"),
    }
}

fn with_json(body: &str, handler: fn(&Map<String, Value>) -> RouteResponse) -> RouteResponse {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(fields)) => handler(&fields),
        // Non-object JSON carries no fields.
        Ok(_) => handler(&Map::new()),
        Err(e) => RouteResponse::error(400, format!("Malformed JSON: {e}")),
    }
}

/// Copy the listed fields that are present; absent ones are left out.
fn pick(fields: &Map<String, Value>, keys: &[&str]) -> Map<String, Value> {
    keys.iter()
        .filter_map(|key| fields.get(*key).map(|v| (key.to_string(), v.clone())))
        .collect()
}

/// Missing, null, false, zero and empty string do not count as present.
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

fn habitability(fields: &Map<String, Value>) -> RouteResponse {
    RouteResponse::json(201, pick(fields, &HABITABILITY_FIELDS))
}

fn planet_data(fields: &Map<String, Value>) -> RouteResponse {
    if !REQUIRED_PLANET_FIELDS
        .iter()
        .all(|key| is_present(fields.get(*key)))
    {
        return RouteResponse::error(400, "Missing required fields");
    }
    RouteResponse::json(201, json!({ "data": pick(fields, &PLANET_DATA_FIELDS) }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_habitability_echoes_known_fields() {
        let response = route(
            "POST",
            "/routes/Habitability",
            r#"{"distance":1.2,"oxygen":21,"ETemp":255,"favouriteColor":"teal"}"#,
        );
        assert_eq!(response.status, 201);
        assert_eq!(response.body, json!({"distance":1.2,"oxygen":21,"ETemp":255}));
    }

    #[test]
    fn test_planet_data_requires_name_mass_radius() {
        let response = route("POST", "/routes/PlanetData", r#"{"name":"X","mass":1}"#);
        assert_eq!(response.status, 400);
        assert_eq!(response.body, json!({"error":"Missing required fields"}));

        let zero_mass = route(
            "POST",
            "/routes/PlanetData",
            r#"{"name":"X","mass":0,"radius":1}"#,
        );
        assert_eq!(zero_mass.status, 400);
    }

    #[test]
    fn test_planet_data_wraps_in_data() {
        let response = route(
            "POST",
            "/routes/PlanetData",
            r#"{"name":"Nova","mass":2,"radius":1.1,"temp":300,"ignored":1}"#,
        );
        assert_eq!(response.status, 201);
        assert_eq!(
            response.body,
            json!({"data":{"name":"Nova","mass":2,"radius":1.1,"temp":300}})
        );
    }

    #[test]
    fn test_malformed_json_is_400() {
        let response = route("POST", "/routes/Habitability", "{not json");
        assert_eq!(response.status, 400);
        assert!(response.body["error"].as_str().unwrap().starts_with("Malformed JSON"));
    }

    #[test]
    fn test_non_object_body_has_no_fields() {
        assert_eq!(route("POST", "/routes/Habitability", "[1,2]").body, json!({}));
        assert_eq!(route("POST", "/routes/PlanetData", "null").status, 400);
    }

    #[test]
    fn test_unknown_route_and_wrong_method_are_404() {
        assert_eq!(route("POST", "/routes/Nope", "{}").status, 404);
        assert_eq!(route("GET", "/routes/Habitability", "").status, 404);
    }

    #[test]
    fn test_query_string_is_ignored() {
        assert_eq!(route("POST", "/routes/Habitability?x=1", "{}").status, 201);
    }
}
