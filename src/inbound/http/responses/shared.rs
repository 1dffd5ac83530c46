use crate::inbound::http::responses::alert::{
    entity_creation_alert, entity_deletion_alert, entity_update_alert,
};
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use http::header::LOCATION;
use serde::Serialize;

/// `201 Created` with a `Location` of `<collection_path>/<id>` and creation alert headers.
pub fn created<T: Serialize>(
    entity_name: &str,
    collection_path: &str,
    id: i64,
    body: T,
) -> Response {
    (
        StatusCode::CREATED,
        [(LOCATION, format!("{collection_path}/{id}"))],
        entity_creation_alert(entity_name, id),
        Json(body),
    )
        .into_response()
}

pub fn updated<T: Serialize>(entity_name: &str, id: i64, body: T) -> Response {
    (StatusCode::OK, entity_update_alert(entity_name, id), Json(body)).into_response()
}

pub fn deleted(entity_name: &str, id: i64) -> Response {
    (StatusCode::OK, entity_deletion_alert(entity_name, id)).into_response()
}

/// Serde adapter for dates as `YYYY-MM-DD`.
pub mod iso_date {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;
    use time::macros::format_description;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let text = date
            .format(format_description!("[year]-[month]-[day]"))
            .map_err(serde::ser::Error::custom)?;

        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let text = String::deserialize(deserializer)?;

        Date::parse(&text, format_description!("[year]-[month]-[day]"))
            .map_err(serde::de::Error::custom)
    }

    pub mod option {
        use serde::{Deserialize, Deserializer};
        use time::Date;

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Date>, D::Error> {
            #[derive(Deserialize)]
            struct Wrapper(#[serde(with = "super")] Date);

            let value = Option::<Wrapper>::deserialize(deserializer)?;

            Ok(value.map(|Wrapper(date)| date))
        }
    }
}
