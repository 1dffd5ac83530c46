//! Alert headers read by the front end to show success and failure messages.
//!
//! Success: `X-<app>-alert: <app>.<entity>.<action>` and `X-<app>-params: <id>`.
//! Failure: `X-<app>-error: error.<key>` and `X-<app>-params: <entity>`.

use http::{HeaderMap, HeaderName, HeaderValue};

pub const APPLICATION_NAME: &str = "monAppelOffreApp";

const ALERT_HEADER: &str = "x-monappeloffreapp-alert";
const ERROR_HEADER: &str = "x-monappeloffreapp-error";
const PARAMS_HEADER: &str = "x-monappeloffreapp-params";

fn headers(pairs: [(&'static str, String); 2]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in pairs {
        match HeaderValue::from_str(&value) {
            Ok(value) => {
                headers.insert(HeaderName::from_static(name), value);
            }
            Err(_) => tracing::warn!(%name, %value, "dropping invalid alert header"),
        }
    }

    headers
}

fn alert(message: String, param: String) -> HeaderMap {
    headers([(ALERT_HEADER, message), (PARAMS_HEADER, param)])
}

pub fn entity_creation_alert(entity_name: &str, param: impl ToString) -> HeaderMap {
    alert(
        format!("{APPLICATION_NAME}.{entity_name}.created"),
        param.to_string(),
    )
}

pub fn entity_update_alert(entity_name: &str, param: impl ToString) -> HeaderMap {
    alert(
        format!("{APPLICATION_NAME}.{entity_name}.updated"),
        param.to_string(),
    )
}

pub fn entity_deletion_alert(entity_name: &str, param: impl ToString) -> HeaderMap {
    alert(
        format!("{APPLICATION_NAME}.{entity_name}.deleted"),
        param.to_string(),
    )
}

pub fn failure_alert(entity_name: &str, error_key: &str) -> HeaderMap {
    headers([
        (ERROR_HEADER, format!("error.{error_key}")),
        (PARAMS_HEADER, entity_name.to_string()),
    ])
}
