pub mod endpoint;
pub mod error;
pub mod response;

use crate::model;
pub use error::Error;
use response::get_status::parse_status;
use response::get_system::parse_system;
use std::time::Duration;

pub const API_URL: &str = "https://pvoutput.org/service/r2";

const API_KEY_HEADER: &str = "X-Pvoutput-Apikey";
const SYSTEM_ID_HEADER: &str = "X-Pvoutput-SystemId";
const NO_STATUS: &str = "No status found";
const TIMEOUT: Duration = Duration::from_secs(10);

pub fn api(api_url: String, api_key: String, system_id: String) -> Result<model::Api, Error> {
    let client = reqwest::ClientBuilder::new()
        .timeout(TIMEOUT)
        .build()
        .or(Err(Error::InternalError))?;

    Ok(model::Api {
        api_url,
        api_key,
        system_id,
        client,
    })
}

/// Map non-2xx API response to Error. PVOutput reports the reason as plain text in the body,
/// e.g. `Forbidden 403: Exceeded 60 requests per hour`.
fn map_response_status(status: http::StatusCode, body: String) -> Result<String, Error> {
    if status.is_success() {
        return Ok(body);
    }

    let message = body.trim().to_string();
    match status {
        http::StatusCode::UNAUTHORIZED => Err(Error::LoginError(message)),
        http::StatusCode::FORBIDDEN => Err(Error::RateExceeded(message)),
        http::StatusCode::BAD_REQUEST if message.contains(NO_STATUS) => {
            Err(Error::NoData(message))
        }
        _ => Err(Error::ApiError(format!("{}: {}", status, message))),
    }
}

async fn get(api: &model::Api, endpoint: &endpoint::Endpoint) -> Result<String, Error> {
    let url = format!("{}{}", api.api_url, endpoint);

    let response = api
        .client
        .get(url)
        .header(API_KEY_HEADER, api.api_key.to_owned())
        .header(SYSTEM_ID_HEADER, api.system_id.to_owned())
        .send()
        .await
        .map_err(|e| Error::ApiError(e.to_string()))?;

    let status = response.status();
    let response_text = response
        .text()
        .await
        .map_err(|e| Error::ApiError(format!("Error reading API response: {}", e)))?;

    log::trace!(
        "endpoint: {}, status: {}, response_text: {}",
        endpoint,
        status,
        response_text
    );

    map_response_status(status, response_text)
}

/// Read the latest status of the configured system.
pub async fn status(api: &model::Api) -> Result<model::Status, Error> {
    get(api, endpoint::STATUS)
        .await
        .and_then(|body| parse_status(&body))
}

/// Read the static description of the configured system.
pub async fn system(api: &model::Api) -> Result<model::System, Error> {
    get(api, endpoint::SYSTEM)
        .await
        .and_then(|body| parse_system(&body))
}

#[cfg(test)]
mod test {
    use super::Error;
    use mockito::Server;

    fn api(url: String) -> crate::model::Api {
        super::api(url, String::from("secret"), String::from("12345")).unwrap()
    }

    #[tokio::test]
    async fn status_sends_credentials() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/getstatus.jsp")
            .match_header("x-pvoutput-apikey", "secret")
            .match_header("x-pvoutput-systemid", "12345")
            .with_status(200)
            .with_body("20221029,14:35,6547,1782,3142,421,1.637,23.4,238.6\n")
            .create_async()
            .await;

        let status = super::status(&api(server.url())).await.unwrap();

        assert_eq!(Some(3142), status.energy_consumption);
        assert_eq!(Some(238.6), status.voltage);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn system_reads_metadata() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/getsystem.jsp")
            .with_status(200)
            .with_body("Garage,3000,3000,12,250,LG,1,3000,Fronius,S,30,No,20200101,NaN,NaN,10")
            .create_async()
            .await;

        let system = super::system(&api(server.url())).await.unwrap();

        assert_eq!("Garage", system.system_name);
        assert_eq!(Some(String::from("Fronius")), system.inverter_brand);
        assert_eq!(None, system.latitude);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unauthorized() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/getsystem.jsp")
            .with_status(401)
            .with_body("Unauthorized 401: Invalid API Key")
            .create_async()
            .await;

        let result = super::system(&api(server.url())).await;
        assert!(matches!(result, Err(Error::LoginError(_))));
    }

    #[tokio::test]
    async fn rate_exceeded() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/getstatus.jsp")
            .with_status(403)
            .with_body("Forbidden 403: Exceeded 60 requests per hour")
            .create_async()
            .await;

        match super::status(&api(server.url())).await {
            Err(Error::RateExceeded(message)) => {
                assert_eq!("Forbidden 403: Exceeded 60 requests per hour", message)
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn no_status() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/getstatus.jsp")
            .with_status(400)
            .with_body("Bad request 400: No status found")
            .create_async()
            .await;

        let result = super::status(&api(server.url())).await;
        assert!(matches!(result, Err(Error::NoData(_))));
    }

    #[tokio::test]
    async fn other_bad_request() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/getstatus.jsp")
            .with_status(400)
            .with_body("Bad request 400: Invalid System ID")
            .create_async()
            .await;

        let result = super::status(&api(server.url())).await;
        assert!(matches!(result, Err(Error::ApiError(_))));
    }

    #[tokio::test]
    async fn unparseable_body() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/getstatus.jsp")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let result = super::status(&api(server.url())).await;
        assert!(matches!(result, Err(Error::InvalidResponse(_, _))));
    }
}
