use crate::config::ApiConfig;
use crate::errors::FetchError;
use crate::geo::BoundingBox;
use crate::models::{AircraftState, OpenSkyResponse};
use crate::search::AircraftSource;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("overhead-tui/", env!("CARGO_PKG_VERSION"));

/// OpenSky `states/all` client.
pub struct FlightProvider {
    client: Client,
    base_url: String,
    credentials: Option<(String, String)>,
}

impl Default for FlightProvider {
    fn default() -> Self {
        Self::new(&ApiConfig::default())
    }
}

impl FlightProvider {
    pub fn new(config: &ApiConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|e| {
                warn!("Could not build configured HTTP client ({}), using defaults", e);
                Client::new()
            });

        let credentials = match (&config.username, &config.password) {
            (Some(user), Some(pass)) => Some((user.clone(), pass.clone())),
            _ => None,
        };

        Self {
            client,
            base_url: config.base_url.clone(),
            credentials,
        }
    }

    /// Query parameters for `bbox`, eight fractional digits each.
    pub fn query_params(bbox: &BoundingBox) -> [(&'static str, String); 4] {
        [
            ("lamin", format!("{:.8}", bbox.lat_min)),
            ("lomin", format!("{:.8}", bbox.lon_min)),
            ("lamax", format!("{:.8}", bbox.lat_max)),
            ("lomax", format!("{:.8}", bbox.lon_max)),
        ]
    }

    pub async fn fetch_in_box(
        &self,
        bbox: &BoundingBox,
    ) -> Result<Option<Vec<AircraftState>>, FetchError> {
        let mut request = self
            .client
            .get(&self.base_url)
            .query(&Self::query_params(bbox));
        if let Some((user, pass)) = &self.credentials {
            request = request.basic_auth(user, Some(pass));
        }

        let res = request.send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = res.text().await?;
        let parsed: OpenSkyResponse = serde_json::from_str(&body)?;
        let states = parsed.into_states();
        debug!(
            "OpenSky returned {} state vector(s)",
            states.as_ref().map_or(0, Vec::len)
        );
        Ok(states)
    }
}

impl AircraftSource for FlightProvider {
    fn fetch_states(
        &self,
        bbox: &BoundingBox,
    ) -> impl Future<Output = Result<Option<Vec<AircraftState>>, FetchError>> + Send {
        self.fetch_in_box(bbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answers a single HTTP request with `status` and `body`, handing back the
    /// request line that was received.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (FlightProvider, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            let head = String::from_utf8_lossy(&head).to_string();
            head.lines().next().unwrap_or_default().to_string()
        });

        let provider = FlightProvider::new(&ApiConfig {
            base_url: format!("http://{}/api/states/all", addr),
            timeout_seconds: 5,
            ..Default::default()
        });
        (provider, handle)
    }

    fn dulles_box() -> BoundingBox {
        BoundingBox {
            lat_min: 37.5,
            lat_max: 39.5,
            lon_min: -78.2,
            lon_max: -76.2,
        }
    }

    #[test]
    fn params_use_eight_decimals() {
        let bbox = BoundingBox {
            lat_min: 37.5,
            lat_max: 39.5,
            lon_min: -78.2,
            lon_max: -76.2,
        };
        let params = FlightProvider::query_params(&bbox);
        assert_eq!(params[0], ("lamin", "37.50000000".to_string()));
        assert_eq!(params[1], ("lomin", "-78.20000000".to_string()));
        assert_eq!(params[2], ("lamax", "39.50000000".to_string()));
        assert_eq!(params[3], ("lomax", "-76.20000000".to_string()));
    }

    #[tokio::test]
    async fn bounding_box_goes_on_the_wire() {
        let (provider, server) = serve_once("200 OK", r#"{"time":1,"states":[]}"#).await;

        let states = provider.fetch_in_box(&dulles_box()).await.unwrap();
        assert_eq!(states, Some(vec![]));

        let request_line = server.await.unwrap();
        assert!(request_line.starts_with("GET /api/states/all?"), "{request_line}");
        for param in [
            "lamin=37.50000000",
            "lomin=-78.20000000",
            "lamax=39.50000000",
            "lomax=-76.20000000",
        ] {
            assert!(request_line.contains(param), "{param} missing from {request_line}");
        }
    }

    #[tokio::test]
    async fn state_vectors_are_decoded() {
        let body = r#"{"time":1700000000,"states":[
            ["a1b2c3","UAL123  ","United States",1700000000,1700000000,-77.1,38.6,10000.0,false,230.5,90.0,0.0,null,10500.0,"7700",false,0]
        ]}"#;
        let (provider, server) = serve_once("200 OK", body).await;

        let states = provider.fetch_in_box(&dulles_box()).await.unwrap().unwrap();
        server.await.unwrap();

        assert_eq!(states.len(), 1);
        assert_eq!(states[0].icao24, "a1b2c3");
        assert_eq!(states[0].squawk.as_deref(), Some("7700"));
        assert_eq!(states[0].latitude, Some(38.6));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let (provider, server) = serve_once("503 Service Unavailable", "").await;

        let err = provider.fetch_in_box(&dulles_box()).await.unwrap_err();
        server.await.unwrap();
        assert!(matches!(err, FetchError::Status(503)), "{err:?}");
    }

    #[tokio::test]
    async fn non_json_body_is_a_decode_error() {
        let (provider, server) = serve_once("200 OK", "not json").await;

        let err = provider.fetch_in_box(&dulles_box()).await.unwrap_err();
        server.await.unwrap();
        assert!(matches!(err, FetchError::Decode(_)), "{err:?}");
    }

    #[tokio::test]
    async fn null_or_missing_states_mean_no_list() {
        for body in [r#"{"time":1,"states":null}"#, r#"{"time":1}"#] {
            let (provider, server) = serve_once("200 OK", body).await;

            let states = provider.fetch_in_box(&dulles_box()).await.unwrap();
            server.await.unwrap();
            assert_eq!(states, None, "{body}");
        }
    }
}
