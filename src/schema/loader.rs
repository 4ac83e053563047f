//! Startup fetch of the schema document from the configuration endpoint.

use std::time::Duration;

use super::{FormSchema, SchemaError};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// One-shot remote loader for the schema document.
pub struct SchemaLoader {
    client: reqwest::Client,
    url: String,
}

impl SchemaLoader {
    pub fn new(url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!("courrier-form/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create reqwest client");
        Self {
            client,
            url: url.into(),
        }
    }

    /// Fetch and parse the schema. Any failure here is fatal to the
    /// application; callers surface it once and block interaction.
    pub async fn load(&self) -> Result<FormSchema, SchemaError> {
        log::info!("loading schema configuration from {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(SchemaError::Fetch)?
            .error_for_status()
            .map_err(SchemaError::Fetch)?;

        // Parse separately from the fetch so a reachable endpoint with a
        // malformed document reports `Parse`, not `Fetch`.
        let raw = response.text().await.map_err(SchemaError::Fetch)?;
        let schema = FormSchema::from_json_str(&raw)?;

        log::info!(
            "schema loaded: {} templates, {} common variables",
            schema.templates.len(),
            schema.common_variables.len()
        );
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One-shot server answering 200 with the given body, then closing.
    fn stub_server(body: &'static str) -> std::net::SocketAddr {
        use std::io::{Read, Write};

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });
        addr
    }

    #[tokio::test]
    async fn test_valid_remote_schema_loads() {
        let addr = stub_server(r#"{ "templates": { "conge": { "displayName": "Demande de congé" } } }"#);
        let loader = SchemaLoader::new(format!("http://{addr}/config"));
        let schema = loader.load().await.unwrap();
        assert_eq!(schema.templates.len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_remote_schema_is_a_parse_error() {
        let addr = stub_server("{ not json");
        let loader = SchemaLoader::new(format!("http://{addr}/config"));
        let error = loader.load().await.unwrap_err();
        assert!(matches!(error, SchemaError::Parse(_)), "got {error:?}");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_fetch_error() {
        // Bind then drop, so the port refuses connections.
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let loader = SchemaLoader::new(format!("http://{addr}/config"));
        let error = loader.load().await.unwrap_err();
        assert!(matches!(error, SchemaError::Fetch(_)), "got {error:?}");
    }
}
