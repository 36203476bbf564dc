use crate::error::Result;
use std::time::Duration;

/// Minimal response surface the pipeline needs: a status code and a body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking HTTP capability used by the GitHub and URL fetchers. The
/// pipeline is synchronous per fetch invocation, so requests block.
pub trait HttpClient: Send + Sync {
    fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse>;
}

/// Production client backed by reqwest.
pub struct ReqwestClient {
    inner: reqwest::blocking::Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self> {
        let inner = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { inner })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse> {
        log::debug!("GET {}", url);
        let mut request = self.inner.get(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        log::trace!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::error::AppError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Records every request and serves canned responses keyed by URL.
    pub struct MockHttpClient {
        responses: HashMap<String, HttpResponse>,
        pub calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
        fail_unknown: bool,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self {
                responses: HashMap::new(),
                calls: Mutex::new(Vec::new()),
                fail_unknown: false,
            }
        }

        pub fn respond(mut self, url: &str, status: u16, body: &str) -> Self {
            self.responses.insert(
                url.to_string(),
                HttpResponse {
                    status,
                    body: body.to_string(),
                },
            );
            self
        }

        /// Unknown URLs produce a transport error instead of a 404.
        pub fn failing_unknown(mut self) -> Self {
            self.fail_unknown = true;
            self
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl HttpClient for MockHttpClient {
        fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse> {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_string(), headers.to_vec()));
            match self.responses.get(url) {
                Some(response) => Ok(response.clone()),
                None if self.fail_unknown => {
                    Err(AppError::Http(format!("connection refused: {url}")))
                }
                None => Ok(HttpResponse {
                    status: 404,
                    body: "not found".to_string(),
                }),
            }
        }
    }
}
