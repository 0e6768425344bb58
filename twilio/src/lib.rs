mod call;
mod recording;
pub mod twiml;
mod webhook;

pub use call::{CallEvent, CallStatus, RecordingEvent};
pub use recording::{media_url, RecordingPage, RecordingResource};
pub use webhook::webhook_signature;
use headers::HeaderMapExt;
use hyper::body::{Body, Bytes};
use hyper::Response;
use reqwest::{Client as ReqwestClient, Method, StatusCode};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// Host of the Twilio REST API.
pub const API_HOST: &str = "https://api.twilio.com";

#[derive(Clone)]
pub struct Client {
    account_id: String,
    auth_token: String,
    api_host: String,
    verify_signatures: bool,
    client: ReqwestClient,
}

#[derive(Debug)]
pub enum TwilioError {
    ReqwestError(reqwest::Error),
    HTTPError(StatusCode),
    ParsingError,
    AuthError,
    BadRequest,
}

impl Display for TwilioError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            TwilioError::ReqwestError(ref e) => e.fmt(f),
            TwilioError::HTTPError(ref s) => write!(f, "Invalid HTTP status code: {}", s),
            TwilioError::ParsingError => f.write_str("Parsing error"),
            TwilioError::AuthError => {
                f.write_str("Missing or invalid `X-Twilio-Signature` header in request")
            }
            TwilioError::BadRequest => f.write_str("Bad request"),
        }
    }
}

impl Error for TwilioError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            TwilioError::ReqwestError(ref e) => Some(e),
            _ => None,
        }
    }
}

/// Builds a webhook payload from the form arguments Twilio sent.
pub trait FromMap: Sized {
    fn from_map(m: BTreeMap<String, String>) -> Result<Self, TwilioError>;
}

impl Client {
    pub fn new(account_id: &str, auth_token: &str) -> Client {
        Client {
            account_id: account_id.to_string(),
            auth_token: auth_token.to_string(),
            api_host: API_HOST.to_string(),
            verify_signatures: false,
            client: ReqwestClient::new(),
        }
    }

    /// Points the client at another API host, e.g. a local stub.
    pub fn with_api_host(mut self, api_host: &str) -> Client {
        self.api_host = api_host.trim_end_matches('/').to_string();
        self
    }

    /// Reject webhooks whose `X-Twilio-Signature` does not match.
    pub fn with_signature_verification(mut self, enabled: bool) -> Client {
        self.verify_signatures = enabled;
        self
    }

    async fn send_request<T>(
        &self,
        method: Method,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, TwilioError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = &format!(
            "{}/2010-04-01/Accounts/{}/{}.json",
            self.api_host, self.account_id, endpoint
        );

        let request = self
            .client
            .request(method.clone(), url)
            .basic_auth(&self.account_id, Some(&self.auth_token));

        let request = match method {
            Method::GET => request.query(&params),
            _ => request.form(&params),
        };

        let response = request.send().await.map_err(TwilioError::ReqwestError)?;

        match response.status() {
            StatusCode::CREATED | StatusCode::OK => {}
            other => {
                let content = response.text().await.unwrap_or_default();
                log::error!("Twilio request to {endpoint} failed with {other}: {content}");

                return Err(TwilioError::HTTPError(other));
            }
        };

        response
            .json::<T>()
            .await
            .map_err(|_| TwilioError::ParsingError)
    }

    /// Parses the webhook into `T`, runs `logic` and answers with its TwiML.
    pub async fn respond_to_webhook<B, T: FromMap, F>(
        &self,
        req: hyper::Request<B>,
        logic: F,
    ) -> Response<String>
    where
        B: Body<Data = Bytes>,
        F: FnOnce(T) -> twiml::Twiml,
    {
        let o = match self.parse_request::<B, T>(req).await {
            Ok(obj) => obj,
            Err(e) => {
                log::warn!("Rejected webhook: {e}");
                let status = match e {
                    TwilioError::AuthError => StatusCode::FORBIDDEN,
                    _ => StatusCode::BAD_REQUEST,
                };
                let mut res = Response::new(e.to_string());
                *res.status_mut() = status;
                return res;
            }
        };

        let twiml = logic(o).as_twiml();
        let mut res = Response::new(twiml);
        res.headers_mut().typed_insert(headers::ContentType::xml());
        res
    }
}
