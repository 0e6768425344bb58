use crate::{Client, FromMap, TwilioError};
use base64::prelude::*;
use headers::{HeaderMapExt, Host};
use hmac::{Hmac, Mac};
use http_body_util::BodyExt;
use http::request::Parts;
use hyper::{
    body::{Body, Bytes},
    Method, Request,
};
use sha1::Sha1;
use std::collections::BTreeMap;

fn args_from_urlencoded(enc: &[u8]) -> BTreeMap<String, String> {
    url::form_urlencoded::parse(enc).into_owned().collect()
}

fn signing_mac(auth_token: &str, url: &str, post_args: &BTreeMap<String, String>) -> Hmac<Sha1> {
    let mut mac = Hmac::<Sha1>::new_from_slice(auth_token.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(url.as_bytes());
    for (k, v) in post_args {
        mac.update(k.as_bytes());
        mac.update(v.as_bytes());
    }
    mac
}

/// Computes the base64 `X-Twilio-Signature` for a webhook sent to `url`
/// with the given POST arguments (empty for GET).
pub fn webhook_signature(auth_token: &str, url: &str, post_args: &BTreeMap<String, String>) -> String {
    let digest = signing_mac(auth_token, url, post_args)
        .finalize()
        .into_bytes();
    BASE64_STANDARD.encode(digest)
}

impl Client {
    pub async fn parse_request<B, T: FromMap>(&self, req: Request<B>) -> Result<T, TwilioError>
    where
        B: Body<Data = Bytes>,
    {
        let (parts, body) = req.into_parts();
        let body = body
            .collect()
            .await
            .map_err(|_| TwilioError::BadRequest)?
            .to_bytes();

        let query = parts.uri.query().unwrap_or_default();
        let (args, post_args) = match parts.method {
            Method::GET => (args_from_urlencoded(query.as_bytes()), BTreeMap::new()),
            Method::POST => {
                let post_args = args_from_urlencoded(&body);
                (post_args.clone(), post_args)
            }
            _ => return Err(TwilioError::BadRequest),
        };

        if self.verify_signatures {
            self.verify_signature(&parts, &post_args)?;
        }

        T::from_map(args)
    }

    fn verify_signature(
        &self,
        parts: &Parts,
        post_args: &BTreeMap<String, String>,
    ) -> Result<(), TwilioError> {
        let expected = parts
            .headers
            .get("X-Twilio-Signature")
            .ok_or(TwilioError::AuthError)
            .and_then(|d| {
                BASE64_STANDARD
                    .decode(d.as_bytes())
                    .map_err(|_| TwilioError::BadRequest)
            })?;

        let host = match parts.headers.typed_get::<Host>() {
            None => return Err(TwilioError::BadRequest),
            Some(h) => match h.port() {
                Some(port) => format!("{}:{}", h.hostname(), port),
                None => h.hostname().to_string(),
            },
        };
        let request_path = match parts.uri.path_and_query() {
            Some(p) if p.path() != "*" => p.as_str(),
            _ => return Err(TwilioError::BadRequest),
        };

        let effective_uri = format!("https://{host}{request_path}");
        signing_mac(&self.auth_token, &effective_uri, post_args)
            .verify_slice(&expected)
            .map_err(|_| TwilioError::AuthError)
    }
}
