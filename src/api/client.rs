//
//  imgur-album-upload
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the Imgur API
//!
//! This module provides the blocking HTTP client used to talk to Imgur.
//! It handles authentication headers, routing through the marketplace proxy,
//! and unwrapping of the `{success, status, data}` response envelope.
//!
//! ## Features
//!
//! - One persistent session per client, reused for every request
//! - `Client-ID` or `Bearer` authorization, never both
//! - Optional `X-Mashape-Key` proxy header with proxied base URL
//! - Structured [`ApiError`] for rejected requests
//! - Binary multipart uploads, with base64 kept for legacy callers

use std::path::Path;

use base64::prelude::*;
use reqwest::blocking::{multipart, Client};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::{ApiError, ClientError};
use super::types::{Album, AlbumOptions, ApiResponse, Image, ImageEncoding, UploadOptions};
use super::ImageHost;
use crate::config::Credentials;

/// Header carrying the marketplace proxy key.
pub const PROXY_KEY_HEADER: &str = "x-mashape-key";

/// Direct API root.
pub const DIRECT_API_ROOT: &str = "https://api.imgur.com/3/";

/// API root when routed through the marketplace proxy.
pub const PROXIED_API_ROOT: &str = "https://imgur-apiv3.p.mashape.com/3/";

/// Form fields owned by [`ImgurClient::upload_image`]; extra metadata may not replace them.
const RESERVED_UPLOAD_FIELDS: [&str; 3] = ["image", "album", "type"];

/// The pair of API roots a client chooses between.
///
/// The proxied root is used when the credentials carry a proxy key,
/// the direct root otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRoots {
    pub direct: String,
    pub proxied: String,
}

impl Default for ApiRoots {
    fn default() -> Self {
        Self {
            direct: DIRECT_API_ROOT.to_string(),
            proxied: PROXIED_API_ROOT.to_string(),
        }
    }
}

/// Body of a request made through [`ImgurClient::request`].
#[derive(Debug, Default)]
pub enum RequestBody {
    /// No body at all.
    #[default]
    Empty,
    /// `application/x-www-form-urlencoded` fields.
    Form(Vec<(String, String)>),
    /// `multipart/form-data`, used for file uploads.
    Multipart(multipart::Form),
}

/// The `User-Agent` sent with every request.
pub fn user_agent() -> String {
    format!("{}/{}", crate::APP_NAME, crate::VERSION)
}

/// Builds the headers attached to every request.
///
/// The `Authorization` header carries `Bearer <token>` when an access token
/// is present and `Client-ID <id>` otherwise. Exactly one value is ever set.
///
/// # Errors
///
/// Returns [`ClientError::InvalidCredentials`] if a credential contains
/// characters that are not allowed in an HTTP header.
///
/// # Example
///
/// ```rust
/// use imgur_album_upload::api::auth_headers;
/// use imgur_album_upload::config::Credentials;
/// use reqwest::header::AUTHORIZATION;
///
/// let headers = auth_headers(&Credentials::new("abc").with_access_token("tok"))?;
/// assert_eq!(headers[AUTHORIZATION], "Bearer tok");
/// # Ok::<(), imgur_album_upload::api::ClientError>(())
/// ```
pub fn auth_headers(credentials: &Credentials) -> Result<HeaderMap, ClientError> {
    let mut headers = HeaderMap::new();

    let authorization = match &credentials.access_token {
        Some(token) => format!("Bearer {}", token),
        None => format!("Client-ID {}", credentials.client_id),
    };
    headers.insert(AUTHORIZATION, sensitive_value("authorization", &authorization)?);

    if let Some(key) = &credentials.proxy_key {
        headers.insert(
            HeaderName::from_static(PROXY_KEY_HEADER),
            sensitive_value(PROXY_KEY_HEADER, key)?,
        );
    }

    Ok(headers)
}

fn sensitive_value(name: &'static str, value: &str) -> Result<HeaderValue, ClientError> {
    let mut value =
        HeaderValue::from_str(value).map_err(|_| ClientError::InvalidCredentials(name))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Picks a MIME type for an image part from its leading bytes.
pub fn content_type(bytes: &[u8]) -> &'static str {
    infer::get(bytes)
        .map(|kind| kind.mime_type())
        .unwrap_or("application/octet-stream")
}

/// Unwraps the response envelope.
///
/// The body is always parsed first; only then is success decided. A
/// `success: false` envelope or a non-2xx status becomes an [`ApiError`].
fn parse_response(status: StatusCode, body: &str) -> Result<Value, ClientError> {
    let envelope: ApiResponse = serde_json::from_str(body).map_err(|source| {
        ClientError::Decode {
            status: status.as_u16(),
            source,
        }
    })?;

    if !envelope.success || !status.is_success() {
        return Err(ApiError::from_payload(&envelope.data, status).into());
    }

    Ok(envelope.data)
}

/// The main HTTP client for the Imgur API.
///
/// Holds one reqwest session configured from [`Credentials`] at
/// construction. The base URL is fixed for the client's lifetime.
///
/// # Example
///
/// ```rust,no_run
/// use imgur_album_upload::api::ImgurClient;
/// use imgur_album_upload::config::Credentials;
///
/// let client = ImgurClient::new(&Credentials::new("my-client-id"))?;
/// let album = client.create_album()?;
/// println!("Created album {}", album.id);
/// # Ok::<(), imgur_album_upload::api::ClientError>(())
/// ```
pub struct ImgurClient {
    /// The underlying HTTP session
    http: Client,
    /// Root every endpoint is appended to
    base_url: String,
}

impl ImgurClient {
    /// Creates a client against the public Imgur API roots.
    pub fn new(credentials: &Credentials) -> Result<Self, ClientError> {
        Self::with_roots(credentials, &ApiRoots::default())
    }

    /// Creates a client against the given API roots.
    ///
    /// Useful for tests and for deployments behind a different gateway.
    pub fn with_roots(credentials: &Credentials, roots: &ApiRoots) -> Result<Self, ClientError> {
        let base_url = if credentials.is_proxied() {
            roots.proxied.clone()
        } else {
            roots.direct.clone()
        };

        let http = Client::builder()
            .user_agent(user_agent())
            .default_headers(auth_headers(credentials)?)
            .build()?;

        tracing::debug!("Using API root {}", base_url);

        Ok(Self { http, base_url })
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn execute(
        &self,
        method: Method,
        endpoint: &str,
        body: RequestBody,
    ) -> Result<(StatusCode, Value), ClientError> {
        let url = self.url(endpoint);
        tracing::debug!("{} {}", method, url);

        let request = self.http.request(method, &url);
        let request = match body {
            RequestBody::Empty => request,
            RequestBody::Form(fields) => request.form(&fields),
            RequestBody::Multipart(form) => request.multipart(form),
        };

        let response = request.send()?;
        let status = response.status();
        let text = response.text()?;
        tracing::debug!("{} returned {}", url, status);

        Ok((status, parse_response(status, &text)?))
    }

    fn execute_as<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: RequestBody,
    ) -> Result<T, ClientError> {
        let (status, data) = self.execute(method, endpoint, body)?;
        serde_json::from_value(data).map_err(|source| ClientError::Decode {
            status: status.as_u16(),
            source,
        })
    }

    /// Issues one request to `base_url + endpoint` and returns the `data` payload.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] if the service reports `success: false` or a non-2xx status
    /// - [`ClientError::Decode`] if the body is not JSON
    /// - [`ClientError::Http`] on transport failure
    pub fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: RequestBody,
    ) -> Result<Value, ClientError> {
        self.execute(method, endpoint, body).map(|(_, data)| data)
    }

    /// Makes a GET request to the specified endpoint.
    pub fn get(&self, endpoint: &str) -> Result<Value, ClientError> {
        self.request(Method::GET, endpoint, RequestBody::Empty)
    }

    /// Makes a POST request to the specified endpoint.
    pub fn post(&self, endpoint: &str, body: RequestBody) -> Result<Value, ClientError> {
        self.request(Method::POST, endpoint, body)
    }

    /// Creates an empty album. No request body is sent.
    pub fn create_album(&self) -> Result<Album, ClientError> {
        self.create_album_with(&AlbumOptions::default())
    }

    /// Creates an album with an optional title and description.
    pub fn create_album_with(&self, options: &AlbumOptions) -> Result<Album, ClientError> {
        let fields = options.fields();
        let body = if fields.is_empty() {
            RequestBody::Empty
        } else {
            RequestBody::Form(fields)
        };

        let album: Album = self.execute_as(Method::POST, "album", body)?;
        tracing::info!("Created album {}", album.id);
        Ok(album)
    }

    /// Uploads one image file into an album.
    ///
    /// The file is read in full immediately before the request and its
    /// handle is released before sending. With [`ImageEncoding::Binary`] the
    /// bytes go out as the `image` multipart file part; the legacy
    /// [`ImageEncoding::Base64`] sends them as base64 text instead.
    ///
    /// An accepted upload whose payload has no `id` is reported as
    /// [`ClientError::Decode`], even though the service stored the image.
    pub fn upload_image(&self, path: &Path, options: &UploadOptions) -> Result<Image, ClientError> {
        let bytes = std::fs::read(path).map_err(|source| ClientError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        let mut form = multipart::Form::new()
            .text("album", options.album_id.clone())
            .text("type", options.encoding.as_field());

        form = match options.encoding {
            ImageEncoding::Binary => {
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "image".to_string());
                let mime = content_type(&bytes);
                let part = multipart::Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(mime)?;
                form.part("image", part)
            }
            ImageEncoding::Base64 => form.text("image", BASE64_STANDARD.encode(&bytes)),
        };

        for (key, value) in &options.extra_metadata {
            if RESERVED_UPLOAD_FIELDS.contains(&key.as_str()) {
                tracing::warn!("Ignoring reserved upload field '{}'", key);
                continue;
            }
            form = form.text(key.clone(), value.clone());
        }

        self.execute_as(Method::POST, "image", RequestBody::Multipart(form))
    }
}

impl ImageHost for ImgurClient {
    fn create_album(&self, options: &AlbumOptions) -> Result<Album, ClientError> {
        self.create_album_with(options)
    }

    fn upload_image(&self, path: &Path, options: &UploadOptions) -> Result<Image, ClientError> {
        ImgurClient::upload_image(self, path, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const ALBUM_BODY: &str =
        r#"{"data":{"id":"alb123","deletehash":"dh"},"success":true,"status":200}"#;
    const IMAGE_BODY: &str = r#"{"data":{"id":"img1","link":"https://i.imgur.com/img1.jpg","type":"image/jpeg"},"success":true,"status":200}"#;

    fn roots(server: &mockito::Server) -> ApiRoots {
        ApiRoots {
            direct: format!("{}/3/", server.url()),
            proxied: format!("{}/proxy/3/", server.url()),
        }
    }

    #[test]
    fn test_client_id_header() {
        let headers = auth_headers(&Credentials::new("abc")).unwrap();
        assert_eq!(headers[AUTHORIZATION], "Client-ID abc");
        assert!(headers.get(PROXY_KEY_HEADER).is_none());
    }

    #[test]
    fn test_bearer_replaces_client_id() {
        let headers = auth_headers(&Credentials::new("abc").with_access_token("tok")).unwrap();
        let values: Vec<_> = headers.get_all(AUTHORIZATION).iter().collect();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0], "Bearer tok");
    }

    #[test]
    fn test_proxy_header() {
        let headers = auth_headers(&Credentials::new("abc").with_proxy_key("pk")).unwrap();
        assert_eq!(headers[PROXY_KEY_HEADER], "pk");
        assert_eq!(headers[AUTHORIZATION], "Client-ID abc");
    }

    #[test]
    fn test_invalid_header_value() {
        let err = auth_headers(&Credentials::new("bad\nid")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidCredentials("authorization")));
    }

    #[test]
    fn test_base_url_selection() {
        let roots = ApiRoots::default();
        let direct = ImgurClient::with_roots(&Credentials::new("abc"), &roots).unwrap();
        assert_eq!(direct.base_url(), DIRECT_API_ROOT);

        let proxied =
            ImgurClient::with_roots(&Credentials::new("abc").with_proxy_key("pk"), &roots).unwrap();
        assert_eq!(proxied.base_url(), PROXIED_API_ROOT);
    }

    #[test]
    fn test_url_joining() {
        let client = ImgurClient::new(&Credentials::new("abc")).unwrap();
        assert_eq!(client.url("album"), "https://api.imgur.com/3/album");
        assert_eq!(client.url("/image"), "https://api.imgur.com/3/image");
    }

    #[test]
    fn test_user_agent() {
        assert_eq!(user_agent(), format!("album-upload/{}", crate::VERSION));
    }

    #[test]
    fn test_content_type() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        assert_eq!(content_type(&png), "image/png");
        assert_eq!(content_type(b"plain text"), "application/octet-stream");
    }

    #[test]
    fn test_create_album_sends_client_id() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/3/album")
            .match_header("authorization", "Client-ID abc")
            .match_header(PROXY_KEY_HEADER, Matcher::Missing)
            .match_header("user-agent", user_agent().as_str())
            .with_header("content-type", "application/json")
            .with_body(ALBUM_BODY)
            .create();

        let client = ImgurClient::with_roots(&Credentials::new("abc"), &roots(&server)).unwrap();
        let album = client.create_album().unwrap();

        mock.assert();
        assert_eq!(album.id, "alb123");
        assert_eq!(album.deletehash.as_deref(), Some("dh"));
    }

    #[test]
    fn test_create_album_with_title() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/3/album")
            .match_body(Matcher::UrlEncoded("title".into(), "Holiday".into()))
            .with_body(ALBUM_BODY)
            .create();

        let client = ImgurClient::with_roots(&Credentials::new("abc"), &roots(&server)).unwrap();
        let options = AlbumOptions {
            title: Some("Holiday".to_string()),
            description: None,
        };
        client.create_album_with(&options).unwrap();
        mock.assert();
    }

    #[test]
    fn test_bearer_token_header_sent() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/3/album")
            .match_header("authorization", "Bearer tok")
            .with_body(ALBUM_BODY)
            .create();

        let creds = Credentials::new("abc").with_access_token("tok");
        let client = ImgurClient::with_roots(&creds, &roots(&server)).unwrap();
        client.create_album().unwrap();
        mock.assert();
    }

    #[test]
    fn test_proxy_routing() {
        let mut server = mockito::Server::new();
        let direct = server.mock("POST", "/3/album").expect(0).create();
        let proxied = server
            .mock("POST", "/proxy/3/album")
            .match_header(PROXY_KEY_HEADER, "pk")
            .with_body(ALBUM_BODY)
            .create();

        let creds = Credentials::new("abc").with_proxy_key("pk");
        let client = ImgurClient::with_roots(&creds, &roots(&server)).unwrap();
        client.create_album().unwrap();

        proxied.assert();
        direct.assert();
    }

    #[test]
    fn test_api_error_from_failed_response() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/3/album")
            .with_status(403)
            .with_body(r#"{"data":{"error":"Invalid client_id","request":"/3/album","method":"POST"},"success":false,"status":403}"#)
            .create();

        let client = ImgurClient::with_roots(&Credentials::new("abc"), &roots(&server)).unwrap();
        let err = client.create_album().unwrap_err();

        assert_eq!(err.as_api(), Some(&ApiError::new("Invalid client_id", 403)));
    }

    #[test]
    fn test_success_false_with_ok_status() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/3/account/me")
            .with_body(r#"{"data":{"error":"Nope"},"success":false,"status":200}"#)
            .create();

        let client = ImgurClient::with_roots(&Credentials::new("abc"), &roots(&server)).unwrap();
        let err = client.get("account/me").unwrap_err();
        assert_eq!(err.as_api().map(|e| e.message.as_str()), Some("Nope"));
    }

    #[test]
    fn test_malformed_body() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/3/album")
            .with_status(502)
            .with_body("<html>Bad Gateway</html>")
            .create();

        let client = ImgurClient::with_roots(&Credentials::new("abc"), &roots(&server)).unwrap();
        let err = client.create_album().unwrap_err();
        assert!(matches!(err, ClientError::Decode { status: 502, .. }));
    }

    #[test]
    fn test_get_passthrough() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/3/credits")
            .with_body(r#"{"data":{"UserRemaining":500},"success":true,"status":200}"#)
            .create();

        let client = ImgurClient::with_roots(&Credentials::new("abc"), &roots(&server)).unwrap();
        let data = client.get("credits").unwrap();

        mock.assert();
        assert_eq!(data["UserRemaining"], 500);
    }

    #[test]
    fn test_upload_image_binary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.jpg");
        std::fs::write(&path, b"fake image bytes").unwrap();

        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/3/image")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data".to_string()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="album"\r\n\r\nalb123\r\n"#.to_string()),
                Matcher::Regex(r#"name="type"\r\n\r\nbinary\r\n"#.to_string()),
                Matcher::Regex(r#"name="image"; filename="a.jpg""#.to_string()),
                Matcher::Regex(r#"name="title"\r\n\r\nBeach\r\n"#.to_string()),
                Matcher::Regex("fake image bytes".to_string()),
            ]))
            .with_body(IMAGE_BODY)
            .create();

        let client = ImgurClient::with_roots(&Credentials::new("abc"), &roots(&server)).unwrap();
        let options = UploadOptions::new("alb123").with_metadata("title", "Beach");
        let image = client.upload_image(&path, &options).unwrap();

        mock.assert();
        assert_eq!(image.id, "img1");
    }

    #[test]
    fn test_upload_image_base64() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.jpg");
        std::fs::write(&path, b"hello").unwrap();

        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/3/image")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="type"\r\n\r\nbase64\r\n"#.to_string()),
                Matcher::Regex(r#"name="image"\r\n\r\naGVsbG8=\r\n"#.to_string()),
            ]))
            .with_body(IMAGE_BODY)
            .create();

        let client = ImgurClient::with_roots(&Credentials::new("abc"), &roots(&server)).unwrap();
        let options = UploadOptions::new("alb123").with_encoding(ImageEncoding::Base64);
        client.upload_image(&path, &options).unwrap();
        mock.assert();
    }

    #[test]
    fn test_reserved_metadata_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.jpg");
        std::fs::write(&path, b"bytes").unwrap();

        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/3/image")
            .match_body(Matcher::Regex(r#"name="album"\r\n\r\nalb123\r\n"#.to_string()))
            .with_body(IMAGE_BODY)
            .create();

        let client = ImgurClient::with_roots(&Credentials::new("abc"), &roots(&server)).unwrap();
        let options = UploadOptions::new("alb123").with_metadata("album", "other");
        client.upload_image(&path, &options).unwrap();
        mock.assert();
    }

    #[test]
    fn test_upload_tolerates_odd_image_details() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.jpg");
        std::fs::write(&path, b"bytes").unwrap();

        let mut server = mockito::Server::new();
        server
            .mock("POST", "/3/image")
            .with_body(r#"{"data": {"id": "img1", "width": "n/a", "size": null}, "success": true, "status": 200}"#)
            .create();

        let client = ImgurClient::with_roots(&Credentials::new("abc"), &roots(&server)).unwrap();
        let image = client.upload_image(&path, &UploadOptions::new("alb")).unwrap();
        assert_eq!(image.id, "img1");
        assert!(image.width.is_none());
    }

    #[test]
    fn test_upload_missing_file() {
        let server = mockito::Server::new();
        let client = ImgurClient::with_roots(&Credentials::new("abc"), &roots(&server)).unwrap();
        let err = client
            .upload_image(Path::new("/does/not/exist.jpg"), &UploadOptions::new("alb"))
            .unwrap_err();
        assert!(matches!(err, ClientError::ReadFile { .. }));
    }
}
