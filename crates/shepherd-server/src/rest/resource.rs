//! REST resource contract and request/response types

use async_trait::async_trait;
use rocket::http::Status;
use rocket::response::{self, Responder, status::Custom};
use rocket::serde::json::Json;
use rocket::Request;
use serde::Serialize;
use serde_json::{Value, json};
use shepherd_domain::error::{Error, Result};

/// HTTP methods a resource can serve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl RestMethod {
    /// Methods routed by the mount
    pub const ALL: [RestMethod; 4] = [Self::Get, Self::Post, Self::Put, Self::Delete];

    /// The matching Rocket method
    pub fn as_rocket(self) -> rocket::http::Method {
        match self {
            Self::Get => rocket::http::Method::Get,
            Self::Post => rocket::http::Method::Post,
            Self::Put => rocket::http::Method::Put,
            Self::Delete => rocket::http::Method::Delete,
        }
    }

    /// The method of a Rocket request, if routed
    pub fn from_rocket(method: rocket::http::Method) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_rocket() == method)
    }
}

/// A request handed to a resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestRequest {
    /// Request method
    pub method: RestMethod,
    /// Path below the resource's base path, without leading slash
    pub path: String,
    /// Raw query string
    pub query: Option<String>,
    /// Request body
    pub body: Vec<u8>,
}

impl RestRequest {
    /// Bodiless request for `path`
    pub fn new(method: RestMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            body: Vec::new(),
        }
    }

    /// Attach a body
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }
}

/// JSON response produced by a resource or the dispatcher
#[derive(Debug, Clone, PartialEq)]
pub struct RestResponse {
    /// HTTP status
    pub status: Status,
    /// JSON body
    pub body: Value,
}

impl RestResponse {
    /// `200 OK` with a serialized body
    pub fn ok<T: Serialize>(body: &T) -> Result<Self> {
        Ok(Self {
            status: Status::Ok,
            body: serde_json::to_value(body)?,
        })
    }

    /// Error body `{"error": message}` with `status`
    pub fn error(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": message.into() }),
        }
    }

    /// `404 Not Found`
    pub fn not_found(path: &str) -> Self {
        Self::error(Status::NotFound, format!("no resource serves {path}"))
    }

    /// `405 Method Not Allowed`
    pub fn method_not_allowed(method: RestMethod, path: &str) -> Self {
        Self::error(
            Status::MethodNotAllowed,
            format!("{method:?} is not supported by {path}"),
        )
    }

    /// Response for an error returned by a resource
    pub fn from_error(err: &Error) -> Self {
        let status = match err {
            Error::NotFound { .. } => Status::NotFound,
            Error::InvalidArgument { .. } | Error::Json { .. } => Status::BadRequest,
            _ => Status::InternalServerError,
        };
        Self::error(status, err.to_string())
    }
}

impl<'r> Responder<'r, 'static> for RestResponse {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        Custom(self.status, Json(self.body)).respond_to(request)
    }
}

/// A handler served under a base path of a mount
///
/// Resources are constructed through the capability registry, so their
/// scope (singleton or transient) is that of their registration.
#[async_trait]
pub trait RestResource: Send + Sync {
    /// Methods this resource serves
    fn methods(&self) -> &[RestMethod] {
        &[RestMethod::Get]
    }

    /// Handle a request whose method is one of [`methods`](Self::methods)
    async fn handle(&self, request: RestRequest) -> Result<RestResponse>;
}
