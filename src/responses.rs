//! HTTP response builders with correct status codes

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// HTTP 201 Created response
///
/// Used when a new resource has been successfully created (typically for POST
/// requests). Optionally includes a `Location` header pointing to the new
/// resource.
#[derive(Debug)]
pub struct Created<T> {
    data: T,
    location: Option<String>,
}

impl<T> Created<T> {
    /// Create a new 201 Created response
    pub fn new(data: T) -> Self {
        Self {
            data,
            location: None,
        }
    }

    /// Add a Location header pointing to the created resource
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Consume the response and return the created resource
    pub fn into_inner(self) -> T {
        self.data
    }
}

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::CREATED, Json(&self.data)).into_response();

        // Add Location header if provided
        if let Some(location) = self.location {
            if let Ok(header_value) = HeaderValue::from_str(&location) {
                response
                    .headers_mut()
                    .insert(header::LOCATION, header_value);
            }
        }

        response
    }
}

/// Success body of the form `{"message": "..."}`
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Status message
    pub message: String,
}

impl MessageResponse {
    /// Create a new message response
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
