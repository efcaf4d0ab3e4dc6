//! Transport-neutral response produced by the router.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Text,
    Json,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Text => "text/plain;charset=UTF-8",
            ContentType::Json => "application/json",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: ContentType,
    pub body: String,
}

impl ApiResponse {
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: ContentType::Text,
            body: body.into(),
        }
    }

    pub fn json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: ContentType::Json,
            body: body.into(),
        }
    }

    pub fn ok() -> Self {
        Self::text(200, "OK")
    }

    pub fn bad_request(body: impl Into<String>) -> Self {
        Self::text(400, body)
    }

    pub fn not_found() -> Self {
        Self::text(404, "Not Found")
    }

    pub fn method_not_allowed() -> Self {
        Self::text(405, "Method not allowed")
    }

    pub fn internal_error() -> Self {
        Self::text(500, "Internal Server Error")
    }
}
