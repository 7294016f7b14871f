//! Who made a request and from where.

use std::{
    convert::Infallible,
    fmt::Display,
    net::{IpAddr, SocketAddr},
};

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::request::Parts,
};
/// The ID of an authenticated user.
///
/// An authentication layer in front of the category routes should insert the
/// user's ID into the request extensions, e.g. with `Extension(UserID::new(1))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the integer representation of the user ID.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The acting user and network address of the caller for a single request.
///
/// Both fields are optional: requests without an authenticated user, or
/// served without connection info, still succeed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// The authenticated user making the request, if any.
    pub user_id: Option<UserID>,
    /// The caller's IP address, if known.
    pub ip_address: Option<IpAddr>,
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts.extensions.get::<UserID>().copied();
        let ip_address = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(address)| address.ip());

        Ok(Self {
            user_id,
            ip_address,
        })
    }
}
