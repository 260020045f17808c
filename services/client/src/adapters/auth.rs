//! services/client/src/adapters/auth.rs
//!
//! Concrete implementation of the `AuthApi` port over the HTTP gateway.
//! Owns the backend's user payload shape and converts it into the domain.

use async_trait::async_trait;
use codelab_core::domain::{NewUser, Role, UserProfile};
use codelab_core::ports::{AuthApi, PortResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::adapters::gateway::HttpGateway;

/// An auth adapter that implements the `AuthApi` port.
#[derive(Clone)]
pub struct HttpAuthAdapter {
    gateway: Arc<HttpGateway>,
}

impl HttpAuthAdapter {
    pub fn new(gateway: Arc<HttpGateway>) -> Self {
        Self { gateway }
    }
}

//=========================================================================================
// "Impure" Wire Structs
//=========================================================================================

#[derive(Deserialize)]
pub(crate) struct UserWire {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub prn: Option<String>,
    #[serde(default, rename = "rollNo")]
    pub roll_no: Option<String>,
}

impl UserWire {
    pub(crate) fn to_domain(self) -> UserProfile {
        UserProfile {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            role: self.role,
            prn: self.prn,
            roll_no: self.roll_no,
        }
    }
}

/// Endpoints returning a user wrap it one level deeper: `data: { user }`.
#[derive(Deserialize)]
struct UserData {
    user: UserWire,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterBody<'a> {
    #[serde(rename = "firstName")]
    first_name: &'a str,
    #[serde(rename = "lastName")]
    last_name: &'a str,
    email: &'a str,
    password: &'a str,
    role: Role,
    prn: Option<&'a str>,
    #[serde(rename = "rollNo")]
    roll_no: Option<&'a str>,
}

//=========================================================================================
// `AuthApi` Trait Implementation
//=========================================================================================

#[async_trait]
impl AuthApi for HttpAuthAdapter {
    async fn login(&self, email: &str, password: &str) -> PortResult<UserProfile> {
        let data: UserData = self
            .gateway
            .post("/api/v1/users/login", &LoginBody { email, password })
            .await?;
        Ok(data.user.to_domain())
    }

    async fn register(&self, new_user: &NewUser) -> PortResult<()> {
        let body = RegisterBody {
            first_name: &new_user.first_name,
            last_name: &new_user.last_name,
            email: &new_user.email,
            password: &new_user.password,
            role: new_user.role,
            prn: new_user.prn.as_deref(),
            roll_no: new_user.roll_no.as_deref(),
        };
        self.gateway.post_unit("/api/v1/users/register", &body).await
    }

    async fn logout(&self) -> PortResult<()> {
        self.gateway.post_empty("/api/v1/users/logout").await
    }

    async fn current_user(&self) -> PortResult<UserProfile> {
        let data: UserData = self.gateway.get("/api/v1/users/me").await?;
        Ok(data.user.to_domain())
    }

    async fn user_by_id(&self, user_id: &str) -> PortResult<UserProfile> {
        let data: UserData = self
            .gateway
            .get(&format!("/api/v1/users/{}", user_id))
            .await?;
        Ok(data.user.to_domain())
    }
}
