use serde::{Deserialize, Serialize};

use super::pending::PendingCall;
use super::state::ApplicantDetails;
use crate::config::AppConfig;
use crate::http_client::{ApiError, HttpClient, Result};

pub const REGISTER_ENDPOINT: &str = "/api/voters/register";
pub const VERIFY_OTP_ENDPOINT: &str = "/api/voters/verify-otp";

// Request/Response types for the voter registration API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub aadhaar_id: String,
    pub name: String,
    pub phone: String,
    pub fingerprint_hash: String,
}

impl RegisterRequest {
    /// No fingerprint exists yet when registration is requested; the hash
    /// is sent empty.
    pub fn new(aadhaar_id: &str, applicant: &ApplicantDetails) -> Self {
        Self {
            aadhaar_id: aadhaar_id.to_string(),
            name: applicant.name.trim().to_string(),
            phone: applicant.phone.clone(),
            fingerprint_hash: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otp_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RegistrationResponse {
    /// The issued OTP, if the service accepted the registration.
    pub fn issued_otp(&self) -> Option<&str> {
        self.otp.as_deref().filter(|otp| !otp.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub aadhaar_id: String,
    pub otp: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OtpVerificationResponse {
    #[serde(default)]
    pub is_verified: bool,
}

/// Starts registration service calls without blocking the caller.
///
/// Implementations hand back a [`PendingCall`] immediately; the wizard polls
/// it on every update.
pub trait VoterApi {
    fn start_registration(&self, request: RegisterRequest) -> PendingCall<RegistrationResponse>;

    fn start_otp_verification(
        &self,
        request: VerifyOtpRequest,
    ) -> PendingCall<OtpVerificationResponse>;
}

/// Voter registration service client over HTTP
#[derive(Clone)]
pub struct VoterClient {
    http: HttpClient,
}

impl VoterClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: HttpClient::new(base_url),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            http: HttpClient::from_config(config),
        }
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// A non-2xx reply that still carries a `message` is a business
    /// rejection and is returned as a normal response.
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegistrationResponse> {
        match self.http.post_request(REGISTER_ENDPOINT, request).await {
            Err(ApiError::Status { status, body }) => {
                match serde_json::from_str::<RegistrationResponse>(&body) {
                    Ok(response) if response.message.is_some() => {
                        log::warn!("Registration declined with status {}", status);
                        Ok(response)
                    }
                    _ => Err(ApiError::Status { status, body }),
                }
            }
            other => other,
        }
    }

    /// A wrong OTP is often answered with 4xx; any reply whose body still
    /// carries `isVerified` is returned as a verdict rather than an error.
    pub async fn verify_otp(&self, request: &VerifyOtpRequest) -> Result<OtpVerificationResponse> {
        match self.http.post_request(VERIFY_OTP_ENDPOINT, request).await {
            Err(ApiError::Status { status, body }) => match verdict_from_body(&body) {
                Some(response) => {
                    log::warn!("OTP verification answered with status {}", status);
                    Ok(response)
                }
                None => Err(ApiError::Status { status, body }),
            },
            other => other,
        }
    }
}

fn verdict_from_body(body: &str) -> Option<OtpVerificationResponse> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("isVerified")?;
    serde_json::from_value(value).ok()
}

impl VoterApi for VoterClient {
    fn start_registration(&self, request: RegisterRequest) -> PendingCall<RegistrationResponse> {
        let client = self.clone();
        PendingCall::spawn("registration", async move { client.register(&request).await })
    }

    fn start_otp_verification(
        &self,
        request: VerifyOtpRequest,
    ) -> PendingCall<OtpVerificationResponse> {
        let client = self.clone();
        PendingCall::spawn("OTP verification", async move { client.verify_otp(&request).await })
    }
}
