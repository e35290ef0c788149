use serde::{Deserialize, Serialize};

pub const AADHAAR_LENGTH: usize = 12;
pub const OTP_LENGTH: usize = 6;
pub const PHONE_MAX_LENGTH: usize = 10;

pub const CONNECTION_ERROR_MESSAGE: &str = "Error connecting to server. Please try again.";
pub const INVALID_OTP_MESSAGE: &str = "Invalid OTP. Please try again.";
pub const REGISTRATION_FAILED_MESSAGE: &str = "Registration failed";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum RegistrationStep {
    #[default]
    AadhaarEntry,
    OtpEntry,
    BiometricCapture,
    Complete,
}

impl RegistrationStep {
    pub const COUNT: u8 = 4;

    /// 1-based position shown to the user.
    pub fn number(self) -> u8 {
        match self {
            RegistrationStep::AadhaarEntry => 1,
            RegistrationStep::OtpEntry => 2,
            RegistrationStep::BiometricCapture => 3,
            RegistrationStep::Complete => 4,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            RegistrationStep::AadhaarEntry => "Aadhaar Verification",
            RegistrationStep::OtpEntry => "OTP Verification",
            RegistrationStep::BiometricCapture => "Fingerprint Scan",
            RegistrationStep::Complete => "Registration Complete",
        }
    }

    pub fn next(self) -> Self {
        match self {
            RegistrationStep::AadhaarEntry => RegistrationStep::OtpEntry,
            RegistrationStep::OtpEntry => RegistrationStep::BiometricCapture,
            RegistrationStep::BiometricCapture => RegistrationStep::Complete,
            RegistrationStep::Complete => RegistrationStep::Complete, // Terminal
        }
    }

    pub fn progress_percentage(self) -> u8 {
        self.number() * 25
    }
}

/// Keeps ASCII digits only, capped at `max_len`.
pub fn sanitize_digits(input: &str, max_len: usize) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(max_len)
        .collect()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NoticeKind {
    /// The service declined the request and said why
    Rejected,
    /// No usable response came back
    Connection,
    InvalidOtp,
}

/// Blocking notification shown until the user dismisses it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Rejected,
            message: message.into(),
        }
    }

    pub fn connection() -> Self {
        Self {
            kind: NoticeKind::Connection,
            message: CONNECTION_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn invalid_otp() -> Self {
        Self {
            kind: NoticeKind::InvalidOtp,
            message: INVALID_OTP_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApplicantDetails {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardState {
    // Current workflow position
    pub step: RegistrationStep,

    // Collected fields
    pub aadhaar_id: String,
    pub otp: String,
    pub applicant: ApplicantDetails,

    // Fingerprint simulation
    pub is_scanning: bool,
    pub scan_complete: bool,

    // UI state
    pub is_loading: bool,
    pub can_submit: bool,
    pub progress_percentage: u8,
    pub notice: Option<Notice>,

    // Session
    pub session_id: String,
    pub completed_at: Option<String>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            step: RegistrationStep::default(),
            aadhaar_id: String::new(),
            otp: String::new(),
            applicant: ApplicantDetails::default(),
            is_scanning: false,
            scan_complete: false,
            is_loading: false,
            can_submit: false,
            progress_percentage: RegistrationStep::default().progress_percentage(),
            notice: None,
            session_id: uuid::Uuid::new_v4().to_string(),
            completed_at: None,
        }
    }
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_aadhaar(&mut self, input: &str) {
        self.aadhaar_id = sanitize_digits(input, AADHAAR_LENGTH);
    }

    pub fn set_otp(&mut self, input: &str) {
        self.otp = sanitize_digits(input, OTP_LENGTH);
    }

    pub fn set_phone(&mut self, input: &str) {
        self.applicant.phone = sanitize_digits(input, PHONE_MAX_LENGTH);
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    pub fn has_notice(&self) -> bool {
        self.notice.is_some()
    }

    pub fn aadhaar_ready(&self) -> bool {
        self.aadhaar_id.len() == AADHAAR_LENGTH
    }

    pub fn otp_ready(&self) -> bool {
        self.otp.len() == OTP_LENGTH
    }

    /// Input guard for the current step, ignoring in-flight requests.
    pub fn step_input_ready(&self) -> bool {
        match self.step {
            RegistrationStep::AadhaarEntry => self.aadhaar_ready(),
            RegistrationStep::OtpEntry => self.otp_ready(),
            RegistrationStep::BiometricCapture => !self.is_scanning && !self.scan_complete,
            RegistrationStep::Complete => true,
        }
    }

    pub fn update_progress(&mut self) {
        self.progress_percentage = self.step.progress_percentage();
    }
}

/// The OTP overlay shown after a successful registration request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OtpModalState {
    pub otp: String,
    pub message: String,
    pub visible: bool,
}

impl OtpModalState {
    pub fn shown(otp: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            otp: otp.into(),
            message: message.into(),
            visible: true,
        }
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
    }
}
