#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationAction {
    // Field edits
    EditAadhaar { input: String },
    EditName { input: String },
    EditPhone { input: String },
    EditOtp { input: String },

    // Step transitions
    SubmitAadhaar,
    SubmitOtp,
    StartScan,

    // Overlays
    DismissOtpModal,
    DismissNotice,

    // Exit and teardown
    Finish,
    Reset,
}

impl RegistrationAction {
    pub fn description(&self) -> &'static str {
        match self {
            RegistrationAction::EditAadhaar { .. } => "Editing Aadhaar number",
            RegistrationAction::EditName { .. } => "Editing applicant name",
            RegistrationAction::EditPhone { .. } => "Editing applicant phone",
            RegistrationAction::EditOtp { .. } => "Editing OTP",
            RegistrationAction::SubmitAadhaar => "Submitting Aadhaar for registration",
            RegistrationAction::SubmitOtp => "Submitting OTP for verification",
            RegistrationAction::StartScan => "Starting fingerprint scan",
            RegistrationAction::DismissOtpModal => "Dismissing OTP display",
            RegistrationAction::DismissNotice => "Dismissing notification",
            RegistrationAction::Finish => "Leaving registration",
            RegistrationAction::Reset => "Resetting registration",
        }
    }

    pub fn requires_network(&self) -> bool {
        match self {
            RegistrationAction::SubmitAadhaar | RegistrationAction::SubmitOtp => true,

            RegistrationAction::EditAadhaar { .. }
            | RegistrationAction::EditName { .. }
            | RegistrationAction::EditPhone { .. }
            | RegistrationAction::EditOtp { .. }
            | RegistrationAction::StartScan
            | RegistrationAction::DismissOtpModal
            | RegistrationAction::DismissNotice
            | RegistrationAction::Finish
            | RegistrationAction::Reset => false,
        }
    }
}
