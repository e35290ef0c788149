pub mod actions;
pub mod client;
pub mod manager;
pub mod pending;
pub mod scan;
pub mod state;


pub use actions::RegistrationAction;
pub use client::{VoterApi, VoterClient};
pub use manager::RegistrationManager;
pub use state::{
    ApplicantDetails, Notice, NoticeKind, OtpModalState, RegistrationStep, WizardState,
};

// Re-export for convenience
pub mod prelude {
    pub use super::actions::RegistrationAction;
    pub use super::client::{
        OtpVerificationResponse, RegisterRequest, RegistrationResponse, VerifyOtpRequest,
        VoterApi, VoterClient,
    };
    pub use super::manager::RegistrationManager;
    pub use super::pending::PendingCall;
    pub use super::scan::{ScanEvent, ScanSchedule, ScanTimer};
    pub use super::state::{
        ApplicantDetails, Notice, NoticeKind, OtpModalState, RegistrationStep, WizardState,
    };
}
