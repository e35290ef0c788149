use std::collections::VecDeque;
use std::sync::Arc;

use super::client::{
    OtpVerificationResponse, RegisterRequest, RegistrationResponse, VerifyOtpRequest, VoterApi,
};
use super::pending::PendingCall;
use super::scan::{ScanEvent, ScanSchedule, ScanTimer};
use super::state::{
    Notice, OtpModalState, RegistrationStep, WizardState, REGISTRATION_FAILED_MESSAGE,
};
use super::RegistrationAction;
use crate::http_client;
use crate::wasm_utils;

enum InFlight {
    Registration(PendingCall<RegistrationResponse>),
    Verification(PendingCall<OtpVerificationResponse>),
}

pub struct RegistrationManager {
    // Current state - single source of truth
    state: WizardState,
    modal: OtpModalState,

    // Registration service
    api: Arc<dyn VoterApi>,

    // Action queue for sequential processing
    pending_actions: VecDeque<RegistrationAction>,

    // At most one request outstanding at a time
    in_flight: Option<InFlight>,

    scan: ScanTimer,
    exit_requested: bool,
}

impl RegistrationManager {
    pub fn new(api: Arc<dyn VoterApi>, schedule: ScanSchedule) -> Self {
        let mut manager = Self {
            state: WizardState::default(),
            modal: OtpModalState::default(),
            api,
            pending_actions: VecDeque::new(),
            in_flight: None,
            scan: ScanTimer::new(schedule),
            exit_requested: false,
        };
        manager.update_workflow_state();
        log::info!("[{}] Registration wizard started", manager.state.session_id);
        manager
    }

    /// UI calls this - synchronous, just queues the action
    pub fn dispatch(&mut self, action: RegistrationAction) {
        log::debug!("Dispatching action: {}", action.description());
        self.pending_actions.push_back(action);
    }

    /// Call this each frame - processes one queued action, then applies any
    /// finished request and due scan event.
    pub fn update(&mut self, now: f64) {
        if let Some(action) = self.pending_actions.pop_front() {
            log::debug!("Processing action: {}", action.description());
            self.handle_action(action, now);
        }

        self.poll_in_flight();
        self.poll_scan(now);
        self.update_workflow_state();
    }

    /// Drains the whole queue.
    pub fn flush(&mut self, now: f64) {
        loop {
            self.update(now);
            if self.pending_actions.is_empty() {
                break;
            }
        }
    }

    /// UI reads this - immutable reference
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn modal(&self) -> &OtpModalState {
        &self.modal
    }

    pub fn scan_progress(&self, now: f64) -> f32 {
        self.scan.progress(now)
    }

    /// Check if there is queued or in-flight work (for UI repaint requests)
    pub fn has_pending_actions(&self) -> bool {
        !self.pending_actions.is_empty() || self.in_flight.is_some() || self.scan.is_active()
    }

    /// True once, after the user chose to leave the completed wizard.
    pub fn take_exit_request(&mut self) -> bool {
        std::mem::take(&mut self.exit_requested)
    }

    fn handle_action(&mut self, action: RegistrationAction, now: f64) {
        match action {
            RegistrationAction::EditAadhaar { input } => {
                if self.state.step == RegistrationStep::AadhaarEntry {
                    self.state.set_aadhaar(&input);
                }
            }
            RegistrationAction::EditName { input } => {
                if self.state.step == RegistrationStep::AadhaarEntry {
                    self.state.applicant.name = input;
                }
            }
            RegistrationAction::EditPhone { input } => {
                if self.state.step == RegistrationStep::AadhaarEntry {
                    self.state.set_phone(&input);
                }
            }
            RegistrationAction::EditOtp { input } => {
                if self.state.step == RegistrationStep::OtpEntry {
                    self.state.set_otp(&input);
                }
            }
            RegistrationAction::SubmitAadhaar => {
                self.handle_submit_aadhaar();
            }
            RegistrationAction::SubmitOtp => {
                self.handle_submit_otp();
            }
            RegistrationAction::StartScan => {
                self.handle_start_scan(now);
            }
            RegistrationAction::DismissOtpModal => {
                self.modal.dismiss();
            }
            RegistrationAction::DismissNotice => {
                self.state.notice = None;
            }
            RegistrationAction::Finish => {
                self.handle_finish();
            }
            RegistrationAction::Reset => {
                self.handle_reset();
            }
        }
    }

    /// Recompute derived flags after every update
    fn update_workflow_state(&mut self) {
        self.state.can_submit = self.state.step_input_ready()
            && self.in_flight.is_none()
            && !self.state.has_notice();
        self.state.set_loading(self.in_flight.is_some());
        self.state.update_progress();
    }

    fn advance(&mut self) {
        let from = self.state.step;
        self.state.step = from.next();
        if self.state.step == RegistrationStep::Complete && self.state.completed_at.is_none() {
            self.state.completed_at = Some(wasm_utils::now_iso_string());
        }
        log::info!(
            "[{}] Advanced from {:?} to {:?}",
            self.state.session_id,
            from,
            self.state.step
        );
    }

    fn teardown(&mut self) {
        if self.scan.cancel() {
            log::debug!("[{}] Pending scan transition cancelled", self.state.session_id);
        }
        if self.in_flight.take().is_some() {
            log::debug!("[{}] In-flight request abandoned", self.state.session_id);
        }
        self.pending_actions.clear();
    }
}

// Action handler implementations
impl RegistrationManager {
    fn handle_submit_aadhaar(&mut self) {
        if self.state.step != RegistrationStep::AadhaarEntry {
            log::warn!("Ignoring Aadhaar submit outside the Aadhaar step");
            return;
        }
        if !self.state.aadhaar_ready() {
            log::warn!("Ignoring Aadhaar submit: {} digits entered", self.state.aadhaar_id.len());
            return;
        }
        if self.in_flight.is_some() {
            log::warn!("Ignoring Aadhaar submit: a request is already in flight");
            return;
        }
        if self.state.has_notice() {
            log::warn!("Ignoring Aadhaar submit until the notice is dismissed");
            return;
        }

        let request = RegisterRequest::new(&self.state.aadhaar_id, &self.state.applicant);
        log::info!("[{}] Requesting registration OTP", self.state.session_id);
        self.in_flight = Some(InFlight::Registration(self.api.start_registration(request)));
    }

    fn handle_submit_otp(&mut self) {
        if self.state.step != RegistrationStep::OtpEntry {
            log::warn!("Ignoring OTP submit outside the OTP step");
            return;
        }
        if !self.state.otp_ready() {
            log::warn!("Ignoring OTP submit: {} digits entered", self.state.otp.len());
            return;
        }
        if self.in_flight.is_some() {
            log::warn!("Ignoring OTP submit: a request is already in flight");
            return;
        }
        if self.state.has_notice() {
            log::warn!("Ignoring OTP submit until the notice is dismissed");
            return;
        }

        let request = VerifyOtpRequest {
            aadhaar_id: self.state.aadhaar_id.clone(),
            otp: self.state.otp.clone(),
        };
        log::info!("[{}] Verifying OTP", self.state.session_id);
        self.in_flight = Some(InFlight::Verification(self.api.start_otp_verification(request)));
    }

    fn handle_start_scan(&mut self, now: f64) {
        if self.state.step != RegistrationStep::BiometricCapture {
            log::warn!("Ignoring scan start outside the fingerprint step");
            return;
        }
        if !self.scan.start(now) {
            log::warn!("Ignoring scan start: scan already running");
            return;
        }
        self.state.is_scanning = true;
        self.state.scan_complete = false;
        log::info!("[{}] Fingerprint scan started", self.state.session_id);
    }

    fn handle_finish(&mut self) {
        if self.state.step != RegistrationStep::Complete {
            log::warn!("Ignoring finish before registration is complete");
            return;
        }
        self.exit_requested = true;
        log::info!("[{}] Leaving completed registration", self.state.session_id);
    }

    fn handle_reset(&mut self) {
        self.teardown();
        self.state = WizardState::default();
        self.modal = OtpModalState::default();
        self.exit_requested = false;
        log::info!("[{}] Registration state reset", self.state.session_id);
    }

    fn poll_in_flight(&mut self) {
        let Some(in_flight) = self.in_flight.take() else {
            return;
        };

        match in_flight {
            InFlight::Registration(call) => match call.try_take() {
                Some(result) => self.complete_registration(result),
                None => self.in_flight = Some(InFlight::Registration(call)),
            },
            InFlight::Verification(call) => match call.try_take() {
                Some(result) => self.complete_verification(result),
                None => self.in_flight = Some(InFlight::Verification(call)),
            },
        }
    }

    fn complete_registration(&mut self, result: http_client::Result<RegistrationResponse>) {
        match result {
            Ok(response) => match response.issued_otp().map(str::to_string) {
                Some(otp) => {
                    let message = response
                        .otp_message
                        .or(response.message)
                        .unwrap_or_else(|| format!("Your OTP is {otp}"));
                    self.modal = OtpModalState::shown(otp, message);
                    log::info!("[{}] Registration accepted, OTP issued", self.state.session_id);
                    self.advance();
                }
                None => {
                    let message = response
                        .message
                        .unwrap_or_else(|| REGISTRATION_FAILED_MESSAGE.to_string());
                    log::warn!("[{}] Registration declined: {}", self.state.session_id, message);
                    self.state.notice = Some(Notice::rejected(message));
                }
            },
            Err(error) => {
                log::error!("[{}] Registration request failed: {}", self.state.session_id, error);
                self.state.notice = Some(Notice::connection());
            }
        }
    }

    fn complete_verification(&mut self, result: http_client::Result<OtpVerificationResponse>) {
        match result {
            Ok(response) if response.is_verified => {
                log::info!("[{}] OTP verified", self.state.session_id);
                self.advance();
            }
            Ok(_) => {
                log::warn!("[{}] OTP rejected", self.state.session_id);
                self.state.notice = Some(Notice::invalid_otp());
            }
            Err(error) => {
                log::error!("[{}] OTP verification failed: {}", self.state.session_id, error);
                self.state.notice = Some(Notice::connection());
            }
        }
    }

    fn poll_scan(&mut self, now: f64) {
        while let Some(event) = self.scan.poll(now) {
            match event {
                ScanEvent::Captured => {
                    self.state.is_scanning = false;
                    self.state.scan_complete = true;
                    log::info!("[{}] Fingerprint captured", self.state.session_id);
                }
                ScanEvent::Advance => {
                    if self.state.step == RegistrationStep::BiometricCapture {
                        self.advance();
                    }
                }
            }
        }
    }
}

impl Drop for RegistrationManager {
    fn drop(&mut self) {
        self.teardown();
    }
}
