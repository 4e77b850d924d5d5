//! Verification machine - the pure half of a verification session.
//!
//! ```text
//!   Idle ──CodeIssued/Resumed──▶ Issued ──CodeSubmitted(match)──▶ Verifying ──UserResolved──▶ Verified
//!                                 │  ▲                                │
//!                 CodeSubmitted   │  └──────────LookupFailed──────────┘
//!                 (mismatch)      ▼
//!                               Issued (last attempt failed)
//! ```
//!
//! While Issued the countdown runs from the cooldown down to zero; resend is
//! only possible once it has reached zero.

use super::commands::VerificationCommand;
use super::events::VerificationEvent;
use super::models::{OtpCode, PhoneNumber};
use crate::kernel::Machine;
use crate::routes::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Issued,
    Verifying,
    Verified,
}

#[derive(Debug, Clone)]
pub struct VerificationMachine {
    phase: Phase,
    phone_number: Option<PhoneNumber>,
    code: Option<OtpCode>,
    countdown: u32,
    resend_available: bool,
    last_attempt_failed: bool,
    cooldown: u32,
}

impl VerificationMachine {
    pub fn new(cooldown: u32) -> Self {
        Self {
            phase: Phase::Idle,
            phone_number: None,
            code: None,
            countdown: 0,
            resend_available: false,
            last_attempt_failed: false,
            cooldown,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn phone_number(&self) -> Option<&PhoneNumber> {
        self.phone_number.as_ref()
    }

    pub fn current_code(&self) -> Option<&OtpCode> {
        self.code.as_ref()
    }

    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    pub fn resend_available(&self) -> bool {
        self.resend_available
    }

    /// The most recent submission did not match
    pub fn last_attempt_failed(&self) -> bool {
        self.last_attempt_failed
    }

    /// A session is issued to one phone number once; new codes after that
    /// only come through resend.
    pub fn accepts_issue(&self) -> bool {
        self.phase == Phase::Idle
    }

    fn start_issued(&mut self, phone_number: &PhoneNumber, code: &OtpCode) {
        self.phase = Phase::Issued;
        self.phone_number = Some(phone_number.clone());
        self.code = Some(code.clone());
        self.reset_countdown();
        self.last_attempt_failed = false;
    }

    fn reset_countdown(&mut self) {
        self.countdown = self.cooldown;
        self.resend_available = self.cooldown == 0;
    }
}

impl Machine for VerificationMachine {
    type Event = VerificationEvent;
    type Command = VerificationCommand;

    fn decide(&mut self, event: &VerificationEvent) -> Option<VerificationCommand> {
        match event {
            VerificationEvent::CodeIssued { phone_number, code } => {
                if !self.accepts_issue() {
                    return None;
                }
                self.start_issued(phone_number, code);
                Some(VerificationCommand::DeliverCode {
                    phone_number: phone_number.clone(),
                    code: code.clone(),
                    resent: false,
                })
            }

            VerificationEvent::Resumed { phone_number, code } => {
                if self.phase != Phase::Idle {
                    return None;
                }
                self.start_issued(phone_number, code);
                Some(VerificationCommand::StartCountdown)
            }

            VerificationEvent::Tick => {
                // Keeps running while a lookup is in flight
                if !matches!(self.phase, Phase::Issued | Phase::Verifying) || self.resend_available
                {
                    return None;
                }
                self.countdown = self.countdown.saturating_sub(1);
                if self.countdown == 0 {
                    self.resend_available = true;
                    Some(VerificationCommand::StopCountdown)
                } else {
                    None
                }
            }

            VerificationEvent::ResendRequested { code } => {
                if self.phase != Phase::Issued || !self.resend_available {
                    return None;
                }
                self.code = Some(code.clone());
                self.reset_countdown();
                let phone_number = self.phone_number.clone()?;
                Some(VerificationCommand::DeliverCode {
                    phone_number,
                    code: code.clone(),
                    resent: true,
                })
            }

            VerificationEvent::CodeSubmitted { code } => {
                if self.phase != Phase::Issued {
                    return None;
                }
                let matched = self.code.as_ref().is_some_and(|c| c.matches(code));
                if matched {
                    self.phase = Phase::Verifying;
                    self.last_attempt_failed = false;
                    let phone_number = self.phone_number.clone()?;
                    Some(VerificationCommand::LookupUser { phone_number })
                } else {
                    self.last_attempt_failed = true;
                    Some(VerificationCommand::RejectCode)
                }
            }

            VerificationEvent::UserResolved { user, existing } => {
                if self.phase != Phase::Verifying {
                    return None;
                }
                self.phase = Phase::Verified;
                self.code = None;
                let next = if *existing { Route::Home } else { Route::Register };
                Some(VerificationCommand::CommitSession {
                    user: user.clone(),
                    existing: *existing,
                    next,
                })
            }

            VerificationEvent::LookupFailed => {
                if self.phase != Phase::Verifying {
                    return None;
                }
                self.phase = Phase::Issued;
                Some(VerificationCommand::ReportLookupFailure)
            }

            VerificationEvent::Abandoned => {
                if !matches!(self.phase, Phase::Issued | Phase::Verifying) {
                    return None;
                }
                *self = Self::new(self.cooldown);
                Some(VerificationCommand::Discard)
            }
        }
    }
}
