//! The sign-off decision function

use signoff_core::{
    BusinessDate, Clock, EventLedger, LedgerError, LedgerKey, ReportDirectory, SignOffEvent,
    SignOffForm, SignOffLevel, SignOffRequest, SystemClock,
};

use crate::config::EngineConfig;
use crate::error::{SignOffError, UnauthorizedReason};
use crate::state::SignOffState;

/// Two-level sign-off engine
///
/// Stateless apart from its collaborators: every call re-reads the report
/// and the ledger, then appends at most one event.
pub struct SignOffEngine<D, L, C = SystemClock> {
    directory: D,
    ledger: L,
    clock: C,
    config: EngineConfig,
}

impl<D: ReportDirectory, L: EventLedger> SignOffEngine<D, L, SystemClock> {
    /// Create an engine with default config and the system clock
    pub fn new(directory: D, ledger: L) -> Self {
        Self::with_config(directory, ledger, EngineConfig::default())
    }

    pub fn with_config(directory: D, ledger: L, config: EngineConfig) -> Self {
        Self {
            directory,
            ledger,
            clock: SystemClock,
            config,
        }
    }
}

impl<D: ReportDirectory, L: EventLedger, C: Clock> SignOffEngine<D, L, C> {
    /// Replace the timestamp source
    pub fn with_clock<C2: Clock>(self, clock: C2) -> SignOffEngine<D, L, C2> {
        SignOffEngine {
            directory: self.directory,
            ledger: self.ledger,
            clock,
            config: self.config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Sign off `request` as `identity`
    ///
    /// On success exactly one event has been appended to the ledger and is
    /// returned. Every error leaves the ledger untouched.
    pub fn sign_off(&self, request: &SignOffRequest, identity: &str) -> Result<SignOffEvent, SignOffError> {
        let identity = self.config.normalize_identity(identity);
        let result = self.decide(request, identity);

        match &result {
            Ok(event) => tracing::info!(
                report = %request.report_id,
                level = %request.level,
                business_date = %request.business_date,
                identity = %identity,
                event_id = %event.id,
                "Sign-off recorded"
            ),
            Err(e) if e.is_rejection() => tracing::warn!(
                report = %request.report_id,
                level = %request.level,
                identity = %identity,
                code = e.code(),
                reason = %e,
                "Sign-off rejected"
            ),
            Err(e) => tracing::error!(
                report = %request.report_id,
                level = %request.level,
                error = %e,
                "Sign-off failed"
            ),
        }

        result
    }

    /// Sign off an untyped request, validating level and date first
    pub fn sign_off_form(&self, form: SignOffForm, identity: &str) -> Result<SignOffEvent, SignOffError> {
        let request = SignOffRequest::try_from(form).map_err(|e| {
            tracing::warn!(identity = %identity, reason = %e, "Sign-off request invalid");
            SignOffError::from(e)
        })?;
        self.sign_off(&request, identity)
    }

    /// Current workflow state for a report on a business date
    pub fn status(&self, report_id: &str, business_date: BusinessDate) -> Result<SignOffState, SignOffError> {
        let key = LedgerKey::new(report_id, business_date);
        Ok(SignOffState::load(&self.ledger, &key)?)
    }

    /// True once both levels are recorded
    pub fn is_finalized(&self, report_id: &str, business_date: BusinessDate) -> Result<bool, SignOffError> {
        Ok(self.status(report_id, business_date)?.is_finalized())
    }

    fn decide(&self, request: &SignOffRequest, identity: &str) -> Result<SignOffEvent, SignOffError> {
        let report = self.directory.get_report(&request.report_id)?;

        // Both levels draw from the same reviewer list
        if !report.is_first_level_reviewer(identity) {
            return Err(SignOffError::unauthorized(identity, UnauthorizedReason::NotAReviewer));
        }

        let key = request.ledger_key();
        let state = SignOffState::load(&self.ledger, &key)?;
        tracing::debug!(key = %key, state = state.as_str(), "Loaded sign-off state");

        state.check_transition(request, identity)?;

        let event = SignOffEvent::new(&self.config.event_id_prefix, request, identity, self.clock.now());
        self.ledger.insert_event(&event).map_err(|e| match e {
            // Lost a race with a concurrent caller
            LedgerError::Duplicate {
                key,
                level: SignOffLevel::First,
            } => SignOffError::FirstLevelAlreadySignedOff(key),
            LedgerError::Duplicate {
                key,
                level: SignOffLevel::Second,
            } => SignOffError::SecondLevelAlreadySignedOff(key),
            other => SignOffError::Ledger(other),
        })?;

        Ok(event)
    }
}
