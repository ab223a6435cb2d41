use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Actor, BookingDraft, BookingRecord, BookingStatus, UserSnapshot};
use crate::services::pricing;
use crate::store::BookingStore;

/// The one simulated payment channel.
pub const PAYMENT_METHOD: &str = "mpesa";

/// The fixed, ordered quote steps. Being an enum rather than a bare counter,
/// there is no representable step 0 or step 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    MoveDetails,
    HomeDetails,
    Services,
    ContactInfo,
    Payment,
}

impl Step {
    pub fn number(self) -> u8 {
        match self {
            Step::MoveDetails => 1,
            Step::HomeDetails => 2,
            Step::Services => 3,
            Step::ContactInfo => 4,
            Step::Payment => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Step::MoveDetails => "Move Details",
            Step::HomeDetails => "Home Details",
            Step::Services => "Services",
            Step::ContactInfo => "Contact Info",
            Step::Payment => "Payment",
        }
    }

    fn next(self) -> Option<Step> {
        match self {
            Step::MoveDetails => Some(Step::HomeDetails),
            Step::HomeDetails => Some(Step::Services),
            Step::Services => Some(Step::ContactInfo),
            Step::ContactInfo => Some(Step::Payment),
            Step::Payment => None,
        }
    }

    fn prev(self) -> Option<Step> {
        match self {
            Step::MoveDetails => None,
            Step::HomeDetails => Some(Step::MoveDetails),
            Step::Services => Some(Step::HomeDetails),
            Step::ContactInfo => Some(Step::Services),
            Step::Payment => Some(Step::ContactInfo),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    Editing(Step),
    Confirmed,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Advance {
    Moved(Step),
    ReadyToConfirm,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Retreat {
    Moved(Step),
    Exit,
}

#[derive(Debug, PartialEq, Eq)]
pub enum WizardError {
    MissingDate,
    PastDate { date: NaiveDate },
    ForwardJump { target: Step },
    NotAtFinalStep { step: Step },
    AlreadyConfirmed,
}

impl std::fmt::Display for WizardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WizardError::MissingDate => {
                write!(f, "Please select a move date before continuing.")
            }
            WizardError::PastDate { date } => {
                write!(f, "{date} has already passed. Please pick today or a later date.")
            }
            WizardError::ForwardJump { target } => {
                write!(f, "Step \"{}\" has not been reached yet.", target.label())
            }
            WizardError::NotAtFinalStep { step } => {
                write!(f, "Cannot confirm from step \"{}\".", step.label())
            }
            WizardError::AlreadyConfirmed => write!(f, "This booking is already confirmed."),
        }
    }
}

/// Drives one quote session through the fixed step sequence and, at the end,
/// into the confirmed terminal state.
#[derive(Debug)]
pub struct Wizard {
    state: WizardState,
    pub draft: BookingDraft,
}

impl Wizard {
    pub fn new(draft: BookingDraft) -> Self {
        Self {
            state: WizardState::Editing(Step::MoveDetails),
            draft,
        }
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn step(&self) -> Option<Step> {
        match self.state {
            WizardState::Editing(step) => Some(step),
            WizardState::Confirmed => None,
        }
    }

    /// Move forward one step. Leaving the first step requires a usable move
    /// date; on the last step this signals readiness to confirm instead of
    /// moving.
    pub fn advance(&mut self, today: NaiveDate) -> Result<Advance, WizardError> {
        let step = match self.state {
            WizardState::Editing(step) => step,
            WizardState::Confirmed => return Err(WizardError::AlreadyConfirmed),
        };

        if step == Step::MoveDetails {
            let date = self.draft.move_date.ok_or(WizardError::MissingDate)?;
            if date < today {
                return Err(WizardError::PastDate { date });
            }
        }

        match step.next() {
            Some(next) => {
                self.state = WizardState::Editing(next);
                Ok(Advance::Moved(next))
            }
            None => Ok(Advance::ReadyToConfirm),
        }
    }

    /// Move back one step; at the first step this signals the caller to leave
    /// the flow entirely.
    pub fn retreat(&mut self) -> Result<Retreat, WizardError> {
        let step = match self.state {
            WizardState::Editing(step) => step,
            WizardState::Confirmed => return Err(WizardError::AlreadyConfirmed),
        };

        match step.prev() {
            Some(prev) => {
                self.state = WizardState::Editing(prev);
                Ok(Retreat::Moved(prev))
            }
            None => Ok(Retreat::Exit),
        }
    }

    /// Revisit a previously completed step. Skipping forward is rejected.
    pub fn jump_back(&mut self, target: Step) -> Result<(), WizardError> {
        let step = match self.state {
            WizardState::Editing(step) => step,
            WizardState::Confirmed => return Err(WizardError::AlreadyConfirmed),
        };

        if target > step {
            return Err(WizardError::ForwardJump { target });
        }
        self.state = WizardState::Editing(target);
        Ok(())
    }

    /// The commit path: only valid on the final step. Availability is
    /// re-checked inside the store's critical section; a conflict found there
    /// sends the session back to the first step to pick another date.
    pub fn confirm(
        &mut self,
        store: &BookingStore,
        actor: Option<&Actor>,
        now: DateTime<Utc>,
    ) -> Result<BookingRecord, AppError> {
        match self.state {
            WizardState::Editing(Step::Payment) => {}
            WizardState::Editing(step) => {
                return Err(WizardError::NotAtFinalStep { step }.into());
            }
            WizardState::Confirmed => return Err(WizardError::AlreadyConfirmed.into()),
        }

        let record = finalize(&self.draft, actor, now)?;
        match store.confirm(record, now.date_naive()) {
            Ok(record) => {
                self.state = WizardState::Confirmed;
                Ok(record)
            }
            Err(err) => {
                if matches!(err, AppError::Conflict(_)) {
                    self.state = WizardState::Editing(Step::MoveDetails);
                }
                Err(err)
            }
        }
    }
}

/// Build the persisted record from a finished draft. The reference and id are
/// minted here, exactly once per confirmation.
pub fn finalize(
    draft: &BookingDraft,
    actor: Option<&Actor>,
    now: DateTime<Utc>,
) -> Result<BookingRecord, WizardError> {
    let move_date = draft.move_date.ok_or(WizardError::MissingDate)?;

    Ok(BookingRecord {
        id: Uuid::new_v4().to_string(),
        reference: format!("TXN-{}", now.timestamp_millis()),
        created_at: now.naive_utc(),
        route: draft.route(),
        move_date,
        amount: pricing::quote_amount(&draft.services),
        status: BookingStatus::Completed,
        payment_method: PAYMENT_METHOD.to_string(),
        services: draft.services,
        user: actor.map(UserSnapshot::of),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::models::{Contact, Role, ServiceSelection};
    use crate::store::{BookingStore, MemoryStorage};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap()
    }

    fn draft_for(move_date: &str) -> BookingDraft {
        BookingDraft {
            move_date: Some(date(move_date)),
            from_address: "123 Main St".to_string(),
            from_city: "Nairobi".to_string(),
            to_address: "456 Oak Ave".to_string(),
            to_city: "Kisumu".to_string(),
            services: ServiceSelection {
                packing: true,
                storage: false,
                insurance: true,
            },
            contact: Contact {
                name: "John Doe".to_string(),
                phone: "+254700000000".to_string(),
                email: "john@example.com".to_string(),
            },
            ..Default::default()
        }
    }

    fn actor() -> Actor {
        Actor {
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            role: Role::Client,
        }
    }

    fn drive_to_payment(wizard: &mut Wizard) {
        let today = now().date_naive();
        while wizard.step() != Some(Step::Payment) {
            wizard.advance(today).unwrap();
        }
    }

    #[test]
    fn test_advance_walks_all_steps_in_order() {
        let mut wizard = Wizard::new(draft_for("2026-02-15"));
        let today = now().date_naive();

        assert_eq!(wizard.step(), Some(Step::MoveDetails));
        assert_eq!(wizard.advance(today).unwrap(), Advance::Moved(Step::HomeDetails));
        assert_eq!(wizard.advance(today).unwrap(), Advance::Moved(Step::Services));
        assert_eq!(wizard.advance(today).unwrap(), Advance::Moved(Step::ContactInfo));
        assert_eq!(wizard.advance(today).unwrap(), Advance::Moved(Step::Payment));
    }

    #[test]
    fn test_advance_at_final_step_signals_confirm() {
        let mut wizard = Wizard::new(draft_for("2026-02-15"));
        drive_to_payment(&mut wizard);

        // Still on the final step afterwards, not past it.
        assert_eq!(wizard.advance(now().date_naive()).unwrap(), Advance::ReadyToConfirm);
        assert_eq!(wizard.step(), Some(Step::Payment));
    }

    #[test]
    fn test_retreat_at_first_step_signals_exit() {
        let mut wizard = Wizard::new(draft_for("2026-02-15"));

        assert_eq!(wizard.retreat().unwrap(), Retreat::Exit);
        assert_eq!(wizard.step(), Some(Step::MoveDetails));
    }

    #[test]
    fn test_step_numbers_stay_in_bounds() {
        let mut wizard = Wizard::new(draft_for("2026-02-15"));
        let today = now().date_naive();

        wizard.retreat().unwrap();
        assert_eq!(wizard.step().unwrap().number(), 1);

        for _ in 0..10 {
            let _ = wizard.advance(today);
            let n = wizard.step().unwrap().number();
            assert!((1..=5).contains(&n), "step number out of bounds: {n}");
        }
    }

    #[test]
    fn test_advance_requires_move_date() {
        let mut wizard = Wizard::new(BookingDraft::default());
        let result = wizard.advance(now().date_naive());
        assert_eq!(result.unwrap_err(), WizardError::MissingDate);
        assert_eq!(wizard.step(), Some(Step::MoveDetails));
    }

    #[test]
    fn test_advance_rejects_past_date() {
        let mut wizard = Wizard::new(draft_for("2026-01-09"));
        let result = wizard.advance(now().date_naive());
        assert_eq!(
            result.unwrap_err(),
            WizardError::PastDate { date: date("2026-01-09") }
        );
    }

    #[test]
    fn test_jump_back_allowed_forward_rejected() {
        let mut wizard = Wizard::new(draft_for("2026-02-15"));
        drive_to_payment(&mut wizard);

        wizard.jump_back(Step::HomeDetails).unwrap();
        assert_eq!(wizard.step(), Some(Step::HomeDetails));

        let result = wizard.jump_back(Step::Payment);
        assert_eq!(
            result.unwrap_err(),
            WizardError::ForwardJump { target: Step::Payment }
        );
        assert_eq!(wizard.step(), Some(Step::HomeDetails));
    }

    #[test]
    fn test_confirm_appends_record() {
        let store = BookingStore::new(Box::new(MemoryStorage::new()));
        let mut wizard = Wizard::new(draft_for("2026-02-15"));
        drive_to_payment(&mut wizard);

        let actor = actor();
        let record = wizard.confirm(&store, Some(&actor), now()).unwrap();

        assert!(record.reference.starts_with("TXN-"));
        assert_eq!(record.move_date, date("2026-02-15"));
        assert_eq!(record.amount, 89_900 + 15_000 + 10_000);
        assert_eq!(record.status, BookingStatus::Completed);
        assert_eq!(record.payment_method, "mpesa");
        assert_eq!(record.route.from, "123 Main St, Nairobi");
        assert_eq!(record.user.as_ref().unwrap().email, "john@example.com");

        assert_eq!(wizard.state(), WizardState::Confirmed);
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_confirm_conflict_returns_to_first_step() {
        let store = BookingStore::new(Box::new(MemoryStorage::new()));

        let mut first = Wizard::new(draft_for("2026-02-15"));
        drive_to_payment(&mut first);
        first.confirm(&store, None, now()).unwrap();

        // Same date booked between this session's pick and its confirm.
        let mut second = Wizard::new(draft_for("2026-02-15"));
        drive_to_payment(&mut second);
        let err = second.confirm(&store, None, now()).unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(second.step(), Some(Step::MoveDetails));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_confirm_rejected_before_final_step() {
        let store = BookingStore::new(Box::new(MemoryStorage::new()));
        let mut wizard = Wizard::new(draft_for("2026-02-15"));

        let err = wizard.confirm(&store, None, now()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_confirm_twice_rejected() {
        let store = BookingStore::new(Box::new(MemoryStorage::new()));
        let mut wizard = Wizard::new(draft_for("2026-02-15"));
        drive_to_payment(&mut wizard);

        wizard.confirm(&store, None, now()).unwrap();
        let err = wizard.confirm(&store, None, now()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_finalize_without_date_fails() {
        let result = finalize(&BookingDraft::default(), None, now());
        assert_eq!(result.unwrap_err(), WizardError::MissingDate);
    }

    #[test]
    fn test_finalize_anonymous_has_no_user() {
        let record = finalize(&draft_for("2026-02-15"), None, now()).unwrap();
        assert!(record.user.is_none());
    }
}
