//! Loan management service
//!
//! A visitor may request an artefact when they owe nothing, hold fewer than
//! the configured number of loans and have no overdue approved loan, unless
//! the artefact is both not loanable and already out. Requests are created
//! Pending; the manager then approves them (assigning a due date on an open
//! day, provided the artefact is not out on another loan) or declines them,
//! which removes the request.

use chrono::{Duration, NaiveDate, Utc};

use crate::{
    config::LoansConfig,
    error::{AppError, AppResult},
    models::{
        artefact::Artefact,
        enums::ExchangeStatus,
        loan::{Loan, LoanDto},
        visitor::Visitor,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    config: LoansConfig,
}

impl LoansService {
    pub fn new(repository: Repository, config: LoansConfig) -> Self {
        Self { repository, config }
    }

    async fn find_loan(&self, id: i32) -> AppResult<Loan> {
        self.repository
            .loans
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Loan not found".to_string()))
    }

    /// Get a single loan
    pub async fn get_loan(&self, id: i32) -> AppResult<LoanDto> {
        self.find_loan(id).await.map(LoanDto::from)
    }

    pub async fn get_all_loans(&self) -> AppResult<Vec<LoanDto>> {
        Ok(to_dtos(self.repository.loans.list().await?))
    }

    pub async fn get_loans_by_status(&self, status: ExchangeStatus) -> AppResult<Vec<LoanDto>> {
        Ok(to_dtos(self.repository.loans.list_by_status(status).await?))
    }

    pub async fn get_loans_by_due_date(&self, due_date: NaiveDate) -> AppResult<Vec<LoanDto>> {
        Ok(to_dtos(self.repository.loans.list_by_due_date(due_date).await?))
    }

    pub async fn get_loans_by_submitted_date(&self, submitted_date: NaiveDate) -> AppResult<Vec<LoanDto>> {
        Ok(to_dtos(
            self.repository.loans.list_by_submitted_date(submitted_date).await?,
        ))
    }

    /// Get all loans owned by a visitor
    pub async fn get_loans_by_visitor(&self, username: &str) -> AppResult<Vec<LoanDto>> {
        let visitor = self
            .repository
            .visitors
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Visitor {} not found", username)))?;

        Ok(to_dtos(self.repository.loans.list_by_visitor(visitor.id).await?))
    }

    /// Request a loan of an artefact for a visitor.
    ///
    /// All broken rules are reported together in one validation error.
    pub async fn create_loan(&self, artefact_id: i32, username: &str) -> AppResult<LoanDto> {
        let today = Utc::now().date_naive();

        let visitor = self.repository.visitors.find_by_username(username).await?;
        let visitor_loans = match &visitor {
            Some(v) => self.repository.loans.list_by_visitor(v.id).await?,
            None => Vec::new(),
        };
        let artefact = self.repository.artefacts.find_by_id(artefact_id).await?;

        let violations = eligibility_violations(
            visitor.as_ref().map(|v| (v, visitor_loans.as_slice())),
            artefact.as_ref(),
            self.config.max_active_loans,
            today,
        );

        match (visitor, artefact) {
            (Some(visitor), Some(artefact)) if violations.is_empty() => {
                let loan = self
                    .repository
                    .loans
                    .create(visitor.id, artefact.id, today)
                    .await?;
                tracing::info!(
                    "Loan {} requested by {} for artefact {}",
                    loan.id,
                    visitor.username,
                    artefact.id
                );
                Ok(loan.into())
            }
            _ => {
                tracing::debug!("Loan request by {} rejected: {:?}", username, violations);
                Err(AppError::Validation(violations.join(" ")))
            }
        }
    }

    /// Approve or decline a loan.
    ///
    /// Returns the approved loan, or `None` when the loan was declined and
    /// therefore deleted.
    pub async fn update_status(&self, id: i32, status: ExchangeStatus) -> AppResult<Option<LoanDto>> {
        let loan = self.find_loan(id).await?;

        match status {
            ExchangeStatus::Pending => Err(AppError::Validation(
                "Cannot set the loan's status to pending.".to_string(),
            )),
            ExchangeStatus::Declined => {
                self.repository.loans.delete(loan.id).await?;
                tracing::info!("Loan {} declined and removed", loan.id);
                Ok(None)
            }
            ExchangeStatus::Approved => {
                if loan.status != ExchangeStatus::Pending {
                    return Err(AppError::Validation(
                        "Only pending loans can be approved.".to_string(),
                    ));
                }

                let artefact = self
                    .repository
                    .artefacts
                    .find_by_id(loan.artefact_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::NotFound(format!("Artefact {} not found", loan.artefact_id))
                    })?;
                if artefact.currently_on_loan {
                    return Err(AppError::Validation(
                        "This item is unavailable for loan.".to_string(),
                    ));
                }

                let earliest = Utc::now().date_naive() + Duration::days(self.config.duration_days);
                let due_day = self
                    .repository
                    .open_days
                    .first_on_or_after(earliest)
                    .await?
                    .ok_or_else(|| {
                        AppError::Validation(format!(
                            "No open day is available on or after {} for the due date.",
                            earliest
                        ))
                    })?;

                let approved = self.repository.loans.approve(loan.id, due_day.date).await?;
                tracing::info!("Loan {} approved, due {}", approved.id, due_day.date);
                Ok(Some(approved.into()))
            }
        }
    }

    /// Delete a loan
    pub async fn delete_loan(&self, id: i32) -> AppResult<()> {
        self.repository.loans.delete(id).await
    }
}

fn to_dtos(loans: Vec<Loan>) -> Vec<LoanDto> {
    loans.into_iter().map(LoanDto::from).collect()
}

/// Rules a loan request breaks, in reporting order.
///
/// `visitor` carries the visitor and every loan they currently hold.
fn eligibility_violations(
    visitor: Option<(&Visitor, &[Loan])>,
    artefact: Option<&Artefact>,
    max_active_loans: usize,
    today: NaiveDate,
) -> Vec<String> {
    let mut errors = Vec::new();

    match visitor {
        None => errors.push("The visitor does not exist.".to_string()),
        Some((visitor, loans)) => {
            if !visitor.balance.is_zero() {
                errors.push(
                    "You cannot loan an item until your outstanding balances are paid.".to_string(),
                );
            }
            if loans.len() >= max_active_loans {
                errors.push(format!(
                    "You cannot loan more than {} items at a time.",
                    max_active_loans
                ));
            }
            if loans.iter().any(|loan| loan.is_overdue(today)) {
                errors.push(
                    "Please return outstanding loaned items before loaning a new one.".to_string(),
                );
            }
        }
    }

    match artefact {
        None => errors.push("The artefact does not exist.".to_string()),
        Some(artefact) if !artefact.is_available_for_loan() => {
            errors.push("This item is unavailable for loan.".to_string())
        }
        Some(_) => {}
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::open_day::OpenDay;
    use crate::repository::{
        MockArtefactsRepository, MockLoansRepository, MockManagerRepository,
        MockOpenDaysRepository, MockVisitorsRepository,
    };
    use mockall::predicate::eq;
    use rust_decimal::Decimal;

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    fn visitor(balance: Decimal) -> Visitor {
        Visitor {
            id: 7,
            username: "alice".to_string(),
            balance,
        }
    }

    fn artefact(can_loan: bool, currently_on_loan: bool) -> Artefact {
        Artefact {
            id: 3,
            name: "Roman amphora".to_string(),
            description: None,
            can_loan,
            currently_on_loan,
        }
    }

    fn loan(id: i32, status: ExchangeStatus, due_date: Option<NaiveDate>) -> Loan {
        Loan {
            id,
            visitor_id: 7,
            visitor_username: "alice".to_string(),
            artefact_id: 3,
            artefact_name: "Roman amphora".to_string(),
            submitted_date: today() - Duration::days(30),
            due_date,
            status,
        }
    }

    struct Mocks {
        loans: MockLoansRepository,
        visitors: MockVisitorsRepository,
        artefacts: MockArtefactsRepository,
        open_days: MockOpenDaysRepository,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                loans: MockLoansRepository::new(),
                visitors: MockVisitorsRepository::new(),
                artefacts: MockArtefactsRepository::new(),
                open_days: MockOpenDaysRepository::new(),
            }
        }

        /// Artefact lookup made when approving
        fn with_artefact(mut self, artefact: Artefact) -> Self {
            self.artefacts
                .expect_find_by_id()
                .with(eq(3))
                .returning(move |_| Ok(Some(artefact.clone())));
            self
        }

        /// Visitor, their loans and the artefact lookups used by `create_loan`
        fn with_request(
            mut self,
            visitor: Option<Visitor>,
            existing: Vec<Loan>,
            artefact: Option<Artefact>,
        ) -> Self {
            let has_visitor = visitor.is_some();
            self.visitors
                .expect_find_by_username()
                .with(eq("alice"))
                .returning(move |_| Ok(visitor.clone()));
            if has_visitor {
                self.loans
                    .expect_list_by_visitor()
                    .with(eq(7))
                    .returning(move |_| Ok(existing.clone()));
            }
            self.artefacts
                .expect_find_by_id()
                .with(eq(3))
                .returning(move |_| Ok(artefact.clone()));
            self
        }

        fn service(self) -> LoansService {
            let repository = Repository::mocked(
                self.loans,
                self.visitors,
                self.artefacts,
                self.open_days,
                MockManagerRepository::new(),
            );
            LoansService::new(repository, LoansConfig::default())
        }
    }

    fn validation_message(result: AppResult<LoanDto>) -> String {
        match result {
            Err(AppError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_loan_pending_with_today_as_submission() {
        let mut mocks = Mocks::new().with_request(
            Some(visitor(Decimal::ZERO)),
            vec![loan(1, ExchangeStatus::Pending, None)],
            Some(artefact(true, false)),
        );
        mocks
            .loans
            .expect_create()
            .with(eq(7), eq(3), eq(today()))
            .times(1)
            .returning(|_, _, _| Ok(loan(42, ExchangeStatus::Pending, None)));

        let dto = mocks.service().create_loan(3, "alice").await.unwrap();
        assert_eq!(dto.id, 42);
        assert_eq!(dto.status, ExchangeStatus::Pending);
        assert_eq!(dto.due_date, None);
    }

    #[tokio::test]
    async fn test_create_loan_rejects_outstanding_balance() {
        let mut mocks = Mocks::new().with_request(
            Some(visitor(Decimal::new(1250, 2))),
            Vec::new(),
            Some(artefact(true, false)),
        );
        mocks.loans.expect_create().never();

        let msg = validation_message(mocks.service().create_loan(3, "alice").await);
        assert_eq!(
            msg,
            "You cannot loan an item until your outstanding balances are paid."
        );
    }

    #[tokio::test]
    async fn test_create_sixth_loan_fails() {
        let existing = (1..=5).map(|id| loan(id, ExchangeStatus::Pending, None)).collect();
        let mut mocks = Mocks::new().with_request(
            Some(visitor(Decimal::ZERO)),
            existing,
            Some(artefact(true, false)),
        );
        mocks.loans.expect_create().never();

        let msg = validation_message(mocks.service().create_loan(3, "alice").await);
        assert_eq!(msg, "You cannot loan more than 5 items at a time.");
    }

    #[tokio::test]
    async fn test_create_loan_blocked_by_overdue_approved_loan() {
        let overdue = loan(1, ExchangeStatus::Approved, Some(today() - Duration::days(2)));
        let mut mocks = Mocks::new().with_request(
            Some(visitor(Decimal::ZERO)),
            vec![overdue],
            Some(artefact(true, false)),
        );
        mocks.loans.expect_create().never();

        let msg = validation_message(mocks.service().create_loan(3, "alice").await);
        assert_eq!(msg, "Please return outstanding loaned items before loaning a new one.");
    }

    #[tokio::test]
    async fn test_approved_loan_not_yet_due_does_not_block() {
        let current = loan(1, ExchangeStatus::Approved, Some(today() + Duration::days(3)));
        let mut mocks = Mocks::new().with_request(
            Some(visitor(Decimal::ZERO)),
            vec![current],
            Some(artefact(true, false)),
        );
        mocks
            .loans
            .expect_create()
            .times(1)
            .returning(|_, _, _| Ok(loan(2, ExchangeStatus::Pending, None)));

        tokio_test::assert_ok!(mocks.service().create_loan(3, "alice").await);
    }

    #[tokio::test]
    async fn test_create_loan_rejects_unavailable_artefact() {
        let mut mocks = Mocks::new().with_request(
            Some(visitor(Decimal::ZERO)),
            Vec::new(),
            Some(artefact(false, true)),
        );
        mocks.loans.expect_create().never();

        let msg = validation_message(mocks.service().create_loan(3, "alice").await);
        assert_eq!(msg, "This item is unavailable for loan.");
    }

    #[tokio::test]
    async fn test_create_loan_accepts_non_loanable_artefact_in_store() {
        let mut mocks = Mocks::new().with_request(
            Some(visitor(Decimal::ZERO)),
            Vec::new(),
            Some(artefact(false, false)),
        );
        mocks
            .loans
            .expect_create()
            .times(1)
            .returning(|_, _, _| Ok(loan(43, ExchangeStatus::Pending, None)));

        tokio_test::assert_ok!(mocks.service().create_loan(3, "alice").await);
    }

    #[tokio::test]
    async fn test_create_loan_reports_every_violation() {
        let overdue = loan(1, ExchangeStatus::Approved, Some(today() - Duration::days(1)));
        let mut existing: Vec<Loan> = (2..=5).map(|id| loan(id, ExchangeStatus::Pending, None)).collect();
        existing.push(overdue);
        let mut mocks = Mocks::new().with_request(
            Some(visitor(Decimal::new(5, 0))),
            existing,
            Some(artefact(false, true)),
        );
        mocks.loans.expect_create().never();

        let msg = validation_message(mocks.service().create_loan(3, "alice").await);
        assert_eq!(
            msg,
            "You cannot loan an item until your outstanding balances are paid. \
             You cannot loan more than 5 items at a time. \
             Please return outstanding loaned items before loaning a new one. \
             This item is unavailable for loan."
        );
    }

    #[tokio::test]
    async fn test_create_loan_missing_visitor_and_artefact() {
        let mut mocks = Mocks::new().with_request(None, Vec::new(), None);
        mocks.loans.expect_create().never();

        let msg = validation_message(mocks.service().create_loan(3, "alice").await);
        assert_eq!(msg, "The visitor does not exist. The artefact does not exist.");
    }

    #[tokio::test]
    async fn test_decline_deletes_loan() {
        let mut mocks = Mocks::new();
        mocks
            .loans
            .expect_find_by_id()
            .with(eq(9))
            .returning(|id| Ok(Some(loan(id, ExchangeStatus::Pending, None))));
        mocks.loans.expect_delete().with(eq(9)).times(1).returning(|_| Ok(()));
        mocks.loans.expect_approve().never();

        let result = mocks
            .service()
            .update_status(9, ExchangeStatus::Declined)
            .await
            .unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_approve_sets_status_and_due_date() {
        let due = today() + Duration::days(9);
        let mut mocks = Mocks::new().with_artefact(artefact(true, false));
        mocks
            .loans
            .expect_find_by_id()
            .with(eq(9))
            .returning(|id| Ok(Some(loan(id, ExchangeStatus::Pending, None))));
        mocks
            .open_days
            .expect_first_on_or_after()
            .with(eq(today() + Duration::days(7)))
            .returning(move |_| Ok(Some(OpenDay { id: 1, date: due })));
        mocks
            .loans
            .expect_approve()
            .with(eq(9), eq(due))
            .times(1)
            .returning(|id, due| Ok(loan(id, ExchangeStatus::Approved, Some(due))));

        let dto = mocks
            .service()
            .update_status(9, ExchangeStatus::Approved)
            .await
            .unwrap()
            .expect("approved loan is returned");
        assert_eq!(dto.status, ExchangeStatus::Approved);
        assert_eq!(dto.due_date, Some(due));
    }

    #[tokio::test]
    async fn test_approve_without_open_day_fails() {
        let mut mocks = Mocks::new().with_artefact(artefact(true, false));
        mocks
            .loans
            .expect_find_by_id()
            .returning(|id| Ok(Some(loan(id, ExchangeStatus::Pending, None))));
        mocks.open_days.expect_first_on_or_after().returning(|_| Ok(None));
        mocks.loans.expect_approve().never();

        let result = mocks.service().update_status(9, ExchangeStatus::Approved).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_approve_second_loan_of_artefact_already_out_fails() {
        let mut mocks = Mocks::new().with_artefact(artefact(true, true));
        mocks
            .loans
            .expect_find_by_id()
            .with(eq(9))
            .returning(|id| Ok(Some(loan(id, ExchangeStatus::Pending, None))));
        mocks.open_days.expect_first_on_or_after().never();
        mocks.loans.expect_approve().never();

        let result = mocks.service().update_status(9, ExchangeStatus::Approved).await;
        match result {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "This item is unavailable for loan."),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_approve_already_approved_loan_fails() {
        let mut mocks = Mocks::new();
        mocks
            .loans
            .expect_find_by_id()
            .returning(|id| Ok(Some(loan(id, ExchangeStatus::Approved, Some(today())))));
        mocks.loans.expect_approve().never();

        let result = mocks.service().update_status(9, ExchangeStatus::Approved).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_pending_target_rejected() {
        let mut mocks = Mocks::new();
        mocks
            .loans
            .expect_find_by_id()
            .returning(|id| Ok(Some(loan(id, ExchangeStatus::Pending, None))));
        mocks.loans.expect_delete().never();
        mocks.loans.expect_approve().never();

        let result = mocks.service().update_status(9, ExchangeStatus::Pending).await;
        match result {
            Err(AppError::Validation(msg)) => {
                assert_eq!(msg, "Cannot set the loan's status to pending.")
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_status_missing_loan() {
        let mut mocks = Mocks::new();
        mocks.loans.expect_find_by_id().returning(|_| Ok(None));

        let result = mocks.service().update_status(404, ExchangeStatus::Approved).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_loans_by_visitor_only_returns_their_loans() {
        let mut mocks = Mocks::new();
        mocks
            .visitors
            .expect_find_by_username()
            .with(eq("alice"))
            .returning(|_| Ok(Some(visitor(Decimal::ZERO))));
        mocks
            .loans
            .expect_list_by_visitor()
            .with(eq(7))
            .times(1)
            .returning(|_| {
                Ok(vec![
                    loan(1, ExchangeStatus::Pending, None),
                    loan(2, ExchangeStatus::Approved, Some(today())),
                ])
            });

        let loans = mocks.service().get_loans_by_visitor("alice").await.unwrap();
        assert_eq!(loans.len(), 2);
        assert!(loans.iter().all(|l| l.username == "alice"));
    }

    #[tokio::test]
    async fn test_loans_by_unknown_visitor() {
        let mut mocks = Mocks::new();
        mocks.visitors.expect_find_by_username().returning(|_| Ok(None));
        mocks.loans.expect_list_by_visitor().never();

        let result = mocks.service().get_loans_by_visitor("bob").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_loans_by_status_passes_filter() {
        let mut mocks = Mocks::new();
        mocks
            .loans
            .expect_list_by_status()
            .with(eq(ExchangeStatus::Approved))
            .times(1)
            .returning(|_| Ok(vec![loan(5, ExchangeStatus::Approved, Some(today()))]));

        let loans = mocks
            .service()
            .get_loans_by_status(ExchangeStatus::Approved)
            .await
            .unwrap();
        assert_eq!(loans.len(), 1);
        assert_eq!(loans[0].status, ExchangeStatus::Approved);
    }

    #[test]
    fn test_eligibility_allows_clean_request() {
        let v = visitor(Decimal::ZERO);
        let loans = vec![loan(1, ExchangeStatus::Pending, None)];
        let a = artefact(true, false);
        assert!(eligibility_violations(Some((&v, loans.as_slice())), Some(&a), 5, today()).is_empty());
    }

    #[test]
    fn test_eligibility_limit_counts_existing_loans() {
        let v = visitor(Decimal::ZERO);
        let a = artefact(true, false);
        let four: Vec<Loan> = (1..=4).map(|id| loan(id, ExchangeStatus::Pending, None)).collect();
        assert!(eligibility_violations(Some((&v, four.as_slice())), Some(&a), 5, today()).is_empty());

        let five: Vec<Loan> = (1..=5).map(|id| loan(id, ExchangeStatus::Pending, None)).collect();
        assert_eq!(eligibility_violations(Some((&v, five.as_slice())), Some(&a), 5, today()).len(), 1);
    }
}
