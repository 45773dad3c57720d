//! Booking run state machine.
//!
//! One run walks [`BookingState`] strictly forward. Form steps fail fast;
//! ticket and notification steps continue past per-passenger failures.
//! Whatever happens after the session opens, it is closed exactly once.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use railbook_protocols::{
    ArtifactEmitter, ArtifactError, BookingError, BookingState, BrowserLauncher, DriverError,
    Locator, NotificationError, Notifier, PageDriver, ReadyState, ReceiptIds, TicketRecord,
};
use tracing::{debug, error, info, warn};

use crate::plan::BookingPlan;
use crate::run_state::{RunOutcome, RunState};

/// Run one driver action as `step` of the state being entered.
async fn act<T, F>(state: &mut RunState, step: &'static str, op: F) -> Result<T, BookingError>
where
    F: Future<Output = Result<T, DriverError>>,
{
    state.set_step(step);
    op.await
        .map_err(|e| BookingError::from_driver(state.attempting(), step, e))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panic: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panic: {}", s)
    } else {
        "panic with non-string payload".to_string()
    }
}

/// Drives one booking run over a browser session.
pub struct BookingOrchestrator {
    launcher: Arc<dyn BrowserLauncher>,
    emitter: Arc<dyn ArtifactEmitter>,
    notifier: Option<Arc<dyn Notifier>>,
    plan: BookingPlan,
}

impl BookingOrchestrator {
    pub fn new(
        launcher: Arc<dyn BrowserLauncher>,
        emitter: Arc<dyn ArtifactEmitter>,
        plan: BookingPlan,
    ) -> Self {
        Self {
            launcher,
            emitter,
            notifier: None,
            plan,
        }
    }

    /// Attach the notifier used when notifications are enabled.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn plan(&self) -> &BookingPlan {
        &self.plan
    }

    fn active_notifier(&self) -> Option<&Arc<dyn Notifier>> {
        if self.plan.notification.enabled {
            self.notifier.as_ref()
        } else {
            None
        }
    }

    /// Execute the run.
    ///
    /// `Ok` means payment went through; per-passenger ticket and
    /// notification failures are reported inside the [`RunOutcome`].
    pub async fn run(&self) -> Result<RunOutcome, BookingError> {
        let mut state = RunState::new();
        state.set_notifications_enabled(self.active_notifier().is_some());

        info!(
            "Booking {} passenger(s) from {} to {} on {}",
            self.plan.journey.passengers().len(),
            self.plan.journey.origin(),
            self.plan.journey.destination(),
            self.plan.journey.date()
        );

        state.set_step("open_session");
        let page = match self.launcher.open(&self.plan.session).await {
            Ok(page) => page,
            Err(source) => {
                let err = BookingError::SessionInit {
                    phase: BookingState::SessionOpen,
                    step: "open_session".to_string(),
                    source,
                };
                error!("{}", err);
                return Err(err);
            }
        };
        state.set_session_live(true);
        state.complete_step();

        let driven = AssertUnwindSafe(self.drive(page.as_ref(), &mut state))
            .catch_unwind()
            .await;

        let result = match driven {
            Ok(result) => result,
            Err(payload) => Err(BookingError::Unknown {
                phase: state.attempting(),
                step: state.step().to_string(),
                message: panic_message(payload.as_ref()),
            }),
        };

        if let Err(err) = &result {
            error!("{}", err);
            if err.phase().is_fail_fast() && self.plan.failure_screenshots {
                self.save_failure_screenshot(page.as_ref(), err.phase()).await;
            }
        }

        page.close().await;
        state.terminate();
        info!("[{}] browser session closed", BookingState::Terminated);

        result.map(|()| state.into_outcome())
    }

    async fn drive(&self, page: &dyn PageDriver, state: &mut RunState) -> Result<(), BookingError> {
        self.open_home(page, state).await?;
        self.submit_search(page, state).await?;
        self.select_train(page, state).await?;
        self.log_in(page, state).await?;
        self.enter_passengers(page, state).await?;
        self.enter_contact(page, state).await?;
        self.reach_payment(page, state).await?;
        let receipt = self.submit_payment(page, state).await?;
        self.emit_tickets(state, &receipt).await;
        self.send_notifications(page, state).await;
        Ok(())
    }

    async fn open_home(&self, page: &dyn PageDriver, state: &mut RunState) -> Result<(), BookingError> {
        act(state, "open_home", page.goto(&self.plan.home_url, ReadyState::NetworkIdle)).await?;
        state.complete_step();
        Ok(())
    }

    async fn submit_search(&self, page: &dyn PageDriver, state: &mut RunState) -> Result<(), BookingError> {
        let l = &self.plan.locators;
        let journey = &self.plan.journey;
        let delay = self.plan.typing_delay;

        act(state, "enter_origin", page.enter_text(&l.origin_input, journey.origin(), delay)).await?;
        act(state, "pick_origin", page.activate(&l.origin_suggestion, None)).await?;
        act(
            state,
            "enter_destination",
            page.enter_text(&l.destination_input, journey.destination(), delay),
        )
        .await?;
        act(state, "pick_destination", page.activate(&l.destination_suggestion, None)).await?;
        act(state, "enter_date", page.enter_text(&l.date_input, journey.date(), delay)).await?;
        act(state, "confirm_date", page.press_key(&l.date_input, "Enter")).await?;
        act(state, "submit_search", page.activate(&l.search_button, None)).await?;

        state.complete_step();
        Ok(())
    }

    async fn select_train(&self, page: &dyn PageDriver, state: &mut RunState) -> Result<(), BookingError> {
        let l = &self.plan.locators;

        act(state, "select_class", page.activate(&l.class_tab, None)).await?;
        act(state, "select_availability", page.activate(&l.availability_cell, None)).await?;
        act(state, "book_now", page.activate(&l.book_now, None)).await?;

        state.complete_step();
        Ok(())
    }

    async fn log_in(&self, page: &dyn PageDriver, state: &mut RunState) -> Result<(), BookingError> {
        let l = &self.plan.locators;
        let credentials = &self.plan.credentials;
        let delay = self.plan.typing_delay;

        act(
            state,
            "enter_username",
            page.enter_text(&l.username_input, &credentials.username, delay),
        )
        .await?;
        act(
            state,
            "enter_password",
            page.enter_text(&l.password_input, &credentials.password, delay),
        )
        .await?;

        state.set_step("login_gate");
        self.plan.login_gate.hold(page).await;

        act(state, "submit_login", page.activate(&l.login_submit, None)).await?;

        let banner = act(state, "check_login", page.probe_text(&l.login_error)).await?;
        if let Some(message) = banner.filter(|m| !m.trim().is_empty()) {
            return Err(BookingError::Authentication {
                phase: state.attempting(),
                step: "check_login".to_string(),
                message: message.trim().to_string(),
            });
        }

        state.complete_step();
        Ok(())
    }

    async fn enter_passengers(&self, page: &dyn PageDriver, state: &mut RunState) -> Result<(), BookingError> {
        let l = &self.plan.locators;
        let delay = self.plan.typing_delay;

        for (i, passenger) in self.plan.journey.passengers().iter().enumerate() {
            if i > 0 {
                act(state, "add_passenger", page.activate(&l.add_passenger, None)).await?;
            }

            let name_field = l.passenger_name_field(i);
            act(state, "enter_passenger_name", page.enter_text(&name_field, &passenger.name, delay)).await?;
            act(
                state,
                "enter_passenger_age",
                page.enter_text(&l.passenger_age_field(i), &passenger.age, delay),
            )
            .await?;
            act(
                state,
                "choose_passenger_gender",
                page.choose_option(&l.passenger_gender_field(i), passenger.gender.code()),
            )
            .await?;
            act(state, "confirm_passenger", page.press_key(&name_field, "Enter")).await?;

            debug!("Passenger row {} filled for {}", i, passenger.name);
        }

        state.complete_step();
        Ok(())
    }

    async fn enter_contact(&self, page: &dyn PageDriver, state: &mut RunState) -> Result<(), BookingError> {
        let l = &self.plan.locators;
        let contact = &self.plan.contact;
        let delay = self.plan.typing_delay;

        act(state, "enter_phone", page.enter_text(&l.contact_phone, &contact.phone, delay)).await?;
        act(state, "enter_address", page.enter_text(&l.contact_address, &contact.address, delay)).await?;
        act(
            state,
            "enter_postal_code",
            page.enter_text(&l.contact_postal_code, &contact.postal_code, delay),
        )
        .await?;
        act(state, "continue_to_review", page.activate(&l.continue_button, None)).await?;

        state.complete_step();
        Ok(())
    }

    async fn reach_payment(&self, page: &dyn PageDriver, state: &mut RunState) -> Result<(), BookingError> {
        let l = &self.plan.locators;

        act(state, "continue_to_payment", page.activate(&l.review_continue, None)).await?;
        act(state, "select_payment_method", page.activate(&l.payment_method, None)).await?;
        act(state, "pay_and_book", page.activate(&l.pay_and_book, None)).await?;

        state.complete_step();
        Ok(())
    }

    async fn submit_payment(
        &self,
        page: &dyn PageDriver,
        state: &mut RunState,
    ) -> Result<ReceiptIds, BookingError> {
        let l = &self.plan.locators;
        let payment = &self.plan.payment;
        let delay = self.plan.typing_delay;

        act(state, "enter_card_number", page.enter_text(&l.card_number, &payment.card_number, delay)).await?;
        act(state, "enter_card_expiry", page.enter_text(&l.card_expiry, &payment.expiry, delay)).await?;
        act(state, "enter_card_cvv", page.enter_text(&l.card_cvv, &payment.cvv, delay)).await?;
        act(
            state,
            "enter_card_holder",
            page.enter_text(&l.card_holder, &payment.holder_name, delay),
        )
        .await?;
        info!("Card {} entered", payment.masked_card());

        state.set_step("payment_gate");
        self.plan.payment_gate.hold(page).await;

        act(state, "submit_payment", page.activate(&l.pay_submit, None)).await?;

        let receipt = match &self.plan.pinned_receipt {
            Some(pinned) => {
                info!("Using receipt ids pinned in configuration");
                pinned.clone()
            }
            None => ReceiptIds {
                transaction_id: self
                    .read_receipt_field(page, state, "read_transaction_id", &l.transaction_id)
                    .await?,
                reservation_id: self
                    .read_receipt_field(page, state, "read_reservation_id", &l.reservation_id)
                    .await?,
            },
        };
        info!(
            "Transaction {} / reservation {}",
            receipt.transaction_id, receipt.reservation_id
        );

        state.complete_step();
        Ok(receipt)
    }

    async fn read_receipt_field(
        &self,
        page: &dyn PageDriver,
        state: &mut RunState,
        step: &'static str,
        target: &Locator,
    ) -> Result<String, BookingError> {
        let text = act(state, step, page.text_of(target, None)).await?;
        if text.is_empty() {
            return Err(BookingError::from_driver(
                state.attempting(),
                step,
                DriverError::interaction(target, "element has no text"),
            ));
        }
        Ok(text)
    }

    async fn emit_tickets(&self, state: &mut RunState, receipt: &ReceiptIds) {
        state.set_step("emit_ticket");
        let records = TicketRecord::for_journey(&self.plan.journey, receipt);

        for record in &records {
            // A panicking emitter costs only this passenger's ticket
            let emitted = AssertUnwindSafe(self.emitter.emit(record))
                .catch_unwind()
                .await
                .unwrap_or_else(|payload| {
                    Err(ArtifactError::Render(panic_message(payload.as_ref())))
                });

            match emitted {
                Ok(path) => {
                    info!("Ticket for {} written to {}", record.passenger_name, path.display());
                    state.add_artifact(path);
                }
                Err(source) => {
                    let err = BookingError::Artifact {
                        phase: BookingState::ArtifactsEmitted,
                        step: "emit_ticket".to_string(),
                        passenger: record.passenger_name.clone(),
                        source,
                    };
                    warn!("{}", err);
                    state.add_artifact_failure(err);
                }
            }
        }

        state.set_records(records);
        state.complete_step();
    }

    async fn send_notifications(&self, page: &dyn PageDriver, state: &mut RunState) {
        let Some(notifier) = self.active_notifier() else {
            info!("Notifications disabled, skipping");
            state.complete_step();
            return;
        };

        let journey = &self.plan.journey;

        state.set_step("open_notification_context");
        let context = match page.new_context().await {
            Ok(context) => context,
            Err(e) => {
                let reason = e.to_string();
                for passenger in journey.passengers() {
                    let err = BookingError::Notification {
                        phase: BookingState::NotificationsSent,
                        step: "open_notification_context".to_string(),
                        passenger: passenger.name.clone(),
                        source: NotificationError::ContextUnavailable(reason.clone()),
                    };
                    warn!("{}", err);
                    state.add_notification_failure(err);
                }
                state.complete_step();
                return;
            }
        };

        state.set_step("dispatch_notification");
        for (i, passenger) in journey.passengers().iter().enumerate() {
            if i > 0 {
                context.pause(self.plan.notification.interval).await;
            }

            let dispatched = AssertUnwindSafe(notifier.dispatch(
                context.as_ref(),
                &passenger.name,
                journey.origin(),
                journey.destination(),
            ))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| {
                Err(NotificationError::Failed(panic_message(payload.as_ref())))
            });

            match dispatched {
                Ok(()) => state.add_notification_sent(),
                Err(source) => {
                    let err = BookingError::Notification {
                        phase: BookingState::NotificationsSent,
                        step: "dispatch_notification".to_string(),
                        passenger: passenger.name.clone(),
                        source,
                    };
                    warn!("{}", err);
                    state.add_notification_failure(err);
                }
            }
        }

        context.close().await;
        state.complete_step();
    }

    async fn save_failure_screenshot(&self, page: &dyn PageDriver, phase: BookingState) {
        let png = match page.screenshot().await {
            Ok(png) => png,
            Err(e) => {
                warn!("Failure screenshot not taken: {}", e);
                return;
            }
        };

        let dir = &self.plan.output_dir;
        let path = dir.join(format!("failure-{}.png", phase));
        let written = async {
            tokio::fs::create_dir_all(dir).await?;
            tokio::fs::write(&path, &png).await
        }
        .await;

        match written {
            Ok(()) => info!("Failure screenshot saved to {}", path.display()),
            Err(e) => warn!("Failed to write {}: {}", path.display(), e),
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
