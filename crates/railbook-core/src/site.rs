//! Element targets for the booking site and the chat client.
//!
//! Every selector the run uses lives here. Defaults match the current
//! markup of the booking site; `[site.locators]` overrides any slot by name.

use std::collections::HashMap;

use railbook_protocols::Locator;

use crate::plan::PlanError;

/// Named locators for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorTable {
    // Search form
    pub origin_input: Locator,
    pub origin_suggestion: Locator,
    pub destination_input: Locator,
    pub destination_suggestion: Locator,
    pub date_input: Locator,
    pub search_button: Locator,

    // Train list
    pub class_tab: Locator,
    pub availability_cell: Locator,
    pub book_now: Locator,

    // Login dialog
    pub username_input: Locator,
    pub password_input: Locator,
    pub login_submit: Locator,
    pub login_error: Locator,

    // Passenger rows. Rows repeat without a distinguishing attribute, so
    // these are CSS: the row is taken by position and fields inside it.
    pub passenger_row: String,
    pub passenger_name: String,
    pub passenger_age: String,
    pub passenger_gender: String,
    pub add_passenger: Locator,

    // Contact details
    pub contact_phone: Locator,
    pub contact_address: Locator,
    pub contact_postal_code: Locator,
    pub continue_button: Locator,

    // Review and payment
    pub review_continue: Locator,
    pub payment_method: Locator,
    pub pay_and_book: Locator,
    pub card_number: Locator,
    pub card_expiry: Locator,
    pub card_cvv: Locator,
    pub card_holder: Locator,
    pub pay_submit: Locator,

    // Confirmation page
    pub transaction_id: Locator,
    pub reservation_id: Locator,

    pub chat: ChatLocators,
}

/// Targets inside the chat web client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLocators {
    /// Present once the client has loaded and is logged in.
    pub ready: Locator,
    pub search: Locator,
    pub message_box: Locator,
}

impl Default for ChatLocators {
    fn default() -> Self {
        Self {
            ready: Locator::css("div#side div[contenteditable='true']"),
            search: Locator::css("div#side div[contenteditable='true']"),
            message_box: Locator::css("footer div[contenteditable='true']"),
        }
    }
}

impl Default for LocatorTable {
    fn default() -> Self {
        Self {
            origin_input: Locator::css("p-autocomplete[formcontrolname='origin'] input"),
            origin_suggestion: Locator::css(
                "p-autocomplete[formcontrolname='origin'] li[role='option']",
            ),
            destination_input: Locator::css("p-autocomplete[formcontrolname='destination'] input"),
            destination_suggestion: Locator::css(
                "p-autocomplete[formcontrolname='destination'] li[role='option']",
            ),
            date_input: Locator::css("p-calendar[formcontrolname='journeyDate'] input"),
            search_button: Locator::css("button.search_btn.train_Search"),

            class_tab: Locator::nth("app-train-avl-enq div.pre-avl", 0),
            availability_cell: Locator::nth("app-train-avl-enq td.link div.pre-avl", 0),
            book_now: Locator::nth("app-train-avl-enq button.btnDefault.train_Search", 0),

            username_input: Locator::css("input[formcontrolname='userid']"),
            password_input: Locator::css("input[formcontrolname='password']"),
            login_submit: Locator::css("app-login button[type='submit']"),
            login_error: Locator::css("app-login div.loginError"),

            passenger_row: "app-passenger".to_string(),
            passenger_name: "input[formcontrolname='passengerName']".to_string(),
            passenger_age: "input[formcontrolname='passengerAge']".to_string(),
            passenger_gender: "select[formcontrolname='passengerGender']".to_string(),
            add_passenger: Locator::xpath("//span[normalize-space()='+ Add Passenger']"),

            contact_phone: Locator::css("input[formcontrolname='mobileNumber']"),
            contact_address: Locator::css("input[formcontrolname='address']"),
            contact_postal_code: Locator::css("input[formcontrolname='pinCode']"),
            continue_button: Locator::css("app-passenger-input button.train_Search[type='submit']"),

            review_continue: Locator::css("app-review-booking button.train_Search"),
            payment_method: Locator::nth("app-payment-options div.bank-type", 0),
            pay_and_book: Locator::css("app-payment-options button.btn-primary"),
            card_number: Locator::css("input[name='cardNumber']"),
            card_expiry: Locator::css("input[name='expiry']"),
            card_cvv: Locator::css("input[name='cvv']"),
            card_holder: Locator::css("input[name='cardHolderName']"),
            pay_submit: Locator::css("button.pay-button[type='submit']"),

            transaction_id: Locator::css("app-booking-confirm span.transaction-id"),
            reservation_id: Locator::css("app-booking-confirm span.pnr-number"),

            chat: ChatLocators::default(),
        }
    }
}

/// Slots that must stay plain CSS because they are combined positionally.
const CSS_SLOTS: &[&str] = &[
    "passenger_row",
    "passenger_name",
    "passenger_age",
    "passenger_gender",
];

impl LocatorTable {
    /// Every slot name accepted by [`LocatorTable::apply_overrides`].
    pub const SLOT_NAMES: &'static [&'static str] = &[
        "origin_input",
        "origin_suggestion",
        "destination_input",
        "destination_suggestion",
        "date_input",
        "search_button",
        "class_tab",
        "availability_cell",
        "book_now",
        "username_input",
        "password_input",
        "login_submit",
        "login_error",
        "passenger_row",
        "passenger_name",
        "passenger_age",
        "passenger_gender",
        "add_passenger",
        "contact_phone",
        "contact_address",
        "contact_postal_code",
        "continue_button",
        "review_continue",
        "payment_method",
        "pay_and_book",
        "card_number",
        "card_expiry",
        "card_cvv",
        "card_holder",
        "pay_submit",
        "transaction_id",
        "reservation_id",
        "chat_ready",
        "chat_search",
        "chat_message_box",
    ];

    fn slot_mut(&mut self, name: &str) -> Option<&mut Locator> {
        let slot = match name {
            "origin_input" => &mut self.origin_input,
            "origin_suggestion" => &mut self.origin_suggestion,
            "destination_input" => &mut self.destination_input,
            "destination_suggestion" => &mut self.destination_suggestion,
            "date_input" => &mut self.date_input,
            "search_button" => &mut self.search_button,
            "class_tab" => &mut self.class_tab,
            "availability_cell" => &mut self.availability_cell,
            "book_now" => &mut self.book_now,
            "username_input" => &mut self.username_input,
            "password_input" => &mut self.password_input,
            "login_submit" => &mut self.login_submit,
            "login_error" => &mut self.login_error,
            "add_passenger" => &mut self.add_passenger,
            "contact_phone" => &mut self.contact_phone,
            "contact_address" => &mut self.contact_address,
            "contact_postal_code" => &mut self.contact_postal_code,
            "continue_button" => &mut self.continue_button,
            "review_continue" => &mut self.review_continue,
            "payment_method" => &mut self.payment_method,
            "pay_and_book" => &mut self.pay_and_book,
            "card_number" => &mut self.card_number,
            "card_expiry" => &mut self.card_expiry,
            "card_cvv" => &mut self.card_cvv,
            "card_holder" => &mut self.card_holder,
            "pay_submit" => &mut self.pay_submit,
            "transaction_id" => &mut self.transaction_id,
            "reservation_id" => &mut self.reservation_id,
            "chat_ready" => &mut self.chat.ready,
            "chat_search" => &mut self.chat.search,
            "chat_message_box" => &mut self.chat.message_box,
            _ => return None,
        };
        Some(slot)
    }

    fn css_slot_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "passenger_row" => Some(&mut self.passenger_row),
            "passenger_name" => Some(&mut self.passenger_name),
            "passenger_age" => Some(&mut self.passenger_age),
            "passenger_gender" => Some(&mut self.passenger_gender),
            _ => None,
        }
    }

    /// Replace slots by name. Values use `css=`, `xpath=` or a bare CSS
    /// selector.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Result<(), PlanError> {
        // Sorted so the first reported error does not depend on hash order.
        let mut names: Vec<&String> = overrides.keys().collect();
        names.sort();

        for name in names {
            let raw = &overrides[name];
            let parsed: Locator = raw.parse().map_err(|message| PlanError::Locator {
                name: name.clone(),
                message,
            })?;

            if CSS_SLOTS.contains(&name.as_str()) {
                let Locator::Css(selector) = parsed else {
                    return Err(PlanError::Locator {
                        name: name.clone(),
                        message: "row locators must be CSS selectors".to_string(),
                    });
                };
                if let Some(slot) = self.css_slot_mut(name) {
                    *slot = selector;
                }
                continue;
            }

            let slot = self.slot_mut(name).ok_or_else(|| PlanError::Locator {
                name: name.clone(),
                message: "unknown locator name".to_string(),
            })?;
            *slot = parsed;
        }
        Ok(())
    }

    /// Passenger row `index` (0-based), by position.
    pub fn passenger_row(&self, index: usize) -> Locator {
        Locator::nth(self.passenger_row.clone(), index)
    }

    pub fn passenger_name_field(&self, index: usize) -> Locator {
        self.passenger_row(index).within(self.passenger_name.clone())
    }

    pub fn passenger_age_field(&self, index: usize) -> Locator {
        self.passenger_row(index).within(self.passenger_age.clone())
    }

    pub fn passenger_gender_field(&self, index: usize) -> Locator {
        self.passenger_row(index).within(self.passenger_gender.clone())
    }
}
