//! The checkout dialog's state machine.
//!
//! Entering details → Submitting → Success, or back to Entering details
//! with an inline error and the cart untouched so the shopper can retry.
//! After a successful submission the shell shows the confirmation for
//! [`SUCCESS_DISPLAY_DELAY`], then calls [`CheckoutFlow::complete`] to move
//! to the payment-method-specific terminal view and clear the cart.

use std::time::Duration;

use namo_core::{OrderId, PaymentMethod};

use crate::api::{ApiClient, ApiError, NewOrderRequest, OrderItem};
use crate::cart::CartStore;

/// How long the success confirmation is shown before the terminal view.
pub const SUCCESS_DISPLAY_DELAY: Duration = Duration::from_secs(2);

/// Errors from the checkout flow.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// A required field is blank.
    #[error("please fill in all required fields")]
    MissingDetails,

    /// The order call failed; the flow is back at Entering details.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The requested transition isn't valid from the current state.
    #[error("invalid checkout state for this action")]
    InvalidState,
}

/// What the shopper typed into the checkout form.
#[derive(Debug, Clone)]
pub struct CheckoutDetails {
    pub name: String,
    pub email: String,
    pub address: String,
    pub payment_method: PaymentMethod,
}

impl CheckoutDetails {
    /// Local validation: name, email, and address must be non-blank.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingDetails`] if any required field is
    /// blank.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let required = [&self.name, &self.email, &self.address];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(CheckoutError::MissingDetails);
        }
        Ok(())
    }
}

/// The view shown once checkout has fully resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalView {
    /// UPI QR code.
    ScanToPay,
    /// Pay-on-delivery confirmation.
    CodConfirmation,
}

/// Where the dialog currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutState {
    /// Showing the form; `error` carries the inline message after a failed
    /// attempt.
    EnteringDetails { error: Option<String> },
    /// The order call is in flight; the submit control is disabled.
    Submitting,
    /// The order was accepted; the confirmation is on screen.
    Success { payment_method: PaymentMethod },
    /// Terminal view reached, cart cleared.
    Complete { view: TerminalView },
}

/// The checkout dialog.
#[derive(Debug)]
pub struct CheckoutFlow {
    state: CheckoutState,
}

impl CheckoutFlow {
    /// A fresh dialog at the details form.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: CheckoutState::EnteringDetails { error: None },
        }
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Validate and submit the cart as one order-creation call.
    ///
    /// On success the flow moves to [`CheckoutState::Success`]. On any
    /// failure - local validation, transport, or an error response - it
    /// returns to the details form with an inline error and the cart is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`CheckoutError`]; the state transition has
    /// already happened by the time it is returned.
    pub async fn submit(
        &mut self,
        api: &ApiClient,
        cart: &CartStore,
        details: &CheckoutDetails,
    ) -> Result<OrderId, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        if let Err(e) = details.validate() {
            self.state = CheckoutState::EnteringDetails {
                error: Some(e.to_string()),
            };
            return Err(e);
        }

        self.state = CheckoutState::Submitting;

        let request = NewOrderRequest {
            name: details.name.clone(),
            email: details.email.clone(),
            address: details.address.clone(),
            total_price: cart.total(),
            payment_method: details.payment_method,
            items: cart
                .lines()
                .iter()
                .map(|line| OrderItem {
                    product_id: line.product_id,
                    quantity: i64::from(line.quantity),
                })
                .collect(),
        };

        match api.create_order(&request).await {
            Ok(order_id) => {
                self.state = CheckoutState::Success {
                    payment_method: details.payment_method,
                };
                Ok(order_id)
            }
            Err(e) => {
                self.state = CheckoutState::EnteringDetails {
                    error: Some(e.to_string()),
                };
                Err(e.into())
            }
        }
    }

    /// Resolve the success confirmation into the payment-method-specific
    /// terminal view and clear the cart. The shell calls this after
    /// [`SUCCESS_DISPLAY_DELAY`].
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidState`] unless the flow is in
    /// [`CheckoutState::Success`].
    pub fn complete(&mut self, cart: &mut CartStore) -> Result<TerminalView, CheckoutError> {
        let CheckoutState::Success { payment_method } = self.state else {
            return Err(CheckoutError::InvalidState);
        };

        let view = match payment_method {
            PaymentMethod::Upi => TerminalView::ScanToPay,
            PaymentMethod::Cod => TerminalView::CodConfirmation,
        };

        cart.clear();
        self.state = CheckoutState::Complete { view };

        Ok(view)
    }
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}
