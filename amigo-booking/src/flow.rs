use crate::card::CardDetails;
use crate::models::{BookingSelection, PriceQuote};
use crate::payment::{PaymentAdapter, PaymentReceipt};
use crate::pricing::quote_total;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStep {
    Details,
    Payment,
    Confirmation,
}

impl BookingStep {
    fn name(&self) -> &'static str {
        match self {
            BookingStep::Details => "DETAILS",
            BookingStep::Payment => "PAYMENT",
            BookingStep::Confirmation => "CONFIRMATION",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Invalid step transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Payment failed: {0}")]
    PaymentFailed(String),
}

/// One booking attempt: Details → Payment → Confirmation, strictly in that
/// order. The quote is computed when the user leaves the details step and
/// carried forward; the reference exists only after payment.
#[derive(Debug)]
pub struct BookingFlow {
    selection: BookingSelection,
    step: BookingStep,
    quote: Option<PriceQuote>,
    receipt: Option<PaymentReceipt>,
}

impl BookingFlow {
    pub fn new(selection: BookingSelection) -> Self {
        Self {
            selection,
            step: BookingStep::Details,
            quote: None,
            receipt: None,
        }
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn selection(&self) -> &BookingSelection {
        &self.selection
    }

    pub fn quote(&self) -> Option<&PriceQuote> {
        self.quote.as_ref()
    }

    pub fn receipt(&self) -> Option<&PaymentReceipt> {
        self.receipt.as_ref()
    }

    fn invalid(&self, to: BookingStep) -> BookingError {
        BookingError::InvalidTransition {
            from: self.step.name().to_string(),
            to: to.name().to_string(),
        }
    }

    /// Details → Payment. Computes the total the payment step shows.
    pub fn proceed_to_payment(&mut self) -> Result<&PriceQuote, BookingError> {
        if self.step != BookingStep::Details {
            return Err(self.invalid(BookingStep::Payment));
        }
        self.step = BookingStep::Payment;
        tracing::debug!("Booking flow for {} entered payment", self.selection.name());
        Ok(&*self.quote.insert(quote_total(&self.selection)))
    }

    /// Payment → Details, the "Back to Details" action. The stale quote is
    /// dropped and recomputed on the next forward step.
    pub fn back_to_details(&mut self) -> Result<(), BookingError> {
        if self.step != BookingStep::Payment {
            return Err(self.invalid(BookingStep::Details));
        }
        self.quote = None;
        self.step = BookingStep::Details;
        Ok(())
    }

    /// Payment → Confirmation via the adapter.
    pub async fn pay(
        &mut self,
        adapter: &dyn PaymentAdapter,
        card: &CardDetails,
    ) -> Result<&PaymentReceipt, BookingError> {
        if self.step != BookingStep::Payment {
            return Err(self.invalid(BookingStep::Confirmation));
        }
        let quote = self
            .quote
            .as_ref()
            .ok_or_else(|| BookingError::PaymentFailed("no quote computed".to_string()))?;

        let receipt = adapter.process(self.selection.kind(), quote, card).await?;
        tracing::info!(
            "Booking confirmed for {}: {}",
            self.selection.name(),
            receipt.reference
        );
        self.step = BookingStep::Confirmation;
        Ok(&*self.receipt.insert(receipt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookingKind;
    use crate::payment::SyntheticPaymentAdapter;
    use async_trait::async_trait;

    fn hotel_selection() -> BookingSelection {
        BookingSelection::Hotel {
            name: "Ubud Garden Resort".to_string(),
            price_per_night: "$120".to_string(),
            travellers: 4,
        }
    }

    fn card() -> CardDetails {
        CardDetails::new("4111111111111111", "1226", "123", "Maya Rao")
    }

    #[tokio::test]
    async fn test_booking_lifecycle() {
        let mut flow = BookingFlow::new(hotel_selection());
        assert_eq!(flow.step(), BookingStep::Details);
        assert!(flow.quote().is_none());

        let quote = flow.proceed_to_payment().unwrap();
        assert_eq!(quote.total, 240.0);
        assert_eq!(quote.rooms, Some(2));
        assert_eq!(flow.step(), BookingStep::Payment);

        let adapter = SyntheticPaymentAdapter;
        let receipt = flow.pay(&adapter, &card()).await.unwrap();
        assert!(receipt.reference.starts_with("HTL-"));
        assert_eq!(flow.step(), BookingStep::Confirmation);
    }

    #[tokio::test]
    async fn test_paying_from_details_is_invalid() {
        let mut flow = BookingFlow::new(hotel_selection());
        let adapter = SyntheticPaymentAdapter;

        let err = flow.pay(&adapter, &card()).await.unwrap_err();
        match err {
            BookingError::InvalidTransition { from, to } => {
                assert_eq!(from, "DETAILS");
                assert_eq!(to, "CONFIRMATION");
            }
            other => panic!("expected invalid transition, got {:?}", other),
        }
        assert_eq!(flow.step(), BookingStep::Details);
    }

    #[tokio::test]
    async fn test_double_proceed_is_invalid() {
        let mut flow = BookingFlow::new(hotel_selection());
        flow.proceed_to_payment().unwrap();
        assert!(flow.proceed_to_payment().is_err());
    }

    #[tokio::test]
    async fn test_back_to_details_drops_the_quote() {
        let mut flow = BookingFlow::new(hotel_selection());
        flow.proceed_to_payment().unwrap();
        flow.back_to_details().unwrap();
        assert_eq!(flow.step(), BookingStep::Details);
        assert!(flow.quote().is_none());

        // Forward again recomputes it.
        assert_eq!(flow.proceed_to_payment().unwrap().total, 240.0);
    }

    #[tokio::test]
    async fn test_confirmation_is_terminal() {
        let mut flow = BookingFlow::new(hotel_selection());
        flow.proceed_to_payment().unwrap();
        let adapter = SyntheticPaymentAdapter;
        flow.pay(&adapter, &card()).await.unwrap();

        assert!(flow.pay(&adapter, &card()).await.is_err());
        assert!(flow.back_to_details().is_err());
        assert!(flow.proceed_to_payment().is_err());
    }

    struct RejectingAdapter;

    #[async_trait]
    impl PaymentAdapter for RejectingAdapter {
        async fn process(
            &self,
            _kind: BookingKind,
            _quote: &PriceQuote,
            _card: &CardDetails,
        ) -> Result<PaymentReceipt, BookingError> {
            Err(BookingError::PaymentFailed("declined".to_string()))
        }
    }

    #[tokio::test]
    async fn test_failed_payment_stays_on_payment_step() {
        let mut flow = BookingFlow::new(hotel_selection());
        flow.proceed_to_payment().unwrap();

        assert!(flow.pay(&RejectingAdapter, &card()).await.is_err());
        assert_eq!(flow.step(), BookingStep::Payment);
        assert!(flow.receipt().is_none());
    }
}
