use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::models::{PremiereDetails, Reservation};
use crate::services::mailer::{DispatchError, MailTransport, OutgoingEmail};
use crate::services::templates::{organizer_notification, visitor_confirmation, EmailTemplate};

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("mail provider API key is not configured")]
    MissingCredential,
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

#[derive(Debug, Clone)]
pub struct MailSettings {
    pub api_key: Option<String>,
    pub from: String,
    pub organizer_email: String,
}

/// Sends the organizer notification and the visitor confirmation for one
/// reservation. Succeeds only when both sends succeed.
#[derive(Clone)]
pub struct ReservationNotifier {
    transport: Arc<dyn MailTransport>,
    settings: MailSettings,
    premiere: PremiereDetails,
}

impl ReservationNotifier {
    pub fn new(
        transport: Arc<dyn MailTransport>,
        settings: MailSettings,
        premiere: PremiereDetails,
    ) -> Self {
        Self {
            transport,
            settings,
            premiere,
        }
    }

    pub fn settings(&self) -> &MailSettings {
        &self.settings
    }

    pub fn transport(&self) -> &Arc<dyn MailTransport> {
        &self.transport
    }

    /// Both messages rendered for `reservation`, organizer first.
    pub fn messages(&self, reservation: &Reservation) -> [OutgoingEmail; 2] {
        [
            self.outgoing(
                &self.settings.organizer_email,
                organizer_notification(reservation),
            ),
            self.outgoing(
                &reservation.email,
                visitor_confirmation(reservation, &self.premiere),
            ),
        ]
    }

    pub async fn notify(&self, reservation: &Reservation) -> Result<(), NotifyError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or(NotifyError::MissingCredential)?;

        let [organizer, visitor] = self.messages(reservation);

        info!(tickets = reservation.tickets, "Dispatching reservation emails");
        let (organizer_sent, visitor_sent) = tokio::join!(
            self.transport.send(api_key, &organizer),
            self.transport.send(api_key, &visitor),
        );
        organizer_sent?;
        visitor_sent?;

        info!("Reservation emails sent");
        Ok(())
    }

    fn outgoing(&self, to: &str, template: EmailTemplate) -> OutgoingEmail {
        OutgoingEmail {
            from: self.settings.from.clone(),
            to: to.to_string(),
            subject: template.subject,
            html: template.html_body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mailer::ProbeStatus;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<OutgoingEmail>>,
        reject_to: Option<&'static str>,
    }

    #[async_trait]
    impl MailTransport for RecordingTransport {
        async fn send(&self, _api_key: &str, email: &OutgoingEmail) -> Result<(), DispatchError> {
            self.sent.lock().unwrap().push(email.clone());
            if self.reject_to == Some(email.to.as_str()) {
                return Err(DispatchError::Provider {
                    status: 422,
                    message: "Invalid `to` field.".to_string(),
                });
            }
            Ok(())
        }

        async fn probe(&self, _api_key: &str, _from: &str) -> ProbeStatus {
            ProbeStatus::ValidKey
        }
    }

    fn settings(api_key: Option<&str>) -> MailSettings {
        MailSettings {
            api_key: api_key.map(str::to_string),
            from: "noreply@resend.dev".to_string(),
            organizer_email: "team@example.org".to_string(),
        }
    }

    fn reservation() -> Reservation {
        Reservation {
            name: "Ana".to_string(),
            email: "ana@x.de".to_string(),
            tickets: 2,
            phone: None,
            message: None,
        }
    }

    fn notifier(transport: Arc<RecordingTransport>, api_key: Option<&str>) -> ReservationNotifier {
        ReservationNotifier::new(transport, settings(api_key), PremiereDetails::screening())
    }

    #[tokio::test]
    async fn test_sends_both_messages() {
        let transport = Arc::new(RecordingTransport::default());
        notifier(transport.clone(), Some("re_123"))
            .notify(&reservation())
            .await
            .unwrap();

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        let recipients: Vec<&str> = sent.iter().map(|e| e.to.as_str()).collect();
        assert!(recipients.contains(&"team@example.org"));
        assert!(recipients.contains(&"ana@x.de"));
        assert!(sent.iter().all(|e| e.from == "noreply@resend.dev"));
    }

    #[tokio::test]
    async fn test_missing_credential_sends_nothing() {
        let transport = Arc::new(RecordingTransport::default());
        let result = notifier(transport.clone(), None)
            .notify(&reservation())
            .await;

        assert!(matches!(result, Err(NotifyError::MissingCredential)));
        assert!(transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_either_failure_fails_the_whole_dispatch() {
        let transport = Arc::new(RecordingTransport {
            reject_to: Some("ana@x.de"),
            ..Default::default()
        });
        let result = notifier(transport.clone(), Some("re_123"))
            .notify(&reservation())
            .await;

        match result {
            Err(NotifyError::Dispatch(DispatchError::Provider { status, message })) => {
                assert_eq!(status, 422);
                assert_eq!(message, "Invalid `to` field.");
            }
            other => panic!("expected dispatch error, got {:?}", other),
        }
        // both sends were still issued
        assert_eq!(transport.sent.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_messages_are_addressed() {
        let transport = Arc::new(RecordingTransport::default());
        let [organizer, visitor] = notifier(transport, None).messages(&reservation());

        assert_eq!(organizer.to, "team@example.org");
        assert_eq!(organizer.subject, "Neue Ticket-Reservierung: Ana (2 Tickets)");
        assert_eq!(visitor.to, "ana@x.de");
        assert!(visitor.html.contains("Hallo Ana,"));
    }
}
