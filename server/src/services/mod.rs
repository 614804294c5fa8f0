pub mod fundraising;
pub mod mailer;
pub mod notifier;
pub mod templates;

pub use fundraising::{FundraisingService, HttpSourceFetcher, SourceFetcher};
pub use mailer::{MailTransport, ProbeStatus, ResendClient};
pub use notifier::{MailSettings, NotifyError, ReservationNotifier};
