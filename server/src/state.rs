use std::sync::Arc;

use crate::config::Config;
use crate::models::PremiereDetails;
use crate::services::{
    FundraisingService, HttpSourceFetcher, MailSettings, ReservationNotifier, ResendClient,
};

/// Collaborators shared by every request. Nothing in here changes after
/// startup.
#[derive(Clone)]
pub struct AppState {
    pub fundraising: FundraisingService,
    pub notifier: ReservationNotifier,
}

impl AppState {
    pub fn new(fundraising: FundraisingService, notifier: ReservationNotifier) -> Self {
        Self {
            fundraising,
            notifier,
        }
    }
}

pub fn build_state(config: &Config) -> AppState {
    let client = reqwest::Client::new();

    let fundraising = FundraisingService::new(
        Arc::new(HttpSourceFetcher::new(client.clone())),
        config.fundraising_source_url.clone(),
    );

    if config.resend_api_key.is_none() {
        tracing::warn!("RESEND_API_KEY is not set; reservations will be rejected");
    }

    let notifier = ReservationNotifier::new(
        Arc::new(ResendClient::new(client, config.resend_api_url.clone())),
        MailSettings {
            api_key: config.resend_api_key.clone(),
            from: config.mail_from.clone(),
            organizer_email: config.organizer_email.clone(),
        },
        PremiereDetails::screening(),
    );

    AppState::new(fundraising, notifier)
}
