use std::sync::Arc;
use video_frame_notifier::error::NotifierError;
use video_frame_notifier::notifier::Notifier;
use video_frame_notifier::settings::NotifierSettings;

#[derive(Clone)]
pub struct AppState {
    pub notifier: Arc<Notifier>,
}

impl AppState {
    pub fn new(settings: &NotifierSettings) -> Result<Self, NotifierError> {
        let notifier = Notifier::from_settings(settings)?;

        Ok(Self { notifier: Arc::new(notifier) })
    }
}
