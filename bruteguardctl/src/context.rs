use crate::utils::ui::Ui;
use std::sync::Arc;

/// ServerSettings contain information for connecting to the bruteguard admin API
#[derive(Clone, Debug)]
pub struct ServerSettings {
    pub server: String,
}

/// AppContext provides access to shared application resources
pub struct AppContext {
    pub ui: Arc<Ui>,
    pub server: ServerSettings,
}

impl AppContext {
    pub fn new(server: ServerSettings) -> Self {
        AppContext {
            ui: Arc::new(Ui::new()),
            server,
        }
    }

    pub fn ui(&self) -> &Arc<Ui> {
        &self.ui
    }

    pub fn server(&self) -> &ServerSettings {
        &self.server
    }
}
