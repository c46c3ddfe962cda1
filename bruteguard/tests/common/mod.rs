use bruteguard::{api::router::ApiRoutes, settings::config::Settings, AppState};
use axum_test::TestServer;

pub fn test_settings(overrides: &[(&str, &str)]) -> Settings {
    let mut builder = Settings::builder_with_defaults().unwrap();
    for (key, value) in overrides {
        builder = builder.set_override(*key, *value).unwrap();
    }
    builder.build().unwrap().try_deserialize().unwrap()
}

pub struct TestServers {
    pub auth: TestServer,
    pub admin: TestServer,
}

pub async fn create_test_servers(settings: Settings) -> TestServers {
    let state = AppState::new(settings).await.unwrap();
    TestServers {
        auth: TestServer::new(ApiRoutes::auth(state.clone())).unwrap(),
        admin: TestServer::new(ApiRoutes::admin(state)).unwrap(),
    }
}
