#![allow(dead_code)]
mod app;
mod client;
mod fakes;
mod logs;

pub use app::{firebase_settings, spawn_app, spawn_app_with, spawn_server, TestApp};
pub use client::*;
pub use fakes::{Account, FakeDocumentStore, FakeIdentityProvider, StoredDocument};
pub use logs::CapturedLogs;

use lazy_static::lazy_static;

use cashier::telemetry::{generate_subscriber, init_subscriber};

lazy_static! {
    /// To ensure logs are only outputted in tests when required, by default
    /// tests run with no logs being captured
    ///
    /// In order to set logs to be captured during tests run them with:
    /// `TEST_LOG=true cargo test | bunyan`
    pub static ref TRACING: () = {
        if std::env::var("TEST_LOG").is_ok() {
            init_subscriber(generate_subscriber("test".into(), "debug".into(), std::io::stdout));
        } else {
            init_subscriber(generate_subscriber("test".into(), "debug".into(), std::io::sink));
        }
    };
}
