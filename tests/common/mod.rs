#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request},
    Router,
};
use catalog_api::{
    app_router,
    config::AppConfig,
    db::{self, DbConfig},
    entities::{material, product, product_image, product_image_link, product_material},
    notifications::{EmailMessage, Mailer, NotificationDispatcher, NotificationError},
    AppState,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

pub const ADMIN_EMAIL: &str = "admin@catalog.test";

/// Mailer that keeps every message in memory and can be told to fail.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<EmailMessage>>,
    failing: AtomicBool,
}

impl RecordingMailer {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().expect("mailer lock poisoned").clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotificationError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotificationError::Rejected {
                status: 503,
                body: "relay unavailable".to_string(),
            });
        }
        self.sent
            .lock()
            .expect("mailer lock poisoned")
            .push(message.clone());
        Ok(())
    }
}

/// Test harness wiring the full router against a throwaway SQLite database.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub mailer: Arc<RecordingMailer>,
    _db_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_dir = tempfile::tempdir().expect("create temp dir for sqlite");
        let db_path = db_dir.path().join("catalog-test.db");
        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

        let mut cfg = AppConfig::new(
            db_url.clone(),
            "127.0.0.1".to_string(),
            8000,
            "test".to_string(),
        );
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;
        cfg.notifications.admin_email = ADMIN_EMAIL.to_string();

        let db = db::establish_connection_with_config(&DbConfig::from(&cfg))
            .await
            .expect("connect to sqlite test database");
        db::run_migrations(&db)
            .await
            .expect("apply migrations to test database");

        let mailer = Arc::new(RecordingMailer::default());
        let notifier = NotificationDispatcher::new(
            mailer.clone(),
            ADMIN_EMAIL,
            cfg.notifications.from_email.clone(),
        );

        let state = AppState::new(Arc::new(db), cfg, notifier);
        let router = app_router(state.clone());

        Self {
            router,
            state,
            mailer,
            _db_dir: db_dir,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.state.db
    }

    /// Send a request through the router, optionally with a JSON body and a cookie.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(cookie) = cookie {
            builder = builder.header("cookie", cookie);
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// POST a raw, possibly malformed, JSON body.
    pub async fn post_raw(&self, uri: &str, raw: &str) -> axum::response::Response {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(raw.to_string()))
            .expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    pub async fn get(&self, uri: &str) -> axum::response::Response {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> axum::response::Response {
        self.request(Method::POST, uri, Some(body), None).await
    }

    /// Insert a bare product with no images or materials.
    pub async fn seed_product(&self, name: &str, date: NaiveDate, price: Decimal) -> product::Model {
        let model = product::Model {
            id: Uuid::new_v4(),
            name: name.to_string(),
            style_number: format!("ST-{}", name.to_uppercase().replace(' ', "-")),
            date,
            description: format!("{name} seeded for integration tests"),
            sample_type: "Proto".to_string(),
            category: "Dresses".to_string(),
            main_category: "Women".to_string(),
            price,
            image: format!("products/{}.jpg", name.to_lowercase().replace(' ', "_")),
        };

        product::Entity::insert(product::ActiveModel::from(model.clone()))
            .exec_without_returning(self.db())
            .await
            .expect("seed product");
        model
    }

    pub async fn seed_image(&self, product_id: Uuid, path: &str) -> product_image::Model {
        let image = product_image::Model {
            id: Uuid::new_v4(),
            image_url: path.to_string(),
        };
        product_image::Entity::insert(product_image::ActiveModel::from(image.clone()))
            .exec_without_returning(self.db())
            .await
            .expect("seed product image");
        self.link_image(product_id, image.id).await;
        image
    }

    pub async fn link_image(&self, product_id: Uuid, image_id: Uuid) {
        product_image_link::Entity::insert(product_image_link::ActiveModel {
            product_id: Set(product_id),
            product_image_id: Set(image_id),
        })
        .exec_without_returning(self.db())
        .await
        .expect("link product image");
    }

    pub async fn seed_material(&self, product_id: Uuid, name: &str) -> material::Model {
        let material = material::Model {
            id: Uuid::new_v4(),
            material: name.to_string(),
        };
        material::Entity::insert(material::ActiveModel::from(material.clone()))
            .exec_without_returning(self.db())
            .await
            .expect("seed material");
        self.link_material(product_id, material.id).await;
        material
    }

    pub async fn link_material(&self, product_id: Uuid, material_id: Uuid) {
        product_material::Entity::insert(product_material::ActiveModel {
            product_id: Set(product_id),
            material_id: Set(material_id),
        })
        .exec_without_returning(self.db())
        .await
        .expect("link material");
    }
}

pub async fn response_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("response body is json")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}
