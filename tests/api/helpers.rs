use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, Response};

use secrecy::Secret;

use serde::Serialize;

use url::Url;

use wiremock::matchers::*;
use wiremock::{Mock, MockServer, ResponseTemplate};

use contactd::app;
use contactd::auth::AdminPassword;
use contactd::client::CaptchaClient;
use contactd::error::PersistenceError;
use contactd::model::{Contact, NewContact};
use contactd::repo::{ContactStore, MemoryContactStore};

#[derive(Debug, Clone, Serialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub token: Option<String>,
}

impl ContactForm {
    /// A complete submission with randomized content
    pub fn fake() -> Self {
        use fake::faker::internet::en::SafeEmail;
        use fake::faker::lorem::en::{Paragraph, Sentence};
        use fake::faker::name::en::Name;
        use fake::Fake;

        Self {
            name: Some(Name().fake()),
            email: Some(SafeEmail().fake()),
            subject: Some(Sentence(1..4).fake()),
            message: Some(Paragraph(1..3).fake()),
            token: Some("valid".into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdminBody {
    pub password: Option<String>,
}

/// A store whose backend is always unreachable
pub struct FailingContactStore;

#[async_trait::async_trait]
impl ContactStore for FailingContactStore {
    async fn create(&self, _: NewContact) -> Result<Contact, PersistenceError> {
        Err(sqlx::Error::PoolClosed.into())
    }

    async fn list_all(&self) -> Result<Vec<Contact>, PersistenceError> {
        Err(sqlx::Error::PoolClosed.into())
    }

    async fn delete_by_id(&self, _: &str) -> Result<bool, PersistenceError> {
        Err(sqlx::Error::PoolClosed.into())
    }
}

pub struct TestApp {
    addr: String,

    pub client: Client,
    pub captcha_server: MockServer,
    pub store: Arc<MemoryContactStore>,
    pub admin_password: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let store = Arc::new(MemoryContactStore::new());
        Self::spawn_with_store(store.clone(), store).await
    }

    /// Spawn an app whose storage backend fails every operation
    ///
    /// `store` stays empty since the app never reaches it.
    pub async fn spawn_with_failing_store() -> Self {
        Self::spawn_with_store(
            Arc::new(FailingContactStore),
            Arc::new(MemoryContactStore::new()),
        )
        .await
    }

    async fn spawn_with_store(
        app_store: Arc<dyn ContactStore>,
        store: Arc<MemoryContactStore>,
    ) -> Self {
        use rand::{distributions::Alphanumeric, Rng};

        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to listen on random port");
        let port = listener.local_addr().unwrap().port();

        let addr = format!("http://127.0.0.1:{}", port);

        let admin_password: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(16)
            .map(char::from)
            .collect();

        let captcha_server = MockServer::start().await;

        let verifier = {
            let api_url = Url::parse(&captcha_server.uri())
                .and_then(|url| url.join("siteverify"))
                .expect("Failed to parse mock server uri");
            let secret = Secret::new("TestCaptchaSecret".into());
            let api_timeout = Duration::from_secs(2);

            CaptchaClient::new(api_url, api_timeout, secret).expect("Failed to create captcha client")
        };

        let server = app::run(
            listener,
            app_store,
            Arc::new(verifier),
            AdminPassword::new(Secret::new(admin_password.clone()))
                .expect("Failed to create admin password"),
        )
        .expect("Failed to spawn app instance");
        let _ = tokio::spawn(server);

        let client = Client::new();

        Self {
            addr,
            client,
            captcha_server,
            store,
            admin_password,
        }
    }

    /// Make the CAPTCHA service answer every request with a fixed verdict
    pub async fn mock_captcha_verdict(&self, success: bool, expected_calls: u64) {
        Mock::given(path("/siteverify"))
            .and(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "success": success })),
            )
            .expect(expected_calls)
            .mount(&self.captcha_server)
            .await;
    }

    /// Insert a contact directly, bypassing verification
    pub async fn insert_contact(&self, subject: &str) -> Contact {
        self.store
            .create(NewContact {
                name: "Test Name".parse().unwrap(),
                email: "test@test.com".parse().unwrap(),
                subject: subject.parse().unwrap(),
                message: "Hello there".parse().unwrap(),
                submitted_at: None,
            })
            .await
            .expect("Failed to insert contact")
    }

    pub fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", &self.addr, url);
        self.client.request(method, url)
    }

    pub async fn health_check(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "health_check").send().await
    }

    pub async fn contact_create(&self, form: &ContactForm) -> reqwest::Result<Response> {
        self.request(Method::POST, "api/contact")
            .json(form)
            .send()
            .await
    }

    pub async fn contacts_list(&self, password: Option<&str>) -> reqwest::Result<Response> {
        let req = self.request(Method::GET, "api/contacts");
        match password {
            Some(password) => req.query(&[("password", password)]),
            None => req,
        }
        .send()
        .await
    }

    pub async fn contact_delete(&self, id: &str, body: &AdminBody) -> reqwest::Result<Response> {
        self.request(Method::DELETE, &format!("api/contacts/{}", id))
            .json(body)
            .send()
            .await
    }
}
