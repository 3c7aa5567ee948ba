//! HTTP implementation of [`UserStore`] over the REST collection resource.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error};

use super::UserStore;
use crate::error::{Result, RosterError};
use crate::model::{Address, Company, UserDraft, UserRecord};

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Client for a jsonplaceholder-style `/users` collection.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    base_url: String,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()
            .map_err(|e| transport("reach the user service", &e))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    fn member_url(&self, id: i64) -> String {
        format!("{}/users/{}", self.base_url, id)
    }
}

/// Wire shape for create/update bodies: the editable fields plus
/// empty-string placeholders for everything the client does not edit.
/// `id` is present only on update; the client never invents one.
#[derive(Debug, Serialize)]
struct UserPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    name: &'a str,
    username: &'a str,
    email: &'a str,
    phone: &'a str,
    website: &'a str,
    company: Company,
    address: Address,
}

impl<'a> UserPayload<'a> {
    fn new(draft: &'a UserDraft, id: Option<i64>) -> Self {
        Self {
            id,
            name: &draft.name,
            username: &draft.username,
            email: &draft.email,
            phone: &draft.phone,
            website: &draft.website,
            company: Company {
                name: draft.company.clone(),
                catch_phrase: String::new(),
                bs: String::new(),
            },
            address: Address::default(),
        }
    }
}

/// Normalize any failure into a Transport error with a generic message,
/// keeping the raw cause in the diagnostic log only.
fn transport(action: &str, detail: &dyn std::fmt::Display) -> RosterError {
    error!("Failed to {}: {}", action, detail);
    RosterError::Transport(format!("Failed to {}. Please try again later.", action))
}

fn check_status(action: &str, response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(transport(action, &format!("HTTP status {}", status)))
    }
}

#[async_trait]
impl UserStore for HttpStore {
    async fn list_users(&self) -> Result<Vec<UserRecord>> {
        const ACTION: &str = "fetch users";
        let url = self.collection_url();
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport(ACTION, &e))?;

        check_status(ACTION, response)?
            .json()
            .await
            .map_err(|e| transport(ACTION, &e))
    }

    async fn get_user(&self, id: i64) -> Result<UserRecord> {
        const ACTION: &str = "fetch user";
        let url = self.member_url(id);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport(ACTION, &e))?;

        check_status(ACTION, response)?
            .json()
            .await
            .map_err(|e| transport(ACTION, &e))
    }

    async fn create_user(&self, draft: &UserDraft) -> Result<UserRecord> {
        const ACTION: &str = "create user";
        let url = self.collection_url();
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&UserPayload::new(draft, None))
            .send()
            .await
            .map_err(|e| transport(ACTION, &e))?;

        check_status(ACTION, response)?
            .json()
            .await
            .map_err(|e| transport(ACTION, &e))
    }

    async fn update_user(&self, id: i64, draft: &UserDraft) -> Result<UserRecord> {
        const ACTION: &str = "update user";
        let url = self.member_url(id);
        debug!("PUT {}", url);

        let response = self
            .client
            .put(&url)
            .json(&UserPayload::new(draft, Some(id)))
            .send()
            .await
            .map_err(|e| transport(ACTION, &e))?;

        check_status(ACTION, response)?
            .json()
            .await
            .map_err(|e| transport(ACTION, &e))
    }

    async fn delete_user(&self, id: i64) -> Result<()> {
        const ACTION: &str = "delete user";
        let url = self.member_url(id);
        debug!("DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| transport(ACTION, &e))?;

        check_status(ACTION, response).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn draft() -> UserDraft {
        UserDraft {
            name: "Jane Doe".into(),
            username: "jdoe".into(),
            email: "jane@example.com".into(),
            phone: "555-0100".into(),
            website: "example.com".into(),
            company: "Acme".into(),
        }
    }

    fn user_json(id: i64, name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "username": "u",
            "email": "u@u.co",
            "phone": "1",
            "website": "",
            "company": { "name": "Acme", "catchPhrase": "", "bs": "" },
            "address": {
                "street": "", "suite": "", "city": "", "zipcode": "",
                "geo": { "lat": "", "lng": "" }
            }
        })
    }

    #[tokio::test]
    async fn lists_users() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([user_json(1, "Alice"), user_json(2, "Bob")])),
            )
            .mount(&server)
            .await;

        let store = HttpStore::new(server.uri()).unwrap();
        let users = store.list_users().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].name, "Alice");
    }

    #[tokio::test]
    async fn non_success_status_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let store = HttpStore::new(server.uri()).unwrap();
        let err = store.list_users().await.unwrap_err();
        assert!(matches!(err, RosterError::Transport(_)));
        assert_eq!(
            err.to_string(),
            "Failed to fetch users. Please try again later."
        );
    }

    #[tokio::test]
    async fn malformed_body_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let store = HttpStore::new(server.uri()).unwrap();
        let err = store.list_users().await.unwrap_err();
        assert!(matches!(err, RosterError::Transport(_)));
    }

    #[tokio::test]
    async fn create_sends_placeholders_and_no_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .and(body_json(json!({
                "name": "Jane Doe",
                "username": "jdoe",
                "email": "jane@example.com",
                "phone": "555-0100",
                "website": "example.com",
                "company": { "name": "Acme", "catchPhrase": "", "bs": "" },
                "address": {
                    "street": "", "suite": "", "city": "", "zipcode": "",
                    "geo": { "lat": "", "lng": "" }
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(user_json(11, "Jane Doe")))
            .mount(&server)
            .await;

        let store = HttpStore::new(server.uri()).unwrap();
        let created = store.create_user(&draft()).await.unwrap();
        assert_eq!(created.id, 11);
    }

    #[tokio::test]
    async fn update_sends_the_id_to_the_member_url() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/users/7"))
            .and(body_json(json!({
                "id": 7,
                "name": "Jane Doe",
                "username": "jdoe",
                "email": "jane@example.com",
                "phone": "555-0100",
                "website": "example.com",
                "company": { "name": "Acme", "catchPhrase": "", "bs": "" },
                "address": {
                    "street": "", "suite": "", "city": "", "zipcode": "",
                    "geo": { "lat": "", "lng": "" }
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json(7, "Jane Doe")))
            .mount(&server)
            .await;

        let store = HttpStore::new(server.uri()).unwrap();
        let updated = store.update_user(7, &draft()).await.unwrap();
        assert_eq!(updated.id, 7);
    }

    #[tokio::test]
    async fn delete_succeeds_on_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/users/3"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let store = HttpStore::new(server.uri()).unwrap();
        assert!(store.delete_user(3).await.is_ok());
    }

    #[tokio::test]
    async fn delete_maps_not_found_to_transport() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/users/99"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let store = HttpStore::new(server.uri()).unwrap();
        let err = store.delete_user(99).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to delete user. Please try again later."
        );
    }

    #[tokio::test]
    async fn trailing_slash_in_base_url_is_normalized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let store = HttpStore::new(format!("{}/", server.uri())).unwrap();
        assert!(store.list_users().await.unwrap().is_empty());
    }
}
