//! Realtime Database REST backend.
//!
//! Every node is addressed as `{database_url}/{path}.json?auth={id_token}`. Path
//! segments are percent-encoded by [`Url::path_segments_mut`], so a username with a
//! space still lands on the right node.

use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde_json::{Map, Value};
use store::{WorkspaceError, WorkspaceStore};

/// A [`WorkspaceStore`] that talks to the Realtime Database as one signed-in user.
#[derive(Debug, Clone)]
pub struct FirebaseDatabase {
    http: Client,
    base_url: String,
    id_token: String,
}

#[derive(Debug, Deserialize)]
struct DatabaseError {
    error: String,
}

impl FirebaseDatabase {
    pub fn new(http: Client, base_url: impl Into<String>, id_token: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            id_token: id_token.into(),
        }
    }

    fn node_url(&self, path: &str) -> Result<Url, WorkspaceError> {
        let mut url = Url::parse(&self.base_url).map_err(WorkspaceError::backend)?;
        let mut segs: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        match segs.last_mut() {
            Some(last) => last.push_str(".json"),
            None => segs.push(".json".to_string()),
        }
        url.path_segments_mut()
            .map_err(|_| WorkspaceError::backend("database URL cannot be a base"))?
            .pop_if_empty()
            .extend(&segs);
        url.query_pairs_mut().append_pair("auth", &self.id_token);
        Ok(url)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, WorkspaceError> {
        let mut url = self.node_url(path)?;
        if method != Method::GET {
            url.query_pairs_mut().append_pair("print", "silent");
        }
        Ok(self.http.request(method, url))
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, WorkspaceError> {
        let response = builder.send().await.map_err(WorkspaceError::backend)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<DatabaseError>(&text)
            .map(|e| e.error)
            .unwrap_or(text);
        tracing::warn!("Database request failed ({status}): {message}");
        Err(WorkspaceError::Backend(format!("{status}: {message}")))
    }
}

impl WorkspaceStore for FirebaseDatabase {
    async fn get(&self, path: &str) -> Result<Option<Value>, WorkspaceError> {
        let response = self.send(self.request(Method::GET, path)?).await?;
        let value: Value = response.json().await.map_err(WorkspaceError::backend)?;
        Ok(match value {
            Value::Null => None,
            v => Some(v),
        })
    }

    async fn set(&self, path: &str, value: Value) -> Result<(), WorkspaceError> {
        self.send(self.request(Method::PUT, path)?.json(&value)).await?;
        Ok(())
    }

    async fn update(&self, path: &str, fields: Map<String, Value>) -> Result<(), WorkspaceError> {
        self.send(self.request(Method::PATCH, path)?.json(&fields)).await?;
        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<(), WorkspaceError> {
        self.send(self.request(Method::DELETE, path)?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use store::{ProjectDraft, Workspace};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn db(server: &MockServer) -> FirebaseDatabase {
        FirebaseDatabase::new(Client::new(), format!("{}/", server.uri()), "id-token")
    }

    #[test]
    fn test_node_url_encodes_segments() {
        let db = FirebaseDatabase::new(Client::new(), "https://demo.firebaseio.com", "tok");
        let url = db.node_url("users/ada lovelace/settings").unwrap();
        assert_eq!(
            url.as_str(),
            "https://demo.firebaseio.com/users/ada%20lovelace/settings.json?auth=tok"
        );
        let root = db.node_url("").unwrap();
        assert_eq!(root.path(), "/.json");
    }

    #[tokio::test]
    async fn test_get_missing_node_is_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/ada.json"))
            .and(query_param("auth", "id-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(Value::Null))
            .mount(&server)
            .await;

        assert_eq!(db(&server).get("users/ada").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_patches_fields() {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/users/ada.json"))
            .and(query_param("print", "silent"))
            .and(body_json(json!({ "email": "ada@example.com" })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let mut fields = Map::new();
        fields.insert("email".to_string(), json!("ada@example.com"));
        db(&server).update("users/ada", fields).await.unwrap();
    }

    #[tokio::test]
    async fn test_permission_denied_is_backend_error() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/users/ada/workspaceFiles/files/1.json"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "error": "Permission denied" })),
            )
            .mount(&server)
            .await;

        let err = db(&server)
            .remove("users/ada/workspaceFiles/files/1")
            .await
            .unwrap_err();
        assert!(matches!(err, WorkspaceError::Backend(ref m) if m.contains("Permission denied")));
    }

    #[tokio::test]
    async fn test_workspace_lists_remote_projects() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/ada/workspaceFiles/files.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "100": { "Project_Name": "Old", "timestamp": 100 },
                "200": { "Project_Name": "New", "timestamp": 200 }
            })))
            .mount(&server)
            .await;

        let workspace = Workspace::new(db(&server));
        let projects = workspace.list_projects("ada").await.unwrap();
        let names: Vec<_> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["New", "Old"]);
        assert_eq!(projects[0].id, "200");
    }

    #[tokio::test]
    async fn test_workspace_creates_remote_project() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/ada/workspaceFiles/files/5000.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(Value::Null))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/users/ada/workspaceFiles/files/5000.json"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let workspace = Workspace::new(db(&server));
        let project = workspace
            .create_project("ada", ProjectDraft::new("Site", ""), 5000)
            .await
            .unwrap();
        assert_eq!(project.id, "5000");
        assert_eq!(project.name, "Site");
    }
}
