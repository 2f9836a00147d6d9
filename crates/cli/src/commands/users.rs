//! User management commands.

use food_store_backend::BackendClient;
use food_store_core::mappers::user_from_dto;
use food_store_core::{BackendRole, Email};
use tracing::info;

use super::CommandError;

/// Log every registered user, one per line.
///
/// # Errors
///
/// Returns an error if the user list cannot be fetched.
pub async fn list(client: &BackendClient) -> Result<(), CommandError> {
    let users = client.list_users().await?;
    info!("{} user(s)", users.len());
    for user in users.into_iter().map(user_from_dto) {
        info!(
            "  #{:<4} {:<30} {:<32} {}",
            user.id,
            user.name,
            user.email,
            user.role.label()
        );
    }
    Ok(())
}

/// Give the user registered with `email` the admin role.
///
/// Promoting someone who is already an admin is a no-op.
///
/// # Errors
///
/// Returns [`CommandError::UserNotFound`] when no user has that email.
pub async fn promote(client: &BackendClient, email: &str) -> Result<(), CommandError> {
    let email = Email::parse(email)?;
    let mut user = client
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| CommandError::UserNotFound(email.to_string()))?;

    if user.role == BackendRole::Admin {
        info!(user_id = %user.id, "{email} is already an admin");
        return Ok(());
    }

    user.role = BackendRole::Admin;
    client.update_user(user.id, &user).await?;
    info!(user_id = %user.id, "{email} promoted to admin");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use food_store_backend::BackendConfig;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn server_with_users() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/usuario"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 1, "nombre": "Ana", "apellido": "García", "mail": "ana@example.com", "celular": "", "rol": "ADMIN" },
                { "id": 2, "nombre": "Luis", "apellido": "Pérez", "mail": "luis@example.com", "celular": "", "rol": "USUARIO" }
            ])))
            .mount(&server)
            .await;
        server
    }

    fn client(server: &MockServer) -> BackendClient {
        BackendClient::new(&BackendConfig::new(server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_promote_puts_admin_role() {
        let server = server_with_users().await;
        Mock::given(method("PUT"))
            .and(path("/usuario/2"))
            .and(body_partial_json(json!({ "rol": "ADMIN", "mail": "luis@example.com" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(
                { "id": 2, "nombre": "Luis", "apellido": "Pérez", "mail": "luis@example.com", "celular": "", "rol": "ADMIN" }
            )))
            .expect(1)
            .mount(&server)
            .await;

        promote(&client(&server), "LUIS@example.com").await.unwrap();
    }

    #[tokio::test]
    async fn test_promote_existing_admin_is_noop() {
        let server = server_with_users().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        promote(&client(&server), "ana@example.com").await.unwrap();
    }

    #[tokio::test]
    async fn test_promote_unknown_email() {
        let server = server_with_users().await;
        let err = promote(&client(&server), "nadie@example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::UserNotFound(_)));
    }
}
